use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use askchat_chat::{ChatSession, SessionError};
use askchat_logging::ConversationLogger;

use crate::app::ask::{report_outcome, run_turn};
use crate::app::command::{to_index, ReplCommand, HELP_TEXT};
use crate::app::render::{render_exchange, render_history, render_status, Theme};
use crate::app::setup::{build_session, open_logger};
use crate::config::AppConfig;

/// Run interactive REPL mode
pub async fn run_repl_mode(config: &AppConfig) -> Result<()> {
    println!("{}", "🤖 AI Q&A Assistant".bright_cyan().bold());
    println!("{}", format!("Endpoint: {}", config.api_url).bright_black());
    if config.persist_history {
        println!("{}", format!("History: {}", config.data_dir.display()).bright_black());
    } else {
        println!("{}", "History: in memory only (--no-save)".bright_black());
    }
    println!("{}", "Type a question, '/help' for commands, or 'exit' to quit\n".bright_black());

    let mut theme = Theme::new(config.dark_mode);
    let mut session = build_session(config)?;
    let mut logger = open_logger(config).await;

    if !session.history().is_empty() {
        println!("{}\n", render_history(session.history(), session.selection(), &theme));
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }

                if !handle_command(ReplCommand::parse(&line), &mut session, &mut logger, &mut theme).await {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red(), err);
                break;
            }
        }
    }

    if let Some(logger) = logger.as_mut() {
        logger.shutdown().await;
    }

    Ok(())
}

/// Execute one REPL command. Returns false when the REPL should exit.
async fn handle_command(
    command: ReplCommand,
    session: &mut ChatSession,
    logger: &mut Option<ConversationLogger>,
    theme: &mut Theme,
) -> bool {
    match command {
        ReplCommand::Empty => {}
        ReplCommand::Exit => {
            println!("{}", "Goodbye!".bright_cyan());
            return false;
        }
        ReplCommand::Ask(question) => {
            session.set_draft(question);
            submit(session, logger, theme).await;
        }
        ReplCommand::Send => submit(session, logger, theme).await,
        ReplCommand::Draft(text) => {
            session.set_draft(text);
            println!("{}", "Draft saved. Use /send to ask it.".bright_black());
        }
        ReplCommand::History => {
            println!("{}", render_history(session.history(), session.selection(), theme));
        }
        ReplCommand::Show(position) => match session.select_exchange(to_index(position)) {
            Ok(()) => {
                if let Some(exchange) = session.selected() {
                    println!("{}\n", render_exchange(exchange, theme));
                }
            }
            Err(err) => print_session_error(&err),
        },
        ReplCommand::Copy(position) => {
            let index = match position {
                Some(position) => Some(to_index(position)),
                None => session.selection(),
            };
            match index {
                Some(index) => match session.copy_answer(index) {
                    Ok(()) => println!("{}", "📋 Copied to clipboard!".bright_green()),
                    Err(err) => print_session_error(&err),
                },
                None => eprintln!("{}", "No answer selected. Use /copy <number>.".yellow()),
            }
        }
        ReplCommand::Theme => {
            theme.toggle();
            println!("{}", format!("Display: {}", theme.name()).bright_black());
        }
        ReplCommand::Status => {
            let status = render_status(session.status());
            if status.is_empty() {
                println!("{}", "Ready.".bright_black());
            } else {
                println!("{}", status);
            }
            if !session.draft().is_empty() {
                println!("{} {}", "Draft:".bright_black(), session.draft());
            }
            if let Some(err) = session.last_persist_error() {
                println!("{} {}", "Last save failed:".yellow(), err);
            }
        }
        ReplCommand::Help => println!("{}", HELP_TEXT),
        ReplCommand::Invalid(message) => eprintln!("{}", message.yellow()),
    }
    true
}

async fn submit(session: &mut ChatSession, logger: &mut Option<ConversationLogger>, theme: &Theme) {
    let outcome = run_turn(session, logger).await;
    report_outcome(session, &outcome, theme);
}

fn print_session_error(err: &SessionError) {
    let message = match err {
        SessionError::IndexOutOfRange { index, len } => {
            format!("No exchange #{} (history has {} entries)", index + 1, len)
        }
        SessionError::Clipboard(reason) => format!("Could not copy: {}", reason),
    };
    eprintln!("{} {}", "❌".bright_red(), message);
}
