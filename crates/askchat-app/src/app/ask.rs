use anyhow::Result;
use colored::Colorize;

use askchat_api::AskClient;
use askchat_chat::{ChatSession, RejectReason, SubmitOutcome};
use askchat_logging::ConversationLogger;
use askchat_types::SessionStatus;

use crate::app::render::{render_exchange, render_history, render_status, Theme};
use crate::app::setup::{build_session, open_logger};
use crate::config::AppConfig;

/// Submit the session's draft, showing the loading indicator while the
/// request is in flight and recording the outcome in the conversation log.
pub async fn run_turn(
    session: &mut ChatSession,
    logger: &mut Option<ConversationLogger>,
) -> SubmitOutcome {
    let question = session.draft().to_string();
    let pending = match session.begin_submit(&question) {
        Ok(pending) => pending,
        Err(reason) => return SubmitOutcome::Rejected(reason),
    };

    if let Some(logger) = logger.as_mut() {
        logger.log_question(pending.question()).await;
    }
    println!("{}", render_status(session.status()));

    let client = session.client();
    let result = client.ask(pending.question()).await;
    let outcome = session.complete_submit(pending, result);

    if let Some(logger) = logger.as_mut() {
        match &outcome {
            SubmitOutcome::Answered { index } => {
                if let Some(exchange) = session.history().get(*index) {
                    logger.log_answer(exchange).await;
                }
            }
            SubmitOutcome::Failed { message } => logger.log_error(&question, message).await,
            SubmitOutcome::Rejected(_) => {}
        }
    }

    outcome
}

/// Print what a submit produced
pub fn report_outcome(session: &ChatSession, outcome: &SubmitOutcome, theme: &Theme) {
    match outcome {
        SubmitOutcome::Answered { .. } => {
            if let Some(exchange) = session.selected() {
                println!("{}\n", render_exchange(exchange, theme));
            }
        }
        SubmitOutcome::Failed { .. } => {
            eprintln!("{} {}", "❌".bright_red(), render_status(session.status()));
        }
        SubmitOutcome::Rejected(RejectReason::EmptyQuestion) => {
            eprintln!("{}", "Please enter a question.".yellow());
        }
        SubmitOutcome::Rejected(RejectReason::RequestInFlight) => {
            eprintln!("{}", "Still waiting for the previous answer.".yellow());
        }
    }
}

/// One-shot mode: ask a single question and exit
pub async fn run_ask_mode(config: &AppConfig, question: String) -> Result<()> {
    let theme = Theme::new(config.dark_mode);
    let mut session = build_session(config)?;
    let mut logger = open_logger(config).await;

    session.set_draft(question);
    let outcome = run_turn(&mut session, &mut logger).await;
    report_outcome(&session, &outcome, &theme);

    if let Some(logger) = logger.as_mut() {
        logger.shutdown().await;
    }

    match (outcome, session.status()) {
        (SubmitOutcome::Answered { .. }, _) => Ok(()),
        (_, SessionStatus::Errored(message)) => anyhow::bail!("{}", message),
        _ => anyhow::bail!("No question was sent"),
    }
}

/// `history` subcommand: print saved exchanges
pub fn run_history_command(config: &AppConfig, full: bool) -> Result<()> {
    let theme = Theme::new(config.dark_mode);
    let session = build_session(config)?;

    if !full {
        println!("{}", render_history(session.history(), None, &theme));
        return Ok(());
    }

    if session.history().is_empty() {
        println!("{}", render_history(session.history(), None, &theme));
    }
    for (index, exchange) in session.history().iter().enumerate() {
        println!("{}", format!("── #{} ──", index + 1).bright_black());
        println!("{}\n", render_exchange(exchange, &theme));
    }
    Ok(())
}
