/// A line typed at the REPL prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text: submit it as a question
    Ask(String),
    History,
    /// 1-based position as typed by the user
    Show(usize),
    /// `None` copies the selected answer
    Copy(Option<usize>),
    Draft(String),
    Send,
    Theme,
    Status,
    Help,
    Exit,
    Empty,
    Invalid(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if line.is_empty() {
            return ReplCommand::Empty;
        }
        if line == "exit" || line == "quit" {
            return ReplCommand::Exit;
        }
        if !line.starts_with('/') {
            return ReplCommand::Ask(line.to_string());
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "/history" => ReplCommand::History,
            "/show" => match parse_position(rest) {
                Some(n) => ReplCommand::Show(n),
                None => ReplCommand::Invalid("Usage: /show <number>".to_string()),
            },
            "/copy" if rest.is_empty() => ReplCommand::Copy(None),
            "/copy" => match parse_position(rest) {
                Some(n) => ReplCommand::Copy(Some(n)),
                None => ReplCommand::Invalid("Usage: /copy [number]".to_string()),
            },
            "/draft" => ReplCommand::Draft(rest.to_string()),
            "/send" => ReplCommand::Send,
            "/theme" => ReplCommand::Theme,
            "/status" => ReplCommand::Status,
            "/help" => ReplCommand::Help,
            "/exit" | "/quit" => ReplCommand::Exit,
            other => ReplCommand::Invalid(format!("Unknown command: {} (try /help)", other)),
        }
    }
}

fn parse_position(text: &str) -> Option<usize> {
    text.parse::<usize>().ok().filter(|n| *n >= 1)
}

/// Convert a 1-based position typed by the user into a history index
pub fn to_index(position: usize) -> usize {
    position.saturating_sub(1)
}

pub const HELP_TEXT: &str = "\
Commands:
  <text>            Ask a question
  /history          List previous questions
  /show <n>         Show exchange n in full
  /copy [n]         Copy answer n (default: the one shown) to the clipboard
  /draft <text>     Set the draft question without sending it
  /send             Send the draft question
  /theme            Toggle dark/light display
  /status           Show request status
  /help             Show this help
  exit | quit       Leave";
