use colored::{Color, Colorize};

use askchat_types::{Exchange, SessionStatus};

/// Display preference. Independent of the chat session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub fn toggle(&mut self) {
        self.dark = !self.dark;
    }

    pub fn name(&self) -> &'static str {
        if self.dark {
            "dark"
        } else {
            "light"
        }
    }

    fn heading(&self) -> Color {
        if self.dark {
            Color::BrightWhite
        } else {
            Color::Black
        }
    }

    fn accent(&self) -> Color {
        if self.dark {
            Color::BrightBlue
        } else {
            Color::Blue
        }
    }

    fn answer(&self) -> Color {
        if self.dark {
            Color::BrightGreen
        } else {
            Color::Green
        }
    }

    fn muted(&self) -> Color {
        if self.dark {
            Color::BrightBlack
        } else {
            Color::TrueColor {
                r: 96,
                g: 96,
                b: 96,
            }
        }
    }
}

/// Sidebar-style list of question previews, the selected one highlighted
pub fn render_history(history: &[Exchange], selection: Option<usize>, theme: &Theme) -> String {
    if history.is_empty() {
        return "No previous questions yet.".color(theme.muted()).to_string();
    }

    let mut out = format!("{}\n", "Chat History".color(theme.heading()).bold());
    for (index, exchange) in history.iter().enumerate() {
        let line = format!("{:>3}. {}", index + 1, exchange.preview());
        if Some(index) == selection {
            out.push_str(&format!("{}\n", line.color(theme.accent()).bold().reversed()));
        } else {
            out.push_str(&format!("{}\n", line));
        }
    }
    out.trim_end().to_string()
}

/// One exchange in full
pub fn render_exchange(exchange: &Exchange, theme: &Theme) -> String {
    format!(
        "{}\n{}\n\n{}\n{}\n\n{}",
        "You:".color(theme.accent()).bold(),
        exchange.question,
        "AI Response:".color(theme.answer()).bold(),
        exchange.answer,
        format!("Answered: {}", exchange.answered_display()).color(theme.muted()),
    )
}

/// Loading indicator or error text; empty when idle
pub fn render_status(status: &SessionStatus) -> String {
    match status {
        SessionStatus::Idle => String::new(),
        SessionStatus::Pending => "Thinking...".yellow().to_string(),
        SessionStatus::Errored(message) => message.red().to_string(),
    }
}
