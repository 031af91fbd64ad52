use thiserror::Error;

use askchat_types::{GENERIC_ERROR_MESSAGE, UNREACHABLE_MESSAGE};

/// Why a question did not produce an answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AskError {
    /// The service answered with a non-success status
    #[error("service returned an error: {}", .detail.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Application { detail: Option<String> },

    /// No usable response was received
    #[error("transport failure: {0}")]
    Transport(String),
}

impl AskError {
    /// Text shown to the user as the session's error status
    pub fn user_message(&self) -> String {
        match self {
            AskError::Application { detail: Some(detail) } => detail.clone(),
            AskError::Application { detail: None } => GENERIC_ERROR_MESSAGE.to_string(),
            AskError::Transport(_) => UNREACHABLE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for AskError {
    fn from(err: reqwest::Error) -> Self {
        AskError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_detail() {
        let err = AskError::Application {
            detail: Some("rate limited".to_string()),
        };
        assert_eq!(err.user_message(), "rate limited");
    }

    #[test]
    fn test_user_message_fallbacks() {
        assert_eq!(
            AskError::Application { detail: None }.user_message(),
            "Something went wrong."
        );
        assert_eq!(
            AskError::Transport("connection refused".into()).user_message(),
            "Server is unreachable."
        );
    }
}
