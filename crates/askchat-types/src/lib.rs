//! Core types and structures for askchat
//!
//! This crate provides the foundational types shared by the API client, the
//! chat session manager and the terminal front end.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Storage key under which the serialized history is kept
pub const HISTORY_KEY: &str = "chatHistory";

/// Default endpoint of the question/answer service
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/ask";

/// Number of characters of a question shown in history previews
pub const PREVIEW_CHARS: usize = 30;

/// Status text used when the server could not be reached at all
pub const UNREACHABLE_MESSAGE: &str = "Server is unreachable.";

/// Status text used when the server failed without giving a reason
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong.";

// ============================================================================
// Exchange Types
// ============================================================================

/// One question/answer round trip.
///
/// Only complete exchanges exist: the answer and its timestamp are part of
/// the value, so a placeholder entry cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
    /// When the server produced the answer, as reported by the server
    pub timestamp: String,
}

impl Exchange {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Short form of the question for history listings: the first
    /// `PREVIEW_CHARS` characters followed by an ellipsis.
    pub fn preview(&self) -> String {
        let head: String = self.question.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    }

    /// An exchange read back from storage must carry a real question
    pub fn is_well_formed(&self) -> bool {
        !self.question.trim().is_empty()
    }

    /// Parse the server timestamp into local time.
    ///
    /// Accepts RFC 3339 and naive ISO 8601 (the service emits naive local
    /// times); returns `None` when neither matches.
    pub fn answered_at(&self) -> Option<DateTime<Local>> {
        parse_timestamp(&self.timestamp)
    }

    /// Human readable "answered" time, falling back to the raw value
    pub fn answered_display(&self) -> String {
        match self.answered_at() {
            Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => self.timestamp.clone(),
        }
    }
}

/// Parse a timestamp as produced by the question/answer service
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Ordered sequence of exchanges, oldest first
pub type History = Vec<Exchange>;

// ============================================================================
// Session Status
// ============================================================================

/// State of the single outstanding request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Pending,
    Errored(String),
}

impl SessionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, SessionStatus::Pending)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SessionStatus::Errored(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Idle => write!(f, "idle"),
            SessionStatus::Pending => write!(f, "pending"),
            SessionStatus::Errored(message) => write!(f, "error: {}", message),
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Body of `POST /api/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Successful response of `POST /api/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub timestamp_responded: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_received: Option<String>,
}

/// Body of a failed response; `detail` is shown to the user verbatim
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
