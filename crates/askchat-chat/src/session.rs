use colored::Colorize;
use std::sync::Arc;
use thiserror::Error;

use askchat_api::{AskClient, AskError};
use askchat_types::{AskResponse, Exchange, History, SessionStatus};

use crate::clipboard::Clipboard;
use crate::history::{load_history, save_history};
use crate::store::KeyValueStore;

/// Errors from session operations other than submit
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no exchange #{index} (history has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("clipboard error: {0}")]
    Clipboard(String),
}

/// Why a submit was refused before any request was made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyQuestion,
    RequestInFlight,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The exchange was appended at `index`
    Answered { index: usize },
    /// The request failed; the message is now the session's error status
    Failed { message: String },
    /// Nothing was sent
    Rejected(RejectReason),
}

/// Ticket for the request currently in flight.
///
/// Only `begin_submit` creates one, and `complete_submit` consumes it.
#[derive(Debug)]
#[must_use = "a pending submit must be completed or the session stays Pending"]
pub struct PendingSubmit {
    question: String,
}

impl PendingSubmit {
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// Chat session manager.
///
/// Owns the history of exchanges, the selection, the request status and the
/// draft question, and mediates between storage, the remote service and the
/// clipboard.
pub struct ChatSession {
    history: History,
    selection: Option<usize>,
    status: SessionStatus,
    draft: String,
    last_persist_error: Option<String>,
    store: Box<dyn KeyValueStore>,
    client: Arc<dyn AskClient>,
    clipboard: Box<dyn Clipboard>,
}

impl ChatSession {
    /// Start a session from whatever history the store holds.
    ///
    /// Never fails: unreadable or malformed history starts the session empty.
    pub fn initialize(
        store: Box<dyn KeyValueStore>,
        client: Arc<dyn AskClient>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let history = load_history(store.as_ref());

        Self {
            history,
            selection: None,
            status: SessionStatus::Idle,
            draft: String::new(),
            last_persist_error: None,
            store,
            client,
            clipboard,
        }
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// The exchange currently shown in detail
    pub fn selected(&self) -> Option<&Exchange> {
        self.selection.and_then(|index| self.history.get(index))
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Error from the most recent history write, if it failed
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    /// Handle to the remote collaborator, for driving `begin_submit`/`complete_submit`
    pub fn client(&self) -> Arc<dyn AskClient> {
        Arc::clone(&self.client)
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Validate a question and mark the session Pending.
    ///
    /// Refuses blank questions and any call while a request is in flight;
    /// a refused call leaves every piece of state untouched.
    pub fn begin_submit(&mut self, question: &str) -> Result<PendingSubmit, RejectReason> {
        if question.trim().is_empty() {
            return Err(RejectReason::EmptyQuestion);
        }
        if self.status.is_pending() {
            return Err(RejectReason::RequestInFlight);
        }

        self.status = SessionStatus::Pending;
        Ok(PendingSubmit {
            question: question.to_string(),
        })
    }

    /// Apply the outcome of the request started by `begin_submit`.
    pub fn complete_submit(
        &mut self,
        pending: PendingSubmit,
        result: Result<AskResponse, AskError>,
    ) -> SubmitOutcome {
        match result {
            Ok(response) => {
                self.history.push(Exchange {
                    question: pending.question,
                    answer: response.answer,
                    timestamp: response.timestamp_responded,
                });
                let index = self.history.len() - 1;
                self.selection = Some(index);
                self.status = SessionStatus::Idle;
                self.draft.clear();
                self.persist();
                SubmitOutcome::Answered { index }
            }
            Err(err) => {
                let message = err.user_message();
                self.status = SessionStatus::Errored(message.clone());
                SubmitOutcome::Failed { message }
            }
        }
    }

    /// Send a question and wait for the answer.
    pub async fn submit(&mut self, question: &str) -> SubmitOutcome {
        let pending = match self.begin_submit(question) {
            Ok(pending) => pending,
            Err(reason) => return SubmitOutcome::Rejected(reason),
        };

        let result = self.client.ask(pending.question()).await;
        self.complete_submit(pending, result)
    }

    /// Submit the current draft
    pub async fn submit_draft(&mut self) -> SubmitOutcome {
        let question = self.draft.clone();
        self.submit(&question).await
    }

    /// Show the exchange at `index` in detail
    pub fn select_exchange(&mut self, index: usize) -> Result<(), SessionError> {
        self.check_index(index)?;
        self.selection = Some(index);
        Ok(())
    }

    /// Copy the answer of the exchange at `index` to the clipboard
    pub fn copy_answer(&mut self, index: usize) -> Result<(), SessionError> {
        self.check_index(index)?;
        let answer = &self.history[index].answer;
        self.clipboard
            .copy_text(answer)
            .map_err(|e| SessionError::Clipboard(format!("{:#}", e)))
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.history.len() {
            Ok(())
        } else {
            Err(SessionError::IndexOutOfRange {
                index,
                len: self.history.len(),
            })
        }
    }

    /// Write the full history snapshot. The in-memory history stays
    /// authoritative when the write fails.
    fn persist(&mut self) {
        match save_history(self.store.as_mut(), &self.history) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                let message = format!("{:#}", e);
                eprintln!("{} Failed to save chat history: {}", "⚠️".yellow(), message);
                self.last_persist_error = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::store::MemoryStore;
    use crate::tests::{FailingClipboard, ScriptedClient, failing_store, ok};
    use askchat_types::HISTORY_KEY;
    use pretty_assertions::assert_eq;

    fn session_with(client: ScriptedClient) -> (ChatSession, MemoryStore, MemoryClipboard) {
        let store = MemoryStore::new();
        let clipboard = MemoryClipboard::new();
        let session = ChatSession::initialize(
            Box::new(store.clone()),
            Arc::new(client),
            Box::new(clipboard.clone()),
        );
        (session, store, clipboard)
    }

    #[tokio::test]
    async fn test_successful_submit_appends_and_selects() {
        let client = ScriptedClient::new(vec![ok("4", "2024-01-01T00:00:00Z")]);
        let (mut session, store, _) = session_with(client.clone());

        let outcome = session.submit("What is 2+2?").await;

        assert_eq!(outcome, SubmitOutcome::Answered { index: 0 });
        assert_eq!(
            session.history(),
            &[Exchange::new("What is 2+2?", "4", "2024-01-01T00:00:00Z")]
        );
        assert_eq!(session.selection(), Some(0));
        assert_eq!(session.status(), &SessionStatus::Idle);
        assert_eq!(client.questions(), vec!["What is 2+2?".to_string()]);

        let saved = store.get(HISTORY_KEY).unwrap().unwrap();
        let reloaded: History = serde_json::from_str(&saved).unwrap();
        assert_eq!(reloaded, session.history());
    }

    #[tokio::test]
    async fn test_empty_question_is_rejected_locally() {
        let client = ScriptedClient::new(vec![]);
        let (mut session, store, _) = session_with(client.clone());

        for question in ["", "   ", "\n\t"] {
            let outcome = session.submit(question).await;
            assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::EmptyQuestion));
        }

        assert!(session.history().is_empty());
        assert_eq!(session.status(), &SessionStatus::Idle);
        assert!(client.questions().is_empty());
        assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_question_keeps_error_status() {
        let client = ScriptedClient::new(vec![Err(AskError::Transport("down".into()))]);
        let (mut session, _, _) = session_with(client);

        session.submit("ping").await;
        session.submit("  ").await;

        assert_eq!(
            session.status(),
            &SessionStatus::Errored("Server is unreachable.".into())
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_sets_error() {
        let client = ScriptedClient::new(vec![Err(AskError::Transport(
            "connection refused".into(),
        ))]);
        let (mut session, store, _) = session_with(client);
        session.set_draft("ping");

        let outcome = session.submit_draft().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Server is unreachable.".into()
            }
        );
        assert!(session.history().is_empty());
        assert_eq!(
            session.status(),
            &SessionStatus::Errored("Server is unreachable.".into())
        );
        assert_eq!(session.draft(), "ping");
        assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_server_detail_becomes_error_message() {
        let client = ScriptedClient::new(vec![Err(AskError::Application {
            detail: Some("rate limited".into()),
        })]);
        let (mut session, _, _) = session_with(client);

        session.submit("ping").await;

        assert_eq!(
            session.status(),
            &SessionStatus::Errored("rate limited".into())
        );
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_selection_and_draft() {
        let client = ScriptedClient::new(vec![
            ok("one", "t1"),
            ok("two", "t2"),
            Err(AskError::Application { detail: None }),
        ]);
        let (mut session, _, _) = session_with(client);

        session.submit("q1").await;
        session.submit("q2").await;
        session.select_exchange(0).unwrap();
        session.set_draft("q3");

        let outcome = session.submit_draft().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Something went wrong.".into()
            }
        );
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.selection(), Some(0));
        assert_eq!(session.draft(), "q3");
    }

    #[tokio::test]
    async fn test_error_clears_on_next_success() {
        let client = ScriptedClient::new(vec![
            Err(AskError::Transport("down".into())),
            ok("pong", "t"),
        ]);
        let (mut session, _, _) = session_with(client);

        session.submit("ping").await;
        assert!(session.status().error_message().is_some());

        session.submit("ping").await;
        assert_eq!(session.status(), &SessionStatus::Idle);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_success_clears_draft() {
        let client = ScriptedClient::new(vec![ok("4", "t")]);
        let (mut session, _, _) = session_with(client);
        session.set_draft("What is 2+2?");

        session.submit_draft().await;

        assert_eq!(session.draft(), "");
        assert_eq!(session.history()[0].question, "What is 2+2?");
    }

    #[tokio::test]
    async fn test_question_is_sent_untrimmed() {
        let client = ScriptedClient::new(vec![ok("a", "t")]);
        let (mut session, _, _) = session_with(client.clone());

        session.submit("  spaced  ").await;

        assert_eq!(client.questions(), vec!["  spaced  ".to_string()]);
        assert_eq!(session.history()[0].question, "  spaced  ");
    }

    #[test]
    fn test_second_begin_while_pending_is_rejected() {
        let client = ScriptedClient::new(vec![]);
        let (mut session, _, _) = session_with(client);

        let first = session.begin_submit("first").unwrap();
        assert!(session.is_pending());

        let second = session.begin_submit("second");
        assert_eq!(second.unwrap_err(), RejectReason::RequestInFlight);
        assert!(session.is_pending());

        let outcome = session.complete_submit(first, ok("answer", "t"));
        assert_eq!(outcome, SubmitOutcome::Answered { index: 0 });
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].question, "first");
        assert_eq!(session.status(), &SessionStatus::Idle);
    }

    #[test]
    fn test_pending_hides_previous_error() {
        let client = ScriptedClient::new(vec![]);
        let (mut session, _, _) = session_with(client);

        let pending = session.begin_submit("q").unwrap();
        let _ = session.complete_submit(pending, Err(AskError::Transport("x".into())));
        assert!(session.status().error_message().is_some());

        let pending = session.begin_submit("q").unwrap();
        assert_eq!(session.status(), &SessionStatus::Pending);
        let _ = session.complete_submit(pending, ok("a", "t"));
    }

    #[tokio::test]
    async fn test_select_exchange_after_two_submits() {
        let client = ScriptedClient::new(vec![ok("one", "t1"), ok("two", "t2")]);
        let (mut session, _, _) = session_with(client);

        session.submit("q1").await;
        session.submit("q2").await;
        assert_eq!(session.selection(), Some(1));
        let before = session.history().to_vec();

        session.select_exchange(0).unwrap();

        assert_eq!(session.selection(), Some(0));
        assert_eq!(session.selected().map(|e| e.answer.as_str()), Some("one"));
        assert_eq!(session.history(), before.as_slice());
        assert_eq!(session.status(), &SessionStatus::Idle);
    }

    #[test]
    fn test_select_out_of_range_is_an_error() {
        let client = ScriptedClient::new(vec![]);
        let (mut session, _, _) = session_with(client);

        let err = session.select_exchange(0).unwrap_err();
        assert!(matches!(err, SessionError::IndexOutOfRange { index: 0, len: 0 }));
        assert_eq!(session.selection(), None);
    }

    #[tokio::test]
    async fn test_select_works_while_errored() {
        let client = ScriptedClient::new(vec![
            ok("one", "t1"),
            Err(AskError::Transport("down".into())),
        ]);
        let (mut session, _, _) = session_with(client);

        session.submit("q1").await;
        session.submit("q2").await;
        session.select_exchange(0).unwrap();

        assert_eq!(session.selection(), Some(0));
        assert!(session.status().error_message().is_some());
    }

    #[tokio::test]
    async fn test_copy_answer_uses_clipboard() {
        let client = ScriptedClient::new(vec![ok("first answer", "t1"), ok("second answer", "t2")]);
        let (mut session, _, clipboard) = session_with(client);

        session.submit("q1").await;
        session.submit("q2").await;
        session.copy_answer(0).unwrap();

        assert_eq!(clipboard.contents().as_deref(), Some("first answer"));
        assert_eq!(session.selection(), Some(1));
    }

    #[test]
    fn test_copy_answer_out_of_range() {
        let client = ScriptedClient::new(vec![]);
        let (mut session, _, clipboard) = session_with(client);

        assert!(matches!(
            session.copy_answer(3),
            Err(SessionError::IndexOutOfRange { index: 3, len: 0 })
        ));
        assert_eq!(clipboard.contents(), None);
    }

    #[tokio::test]
    async fn test_copy_answer_clipboard_failure_leaves_state() {
        let mut session = ChatSession::initialize(
            Box::new(MemoryStore::new()),
            Arc::new(ScriptedClient::new(vec![ok("a1", "t1"), ok("a2", "t2")])),
            Box::new(FailingClipboard),
        );
        session.submit("q1").await;
        session.submit("q2").await;
        session.select_exchange(0).unwrap();
        let history_before = session.history().to_vec();

        let err = session.copy_answer(1).unwrap_err();

        assert!(
            matches!(&err, SessionError::Clipboard(reason) if reason.contains("no display available"))
        );
        assert_eq!(session.selection(), Some(0));
        assert_eq!(session.history(), history_before.as_slice());
        assert_eq!(session.status(), &SessionStatus::Idle);
    }

    #[test]
    fn test_initialize_loads_saved_history() {
        let raw = r#"[{"question":"q","answer":"a","timestamp":"t"}]"#;
        let store = MemoryStore::new().with_value(HISTORY_KEY, raw);
        let session = ChatSession::initialize(
            Box::new(store),
            Arc::new(ScriptedClient::new(vec![])),
            Box::new(MemoryClipboard::new()),
        );

        assert_eq!(session.history(), &[Exchange::new("q", "a", "t")]);
        assert_eq!(session.selection(), None);
        assert_eq!(session.status(), &SessionStatus::Idle);
        assert_eq!(session.draft(), "");
    }

    #[test]
    fn test_initialize_with_malformed_history_starts_empty() {
        let store = MemoryStore::new().with_value(HISTORY_KEY, "{not json");
        let session = ChatSession::initialize(
            Box::new(store),
            Arc::new(ScriptedClient::new(vec![])),
            Box::new(MemoryClipboard::new()),
        );

        assert!(session.history().is_empty());
        assert_eq!(session.status(), &SessionStatus::Idle);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_answer_in_memory() {
        let mut session = ChatSession::initialize(
            Box::new(failing_store()),
            Arc::new(ScriptedClient::new(vec![ok("4", "t")])),
            Box::new(MemoryClipboard::new()),
        );

        let outcome = session.submit("What is 2+2?").await;

        assert_eq!(outcome, SubmitOutcome::Answered { index: 0 });
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.status(), &SessionStatus::Idle);
        assert!(session.last_persist_error().is_some());
    }
}
