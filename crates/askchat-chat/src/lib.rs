//! Chat session management for askchat.
//!
//! `ChatSession` owns the exchange history and the request status; storage,
//! the remote service and the clipboard are injected collaborators so tests
//! can substitute in-memory fakes.

pub mod clipboard;
pub mod history;
pub mod session;
pub mod store;


pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use history::{load_history, parse_history, save_history};
pub use session::{ChatSession, PendingSubmit, RejectReason, SessionError, SubmitOutcome};
pub use store::{FileStore, KeyValueStore, MemoryStore};
