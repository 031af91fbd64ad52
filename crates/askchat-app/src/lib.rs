//! askchat application library
//!
//! Command line, configuration and the terminal front end over the chat
//! session manager.

pub use askchat_api as api;
pub use askchat_chat as chat;
pub use askchat_types as types;

pub mod app;
pub mod cli;
pub mod config;

pub use app::{run_ask_mode, run_history_command, run_repl_mode};
pub use cli::{Cli, Commands};
pub use config::{AppConfig, FileConfig};
