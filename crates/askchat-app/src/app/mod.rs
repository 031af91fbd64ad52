pub mod ask;
pub mod command;
pub mod render;
pub mod repl;
pub mod setup;

pub use ask::{run_ask_mode, run_history_command, run_turn};
pub use repl::run_repl_mode;
pub use setup::{build_session, open_logger};
