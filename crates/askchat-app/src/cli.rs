use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// CLI arguments for askchat
#[derive(Parser, Debug)]
#[command(name = "askchat")]
#[command(about = "AI Q&A Assistant - ask questions, keep a history of answers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Question/answer endpoint (e.g., http://127.0.0.1:8000/api/ask)
    #[arg(long, value_name = "URL", env = "ASKCHAT_API_URL")]
    pub api_url: Option<String>,

    /// Directory for saved history, logs and config.toml (default: ~/.askchat)
    #[arg(long, value_name = "PATH", env = "ASKCHAT_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Path to a TOML config file (default: <data-dir>/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ask a single question, print the answer and exit
    #[arg(long, value_name = "TEXT")]
    pub ask: Option<String>,

    /// Keep history in memory only
    #[arg(long)]
    pub no_save: bool,

    /// Start with the dark display preference
    #[arg(long)]
    pub dark: bool,

    /// Show HTTP request/response dumps
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    pub generate: Option<Shell>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List saved exchanges and exit
    History {
        /// Print every answer in full
        #[arg(long)]
        full: bool,
    },
}
