use anyhow::Result;
use clap::{CommandFactory, Parser};

use askchat::{run_ask_mode, run_history_command, run_repl_mode, AppConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(shell) = cli.generate {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "askchat", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::resolve(&cli)?;

    if let Some(Commands::History { full }) = cli.command {
        return run_history_command(&config, full);
    }

    if let Some(question) = cli.ask.clone() {
        return run_ask_mode(&config, question).await;
    }

    run_repl_mode(&config).await
}
