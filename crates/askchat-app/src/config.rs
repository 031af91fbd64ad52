use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use askchat_logging::{default_data_dir, expand_tilde};
use askchat_types::DEFAULT_API_URL;

use crate::cli::Cli;

/// Settings read from `config.toml`
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub dark_mode: Option<bool>,
    pub log_conversations: Option<bool>,
}

impl FileConfig {
    /// Load a config file. A missing file is only an error when `required`.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !path.exists() {
            if required {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Application configuration derived from CLI arguments, environment and config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub dark_mode: bool,
    pub log_conversations: bool,
    pub persist_history: bool,
    pub verbose: bool,
}

impl AppConfig {
    /// Precedence: CLI flags / env > config file > defaults
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => expand_tilde(dir)?,
            None => default_data_dir()?,
        };

        let file_config = match &cli.config {
            Some(path) => FileConfig::load(&expand_tilde(path)?, true)?,
            None => FileConfig::load(&data_dir.join("config.toml"), false)?,
        };

        Ok(Self::merge(cli, file_config, data_dir))
    }

    pub fn merge(cli: &Cli, file_config: FileConfig, data_dir: PathBuf) -> Self {
        let api_url = cli
            .api_url
            .clone()
            .or(file_config.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_url,
            data_dir,
            dark_mode: cli.dark || file_config.dark_mode.unwrap_or(false),
            log_conversations: file_config.log_conversations.unwrap_or(true),
            persist_history: !cli.no_save,
            verbose: cli.verbose,
        }
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
