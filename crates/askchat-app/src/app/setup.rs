use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

use askchat_api::HttpAskClient;
use askchat_chat::{ChatSession, FileStore, KeyValueStore, MemoryStore, SystemClipboard};
use askchat_logging::{get_logs_dir, ConversationLogger};

use crate::config::AppConfig;

/// Storage collaborator for the configured persistence mode
pub fn open_store(config: &AppConfig) -> Result<Box<dyn KeyValueStore>> {
    if config.persist_history {
        Ok(Box::new(FileStore::new(&config.data_dir)?))
    } else {
        Ok(Box::new(MemoryStore::new()))
    }
}

/// Wire the session manager to its real collaborators
pub fn build_session(config: &AppConfig) -> Result<ChatSession> {
    let store = open_store(config)?;
    let client = HttpAskClient::new(&config.api_url).with_verbose(config.verbose);

    Ok(ChatSession::initialize(
        store,
        Arc::new(client),
        Box::new(SystemClipboard::new()),
    ))
}

/// Conversation logger, or `None` (with a note on stderr) when it can't be opened
pub async fn open_logger(config: &AppConfig) -> Option<ConversationLogger> {
    if !config.log_conversations {
        return None;
    }

    let logs_dir = match get_logs_dir(&config.data_dir) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{} Logging disabled: {:#}", "⚠️".yellow(), e);
            return None;
        }
    };

    match ConversationLogger::new(&logs_dir).await {
        Ok(logger) => Some(logger),
        Err(e) => {
            eprintln!("{} Logging disabled: {:#}", "⚠️".yellow(), e);
            None
        }
    }
}
