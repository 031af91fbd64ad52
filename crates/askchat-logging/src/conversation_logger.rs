use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use askchat_types::Exchange;

#[derive(Serialize)]
struct LogEntry {
    timestamp: String, // ISO-8601 UTC
    kind: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answered_at: Option<String>,
}

/// Append-only JSONL record of a session's questions, answers and failures.
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger; generates the file name based on the current UTC time.
    pub async fn new(logs_dir: &Path) -> Result<Self> {
        fs::create_dir_all(logs_dir).await?;

        let now: DateTime<Utc> = Utc::now();
        let filename = format!("askchat-{}.jsonl", now.format("%Y-%m-%d-%H%M%S"));
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self {
            file_path,
            file: Some(file),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Record a question as it is sent.
    pub async fn log_question(&mut self, question: &str) {
        self.write(LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            kind: "question".to_string(),
            content: question.to_string(),
            question: None,
            answered_at: None,
        })
        .await;
    }

    /// Record a completed exchange.
    pub async fn log_answer(&mut self, exchange: &Exchange) {
        self.write(LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            kind: "answer".to_string(),
            content: exchange.answer.clone(),
            question: Some(exchange.question.clone()),
            answered_at: Some(exchange.timestamp.clone()),
        })
        .await;
    }

    /// Record a failed attempt and the message shown to the user.
    pub async fn log_error(&mut self, question: &str, message: &str) {
        self.write(LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            kind: "error".to_string(),
            content: message.to_string(),
            question: Some(question.to_string()),
            answered_at: None,
        })
        .await;
    }

    async fn write(&mut self, entry: LogEntry) {
        if let Some(file) = &mut self.file {
            if let Ok(json) = serde_json::to_string(&entry) {
                if let Err(e) = file.write_all(json.as_bytes()).await {
                    eprintln!("[Logging error] {}", e);
                } else if let Err(e) = file.write_all(b"\n").await {
                    eprintln!("[Logging error] {}", e);
                }
            }
        }
    }

    /// Close the logger (explicit drop). Called on graceful shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.sync_all().await;
        }
    }
}
