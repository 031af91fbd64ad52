use async_trait::async_trait;

use askchat_types::AskResponse;
use crate::error::AskError;

pub mod http;

pub use http::HttpAskClient;

/// Remote collaborator that turns a question into an answer.
///
/// Implementations issue exactly one request per call.
#[async_trait]
pub trait AskClient: Send + Sync {
    async fn ask(&self, question: &str) -> Result<AskResponse, AskError>;
}
