use async_trait::async_trait;

use askchat_logging::{log_request, log_response};
use askchat_types::{AskRequest, AskResponse, ErrorBody};
use crate::client::AskClient;
use crate::error::AskError;
use crate::normalize_api_url;

/// reqwest-backed client for `POST /api/ask`.
///
/// No request timeout is configured: a request resolves or the process ends.
pub struct HttpAskClient {
    api_url: String,
    client: reqwest::Client,
    verbose: bool,
}

impl HttpAskClient {
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: normalize_api_url(api_url),
            client: reqwest::Client::new(),
            verbose: false,
        }
    }

    /// Print request and response dumps to the console
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl AskClient for HttpAskClient {
    async fn ask(&self, question: &str) -> Result<AskResponse, AskError> {
        let request = AskRequest {
            question: question.to_string(),
        };

        log_request(&self.api_url, &request, self.verbose);

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        log_response(&status, &headers, &body, self.verbose);

        if !status.is_success() {
            // Non-JSON error bodies (empty, proxy HTML) are transport failures
            let value = serde_json::from_str::<serde_json::Value>(&body).map_err(|e| {
                AskError::Transport(format!("HTTP {} with undecodable body: {}", status, e))
            })?;
            let detail = serde_json::from_value::<ErrorBody>(value)
                .ok()
                .and_then(|err| err.detail)
                .filter(|detail| !detail.is_empty());
            return Err(AskError::Application { detail });
        }

        serde_json::from_str::<AskResponse>(&body)
            .map_err(|e| AskError::Transport(format!("Failed to decode answer: {}", e)))
    }
}
