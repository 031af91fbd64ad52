//! # askchat-api
//!
//! Client side of the question/answer service: a single `POST /api/ask`
//! endpoint that takes `{"question": ...}` and returns the answer together
//! with the time it was produced.
//!
//! ## Example
//!
//! ```rust,no_run
//! use askchat_api::{AskClient, HttpAskClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = HttpAskClient::new("http://127.0.0.1:8000");
//!
//!     match client.ask("What is 2+2?").await {
//!         Ok(response) => println!("{}", response.answer),
//!         Err(err) => eprintln!("{}", err.user_message()),
//!     }
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{AskClient, HttpAskClient};
pub use error::AskError;

/// Path of the question endpoint on the service
pub const ASK_PATH: &str = "/api/ask";

/// Normalize an API URL so it points at the ask endpoint.
///
/// A bare origin such as `http://localhost:8000` gets `/api/ask` appended;
/// a URL that already names a path is used as-is.
pub fn normalize_api_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');

    let has_path = match reqwest::Url::parse(trimmed) {
        Ok(parsed) => parsed.path() != "/" && !parsed.path().is_empty(),
        Err(_) => false,
    };

    if has_path {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, ASK_PATH)
    }
}
