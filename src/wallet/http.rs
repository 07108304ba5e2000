//! HTTP and time seams for the bridge

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Request never completed
    Network(String),
    /// Non-2xx answer
    Status { status: u16, body: String },
    /// Body was not JSON
    Decode(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Network(message) => write!(f, "request failed: {message}"),
            HttpError::Status { status, body } => write!(f, "HTTP {status}: {body}"),
            HttpError::Decode(message) => write!(f, "response decode error: {message}"),
        }
    }
}

impl std::error::Error for HttpError {}

/// POST a JSON body and parse a JSON answer
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<Value, HttpError>;
}

#[async_trait(?Send)]
pub trait Clock {
    fn now_ms(&self) -> f64;
    async fn sleep_ms(&self, ms: u32);
}

const SECRET_HEADERS: [&str; 3] = ["authorization", "apikey", "x-app-key"];

/// Copy of `headers` safe for debug logs
pub fn redact_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            if SECRET_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                (name.clone(), "REDACTED".to_string())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}
