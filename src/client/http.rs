//! HTTP backend: POSTs the question as JSON and decodes the JSON answer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::{AskBackend, AskError, AskRequest, AskResponse};

/// Default endpoint of a locally running backend.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/ask";

/// Longest slice of an error body kept in `AskError::Status`.
const MAX_ERROR_BODY: usize = 512;

/// Backend reached over HTTP.
pub struct HttpBackend {
    client: Client,
    endpoint: String,
}

impl HttpBackend {
    /// Create a backend for the given endpoint with no request timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a backend with an optional per-request timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl AskBackend for HttpBackend {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResponse, AskError> {
        debug!(endpoint = %self.endpoint, user_id = %request.user_id, "sending question");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "backend returned an error status");
            return Err(AskError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let text = response.text().await?;
        let answer: AskResponse =
            serde_json::from_str(&text).map_err(|e| AskError::Decode(e.to_string()))?;

        debug!(
            cached = answer.cached,
            response_time = ?answer.response_time,
            "received answer"
        );
        Ok(answer)
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_backend_default_endpoint() {
        let backend = HttpBackend::default();
        assert_eq!(backend.endpoint(), "http://localhost:8000/api/ask");
    }

    #[test]
    fn test_http_backend_with_timeout() {
        let backend =
            HttpBackend::with_timeout("http://127.0.0.1:9/ask", Some(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(backend.endpoint(), "http://127.0.0.1:9/ask");
    }

    #[test]
    fn test_truncate_short_body() {
        assert_eq!(truncate("Not Found", 512), "Not Found");
    }

    #[test]
    fn test_truncate_long_body() {
        let body = "é".repeat(600);
        let cut = truncate(&body, 512);
        assert_eq!(cut.chars().count(), 513);
        assert!(cut.ends_with('…'));
    }
}
