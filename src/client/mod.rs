//! Client for the question-answering backend.
//!
//! One exchange is a single JSON request/response pair:
//! - request: `{"question": "...", "user_id": "..."}`
//! - response: `{"answer": "...", ...}`
//!
//! `AskClient` is what the rest of the application uses. It owns a backend
//! implementing `AskBackend` and the user id sent with every question.

mod backend;
mod http;

pub use backend::{AskBackend, AskError};
pub use http::{HttpBackend, DEFAULT_ENDPOINT};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::message::AnswerMeta;

/// Request body sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub user_id: String,
}

impl AskRequest {
    pub fn new(question: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            user_id: user_id.into(),
        }
    }
}

/// Response body returned by the backend.
///
/// Only `answer` is required. The remaining fields are filled in when the
/// backend provides them; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub response_time: Option<f64>,
    #[serde(default)]
    pub cached: bool,
    #[serde(default)]
    pub retrieved_chunks: Vec<String>,
}

impl AskResponse {
    /// Metadata worth showing next to the answer.
    pub fn meta(&self) -> AnswerMeta {
        AnswerMeta {
            sources: self.sources.clone(),
            confidence: self.confidence,
            response_time: self.response_time,
            cached: self.cached,
        }
    }
}

/// Result delivered for one spawned question.
pub type AskResult = Result<AskResponse, AskError>;

/// Client used by the application to ask questions.
#[derive(Clone)]
pub struct AskClient {
    backend: Arc<dyn AskBackend>,
    user_id: String,
}

impl AskClient {
    /// Create a client talking to the given backend.
    pub fn new(backend: Arc<dyn AskBackend>, user_id: impl Into<String>) -> Self {
        Self {
            backend,
            user_id: user_id.into(),
        }
    }

    /// Create an HTTP client for the given endpoint.
    pub fn http(endpoint: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpBackend::new(endpoint)), user_id)
    }

    pub fn endpoint(&self) -> &str {
        self.backend.endpoint()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Ask a single question. Blank questions are rejected without a request.
    pub async fn ask(&self, question: &str) -> AskResult {
        let question = question.trim();
        if question.is_empty() {
            return Err(AskError::EmptyQuestion);
        }
        let request = AskRequest::new(question, self.user_id.as_str());
        self.backend.ask(&request).await
    }

    /// Ask a question on the tokio runtime.
    ///
    /// Returns a receiver that yields exactly one result. Must be called
    /// from within a tokio runtime context.
    pub fn spawn_ask(&self, question: String) -> oneshot::Receiver<AskResult> {
        let (tx, rx) = oneshot::channel();
        let client = self.clone();

        tokio::spawn(async move {
            let _ = tx.send(client.ask(&question).await);
        });

        rx
    }
}
