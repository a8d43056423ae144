//! Backend trait for answering questions.
//!
//! The `AskBackend` trait is the seam between the chat UI and whatever
//! actually answers a question. The HTTP backend is the only production
//! implementation; tests substitute canned backends.

use async_trait::async_trait;
use thiserror::Error;

use super::{AskRequest, AskResponse};

/// Trait for question-answering backends.
///
/// # Example
///
/// ```ignore
/// use nlpassist_cli::client::{AskBackend, AskRequest};
///
/// async fn ask(backend: &dyn AskBackend) {
///     let request = AskRequest::new("When do admissions open?", "student");
///     match backend.ask(&request).await {
///         Ok(response) => println!("{}", response.answer),
///         Err(e) => eprintln!("{e}"),
///     }
/// }
/// ```
#[async_trait]
pub trait AskBackend: Send + Sync {
    /// Returns the endpoint this backend talks to, for display and logs.
    fn endpoint(&self) -> &str;

    /// Send one question and wait for its answer.
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse, AskError>;
}

/// Errors that can occur during a question/answer exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AskError {
    /// Question was blank after trimming
    #[error("question is empty")]
    EmptyQuestion,

    /// Connection or transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Backend answered 2xx but the body was not a usable answer
    #[error("invalid response: {0}")]
    Decode(String),

    /// Request task ended without delivering a result
    #[error("request was dropped before completing")]
    Dropped,
}

impl From<reqwest::Error> for AskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network("request timed out".to_string())
        } else if err.is_connect() {
            let target = err
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "backend".to_string());
            Self::Network(format!("failed to connect to {target}"))
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
