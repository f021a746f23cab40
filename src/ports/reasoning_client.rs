//! Reasoning Client Port - contract with the external reasoning backend.
//!
//! The backend runs the clarification dialogue and writes the final
//! analysis. It keeps its own session state; no session identifier is sent
//! with any call, so one client drives one backend session at a time.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl ReasoningClient for Canned {
//!     async fn start(&self, _narrative: &str) -> Result<String, BackendError> {
//!         Ok("What matters most to you?".to_string())
//!     }
//!     async fn follow_up(&self, _answer: &str) -> Result<ClarificationOutcome, BackendError> {
//!         Ok(ClarificationOutcome::Complete)
//!     }
//!     async fn analyze(&self) -> Result<String, BackendError> {
//!         Ok("Go with option one.".to_string())
//!     }
//! }
//! ```

use async_trait::async_trait;

/// Port for the clarification/analysis backend.
#[async_trait]
pub trait ReasoningClient: Send + Sync {
    /// Opens a backend session for the decision narrative.
    ///
    /// Returns the first clarifying question.
    async fn start(&self, narrative: &str) -> Result<String, BackendError>;

    /// Sends the user's answer to the pending question.
    async fn follow_up(&self, answer: &str) -> Result<ClarificationOutcome, BackendError>;

    /// Requests the final narrative analysis once clarification is complete.
    async fn analyze(&self) -> Result<String, BackendError>;
}

/// Result of a follow-up round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarificationOutcome {
    /// The backend wants another answer.
    NeedsClarification { question: String },
    /// The backend has enough information to analyze.
    Complete,
}

impl ClarificationOutcome {
    pub fn needs_clarification(question: impl Into<String>) -> Self {
        Self::NeedsClarification {
            question: question.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Message used when a failed response carries no body.
pub const DEFAULT_BACKEND_MESSAGE: &str = "API error";

/// Transport or protocol failure talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Non-success HTTP status; `message` is the response body.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The clarification loop exceeded the configured safety cap.
    #[error("clarification did not finish within {limit} follow-up turns")]
    TurnLimitExceeded { limit: u32 },
}

impl BackendError {
    /// Builds a status error, falling back to a generic message for an empty body.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            DEFAULT_BACKEND_MESSAGE.to_string()
        } else {
            body
        };
        Self::Status { status, message }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}
