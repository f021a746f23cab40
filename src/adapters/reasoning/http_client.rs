//! HTTP Reasoning Client - `ReasoningClient` over the backend's JSON API.
//!
//! # Endpoints
//!
//! | Call        | Route                     | Body                   | Response                          |
//! |-------------|---------------------------|------------------------|-----------------------------------|
//! | `start`     | `POST /decision/start`    | `{"decision_text": ..}`| `{"follow_up_question": ..}`      |
//! | `follow_up` | `POST /decision/followup` | `{"answer": ..}`       | `{"follow_up_question": ..}` or anything without it |
//! | `analyze`   | `POST /decision/analyze`  | `{}`                   | `{"analysis": ..}`                |
//!
//! Any non-success status becomes `BackendError::Status` carrying the body text.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use crate::ports::{BackendError, ClarificationOutcome, ReasoningClient};

const FOLLOW_UP_QUESTION_FIELD: &str = "follow_up_question";

/// Configuration for the HTTP reasoning client.
#[derive(Debug, Clone)]
pub struct HttpReasoningConfig {
    /// Backend root, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl HttpReasoningConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Serialize)]
struct StartRequest<'a> {
    decision_text: &'a str,
}

#[derive(Debug, Serialize)]
struct FollowUpRequest<'a> {
    answer: &'a str,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest {}

#[derive(Debug, Deserialize)]
struct StartResponse {
    follow_up_question: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    analysis: String,
}

/// Decodes a follow-up body by presence of `follow_up_question`.
fn decode_follow_up(body: Map<String, Value>) -> Result<ClarificationOutcome, BackendError> {
    match body.get(FOLLOW_UP_QUESTION_FIELD) {
        None => Ok(ClarificationOutcome::Complete),
        Some(Value::String(question)) => Ok(ClarificationOutcome::needs_clarification(question.clone())),
        Some(other) => Err(BackendError::malformed(format!(
            "{} must be a string, got {}",
            FOLLOW_UP_QUESTION_FIELD, other
        ))),
    }
}

/// Reasoning backend reached over HTTP.
pub struct HttpReasoningClient {
    config: HttpReasoningConfig,
    client: Client,
}

impl HttpReasoningClient {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Network` if the HTTP client cannot be built.
    pub fn new(config: HttpReasoningConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpReasoningConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Posts a JSON body and decodes the JSON response.
    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%url, "posting to reasoning backend");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = Self::handle_response_status(response).await?;

        response.json::<R>().await.map_err(|e| {
            if e.is_timeout() {
                self.map_transport_error(e)
            } else {
                BackendError::malformed(e.to_string())
            }
        })
    }

    fn map_transport_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout {
                timeout_secs: self.config.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }
        } else if e.is_connect() {
            BackendError::network(format!("Connection failed: {}", e))
        } else {
            BackendError::network(e.to_string())
        }
    }

    /// Passes success responses through; turns anything else into a status error.
    async fn handle_response_status(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "reasoning backend returned an error");
        Err(BackendError::status(status.as_u16(), body))
    }
}

#[async_trait]
impl ReasoningClient for HttpReasoningClient {
    async fn start(&self, narrative: &str) -> Result<String, BackendError> {
        let response: StartResponse = self
            .post("/decision/start", &StartRequest {
                decision_text: narrative,
            })
            .await?;
        Ok(response.follow_up_question)
    }

    async fn follow_up(&self, answer: &str) -> Result<ClarificationOutcome, BackendError> {
        let body: Map<String, Value> = self
            .post("/decision/followup", &FollowUpRequest { answer })
            .await?;
        decode_follow_up(body)
    }

    async fn analyze(&self) -> Result<String, BackendError> {
        let response: AnalyzeResponse = self.post("/decision/analyze", &AnalyzeRequest {}).await?;
        Ok(response.analysis)
    }
}
