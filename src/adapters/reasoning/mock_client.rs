//! Mock Reasoning Client for testing and offline runs.
//!
//! Each call kind has its own queue of scripted results, consumed in order.
//! When a queue runs dry a neutral default is returned: a generic question
//! for `start`, completion for `follow_up`, and a canned analysis.
//!
//! # Example
//!
//! ```ignore
//! let client = MockReasoningClient::new()
//!     .with_start_question("What matters most?")
//!     .with_follow_up_question("How much runway do you have?")
//!     .with_follow_up_complete()
//!     .with_analysis("Stay for now.");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{BackendError, ClarificationOutcome, ReasoningClient};

pub const DEFAULT_MOCK_QUESTION: &str = "What matters most to you in this decision?";
pub const DEFAULT_MOCK_ANALYSIS: &str = "Mock analysis";

/// A recorded call, for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReasoningCall {
    Start { narrative: String },
    FollowUp { answer: String },
    Analyze,
}

#[derive(Debug, Default)]
struct Script {
    starts: VecDeque<Result<String, BackendError>>,
    follow_ups: VecDeque<Result<ClarificationOutcome, BackendError>>,
    analyses: VecDeque<Result<String, BackendError>>,
}

/// Scripted `ReasoningClient`.
#[derive(Debug, Clone, Default)]
pub struct MockReasoningClient {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<ReasoningCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockReasoningClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful `start` response.
    pub fn with_start_question(self, question: impl Into<String>) -> Self {
        lock(&self.script).starts.push_back(Ok(question.into()));
        self
    }

    /// Queues a failing `start` response.
    pub fn with_start_error(self, error: BackendError) -> Self {
        lock(&self.script).starts.push_back(Err(error));
        self
    }

    /// Queues a `follow_up` response carrying another question.
    pub fn with_follow_up_question(self, question: impl Into<String>) -> Self {
        lock(&self.script)
            .follow_ups
            .push_back(Ok(ClarificationOutcome::needs_clarification(question)));
        self
    }

    /// Queues a `follow_up` response signalling completion.
    pub fn with_follow_up_complete(self) -> Self {
        lock(&self.script)
            .follow_ups
            .push_back(Ok(ClarificationOutcome::Complete));
        self
    }

    /// Queues a failing `follow_up` response.
    pub fn with_follow_up_error(self, error: BackendError) -> Self {
        lock(&self.script).follow_ups.push_back(Err(error));
        self
    }

    /// Queues a successful `analyze` response.
    pub fn with_analysis(self, analysis: impl Into<String>) -> Self {
        lock(&self.script).analyses.push_back(Ok(analysis.into()));
        self
    }

    /// Queues a failing `analyze` response.
    pub fn with_analysis_error(self, error: BackendError) -> Self {
        lock(&self.script).analyses.push_back(Err(error));
        self
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<ReasoningCall> {
        lock(&self.calls).clone()
    }

    /// Returns the number of calls made to this client.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Counts recorded calls matching `predicate`.
    pub fn count_calls(&self, predicate: impl Fn(&ReasoningCall) -> bool) -> usize {
        lock(&self.calls).iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: ReasoningCall) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl ReasoningClient for MockReasoningClient {
    async fn start(&self, narrative: &str) -> Result<String, BackendError> {
        self.record(ReasoningCall::Start {
            narrative: narrative.to_string(),
        });
        lock(&self.script)
            .starts
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_MOCK_QUESTION.to_string()))
    }

    async fn follow_up(&self, answer: &str) -> Result<ClarificationOutcome, BackendError> {
        self.record(ReasoningCall::FollowUp {
            answer: answer.to_string(),
        });
        lock(&self.script)
            .follow_ups
            .pop_front()
            .unwrap_or(Ok(ClarificationOutcome::Complete))
    }

    async fn analyze(&self) -> Result<String, BackendError> {
        self.record(ReasoningCall::Analyze);
        lock(&self.script)
            .analyses
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_MOCK_ANALYSIS.to_string()))
    }
}
