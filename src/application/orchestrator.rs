//! SessionOrchestrator - drives a decision session through the reasoning backend.
//!
//! The orchestrator owns no session data. Every operation takes the
//! caller's `SessionState` and advances it, so independent sessions (or
//! test harnesses) simply hold independent state values.
//!
//! Flow: `submit_draft` -> (`submit_answer`)* -> `advance_to_results`,
//! with `return_to_analysis` and `reset` as navigation.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::analysis::StressTestReport;
use crate::domain::decision::{narrative_of, DecisionDraft};
use crate::domain::session::{SessionError, SessionState};
use crate::ports::{BackendError, ClarificationOutcome, ReasoningClient};

/// Tunables for the clarification loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrchestratorSettings {
    /// Abort with `TurnLimitExceeded` if this many follow-ups still leave a
    /// question open. `None` lets the backend decide when to stop.
    ///
    /// Hitting the limit closes the clarification loop for good: later
    /// answers fail with the same error without reaching the backend, and
    /// only `reset` starts a usable session again. Check
    /// `SessionError::is_terminal` to tell this apart from retryable failures.
    pub max_follow_up_turns: Option<u32>,
}

/// What happened to a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The backend asked another question.
    FollowUp { question: String },
    /// Clarification finished and the analysis is stored.
    Analyzed,
}

/// Drives `SessionState` through the reasoning backend.
///
/// # Cancellation
///
/// `submit_draft` and `submit_answer` mark the session busy before awaiting
/// the backend. If such a future is dropped before it resolves (a `select!`
/// branch losing, an outer timeout firing), the flag is never cleared and
/// every later operation returns `Busy`. Call `reset` to recover.
pub struct SessionOrchestrator {
    client: Arc<dyn ReasoningClient>,
    settings: OrchestratorSettings,
}

impl SessionOrchestrator {
    pub fn new(client: Arc<dyn ReasoningClient>) -> Self {
        Self {
            client,
            settings: OrchestratorSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: OrchestratorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Finalizes `draft` and opens the clarification dialogue.
    ///
    /// Returns the first clarifying question. On any error the session is
    /// left exactly as it was, so the call can be retried.
    #[instrument(skip_all, fields(title = %draft.title.trim()))]
    pub async fn submit_draft(
        &self,
        state: &mut SessionState,
        draft: &DecisionDraft,
    ) -> Result<String, SessionError> {
        let decision = state.begin_draft_submission(draft)?;
        let narrative = narrative_of(&decision);

        match self.client.start(&narrative).await {
            Ok(question) => {
                info!(options = decision.options().len(), "decision submitted");
                state.complete_draft_submission(decision, question.clone())?;
                Ok(question)
            }
            Err(e) => {
                warn!(error = %e, "start request failed");
                state.abort_request();
                Err(e.into())
            }
        }
    }

    /// Answers the pending question.
    ///
    /// A response with another question keeps the session in Clarifying; a
    /// completion signal triggers exactly one `analyze` call and moves the
    /// session to Analyzing. Any failure keeps the pending question so the
    /// same answer can be resubmitted, except hitting the turn limit, which
    /// closes the loop until `reset`.
    #[instrument(skip_all, fields(turn = state.follow_up_turns() + 1))]
    pub async fn submit_answer(
        &self,
        state: &mut SessionState,
        text: &str,
    ) -> Result<AnswerOutcome, SessionError> {
        state.begin_answer(text)?;

        let outcome = match self.client.follow_up(text).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "follow-up request failed");
                state.abort_request();
                return Err(e.into());
            }
        };

        match outcome {
            ClarificationOutcome::NeedsClarification { question } => {
                if let Some(limit) = self.settings.max_follow_up_turns {
                    if state.follow_up_turns() + 1 >= limit {
                        warn!(limit, "clarification loop hit the turn limit");
                        state.close_at_turn_limit(limit)?;
                        return Err(BackendError::TurnLimitExceeded { limit }.into());
                    }
                }
                debug!("backend asked another question");
                state.record_follow_up_question(text, question.clone())?;
                Ok(AnswerOutcome::FollowUp { question })
            }
            ClarificationOutcome::Complete => match self.client.analyze().await {
                Ok(analysis) => {
                    info!(turns = state.follow_up_turns() + 1, "clarification complete");
                    state.complete_clarification(text, analysis)?;
                    Ok(AnswerOutcome::Analyzed)
                }
                Err(e) => {
                    warn!(error = %e, "analyze request failed");
                    state.abort_request();
                    Err(e.into())
                }
            },
        }
    }

    /// Enters Results and returns the freshly synthesized stress tests.
    #[instrument(skip_all)]
    pub fn advance_to_results<'s>(
        &self,
        state: &'s mut SessionState,
    ) -> Result<&'s StressTestReport, SessionError> {
        let report = state.enter_results()?;
        debug!(scenarios = report.scenarios.len(), "stress tests synthesized");
        Ok(report)
    }

    /// Goes back from Results to the analysis view.
    pub fn return_to_analysis(&self, state: &mut SessionState) -> Result<(), SessionError> {
        state.return_to_analysis()
    }

    /// Starts over with a blank session.
    pub fn reset(&self, state: &mut SessionState) {
        debug!(stage = %state.stage(), "session reset");
        state.reset();
    }
}
