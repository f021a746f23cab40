//! Session state value.
//!
//! `SessionState` is the single authoritative record of one decision
//! session. Every backend round-trip is split in two halves: a `begin_*`
//! method validates the request and marks the session busy, and a
//! `complete_*` method (or `abort_request`) applies the response and clears
//! the flag. While busy, every other mutating call is rejected, which keeps
//! at most one request in flight per session. A `complete_*` call is only
//! accepted while its request is outstanding and the stage still matches;
//! otherwise it is rejected and nothing changes.
//!
//! # Invariants
//!
//! - `pending_question` is `Some` iff `stage == Clarifying`
//! - `decision` is set at Entry -> Clarifying and never changes afterwards
//! - `analysis_text` is set at Clarifying -> Analyzing and never changes afterwards
//! - `results` is `Some` iff `stage == Results`
//! - no stage transition happens while `busy`
//! - once the turn limit closes clarification, no answer is accepted until `reset`

use crate::domain::analysis::{ScenarioSynthesizer, StressTestReport};
use crate::domain::decision::{DecisionDraft, FinalizedDecision};
use crate::domain::foundation::StateMachine;
use crate::ports::BackendError;

use super::{RejectReason, SessionError, Stage};

/// One answered clarifying question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClarificationExchange {
    pub question: String,
    pub answer: String,
}

/// Mutable state of a single decision session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    stage: Stage,
    pending_question: Option<String>,
    pending_answer_draft: String,
    analysis_text: Option<String>,
    decision: Option<FinalizedDecision>,
    busy: bool,
    transcript: Vec<ClarificationExchange>,
    follow_up_turns: u32,
    closed_at_turn_limit: Option<u32>,
    results: Option<StressTestReport>,
}

impl SessionState {
    /// Creates a session in the Entry stage with nothing filled in.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn pending_question(&self) -> Option<&str> {
        self.pending_question.as_deref()
    }

    pub fn pending_answer_draft(&self) -> &str {
        &self.pending_answer_draft
    }

    pub fn analysis_text(&self) -> Option<&str> {
        self.analysis_text.as_deref()
    }

    pub fn decision(&self) -> Option<&FinalizedDecision> {
        self.decision.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Answered questions, oldest first.
    pub fn transcript(&self) -> &[ClarificationExchange] {
        &self.transcript
    }

    /// Number of follow-up rounds that returned successfully.
    pub fn follow_up_turns(&self) -> u32 {
        self.follow_up_turns
    }

    /// Turn limit that closed the clarification loop, if it was hit.
    pub fn closed_at_turn_limit(&self) -> Option<u32> {
        self.closed_at_turn_limit
    }

    /// Stress-test output cached for the Results stage.
    pub fn results(&self) -> Option<&StressTestReport> {
        self.results.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entry -> Clarifying
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates `draft` and marks the session busy for the start call.
    ///
    /// # Errors
    ///
    /// - `Busy` if a request is outstanding
    /// - `InvalidTransition` outside the Entry stage
    /// - `Validation` if the draft is not finalizable
    pub fn begin_draft_submission(
        &mut self,
        draft: &DecisionDraft,
    ) -> Result<FinalizedDecision, SessionError> {
        self.ensure_idle()?;
        self.stage.transition_to(Stage::Clarifying)?;
        let decision = draft.finalize()?;
        self.busy = true;
        Ok(decision)
    }

    /// Applies a successful start response.
    ///
    /// # Errors
    ///
    /// - `Rejected(NoRequestInFlight)` unless `begin_draft_submission` is outstanding
    /// - `InvalidTransition` outside the Entry stage
    pub fn complete_draft_submission(
        &mut self,
        decision: FinalizedDecision,
        question: String,
    ) -> Result<(), SessionError> {
        self.ensure_in_flight()?;
        self.stage = self.stage.transition_to(Stage::Clarifying)?;
        self.decision = Some(decision);
        self.pending_question = Some(question);
        self.pending_answer_draft.clear();
        self.busy = false;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clarification loop
    // ─────────────────────────────────────────────────────────────────────────

    /// Updates the answer buffer for the pending question.
    ///
    /// Returns `false` (and changes nothing) outside Clarifying, while busy,
    /// or after the turn limit closed the loop.
    pub fn set_answer_draft(&mut self, text: impl Into<String>) -> bool {
        if self.stage != Stage::Clarifying || self.busy || self.closed_at_turn_limit.is_some() {
            return false;
        }
        self.pending_answer_draft = text.into();
        true
    }

    /// Accepts an answer and marks the session busy for the follow-up call.
    ///
    /// # Errors
    ///
    /// - `Busy` if a request is outstanding
    /// - `Rejected(NotClarifying)` outside the Clarifying stage
    /// - `Backend(TurnLimitExceeded)` after the turn limit closed the loop
    /// - `Rejected(BlankAnswer)` if `text` is blank
    pub fn begin_answer(&mut self, text: &str) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.ensure_clarifying()?;
        if let Some(limit) = self.closed_at_turn_limit {
            return Err(BackendError::TurnLimitExceeded { limit }.into());
        }
        if text.trim().is_empty() {
            return Err(SessionError::Rejected(RejectReason::BlankAnswer));
        }
        self.pending_answer_draft = text.to_string();
        self.busy = true;
        Ok(())
    }

    /// Applies a follow-up response that carried another question.
    ///
    /// # Errors
    ///
    /// - `Rejected(NoRequestInFlight)` unless `begin_answer` is outstanding
    /// - `Rejected(NotClarifying)` outside the Clarifying stage
    pub fn record_follow_up_question(
        &mut self,
        answer: &str,
        question: String,
    ) -> Result<(), SessionError> {
        self.ensure_in_flight()?;
        self.ensure_clarifying()?;
        self.record_exchange(answer);
        self.pending_question = Some(question);
        self.pending_answer_draft.clear();
        self.busy = false;
        Ok(())
    }

    /// Applies a finished clarification loop and its analysis text.
    ///
    /// # Errors
    ///
    /// - `Rejected(NoRequestInFlight)` unless `begin_answer` is outstanding
    /// - `Rejected(NotClarifying)` outside the Clarifying stage
    pub fn complete_clarification(
        &mut self,
        answer: &str,
        analysis: String,
    ) -> Result<(), SessionError> {
        self.ensure_in_flight()?;
        self.ensure_clarifying()?;
        self.stage = self.stage.transition_to(Stage::Analyzing)?;
        self.record_exchange(answer);
        self.pending_question = None;
        self.pending_answer_draft.clear();
        self.analysis_text = Some(analysis);
        self.busy = false;
        Ok(())
    }

    /// Shuts the clarification loop after the turn limit was hit.
    ///
    /// The pending question stays visible but no further answer is
    /// accepted; `reset` is the only way forward.
    ///
    /// # Errors
    ///
    /// - `Rejected(NoRequestInFlight)` unless `begin_answer` is outstanding
    /// - `Rejected(NotClarifying)` outside the Clarifying stage
    pub fn close_at_turn_limit(&mut self, limit: u32) -> Result<(), SessionError> {
        self.ensure_in_flight()?;
        self.ensure_clarifying()?;
        self.closed_at_turn_limit = Some(limit);
        self.busy = false;
        Ok(())
    }

    /// Releases the busy flag after a failed request, leaving all other state as it was.
    pub fn abort_request(&mut self) {
        self.busy = false;
    }

    fn record_exchange(&mut self, answer: &str) {
        let question = self.pending_question.clone().unwrap_or_default();
        self.transcript.push(ClarificationExchange {
            question,
            answer: answer.to_string(),
        });
        self.follow_up_turns += 1;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Analyzing <-> Results
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves to Results and synthesizes a fresh stress-test report.
    ///
    /// # Errors
    ///
    /// - `Busy` if a request is outstanding
    /// - `InvalidTransition` outside the Analyzing stage
    pub fn enter_results(&mut self) -> Result<&StressTestReport, SessionError> {
        self.ensure_idle()?;
        let next = self.stage.transition_to(Stage::Results)?;
        let decision = self
            .decision
            .as_ref()
            .ok_or(SessionError::Rejected(RejectReason::MissingDecision))?;

        let report = ScenarioSynthesizer::run(decision);
        self.stage = next;
        Ok(self.results.insert(report))
    }

    /// Navigates back from Results to Analysis. No data besides the cached report is lost.
    pub fn return_to_analysis(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.stage = self.stage.transition_to(Stage::Analyzing)?;
        self.results = None;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reset
    // ─────────────────────────────────────────────────────────────────────────

    /// Restores the initial Entry state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.busy {
            Err(SessionError::Busy)
        } else {
            Ok(())
        }
    }

    fn ensure_in_flight(&self) -> Result<(), SessionError> {
        if self.busy {
            Ok(())
        } else {
            Err(SessionError::Rejected(RejectReason::NoRequestInFlight))
        }
    }

    fn ensure_clarifying(&self) -> Result<(), SessionError> {
        if self.stage == Stage::Clarifying {
            Ok(())
        } else {
            Err(SessionError::Rejected(RejectReason::NotClarifying))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> DecisionDraft {
        DecisionDraft::new("Change careers?")
            .with_options(["Stay", "Switch to tech", "Freelance"])
            .with_constraints("Limited savings")
    }

    fn clarifying() -> SessionState {
        let mut state = SessionState::new();
        let decision = state.begin_draft_submission(&draft()).unwrap();
        state
            .complete_draft_submission(decision, "What do you value most?".to_string())
            .unwrap();
        state
    }

    fn analyzing() -> SessionState {
        let mut state = clarifying();
        state.begin_answer("Stability").unwrap();
        state
            .complete_clarification("Stability", "Stay put.".to_string())
            .unwrap();
        state
    }

    #[test]
    fn new_session_starts_empty_in_entry() {
        let state = SessionState::new();
        assert_eq!(state.stage(), Stage::Entry);
        assert!(state.pending_question().is_none());
        assert!(state.analysis_text().is_none());
        assert!(state.decision().is_none());
        assert!(!state.is_busy());
    }

    #[test]
    fn invalid_draft_leaves_state_untouched() {
        let mut state = SessionState::new();
        let err = state
            .begin_draft_submission(&DecisionDraft::new("").with_options(["A", "B"]))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(state, SessionState::new());
    }

    #[test]
    fn begin_draft_submission_marks_busy_without_storing_decision() {
        let mut state = SessionState::new();
        state.begin_draft_submission(&draft()).unwrap();
        assert!(state.is_busy());
        assert!(state.decision().is_none());
        assert_eq!(state.stage(), Stage::Entry);

        state.abort_request();
        assert_eq!(state, SessionState::new());
    }

    #[test]
    fn busy_session_rejects_submissions() {
        let mut state = SessionState::new();
        state.begin_draft_submission(&draft()).unwrap();
        assert_eq!(state.begin_draft_submission(&draft()), Err(SessionError::Busy));

        let mut state = clarifying();
        state.begin_answer("first").unwrap();
        assert_eq!(state.begin_answer("second"), Err(SessionError::Busy));
        assert_eq!(state.pending_answer_draft(), "first");
    }

    #[test]
    fn draft_submission_enters_clarifying_with_question() {
        let state = clarifying();
        assert_eq!(state.stage(), Stage::Clarifying);
        assert_eq!(state.pending_question(), Some("What do you value most?"));
        assert_eq!(state.decision().unwrap().options().len(), 3);
        assert!(!state.is_busy());
    }

    #[test]
    fn second_draft_submission_is_rejected_after_entry() {
        let mut state = clarifying();
        let err = state.begin_draft_submission(&draft()).unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition(_)));
    }

    #[test]
    fn blank_answer_is_rejected() {
        let mut state = clarifying();
        assert_eq!(
            state.begin_answer("   "),
            Err(SessionError::Rejected(RejectReason::BlankAnswer))
        );
        assert!(!state.is_busy());
    }

    #[test]
    fn answer_outside_clarifying_is_rejected() {
        let mut state = SessionState::new();
        assert_eq!(
            state.begin_answer("hello"),
            Err(SessionError::Rejected(RejectReason::NotClarifying))
        );
    }

    #[test]
    fn follow_up_question_replaces_pending_and_records_exchange() {
        let mut state = clarifying();
        state.begin_answer("Stability").unwrap();
        state
            .record_follow_up_question("Stability", "How much runway do you have?".to_string())
            .unwrap();

        assert_eq!(state.stage(), Stage::Clarifying);
        assert_eq!(state.pending_question(), Some("How much runway do you have?"));
        assert_eq!(state.pending_answer_draft(), "");
        assert_eq!(state.follow_up_turns(), 1);
        assert_eq!(
            state.transcript(),
            [ClarificationExchange {
                question: "What do you value most?".to_string(),
                answer: "Stability".to_string(),
            }]
        );
    }

    #[test]
    fn aborted_answer_keeps_question_and_draft() {
        let mut state = clarifying();
        state.begin_answer("Stability").unwrap();
        state.abort_request();

        assert_eq!(state.stage(), Stage::Clarifying);
        assert_eq!(state.pending_question(), Some("What do you value most?"));
        assert_eq!(state.pending_answer_draft(), "Stability");
        assert_eq!(state.follow_up_turns(), 0);
        assert!(!state.is_busy());
    }

    #[test]
    fn completing_clarification_enters_analyzing() {
        let state = analyzing();
        assert_eq!(state.stage(), Stage::Analyzing);
        assert!(state.pending_question().is_none());
        assert_eq!(state.analysis_text(), Some("Stay put."));
    }

    #[test]
    fn set_answer_draft_only_while_clarifying() {
        let mut state = SessionState::new();
        assert!(!state.set_answer_draft("early"));

        let mut state = clarifying();
        assert!(state.set_answer_draft("typing..."));
        assert_eq!(state.pending_answer_draft(), "typing...");
    }

    #[test]
    fn results_round_trip_regenerates_report() {
        let mut state = analyzing();
        let report = state.enter_results().unwrap().clone();
        assert_eq!(report.scenarios.len(), 4);
        assert_eq!(state.stage(), Stage::Results);
        assert!(state.results().is_some());

        state.return_to_analysis().unwrap();
        assert_eq!(state.stage(), Stage::Analyzing);
        assert!(state.results().is_none());
        assert_eq!(state.analysis_text(), Some("Stay put."));

        assert_eq!(state.enter_results().unwrap(), &report);
    }

    #[test]
    fn results_only_reachable_from_analyzing() {
        let mut state = clarifying();
        assert!(matches!(
            state.enter_results(),
            Err(SessionError::InvalidTransition(_))
        ));
        assert!(state.return_to_analysis().is_err());
    }

    #[test]
    fn completions_without_outstanding_request_are_rejected() {
        let decision = draft().finalize().unwrap();

        let mut state = SessionState::new();
        assert_eq!(
            state.complete_clarification("x", "analysis".to_string()),
            Err(SessionError::Rejected(RejectReason::NoRequestInFlight))
        );
        assert_eq!(
            state.complete_draft_submission(decision.clone(), "Q".to_string()),
            Err(SessionError::Rejected(RejectReason::NoRequestInFlight))
        );
        assert_eq!(
            state.record_follow_up_question("x", "Q".to_string()),
            Err(SessionError::Rejected(RejectReason::NoRequestInFlight))
        );
        assert_eq!(state, SessionState::new());

        let mut state = clarifying();
        let before = state.clone();
        assert!(state.complete_clarification("x", "analysis".to_string()).is_err());
        assert!(state.record_follow_up_question("x", "Q2".to_string()).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn completions_in_the_wrong_stage_are_rejected() {
        let mut state = analyzing();
        state.enter_results().unwrap();
        // Simulate a stray in-flight flag reaching the Results stage.
        state.busy = true;
        let before = state.clone();

        let other = DecisionDraft::new("Other")
            .with_options(["A", "B"])
            .finalize()
            .unwrap();
        let err = state
            .complete_draft_submission(other, "Q2".to_string())
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition(_)), "{:?}", err);
        assert_eq!(
            state.record_follow_up_question("x", "Q".to_string()),
            Err(SessionError::Rejected(RejectReason::NotClarifying))
        );
        assert_eq!(
            state.complete_clarification("x", "A2".to_string()),
            Err(SessionError::Rejected(RejectReason::NotClarifying))
        );
        assert_eq!(state, before);
        assert_eq!(state.stage(), Stage::Results);
        assert_eq!(state.decision().unwrap().title(), "Change careers?");
    }

    #[test]
    fn turn_limit_closes_clarification_until_reset() {
        let mut state = clarifying();
        state.begin_answer("Stability").unwrap();
        state.close_at_turn_limit(1).unwrap();

        assert!(!state.is_busy());
        assert_eq!(state.closed_at_turn_limit(), Some(1));
        assert_eq!(state.pending_question(), Some("What do you value most?"));

        let before = state.clone();
        let err = state.begin_answer("Stability").unwrap_err();
        assert!(err.is_terminal());
        assert!(!state.set_answer_draft("more"));
        assert_eq!(state, before);

        state.reset();
        assert_eq!(state, SessionState::new());
    }

    #[test]
    fn reset_restores_initial_state_from_results() {
        let mut state = analyzing();
        state.enter_results().unwrap();
        state.reset();
        assert_eq!(state, SessionState::new());
    }
}
