//! Session-specific error types.

use std::fmt;

use crate::domain::foundation::{TransitionError, ValidationError};
use crate::ports::BackendError;

/// Why an operation was ignored without touching session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Answer text was empty after trimming.
    BlankAnswer,
    /// Answers are only accepted while a question is pending.
    NotClarifying,
    /// The session has no finalized decision to work from.
    MissingDecision,
    /// A response was applied with no request outstanding.
    NoRequestInFlight,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectReason::BlankAnswer => "answer is blank",
            RejectReason::NotClarifying => "no clarifying question is pending",
            RejectReason::MissingDecision => "no decision has been submitted",
            RejectReason::NoRequestInFlight => "no request is in progress",
        };
        write!(f, "{}", s)
    }
}

/// Errors surfaced by session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Draft is not finalizable.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The reasoning backend failed; the triggering action may be retried.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// A backend request is still outstanding.
    #[error("a request is already in progress")]
    Busy,

    #[error("rejected: {0}")]
    Rejected(RejectReason),

    #[error("{0}")]
    InvalidTransition(#[from] TransitionError),
}

impl SessionError {
    /// True for the no-op class of errors, which leave state untouched and
    /// need no user-facing report.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SessionError::Busy | SessionError::Rejected(_) | SessionError::InvalidTransition(_)
        )
    }

    /// True once the clarification loop has been shut down by the turn
    /// limit. Only `reset` recovers the session; retrying cannot.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionError::Backend(BackendError::TurnLimitExceeded { .. })
        )
    }

    pub fn is_backend(&self) -> bool {
        matches!(self, SessionError::Backend(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SessionError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_are_classified() {
        assert!(SessionError::Busy.is_rejection());
        assert!(SessionError::Rejected(RejectReason::BlankAnswer).is_rejection());
        assert!(!SessionError::from(ValidationError::empty_field("title")).is_rejection());
        assert!(!SessionError::from(BackendError::network("down")).is_rejection());
    }

    #[test]
    fn only_turn_limit_is_terminal() {
        assert!(SessionError::from(BackendError::TurnLimitExceeded { limit: 3 }).is_terminal());
        assert!(!SessionError::from(BackendError::status(500, "boom")).is_terminal());
        assert!(!SessionError::Busy.is_terminal());
    }

    #[test]
    fn backend_error_message_is_preserved() {
        let err = SessionError::from(BackendError::status(500, "model overloaded"));
        assert!(err.is_backend());
        assert_eq!(format!("{}", err), "backend error: model overloaded");
    }

    #[test]
    fn validation_error_displays_field() {
        let err = SessionError::from(ValidationError::empty_field("title"));
        assert!(err.is_validation());
        assert_eq!(format!("{}", err), "Field 'title' cannot be empty");
    }
}
