//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised when a decision draft cannot be finalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("At least {required} options are required, got {actual}")]
    TooFewOptions { required: usize, actual: usize },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a too-few-options validation error.
    pub fn too_few_options(required: usize, actual: usize) -> Self {
        ValidationError::TooFewOptions { required, actual }
    }
}

/// An attempted stage change that the state machine does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot transition from {from} to {to}")]
pub struct TransitionError {
    pub from: String,
    pub to: String,
}

impl TransitionError {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}
