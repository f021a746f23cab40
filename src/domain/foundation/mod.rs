//! Foundation module - Shared domain primitives.
//!
//! Contains the error types and the state machine trait that the rest of
//! the domain builds on.

mod errors;
mod state_machine;

pub use errors::{TransitionError, ValidationError};
pub use state_machine::StateMachine;
