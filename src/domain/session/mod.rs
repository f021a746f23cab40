//! Session domain module.
//!
//! Holds the authoritative state of one guided decision session and the
//! rules for moving it through Entry, Clarifying, Analyzing and Results.

mod errors;
mod stage;
mod state;

pub use errors::{RejectReason, SessionError};
pub use stage::Stage;
pub use state::{ClarificationExchange, SessionState};
