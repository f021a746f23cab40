//! Decision module.
//!
//! The editable draft, its validated snapshot, and the narrative text
//! handed to the reasoning backend.

mod draft;
mod narrative;

pub use draft::{DecisionDraft, FinalizedDecision, MIN_OPTIONS};
pub use narrative::narrative_of;
