//! Stage enum for tracking where a session is in the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Pipeline phase of a decision session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Entry,
    Clarifying,
    Analyzing,
    Results,
}

impl StateMachine for Stage {
    /// Valid transitions:
    /// - Entry -> Clarifying
    /// - Clarifying -> Analyzing
    /// - Analyzing -> Results
    /// - Results -> Analyzing
    ///
    /// Returning to Entry is a reset, not a transition.
    fn can_transition_to(&self, target: &Self) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (Entry, Clarifying) | (Clarifying, Analyzing) | (Analyzing, Results) | (Results, Analyzing)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Stage::*;
        match self {
            Entry => vec![Clarifying],
            Clarifying => vec![Analyzing],
            Analyzing => vec![Results],
            Results => vec![Analyzing],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Entry => "Entry",
            Stage::Clarifying => "Clarifying",
            Stage::Analyzing => "Analyzing",
            Stage::Results => "Results",
        };
        write!(f, "{}", s)
    }
}
