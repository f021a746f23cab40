//! State machine trait for stage enums.
//!
//! Provides a consistent interface for validating and performing stage
//! transitions. Implementors only declare the legal edges.

use super::TransitionError;

/// Trait for enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for Stage {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Entry, Clarifying) | (Clarifying, Analyzing))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Entry => vec![Clarifying],
///             Clarifying => vec![Analyzing],
///             // ... etc
///         }
///     }
/// }
///
/// let next = stage.transition_to(Stage::Clarifying)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(TransitionError::new(format!("{:?}", self), format!("{:?}", target)))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Broken,
    }

    impl StateMachine for Light {
        fn can_transition_to(&self, target: &Self) -> bool {
            use Light::*;
            matches!((self, target), (Red, Green) | (Green, Red) | (Green, Broken))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Light::*;
            match self {
                Red => vec![Green],
                Green => vec![Red, Broken],
                Broken => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Light::Red.transition_to(Light::Green), Ok(Light::Green));
    }

    #[test]
    fn transition_to_reports_both_ends_on_failure() {
        let err = Light::Red.transition_to(Light::Broken).unwrap_err();
        assert_eq!(err.from, "Red");
        assert_eq!(err.to, "Broken");
    }

    #[test]
    fn is_terminal_only_for_dead_ends() {
        assert!(Light::Broken.is_terminal());
        assert!(!Light::Red.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for light in [Light::Red, Light::Green, Light::Broken] {
            for target in light.valid_transitions() {
                assert!(
                    light.can_transition_to(&target),
                    "{:?} -> {:?} should be allowed",
                    light,
                    target
                );
            }
        }
    }
}
