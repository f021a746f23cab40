//! Decision draft and its finalized snapshot.
//!
//! A `DecisionDraft` is what the user edits on the entry form. Once it is
//! finalizable it is turned into an immutable `FinalizedDecision`, which is
//! the only shape the rest of the system consumes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Minimum number of non-blank options a decision needs.
pub const MIN_OPTIONS: usize = 2;

/// Editable decision fields before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub key_factors: String,
    #[serde(default)]
    pub constraints: String,
}

impl Default for DecisionDraft {
    /// A blank draft with two empty option slots.
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            timeframe: String::new(),
            options: vec![String::new(); MIN_OPTIONS],
            key_factors: String::new(),
            constraints: String::new(),
        }
    }
}

impl DecisionDraft {
    /// Creates a blank draft with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = timeframe.into();
        self
    }

    pub fn with_key_factors(mut self, key_factors: impl Into<String>) -> Self {
        self.key_factors = key_factors.into();
        self
    }

    pub fn with_constraints(mut self, constraints: impl Into<String>) -> Self {
        self.constraints = constraints.into();
        self
    }

    /// Replaces all option slots.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Option slot editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a blank option slot.
    pub fn add_option(&mut self) {
        self.options.push(String::new());
    }

    /// Removes the slot at `index` while more than two slots remain.
    ///
    /// Returns `true` if a slot was removed.
    pub fn remove_option(&mut self, index: usize) -> bool {
        if self.options.len() <= MIN_OPTIONS || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        true
    }

    /// Overwrites the slot at `index`. Returns `false` for an unknown slot.
    pub fn set_option(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.options.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Finalization
    // ─────────────────────────────────────────────────────────────────────────

    /// Non-blank options, trimmed, in their original order.
    pub fn valid_options(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// True iff the trimmed title is non-empty and at least two options are non-blank.
    pub fn is_finalizable(&self) -> bool {
        self.validate().is_ok()
    }

    fn validate(&self) -> Result<Vec<String>, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let options = self.valid_options();
        if options.len() < MIN_OPTIONS {
            return Err(ValidationError::too_few_options(MIN_OPTIONS, options.len()));
        }
        Ok(options)
    }

    /// Builds the immutable snapshot consumed downstream.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is blank
    /// - `TooFewOptions` if fewer than two options are non-blank
    pub fn finalize(&self) -> Result<FinalizedDecision, ValidationError> {
        let options = self.validate()?;
        Ok(FinalizedDecision {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            timeframe: self.timeframe.trim().to_string(),
            options,
            key_factors: self.key_factors.trim().to_string(),
            constraints: self.constraints.trim().to_string(),
        })
    }
}

/// Validated, trimmed decision snapshot.
///
/// # Invariants
///
/// - `title` is non-empty
/// - `options` holds at least two non-empty entries in draft order
/// - never mutated after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedDecision {
    title: String,
    description: String,
    timeframe: String,
    options: Vec<String>,
    key_factors: String,
    constraints: String,
}

impl FinalizedDecision {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn key_factors(&self) -> &str {
        &self.key_factors
    }

    pub fn constraints(&self) -> &str {
        &self.constraints
    }

    /// Returns true if the user listed any constraints.
    pub fn has_constraints(&self) -> bool {
        !self.constraints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn career_draft() -> DecisionDraft {
        DecisionDraft::new("  Change careers?  ")
            .with_options(["Stay", "  ", "Switch to tech ", "", "Freelance"])
            .with_constraints(" Limited savings ")
    }

    #[test]
    fn default_draft_has_two_blank_slots() {
        let draft = DecisionDraft::default();
        assert_eq!(draft.options, vec![String::new(), String::new()]);
        assert!(!draft.is_finalizable());
    }

    #[test]
    fn finalize_trims_and_drops_blank_options_in_order() {
        let decision = career_draft().finalize().unwrap();
        assert_eq!(decision.title(), "Change careers?");
        assert_eq!(decision.options(), ["Stay", "Switch to tech", "Freelance"]);
        assert_eq!(decision.constraints(), "Limited savings");
        assert!(decision.has_constraints());
        assert_eq!(decision.description(), "");
    }

    #[test]
    fn finalize_rejects_blank_title_first() {
        let draft = DecisionDraft::new("   ").with_options(["only one"]);
        assert_eq!(
            draft.finalize().unwrap_err(),
            ValidationError::empty_field("title")
        );
    }

    #[test]
    fn finalize_rejects_single_option() {
        let draft = DecisionDraft::new("Move?").with_options(["Yes", "   "]);
        assert_eq!(
            draft.finalize().unwrap_err(),
            ValidationError::too_few_options(2, 1)
        );
    }

    #[test]
    fn remove_option_keeps_at_least_two_slots() {
        let mut draft = DecisionDraft::default();
        assert!(!draft.remove_option(0));

        draft.add_option();
        draft.set_option(2, "Third");
        assert!(draft.remove_option(0));
        assert_eq!(draft.options, vec![String::new(), "Third".to_string()]);
        assert!(!draft.remove_option(1));
    }

    #[test]
    fn set_option_ignores_unknown_slot() {
        let mut draft = DecisionDraft::default();
        assert!(!draft.set_option(5, "nope"));
        assert!(draft.set_option(1, "B"));
        assert_eq!(draft.options[1], "B");
    }

    #[test]
    fn deserializes_camel_case_form_payload() {
        let draft: DecisionDraft = serde_json::from_str(
            r#"{"title":"Move?","options":["A","B"],"keyFactors":"cost"}"#,
        )
        .unwrap();
        assert_eq!(draft.key_factors, "cost");
        assert_eq!(draft.constraints, "");
        assert!(draft.is_finalizable());
    }

    proptest! {
        #[test]
        fn finalizable_matches_title_and_option_count(
            title in "[ a-z]{0,8}",
            options in proptest::collection::vec("[ a-z]{0,4}", 0..6),
        ) {
            let draft = DecisionDraft::new(title.clone()).with_options(options.clone());
            let non_blank = options.iter().filter(|o| !o.trim().is_empty()).count();
            let expected = !title.trim().is_empty() && non_blank >= 2;
            prop_assert_eq!(draft.is_finalizable(), expected);
            prop_assert_eq!(draft.finalize().is_ok(), expected);
        }
    }
}
