//! Narrative rendering of a finalized decision.
//!
//! The reasoning backend receives the decision as one labelled text block.
//! Section order and placeholder wording are part of the wire contract.

use super::FinalizedDecision;

const NOT_PROVIDED: &str = "Not provided";
const NOT_SPECIFIED: &str = "Not specified";

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Formats the decision as the text block sent to `ReasoningClient::start`.
///
/// Sections appear in the order Decision Title, Context, Timeframe,
/// Options (1-indexed), Key Factors, Constraints.
pub fn narrative_of(decision: &FinalizedDecision) -> String {
    let options = decision
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| format!("{}. {}", i + 1, option))
        .collect::<Vec<_>>()
        .join("\n");

    let text = format!(
        "Decision Title:\n{}\n\nContext:\n{}\n\nTimeframe:\n{}\n\nOptions:\n{}\n\nKey Factors:\n{}\n\nConstraints:\n{}",
        decision.title(),
        or_placeholder(decision.description(), NOT_PROVIDED),
        or_placeholder(decision.timeframe(), NOT_SPECIFIED),
        options,
        or_placeholder(decision.key_factors(), NOT_SPECIFIED),
        or_placeholder(decision.constraints(), NOT_SPECIFIED),
    );

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::DecisionDraft;

    #[test]
    fn renders_placeholders_for_empty_optional_fields() {
        let decision = DecisionDraft::new("Change careers?")
            .with_options(["Stay", "Switch to tech", "Freelance"])
            .with_constraints("Limited savings")
            .finalize()
            .unwrap();

        assert_eq!(
            narrative_of(&decision),
            "Decision Title:\nChange careers?\n\n\
             Context:\nNot provided\n\n\
             Timeframe:\nNot specified\n\n\
             Options:\n1. Stay\n2. Switch to tech\n3. Freelance\n\n\
             Key Factors:\nNot specified\n\n\
             Constraints:\nLimited savings"
        );
    }

    #[test]
    fn renders_all_sections_in_fixed_order() {
        let decision = DecisionDraft::new("Buy a house?")
            .with_description("Renting downtown")
            .with_timeframe("Within 6 months")
            .with_options(["Buy", "Keep renting"])
            .with_key_factors("Cost, commute")
            .with_constraints("Budget")
            .finalize()
            .unwrap();

        let text = narrative_of(&decision);
        let positions: Vec<usize> = [
            "Decision Title:",
            "Context:",
            "Timeframe:",
            "Options:",
            "Key Factors:",
            "Constraints:",
        ]
        .iter()
        .map(|label| text.find(label).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("Context:\nRenting downtown"));
        assert!(text.contains("1. Buy\n2. Keep renting"));
    }

    #[test]
    fn equal_decisions_render_identically() {
        let build = || {
            DecisionDraft::new("Move?")
                .with_options(["North", "South"])
                .finalize()
                .unwrap()
        };
        assert_eq!(narrative_of(&build()), narrative_of(&build()));
    }
}
