//! Plain-text rendering of session views for the terminal.

use std::fmt::{self, Write};

use decision_lens::domain::analysis::StressTestReport;
use decision_lens::domain::decision::FinalizedDecision;

/// Analysis view: decision overview, backend analysis, constraints.
pub fn analysis(
    out: &mut impl Write,
    decision: &FinalizedDecision,
    analysis_text: &str,
) -> fmt::Result {
    writeln!(out, "Decision Analysis")?;
    writeln!(out, "Insights for \"{}\"\n", decision.title())?;

    writeln!(out, "Decision Overview")?;
    writeln!(out, "  Options: {}", decision.options().join(", "))?;
    if !decision.description().is_empty() {
        writeln!(out, "  Context: {}", decision.description())?;
    }
    if !decision.timeframe().is_empty() {
        writeln!(out, "  Timeframe: {}", decision.timeframe())?;
    }

    writeln!(out, "\nAnalysis\n{}", analysis_text)?;

    if decision.has_constraints() {
        writeln!(out, "\nConstraints to Consider\n{}", decision.constraints())?;
    }
    Ok(())
}

/// Results view: scenarios, recommendations, summary, next steps.
pub fn report(out: &mut impl Write, report: &StressTestReport) -> fmt::Result {
    writeln!(out, "Stress Tests")?;

    for scenario in &report.scenarios {
        writeln!(
            out,
            "\n{} [{} Impact]\n  {}",
            scenario.title, scenario.impact, scenario.description
        )?;
        for result in &scenario.results_by_option {
            writeln!(out, "  - {}: {}", result.option, result.outcome)?;
        }
    }

    writeln!(out, "\nRecommendations")?;
    for (i, rec) in report.recommendations.iter().enumerate() {
        writeln!(
            out,
            "  {}. {}: {} - {}",
            i + 1,
            rec.title,
            rec.chosen_option,
            rec.rationale
        )?;
    }

    let summary = &report.summary;
    writeln!(out, "\nDecision Summary")?;
    writeln!(out, "  Decision: {}", summary.title)?;
    writeln!(out, "  Options evaluated: {}", summary.option_count)?;
    if !summary.timeframe.is_empty() {
        writeln!(out, "  Timeframe: {}", summary.timeframe)?;
    }
    if !summary.constraints.is_empty() {
        writeln!(out, "  Constraints: {}", summary.constraints)?;
    }

    writeln!(out, "\nNext Steps")?;
    for (i, step) in report.next_steps.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, step)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use decision_lens::domain::analysis::ScenarioSynthesizer;
    use decision_lens::domain::decision::DecisionDraft;

    fn decision() -> FinalizedDecision {
        DecisionDraft::new("Change careers?")
            .with_options(["Stay", "Switch to tech"])
            .with_constraints("Limited savings")
            .finalize()
            .unwrap()
    }

    #[test]
    fn analysis_shows_constraints_only_when_present() {
        let mut text = String::new();
        analysis(&mut text, &decision(), "Stay.").unwrap();
        assert!(text.contains("Constraints to Consider\nLimited savings"));
        assert!(!text.contains("Context:"));
    }

    #[test]
    fn report_lists_impact_and_recommendations() {
        let mut text = String::new();
        report(&mut text, &ScenarioSynthesizer::run(&decision())).unwrap();
        assert!(text.contains("Worst Case Scenario [High Impact]"));
        assert!(text.contains("  - Stay: Some constraints apply"));
        assert!(text.contains("1. Primary Recommendation: Stay"));
        assert!(text.contains("4. Set milestones and review points"));
    }
}
