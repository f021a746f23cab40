//! Scenario Synthesizer - deterministic stress tests for a finalized decision.
//!
//! Each scenario in the fixed battery assigns a canned outcome to the first
//! three options by rank. Options past the third are not represented.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::decision::{FinalizedDecision, MIN_OPTIONS};

/// Number of option ranks the scenario battery has phrasing for.
pub const MAX_RANKED_OPTIONS: usize = 3;

/// Follow-up actions shown with every report.
pub const NEXT_STEPS: [&str; 4] = [
    "Review the recommendations above",
    "Discuss with stakeholders or mentors",
    "Plan implementation details for your chosen option",
    "Set milestones and review points",
];

/// How strongly a scenario bears on the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImpactLevel::High => "High",
            ImpactLevel::Medium => "Medium",
            ImpactLevel::Low => "Low",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one option under one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionOutcome {
    pub option: String,
    pub outcome: String,
}

/// One hypothetical evaluated against each ranked option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressScenario {
    pub title: String,
    pub description: String,
    pub impact: ImpactLevel,
    /// Outcomes in option rank order.
    pub results_by_option: Vec<OptionOutcome>,
}

impl StressScenario {
    /// Looks up the outcome recorded for `option`.
    ///
    /// When the same option text appears at several ranks, the lowest-ranked
    /// entry wins, as if the outcomes were written into a map in rank order.
    /// `results_by_option` still holds every rank.
    pub fn outcome_for(&self, option: &str) -> Option<&str> {
        self.results_by_option
            .iter()
            .rev()
            .find(|r| r.option == option)
            .map(|r| r.outcome.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub chosen_option: String,
    pub rationale: String,
}

/// Recap of the decision shown beside the stress tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub title: String,
    pub timeframe: String,
    pub option_count: usize,
    pub constraints: String,
}

/// Full synthesizer output for the Results stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressTestReport {
    pub scenarios: Vec<StressScenario>,
    pub recommendations: Vec<Recommendation>,
    pub summary: DecisionSummary,
    pub next_steps: Vec<String>,
}

impl StressTestReport {
    /// Report with no scenarios or recommendations.
    fn degenerate(summary: DecisionSummary) -> Self {
        Self {
            scenarios: Vec::new(),
            recommendations: Vec::new(),
            summary,
            next_steps: Vec::new(),
        }
    }

    /// Returns true if the report carries no stress-test content.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty() && self.recommendations.is_empty()
    }
}

/// Phrase per option rank for scenarios whose wording ignores the decision text.
struct RankedScenario {
    title: &'static str,
    description: &'static str,
    impact: ImpactLevel,
    outcomes: [&'static str; MAX_RANKED_OPTIONS],
}

const WORST_CASE: RankedScenario = RankedScenario {
    title: "Worst Case Scenario",
    description: "If everything that could go wrong does go wrong",
    impact: ImpactLevel::High,
    outcomes: [
        "Still viable with contingency plans",
        "Significant challenges but manageable",
        "High risk exposure",
    ],
};

const BEST_CASE: RankedScenario = RankedScenario {
    title: "Best Case Scenario",
    description: "If all conditions align favorably",
    impact: ImpactLevel::High,
    outcomes: [
        "Exceptional outcomes with high satisfaction",
        "Strong positive results",
        "Transformative potential",
    ],
};

const LONG_TERM: RankedScenario = RankedScenario {
    title: "Long-term Viability",
    description: "Sustainability and growth potential over time",
    impact: ImpactLevel::Medium,
    outcomes: [
        "Strong long-term trajectory",
        "Moderate growth potential",
        "Dependent on external factors",
    ],
};

/// Pure stress-test generator.
pub struct ScenarioSynthesizer;

impl ScenarioSynthesizer {
    /// Produces the scenario battery and recommendations for `decision`.
    ///
    /// Always four scenarios (Worst Case, Best Case, Constraint Impact,
    /// Long-term Viability) and two recommendations (Primary, Alternative).
    pub fn run(decision: &FinalizedDecision) -> StressTestReport {
        let summary = DecisionSummary {
            title: decision.title().to_string(),
            timeframe: decision.timeframe().to_string(),
            option_count: decision.options().len(),
            constraints: decision.constraints().to_string(),
        };
        synthesize(decision.options(), decision.has_constraints(), summary)
    }
}

fn synthesize(options: &[String], has_constraints: bool, summary: DecisionSummary) -> StressTestReport {
    if options.len() < MIN_OPTIONS {
        // FinalizedDecision guarantees two options; reaching this is an internal fault.
        tracing::error!(
            option_count = options.len(),
            "scenario synthesis requires at least two options"
        );
        return StressTestReport::degenerate(summary);
    }

    let ranked = &options[..options.len().min(MAX_RANKED_OPTIONS)];

    let constraint_outcomes = if has_constraints {
        ["Some constraints apply", "Moderate constraint impact"]
    } else {
        ["No major constraint impact", "Minimal limitations"]
    };
    let constraint_impact = StressScenario {
        title: "Constraint Impact".to_string(),
        description: "How limitations affect each option".to_string(),
        impact: ImpactLevel::Medium,
        results_by_option: outcomes_by_rank(ranked, |rank| match rank {
            0 | 1 => constraint_outcomes[rank],
            _ => "Constraints require careful planning",
        }),
    };

    let scenarios = vec![
        ranked_scenario(&WORST_CASE, ranked),
        ranked_scenario(&BEST_CASE, ranked),
        constraint_impact,
        ranked_scenario(&LONG_TERM, ranked),
    ];

    let recommendations = vec![
        Recommendation {
            title: "Primary Recommendation".to_string(),
            chosen_option: options[0].clone(),
            rationale: "Best overall balance of factors and lowest risk profile".to_string(),
        },
        Recommendation {
            title: "Alternative Path".to_string(),
            chosen_option: options[1].clone(),
            rationale: "Consider this if circumstances change or new information emerges"
                .to_string(),
        },
    ];

    StressTestReport {
        scenarios,
        recommendations,
        summary,
        next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
    }
}

fn ranked_scenario(template: &RankedScenario, ranked: &[String]) -> StressScenario {
    StressScenario {
        title: template.title.to_string(),
        description: template.description.to_string(),
        impact: template.impact,
        results_by_option: outcomes_by_rank(ranked, |rank| template.outcomes[rank]),
    }
}

fn outcomes_by_rank(ranked: &[String], phrase: impl Fn(usize) -> &'static str) -> Vec<OptionOutcome> {
    ranked
        .iter()
        .enumerate()
        .map(|(rank, option)| OptionOutcome {
            option: option.clone(),
            outcome: phrase(rank).to_string(),
        })
        .collect()
}
