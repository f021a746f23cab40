//! Analysis Module - Pure stress testing of decision options.
//!
//! All functions are pure (no side effects) and stateless. They take a
//! finalized decision and return computed results, so no ports or adapters
//! are involved.

mod scenario_synthesizer;

pub use scenario_synthesizer::{
    DecisionSummary, ImpactLevel, OptionOutcome, Recommendation, ScenarioSynthesizer,
    StressScenario, StressTestReport, MAX_RANKED_OPTIONS, NEXT_STEPS,
};
