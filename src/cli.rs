//! Command line definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use decision_lens::domain::decision::DecisionDraft;

#[derive(Debug, Parser)]
#[command(name = "decision-lens", version, about = "Guided decision evaluation with option stress tests")]
pub struct Cli {
    /// Path to a config file (TOML, YAML or JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a full guided session against the reasoning backend
    Decide {
        #[command(flatten)]
        draft: DraftArgs,

        /// Override the reasoning backend URL
        #[arg(long)]
        base_url: Option<String>,

        /// Abort after this many follow-up questions
        #[arg(long)]
        max_turns: Option<u32>,

        /// Use the built-in mock backend instead of HTTP
        #[arg(long)]
        offline: bool,
    },

    /// Print the narrative sent to the backend
    Narrative {
        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Print stress tests without contacting the backend
    StressTest {
        #[command(flatten)]
        draft: DraftArgs,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Decision fields, mirroring the entry form.
#[derive(Debug, Args)]
pub struct DraftArgs {
    /// What decision are you facing?
    #[arg(long)]
    pub title: String,

    /// An option to consider (repeat for each option)
    #[arg(long = "option")]
    pub options: Vec<String>,

    /// Context for the decision
    #[arg(long, default_value = "")]
    pub description: String,

    /// When the decision must be made
    #[arg(long, default_value = "")]
    pub timeframe: String,

    /// What matters most
    #[arg(long, default_value = "")]
    pub key_factors: String,

    /// What limits your choices
    #[arg(long, default_value = "")]
    pub constraints: String,
}

impl DraftArgs {
    pub fn to_draft(&self) -> DecisionDraft {
        DecisionDraft::new(self.title.clone())
            .with_description(self.description.clone())
            .with_timeframe(self.timeframe.clone())
            .with_options(self.options.iter().cloned())
            .with_key_factors(self.key_factors.clone())
            .with_constraints(self.constraints.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decide_with_repeated_options() {
        let cli = Cli::try_parse_from([
            "decision-lens",
            "decide",
            "--title",
            "Change careers?",
            "--option",
            "Stay",
            "--option",
            "Switch to tech",
            "--max-turns",
            "5",
        ])
        .unwrap();

        match cli.command {
            Command::Decide { draft, max_turns, offline, .. } => {
                assert_eq!(draft.options, vec!["Stay", "Switch to tech"]);
                assert_eq!(max_turns, Some(5));
                assert!(!offline);
                assert!(draft.to_draft().is_finalizable());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "decision-lens",
            "stress-test",
            "--title",
            "Move?",
            "--option",
            "A",
            "--log-level",
            "debug",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::StressTest { json: true, .. }));
    }
}
