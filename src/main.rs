//! Decision Lens - CLI entry point.

mod cli;
mod render;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use decision_lens::adapters::{HttpReasoningClient, MockReasoningClient};
use decision_lens::application::{AnswerOutcome, SessionOrchestrator};
use decision_lens::config::{AppConfig, LogFormat, LoggingConfig};
use decision_lens::domain::analysis::ScenarioSynthesizer;
use decision_lens::domain::decision::narrative_of;
use decision_lens::domain::session::SessionState;
use decision_lens::ports::ReasoningClient;

use cli::{Cli, Command, DraftArgs};

const QUIT: &str = ":quit";

fn setup_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Command::Decide {
        base_url, max_turns, ..
    } = &cli.command
    {
        if let Some(url) = base_url {
            config.reasoning.base_url = url.clone();
        }
        if max_turns.is_some() {
            config.reasoning.max_follow_up_turns = *max_turns;
        }
    }
    config.validate().context("Invalid configuration")?;

    setup_logging(&config.logging);
    debug!(command = ?cli.command, "dispatching command");

    match cli.command {
        Command::Decide { draft, offline, .. } => cmd_decide(&config, &draft, offline).await,
        Command::Narrative { draft } => cmd_narrative(&draft),
        Command::StressTest { draft, json } => cmd_stress_test(&draft, json),
    }
}

fn cmd_narrative(args: &DraftArgs) -> Result<()> {
    let decision = args.to_draft().finalize()?;
    println!("{}", narrative_of(&decision));
    Ok(())
}

fn cmd_stress_test(args: &DraftArgs, json: bool) -> Result<()> {
    let decision = args.to_draft().finalize()?;
    let report = ScenarioSynthesizer::run(&decision);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut out = String::new();
        render::report(&mut out, &report)?;
        print!("{}", out);
    }
    Ok(())
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    Ok(lines.next_line().await?)
}

async fn cmd_decide(config: &AppConfig, args: &DraftArgs, offline: bool) -> Result<()> {
    let client: Arc<dyn ReasoningClient> = if offline {
        info!("using offline mock backend");
        Arc::new(MockReasoningClient::new())
    } else {
        info!(base_url = %config.reasoning.base_url, "using HTTP reasoning backend");
        Arc::new(HttpReasoningClient::new(config.reasoning.http_config())?)
    };
    let orchestrator =
        SessionOrchestrator::new(client).with_settings(config.reasoning.orchestrator_settings());
    let mut state = SessionState::new();

    let question = orchestrator
        .submit_draft(&mut state, &args.to_draft())
        .await
        .context("Could not start the decision session")?;
    println!("\nClarifying Question\n{}", question);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(answer) = prompt(&mut lines, "> ").await? else {
            bail!("input closed before clarification finished");
        };
        if answer.trim() == QUIT {
            return Ok(());
        }

        match orchestrator.submit_answer(&mut state, &answer).await {
            Ok(AnswerOutcome::FollowUp { question }) => println!("\n{}", question),
            Ok(AnswerOutcome::Analyzed) => break,
            Err(e) if e.is_rejection() => continue,
            Err(e) if e.is_terminal() => {
                bail!("{}; the clarification loop was stopped, start a new session", e)
            }
            Err(e) => eprintln!("{}\nRetry your answer or type {} to exit.", e, QUIT),
        }
    }

    if let (Some(decision), Some(text)) = (state.decision(), state.analysis_text()) {
        let mut out = String::new();
        render::analysis(&mut out, decision, text)?;
        println!("\n{}", out);
    }

    if prompt(&mut lines, "Press Enter for stress tests ").await?.is_none() {
        return Ok(());
    }
    let report = orchestrator.advance_to_results(&mut state)?;
    let mut out = String::new();
    render::report(&mut out, report)?;
    print!("\n{}", out);
    Ok(())
}
