//! # Gift Exchange CLI
//!
//! ```text
//! gift-exchange init
//! gift-exchange assign <giver>
//! gift-exchange declare <giver> <receiver>
//! gift-exchange lookup <person>
//! gift-exchange verify
//! gift-exchange status
//! gift-exchange reset --yes
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); results go to stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gx_runtime::{ExchangeRuntime, RuntimeConfig};
use shared_types::ParticipantId;

/// Secret gift exchange draws with no repeats from last cycle
#[derive(Parser, Debug)]
#[command(name = "gift-exchange", version)]
struct Cli {
    /// Roster JSON file (overrides GX_ROSTER)
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    /// Directory for the exchange record (overrides GX_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Local cache directory for read fallback (overrides GX_CACHE_DIR)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Fixed RNG seed (overrides GX_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Draw retry bound (overrides GX_MAX_ATTEMPTS)
    #[arg(long, global = true)]
    max_attempts: Option<u32>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the exchange record from the roster
    Init,
    /// Draw a receiver for a giver
    Assign { giver: String },
    /// Record a pair chosen by hand
    Declare { giver: String, receiver: String },
    /// Show who a person gives to
    Lookup { person: String },
    /// Check the current assignments
    Verify,
    /// Show progress without revealing anyone
    Status,
    /// Delete the record to start a new cycle
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn load_config(cli: &Cli) -> RuntimeConfig {
    let mut config = RuntimeConfig::from_env();

    if let Some(path) = &cli.roster {
        config.roster_path = path.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &cli.cache_dir {
        config.cache_dir = Some(dir.clone());
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(attempts) = cli.max_attempts {
        config.engine.max_attempts = attempts;
    }

    config
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli);
    let runtime = ExchangeRuntime::open(&config).with_context(|| {
        format!(
            "opening exchange (roster {}, data {})",
            config.roster_path.display(),
            config.data_dir.display()
        )
    })?;

    match &cli.command {
        Command::Init => {
            let outcome = runtime.init().context("initializing exchange")?;
            emit(cli.json, &outcome, || {
                if outcome.created {
                    format!("Started exchange with {} participants", outcome.progress.total)
                } else {
                    format!(
                        "Exchange already running: {} of {} assignments completed",
                        outcome.progress.assigned, outcome.progress.total
                    )
                }
            })?;
        }
        Command::Assign { giver } => {
            let outcome = runtime
                .assign(&ParticipantId::from(giver.as_str()))
                .map_err(|err| {
                    let hint = if err.is_dead_end() {
                        "; run `reset --yes` and `init` to redraw"
                    } else {
                        ""
                    };
                    anyhow::Error::new(err).context(format!("drawing for {giver}{hint}"))
                })?;
            emit(cli.json, &outcome, || {
                format!("{} gives to {}", outcome.giver, outcome.receiver)
            })?;
        }
        Command::Declare { giver, receiver } => {
            let outcome = runtime
                .declare(
                    &ParticipantId::from(giver.as_str()),
                    &ParticipantId::from(receiver.as_str()),
                )
                .with_context(|| format!("declaring {giver} -> {receiver}"))?;
            emit(cli.json, &outcome, || {
                format!(
                    "Recorded {giver} -> {receiver} ({} of {} assigned)",
                    outcome.progress.assigned, outcome.progress.total
                )
            })?;
        }
        Command::Lookup { person } => {
            let receiver = runtime
                .lookup(&ParticipantId::from(person.as_str()))
                .with_context(|| format!("looking up {person}"))?;
            emit(cli.json, &receiver, || match &receiver {
                Some(receiver) => format!("{person} gives to {receiver}"),
                None => format!("{person} has not drawn yet"),
            })?;
        }
        Command::Verify => {
            let report = runtime.verify().context("verifying exchange")?;
            emit(cli.json, &report, || {
                if report.valid {
                    "All assignments are valid".to_string()
                } else {
                    report.messages().join("\n")
                }
            })?;
            if !report.valid {
                return Ok(ExitCode::from(2));
            }
        }
        Command::Status => {
            let status = runtime.status().context("reading status")?;
            emit(cli.json, &status, || {
                let mut text = format!(
                    "{}: {} of {} assignments completed (version {}, updated {})",
                    status.exchange_id,
                    status.progress.assigned,
                    status.progress.total,
                    status.version,
                    status.updated_at.to_rfc3339()
                );
                if !status.progress.unassigned.is_empty() {
                    let waiting: Vec<&str> = status
                        .progress
                        .unassigned
                        .iter()
                        .map(ParticipantId::as_str)
                        .collect();
                    text.push_str(&format!("\nStill to draw: {}", waiting.join(", ")));
                }
                text
            })?;
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("reset deletes every assignment; pass --yes to confirm");
            }
            runtime.reset().context("resetting exchange")?;
            emit(cli.json, &serde_json::json!({ "reset": true }), || {
                "Exchange reset".to_string()
            })?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
