//! Novedad CLI — evaluate one artifact against one baseline
//!
//! Writes the serialized metric record to stdout; logs and diagnostics go
//! to stderr so stdout stays machine-consumable. Exit code 0 on success,
//! 1 on any fatal condition.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use novedad::{evaluate, EvalConfig};

/// Compression-based novelty/redundancy metrics for artifact evidence
#[derive(Parser)]
#[command(name = "novedad")]
#[command(version)]
#[command(about = "Compute compression-based novelty/redundancy metrics for an artifact against a baseline")]
struct Cli {
    /// Path of the artifact blob to evaluate
    #[arg(long)]
    artifact: PathBuf,

    /// Path of the baseline blob the artifact is compared against
    #[arg(long)]
    baseline: PathBuf,

    /// Declared producer label
    #[arg(long, default_value = "unknown")]
    producer: String,

    /// Declared intent (absent from the record when omitted)
    #[arg(long)]
    intent: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = EvalConfig::new(cli.artifact, cli.baseline).with_producer(cli.producer);
    // An empty intent string means "absent", never an empty marker in the record.
    if let Some(intent) = cli.intent.filter(|s| !s.is_empty()) {
        config = config.with_intent(intent);
    }

    let record = evaluate(&config).context("metric evaluation failed")?;
    let json = record
        .to_json_pretty()
        .context("record serialization failed")?;
    println!("{json}");
    Ok(())
}
