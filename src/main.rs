//! # Butterfly-guidance CLI
//!
//! Command-line interface for the butterfly-guidance library.
//! Reads a route JSON document, folds away redundant guidance steps and writes
//! the reduced document back out.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use butterfly_guidance::{
    reduce_routes, validate_collapsed, ReductionConfig, RouteDocument, VerbosityReducer,
};
use clap::{Parser, ValueEnum};
use log::{error, info};

mod cli;

/// Command-line interface for butterfly-guidance
#[derive(Parser)]
#[command(name = "butterfly-guidance")]
#[command(about = "Collapse redundant turn-by-turn guidance steps in route JSON")]
#[command(long_about = "Reduces the verbosity of computed routes:
  butterfly-guidance route.json                  # Reduce and print to stdout
  butterfly-guidance route.json reduced.json     # Reduce into a file
  cat route.json | butterfly-guidance -          # Read from stdin
  butterfly-guidance route.json --validate-only  # Only check the input

Passes:
  --pass names     # Only merge short name segments
  --pass lanes     # Only collapse unambiguous lane guidance
  --cutoff 80      # Name segments shorter than 80m are merged")]
#[command(version)]
struct Cli {
    /// Route JSON file, or "-" for stdin
    input: String,

    /// Output file path, or "-" for stdout
    #[arg(default_value = "-")]
    output: String,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which passes to run (overrides the configuration file)
    #[arg(long, value_enum)]
    pass: Option<Pass>,

    /// Name segment cutoff in meters (overrides the configuration file)
    #[arg(long)]
    cutoff: Option<f64>,

    /// Validate the input and exit without writing output
    #[arg(long)]
    validate_only: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Pass {
    All,
    Names,
    Lanes,
}

/// Output destination types
#[derive(Debug)]
enum OutputDestination {
    File(String),
    Stdout,
}

fn resolve_output(output: &str) -> OutputDestination {
    if output == "-" || output.is_empty() {
        OutputDestination::Stdout
    } else {
        OutputDestination::File(output.to_string())
    }
}

fn main() {
    if let Err(e) = run() {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let mut logger = env_logger::Builder::from_default_env();
    logger.target(env_logger::Target::Stderr);
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if cli.verbose {
        eprintln!("🦋 Butterfly-guidance v{} starting...", env!("CARGO_PKG_VERSION"));
    }

    let config = resolve_config(&cli)?;
    let document = read_document(&cli.input)?;
    document
        .validate()
        .with_context(|| format!("{} is not a valid route document", cli.input))?;

    if cli.validate_only {
        eprintln!(
            "✅ {}: {} routes, {} legs valid",
            cli.input,
            document.routes.len(),
            document.leg_count()
        );
        return Ok(());
    }

    info!(
        "Reducing with cutoff {}m (names: {}, lanes: {})",
        config.name_segment_cutoff, config.suppress_short_name_segments, config.collapse_use_lane
    );
    let reducer = VerbosityReducer::new(config);
    let reduced = RouteDocument {
        routes: reduce_routes(&reducer, document.routes.clone()),
    };
    for (leg, route_leg) in reduced.legs() {
        validate_collapsed(leg, &route_leg.steps).context("Reduction produced an invalid leg")?;
    }

    match resolve_output(&cli.output) {
        OutputDestination::File(path) => {
            reduced
                .write(&path)
                .with_context(|| format!("Failed to write {path}"))?;
            eprintln!("📁 Saved to: {path}");
        }
        OutputDestination::Stdout => {
            reduced
                .to_writer_pretty(io::stdout().lock())
                .context("Failed to write to stdout")?;
        }
    }

    cli::print_summary(&cli::summarize(&document, &reduced));
    Ok(())
}

/// Configuration file (or defaults) with command-line overrides applied
fn resolve_config(cli: &Cli) -> Result<ReductionConfig> {
    let mut config = match &cli.config {
        Some(path) => ReductionConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReductionConfig::default(),
    };

    if let Some(cutoff) = cli.cutoff {
        config.name_segment_cutoff = cutoff;
    }
    if let Some(pass) = cli.pass {
        config.suppress_short_name_segments = matches!(pass, Pass::All | Pass::Names);
        config.collapse_use_lane = matches!(pass, Pass::All | Pass::Lanes);
    }

    config.validate().context("Invalid command-line options")?;
    Ok(config)
}

fn read_document(input: &str) -> Result<RouteDocument> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        RouteDocument::from_reader(buffer.as_bytes()).context("Failed to parse route JSON from stdin")
    } else {
        RouteDocument::read(input).with_context(|| format!("Failed to read {input}"))
    }
}
