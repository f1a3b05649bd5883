//! workover-triage - well spacing and volume classification
//!
//! Reads a well table, classifies every well by nearest-neighbor spacing and
//! cumulative production within its zone, and writes one enriched table per
//! zone.
//!
//! # Usage
//!
//! ```bash
//! # Classify with defaults, write per-zone tables
//! workover-triage classify --input wells.csv --out-dir results/
//!
//! # Override thresholds and use legacy labels
//! workover-triage classify --input wells.csv --x1 5 --y1 12 --style legacy
//!
//! # Inspect one zone, optionally one combined group
//! workover-triage show --input wells.csv --zone "Z1" --group "below 4 & ≤ 10"
//! ```
//!
//! # Environment Variables
//!
//! - `TRIAGE_CONFIG`: Path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use workover_triage::config::{ThresholdOverrides, TriageConfig};
use workover_triage::ingest::{read_wells_from_path, WellTable};
use workover_triage::report::{self, RunSummary, ZoneSummary};
use workover_triage::zones::partition_by_zone;
use workover_triage::{export, Classification, Classifier, LabelStyle};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "workover-triage")]
#[command(about = "Classify wells by spacing and cumulative production for workover triage")]
#[command(version)]
struct CliArgs {
    #[command(subcommand)]
    command: SubCommand,
}

/// Threshold flags shared by every subcommand that classifies.
#[derive(clap::Args, Debug)]
struct ThresholdArgs {
    /// Path to a TOML config file (default: $TRIAGE_CONFIG, then ./triage_config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Spacing boundary x1 (acres)
    #[arg(long)]
    x1: Option<f64>,
    /// Spacing boundary x2 (acres)
    #[arg(long)]
    x2: Option<f64>,
    /// Spacing boundary x3 (acres)
    #[arg(long)]
    x3: Option<f64>,
    /// Spacing boundary x4 (acres)
    #[arg(long)]
    x4: Option<f64>,
    /// Top spacing bucket label value x5 (acres)
    #[arg(long)]
    x5: Option<f64>,
    /// Volume boundary y1
    #[arg(long)]
    y1: Option<f64>,
    /// Volume boundary y2
    #[arg(long)]
    y2: Option<f64>,
    /// Top volume bucket label value y3
    #[arg(long)]
    y3: Option<f64>,

    /// Label wording
    #[arg(long, value_enum)]
    style: Option<StyleArg>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    Interval,
    Legacy,
}

impl From<StyleArg> for LabelStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Interval => LabelStyle::Interval,
            StyleArg::Legacy => LabelStyle::Legacy,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Classify every zone and optionally export per-zone tables
    Classify {
        /// Input well table (CSV)
        #[arg(long)]
        input: PathBuf,

        /// Directory for `{zone}_clusters.csv` files
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Process zones one at a time instead of on the thread pool
        #[arg(long)]
        sequential: bool,

        /// Write a JSON run summary to this path
        #[arg(long, value_name = "PATH")]
        summary_json: Option<PathBuf>,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Print the enriched rows of one zone
    Show {
        /// Input well table (CSV)
        #[arg(long)]
        input: PathBuf,

        /// Zone label
        #[arg(long)]
        zone: String,

        /// Only rows of this combined group
        #[arg(long)]
        group: Option<String>,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// List zone labels in first-seen order with well counts
    Zones {
        /// Input well table (CSV)
        #[arg(long)]
        input: PathBuf,

        /// Path to a TOML config file (for the input column layout)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Print the default configuration as TOML
    ConfigTemplate,
}

// ============================================================================
// Configuration
// ============================================================================

/// Load the config and apply command-line overrides, re-validating the result.
fn resolve_config(args: &ThresholdArgs) -> Result<TriageConfig> {
    let mut config = TriageConfig::load(args.config.as_deref()).context("Failed to load config")?;
    config.apply_overrides(&ThresholdOverrides {
        x1: args.x1,
        x2: args.x2,
        x3: args.x3,
        x4: args.x4,
        x5: args.x5,
        y1: args.y1,
        y2: args.y2,
        y3: args.y3,
    });
    if let Some(style) = args.style {
        config.labels.style = style.into();
    }
    config.validate().context("Invalid thresholds after command-line overrides")?;
    Ok(config)
}

fn load_table(input: &Path, config: &TriageConfig) -> Result<WellTable> {
    read_wells_from_path(input, &config.input)
        .with_context(|| format!("Failed to read well table {}", input.display()))
}

// ============================================================================
// Classification
// ============================================================================

/// Run the classifier on the blocking pool; Ctrl+C stops zones not yet started.
async fn run_classification(
    table: &WellTable,
    config: &TriageConfig,
    sequential: bool,
) -> Result<Classification> {
    let mut options = config.classifier_options();
    options.parallel = !sequential;

    let cancel = CancellationToken::new();
    let classifier = Classifier::new(config.thresholds(), options)
        .context("Invalid classification thresholds")?
        .with_cancellation(cancel.clone());

    let shutdown_token = cancel.clone();
    let signal_task = tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, cancelling remaining zones...");
        shutdown_token.cancel();
    });

    let wells = table.wells.clone();
    let result = tokio::task::spawn_blocking(move || {
        classifier.classify_with_progress(&wells, |zone| debug!(zone, "Zone finished"))
    })
        .await
        .context("Classification task panicked")?;

    signal_task.abort();
    Ok(result)
}

async fn cmd_classify(
    input: PathBuf,
    out_dir: Option<PathBuf>,
    sequential: bool,
    summary_json: Option<PathBuf>,
    args: ThresholdArgs,
) -> Result<()> {
    let config = resolve_config(&args)?;
    let table = load_table(&input, &config)?;
    let result = run_classification(&table, &config, sequential).await?;

    let thresholds = config.thresholds();
    for zone in &result.zones {
        print!("{}", ZoneSummary::new(zone, &thresholds, config.labels.style));
    }
    for failure in &result.failures {
        warn!(zone = %failure.zone, "Zone skipped: {}", failure.error);
        println!("Zone {} FAILED: {}", failure.zone, failure.error);
    }
    if !result.cancelled.is_empty() {
        println!("Cancelled before start: {}", result.cancelled.join(", "));
    }

    if let Some(dir) = out_dir {
        let paths = export::write_zone_tables(&dir, &result, &table.schema, &config.export)
            .with_context(|| format!("Failed to export zone tables to {}", dir.display()))?;
        println!("Wrote {} zone table(s) to {}", paths.len(), dir.display());
    }

    if let Some(path) = summary_json {
        let summary = RunSummary::new(&result, &thresholds, config.labels.style);
        let json = summary.to_json().context("Failed to serialize run summary")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        info!(path = %path.display(), "Run summary written");
    }

    Ok(())
}

async fn cmd_show(input: PathBuf, zone: String, group: Option<String>, args: ThresholdArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let table = load_table(&input, &config)?;
    let result = run_classification(&table, &config, false).await?;

    if let Some(failure) = result.failure(&zone) {
        bail!("Zone '{}' could not be classified: {}", zone, failure.error);
    }
    let Some(zone_table) = report::select_zone(&result, &zone) else {
        bail!(
            "Zone '{}' not found. Known zones: {}",
            zone,
            result.zone_labels().join(", ")
        );
    };

    let rows: Vec<_> = match &group {
        Some(g) => report::filter_group(&zone_table.wells, g),
        None => zone_table.wells.iter().collect(),
    };

    println!(
        "{:>6} {:>12} {:>12} {:>10} {:>12} {:>10}  group",
        "row", "x", "y", "cum", "dist_min", "acres"
    );
    for w in &rows {
        println!(
            "{:>6} {:>12.2} {:>12.2} {:>10.2} {:>12.2} {:>10.2}  {}",
            w.well.row + 1,
            w.well.x,
            w.well.y,
            w.well.cum,
            w.distance_min,
            w.spacing_acres,
            w.combined_group
        );
    }
    if rows.is_empty() {
        println!(
            "(no rows) groups in zone: {}",
            report::distinct_groups(&zone_table.wells).join(" | ")
        );
    }
    Ok(())
}

fn cmd_zones(input: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let config = TriageConfig::load(config.as_deref()).context("Failed to load config")?;
    let table = load_table(&input, &config)?;
    let partition = partition_by_zone(&table.wells);
    for subset in partition.iter() {
        println!("{:<30} {:>6}", subset.label, subset.len());
    }
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match args.command {
        SubCommand::Classify {
            input,
            out_dir,
            sequential,
            summary_json,
            thresholds,
        } => cmd_classify(input, out_dir, sequential, summary_json, thresholds).await,
        SubCommand::Show {
            input,
            zone,
            group,
            thresholds,
        } => cmd_show(input, zone, group, thresholds).await,
        SubCommand::Zones { input, config } => cmd_zones(input, config),
        SubCommand::ConfigTemplate => {
            let toml = TriageConfig::default()
                .to_toml()
                .context("Failed to render default config")?;
            print!("{toml}");
            Ok(())
        }
    }
}
