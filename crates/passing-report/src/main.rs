//! CLI entry point for the passing report.

use anyhow::{Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use passing_report::config::{
    DEFAULT_CHART_FILE, DEFAULT_EXPORT_FILE, DEFAULT_PLAYER, DEFAULT_RUN_LEANING_THRESHOLD,
    DEFAULT_SEASON,
};
use passing_report::source::{FileSource, PlayByPlaySource};
use passing_report::{
    PassingReport, ReportConfig, ReportError, ReportGenerator, ReportPipeline, ReportResult,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

#[cfg(feature = "remote")]
use passing_report::source::{NflverseConfig, NflverseSource};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Season passing report for one NFL quarterback",
    long_about = "Loads a season of nflverse play-by-play, keeps one passer's attempts and \
                  reports yards, completion rate, pass direction and sack rate.\n\n\
                  EXAMPLES:\n  \
                  # Default run: J.Dart, 2025, print statistics and export CSV\n  \
                  passing-report\n\n  \
                  # Another passer and season, with the chart\n  \
                  passing-report --player D.Jones --season 2024 --plot\n\n  \
                  # Local file instead of a download\n  \
                  passing-report -i data/play_by_play_{season}.parquet\n\n  \
                  # Machine-readable output\n  \
                  passing-report --json | jq .summary"
)]
struct Args {
    /// Season to load
    #[arg(short, long, default_value_t = DEFAULT_SEASON)]
    season: u16,

    /// Passer name as spelled in the play-by-play (e.g. "J.Dart")
    #[arg(short, long, default_value = DEFAULT_PLAYER)]
    player: String,

    /// Team label for the chart title
    ///
    /// If not specified, the player's most frequent offensive team is used
    #[arg(long)]
    team: Option<String>,

    /// Local CSV or Parquet play-by-play file instead of downloading
    ///
    /// "{season}" in the path is replaced by the season
    #[arg(short, long)]
    input: Option<String>,

    /// Directory receiving the CSV, chart and report files
    #[arg(short, long, default_value = ".")]
    output_dir: String,

    /// File name of the exported CSV
    #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
    export_name: String,

    /// File name of the HTML chart
    #[arg(long, default_value = DEFAULT_CHART_FILE)]
    chart_name: String,

    /// Render the pass distribution chart
    #[arg(long)]
    plot: bool,

    /// Write the chart without opening it in a browser
    #[arg(long)]
    no_show: bool,

    /// Skip the CSV export
    #[arg(long)]
    no_export: bool,

    /// Skip printing the statistics
    #[arg(long)]
    no_print: bool,

    /// Expected-pass probability at or below which a pass is run-leaning
    #[arg(long, default_value_t = DEFAULT_RUN_LEANING_THRESHOLD)]
    threshold: f64,

    /// Base URL of the nflverse play-by-play release (for mirrors)
    #[cfg(feature = "remote")]
    #[arg(long)]
    base_url: Option<String>,

    /// Output JSON to stdout instead of the statistics lines
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    /// Useful for piping to other tools: `... --json | jq .summary`
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <player>_<season>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file (RUST_LOG)
    dotenv().ok();

    match generate_report(&args) {
        Ok(report) => handle_output(&report, &args),
        Err(e) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&error_json(&e))?);
                std::process::exit(1);
            }
            error!("Report failed: {}", e);
            Err(anyhow!("Report failed: {}", e))
        }
    }
}

/// Build the configuration, source and pipeline, then run it.
///
/// Every failure comes back as a [`ReportError`] so `--json` can report it
/// with its error code.
fn generate_report(args: &Args) -> ReportResult<PassingReport> {
    let config = build_config(args)?;
    let pipeline = build_pipeline(args, config)?;
    Ok(pipeline.run()?.report)
}

fn error_json(e: &ReportError) -> serde_json::Value {
    json!({ "error": e })
}

/// Map CLI flags onto the report configuration.
///
/// Without flags this exports the CSV and prints the statistics, and does
/// not plot.
fn build_config(args: &Args) -> ReportResult<ReportConfig> {
    let mut builder = ReportConfig::builder()
        .season(args.season)
        .player_name(&args.player)
        .plot_graph(args.plot)
        .show_chart(!args.no_show && !args.json)
        .export(!args.no_export)
        .print_info(!args.no_print && !args.json)
        .output_dir(&args.output_dir)
        .export_file_name(&args.export_name)
        .chart_file_name(&args.chart_name)
        .run_leaning_threshold(args.threshold);

    if let Some(ref team) = args.team {
        builder = builder.team_label(team);
    }

    Ok(builder.build()?)
}

fn build_pipeline(args: &Args, config: ReportConfig) -> ReportResult<ReportPipeline> {
    let mut builder = ReportPipeline::builder()
        .config(config)
        .source(build_source(args)?);

    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    Ok(builder.build()?)
}

#[cfg(feature = "remote")]
fn build_source(args: &Args) -> ReportResult<Arc<dyn PlayByPlaySource>> {
    if let Some(ref input) = args.input {
        return Ok(Arc::new(FileSource::new(input)));
    }

    let mut config = NflverseConfig::builder();
    if let Some(ref base_url) = args.base_url {
        config = config.base_url(base_url);
    }
    Ok(Arc::new(NflverseSource::with_config(config.build())?))
}

#[cfg(not(feature = "remote"))]
fn build_source(args: &Args) -> ReportResult<Arc<dyn PlayByPlaySource>> {
    match args.input {
        Some(ref input) => Ok(Arc::new(FileSource::new(input))),
        None => Err(ReportError::InvalidConfig(
            "--input is required when built without the `remote` feature".to_string(),
        )),
    }
}

/// Handle pipeline output based on CLI flags.
///
/// - `--json`: Print the report to stdout only (no logs)
/// - `--emit-report`: Write the report to a file
fn handle_output(report: &PassingReport, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    }

    if args.emit_report {
        let generator = ReportGenerator::new(std::path::PathBuf::from(&args.output_dir));
        let base_name = ReportGenerator::report_base_name(&report.player, report.season);
        let report_path = generator
            .write_report_to_file(report, &base_name)
            .map_err(|e| anyhow!("Failed to write report: {}", e))?;
        info!("Report written to: {}", report_path.display());
    }

    if let Some(ref path) = report.export_path {
        info!("Plays exported to: {}", path.display());
    }
    if let Some(ref path) = report.chart_path {
        info!("Chart written to: {}", path.display());
    }

    Ok(())
}
