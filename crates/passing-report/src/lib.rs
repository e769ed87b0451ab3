//! Passing Report Library
//!
//! Season passing report for a single NFL quarterback, built with Rust and
//! Polars on nflverse play-by-play data.
//!
//! # Overview
//!
//! One run of the [`ReportPipeline`]:
//!
//! - **Loads** a season through a [`source::PlayByPlaySource`] and checks its columns
//! - **Filters** to the player's passes, counting sacks and run-leaning throws
//! - **Excludes** sacks, extra-point and two-point attempts
//! - **Summarizes** yards, completion rate, pass direction and sack rate
//! - **Charts** passes by location and air-yard depth (plotly HTML)
//! - **Exports** the final plays to CSV
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use passing_report::{ReportConfig, ReportPipeline};
//! use passing_report::source::NflverseSource;
//! use std::sync::Arc;
//!
//! let config = ReportConfig::builder()
//!     .season(2025)
//!     .player_name("J.Dart")
//!     .print_info(true)
//!     .export(true)
//!     .build()?;
//!
//! let outcome = ReportPipeline::builder()
//!     .config(config)
//!     .source(Arc::new(NflverseSource::new()?))
//!     .build()?
//!     .run()?;
//!
//! println!("{} attempts", outcome.report.attempts);
//! ```
//!
//! # Sources
//!
//! - [`source::NflverseSource`] - nflverse-data release files (feature `remote`)
//! - [`source::FileSource`] - local CSV or Parquet files
//!
//! To add a provider, implement [`source::PlayByPlaySource`].

pub mod config;
pub mod error;
pub mod pipeline;
pub mod reporting;
pub mod schema;
pub mod source;
pub mod summary;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ReportConfig, ReportConfigBuilder};
pub use error::{ReportError, Result as ReportResult, ResultExt};
pub use pipeline::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportOutcome, ReportPipeline,
    ReportPipelineBuilder, ReportStage,
};
pub use reporting::ReportGenerator;
pub use types::{
    AirYardCategory, LocationDepthTable, LocationShare, PassLocation, PassingReport,
    PassingSummary, WeeklyCount,
};
