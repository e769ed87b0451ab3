//! Pipeline module.
//!
//! This module provides the report pipeline and the row filters and
//! derivations it is built from.

mod builder;
pub mod derive;
pub mod filters;
pub mod progress;

pub use builder::{ReportOutcome, ReportPipeline, ReportPipelineBuilder};
pub use progress::{ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportStage};
