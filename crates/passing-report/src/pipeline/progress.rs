//! Progress reporting for the passing report pipeline.
//!
//! The pipeline announces each stage through an optional
//! [`ProgressReporter`]; the CLI turns these into log lines.
//!
//! # Example
//!
//! ```rust,ignore
//! use passing_report::ReportPipeline;
//!
//! let outcome = ReportPipeline::builder()
//!     .source(source)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the report pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStage {
    /// Fetching the season table from the provider
    Loading,
    /// Narrowing the season to the player's passes
    Filtering,
    /// Computing and printing statistics
    Summarizing,
    /// Adding derived columns
    Deriving,
    /// Rendering the chart
    Charting,
    /// Writing the CSV
    Exporting,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl ReportStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Season",
            Self::Filtering => "Filtering Plays",
            Self::Summarizing => "Summarizing",
            Self::Deriving => "Deriving Columns",
            Self::Charting => "Rendering Chart",
            Self::Exporting => "Exporting Plays",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Share of the overall run spent in this stage (0.0 - 1.0).
    ///
    /// Loading dominates because it usually means a download.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.40,
            Self::Filtering => 0.15,
            Self::Summarizing => 0.10,
            Self::Deriving => 0.10,
            Self::Charting => 0.10,
            Self::Exporting => 0.15,
            Self::Complete | Self::Failed => 0.0,
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::Filtering => 0.40,
            Self::Summarizing => 0.55,
            Self::Deriving => 0.65,
            Self::Charting => 0.75,
            Self::Exporting => 0.85,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: ReportStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(stage: ReportStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: ReportStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: ReportStage::Failed,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
        }
    }
}

/// Trait for receiving progress updates.
///
/// Implementations must be `Send + Sync` so the pipeline stays `Send`.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_progress_update_new() {
        let update = ProgressUpdate::new(ReportStage::Filtering, 0.5, "Filtering...");
        assert_eq!(update.stage, ReportStage::Filtering);
        assert_eq!(update.stage_progress, 0.5);
        assert!((update.progress - 0.475).abs() < 1e-6);
        assert_eq!(update.message, "Filtering...");
    }

    #[test]
    fn test_progress_update_terminal_states() {
        let done = ProgressUpdate::complete("Done!");
        assert_eq!(done.stage, ReportStage::Complete);
        assert_eq!(done.progress, 1.0);

        let failed = ProgressUpdate::failed("boom");
        assert_eq!(failed.stage, ReportStage::Failed);
        assert_eq!(failed.progress, 0.0);
    }

    #[test]
    fn test_closure_progress_reporter() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = ClosureProgressReporter::new(move |_update| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        reporter.report(ProgressUpdate::new(ReportStage::Loading, 0.0, "Test"));
        reporter.report(ProgressUpdate::complete("Done"));

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stage_weights_sum() {
        let stages = [
            ReportStage::Loading,
            ReportStage::Filtering,
            ReportStage::Summarizing,
            ReportStage::Deriving,
            ReportStage::Charting,
            ReportStage::Exporting,
        ];

        let total_weight: f32 = stages.iter().map(|s| s.weight()).sum();
        assert!((total_weight - 1.0).abs() < 0.01, "Weights should sum to ~1.0");

        for pair in stages.windows(2) {
            let expected = pair[0].base_progress() + pair[0].weight();
            assert!((pair[1].base_progress() - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_stage_json_values() {
        let json = serde_json::to_string(&ReportStage::Summarizing).unwrap();
        assert_eq!(json, "\"summarizing\"");
        assert_eq!(ReportStage::Charting.display_name(), "Rendering Chart");
    }
}
