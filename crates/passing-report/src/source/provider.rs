//! Provider trait for abstracting where play-by-play seasons come from.
//!
//! # Implementing a New Provider
//!
//! 1. Create a new file in `src/source/` (e.g., `database.rs`)
//! 2. Implement the [`PlayByPlaySource`] trait for your provider struct
//! 3. Export the provider in `src/source/mod.rs`
//!
//! # Example
//!
//! ```rust,ignore
//! use passing_report::source::{FileSource, PlayByPlaySource};
//!
//! let source = FileSource::new("data/play_by_play_{season}.parquet");
//! let season = source.load_season(2025)?;
//! ```

use crate::error::Result;
use polars::prelude::DataFrame;

/// Trait for anything that can supply a season-wide play-by-play table.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so the pipeline stays `Send`.
///
/// # Error Handling
///
/// Implementations should return [`ReportError::SeasonNotFound`] when the
/// season does not exist and [`ReportError::SourceUnavailable`] for any other
/// delivery failure. Schema checks are the pipeline's job.
///
/// [`ReportError::SeasonNotFound`]: crate::error::ReportError::SeasonNotFound
/// [`ReportError::SourceUnavailable`]: crate::error::ReportError::SourceUnavailable
pub trait PlayByPlaySource: Send + Sync {
    /// Load every play of `season`.
    fn load_season(&self, season: u16) -> Result<DataFrame>;

    /// Get the provider name for logging and reports.
    fn name(&self) -> &str;
}
