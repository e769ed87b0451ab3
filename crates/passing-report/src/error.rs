//! Custom error types for the passing report pipeline.
//!
//! This module provides the error hierarchy using `thiserror` so that every
//! failure the pipeline can hit (provider outage, schema drift, an empty
//! player filter) reaches the caller as a typed value instead of a panic.
//!
//! Errors are serializable so that `--json` consumers receive a stable
//! `{code, message}` object.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the passing report pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The play-by-play provider could not deliver data.
    #[error("Play-by-play data for season {season} is unavailable: {reason}")]
    SourceUnavailable { season: u16, reason: String },

    /// The provider has no data for the requested season.
    #[error("No play-by-play data published for season {0}")]
    SeasonNotFound(u16),

    /// The loaded table lacks columns the report depends on.
    #[error("Play-by-play table is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// The passer filter matched nothing.
    #[error("No passing plays found for '{player}' in season {season}{}", format_suggestions(.suggestions))]
    NoMatchingPlays {
        player: String,
        season: u16,
        suggestions: Vec<String>,
    },

    /// Chart rendering failed.
    #[error("Failed to render chart: {0}")]
    ChartFailed(String),

    /// CSV export failed.
    #[error("Failed to export plays: {0}")]
    ExportFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error (only with the "remote" feature).
    #[cfg(feature = "remote")]
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReportError>,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

impl ReportError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReportError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for machine consumers.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            Self::SeasonNotFound(_) => "SEASON_NOT_FOUND",
            Self::MissingColumns(_) => "MISSING_COLUMNS",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::NoMatchingPlays { .. } => "NO_MATCHING_PLAYS",
            Self::ChartFailed(_) => "CHART_FAILED",
            Self::ExportFailed(_) => "EXPORT_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            #[cfg(feature = "remote")]
            Self::HttpRequest(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if the failure came from the data provider rather than the pipeline.
    pub fn is_source_failure(&self) -> bool {
        match self {
            Self::SourceUnavailable { .. } | Self::SeasonNotFound(_) => true,
            #[cfg(feature = "remote")]
            Self::HttpRequest(_) => true,
            Self::WithContext { source, .. } => source.is_source_failure(),
            _ => false,
        }
    }
}

impl Serialize for ReportError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ReportError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl From<crate::config::ConfigValidationError> for ReportError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        ReportError::InvalidConfig(err.to_string())
    }
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ReportError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            ReportError::SeasonNotFound(1990).error_code(),
            "SEASON_NOT_FOUND"
        );
        assert_eq!(
            ReportError::ColumnNotFound("xpass".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_no_matching_plays_message() {
        let error = ReportError::NoMatchingPlays {
            player: "J.Dart".to_string(),
            season: 2025,
            suggestions: vec!["Ja.Dart".to_string()],
        };
        let message = error.to_string();
        assert!(message.contains("'J.Dart'"));
        assert!(message.contains("2025"));
        assert!(message.contains("did you mean: Ja.Dart?"));

        let bare = ReportError::NoMatchingPlays {
            player: "X.Nobody".to_string(),
            season: 2025,
            suggestions: vec![],
        };
        assert!(!bare.to_string().contains("did you mean"));
    }

    #[test]
    fn test_missing_columns_message() {
        let error = ReportError::MissingColumns(vec!["xpass".to_string(), "cpoe".to_string()]);
        assert_eq!(
            error.to_string(),
            "Play-by-play table is missing required columns: xpass, cpoe"
        );
    }

    #[test]
    fn test_is_source_failure() {
        assert!(ReportError::SeasonNotFound(1990).is_source_failure());
        assert!(
            ReportError::SourceUnavailable {
                season: 2025,
                reason: "timeout".to_string()
            }
            .with_context("Loading season")
            .is_source_failure()
        );
        assert!(!ReportError::InvalidConfig("bad".to_string()).is_source_failure());
    }

    #[test]
    fn test_error_serialization() {
        let error = ReportError::ColumnNotFound("air_yards".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("air_yards"));
    }

    #[test]
    fn test_with_context() {
        let error =
            ReportError::ColumnNotFound("week".to_string()).with_context("During derivation");
        assert!(error.to_string().contains("During derivation"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_config_validation_error_is_invalid_config() {
        let err: ReportError = crate::config::ConfigValidationError::InvalidThreshold(1.5).into();
        assert_eq!(err.error_code(), "INVALID_CONFIG");

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INVALID_CONFIG");
        assert!(json["message"].as_str().unwrap().contains("1.5"));
    }
}
