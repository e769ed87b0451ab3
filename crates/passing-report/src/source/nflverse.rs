//! nflverse play-by-play provider.
//!
//! Downloads `play_by_play_{season}.parquet` from the nflverse-data GitHub
//! release (<https://github.com/nflverse/nflverse-data>), the same files the
//! nflverse R and Python readers use.

use super::PlayByPlaySource;
use super::file::restrict_to_season;
use crate::error::{ReportError, Result};
use polars::prelude::*;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::io::Cursor;
use std::time::Duration;
use tracing::{debug, info};

/// Default release URL holding the play-by-play files.
const DEFAULT_BASE_URL: &str = "https://github.com/nflverse/nflverse-data/releases/download/pbp";

/// Default timeout for downloads in seconds. Season files are ~30-50 MB.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

const USER_AGENT: &str = concat!("passing-report/", env!("CARGO_PKG_VERSION"));

/// Configuration for the nflverse provider.
#[derive(Debug, Clone)]
pub struct NflverseConfig {
    /// Base URL of the release (useful for mirrors).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NflverseConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl NflverseConfig {
    /// Create a new configuration builder.
    pub fn builder() -> NflverseConfigBuilder {
        NflverseConfigBuilder::default()
    }
}

/// Builder for [`NflverseConfig`].
#[derive(Default)]
pub struct NflverseConfigBuilder {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl NflverseConfigBuilder {
    /// Set a custom base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> NflverseConfig {
        NflverseConfig {
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Downloads seasons from nflverse.
///
/// # Example
///
/// ```rust,ignore
/// use passing_report::source::{NflverseSource, PlayByPlaySource};
///
/// let source = NflverseSource::new()?;
/// let pbp = source.load_season(2025)?;
/// ```
pub struct NflverseSource {
    config: NflverseConfig,
    client: Client,
}

impl NflverseSource {
    /// Create a provider with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(NflverseConfig::default())
    }

    /// Create a provider with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: NflverseConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// URL of the Parquet file for a season.
    pub fn season_url(&self, season: u16) -> String {
        format!(
            "{}/play_by_play_{}.parquet",
            self.config.base_url.trim_end_matches('/'),
            season
        )
    }
}

impl PlayByPlaySource for NflverseSource {
    fn load_season(&self, season: u16) -> Result<DataFrame> {
        let url = self.season_url(season);
        info!("Downloading play-by-play for {} from {}", season, url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ReportError::SourceUnavailable {
                season,
                reason: e.to_string(),
            })?;

        if let Some(err) = status_error(season, response.status()) {
            return Err(err);
        }

        let bytes = response
            .bytes()
            .map_err(|e| ReportError::SourceUnavailable {
                season,
                reason: e.to_string(),
            })?;
        debug!("Downloaded {} bytes", bytes.len());

        let df = ParquetReader::new(Cursor::new(bytes.to_vec()))
            .finish()
            .map_err(|e| ReportError::SourceUnavailable {
                season,
                reason: format!("unreadable parquet: {}", e),
            })?;

        restrict_to_season(df, season)
    }

    fn name(&self) -> &str {
        "nflverse"
    }
}

/// Map a non-success HTTP status to the provider error it stands for.
fn status_error(season: u16, status: StatusCode) -> Option<ReportError> {
    match status {
        StatusCode::NOT_FOUND => Some(ReportError::SeasonNotFound(season)),
        status if !status.is_success() => Some(ReportError::SourceUnavailable {
            season,
            reason: format!("HTTP {}", status),
        }),
        _ => None,
    }
}
