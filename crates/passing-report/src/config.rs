//! Configuration types for the passing report pipeline.
//!
//! Every literal the report depends on (season, player, file names, the
//! run-leaning threshold) lives here and is set through the builder.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Season loaded when none is given.
pub const DEFAULT_SEASON: u16 = 2025;

/// Player analysed when none is given (nflverse abbreviated form).
pub const DEFAULT_PLAYER: &str = "J.Dart";

/// File name of the exported play table.
pub const DEFAULT_EXPORT_FILE: &str = "dart_passing_analysis.csv";

/// File name of the rendered chart.
pub const DEFAULT_CHART_FILE: &str = "pass_distribution.html";

/// Expected-pass probability at or below which a pass counts as run-leaning.
pub const DEFAULT_RUN_LEANING_THRESHOLD: f64 = 0.50;

/// First season with nflverse play-by-play data.
const FIRST_SEASON: u16 = 1999;
const LAST_SEASON: u16 = 2100;

/// nflverse abbreviates passers as "<initials>.<surname>", e.g. "J.Dart" or "A.St. Brown".
static ABBREVIATED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z]*\.\s?[A-Z][A-Za-z.'\- ]*$").expect("Invalid regex: player name")
});

/// Configuration for the passing report.
///
/// Use [`ReportConfig::builder()`] to create a new configuration with a
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use passing_report::config::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .season(2025)
///     .player_name("J.Dart")
///     .print_info(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Season to load.
    /// Default: 2025
    pub season: u16,

    /// Passer name exactly as the provider spells it.
    /// Default: "J.Dart"
    pub player_name: String,

    /// Team label shown in the chart title.
    /// If None, the most frequent offensive team of the player's passes is used.
    /// Default: None
    pub team_label: Option<String>,

    /// Render the stacked bar chart.
    /// Default: false
    pub plot_graph: bool,

    /// Write the projected play table to CSV.
    /// Default: false
    pub export: bool,

    /// Compute and print the summary statistics.
    /// Default: false
    pub print_info: bool,

    /// Open the rendered chart in the system browser.
    /// Default: true
    pub show_chart: bool,

    /// Directory receiving the CSV and chart files.
    /// Default: "."
    pub output_dir: PathBuf,

    /// File name of the exported CSV.
    /// Default: "dart_passing_analysis.csv"
    pub export_file_name: String,

    /// File name of the rendered chart.
    /// Default: "pass_distribution.html"
    pub chart_file_name: String,

    /// Expected-pass probability threshold for run-leaning passes (0.0 - 1.0).
    /// Default: 0.50
    pub run_leaning_threshold: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            season: DEFAULT_SEASON,
            player_name: DEFAULT_PLAYER.to_string(),
            team_label: None,
            plot_graph: false,
            export: false,
            print_info: false,
            show_chart: true,
            output_dir: PathBuf::from("."),
            export_file_name: DEFAULT_EXPORT_FILE.to_string(),
            chart_file_name: DEFAULT_CHART_FILE.to_string(),
            run_leaning_threshold: DEFAULT_RUN_LEANING_THRESHOLD,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Full path of the exported CSV.
    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(&self.export_file_name)
    }

    /// Full path of the rendered chart.
    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.chart_file_name)
    }

    /// Validate the configuration and return errors if invalid.
    ///
    /// A player name that does not look like the provider's abbreviated form
    /// is only logged: the exact match will simply find nothing.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(FIRST_SEASON..=LAST_SEASON).contains(&self.season) {
            return Err(ConfigValidationError::InvalidSeason(self.season));
        }

        if self.player_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyPlayerName);
        }

        if !(0.0..=1.0).contains(&self.run_leaning_threshold) {
            return Err(ConfigValidationError::InvalidThreshold(
                self.run_leaning_threshold,
            ));
        }

        if self.export_file_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFileName("export_file_name"));
        }

        if self.chart_file_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFileName("chart_file_name"));
        }

        if !is_abbreviated_name(&self.player_name) {
            warn!(
                "Player name '{}' does not look like an abbreviated passer name (e.g. 'J.Dart')",
                self.player_name
            );
        }

        Ok(())
    }
}

/// Check whether a name follows the provider's "<initials>.<surname>" convention.
pub fn is_abbreviated_name(name: &str) -> bool {
    ABBREVIATED_NAME.is_match(name)
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid season: {0} (must be between 1999 and 2100)")]
    InvalidSeason(u16),

    #[error("Player name must not be empty")]
    EmptyPlayerName,

    #[error("Invalid run-leaning threshold: {0} (must be between 0.0 and 1.0)")]
    InvalidThreshold(f64),

    #[error("'{0}' must not be empty")]
    EmptyFileName(&'static str),
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    season: Option<u16>,
    player_name: Option<String>,
    team_label: Option<String>,
    plot_graph: Option<bool>,
    export: Option<bool>,
    print_info: Option<bool>,
    show_chart: Option<bool>,
    output_dir: Option<PathBuf>,
    export_file_name: Option<String>,
    chart_file_name: Option<String>,
    run_leaning_threshold: Option<f64>,
}

impl ReportConfigBuilder {
    /// Set the season to load.
    pub fn season(mut self, season: u16) -> Self {
        self.season = Some(season);
        self
    }

    /// Set the passer name to filter on.
    ///
    /// The match is exact, so the name must use the provider's spelling.
    pub fn player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    /// Override the team label used in the chart title.
    pub fn team_label(mut self, team: impl Into<String>) -> Self {
        self.team_label = Some(team.into());
        self
    }

    /// Enable or disable the stacked bar chart.
    pub fn plot_graph(mut self, plot: bool) -> Self {
        self.plot_graph = Some(plot);
        self
    }

    /// Enable or disable the CSV export.
    pub fn export(mut self, export: bool) -> Self {
        self.export = Some(export);
        self
    }

    /// Enable or disable the console statistics.
    pub fn print_info(mut self, print: bool) -> Self {
        self.print_info = Some(print);
        self
    }

    /// Enable or disable opening the chart in a browser.
    pub fn show_chart(mut self, show: bool) -> Self {
        self.show_chart = Some(show);
        self
    }

    /// Set the output directory for the CSV and chart.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the file name of the exported CSV.
    pub fn export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = Some(name.into());
        self
    }

    /// Set the file name of the rendered chart.
    pub fn chart_file_name(mut self, name: impl Into<String>) -> Self {
        self.chart_file_name = Some(name.into());
        self
    }

    /// Set the run-leaning threshold.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.5 = 50% pass probability)
    pub fn run_leaning_threshold(mut self, threshold: f64) -> Self {
        self.run_leaning_threshold = Some(threshold);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let config = ReportConfig {
            season: self.season.unwrap_or(DEFAULT_SEASON),
            player_name: self
                .player_name
                .unwrap_or_else(|| DEFAULT_PLAYER.to_string()),
            team_label: self.team_label,
            plot_graph: self.plot_graph.unwrap_or(false),
            export: self.export.unwrap_or(false),
            print_info: self.print_info.unwrap_or(false),
            show_chart: self.show_chart.unwrap_or(true),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            export_file_name: self
                .export_file_name
                .unwrap_or_else(|| DEFAULT_EXPORT_FILE.to_string()),
            chart_file_name: self
                .chart_file_name
                .unwrap_or_else(|| DEFAULT_CHART_FILE.to_string()),
            run_leaning_threshold: self
                .run_leaning_threshold
                .unwrap_or(DEFAULT_RUN_LEANING_THRESHOLD),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.season, 2025);
        assert_eq!(config.player_name, "J.Dart");
        assert_eq!(config.export_file_name, "dart_passing_analysis.csv");
        assert_eq!(config.run_leaning_threshold, 0.5);
        assert!(!config.plot_graph);
        assert!(!config.export);
        assert!(!config.print_info);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ReportConfig::builder()
            .season(2024)
            .player_name("D.Jones")
            .team_label("NYG")
            .plot_graph(true)
            .export(true)
            .print_info(true)
            .output_dir("reports")
            .export_file_name("jones.csv")
            .run_leaning_threshold(0.4)
            .build()
            .unwrap();

        assert_eq!(config.season, 2024);
        assert_eq!(config.player_name, "D.Jones");
        assert_eq!(config.team_label.as_deref(), Some("NYG"));
        assert!(config.plot_graph && config.export && config.print_info);
        assert_eq!(config.export_path(), PathBuf::from("reports/jones.csv"));
        assert_eq!(
            config.chart_path(),
            PathBuf::from("reports/pass_distribution.html")
        );
        assert_eq!(config.run_leaning_threshold, 0.4);
    }

    #[test]
    fn test_validation_invalid_season() {
        let result = ReportConfig::builder().season(1980).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidSeason(1980)
        ));
    }

    #[test]
    fn test_validation_empty_player() {
        let result = ReportConfig::builder().player_name("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyPlayerName
        ));
    }

    #[test]
    fn test_validation_invalid_threshold() {
        let result = ReportConfig::builder().run_leaning_threshold(1.5).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidThreshold(_)
        ));
    }

    #[test]
    fn test_validation_empty_export_name() {
        let result = ReportConfig::builder().export_file_name("").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyFileName("export_file_name")
        ));
    }

    #[test]
    fn test_abbreviated_name_shape() {
        assert!(is_abbreviated_name("J.Dart"));
        assert!(is_abbreviated_name("Jos.Allen"));
        assert!(is_abbreviated_name("A.St. Brown"));
        assert!(!is_abbreviated_name("Jaxson Dart"));
        assert!(!is_abbreviated_name("dart"));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "season": 2023,
            "player_name": "T.Lawrence",
            "team_label": null,
            "plot_graph": true,
            "export": false,
            "print_info": true,
            "show_chart": false,
            "output_dir": "out",
            "export_file_name": "lawrence.csv",
            "chart_file_name": "lawrence.html",
            "run_leaning_threshold": 0.45
        }"#;

        let config: ReportConfig = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(config.season, 2023);
        assert_eq!(config.player_name, "T.Lawrence");
        assert!(config.plot_graph);
        assert!(!config.show_chart);
        assert_eq!(config.chart_path(), PathBuf::from("out/lawrence.html"));
        assert!(config.validate().is_ok());
    }
}
