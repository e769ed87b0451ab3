//! Main report pipeline module.
//!
//! This module provides the core `ReportPipeline` struct and builder for
//! orchestrating load, filter, derive, summarize, chart and export.

use crate::config::ReportConfig;
use crate::error::Result;
use crate::pipeline::derive::{add_air_yard_category, add_weekly_counts, project_export_columns};
use crate::pipeline::filters::{
    add_run_leaning_flag, count_run_leaning, count_sacks, drop_non_plays, exclude_non_attempts,
    keep_pass_plays, keep_passer,
};
use crate::pipeline::progress::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportStage,
};
use crate::reporting::{ReportGenerator, build_chart, chart_title, print_summary, render_chart};
use crate::schema::validate_schema;
use crate::source::PlayByPlaySource;
use crate::summary::{location_depth_table, summarize, team_label, weekly_attempts};
use crate::types::PassingReport;
use chrono::Local;
use polars::prelude::*;
use std::fs;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// What a pipeline run produced.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    /// Counts, statistics and output paths of the run.
    pub report: PassingReport,
    /// The final table, projected to the export columns.
    pub plays: DataFrame,
}

/// The passing report pipeline.
///
/// Use [`ReportPipeline::builder()`] to create a new pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use passing_report::{ReportConfig, ReportPipeline};
/// use passing_report::source::FileSource;
/// use std::sync::Arc;
///
/// let outcome = ReportPipeline::builder()
///     .config(ReportConfig::builder().print_info(true).build()?)
///     .source(Arc::new(FileSource::new("data/play_by_play_{season}.parquet")))
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run()?;
///
/// println!("{} attempts", outcome.report.attempts);
/// ```
pub struct ReportPipeline {
    config: ReportConfig,
    source: Arc<dyn PlayByPlaySource>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    reporter: ReportGenerator,
}

// Ensure ReportPipeline is Send (can be moved to another thread)
static_assertions::assert_impl_all!(ReportPipeline: Send);

impl ReportPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> ReportPipelineBuilder {
        ReportPipelineBuilder::default()
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Run the pipeline once.
    ///
    /// # Errors
    ///
    /// Provider failures, a table missing required columns, a passer with no
    /// passes in the season, and write failures are all returned as
    /// [`ReportError`](crate::error::ReportError) values.
    pub fn run(&self) -> Result<ReportOutcome> {
        match self.run_internal() {
            Ok(outcome) => {
                self.report_progress(ProgressUpdate::complete(format!(
                    "Report complete: {} attempts",
                    outcome.report.attempts
                )));
                Ok(outcome)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self) -> Result<ReportOutcome> {
        let start_time = Instant::now();
        let config = &self.config;

        // Step 1: Load the season
        self.report_progress(ProgressUpdate::new(
            ReportStage::Loading,
            0.0,
            format!(
                "Loading {} play-by-play from {}...",
                config.season,
                self.source.name()
            ),
        ));
        info!(
            "Step 1: Loading season {} from {}...",
            config.season,
            self.source.name()
        );

        let season = self.source.load_season(config.season)?;
        let plays_loaded = season.height();
        validate_schema(&season)?;

        self.report_progress(ProgressUpdate::new(
            ReportStage::Loading,
            1.0,
            format!("Loaded {} plays", plays_loaded),
        ));

        // Steps 2-8: Narrow down to the player's attempts
        self.report_progress(ProgressUpdate::new(
            ReportStage::Filtering,
            0.0,
            format!("Selecting passes by {}...", config.player_name),
        ));
        info!("Step 2: Filtering passes by {}...", config.player_name);

        let passes = keep_pass_plays(drop_non_plays(season)?)?;
        let season_pass_plays = passes.height();

        let dropbacks = keep_passer(passes, &config.player_name, config.season)?;
        let dropback_count = dropbacks.height();
        let sacks = count_sacks(&dropbacks)?;

        let dropbacks = add_run_leaning_flag(dropbacks, config.run_leaning_threshold)?;
        let run_leaning_passes = count_run_leaning(&dropbacks)?;

        let plays = exclude_non_attempts(dropbacks)?;
        let attempts = plays.height();

        debug!(
            "{} pass plays, {} dropbacks, {} sacks, {} attempts",
            season_pass_plays, dropback_count, sacks, attempts
        );
        self.report_progress(ProgressUpdate::new(
            ReportStage::Filtering,
            1.0,
            format!("{} attempts after excluding sacks and conversions", attempts),
        ));

        // Step 9: Statistics
        self.report_progress(ProgressUpdate::new(
            ReportStage::Summarizing,
            0.0,
            "Computing passing statistics...",
        ));
        let summary = summarize(&plays, sacks, run_leaning_passes)?;
        if config.print_info {
            print_summary(&config.player_name, &summary);
        }
        self.report_progress(ProgressUpdate::new(
            ReportStage::Summarizing,
            1.0,
            "Statistics complete",
        ));

        // Step 10: Air-yard bins
        self.report_progress(ProgressUpdate::new(
            ReportStage::Deriving,
            0.0,
            "Binning air yards...",
        ));
        let plays = add_air_yard_category(plays)?;
        let depth_by_location = location_depth_table(&plays)?;
        let team = match &config.team_label {
            Some(team) => Some(team.clone()),
            None => team_label(&plays)?,
        };
        self.report_progress(ProgressUpdate::new(
            ReportStage::Deriving,
            1.0,
            "Air-yard bins added",
        ));

        // Step 11: Chart
        let chart_path = if config.plot_graph {
            self.report_progress(ProgressUpdate::new(
                ReportStage::Charting,
                0.0,
                "Rendering pass distribution chart...",
            ));
            info!("Step 3: Rendering chart...");

            let title = chart_title(&config.player_name, team.as_deref(), attempts);
            let plot = build_chart(&depth_by_location, &title);
            fs::create_dir_all(&config.output_dir)?;
            let path = render_chart(&plot, &config.chart_path(), config.show_chart)?;

            self.report_progress(ProgressUpdate::new(
                ReportStage::Charting,
                1.0,
                "Chart rendered",
            ));
            Some(path)
        } else {
            None
        };

        // Steps 12-13: Weekly counts and projection
        let plays = add_weekly_counts(plays)?;
        let weekly_attempts = weekly_attempts(&plays)?;
        let mut plays = project_export_columns(&plays)?;
        debug!(
            "Final table: {} rows x {} columns",
            plays.height(),
            plays.width()
        );

        // Step 14: Export
        let export_path = if config.export {
            self.report_progress(ProgressUpdate::new(
                ReportStage::Exporting,
                0.0,
                "Exporting plays...",
            ));
            info!("Step 4: Exporting plays...");

            let path = self
                .reporter
                .export_plays(&mut plays, &config.export_file_name)?;

            self.report_progress(ProgressUpdate::new(
                ReportStage::Exporting,
                1.0,
                "Export complete",
            ));
            Some(path)
        } else {
            None
        };

        info!(
            "Report for {} finished in {} ms",
            config.player_name,
            start_time.elapsed().as_millis()
        );

        let report = PassingReport {
            generated_at: Local::now().to_rfc3339(),
            season: config.season,
            player: config.player_name.clone(),
            team,
            source: self.source.name().to_string(),
            plays_loaded,
            season_pass_plays,
            dropbacks: dropback_count,
            sacks,
            run_leaning_passes,
            attempts,
            summary: Some(summary),
            depth_by_location,
            weekly_attempts,
            export_path,
            chart_path,
        };

        Ok(ReportOutcome { report, plays })
    }
}

/// Builder for creating a [`ReportPipeline`] instance.
///
/// Use [`ReportPipeline::builder()`] to get started.
#[derive(Default)]
pub struct ReportPipelineBuilder {
    config: Option<ReportConfig>,
    source: Option<Arc<dyn PlayByPlaySource>>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(ReportPipelineBuilder: Send);

impl ReportPipelineBuilder {
    /// Set the report configuration.
    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set where the season table comes from.
    ///
    /// Without a source the pipeline downloads from nflverse (feature `remote`).
    pub fn source(mut self, source: Arc<dyn PlayByPlaySource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set a progress reporter for receiving updates during the run.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// This is a convenience method for simple progress handling.
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid or no source is
    /// available.
    pub fn build(self) -> Result<ReportPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let source = match self.source {
            Some(source) => source,
            None => default_source()?,
        };

        let reporter = ReportGenerator::new(config.output_dir.clone());

        Ok(ReportPipeline {
            config,
            source,
            progress_reporter: self.progress_reporter,
            reporter,
        })
    }
}

#[cfg(feature = "remote")]
fn default_source() -> Result<Arc<dyn PlayByPlaySource>> {
    Ok(Arc::new(crate::source::NflverseSource::new()?))
}

#[cfg(not(feature = "remote"))]
fn default_source() -> Result<Arc<dyn PlayByPlaySource>> {
    Err(crate::error::ReportError::InvalidConfig(
        "no play-by-play source configured (enable the `remote` feature or pass a FileSource)"
            .to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::types::{PassLocation, WeeklyCount};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource(DataFrame);

    impl PlayByPlaySource for StaticSource {
        fn load_season(&self, _season: u16) -> Result<DataFrame> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    /// Three dropbacks by J.Dart (a sack, a completion, an incompletion),
    /// one pass by another passer, a run and a quarter end.
    fn season_table() -> DataFrame {
        df![
            "play_id" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            "game_id" => ["g1", "g1", "g2", "g3", "g1", "g1"],
            "week" => [1i64, 1, 2, 2, 1, 1],
            "desc" => ["sack", "pass left", "pass right", "pass", "run", "END QUARTER 1"],
            "posteam" => [Some("NYG"), Some("NYG"), Some("NYG"), Some("PIT"), Some("NYG"), None],
            "defteam" => [Some("DAL"), Some("DAL"), Some("WAS"), Some("CLE"), Some("DAL"), None],
            "down" => [Some(1.0), Some(2.0), Some(1.0), Some(3.0), Some(1.0), None],
            "ydstogo" => [10.0, 17.0, 10.0, 4.0, 10.0, 0.0],
            "yardline_100" => [Some(75.0), Some(82.0), Some(40.0), Some(30.0), Some(60.0), None],
            "qtr" => [1i64, 1, 2, 3, 1, 1],
            "game_seconds_remaining" => [3500.0, 3460.0, 2500.0, 1200.0, 3000.0, 2700.0],
            "score_differential" => [Some(0.0), Some(0.0), Some(7.0), Some(-3.0), Some(0.0), None],
            "play_type" => [Some("pass"), Some("pass"), Some("pass"), Some("pass"), Some("run"), None],
            "passer_player_name" => [Some("J.Dart"), Some("J.Dart"), Some("J.Dart"), Some("R.Wilson"), None, None],
            "receiver_player_name" => [None, Some("M.Nabers"), Some("W.Robinson"), Some("G.Pickens"), None, None],
            "pass_location" => [None, Some("left"), Some("right"), Some("middle"), None, None],
            "air_yards" => [None, Some(5.0), Some(22.0), Some(12.0), None, None],
            "yards_after_catch" => [None, Some(3.0), None, Some(4.0), None, None],
            "passing_yards" => [None, Some(8.0), None, Some(16.0), None, None],
            "yards_gained" => [Some(-7.0), Some(8.0), Some(0.0), Some(16.0), Some(3.0), None],
            "complete_pass" => [0.0, 1.0, 0.0, 1.0, 0.0, 0.0],
            "incomplete_pass" => [0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            "sack" => [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "interception" => [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "touchdown" => [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "first_down_pass" => [0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            "epa" => [Some(-1.9), Some(0.4), Some(-0.6), Some(1.1), Some(0.1), None],
            "cpoe" => [None, Some(12.5), Some(-40.2), Some(8.3), None, None],
            "xpass" => [Some(0.45), Some(0.7), Some(0.3), Some(0.8), Some(0.2), None],
            "extra_point_attempt" => [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "two_point_attempt" => [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ]
        .unwrap()
    }

    fn pipeline(config: ReportConfig, df: DataFrame) -> ReportPipeline {
        ReportPipeline::builder()
            .config(config)
            .source(Arc::new(StaticSource(df)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_pipeline_builder_default_config() {
        let pipeline = pipeline(ReportConfig::default(), season_table());
        assert_eq!(pipeline.config().season, 2025);
        assert!(!pipeline.config().export);
    }

    #[test]
    fn test_pipeline_builder_rejects_invalid_config() {
        let mut config = ReportConfig::default();
        config.run_leaning_threshold = 2.0;

        let result = ReportPipeline::builder()
            .config(config)
            .source(Arc::new(StaticSource(season_table())))
            .build();
        assert!(matches!(result, Err(ReportError::InvalidConfig(_))));
    }

    #[test]
    fn test_run_end_to_end_counts() {
        let outcome = pipeline(ReportConfig::default(), season_table())
            .run()
            .unwrap();
        let report = &outcome.report;

        assert_eq!(report.plays_loaded, 6);
        assert_eq!(report.season_pass_plays, 4);
        assert_eq!(report.dropbacks, 3);
        assert_eq!(report.sacks, 1);
        assert_eq!(report.run_leaning_passes, 2);
        assert_eq!(report.attempts, 2);
        assert_eq!(report.team.as_deref(), Some("NYG"));
        assert_eq!(report.source, "static");
        assert!(report.export_path.is_none());
        assert!(report.chart_path.is_none());

        let summary = report.summary.as_ref().unwrap();
        assert_eq!(summary.total_passing_yards, 8.0);
        assert_eq!(summary.completion_ratio, Some(0.5));
        assert!((summary.sack_rate.unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.location(PassLocation::Left).unwrap().count, 1);
        assert_eq!(summary.location(PassLocation::Middle).unwrap().count, 0);

        assert_eq!(
            report.weekly_attempts,
            vec![
                WeeklyCount { week: 1, attempts: 1 },
                WeeklyCount { week: 2, attempts: 1 },
            ]
        );
        assert_eq!(report.depth_by_location.classified_total(), 2);
    }

    #[test]
    fn test_run_projects_export_columns() {
        let outcome = pipeline(ReportConfig::default(), season_table())
            .run()
            .unwrap();
        let names: Vec<String> = outcome
            .plays
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        assert_eq!(names, crate::schema::EXPORT_COLUMNS.map(String::from).to_vec());
        assert_eq!(outcome.plays.height(), 2);
    }

    #[test]
    fn test_run_unknown_player() {
        let config = ReportConfig::builder()
            .player_name("Jax.Dart")
            .build()
            .unwrap();

        match pipeline(config, season_table()).run() {
            Err(ReportError::NoMatchingPlays { suggestions, .. }) => {
                assert_eq!(suggestions, vec!["J.Dart".to_string()]);
            }
            other => panic!("expected NoMatchingPlays, got {:?}", other.map(|o| o.report)),
        }
    }

    #[test]
    fn test_run_missing_columns() {
        let df = season_table().drop("xpass").unwrap();
        match pipeline(ReportConfig::default(), df).run() {
            Err(ReportError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["xpass".to_string()])
            }
            other => panic!("expected MissingColumns, got {:?}", other.map(|o| o.report)),
        }
    }

    #[test]
    fn test_progress_callback_sees_every_stage() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let stages = Arc::new(Mutex::new(Vec::new()));
        let call_count_clone = call_count.clone();
        let stages_clone = stages.clone();

        ReportPipeline::builder()
            .source(Arc::new(StaticSource(season_table())))
            .on_progress(move |update| {
                call_count_clone.fetch_add(1, Ordering::SeqCst);
                stages_clone.lock().unwrap().push(update.stage);
            })
            .build()
            .unwrap()
            .run()
            .unwrap();

        let stages = stages.lock().unwrap();
        assert!(call_count.load(Ordering::SeqCst) >= 8);
        assert_eq!(stages.first(), Some(&ReportStage::Loading));
        assert_eq!(stages.last(), Some(&ReportStage::Complete));
        assert!(!stages.contains(&ReportStage::Exporting));
    }

    #[test]
    fn test_progress_reports_failure() {
        let failed = Arc::new(AtomicUsize::new(0));
        let failed_clone = failed.clone();

        let config = ReportConfig::builder().player_name("X.Nobody").build().unwrap();
        let result = ReportPipeline::builder()
            .config(config)
            .source(Arc::new(StaticSource(season_table())))
            .on_progress(move |update| {
                if update.stage == ReportStage::Failed {
                    failed_clone.fetch_add(1, Ordering::SeqCst);
                }
            })
            .build()
            .unwrap()
            .run();

        assert!(result.is_err());
        assert_eq!(failed.load(Ordering::SeqCst), 1);
    }
}
