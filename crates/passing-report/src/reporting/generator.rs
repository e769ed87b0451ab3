use crate::error::{ReportError, Result};
use crate::types::PassingReport;
use polars::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Writes the exported play table and the JSON run report.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Write the play table as CSV with a header row, replacing any existing file.
    pub fn export_plays(&self, plays: &mut DataFrame, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let output_path = self.output_dir.join(file_name);

        let mut file = File::create(&output_path)
            .map_err(|e| ReportError::ExportFailed(format!("{}: {}", output_path.display(), e)))?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(plays)
            .map_err(|e| ReportError::ExportFailed(e.to_string()))?;

        info!(
            "Exported {} plays: {}",
            plays.height(),
            output_path.display()
        );
        Ok(output_path)
    }

    /// Write a report to `{output_dir}/{report_base_name}_report.json`.
    pub fn write_report_to_file(
        &self,
        report: &PassingReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }

    /// Base name for a run report, e.g. `j_dart_2025`.
    pub fn report_base_name(player: &str, season: u16) -> String {
        let slug: String = player
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();

        let slug = slug
            .split('_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");

        format!("{}_{}", slug, season)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocationDepthTable;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("passing_report_{}", name));
        fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn test_report_base_name() {
        assert_eq!(ReportGenerator::report_base_name("J.Dart", 2025), "j_dart_2025");
        assert_eq!(
            ReportGenerator::report_base_name("A.St. Brown", 2024),
            "a_st_brown_2024"
        );
    }

    #[test]
    fn test_export_plays_overwrites() {
        let dir = temp_dir("export");
        let generator = ReportGenerator::new(dir.clone());

        let mut first = df!["play_id" => [1i64, 2, 3], "desc" => ["a", "b, c", "d"]].unwrap();
        generator.export_plays(&mut first, "plays.csv").unwrap();

        let mut second = df!["play_id" => [4i64], "desc" => ["e"]].unwrap();
        let path = generator.export_plays(&mut second, "plays.csv").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["play_id,desc", "4,e"]);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = temp_dir("report");
        let generator = ReportGenerator::new(dir.clone());

        let report = PassingReport {
            generated_at: "2025-12-01T00:00:00Z".to_string(),
            season: 2025,
            player: "J.Dart".to_string(),
            team: Some("NYG".to_string()),
            source: "file".to_string(),
            plays_loaded: 10,
            season_pass_plays: 6,
            dropbacks: 3,
            sacks: 1,
            run_leaning_passes: 0,
            attempts: 2,
            summary: None,
            depth_by_location: LocationDepthTable::empty(),
            weekly_attempts: vec![],
            export_path: None,
            chart_path: None,
        };

        let path = generator.write_report_to_file(&report, "j_dart_2025").unwrap();
        assert!(path.ends_with("j_dart_2025_report.json"));

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["player"], "J.Dart");
        assert_eq!(parsed["sacks"], 1);
        assert!(parsed.get("summary").is_none());
        fs::remove_dir_all(&dir).ok();
    }
}
