//! Local CSV / Parquet play-by-play files.

use super::PlayByPlaySource;
use crate::error::{ReportError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Placeholder replaced by the requested season in file paths.
pub const SEASON_PLACEHOLDER: &str = "{season}";

/// Rows scanned for CSV type inference before falling back to a full scan.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Reads a season from a local file.
///
/// The path may contain `{season}` (e.g. `data/play_by_play_{season}.csv`).
/// Files ending in `.parquet` are read as Parquet, everything else as CSV.
/// If the table carries a `season` column, rows of other seasons are dropped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path_template: String,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path_template: path.as_ref().to_string_lossy().into_owned(),
        }
    }

    /// Resolve the file path for a season.
    pub fn path_for(&self, season: u16) -> PathBuf {
        PathBuf::from(
            self.path_template
                .replace(SEASON_PLACEHOLDER, &season.to_string()),
        )
    }

    fn is_templated(&self) -> bool {
        self.path_template.contains(SEASON_PLACEHOLDER)
    }
}

impl PlayByPlaySource for FileSource {
    fn load_season(&self, season: u16) -> Result<DataFrame> {
        let path = self.path_for(season);

        if !path.exists() {
            if self.is_templated() {
                return Err(ReportError::SeasonNotFound(season));
            }
            return Err(ReportError::SourceUnavailable {
                season,
                reason: format!("file not found: {}", path.display()),
            });
        }

        info!("Loading play-by-play from: {}", path.display());
        let df = if is_parquet(&path) {
            ParquetReader::new(File::open(&path)?)
                .finish()
                .context(format!("Reading {}", path.display()))?
        } else {
            load_csv_with_fallbacks(&path).context(format!("Reading {}", path.display()))?
        };

        restrict_to_season(df, season)
    }

    fn name(&self) -> &str {
        "file"
    }
}

fn is_parquet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"))
}

/// Load CSV with a bounded schema scan first, then a full scan.
///
/// Play-by-play columns are often empty for thousands of rows before the
/// first value appears, which defeats a bounded inference window.
pub(crate) fn load_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Bounded schema inference failed: {}", e);
        }
    }

    CsvReadOptions::default()
        .with_infer_schema_length(None)
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .map_err(ReportError::from)
}

/// Keep only rows of `season` when the table has a `season` column.
pub(crate) fn restrict_to_season(df: DataFrame, season: u16) -> Result<DataFrame> {
    if df.column("season").is_err() {
        return Ok(df);
    }

    let total = df.height();
    let filtered = df
        .lazy()
        .filter(col("season").cast(DataType::Int64).eq(lit(season as i64)))
        .collect()?;

    if total > 0 && filtered.height() == 0 {
        return Err(ReportError::SeasonNotFound(season));
    }

    debug!(
        "Restricted table to season {}: {} of {} rows",
        season,
        filtered.height(),
        total
    );
    Ok(filtered)
}
