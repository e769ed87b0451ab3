//! Column names of the play-by-play table and schema validation.

use crate::error::{ReportError, Result};
use polars::prelude::*;

pub const PLAY_ID: &str = "play_id";
pub const WEEK: &str = "week";
pub const POSTEAM: &str = "posteam";
pub const PLAY_TYPE: &str = "play_type";
pub const PASSER: &str = "passer_player_name";
pub const PASS_LOCATION: &str = "pass_location";
pub const AIR_YARDS: &str = "air_yards";
pub const YARDS_GAINED: &str = "yards_gained";
pub const INCOMPLETE_PASS: &str = "incomplete_pass";
pub const SACK: &str = "sack";
pub const XPASS: &str = "xpass";
pub const EXTRA_POINT_ATTEMPT: &str = "extra_point_attempt";
pub const TWO_POINT_ATTEMPT: &str = "two_point_attempt";

pub const RUN_LEANING_PASS: &str = "run_leaning_pass";
pub const AIR_YARD_CATEGORY: &str = "air_yard_category";
pub const WEEKLY_COUNTS: &str = "weekly_counts";

/// Play type value of passing plays.
pub const PASS_PLAY: &str = "pass";

/// Columns of the exported table, in output order.
pub const EXPORT_COLUMNS: [&str; 30] = [
    PLAY_ID,
    "game_id",
    WEEK,
    "desc",
    POSTEAM,
    "defteam",
    "down",
    "ydstogo",
    "yardline_100",
    "qtr",
    "game_seconds_remaining",
    "score_differential",
    PLAY_TYPE,
    PASSER,
    "receiver_player_name",
    PASS_LOCATION,
    AIR_YARDS,
    "yards_after_catch",
    "passing_yards",
    "complete_pass",
    INCOMPLETE_PASS,
    SACK,
    "interception",
    "touchdown",
    "first_down_pass",
    "epa",
    "cpoe",
    XPASS,
    AIR_YARD_CATEGORY,
    WEEKLY_COUNTS,
];

/// Columns read by the filters and statistics but not exported.
const FILTER_ONLY_COLUMNS: [&str; 3] = [YARDS_GAINED, EXTRA_POINT_ATTEMPT, TWO_POINT_ATTEMPT];

/// Every provider column the report needs, in table order where it matters.
pub fn required_columns() -> Vec<&'static str> {
    EXPORT_COLUMNS
        .iter()
        .copied()
        .filter(|name| !is_derived(name))
        .chain(FILTER_ONLY_COLUMNS)
        .collect()
}

/// Whether the column is produced by the pipeline rather than the provider.
pub fn is_derived(name: &str) -> bool {
    matches!(name, RUN_LEANING_PASS | AIR_YARD_CATEGORY | WEEKLY_COUNTS)
}

/// Fail with [`ReportError::MissingColumns`] if any provider column is absent.
pub fn validate_schema(df: &DataFrame) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let missing: Vec<String> = required_columns()
        .into_iter()
        .filter(|name| !present.iter().any(|p| p == name))
        .map(String::from)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReportError::MissingColumns(missing))
    }
}
