//! Row filters that narrow a season table down to one passer's attempts.
//!
//! Flag columns are cast to `Float64` before comparison because providers
//! deliver them as floats (nflverse), integers (CSV) or booleans.

use crate::error::{ReportError, Result};
use crate::schema::{
    EXTRA_POINT_ATTEMPT, PASS_PLAY, PASSER, PLAY_TYPE, RUN_LEANING_PASS, SACK, TWO_POINT_ATTEMPT,
    XPASS,
};
use crate::utils::{count_flag, string_values, sum_values};
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Drop rows without a play type (quarter ends, two-minute warnings, ...).
pub fn drop_non_plays(df: DataFrame) -> Result<DataFrame> {
    let before = df.height();
    let filtered = df.lazy().filter(col(PLAY_TYPE).is_not_null()).collect()?;
    debug!(
        "Dropped {} rows without a play type",
        before - filtered.height()
    );
    Ok(filtered)
}

/// Keep only passing plays.
pub fn keep_pass_plays(df: DataFrame) -> Result<DataFrame> {
    Ok(df
        .lazy()
        .filter(col(PLAY_TYPE).cast(DataType::String).eq(lit(PASS_PLAY)))
        .collect()?)
}

/// Keep the passes thrown by `player` (exact, case-sensitive match).
///
/// # Errors
///
/// Returns [`ReportError::NoMatchingPlays`] when nothing matches, with any
/// passers of the same surname as suggestions.
pub fn keep_passer(df: DataFrame, player: &str, season: u16) -> Result<DataFrame> {
    let passes = df
        .clone()
        .lazy()
        .filter(col(PASSER).cast(DataType::String).eq(lit(player)))
        .collect()?;

    if passes.height() == 0 {
        return Err(ReportError::NoMatchingPlays {
            player: player.to_string(),
            season,
            suggestions: passer_suggestions(&df, player)?,
        });
    }

    Ok(passes)
}

/// Passer names sharing the surname of `player`, compared case-insensitively.
pub fn passer_suggestions(df: &DataFrame, player: &str) -> Result<Vec<String>> {
    let wanted = surname(player).to_lowercase();
    if wanted.is_empty() {
        return Ok(Vec::new());
    }

    let names: BTreeSet<String> = string_values(df, PASSER)?
        .into_iter()
        .flatten()
        .filter(|name| name != player && surname(name).to_lowercase() == wanted)
        .collect();

    Ok(names.into_iter().collect())
}

/// "J.Dart" -> "Dart", "A.St. Brown" -> "St. Brown", "Dart" -> "Dart".
fn surname(name: &str) -> &str {
    name.split_once('.')
        .map_or(name, |(_, rest)| rest)
        .trim()
}

/// Number of sacked dropbacks.
pub fn count_sacks(df: &DataFrame) -> Result<usize> {
    count_flag(df, SACK, 1.0)
}

/// Add the 0/1 `run_leaning_pass` column.
///
/// A pass is run-leaning when its expected-pass probability is at or below
/// `threshold`. A missing probability counts as not run-leaning.
pub fn add_run_leaning_flag(df: DataFrame, threshold: f64) -> Result<DataFrame> {
    Ok(df
        .lazy()
        .with_column(
            when(col(XPASS).cast(DataType::Float64).lt_eq(lit(threshold)))
                .then(lit(1i64))
                .otherwise(lit(0i64))
                .alias(RUN_LEANING_PASS),
        )
        .collect()?)
}

/// Sum of the `run_leaning_pass` column.
pub fn count_run_leaning(df: &DataFrame) -> Result<usize> {
    Ok(sum_values(df, RUN_LEANING_PASS)? as usize)
}

/// Remove sacks, extra-point and two-point attempts.
///
/// Only a flag equal to 1 excludes a row; a missing flag keeps it.
pub fn exclude_non_attempts(df: DataFrame) -> Result<DataFrame> {
    let not_flagged = |name: &str| col(name).cast(DataType::Float64).neq_missing(lit(1.0));

    let before = df.height();
    let filtered = df
        .lazy()
        .filter(
            not_flagged(SACK)
                .and(not_flagged(EXTRA_POINT_ATTEMPT))
                .and(not_flagged(TWO_POINT_ATTEMPT)),
        )
        .collect()?;

    debug!(
        "Excluded {} sacks and conversion attempts",
        before - filtered.height()
    );
    Ok(filtered)
}
