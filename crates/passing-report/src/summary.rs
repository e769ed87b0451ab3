//! Season statistics over the final pass table.
//!
//! All functions take the post-exclusion table: one row per attempt.

use crate::error::Result;
use crate::schema::{AIR_YARDS, INCOMPLETE_PASS, PASS_LOCATION, POSTEAM, WEEK, YARDS_GAINED};
use crate::types::{
    AirYardCategory, LocationDepthTable, LocationShare, PassLocation, PassingSummary, WeeklyCount,
};
use crate::utils::{
    column_series, count_flag, float_values, int_values, ratio, share, string_mode, string_values,
    sum_values,
};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Compute the passing summary.
///
/// `sacks` and `run_leaning_passes` are counted before exclusion and passed
/// in, since the final table no longer holds sacked dropbacks.
pub fn summarize(plays: &DataFrame, sacks: usize, run_leaning_passes: usize) -> Result<PassingSummary> {
    let attempts = plays.height();
    let total_passing_yards = sum_values(plays, YARDS_GAINED)?;
    let incompletions = count_flag(plays, INCOMPLETE_PASS, 1.0)?;
    let completions = count_flag(plays, INCOMPLETE_PASS, 0.0)?;

    let mut location_counts = [0usize; 3];
    for location in string_values(plays, PASS_LOCATION)?.into_iter().flatten() {
        if let Some(location) = PassLocation::parse(&location) {
            location_counts[location.index()] += 1;
        }
    }

    let locations = PassLocation::ALL
        .iter()
        .map(|location| {
            let count = location_counts[location.index()];
            LocationShare {
                location: *location,
                count,
                percentage: share(count, attempts).map(|s| s * 100.0),
            }
        })
        .collect();

    debug!(
        "Summary: {} attempts, {} completions, {} yards",
        attempts, completions, total_passing_yards
    );

    Ok(PassingSummary {
        total_passing_yards,
        attempts,
        completions,
        incompletions,
        completion_ratio: share(completions, attempts),
        yards_per_attempt: ratio(total_passing_yards, attempts),
        yards_per_completion: ratio(total_passing_yards, completions),
        locations,
        sacks,
        sack_rate: share(sacks, attempts + sacks),
        run_leaning_passes,
    })
}

/// Cross-tabulate passes by location and air-yard bin.
pub fn location_depth_table(plays: &DataFrame) -> Result<LocationDepthTable> {
    let locations = string_values(plays, PASS_LOCATION)?;
    let air_yards = float_values(plays, AIR_YARDS)?;

    let mut table = LocationDepthTable::empty();
    for (location, air_yards) in locations.iter().zip(air_yards) {
        table.add(
            location.as_deref().and_then(PassLocation::parse),
            air_yards.and_then(AirYardCategory::from_air_yards),
        );
    }

    if table.unclassified > 0 {
        debug!(
            "{} passes lack a location or air-yard bin",
            table.unclassified
        );
    }
    Ok(table)
}

/// Attempts per week, in week order. Rows without a week are skipped.
pub fn weekly_attempts(plays: &DataFrame) -> Result<Vec<WeeklyCount>> {
    let mut per_week: BTreeMap<i64, usize> = BTreeMap::new();
    for week in int_values(plays, WEEK)?.into_iter().flatten() {
        *per_week.entry(week).or_insert(0) += 1;
    }

    Ok(per_week
        .into_iter()
        .map(|(week, attempts)| WeeklyCount { week, attempts })
        .collect())
}

/// Most frequent offensive team of the passes, if any.
pub fn team_label(plays: &DataFrame) -> Result<Option<String>> {
    Ok(string_mode(column_series(plays, POSTEAM)?))
}
