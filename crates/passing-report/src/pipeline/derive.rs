//! Derived columns added to the final pass table.

use crate::error::Result;
use crate::schema::{AIR_YARD_CATEGORY, AIR_YARDS, EXPORT_COLUMNS, WEEK, WEEKLY_COUNTS};
use crate::types::AirYardCategory;
use crate::utils::{float_values, int_values};
use polars::prelude::*;
use std::collections::HashMap;

/// Add `air_yard_category` holding the bin label of each pass.
///
/// Missing or out-of-range air yards produce a null label.
pub fn add_air_yard_category(mut df: DataFrame) -> Result<DataFrame> {
    let labels: Vec<Option<&str>> = float_values(&df, AIR_YARDS)?
        .into_iter()
        .map(|air_yards| {
            air_yards
                .and_then(AirYardCategory::from_air_yards)
                .map(|category| category.label())
        })
        .collect();

    df.with_column(Series::new(AIR_YARD_CATEGORY.into(), labels))?;
    Ok(df)
}

/// Add `weekly_counts`: the number of rows sharing each row's week.
///
/// Rows with a missing week get a null count.
pub fn add_weekly_counts(mut df: DataFrame) -> Result<DataFrame> {
    let weeks = int_values(&df, WEEK)?;

    let mut per_week: HashMap<i64, i64> = HashMap::new();
    for week in weeks.iter().flatten() {
        *per_week.entry(*week).or_insert(0) += 1;
    }

    let counts: Vec<Option<i64>> = weeks
        .iter()
        .map(|week| week.and_then(|w| per_week.get(&w).copied()))
        .collect();

    df.with_column(Series::new(WEEKLY_COUNTS.into(), counts))?;
    Ok(df)
}

/// Select the export columns in their fixed order.
pub fn project_export_columns(df: &DataFrame) -> Result<DataFrame> {
    Ok(df.select(EXPORT_COLUMNS)?)
}
