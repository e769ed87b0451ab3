//! Shared utilities for reading play-by-play columns.
//!
//! Provider tables are loosely typed (flags arrive as floats, integers or
//! booleans depending on the file format), so every accessor here casts to
//! a single Rust type before handing values out.

use crate::error::{ReportError, Result};
use polars::prelude::*;
use std::collections::HashMap;

// =============================================================================
// Column Accessors
// =============================================================================

/// Fetch a column as a Series, mapping a missing column to a typed error.
pub fn column_series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|column| column.as_materialized_series())
        .map_err(|_| ReportError::ColumnNotFound(name.to_string()))
}

/// Read a column as `f64` values; unparseable entries become `None`.
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = column_series(df, name)?.cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

/// Read a column as `i64` values; unparseable entries become `None`.
pub fn int_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let series = column_series(df, name)?.cast(&DataType::Int64)?;
    Ok(series.i64()?.into_iter().collect())
}

/// Read a column as owned strings.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = column_series(df, name)?.cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_owned))
        .collect())
}

/// Count rows whose numeric flag equals `value` exactly. Nulls never match.
pub fn count_flag(df: &DataFrame, name: &str, value: f64) -> Result<usize> {
    Ok(float_values(df, name)?
        .into_iter()
        .filter(|flag| *flag == Some(value))
        .count())
}

/// Sum a numeric column, skipping nulls.
pub fn sum_values(df: &DataFrame, name: &str) -> Result<f64> {
    Ok(float_values(df, name)?.into_iter().flatten().sum())
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Calculate the mode (most frequent value) of a string Series.
///
/// Ties resolve to the lexicographically smallest value so results are stable.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let str_series = non_null.cast(&DataType::String).ok()?;
    let str_chunked = str_series.str().ok()?;

    let mut value_counts: HashMap<&str, usize> = HashMap::new();
    for val in str_chunked.into_iter().flatten() {
        *value_counts.entry(val).or_insert(0) += 1;
    }

    value_counts
        .into_iter()
        .max_by(|(a_val, a_count), (b_val, b_count)| {
            a_count.cmp(b_count).then_with(|| b_val.cmp(a_val))
        })
        .map(|(val, _)| val.to_string())
}

/// Fraction of `part` in `whole`, or `None` when `whole` is zero.
pub fn share(part: usize, whole: usize) -> Option<f64> {
    ratio(part as f64, whole)
}

/// `numerator / denominator`, or `None` when the denominator is zero.
pub fn ratio(numerator: f64, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator / denominator as f64)
    }
}

// =============================================================================
// Tests
// =============================================================================
