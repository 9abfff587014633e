//! Shared helpers for column classification and null handling.
//!
//! Column kind is classified once per operation from the declared Polars
//! dtype, never per cell.

use polars::prelude::*;

/// Kind of a column for preprocessing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Integer or floating point numbers
    Numeric,
    /// Everything else (string, categorical, boolean, ...)
    Categorical,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Classify a dtype as numeric or categorical.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Fraction of null cells in a series, in [0, 1]. Empty series count as 0.
pub fn missing_fraction(series: &Series) -> f64 {
    if series.is_empty() {
        0.0
    } else {
        series.null_count() as f64 / series.len() as f64
    }
}

/// Extract a series as `f64` values, preserving nulls.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().collect())
}

/// Calculate the mode (most frequent non-null value) of a series.
///
/// Ties break deterministically: among equally frequent values, the one
/// whose first occurrence comes earliest in row order wins. Returns `None`
/// when the series has no non-null values.
pub fn string_mode(series: &Series) -> Option<String> {
    let strs = series.cast(&DataType::String).ok()?;
    let ca = strs.str().ok()?;

    // counts kept in first-appearance order so the earliest value wins ties
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for val in ca.into_iter().flatten() {
        match counts.iter_mut().find(|(v, _)| *v == val) {
            Some((_, n)) => *n += 1,
            None => counts.push((val, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (val, n) in counts {
        if best.is_none_or(|(_, m)| n > m) {
            best = Some((val, n));
        }
    }
    best.map(|(val, _)| val.to_string())
}

/// Fill null values in a numeric series with a specific value.
///
/// The result is always materialized as `Float64`.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let floats = series.cast(&DataType::Float64)?;
    let filled: Vec<f64> = floats
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Fill null values in a string-like series with a specific value.
///
/// Non-string columns (e.g. boolean) are cast to string first.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let strs = series.cast(&DataType::String)?;
    let filled: Vec<&str> = strs
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}
