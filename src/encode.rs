//! One-hot encoding of categorical columns.
//!
//! Each distinct observed value becomes one 0/1 indicator column named
//! `{column}_{value}`. Nulls that survived imputation get their own
//! `{column}_null` indicator, so each row carries exactly one `1` across the
//! indicators derived from a single source column. No base category is
//! dropped.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Expand one categorical series into its indicator series.
///
/// Indicator order follows the first appearance of each distinct value when
/// scanning rows top to bottom; the null category slots where the first null
/// appears. A zero-row series yields no indicators.
pub fn onehot_expand(series: &Series) -> Result<Vec<Series>> {
    let name = series.name().as_str();
    let strs = series.cast(&DataType::String)?;
    let values: Vec<Option<&str>> = strs.str()?.into_iter().collect();

    // distinct categories in first-appearance order; None is the null category
    let mut categories: Vec<Option<&str>> = Vec::new();
    for val in &values {
        if !categories.contains(val) {
            categories.push(*val);
        }
    }

    let mut indicators = Vec::with_capacity(categories.len());
    for category in &categories {
        let indicator_name = match category {
            Some(val) => format!("{name}_{val}"),
            None => format!("{name}_null"),
        };
        let flags: Vec<i32> = values.iter().map(|val| (val == category) as i32).collect();
        indicators.push(Series::new(indicator_name.into(), flags));
    }

    debug!(
        column = name,
        categories = categories.len(),
        "one-hot encoded column"
    );
    Ok(indicators)
}
