//! Normalization of numeric columns and the fitted parameters it produces.
//!
//! Two methods: min-max rescaling to [0, 1] and standard-score scaling to
//! zero mean / unit variance. The standard deviation is the population
//! deviation (ddof = 0). Degenerate columns (zero range or zero variance)
//! are forced to the constant 0 rather than dividing by zero. Statistics are
//! computed over non-null values only; nulls pass through unchanged.

use crate::error::Result;
use crate::utils::numeric_values;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Fitted min/max of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxStats {
    pub min: f64,
    pub max: f64,
}

/// Fitted mean and population standard deviation of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StdStats {
    pub mean: f64,
    pub std: f64,
}

/// Fitted normalization parameters, tagged by method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum NormalizationParams {
    MinMax { columns: HashMap<String, MinMaxStats> },
    Std { columns: HashMap<String, StdStats> },
}

/// Min-max scale a numeric series.
///
/// Returns the scaled series and the fitted stats, or `None` when the
/// series has no non-null values.
pub fn minmax_scale(series: &Series) -> Result<Option<(Series, MinMaxStats)>> {
    let values = numeric_values(series)?;
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return Ok(None);
    }

    let min = present.iter().copied().fold(f64::INFINITY, f64::min);
    let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let scaled: Vec<Option<f64>> = values
        .iter()
        .map(|v| v.map(|x| if range == 0.0 { 0.0 } else { (x - min) / range }))
        .collect();

    debug!(column = series.name().as_str(), min, max, "min-max scaled column");
    Ok(Some((
        Series::new(series.name().clone(), scaled),
        MinMaxStats { min, max },
    )))
}

/// Standard-score scale a numeric series.
///
/// Returns the scaled series and the fitted stats, or `None` when the
/// series has no non-null values.
pub fn std_scale(series: &Series) -> Result<Option<(Series, StdStats)>> {
    let values = numeric_values(series)?;
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return Ok(None);
    }

    let n = present.len() as f64;
    let mean = present.iter().sum::<f64>() / n;
    let variance = present.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    let scaled: Vec<Option<f64>> = values
        .iter()
        .map(|v| v.map(|x| if std == 0.0 { 0.0 } else { (x - mean) / std }))
        .collect();

    debug!(column = series.name().as_str(), mean, std, "standard scaled column");
    Ok(Some((
        Series::new(series.name().clone(), scaled),
        StdStats { mean, std },
    )))
}
