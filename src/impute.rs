//! Per-column imputation of missing values.
//!
//! Numeric columns are filled with a single scalar (median or mean of the
//! non-null population); categorical columns are filled with the mode. A
//! column whose non-null population is empty is left untouched: no strategy
//! can synthesize a value from zero data points.

use crate::config::NumericStrategy;
use crate::error::Result;
use crate::utils::{fill_numeric_nulls, fill_string_nulls, string_mode};
use polars::prelude::*;
use tracing::debug;

/// Statistical imputation over single columns of a DataFrame.
pub struct Imputer;

impl Imputer {
    /// Compute the fill scalar for a numeric series under the given strategy.
    ///
    /// Returns `None` when the series has no non-null values.
    pub fn numeric_fill_value(series: &Series, strategy: NumericStrategy) -> Option<f64> {
        match strategy {
            NumericStrategy::Median => series.median(),
            NumericStrategy::Mean => series.mean(),
        }
    }

    /// Fill missing values in a numeric column in place.
    ///
    /// Returns the scalar used, or `None` if the column was all-null and
    /// left untouched. The filled column is materialized as `Float64`.
    pub fn fill_numeric(
        df: &mut DataFrame,
        col_name: &str,
        strategy: NumericStrategy,
    ) -> Result<Option<f64>> {
        let series = df.column(col_name)?.as_materialized_series().clone();

        let Some(fill_value) = Self::numeric_fill_value(&series, strategy) else {
            debug!(column = col_name, "no non-null values, skipping numeric fill");
            return Ok(None);
        };

        let filled = fill_numeric_nulls(&series, fill_value)?;
        df.replace(col_name, filled)?;

        debug!(
            column = col_name,
            strategy = strategy.as_str(),
            fill_value,
            "filled numeric column"
        );
        Ok(Some(fill_value))
    }

    /// Fill missing values in a categorical column with its mode, in place.
    ///
    /// Returns the mode used, or `None` if the column was all-null and left
    /// untouched. Mode ties break by first appearance in row order.
    pub fn fill_mode(df: &mut DataFrame, col_name: &str) -> Result<Option<String>> {
        let series = df.column(col_name)?.as_materialized_series().clone();

        let Some(mode_value) = string_mode(&series) else {
            debug!(column = col_name, "no non-null values, skipping mode fill");
            return Ok(None);
        };

        let filled = fill_string_nulls(&series, &mode_value)?;
        df.replace(col_name, filled)?;

        debug!(column = col_name, mode = %mode_value, "filled categorical column");
        Ok(Some(mode_value))
    }
}
