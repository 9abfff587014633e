//! The stateful [`Preprocessor`] wrapping a single DataFrame.
//!
//! Operations run in sequence, each replacing the wrapped frame and caching
//! fitted parameters (removed columns, fill values, encoded column list,
//! normalization statistics) for later inspection. The frame is cloned on
//! construction; mutation happens by whole-column replacement, so the
//! caller's original frame is never modified.

use crate::config::{CategoricalStrategy, NormalizeMethod, NumericStrategy};
use crate::encode::onehot_expand;
use crate::error::{PrepError, Result};
use crate::impute::Imputer;
use crate::normalize::{NormalizationParams, minmax_scale, std_scale};
use crate::utils::{ColumnKind, column_kind, missing_fraction};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

/// Stateful preprocessor for one tabular dataset.
///
/// # Example
///
/// ```rust,ignore
/// use table_prep::{NormalizeMethod, NumericStrategy, Preprocessor};
/// use polars::prelude::*;
///
/// let df = df![
///     "age" => [Some(90.0), Some(85.0), None, None, Some(40.0)],
///     "color" => [Some("red"), Some("red"), Some("blue"), None, Some("red")],
/// ]?;
///
/// let mut prep = Preprocessor::new(&df);
/// let cleaned = prep.fit_transform(0.5, NumericStrategy::Median, NormalizeMethod::MinMax)?;
/// ```
#[derive(Debug, Clone)]
pub struct Preprocessor {
    df: DataFrame,
    removed_columns: Vec<String>,
    numeric_fill_values: HashMap<String, f64>,
    categorical_fill_values: HashMap<String, String>,
    onehot_columns: Vec<String>,
    indicator_columns: Vec<String>,
    normalization: Option<NormalizationParams>,
}

impl Preprocessor {
    /// Create a preprocessor owning a copy of the given frame.
    pub fn new(df: &DataFrame) -> Self {
        Self {
            df: df.clone(),
            removed_columns: Vec::new(),
            numeric_fill_values: HashMap::new(),
            categorical_fill_values: HashMap::new(),
            onehot_columns: Vec::new(),
            indicator_columns: Vec::new(),
            normalization: None,
        }
    }

    /// The current state of the wrapped frame.
    pub fn data(&self) -> &DataFrame {
        &self.df
    }

    /// Consume the preprocessor, returning the wrapped frame.
    pub fn into_data(self) -> DataFrame {
        self.df
    }

    /// Names of columns dropped for excess missingness.
    pub fn removed_columns(&self) -> &[String] {
        &self.removed_columns
    }

    /// Per-column scalars used to fill missing numeric entries.
    pub fn numeric_fill_values(&self) -> &HashMap<String, f64> {
        &self.numeric_fill_values
    }

    /// Per-column modes used to fill missing categorical entries.
    pub fn categorical_fill_values(&self) -> &HashMap<String, String> {
        &self.categorical_fill_values
    }

    /// Full column-name list recorded after one-hot encoding.
    pub fn onehot_columns(&self) -> &[String] {
        &self.onehot_columns
    }

    /// Names of the generated 0/1 indicator columns.
    pub fn indicator_columns(&self) -> &[String] {
        &self.indicator_columns
    }

    /// Fitted normalization parameters, if `normalize_numeric` has run.
    pub fn normalization(&self) -> Option<&NormalizationParams> {
        self.normalization.as_ref()
    }

    /// Drop columns whose missing fraction exceeds `threshold` and impute
    /// the rest.
    ///
    /// `threshold` is a fraction in `[0, 1]`; a column is kept iff its
    /// missing fraction is `<= threshold`. Kept numeric columns are filled
    /// with their median or mean per `numeric_strategy` (and materialized
    /// as `Float64`); kept categorical columns with missing values are
    /// filled with their mode. Columns whose non-null population is empty
    /// keep their nulls. Returns the filled, kept-columns frame.
    pub fn remove_missing(
        &mut self,
        threshold: f64,
        numeric_strategy: NumericStrategy,
        categorical_strategy: CategoricalStrategy,
    ) -> Result<DataFrame> {
        let (kept, _) =
            self.remove_missing_with_removed(threshold, numeric_strategy, categorical_strategy)?;
        Ok(kept)
    }

    /// Like [`remove_missing`](Self::remove_missing), but also returns the
    /// removed columns as a side frame in their original order.
    pub fn remove_missing_with_removed(
        &mut self,
        threshold: f64,
        numeric_strategy: NumericStrategy,
        categorical_strategy: CategoricalStrategy,
    ) -> Result<(DataFrame, DataFrame)> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(PrepError::InvalidArgument(format!(
                "threshold must be a fraction in [0, 1], got {threshold}"
            )));
        }

        info!(
            threshold,
            numeric_strategy = numeric_strategy.as_str(),
            categorical_strategy = categorical_strategy.as_str(),
            "removing high-missingness columns and imputing the rest"
        );

        let mut kept_names: Vec<String> = Vec::new();
        let mut removed_names: Vec<String> = Vec::new();
        for col in self.df.get_columns() {
            let series = col.as_materialized_series();
            let fraction = missing_fraction(series);
            if fraction > threshold {
                debug!(
                    column = col.name().as_str(),
                    fraction, "dropping column for excess missingness"
                );
                removed_names.push(col.name().to_string());
            } else {
                kept_names.push(col.name().to_string());
            }
        }

        let removed_df = self.df.select(removed_names.iter().map(String::as_str))?;
        let mut filtered = self.df.select(kept_names.iter().map(String::as_str))?;

        self.numeric_fill_values.clear();
        self.categorical_fill_values.clear();

        // classify once per column, then fill
        let kept_kinds: Vec<(String, ColumnKind, usize)> = filtered
            .get_columns()
            .iter()
            .map(|c| (c.name().to_string(), column_kind(c.dtype()), c.null_count()))
            .collect();

        for (name, kind, null_count) in kept_kinds {
            match kind {
                ColumnKind::Numeric => {
                    if let Some(fill) =
                        Imputer::fill_numeric(&mut filtered, &name, numeric_strategy)?
                    {
                        self.numeric_fill_values.insert(name, fill);
                    }
                }
                ColumnKind::Categorical => {
                    if null_count > 0
                        && let Some(mode) = Imputer::fill_mode(&mut filtered, &name)?
                    {
                        self.categorical_fill_values.insert(name, mode);
                    }
                }
            }
        }

        info!(
            kept = filtered.width(),
            removed = removed_df.width(),
            "missing-value handling complete"
        );

        self.removed_columns = removed_names;
        self.df = filtered.clone();
        Ok((filtered, removed_df))
    }

    /// One-hot encode every categorical column in the current frame.
    ///
    /// Each distinct observed value becomes an `Int32` 0/1 indicator column
    /// named `{column}_{value}` (nulls get `{column}_null`); source columns
    /// are dropped. Untouched columns keep their original order; indicator
    /// groups are appended after them. Returns the encoded frame.
    pub fn encode_categorical(&mut self) -> Result<DataFrame> {
        let mut passthrough: Vec<Column> = Vec::new();
        let mut indicators: Vec<Column> = Vec::new();
        let mut indicator_names: Vec<String> = Vec::new();

        for col in self.df.get_columns() {
            match column_kind(col.dtype()) {
                ColumnKind::Numeric => passthrough.push(col.clone()),
                ColumnKind::Categorical => {
                    for series in onehot_expand(col.as_materialized_series())? {
                        indicator_names.push(series.name().to_string());
                        indicators.push(series.into_column());
                    }
                }
            }
        }

        passthrough.extend(indicators);
        let encoded = DataFrame::new(passthrough)?;

        info!(
            indicators = indicator_names.len(),
            columns = encoded.width(),
            "one-hot encoding complete"
        );

        self.onehot_columns = encoded
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        self.indicator_columns = indicator_names;
        self.df = encoded.clone();
        Ok(encoded)
    }

    /// Normalize every numeric column in the current frame.
    ///
    /// Indicator columns generated by
    /// [`encode_categorical`](Self::encode_categorical) are excluded: they
    /// are already bounded in `[0, 1]` and rescaling them is meaningless.
    /// Normalized columns are materialized as `Float64`; degenerate columns
    /// (zero range or zero variance) become the constant 0. Returns the
    /// normalized frame and stores the fitted statistics.
    pub fn normalize_numeric(&mut self, method: NormalizeMethod) -> Result<DataFrame> {
        info!(method = method.as_str(), "normalizing numeric columns");

        let targets: Vec<String> = self
            .df
            .get_columns()
            .iter()
            .filter(|c| {
                column_kind(c.dtype()) == ColumnKind::Numeric
                    && !self.indicator_columns.iter().any(|n| n == c.name().as_str())
            })
            .map(|c| c.name().to_string())
            .collect();

        match method {
            NormalizeMethod::MinMax => {
                let mut columns = HashMap::new();
                for name in targets {
                    let series = self.df.column(&name)?.as_materialized_series().clone();
                    if let Some((scaled, stats)) = minmax_scale(&series)? {
                        self.df.replace(&name, scaled)?;
                        columns.insert(name, stats);
                    }
                }
                self.normalization = Some(NormalizationParams::MinMax { columns });
            }
            NormalizeMethod::Std => {
                let mut columns = HashMap::new();
                for name in targets {
                    let series = self.df.column(&name)?.as_materialized_series().clone();
                    if let Some((scaled, stats)) = std_scale(&series)? {
                        self.df.replace(&name, scaled)?;
                        columns.insert(name, stats);
                    }
                }
                self.normalization = Some(NormalizationParams::Std { columns });
            }
        }

        Ok(self.df.clone())
    }

    /// Run the full cleaning sequence: missing-value handling (categorical
    /// strategy fixed to mode), then one-hot encoding, then normalization.
    ///
    /// Encoding must follow imputation so indicator columns reflect the
    /// filled values, and normalization follows encoding so the freshly
    /// generated indicators can be recognized and skipped. Returns the
    /// final frame; the removed-columns side channel is not available in
    /// this mode.
    pub fn fit_transform(
        &mut self,
        threshold: f64,
        numeric_strategy: NumericStrategy,
        method: NormalizeMethod,
    ) -> Result<DataFrame> {
        self.remove_missing(threshold, numeric_strategy, CategoricalStrategy::Mode)?;
        self.encode_categorical()?;
        self.normalize_numeric(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn column_values(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_new_does_not_mutate_caller_frame() {
        let df = df![
            "age" => [Some(1.0), None, Some(3.0)],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        prep.remove_missing(0.5, NumericStrategy::Median, CategoricalStrategy::Mode)
            .unwrap();

        // caller's frame still has its null
        assert_eq!(df.column("age").unwrap().null_count(), 1);
        assert_eq!(prep.data().column("age").unwrap().null_count(), 0);
    }

    #[test]
    fn test_remove_missing_partitions_by_threshold() {
        let df = df![
            "kept" => [Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)],     // 20% missing
            "dropped" => [None, None, None, Some(1.0), Some(2.0)],             // 60% missing
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let (kept, removed) = prep
            .remove_missing_with_removed(0.5, NumericStrategy::Median, CategoricalStrategy::Mode)
            .unwrap();

        assert_eq!(kept.width(), 1);
        assert!(kept.column("kept").is_ok());
        assert_eq!(removed.width(), 1);
        assert!(removed.column("dropped").is_ok());
        assert_eq!(prep.removed_columns(), &["dropped".to_string()]);
    }

    #[test]
    fn test_remove_missing_median_scenario() {
        // 2 of 5 missing (40%), threshold 0.5: kept, filled with median 85
        let df = df![
            "age" => [Some(90.0), Some(85.0), None, None, Some(40.0)],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let cleaned = prep
            .remove_missing(0.5, NumericStrategy::Median, CategoricalStrategy::Mode)
            .unwrap();

        assert_eq!(
            column_values(&cleaned, "age"),
            vec![90.0, 85.0, 85.0, 85.0, 40.0]
        );
        assert_eq!(prep.numeric_fill_values().get("age"), Some(&85.0));
    }

    #[test]
    fn test_remove_missing_boundary_fraction_is_kept() {
        // exactly at threshold: fraction <= threshold keeps the column
        let df = df![
            "half" => [Some(1.0), None],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let cleaned = prep
            .remove_missing(0.5, NumericStrategy::Median, CategoricalStrategy::Mode)
            .unwrap();

        assert_eq!(cleaned.width(), 1);
        assert!(prep.removed_columns().is_empty());
    }

    #[test]
    fn test_remove_missing_categorical_mode_fill() {
        let df = df![
            "color" => [Some("red"), Some("red"), Some("blue"), None],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let cleaned = prep
            .remove_missing(0.5, NumericStrategy::Median, CategoricalStrategy::Mode)
            .unwrap();

        assert_eq!(cleaned.column("color").unwrap().null_count(), 0);
        assert_eq!(
            prep.categorical_fill_values().get("color"),
            Some(&"red".to_string())
        );
    }

    #[test]
    fn test_remove_missing_all_null_column_stays_null() {
        let df = df![
            "void" => [Option::<f64>::None, None, None],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let cleaned = prep
            .remove_missing(1.0, NumericStrategy::Median, CategoricalStrategy::Mode)
            .unwrap();

        assert_eq!(cleaned.column("void").unwrap().null_count(), 3);
        assert!(prep.numeric_fill_values().is_empty());
    }

    #[test]
    fn test_remove_missing_rejects_bad_threshold() {
        let df = df![
            "x" => [Some(1.0), None],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let err = prep
            .remove_missing(1.5, NumericStrategy::Median, CategoricalStrategy::Mode)
            .unwrap_err();

        assert!(matches!(err, PrepError::InvalidArgument(_)));
        // no mutation happened
        assert_eq!(prep.data().column("x").unwrap().null_count(), 1);
    }

    #[test]
    fn test_encode_categorical_scenario() {
        let df = df![
            "color" => ["red", "red", "blue", "red"],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let encoded = prep.encode_categorical().unwrap();

        let names: Vec<String> = encoded
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["color_red", "color_blue"]);

        let red: Vec<i32> = encoded
            .column("color_red")
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(red, vec![1, 1, 0, 1]);
        assert_eq!(prep.onehot_columns(), &["color_red", "color_blue"]);
        assert_eq!(prep.indicator_columns(), &["color_red", "color_blue"]);
    }

    #[test]
    fn test_encode_categorical_preserves_numeric_order() {
        let df = df![
            "a" => [1.0, 2.0],
            "cat" => ["x", "y"],
            "b" => [3.0, 4.0],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let encoded = prep.encode_categorical().unwrap();

        let names: Vec<String> = encoded
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "cat_x", "cat_y"]);
    }

    #[test]
    fn test_normalize_minmax() {
        let df = df![
            "x" => [0.0, 5.0, 10.0],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let normalized = prep.normalize_numeric(NormalizeMethod::MinMax).unwrap();

        assert_eq!(column_values(&normalized, "x"), vec![0.0, 0.5, 1.0]);
        match prep.normalization().unwrap() {
            NormalizationParams::MinMax { columns } => {
                let stats = columns.get("x").unwrap();
                assert_eq!(stats.min, 0.0);
                assert_eq!(stats.max, 10.0);
            }
            other => panic!("expected minmax params, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_constant_column_becomes_zero() {
        let df = df![
            "flat" => [4.0, 4.0, 4.0],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let normalized = prep.normalize_numeric(NormalizeMethod::MinMax).unwrap();

        assert_eq!(column_values(&normalized, "flat"), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalize_std_zero_mean() {
        let df = df![
            "x" => [1.0, 2.0, 3.0],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let normalized = prep.normalize_numeric(NormalizeMethod::Std).unwrap();

        let vals = column_values(&normalized, "x");
        let mean: f64 = vals.iter().sum::<f64>() / vals.len() as f64;
        assert!(mean.abs() < 1e-12);
    }

    #[test]
    fn test_normalize_skips_non_numeric() {
        let df = df![
            "x" => [1.0, 2.0],
            "cat" => ["a", "b"],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let normalized = prep.normalize_numeric(NormalizeMethod::MinMax).unwrap();

        assert!(matches!(
            normalized.column("cat").unwrap().dtype(),
            DataType::String
        ));
    }

    #[test]
    fn test_fit_transform_excludes_indicators_from_normalization() {
        let df = df![
            "age" => [Some(10.0), Some(20.0), None, Some(40.0)],
            "color" => ["red", "blue", "red", "red"],
        ]
        .unwrap();

        let mut prep = Preprocessor::new(&df);
        let result = prep
            .fit_transform(0.5, NumericStrategy::Median, NormalizeMethod::MinMax)
            .unwrap();

        // indicators keep their 0/1 integer form
        let indicator = result.column("color_red").unwrap();
        assert!(matches!(indicator.dtype(), DataType::Int32));

        // the true numeric column was scaled into [0, 1]
        let age = column_values(&result, "age");
        let min = age.iter().copied().fold(f64::INFINITY, f64::min);
        let max = age.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);

        // only "age" has normalization parameters
        match prep.normalization().unwrap() {
            NormalizationParams::MinMax { columns } => {
                assert_eq!(columns.len(), 1);
                assert!(columns.contains_key("age"));
            }
            other => panic!("expected minmax params, got {other:?}"),
        }
    }
}
