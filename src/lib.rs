//! Tabular Data Cleaning Library
//!
//! A small preprocessing library built on Polars for preparing rectangular
//! datasets ahead of model training:
//!
//! - **Missing-value handling**: drop columns above a missingness threshold,
//!   impute the rest (numeric: median/mean, categorical: mode)
//! - **One-hot encoding**: one 0/1 indicator column per distinct categorical
//!   value, no base category dropped
//! - **Normalization**: min-max rescaling to [0, 1] or standard-score
//!   scaling (population std)
//!
//! All operations run through a stateful [`Preprocessor`] that owns a copy
//! of the input frame and caches the fitted parameters (removed columns,
//! fill values, indicator column list, normalization statistics).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use table_prep::{NormalizeMethod, NumericStrategy, Preprocessor};
//! use polars::prelude::*;
//!
//! let df = df![
//!     "age" => [Some(90.0), Some(85.0), None, None, Some(40.0)],
//!     "color" => [Some("red"), Some("red"), Some("blue"), None, Some("red")],
//! ]?;
//!
//! let mut prep = Preprocessor::new(&df);
//! let cleaned = prep.fit_transform(0.5, NumericStrategy::Median, NormalizeMethod::MinMax)?;
//!
//! println!("fill values: {:?}", prep.numeric_fill_values());
//! println!("encoded columns: {:?}", prep.onehot_columns());
//! ```
//!
//! Operations can also run individually, in any prefix of the
//! `remove_missing` -> `encode_categorical` -> `normalize_numeric` order:
//!
//! ```rust,ignore
//! use table_prep::{CategoricalStrategy, NumericStrategy, Preprocessor};
//!
//! let mut prep = Preprocessor::new(&df);
//! let (kept, removed) = prep.remove_missing_with_removed(
//!     0.5,
//!     NumericStrategy::Mean,
//!     CategoricalStrategy::Mode,
//! )?;
//! println!("dropped columns: {:?}", prep.removed_columns());
//! ```
//!
//! The preprocessor is single-owner and synchronous: no locking, no
//! cancellation, no I/O. Threshold values are fractions in [0, 1].

pub mod config;
pub mod encode;
pub mod error;
pub mod impute;
pub mod normalize;
pub mod preprocessor;
pub mod utils;

// Re-exports for convenient access
pub use config::{CategoricalStrategy, NormalizeMethod, NumericStrategy};
pub use encode::onehot_expand;
pub use error::{PrepError, Result};
pub use impute::Imputer;
pub use normalize::{MinMaxStats, NormalizationParams, StdStats, minmax_scale, std_scale};
pub use preprocessor::Preprocessor;
pub use utils::{
    ColumnKind, column_kind, fill_numeric_nulls, fill_string_nulls, is_numeric_dtype,
    missing_fraction, string_mode,
};
