//! Strategy and method enums for preprocessing operations.
//!
//! The typed API makes invalid strategies unrepresentable; the string
//! boundary lives in the `FromStr` impls, which reject anything outside the
//! accepted vocabulary with [`PrepError::InvalidArgument`] before any table
//! mutation can happen.

use crate::error::PrepError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Strategy for imputing missing numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NumericStrategy {
    /// Use the median of non-null values
    #[default]
    Median,
    /// Use the mean of non-null values
    Mean,
}

impl NumericStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Median => "median",
            Self::Mean => "mean",
        }
    }
}

impl FromStr for NumericStrategy {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "median" => Ok(Self::Median),
            "mean" => Ok(Self::Mean),
            other => Err(PrepError::InvalidArgument(format!(
                "numeric strategy must be 'median' or 'mean', got '{other}'"
            ))),
        }
    }
}

/// Strategy for imputing missing categorical values.
///
/// Mode is the only supported strategy; ties are broken deterministically
/// by first appearance in row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoricalStrategy {
    /// Use the most frequent value (mode)
    #[default]
    Mode,
}

impl CategoricalStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mode => "mode",
        }
    }
}

impl FromStr for CategoricalStrategy {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mode" => Ok(Self::Mode),
            other => Err(PrepError::InvalidArgument(format!(
                "categorical strategy must be 'mode', got '{other}'"
            ))),
        }
    }
}

/// Method for normalizing numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NormalizeMethod {
    /// Linear rescaling to the range [0, 1]
    #[default]
    MinMax,
    /// Standard score: zero mean, unit variance (population std)
    Std,
}

impl NormalizeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MinMax => "minmax",
            Self::Std => "std",
        }
    }
}

impl FromStr for NormalizeMethod {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minmax" => Ok(Self::MinMax),
            "std" => Ok(Self::Std),
            other => Err(PrepError::InvalidArgument(format!(
                "normalization method must be 'minmax' or 'std', got '{other}'"
            ))),
        }
    }
}
