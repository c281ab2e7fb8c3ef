//! Difference metrics between labels.
//!
//! Every metric shares the signature `(c, k, value_counts) -> distance`.
//! Only the ordinal metric reads the value counts; the others ignore them.
//! Scale-sensitive metrics reject categorical labels instead of coercing them.

use crate::coincidence::ValueCounts;
use crate::error::AlphaError;
use crate::label::Label;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A squared distance between two labels
pub trait DifferenceMetric {
    /// Distance between `c` and `k`
    ///
    /// # Errors
    ///
    /// Returns an error if the metric is not defined for the label pair.
    fn difference(&self, c: &Label, k: &Label, counts: &ValueCounts) -> Result<f64, AlphaError>;

    /// Name used in logs and reports
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> DifferenceMetric for F
where
    F: Fn(&Label, &Label, &ValueCounts) -> Result<f64, AlphaError>,
{
    fn difference(&self, c: &Label, k: &Label, counts: &ValueCounts) -> Result<f64, AlphaError> {
        self(c, k, counts)
    }

    /// The built-in metric functions keep their own names; closures and other
    /// callables are "custom"
    fn name(&self) -> &str {
        std::any::type_name::<F>()
            .strip_prefix(concat!(module_path!(), "::"))
            .and_then(|function| MetricKind::ALL.into_iter().find(|k| k.as_str() == function))
            .map_or("custom", MetricKind::as_str)
    }
}

/// Nominal difference: 1 for distinct labels, 0 otherwise
///
/// # Errors
///
/// Never fails; the `Result` keeps the shared metric signature.
pub fn nominal(c: &Label, k: &Label, _counts: &ValueCounts) -> Result<f64, AlphaError> {
    Ok(if c == k { 0.0 } else { 1.0 })
}

/// Ordinal difference: squared rank distance measured in value counts
///
/// Sums the counts of every label strictly between `c` and `k`, plus half the
/// counts of `c` and `k` themselves.
///
/// # Errors
///
/// Returns `AlphaError::TypeMismatch` for categorical labels.
#[allow(clippy::cast_precision_loss)]
pub fn ordinal(c: &Label, k: &Label, counts: &ValueCounts) -> Result<f64, AlphaError> {
    c.require_number("ordinal")?;
    k.require_number("ordinal")?;
    if c == k {
        return Ok(0.0);
    }

    let (low, high) = if c < k { (c, k) } else { (k, c) };
    let between = counts.count_between(low, high) as f64;
    let diff = between + (counts.get(low) + counts.get(high)) as f64 / 2.0;
    Ok(diff * diff)
}

/// Interval difference: `(c - k)^2`
///
/// # Errors
///
/// Returns `AlphaError::TypeMismatch` for categorical labels.
pub fn interval(c: &Label, k: &Label, _counts: &ValueCounts) -> Result<f64, AlphaError> {
    let a = c.require_number("interval")?;
    let b = k.require_number("interval")?;
    Ok((a - b).powi(2))
}

/// Ratio difference: `((c - k) / (c + k))^2`
///
/// # Errors
///
/// Returns `AlphaError::TypeMismatch` for categorical labels and
/// `AlphaError::Computation` for distinct labels summing to zero.
pub fn ratio(c: &Label, k: &Label, _counts: &ValueCounts) -> Result<f64, AlphaError> {
    let a = c.require_number("ratio")?;
    let b = k.require_number("ratio")?;
    if c == k {
        return Ok(0.0);
    }

    let sum = a + b;
    if sum == 0.0 {
        return Err(AlphaError::computation(format!(
            "ratio difference between {c} and {k} divides by zero"
        )));
    }
    Ok(((a - b) / sum).powi(2))
}

/// The canonical difference metrics, one per level of measurement
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Unordered categories
    #[default]
    Nominal,
    /// Ranked categories
    Ordinal,
    /// Numbers with meaningful differences
    Interval,
    /// Numbers with a meaningful zero
    Ratio,
}

impl MetricKind {
    /// All canonical metrics in level-of-measurement order
    pub const ALL: [Self; 4] = [Self::Nominal, Self::Ordinal, Self::Interval, Self::Ratio];

    /// Lowercase metric name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nominal => "nominal",
            Self::Ordinal => "ordinal",
            Self::Interval => "interval",
            Self::Ratio => "ratio",
        }
    }

    /// Check if the metric needs numeric labels
    #[must_use]
    pub const fn requires_numeric(self) -> bool {
        !matches!(self, Self::Nominal)
    }
}

impl DifferenceMetric for MetricKind {
    fn difference(&self, c: &Label, k: &Label, counts: &ValueCounts) -> Result<f64, AlphaError> {
        match self {
            Self::Nominal => nominal(c, k, counts),
            Self::Ordinal => ordinal(c, k, counts),
            Self::Interval => interval(c, k, counts),
            Self::Ratio => ratio(c, k, counts),
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetricKind {
    type Err = AlphaError;

    /// Parse metric kind from string
    ///
    /// # Errors
    ///
    /// Returns `AlphaError::InvalidMetric` if the string doesn't match a known metric.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nominal" | "categorical" => Ok(Self::Nominal),
            "ordinal" | "ranked" => Ok(Self::Ordinal),
            "interval" => Ok(Self::Interval),
            "ratio" => Ok(Self::Ratio),
            _ => Err(AlphaError::InvalidMetric(s.to_string())),
        }
    }
}
