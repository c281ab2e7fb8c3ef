//! Krippendorff's alpha computation.
//!
//! `alpha = 1 - Do / De` where, over every ordered pair of labels `(c, k)`,
//!
//! - `Do = (n - 1) * sum(o_ck * delta(c, k))` is the observed disagreement,
//! - `De = sum(n_c * n_k * delta(c, k))` is the disagreement expected by chance,
//!
//! `o_ck` is the coincidence matrix, `n_c` the value counts and `n` the
//! number of pairable values.

use crate::coincidence::{pairable_units, CoincidenceMatrix, RaterResponse, ValueCounts};
use crate::config::AlphaConfig;
use crate::difference::{DifferenceMetric, MetricKind};
use crate::error::AlphaError;
use crate::label::Label;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;
use std::sync::OnceLock;

/// Alpha together with the quantities it was derived from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlphaEstimate {
    /// Name of the difference metric (`"custom"` for caller-supplied metrics)
    pub metric: String,
    /// Reliability coefficient
    pub alpha: f64,
    /// Observed disagreement `Do`
    pub observed_disagreement: f64,
    /// Expected disagreement `De`
    pub expected_disagreement: f64,
    /// Number of pairable values `n`
    pub pairable_values: usize,
    /// Number of items rated by at least two raters
    pub pairable_items: usize,
}

/// Evaluate alpha on an already accumulated coincidence matrix
///
/// # Errors
///
/// Returns `AlphaError::Computation` if the expected disagreement is zero,
/// or any error raised by the metric.
#[allow(
    clippy::cast_precision_loss,
    clippy::suboptimal_flops,
    clippy::float_cmp
)]
pub fn estimate_from_matrix<M>(
    matrix: &CoincidenceMatrix,
    metric: &M,
) -> Result<AlphaEstimate, AlphaError>
where
    M: DifferenceMetric + ?Sized,
{
    let counts: &ValueCounts = matrix.value_counts();
    let n = counts.total();

    let mut observed = 0.0;
    let mut expected = 0.0;
    for (c, n_c) in counts.iter() {
        for (k, n_k) in counts.iter() {
            let delta = metric.difference(c, k, counts)?;
            observed += matrix.get(c, k) * delta;
            expected += (n_c * n_k) as f64 * delta;
        }
    }
    let observed = n.saturating_sub(1) as f64 * observed;

    // exact zero only: De scales with the square of the label units
    if expected == 0.0 || !expected.is_finite() {
        return Err(AlphaError::computation(format!(
            "expected disagreement is zero under the {} metric ({} distinct labels, {n} pairable values)",
            metric.name(),
            counts.len(),
        )));
    }

    let alpha = 1.0 - observed / expected;
    if !alpha.is_finite() {
        return Err(AlphaError::computation(format!(
            "{} metric produced a non-finite alpha",
            metric.name()
        )));
    }

    tracing::debug!(
        metric = metric.name(),
        n = n,
        observed = observed,
        expected = expected,
        alpha = alpha,
        "Computed Krippendorff's alpha"
    );

    Ok(AlphaEstimate {
        metric: metric.name().to_string(),
        alpha,
        observed_disagreement: observed,
        expected_disagreement: expected,
        pairable_values: n,
        pairable_items: matrix.pairable_units(),
    })
}

/// Inter-rater reliability over a fixed set of rater responses
///
/// The responses are borrowed and never modified. The coincidence matrix
/// does not depend on the difference metric, so it is built on first use
/// and shared by every later query.
#[derive(Debug)]
pub struct ReliabilityCalculator<'a, I> {
    ratings: &'a [RaterResponse<I>],
    units: OnceLock<Vec<Vec<Label>>>,
    matrix: OnceLock<CoincidenceMatrix>,
}

impl<'a, I> ReliabilityCalculator<'a, I>
where
    I: Eq + Hash + Ord,
{
    /// Create a calculator over one response map per rater
    ///
    /// # Errors
    ///
    /// Returns `AlphaError::InvalidInput` if fewer than two raters are given.
    pub fn new(ratings: &'a [RaterResponse<I>]) -> Result<Self, AlphaError> {
        if ratings.len() < 2 {
            return Err(AlphaError::InvalidInput(format!(
                "rater responses should have ratings for at least two raters, got {}",
                ratings.len()
            )));
        }

        Ok(Self {
            ratings,
            units: OnceLock::new(),
            matrix: OnceLock::new(),
        })
    }

    /// Number of raters
    #[must_use]
    pub const fn rater_count(&self) -> usize {
        self.ratings.len()
    }

    /// Number of distinct items rated by anyone
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.ratings
            .iter()
            .flat_map(HashMap::keys)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Number of items rated by at least two raters
    #[must_use]
    pub fn pairable_item_count(&self) -> usize {
        self.units().len()
    }

    /// Labels of each pairable item, in item order
    #[must_use]
    pub fn units(&self) -> &[Vec<Label>] {
        self.units.get_or_init(|| pairable_units(self.ratings))
    }

    /// Coincidence matrix of the dataset
    #[must_use]
    pub fn coincidence(&self) -> &CoincidenceMatrix {
        self.matrix.get_or_init(|| {
            let mut matrix = CoincidenceMatrix::new();
            for unit in self.units() {
                matrix.add_unit(unit);
            }
            matrix
        })
    }

    /// Label frequencies among the pairable values
    #[must_use]
    pub fn value_counts(&self) -> &ValueCounts {
        self.coincidence().value_counts()
    }

    /// Compute alpha under the given difference metric
    ///
    /// # Errors
    ///
    /// Returns `AlphaError::Computation` if alpha is undefined for this
    /// dataset, or `AlphaError::TypeMismatch` if the metric cannot handle
    /// the labels.
    pub fn compute_alpha<M>(&self, metric: &M) -> Result<f64, AlphaError>
    where
        M: DifferenceMetric + ?Sized,
    {
        self.estimate(metric).map(|estimate| estimate.alpha)
    }

    /// Compute alpha with the nominal metric
    ///
    /// # Errors
    ///
    /// Returns `AlphaError::Computation` if alpha is undefined for this dataset.
    pub fn compute_nominal_alpha(&self) -> Result<f64, AlphaError> {
        self.compute_alpha(&MetricKind::Nominal)
    }

    /// Compute alpha with the metric selected in the configuration
    ///
    /// # Errors
    ///
    /// Returns `AlphaError::InvalidInput` if the configuration is invalid,
    /// otherwise the same errors as [`Self::compute_alpha`].
    pub fn compute_configured(&self, config: &AlphaConfig) -> Result<f64, AlphaError> {
        config.validate()?;
        self.compute_alpha(&config.metric)
    }

    /// Compute alpha along with observed and expected disagreement
    ///
    /// # Errors
    ///
    /// Same as [`Self::compute_alpha`].
    pub fn estimate<M>(&self, metric: &M) -> Result<AlphaEstimate, AlphaError>
    where
        M: DifferenceMetric + ?Sized,
    {
        estimate_from_matrix(self.coincidence(), metric)
    }
}
