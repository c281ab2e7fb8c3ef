//! Bootstrap confidence interval for alpha.
//!
//! Resamples pairable items with replacement, rebuilds the coincidence
//! matrix from the per-item contributions and takes the percentile interval
//! of the resampled alphas.

use crate::alpha::{estimate_from_matrix, ReliabilityCalculator};
use crate::coincidence::CoincidenceMatrix;
use crate::config::AlphaConfig;
use crate::difference::DifferenceMetric;
use crate::error::AlphaError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics};
use std::hash::Hash;

/// Point estimate of alpha with a bootstrap percentile interval
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlphaInterval {
    /// Name of the difference metric
    pub metric: String,
    /// Alpha on the full dataset
    pub alpha: f64,
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// Confidence level (e.g., 0.95)
    pub confidence: f64,
    /// Resamples with a defined alpha
    pub resamples: usize,
    /// Resamples dropped because alpha was undefined
    pub skipped: usize,
}

impl AlphaInterval {
    /// Check if a value lies within the interval
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Interval width
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Bootstrap a confidence interval for alpha
///
/// Uses `config.bootstrap_n` resamples drawn from a `ChaCha8` generator
/// seeded with `config.seed`, so results are reproducible.
///
/// # Errors
///
/// Returns `AlphaError::InvalidInput` for an invalid configuration,
/// `AlphaError::Computation` if alpha is undefined on the full dataset or on
/// every resample, and any error raised by the metric.
pub fn bootstrap_alpha<I, M>(
    calculator: &ReliabilityCalculator<'_, I>,
    metric: &M,
    config: &AlphaConfig,
) -> Result<AlphaInterval, AlphaError>
where
    I: Eq + Hash + Ord,
    M: DifferenceMetric + ?Sized,
{
    config.validate()?;
    if config.bootstrap_n == 0 {
        return Err(AlphaError::InvalidInput(
            "bootstrap_n must be at least 1".to_string(),
        ));
    }

    let point = calculator.estimate(metric)?;

    let partials: Vec<CoincidenceMatrix> = calculator
        .units()
        .iter()
        .map(|unit| {
            let mut matrix = CoincidenceMatrix::new();
            matrix.add_unit(unit);
            matrix
        })
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut alphas = Vec::with_capacity(config.bootstrap_n);
    let mut skipped = 0_usize;

    for _ in 0..config.bootstrap_n {
        let mut matrix = CoincidenceMatrix::new();
        for _ in 0..partials.len() {
            matrix.merge(&partials[rng.gen_range(0..partials.len())]);
        }

        match estimate_from_matrix(&matrix, metric) {
            Ok(estimate) => alphas.push(estimate.alpha),
            Err(e) if e.is_undefined() => skipped += 1,
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        tracing::warn!(
            metric = metric.name(),
            skipped = skipped,
            total = config.bootstrap_n,
            "Skipped bootstrap resamples with undefined alpha"
        );
    }

    if alphas.is_empty() {
        return Err(AlphaError::computation(
            "alpha is undefined on every bootstrap resample",
        ));
    }

    let resamples = alphas.len();
    let tail = (1.0 - config.confidence) / 2.0;
    let mut data = Data::new(alphas);
    let lower = data.quantile(tail);
    let upper = data.quantile(1.0 - tail);

    tracing::debug!(
        metric = metric.name(),
        alpha = point.alpha,
        lower = lower,
        upper = upper,
        resamples = resamples,
        "Bootstrapped alpha interval"
    );

    Ok(AlphaInterval {
        metric: point.metric,
        alpha: point.alpha,
        lower,
        upper,
        confidence: config.confidence,
        resamples,
        skipped,
    })
}
