//! Configuration for reliability computations.
//!
//! Parsed from YAML with defaults for every field, e.g.
//!
//! ```yaml
//! metric: ordinal
//! bootstrap_n: 2000
//! confidence: 0.9
//! seed: 7
//! ```

use crate::difference::MetricKind;
use crate::error::AlphaError;
use serde::{Deserialize, Serialize};

/// Settings for alpha estimation and its bootstrap interval
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlphaConfig {
    /// Difference metric used when none is given explicitly
    #[serde(default)]
    pub metric: MetricKind,
    /// Bootstrap resamples for the confidence interval (0 disables it in reports)
    #[serde(default = "default_bootstrap_n")]
    pub bootstrap_n: usize,
    /// Confidence level of the interval
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Random seed for reproducible resampling
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_bootstrap_n() -> usize {
    1000
}
const fn default_confidence() -> f64 {
    0.95
}
const fn default_seed() -> u64 {
    42
}

impl Default for AlphaConfig {
    fn default() -> Self {
        Self {
            metric: MetricKind::default(),
            bootstrap_n: default_bootstrap_n(),
            confidence: default_confidence(),
            seed: default_seed(),
        }
    }
}

impl AlphaConfig {
    /// Parse and validate configuration from a YAML string
    ///
    /// # Errors
    ///
    /// Returns `AlphaError::Config` if the YAML is malformed, or
    /// `AlphaError::InvalidInput` if a value is out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self, AlphaError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `AlphaError::InvalidInput` if the confidence level is not
    /// strictly between 0 and 1.
    pub fn validate(&self) -> Result<(), AlphaError> {
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(AlphaError::InvalidInput(format!(
                "confidence must be between 0 and 1, got {}",
                self.confidence
            )));
        }
        Ok(())
    }

    /// Check if reports should include a bootstrap interval
    #[must_use]
    pub const fn bootstrap_enabled(&self) -> bool {
        self.bootstrap_n > 0
    }
}
