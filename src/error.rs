//! Error types shared by the reliability computations.

use crate::label::Label;
use thiserror::Error;

/// Errors that can occur while computing inter-rater reliability
#[derive(Error, Debug)]
pub enum AlphaError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Reliability is undefined: {0}")]
    Computation(String),

    #[error("Difference metric `{metric}` requires numeric labels, got {label}")]
    TypeMismatch {
        /// Name of the metric that rejected the label
        metric: &'static str,
        /// The offending label
        label: Label,
    },

    #[error("Invalid metric type: {0}")]
    InvalidMetric(String),

    #[error("Failed to parse YAML configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl AlphaError {
    /// Construct an undefined-statistic error
    pub(crate) fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }

    /// Check if this error means the statistic has no defined value
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Computation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AlphaError::InvalidInput("need two raters".to_string());
        assert_eq!(err.to_string(), "Invalid input: need two raters");

        let err = AlphaError::TypeMismatch {
            metric: "interval",
            label: Label::from("b"),
        };
        assert_eq!(
            err.to_string(),
            "Difference metric `interval` requires numeric labels, got \"b\""
        );
    }

    #[test]
    fn test_is_undefined() {
        assert!(AlphaError::computation("zero expected disagreement").is_undefined());
        assert!(!AlphaError::InvalidMetric("cosine".to_string()).is_undefined());
    }
}
