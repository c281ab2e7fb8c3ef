//! Reliability report generation.
//!
//! Evaluates several difference metrics on the same dataset and renders:
//! - Dataset summary (raters, items, pairable values)
//! - Alpha per metric with observed and expected disagreement
//! - Bootstrap confidence intervals
//! - Reliability assessment

use crate::alpha::{AlphaEstimate, ReliabilityCalculator};
use crate::bootstrap::{bootstrap_alpha, AlphaInterval};
use crate::config::AlphaConfig;
use crate::difference::MetricKind;
use crate::error::AlphaError;
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;
use std::hash::Hash;
use tabled::{Table, Tabled};

/// Smallest alpha for conclusions drawn from reliable data
pub const RELIABLE_ALPHA: f64 = 0.800;

/// Smallest alpha for tentative conclusions
pub const TENTATIVE_ALPHA: f64 = 0.667;

/// Interpret alpha against Krippendorff's customary thresholds
#[must_use]
pub fn interpret_alpha(alpha: f64) -> &'static str {
    if alpha >= RELIABLE_ALPHA {
        "reliable"
    } else if alpha >= TENTATIVE_ALPHA {
        "tentative"
    } else {
        "unreliable"
    }
}

/// Shape of the rating dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetSummary {
    /// Number of raters
    pub raters: usize,
    /// Number of distinct items
    pub items: usize,
    /// Items rated by at least two raters
    pub pairable_items: usize,
    /// Ratings on pairable items
    pub pairable_values: usize,
    /// Distinct labels among pairable values
    pub distinct_labels: usize,
}

/// Result for a single metric
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricReport {
    /// Difference metric
    pub metric: MetricKind,
    /// Estimate, absent when alpha could not be computed
    pub estimate: Option<AlphaEstimate>,
    /// Bootstrap interval, when enabled and defined
    pub interval: Option<AlphaInterval>,
    /// Reliability assessment of the estimate
    pub assessment: Option<String>,
    /// Why the estimate is absent
    pub error: Option<String>,
}

impl MetricReport {
    /// Alpha, if defined
    #[must_use]
    pub fn alpha(&self) -> Option<f64> {
        self.estimate.as_ref().map(|e| e.alpha)
    }
}

/// Alpha under several metrics for one dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReliabilityReport {
    /// Dataset summary
    pub summary: DatasetSummary,
    /// Per-metric results, in the requested order
    pub metrics: Vec<MetricReport>,
}

impl ReliabilityReport {
    /// Evaluate each metric and collect the results
    ///
    /// A metric whose alpha is undefined or that rejects the labels is
    /// reported with its error instead of aborting the whole report. An empty
    /// metric list evaluates the configured metric.
    ///
    /// # Errors
    ///
    /// Returns `AlphaError::InvalidInput` if the configuration is invalid.
    pub fn build<I>(
        calculator: &ReliabilityCalculator<'_, I>,
        metrics: &[MetricKind],
        config: &AlphaConfig,
    ) -> Result<Self, AlphaError>
    where
        I: Eq + Hash + Ord,
    {
        config.validate()?;

        let counts = calculator.value_counts();
        let summary = DatasetSummary {
            raters: calculator.rater_count(),
            items: calculator.item_count(),
            pairable_items: calculator.pairable_item_count(),
            pairable_values: counts.total(),
            distinct_labels: counts.len(),
        };

        let metrics = if metrics.is_empty() {
            std::slice::from_ref(&config.metric)
        } else {
            metrics
        };
        let metrics = metrics
            .iter()
            .map(|metric| Self::evaluate(calculator, *metric, config))
            .collect();

        Ok(Self { summary, metrics })
    }

    fn evaluate<I>(
        calculator: &ReliabilityCalculator<'_, I>,
        metric: MetricKind,
        config: &AlphaConfig,
    ) -> MetricReport
    where
        I: Eq + Hash + Ord,
    {
        let estimate = match calculator.estimate(&metric) {
            Ok(estimate) => estimate,
            Err(e) => {
                return MetricReport {
                    metric,
                    estimate: None,
                    interval: None,
                    assessment: None,
                    error: Some(e.to_string()),
                }
            }
        };

        let interval = if config.bootstrap_enabled() {
            match bootstrap_alpha(calculator, &metric, config) {
                Ok(interval) => Some(interval),
                Err(e) => {
                    tracing::warn!(metric = %metric, error = %e, "Bootstrap interval unavailable");
                    None
                }
            }
        } else {
            None
        };

        MetricReport {
            metric,
            assessment: Some(interpret_alpha(estimate.alpha).to_string()),
            estimate: Some(estimate),
            interval,
            error: None,
        }
    }

    /// Result for a metric, if it was requested
    #[must_use]
    pub fn get(&self, metric: MetricKind) -> Option<&MetricReport> {
        self.metrics.iter().find(|r| r.metric == metric)
    }

    /// Render report as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render the per-metric results as a text table
    #[must_use]
    pub fn to_table(&self) -> String {
        let rows: Vec<MetricTableRow> = self
            .metrics
            .iter()
            .map(|r| {
                let dash = || "-".to_string();
                MetricTableRow {
                    metric: r.metric.to_string(),
                    alpha: r.alpha().map_or_else(dash, |a| format!("{a:.3}")),
                    interval: r.interval.as_ref().map_or_else(dash, |i| {
                        format!("[{:.3}, {:.3}]", i.lower, i.upper)
                    }),
                    observed: r
                        .estimate
                        .as_ref()
                        .map_or_else(dash, |e| format!("{:.3}", e.observed_disagreement)),
                    expected: r
                        .estimate
                        .as_ref()
                        .map_or_else(dash, |e| format!("{:.3}", e.expected_disagreement)),
                    assessment: r
                        .assessment
                        .clone()
                        .or_else(|| r.error.clone())
                        .unwrap_or_else(dash),
                }
            })
            .collect();

        Table::new(rows).to_string()
    }

    /// Render report as markdown
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        writeln!(output, "# Inter-Rater Reliability").ok();
        writeln!(output).ok();
        writeln!(output, "| Dataset | Value |").ok();
        writeln!(output, "|---------|-------|").ok();
        writeln!(output, "| Raters | {} |", self.summary.raters).ok();
        writeln!(output, "| Items | {} |", self.summary.items).ok();
        writeln!(output, "| Pairable Items | {} |", self.summary.pairable_items).ok();
        writeln!(output, "| Pairable Values | {} |", self.summary.pairable_values).ok();
        writeln!(output, "| Distinct Labels | {} |", self.summary.distinct_labels).ok();
        writeln!(output).ok();

        writeln!(output, "## Krippendorff's Alpha").ok();
        writeln!(output).ok();
        writeln!(output, "{}", self.to_table()).ok();

        if let Some(confidence) = self
            .metrics
            .iter()
            .find_map(|r| r.interval.as_ref().map(|i| i.confidence))
        {
            writeln!(output).ok();
            writeln!(
                output,
                "Intervals are {:.0}% bootstrap percentile intervals over resampled items.",
                confidence * 100.0
            )
            .ok();
        }

        output
    }
}

/// Table row for text/markdown output
#[derive(Tabled)]
struct MetricTableRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Alpha")]
    alpha: String,
    #[tabled(rename = "Interval")]
    interval: String,
    #[tabled(rename = "Do")]
    observed: String,
    #[tabled(rename = "De")]
    expected: String,
    #[tabled(rename = "Assessment")]
    assessment: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::coincidence::{rater_response, RaterResponse};

    fn ratings() -> Vec<RaterResponse<u32>> {
        vec![
            rater_response([(1, 1), (2, 2), (3, 3), (4, 3), (5, 2), (6, 1), (7, 4), (8, 1), (9, 2)]),
            rater_response([
                (1, 1), (2, 2), (3, 3), (4, 3), (5, 2), (6, 2), (7, 4), (8, 1), (9, 2), (10, 5),
            ]),
            rater_response([
                (2, 3), (3, 3), (4, 3), (5, 2), (6, 3), (7, 4), (8, 2), (9, 2), (10, 5), (11, 1),
                (12, 3),
            ]),
            rater_response([
                (1, 1), (2, 2), (3, 3), (4, 3), (5, 2), (6, 4), (7, 4), (8, 1), (9, 2), (10, 5),
                (11, 1),
            ]),
        ]
    }

    fn no_bootstrap() -> AlphaConfig {
        AlphaConfig {
            bootstrap_n: 0,
            ..AlphaConfig::default()
        }
    }

    #[test]
    fn test_interpret_alpha() {
        assert_eq!(interpret_alpha(1.0), "reliable");
        assert_eq!(interpret_alpha(0.8), "reliable");
        assert_eq!(interpret_alpha(0.743), "tentative");
        assert_eq!(interpret_alpha(0.5), "unreliable");
        assert_eq!(interpret_alpha(-0.2), "unreliable");
    }

    #[test]
    fn test_report_all_metrics() {
        let ratings = ratings();
        let calc = ReliabilityCalculator::new(&ratings).unwrap();

        let report = ReliabilityReport::build(&calc, &MetricKind::ALL, &no_bootstrap()).unwrap();

        assert_eq!(report.summary.raters, 4);
        assert_eq!(report.summary.items, 12);
        assert_eq!(report.summary.pairable_items, 11);
        assert_eq!(report.summary.pairable_values, 40);
        assert_eq!(report.summary.distinct_labels, 5);
        assert_eq!(report.metrics.len(), 4);

        let interval = report.get(MetricKind::Interval).unwrap();
        assert_eq!(interval.assessment.as_deref(), Some("reliable"));
        assert!(interval.interval.is_none());

        let nominal = report.get(MetricKind::Nominal).unwrap();
        assert_eq!(nominal.assessment.as_deref(), Some("tentative"));
    }

    #[test]
    fn test_report_keeps_going_on_type_mismatch() {
        let ratings = vec![
            rater_response([(1, "a"), (2, "b"), (3, "b")]),
            rater_response([(1, "a"), (2, "b"), (3, "a")]),
        ];
        let calc = ReliabilityCalculator::new(&ratings).unwrap();

        let report = ReliabilityReport::build(&calc, &MetricKind::ALL, &no_bootstrap()).unwrap();

        assert!(report.get(MetricKind::Nominal).unwrap().alpha().is_some());
        let ordinal = report.get(MetricKind::Ordinal).unwrap();
        assert!(ordinal.alpha().is_none());
        assert!(ordinal.error.as_deref().unwrap().contains("numeric labels"));
    }

    #[test]
    fn test_report_with_bootstrap() {
        let ratings = ratings();
        let calc = ReliabilityCalculator::new(&ratings).unwrap();
        let config = AlphaConfig {
            bootstrap_n: 200,
            ..AlphaConfig::default()
        };

        let report = ReliabilityReport::build(&calc, &[MetricKind::Interval], &config).unwrap();
        let interval = report.metrics[0].interval.as_ref().unwrap();
        assert_eq!(interval.metric, "interval");
        assert!(interval.lower <= interval.upper);
    }

    #[test]
    fn test_report_rejects_invalid_config() {
        let ratings = ratings();
        let calc = ReliabilityCalculator::new(&ratings).unwrap();
        let config = AlphaConfig {
            confidence: 2.0,
            ..AlphaConfig::default()
        };

        assert!(ReliabilityReport::build(&calc, &MetricKind::ALL, &config).is_err());
    }

    #[test]
    fn test_report_defaults_to_configured_metric() {
        let ratings = ratings();
        let calc = ReliabilityCalculator::new(&ratings).unwrap();
        let config = AlphaConfig {
            metric: MetricKind::Interval,
            ..no_bootstrap()
        };

        let report = ReliabilityReport::build(&calc, &[], &config).unwrap();
        assert_eq!(report.metrics.len(), 1);
        assert_eq!(report.metrics[0].metric, MetricKind::Interval);
        assert!((report.metrics[0].alpha().unwrap() - 0.849).abs() < 5e-4);
    }

    #[test]
    fn test_report_rendering() {
        let ratings = ratings();
        let calc = ReliabilityCalculator::new(&ratings).unwrap();
        let report = ReliabilityReport::build(&calc, &MetricKind::ALL, &no_bootstrap()).unwrap();

        let table = report.to_table();
        assert!(table.contains("Metric"));
        assert!(table.contains("0.743"));
        assert!(table.contains("0.815"));

        let markdown = report.to_markdown();
        assert!(markdown.contains("# Inter-Rater Reliability"));
        assert!(markdown.contains("| Pairable Values | 40 |"));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"metric\": \"ordinal\""));
        let parsed: ReliabilityReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary, report.summary);
    }
}
