//! # Rater Agreement
//!
//! Krippendorff's Alpha inter-rater reliability for in-memory rating data.
//!
//! Raters label items; not every rater has to label every item, and labels
//! may be categories or numbers. Alpha is `1 - Do / De`, the observed
//! disagreement relative to the disagreement expected by chance, where the
//! notion of disagreement comes from a difference metric matching the level
//! of measurement:
//!
//! | Metric | `delta(c, k)` |
//! |--------|---------------|
//! | nominal | `0` if `c == k`, else `1` |
//! | ordinal | squared count-weighted rank distance |
//! | interval | `(c - k)^2` |
//! | ratio | `((c - k) / (c + k))^2` |
//!
//! ## Architecture
//!
//! ```text
//! Rater responses (item -> label, one map per rater)
//!        ↓
//! Pairable items (rated by >= 2 raters)
//!        ↓
//! Coincidence matrix + value counts
//!        ↓
//! Difference metric
//!        ↓
//! Alpha (optionally bootstrap interval, report)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rater_agreement::{rater_response, MetricKind, ReliabilityCalculator};
//!
//! let ratings = vec![
//!     rater_response([(1, 1), (2, 2), (3, 3), (4, 3)]),
//!     rater_response([(1, 1), (2, 2), (3, 3), (4, 2)]),
//! ];
//! let calculator = ReliabilityCalculator::new(&ratings)?;
//! let alpha = calculator.compute_alpha(&MetricKind::Interval)?;
//! assert!(alpha > 0.8);
//! # Ok::<(), rater_agreement::AlphaError>(())
//! ```

pub mod alpha;
pub mod bootstrap;
pub mod coincidence;
pub mod config;
pub mod difference;
pub mod error;
pub mod label;
pub mod report;

pub use alpha::{estimate_from_matrix, AlphaEstimate, ReliabilityCalculator};
pub use bootstrap::{bootstrap_alpha, AlphaInterval};
pub use coincidence::{
    build_coincidence_matrix, pairable_units, rater_response, CoincidenceMatrix, RaterResponse,
    ValueCounts,
};
pub use config::AlphaConfig;
pub use difference::{interval, nominal, ordinal, ratio, DifferenceMetric, MetricKind};
pub use error::AlphaError;
pub use label::Label;
pub use report::{interpret_alpha, DatasetSummary, MetricReport, ReliabilityReport};
