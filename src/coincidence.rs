//! Value counts and coincidence matrix construction.
//!
//! A coincidence matrix cross-tabulates all pairable values of the
//! reliability data: for every item rated by `m >= 2` raters, each ordered
//! pair of distinct ratings adds `1 / (m - 1)` to the cell of their labels.
//! Taking ordered pairs makes the matrix symmetric without a separate
//! symmetrization step. Items rated by fewer than two raters carry no
//! pairable information and are skipped.

use crate::label::Label;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;
use std::ops::Bound;

/// Ratings of a single rater, keyed by item
pub type RaterResponse<I> = HashMap<I, Label>;

/// Collect `(item, label)` pairs into a rater response
///
/// A later pair for the same item replaces an earlier one.
pub fn rater_response<I, L, T>(pairs: T) -> RaterResponse<I>
where
    I: Eq + Hash,
    L: Into<Label>,
    T: IntoIterator<Item = (I, L)>,
{
    pairs
        .into_iter()
        .map(|(item, label)| (item, label.into()))
        .collect()
}

/// Frequency of each label among the pairable ratings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueCounts {
    counts: BTreeMap<Label, usize>,
}

impl ValueCounts {
    /// Count for a label (zero when absent)
    #[must_use]
    pub fn get(&self, label: &Label) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Total number of pairable values `n`
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct labels
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no pairable value was seen
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Check if a label occurs among the pairable values
    #[must_use]
    pub fn contains(&self, label: &Label) -> bool {
        self.counts.contains_key(label)
    }

    /// Iterate labels in ascending order with their counts
    pub fn iter(&self) -> impl Iterator<Item = (&Label, usize)> {
        self.counts.iter().map(|(label, count)| (label, *count))
    }

    /// Iterate labels in ascending order
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.counts.keys()
    }

    /// Sum of counts for labels strictly between `low` and `high`
    #[must_use]
    pub fn count_between(&self, low: &Label, high: &Label) -> usize {
        if low >= high {
            return 0;
        }
        self.counts
            .range((Bound::Excluded(low), Bound::Excluded(high)))
            .map(|(_, count)| count)
            .sum()
    }

    fn add(&mut self, label: &Label, count: usize) {
        *self.counts.entry(label.clone()).or_insert(0) += count;
    }
}

impl FromIterator<(Label, usize)> for ValueCounts {
    fn from_iter<T: IntoIterator<Item = (Label, usize)>>(iter: T) -> Self {
        let mut counts = Self::default();
        for (label, count) in iter {
            counts.add(&label, count);
        }
        counts
    }
}

/// Observed coincidences between labels, with the value counts they imply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoincidenceMatrix {
    cells: BTreeMap<(Label, Label), f64>,
    value_counts: ValueCounts,
    pairable_units: usize,
}

impl CoincidenceMatrix {
    /// Create an empty matrix
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the contribution of one item given the labels its raters assigned
    ///
    /// Returns `false` (and leaves the matrix untouched) when fewer than two
    /// labels are supplied.
    #[allow(clippy::cast_precision_loss)]
    pub fn add_unit(&mut self, labels: &[Label]) -> bool {
        let m = labels.len();
        if m < 2 {
            return false;
        }

        let weight = 1.0 / (m - 1) as f64;
        for (i, first) in labels.iter().enumerate() {
            self.value_counts.add(first, 1);
            for (j, second) in labels.iter().enumerate() {
                if i == j {
                    continue;
                }
                *self
                    .cells
                    .entry((first.clone(), second.clone()))
                    .or_insert(0.0) += weight;
            }
        }
        self.pairable_units += 1;
        true
    }

    /// Fold another partial matrix into this one by addition
    pub fn merge(&mut self, other: &Self) {
        for (pair, weight) in &other.cells {
            *self.cells.entry(pair.clone()).or_insert(0.0) += weight;
        }
        for (label, count) in other.value_counts.iter() {
            self.value_counts.add(label, count);
        }
        self.pairable_units += other.pairable_units;
    }

    /// Coincidence weight of the ordered label pair (zero when absent)
    #[must_use]
    pub fn get(&self, c: &Label, k: &Label) -> f64 {
        self.cells
            .get(&(c.clone(), k.clone()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Value counts accumulated alongside the coincidences
    #[must_use]
    pub const fn value_counts(&self) -> &ValueCounts {
        &self.value_counts
    }

    /// Number of items that contributed
    #[must_use]
    pub const fn pairable_units(&self) -> usize {
        self.pairable_units
    }

    /// Check if nothing has been accumulated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairable_units == 0
    }

    /// Iterate non-zero cells in label order
    pub fn iter(&self) -> impl Iterator<Item = (&Label, &Label, f64)> {
        self.cells.iter().map(|((c, k), weight)| (c, k, *weight))
    }
}

/// Labels assigned to each item rated by at least two raters
///
/// Items are visited in ascending id order so that accumulation is
/// reproducible across runs.
pub fn pairable_units<I>(ratings: &[RaterResponse<I>]) -> Vec<Vec<Label>>
where
    I: Eq + Hash + Ord,
{
    let items: BTreeSet<&I> = ratings.iter().flat_map(HashMap::keys).collect();

    let units: Vec<Vec<Label>> = items
        .iter()
        .filter_map(|item| {
            let labels: Vec<Label> = ratings
                .iter()
                .filter_map(|response| response.get(*item).cloned())
                .collect();
            (labels.len() >= 2).then_some(labels)
        })
        .collect();

    tracing::debug!(
        items = items.len(),
        pairable = units.len(),
        skipped = items.len() - units.len(),
        "Collected pairable items"
    );

    units
}

/// Build value counts and the coincidence matrix for a rating dataset
pub fn build_coincidence_matrix<I>(ratings: &[RaterResponse<I>]) -> CoincidenceMatrix
where
    I: Eq + Hash + Ord,
{
    let mut matrix = CoincidenceMatrix::new();
    for unit in pairable_units(ratings) {
        matrix.add_unit(&unit);
    }
    matrix
}
