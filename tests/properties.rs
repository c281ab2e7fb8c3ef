//! Property tests for coincidence matrices, difference metrics and alpha.

#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use proptest::prelude::*;
use rater_agreement::{
    build_coincidence_matrix, rater_response, AlphaError, DifferenceMetric, Label, MetricKind,
    RaterResponse, ReliabilityCalculator,
};
use std::collections::HashMap;

fn dataset() -> impl Strategy<Value = Vec<RaterResponse<u32>>> {
    proptest::collection::vec(
        proptest::collection::hash_map(0_u32..12, 1_i32..6, 0..12),
        2..5,
    )
    .prop_map(|raters| raters.into_iter().map(rater_response).collect())
}

/// Same error kind, or bit-identical alpha
fn same_outcome(a: &Result<f64, AlphaError>, b: &Result<f64, AlphaError>) -> bool {
    match (a, b) {
        (Ok(x), Ok(y)) => x.to_bits() == y.to_bits(),
        (Err(x), Err(y)) => std::mem::discriminant(x) == std::mem::discriminant(y),
        _ => false,
    }
}

proptest! {
    #[test]
    fn coincidence_matrix_is_symmetric(ratings in dataset()) {
        let matrix = build_coincidence_matrix(&ratings);
        for (c, k, weight) in matrix.iter() {
            prop_assert!((matrix.get(k, c) - weight).abs() < 1e-9);
        }
    }

    #[test]
    fn matrix_labels_match_value_counts(ratings in dataset()) {
        let matrix = build_coincidence_matrix(&ratings);
        for (c, k, _) in matrix.iter() {
            prop_assert!(matrix.value_counts().contains(c));
            prop_assert!(matrix.value_counts().contains(k));
        }
        for label in matrix.value_counts().labels() {
            prop_assert!(matrix.iter().any(|(c, _, _)| c == label));
        }
    }

    #[test]
    fn metrics_non_negative_with_identity(ratings in dataset()) {
        let matrix = build_coincidence_matrix(&ratings);
        let counts = matrix.value_counts();
        for kind in MetricKind::ALL {
            for c in counts.labels() {
                prop_assert_eq!(kind.difference(c, c, counts).unwrap(), 0.0);
                for k in counts.labels() {
                    prop_assert!(kind.difference(c, k, counts).unwrap() >= 0.0);
                }
            }
        }
    }

    #[test]
    fn alpha_never_exceeds_one(ratings in dataset()) {
        let calc = ReliabilityCalculator::new(&ratings).unwrap();
        for kind in MetricKind::ALL {
            if let Ok(alpha) = calc.compute_alpha(&kind) {
                prop_assert!(alpha <= 1.0 + 1e-12, "{} alpha {}", kind, alpha);
            }
        }
    }

    #[test]
    fn perfect_agreement_gives_one(
        truth in proptest::collection::vec(1_i32..6, 1..10),
        mask in proptest::collection::vec(proptest::collection::vec(any::<bool>(), 10), 3),
    ) {
        let ratings: Vec<RaterResponse<usize>> = mask
            .iter()
            .map(|rated| {
                rater_response(
                    truth
                        .iter()
                        .enumerate()
                        .filter(|(item, _)| rated[*item])
                        .map(|(item, label)| (item, *label)),
                )
            })
            .collect();
        let calc = ReliabilityCalculator::new(&ratings).unwrap();

        for kind in MetricKind::ALL {
            match calc.compute_alpha(&kind) {
                Ok(alpha) => prop_assert_eq!(alpha, 1.0),
                Err(e) => prop_assert!(e.is_undefined()),
            }
        }
    }

    #[test]
    fn single_rated_items_are_ignored(ratings in dataset(), label in 1_i32..6) {
        let mut extended = ratings.clone();
        extended[0].insert(1_000, Label::from(label));

        let base = ReliabilityCalculator::new(&ratings).unwrap();
        let more = ReliabilityCalculator::new(&extended).unwrap();
        for kind in MetricKind::ALL {
            prop_assert!(same_outcome(&base.compute_alpha(&kind), &more.compute_alpha(&kind)));
        }
    }

    #[test]
    fn alpha_is_deterministic(ratings in dataset()) {
        let first = ReliabilityCalculator::new(&ratings).unwrap();
        let second = ReliabilityCalculator::new(&ratings).unwrap();
        for kind in MetricKind::ALL {
            prop_assert!(same_outcome(&first.compute_alpha(&kind), &second.compute_alpha(&kind)));
            prop_assert!(same_outcome(&first.compute_alpha(&kind), &first.compute_alpha(&kind)));
        }
    }
}

#[test]
fn later_rating_for_same_item_wins() {
    let response: HashMap<u32, Label> = rater_response([(1, 2), (1, 3)]);
    assert_eq!(response.len(), 1);
    assert_eq!(response[&1], Label::from(3));
}
