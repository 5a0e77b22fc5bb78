// Property-based tests for alignment and metric invariants.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashSet;

use proptest::prelude::*;
use driftcheck_stability::matcher::match_items;
use driftcheck_stability::metrics::{compute_agreement_rate, compute_metrics};
use driftcheck_stability::model::{BucketKey, Item};
use driftcheck_stability::similarity::{jaccard_overlap, tokenize};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Span drawn from a small vocabulary so overlaps are common.
fn arb_span() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["the", "cat", "sat", "on", "mat", "Mood", "low", "sleep", "well"]),
        0..6,
    )
    .prop_map(|words| words.join(" "))
}

fn arb_label() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        2 => prop_oneof![Just("pos"), Just("neg"), Just("neutral")].prop_map(|s| Some(s.to_string())),
    ]
}

fn arb_item() -> impl Strategy<Value = Item> {
    (
        prop_oneof![Just("mood"), Just("sleep")],
        arb_span(),
        arb_label(),
        arb_label(),
        arb_label(),
    )
        .prop_map(|(domain, span, polarity, intensity, time)| {
            let mut item = Item::new(domain, span, "text");
            item.polarity = polarity;
            if let Some(level) = intensity {
                item = item.with_bucket(BucketKey::Intensity, level);
            }
            if let Some(level) = time {
                item = item.with_bucket(BucketKey::Time, level);
            }
            item
        })
}

fn arb_run() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(arb_item(), 0..8)
}

// ---------------------------------------------------------------------------
// Similarity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn overlap_is_symmetric(a in arb_span(), b in arb_span()) {
        prop_assert_eq!(jaccard_overlap(&a, &b), jaccard_overlap(&b, &a));
    }

    #[test]
    fn overlap_in_unit_interval(a in arb_span(), b in arb_span()) {
        let score = jaccard_overlap(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn overlap_identity_and_empty(a in arb_span()) {
        if tokenize(&a).is_empty() {
            prop_assert_eq!(jaccard_overlap(&a, &a), 0.0);
        } else {
            prop_assert_eq!(jaccard_overlap(&a, &a.to_uppercase()), 1.0);
        }
        prop_assert_eq!(jaccard_overlap(&a, ""), 0.0);
    }
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn matcher_invariants(left in arb_run(), right in arb_run(), threshold in 0.0..=1.0f64) {
        let out = match_items(&left, &right, threshold);
        let mut used = HashSet::new();
        for pair in &out {
            prop_assert_eq!(&pair.left.domain, &pair.right.domain);
            prop_assert!(used.insert(pair.right_index), "right index reused");
            prop_assert!(pair.score >= threshold);
            prop_assert_eq!(
                pair.score,
                jaccard_overlap(&pair.left.evidence_span, &pair.right.evidence_span)
            );
            prop_assert_eq!(&right[pair.right_index], &pair.right);
            prop_assert_eq!(&left[pair.left_index], &pair.left);
        }
        // Left order is preserved
        let left_indices: Vec<usize> = out.iter().map(|p| p.left_index).collect();
        let mut sorted = left_indices.clone();
        sorted.sort_unstable();
        prop_assert_eq!(left_indices, sorted);
    }

    #[test]
    fn matcher_is_deterministic(left in arb_run(), right in arb_run()) {
        let a = match_items(&left, &right, 0.5);
        let b = match_items(&left, &right, 0.5);
        let ia: Vec<(usize, usize)> = a.iter().map(|p| (p.left_index, p.right_index)).collect();
        let ib: Vec<(usize, usize)> = b.iter().map(|p| (p.left_index, p.right_index)).collect();
        prop_assert_eq!(ia, ib);
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn rates_in_unit_interval(left in arb_run(), right in arb_run()) {
        let pairs = match_items(&left, &right, 0.3);
        let m = compute_metrics(&pairs);
        prop_assert!((0.0..=1.0).contains(&m.polarity_flip_rate));
        prop_assert!((0.0..=1.0).contains(&m.bucket_drift_rate));
        if pairs.is_empty() {
            prop_assert_eq!(m.agreement_rate, 0.0);
            prop_assert_eq!(m.polarity_flip_rate, 0.0);
            prop_assert_eq!(m.bucket_drift_rate, 0.0);
        } else {
            prop_assert_eq!(compute_agreement_rate(&pairs), 1.0);
        }
    }
}
