use std::collections::BTreeMap;

use crate::model::{BucketKey, BucketTally, MatchedPair, StabilityMetrics};

/// Matched pairs over matched pairs: 1.0 for any non-empty input.
///
/// Unmatched items never reach this point, so the rate cannot relate matches
/// to total item count.
pub fn compute_agreement_rate(pairs: &[MatchedPair]) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    pairs.len() as f64 / pairs.len() as f64
}

/// Number of pairs whose two polarity values differ.
pub fn count_polarity_flips(pairs: &[MatchedPair]) -> usize {
    pairs.iter().filter(|p| p.polarity_differs()).count()
}

pub fn compute_polarity_flip_rate(pairs: &[MatchedPair]) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    count_polarity_flips(pairs) as f64 / pairs.len() as f64
}

/// Per-bucket checks and drifts. A key is checked only when both sides have it;
/// a `null` value counts as having it and drifts against any label.
pub fn compute_bucket_tallies(pairs: &[MatchedPair]) -> BTreeMap<BucketKey, BucketTally> {
    let mut tallies: BTreeMap<BucketKey, BucketTally> = BucketKey::ALL
        .iter()
        .map(|k| (*k, BucketTally::default()))
        .collect();

    for pair in pairs {
        for key in BucketKey::ALL {
            if let (Some(a), Some(b)) = (pair.left.bucket(key), pair.right.bucket(key)) {
                let tally = tallies.entry(key).or_default();
                tally.checks += 1;
                if a != b {
                    tally.drifts += 1;
                }
            }
        }
    }

    tallies
}

/// Total drift over total checks, pooled across all bucket keys.
pub fn compute_bucket_drift_rate(pairs: &[MatchedPair]) -> f64 {
    let (checks, drifts) = compute_bucket_tallies(pairs)
        .values()
        .fold((0, 0), |(c, d), t| (c + t.checks, d + t.drifts));
    if checks == 0 {
        return 0.0;
    }
    drifts as f64 / checks as f64
}

pub fn compute_metrics(pairs: &[MatchedPair]) -> StabilityMetrics {
    StabilityMetrics {
        agreement_rate: compute_agreement_rate(pairs),
        polarity_flip_rate: compute_polarity_flip_rate(pairs),
        bucket_drift_rate: compute_bucket_drift_rate(pairs),
    }
}
