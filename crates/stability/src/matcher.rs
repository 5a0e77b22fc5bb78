use crate::model::{Item, MatchedPair};
use crate::similarity::jaccard_overlap;

/// Default minimum evidence-span overlap for a match.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Greedy one-to-one alignment of two runs by evidence-span overlap.
///
/// Left items are visited in order; each claims the unused same-domain right
/// item with the strictly highest score (first seen wins ties), provided that
/// score reaches `threshold`. Left items without such a candidate are dropped.
/// Earlier left items may take a right item a later one would have preferred.
pub fn match_items(left: &[Item], right: &[Item], threshold: f64) -> Vec<MatchedPair> {
    let mut right_used = vec![false; right.len()];
    let mut matched = Vec::new();

    for (li, left_item) in left.iter().enumerate() {
        let mut best: Option<(usize, f64)> = None;
        let mut best_score = 0.0;

        for (ri, right_item) in right.iter().enumerate() {
            if right_used[ri] {
                continue;
            }
            // Never compare across domains
            if left_item.domain != right_item.domain {
                continue;
            }

            let score = jaccard_overlap(&left_item.evidence_span, &right_item.evidence_span);
            if score > best_score {
                best_score = score;
                best = Some((ri, score));
            }
        }

        if let Some((ri, score)) = best {
            if score >= threshold {
                right_used[ri] = true;
                matched.push(MatchedPair {
                    left: left_item.clone(),
                    right: right[ri].clone(),
                    left_index: li,
                    right_index: ri,
                    score,
                });
            }
        }
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(domain: &str, span: &str, text: &str) -> Item {
        Item::new(domain, span, text)
    }

    #[test]
    fn matches_above_threshold() {
        let left = vec![item("d1", "the cat sat", "T1")];
        let right = vec![item("d1", "the cat sat on mat", "T2")];
        let out = match_items(&left, &right, DEFAULT_THRESHOLD);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].left.text, "T1");
        assert_eq!(out[0].right.text, "T2");
        assert!((out[0].score - 0.6).abs() < 1e-12);
    }

    #[test]
    fn below_threshold_dropped() {
        let left = vec![item("d1", "apple banana", "A")];
        let right = vec![item("d1", "car truck train", "B")];
        assert!(match_items(&left, &right, DEFAULT_THRESHOLD).is_empty());
    }

    #[test]
    fn no_cross_domain() {
        let left = vec![item("mood", "feeling great today", "A")];
        let right = vec![item("health", "feeling great today", "B")];
        assert!(match_items(&left, &right, DEFAULT_THRESHOLD).is_empty());
    }

    #[test]
    fn right_item_used_once() {
        let left = vec![
            item("d1", "slept badly last night", "A1"),
            item("d1", "slept badly last night", "A2"),
        ];
        let right = vec![item("d1", "slept badly last night", "B1")];
        let out = match_items(&left, &right, DEFAULT_THRESHOLD);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].left.text, "A1");
    }

    #[test]
    fn first_seen_wins_ties() {
        let left = vec![item("d1", "a b", "A")];
        let right = vec![
            item("d1", "a c", "B1"), // 1/3
            item("d1", "b d", "B2"), // 1/3
            item("d1", "a b c d", "B3"), // 2/4
        ];
        let out = match_items(&left, &right, 0.3);
        assert_eq!(out[0].right.text, "B3");

        let right = vec![item("d1", "a b x", "B1"), item("d1", "a b y", "B2")];
        let out = match_items(&left, &right, 0.3);
        assert_eq!(out[0].right_index, 0);
    }

    #[test]
    fn greedy_order_is_not_optimal() {
        // Optimal assignment is A1-B2 (0.75) + A2-B1 (0.67), but A1 claims
        // B1 first and A2 is left with B2 at 0.5.
        let left = vec![item("d1", "a b c", "A1"), item("d1", "a b", "A2")];
        let right = vec![item("d1", "a b c", "B1"), item("d1", "a b c d", "B2")];
        let out = match_items(&left, &right, 0.6);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].left.text, "A1");
        assert_eq!(out[0].right.text, "B1");
    }

    #[test]
    fn best_score_must_reach_threshold() {
        let left = vec![item("d1", "a b c d", "A")];
        let right = vec![item("d1", "a", "B1"), item("d1", "a b", "B2")];
        // Best is B2 at 0.5
        let out = match_items(&left, &right, 0.5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].right.text, "B2");
        assert!(match_items(&left, &right, 0.51).is_empty());
    }

    #[test]
    fn zero_overlap_never_matches_even_at_zero_threshold() {
        let left = vec![item("d1", "apple", "A")];
        let right = vec![item("d1", "pear", "B")];
        assert!(match_items(&left, &right, 0.0).is_empty());
    }

    #[test]
    fn empty_runs() {
        assert!(match_items(&[], &[item("d1", "a", "B")], 0.5).is_empty());
        assert!(match_items(&[item("d1", "a", "A")], &[], 0.5).is_empty());
    }
}
