use crate::model::{MatchedPair, SafetyFlag, SafetyIssue, SafetySummary};

/// Flag every matched pair whose polarity changed between runs.
pub fn detect_polarity_flips(pairs: &[MatchedPair]) -> Vec<SafetyFlag> {
    pairs
        .iter()
        .filter(|p| p.polarity_differs())
        .map(|p| SafetyFlag {
            domain: p.left.domain.clone(),
            text_a: p.left.text.clone(),
            text_b: p.right.text.clone(),
            issue: SafetyIssue::PolarityFlip,
        })
        .collect()
}

pub fn summarize_safety(flags: Vec<SafetyFlag>) -> SafetySummary {
    SafetySummary {
        total_flags: flags.len(),
        flags,
    }
}
