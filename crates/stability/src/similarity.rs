use std::collections::HashSet;

/// Lowercased whitespace-delimited token set.
pub fn tokenize(span: &str) -> HashSet<String> {
    span.split_whitespace().map(|t| t.to_lowercase()).collect()
}

/// Jaccard index over the token sets of two spans.
///
/// Returns 0.0 when either span has no tokens.
pub fn jaccard_overlap(span_a: &str, span_b: &str) -> f64 {
    let set_a = tokenize(span_a);
    let set_b = tokenize(span_b);
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.len() + set_b.len() - intersection;
    intersection as f64 / union as f64
}
