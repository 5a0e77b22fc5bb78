use log::{debug, info, warn};

use crate::config::{validate_threshold, EvalConfig};
use crate::error::EvalError;
use crate::matcher::match_items;
use crate::metrics::{compute_bucket_tallies, compute_metrics, count_polarity_flips};
use crate::model::{EvalInput, EvalMeta, EvalResult, EvalSummary, MatchedPair, Run, RunPairSummary};
use crate::safety::{detect_polarity_flips, summarize_safety};

/// Matched pairs pooled over every unordered run pair, plus per-pair counts.
#[derive(Debug)]
pub struct PooledMatches {
    pub pairs: Vec<MatchedPair>,
    pub run_pairs: Vec<RunPairSummary>,
}

/// Match every unordered pair of runs (i < j) and concatenate the results.
///
/// Metrics computed downstream see one flat collection; nothing is averaged
/// per run pair.
pub fn match_all_pairs(runs: &[Run], threshold: f64) -> PooledMatches {
    let mut pairs = Vec::new();
    let mut run_pairs = Vec::new();

    for (a, run_a) in runs.iter().enumerate() {
        for (b, run_b) in runs.iter().enumerate().skip(a + 1) {
            let matched = match_items(&run_a.items, &run_b.items, threshold);
            debug!(
                "runs {a}/{b}: {} matched of {}x{} item(s)",
                matched.len(),
                run_a.items.len(),
                run_b.items.len()
            );
            run_pairs.push(RunPairSummary {
                run_a: a,
                run_b: b,
                items_a: run_a.items.len(),
                items_b: run_b.items.len(),
                matched: matched.len(),
            });
            pairs.extend(matched);
        }
    }

    PooledMatches { pairs, run_pairs }
}

/// Run the evaluation per config. Returns metrics, safety flags and summary.
pub fn run(config: &EvalConfig, input: &EvalInput) -> Result<EvalResult, EvalError> {
    validate_threshold(config.threshold)?;

    if input.runs.len() < 2 {
        warn!(
            "{} run(s) supplied; at least 2 are needed for any match",
            input.runs.len()
        );
    }

    let pooled = match_all_pairs(&input.runs, config.threshold);

    let metrics = compute_metrics(&pooled.pairs);
    let safety = summarize_safety(detect_polarity_flips(&pooled.pairs));

    let tallies = compute_bucket_tallies(&pooled.pairs);
    let bucket_checks: usize = tallies.values().map(|t| t.checks).sum();
    let bucket_drifts: usize = tallies.values().map(|t| t.drifts).sum();

    info!(
        "{} run pair(s) pooled into {} matched pair(s), {} safety flag(s)",
        pooled.run_pairs.len(),
        pooled.pairs.len(),
        safety.total_flags
    );

    let summary = EvalSummary {
        matched_pairs: pooled.pairs.len(),
        polarity_flips: count_polarity_flips(&pooled.pairs),
        bucket_checks,
        bucket_drifts,
        buckets: tallies
            .into_iter()
            .map(|(key, tally)| (key.to_string(), tally))
            .collect(),
        run_pairs: pooled.run_pairs,
    };

    Ok(EvalResult {
        meta: EvalMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            threshold: config.threshold,
            run_count: input.runs.len(),
            run_pair_count: summary.run_pairs.len(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        metrics,
        safety,
        summary,
    })
}
