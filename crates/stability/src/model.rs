use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One extracted unit from a run.
///
/// Optional attributes stay `Option` so that "absent" and "present but
/// different" remain distinguishable in flip and drift computations.
///
/// Bucket fields nest twice: the outer `Option` records whether the key was
/// present at all, the inner one whether it carried a label or `null`. A
/// present `null` still takes part in drift checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub domain: String,
    pub evidence_span: String,
    pub text: String,
    pub polarity: Option<String>,
    pub intensity_bucket: Option<Option<String>>,
    pub arousal_bucket: Option<Option<String>>,
    pub time_bucket: Option<Option<String>>,
}

impl Item {
    pub fn new(
        domain: impl Into<String>,
        evidence_span: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            evidence_span: evidence_span.into(),
            text: text.into(),
            polarity: None,
            intensity_bucket: None,
            arousal_bucket: None,
            time_bucket: None,
        }
    }

    pub fn with_polarity(mut self, polarity: impl Into<String>) -> Self {
        self.polarity = Some(polarity.into());
        self
    }

    pub fn with_bucket(self, key: BucketKey, level: impl Into<String>) -> Self {
        self.set_bucket(key, Some(level.into()))
    }

    /// Mark the bucket key as present with a `null` value.
    pub fn with_null_bucket(self, key: BucketKey) -> Self {
        self.set_bucket(key, None)
    }

    fn set_bucket(mut self, key: BucketKey, level: Option<String>) -> Self {
        match key {
            BucketKey::Intensity => self.intensity_bucket = Some(level),
            BucketKey::Arousal => self.arousal_bucket = Some(level),
            BucketKey::Time => self.time_bucket = Some(level),
        }
        self
    }

    /// `None` when the key is absent, `Some(None)` when it is present as `null`.
    pub fn bucket(&self, key: BucketKey) -> Option<Option<&str>> {
        let slot = match key {
            BucketKey::Intensity => &self.intensity_bucket,
            BucketKey::Arousal => &self.arousal_bucket,
            BucketKey::Time => &self.time_bucket,
        };
        slot.as_ref().map(|level| level.as_deref())
    }
}

/// Ordered items from one inference execution. Order is match priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub items: Vec<Item>,
}

impl Run {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

/// Pre-loaded runs, in the order they were supplied.
#[derive(Debug)]
pub struct EvalInput {
    pub runs: Vec<Run>,
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKey {
    Intensity,
    Arousal,
    Time,
}

impl BucketKey {
    pub const ALL: [BucketKey; 3] = [Self::Intensity, Self::Arousal, Self::Time];

    /// Field name in the run document.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Intensity => "intensity_bucket",
            Self::Arousal => "arousal_bucket",
            Self::Time => "time_bucket",
        }
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

// ---------------------------------------------------------------------------
// Pair matching
// ---------------------------------------------------------------------------

/// Two items from different runs judged to describe the same concept.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedPair {
    pub left: Item,
    pub right: Item,
    /// Position of `left` in run A.
    pub left_index: usize,
    /// Position of `right` in run B.
    pub right_index: usize,
    pub score: f64,
}

impl MatchedPair {
    /// Absent polarity differs from every label and equals only absent.
    pub fn polarity_differs(&self) -> bool {
        self.left.polarity != self.right.polarity
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StabilityMetrics {
    pub agreement_rate: f64,
    pub polarity_flip_rate: f64,
    pub bucket_drift_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketTally {
    pub checks: usize,
    pub drifts: usize,
}

// ---------------------------------------------------------------------------
// Safety
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SafetyIssue {
    #[serde(rename = "POLARITY_FLIP")]
    PolarityFlip,
}

impl std::fmt::Display for SafetyIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PolarityFlip => write!(f, "POLARITY_FLIP"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyFlag {
    pub domain: String,
    pub text_a: String,
    pub text_b: String,
    pub issue: SafetyIssue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetySummary {
    pub total_flags: usize,
    pub flags: Vec<SafetyFlag>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

/// Match counts for one unordered run pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunPairSummary {
    pub run_a: usize,
    pub run_b: usize,
    pub items_a: usize,
    pub items_b: usize,
    pub matched: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalSummary {
    pub matched_pairs: usize,
    pub polarity_flips: usize,
    pub bucket_checks: usize,
    pub bucket_drifts: usize,
    pub buckets: BTreeMap<String, BucketTally>,
    pub run_pairs: Vec<RunPairSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalResult {
    pub meta: EvalMeta,
    pub metrics: StabilityMetrics,
    pub safety: SafetySummary,
    pub summary: EvalSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalMeta {
    pub config_name: String,
    pub engine_version: String,
    pub threshold: f64,
    pub run_count: usize,
    pub run_pair_count: usize,
    pub run_at: String,
}
