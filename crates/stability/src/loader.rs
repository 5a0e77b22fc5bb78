use serde::{Deserialize, Deserializer};

use crate::error::EvalError;
use crate::model::{Item, Run};

/// Run document as produced by the extraction step: `{"items": [...]}`.
#[derive(Debug, Deserialize)]
struct RawRun {
    items: Vec<RawItem>,
}

/// Item record with every field optional; required ones are checked after parse
/// so the error can name the run and item position.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawItem {
    domain: Option<String>,
    evidence_span: Option<String>,
    text: Option<String>,
    polarity: Option<String>,
    #[serde(deserialize_with = "present")]
    intensity_bucket: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    arousal_bucket: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    time_bucket: Option<Option<String>>,
}

/// Only called when the key exists, so a `null` value still counts as present.
/// Missing keys fall back to the container default (`None`).
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Parse one run document. `run` is the run's position, used in errors.
///
/// A missing `domain`, `evidence_span` or `text` aborts the whole load.
pub fn load_run(run: usize, json: &str) -> Result<Run, EvalError> {
    let raw: RawRun = serde_json::from_str(json).map_err(|e| EvalError::RunParse {
        run,
        message: e.to_string(),
    })?;

    let items = raw
        .items
        .into_iter()
        .enumerate()
        .map(|(item, raw_item)| to_item(run, item, raw_item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Run::new(items))
}

/// Parse several run documents, numbering them in order.
pub fn load_runs<S: AsRef<str>>(documents: &[S]) -> Result<Vec<Run>, EvalError> {
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| load_run(i, doc.as_ref()))
        .collect()
}

fn to_item(run: usize, item: usize, raw: RawItem) -> Result<Item, EvalError> {
    let required = |value: Option<String>, field: &str| {
        value.ok_or_else(|| EvalError::MissingField {
            run,
            item,
            field: field.to_string(),
        })
    };

    Ok(Item {
        domain: required(raw.domain, "domain")?,
        evidence_span: required(raw.evidence_span, "evidence_span")?,
        text: required(raw.text, "text")?,
        polarity: raw.polarity,
        intensity_bucket: raw.intensity_bucket,
        arousal_bucket: raw.arousal_bucket,
        time_bucket: raw.time_bucket,
    })
}
