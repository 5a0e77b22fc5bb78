use serde::Deserialize;

use crate::error::EvalError;
use crate::matcher::DEFAULT_THRESHOLD;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct EvalConfig {
    pub name: String,
    /// Minimum evidence-span overlap for two items to be matched.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Run documents, resolved relative to the config file by the caller.
    #[serde(default)]
    pub runs: Vec<String>,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            name: "adhoc".into(),
            threshold: DEFAULT_THRESHOLD,
            runs: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl EvalConfig {
    pub fn from_toml(input: &str) -> Result<Self, EvalError> {
        let config = Self::parse_toml(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse without validating, for callers that merge overrides first.
    pub fn parse_toml(input: &str) -> Result<Self, EvalError> {
        toml::from_str(input).map_err(|e| EvalError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), EvalError> {
        validate_threshold(self.threshold)?;

        if self.runs.len() < 2 {
            return Err(EvalError::ConfigValidation(format!(
                "at least 2 runs are required, found {}",
                self.runs.len()
            )));
        }

        Ok(())
    }
}

/// Threshold must be a finite value in [0, 1].
pub fn validate_threshold(threshold: f64) -> Result<(), EvalError> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(EvalError::ConfigValidation(format!(
            "threshold must be between 0 and 1, got {threshold}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
