use std::fmt;

#[derive(Debug)]
pub enum EvalError {
    /// An item record lacks a required field (`domain`, `evidence_span`, `text`).
    MissingField { run: usize, item: usize, field: String },
    /// A run document is not valid JSON or has the wrong shape.
    RunParse { run: usize, message: String },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad threshold, too few runs, etc.).
    ConfigValidation(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { run, item, field } => {
                write!(f, "run {run}, item {item}: missing required field '{field}'")
            }
            Self::RunParse { run, message } => write!(f, "run {run}: {message}"),
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for EvalError {}
