//! `driftcheck-stability` — Cross-run stability and safety evaluation.
//!
//! Pure engine crate: receives pre-loaded runs, returns metrics and safety flags.
//! No CLI or IO dependencies.

pub mod config;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod safety;
pub mod similarity;

pub use config::EvalConfig;
pub use error::EvalError;
pub use model::{EvalInput, EvalResult, Item, MatchedPair, Run, SafetyFlag};
pub use pipeline::run;
