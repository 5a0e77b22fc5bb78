//! `driftcheck run` / `driftcheck validate` — evaluate repeated runs for stability.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use log::debug;

use driftcheck_stability::config::validate_threshold;
use driftcheck_stability::loader::load_run;
use driftcheck_stability::{EvalConfig, EvalInput, EvalResult};

use crate::exit_codes::{EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_RUN_LOAD, EXIT_SAFETY_FLAGS};
use crate::CliError;

#[derive(Subcommand)]
pub enum EvalCommands {
    /// Match items across every pair of runs and report stability + safety
    #[command(after_help = "\
Examples:
  driftcheck run eval.toml
  driftcheck run eval.toml --json
  driftcheck run --runs run1.json run2.json run3.json --threshold 0.6
  driftcheck run eval.toml --output report.json --fail-on-flags")]
    Run {
        /// Path to the eval .toml config file
        config: Option<PathBuf>,

        /// Run documents to compare (overrides `runs` in the config)
        #[arg(long, num_args = 1..)]
        runs: Vec<PathBuf>,

        /// Minimum evidence-span overlap for a match, 0..=1 (overrides config)
        #[arg(long, env = "DRIFTCHECK_THRESHOLD")]
        threshold: Option<f64>,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit non-zero when any polarity flip is detected
        #[arg(long)]
        fail_on_flags: bool,
    },

    /// Validate an eval config without running
    #[command(after_help = "\
Examples:
  driftcheck validate eval.toml")]
    Validate {
        /// Path to the eval .toml config file
        config: PathBuf,
    },
}

pub fn cmd_eval(cmd: EvalCommands) -> Result<(), CliError> {
    match cmd {
        EvalCommands::Run {
            config,
            runs,
            threshold,
            json,
            output,
            fail_on_flags,
        } => cmd_run(config, runs, threshold, json, output, fail_on_flags),
        EvalCommands::Validate { config } => cmd_validate(config),
    }
}

fn eval_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

/// Read a config file. `strict` also validates it; `run` defers validation
/// until command-line overrides are applied.
fn read_config(path: &Path, strict: bool) -> Result<EvalConfig, CliError> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
    let parsed = if strict {
        EvalConfig::from_toml(&config_str)
    } else {
        EvalConfig::parse_toml(&config_str)
    };
    parsed.map_err(|e| eval_err(EXIT_INVALID_CONFIG, e.to_string()))
}

fn cmd_run(
    config_path: Option<PathBuf>,
    run_args: Vec<PathBuf>,
    threshold: Option<f64>,
    json_output: bool,
    output_file: Option<PathBuf>,
    fail_on_flags: bool,
) -> Result<(), CliError> {
    let (mut config, base_dir) = match config_path {
        Some(ref path) => {
            let config = read_config(path, false)?;
            // Resolve file paths relative to config file's directory
            let base = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            (config, base)
        }
        None => (EvalConfig::default(), PathBuf::from(".")),
    };

    if let Some(t) = threshold {
        validate_threshold(t).map_err(|e| CliError::args(e.to_string()))?;
        config.threshold = t;
    }

    // Validate the merged config: --runs replaces the config's run list
    if config_path.is_some() {
        let merged = if run_args.is_empty() {
            config.validate()
        } else {
            validate_threshold(config.threshold)
        };
        merged.map_err(|e| eval_err(EXIT_INVALID_CONFIG, e.to_string()))?;
    }

    let run_paths: Vec<PathBuf> = if run_args.is_empty() {
        config.runs.iter().map(|r| base_dir.join(r)).collect()
    } else {
        run_args
    };

    if run_paths.len() < 2 {
        return Err(CliError::args(format!(
            "at least 2 run files are required, found {}",
            run_paths.len()
        ))
        .with_hint("pass a config file or --runs run1.json run2.json ..."));
    }

    // Load every run up front; one bad document aborts the batch
    let mut runs = Vec::with_capacity(run_paths.len());
    for (i, path) in run_paths.iter().enumerate() {
        let doc = std::fs::read_to_string(path)
            .map_err(|e| eval_err(EXIT_RUN_LOAD, format!("cannot read {}: {e}", path.display())))?;
        let run = load_run(i, &doc)
            .map_err(|e| eval_err(EXIT_RUN_LOAD, format!("{}: {e}", path.display())))?;
        debug!("loaded run {i} from {} ({} item(s))", path.display(), run.items.len());
        runs.push(run);
    }

    let input = EvalInput { runs };
    let result = driftcheck_stability::run(&config, &input)
        .map_err(|e| eval_err(EXIT_ERROR, e.to_string()))?;

    // Output
    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| eval_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

    let output_path = output_file.or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));
    if let Some(ref path) = output_path {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    eprintln!("{}", summary_line(&result));

    if fail_on_flags && result.safety.total_flags > 0 {
        return Err(eval_err(
            EXIT_SAFETY_FLAGS,
            format!("{} safety flag(s) found", result.safety.total_flags),
        ));
    }

    Ok(())
}

fn summary_line(result: &EvalResult) -> String {
    format!(
        "{} run(s), {} run pair(s): {} matched pair(s), flip rate {:.3}, drift rate {:.3}, {} safety flag(s)",
        result.meta.run_count,
        result.meta.run_pair_count,
        result.summary.matched_pairs,
        result.metrics.polarity_flip_rate,
        result.metrics.bucket_drift_rate,
        result.safety.total_flags,
    )
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path, true)?;
    eprintln!(
        "valid: eval '{}' with {} run(s), threshold {}",
        config.name,
        config.runs.len(),
        config.threshold,
    );
    Ok(())
}
