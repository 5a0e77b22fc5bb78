// driftcheck CLI - stability and safety evaluation over repeated model runs

mod eval;
mod exit_codes;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use eval::{cmd_eval, EvalCommands};
use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "driftcheck")]
#[command(about = "Cross-run stability and safety evaluation for extracted LLM items")]
#[command(version)]
struct Cli {
    /// Enable debug logging (per run pair match counts)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: EvalCommands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Engine logs go through the `log` facade; RUST_LOG overrides the level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.debug { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cmd_eval(cli.command) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
