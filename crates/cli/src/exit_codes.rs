//! CLI Exit Code Registry
//!
//! Single source of truth for `driftcheck` exit codes. Scripts and CI jobs
//! branch on these, so treat them as part of the shell contract.
//!
//! | Code | Meaning                                                |
//! |------|--------------------------------------------------------|
//! | 0    | Success                                                |
//! | 1    | General error (unspecified)                            |
//! | 2    | Usage error (bad args, no runs given)                  |
//! | 3    | Invalid config (TOML parse or validation failure)      |
//! | 4    | Run load failure (unreadable file, bad JSON, missing field) |
//! | 5    | Safety flags found (only with `--fail-on-flags`)       |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Config could not be parsed or failed validation.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// A run document could not be read, parsed, or lacks a required field.
pub const EXIT_RUN_LOAD: u8 = 4;

/// Evaluation completed but polarity flips were detected.
pub const EXIT_SAFETY_FLAGS: u8 = 5;
