//! CLI support for rowfilter
//!
//! Provides programmatic access to the rowfilter CLI functionality for
//! embedding in other tools.

mod check;
mod docs;
mod explain;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use docs::get_operators_reference;
pub use explain::explain;

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Filter could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    /// Input is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,
}
