//! Semantic error types for the `bdd-tags` command.
//!
//! Library errors are carried unchanged so the message a user sees for a
//! malformed expression is exactly the one the parser produced.

use rstest_bdd_tags::TagExpressionError;
use thiserror::Error;

/// Errors raised while configuring or running the command.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A candidate line read from stdin could not be interpreted.
    #[error("invalid input on line {line}: {reason}")]
    InvalidInput {
        /// One-based line number within the input.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `--tags` expression was malformed.
    #[error(transparent)]
    Expression(#[from] TagExpressionError),
}
