//! Command-line front end for rstest-bdd tag expressions.
//!
//! The `bdd-tags` binary parses the same `--tags` expressions a test runner
//! accepts and reports how they select candidates:
//!
//! - `show` prints the canonical form of the combined expressions
//! - `check` decides whether one set of tags is selected
//! - `filter` selects `NAME<TAB>TAGS` lines read from stdin
//!
//! # Configuration
//!
//! - `BDD_TAGS_LOG_LEVEL`: log verbosity (trace, debug, info, warn, error)
//! - `BDD_TAGS_DIALECT`: expression dialect (current, legacy, auto)
//!
//! Both are overridden by the `--log-level` and `--dialect` flags.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
mod output;
