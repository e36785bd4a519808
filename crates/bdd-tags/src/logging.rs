//! Structured logging for the command.
//!
//! Logs go to stderr so stdout carries only command output. Records emitted
//! through the `log` facade by the tag-expression library are forwarded to
//! the same subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `BDD_TAGS_LOG_LEVEL`
/// 3. Default configuration value
///
/// If a global subscriber is already installed the call does nothing.
pub fn init_logging(config: &CliConfig) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
    // The first subscriber wins.
    drop(result);
}
