//! Command configuration parsed from environment variables.
//!
//! Settings can be supplied through variables prefixed with `BDD_TAGS_` and
//! overridden by command-line flags.

use std::env;
use std::str::FromStr;

use rstest_bdd_tags::Dialect;

use crate::error::CliError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "BDD_TAGS_LOG_LEVEL";
/// Environment variable holding the tag-expression dialect.
pub const DIALECT_VAR: &str = "BDD_TAGS_DIALECT";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so legacy-dialect deprecation notices are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes parsed expression trees.
    Trace,
    /// Per-candidate selection decisions.
    Debug,
    /// Standard informational messages.
    Info,
    /// Deprecation notices and other warnings.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for one invocation of the command.
///
/// # Environment Variables
///
/// - `BDD_TAGS_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `BDD_TAGS_DIALECT`: expression dialect (current, legacy, auto)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level written to stderr.
    pub log_level: LogLevel,
    /// Dialect used to parse `--tags` expressions.
    pub dialect: Dialect,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidConfig`] if a variable holds an invalid
    /// value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidConfig`] if a variable holds an invalid
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup(LOG_LEVEL_VAR)
            .map(|val| val.parse::<LogLevel>())
            .transpose()?
            .unwrap_or_default();
        let dialect = lookup(DIALECT_VAR)
            .map(|val| {
                val.parse::<Dialect>()
                    .map_err(|err| CliError::InvalidConfig(err.to_string()))
            })
            .transpose()?
            .unwrap_or_default();
        Ok(Self { log_level, dialect })
    }

    /// Apply optional command-line overrides.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>, dialect: Option<Dialect>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(dialect) = dialect {
            self.dialect = dialect;
        }
        self
    }
}
