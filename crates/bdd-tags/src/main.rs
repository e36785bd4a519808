//! Binary entry point for `bdd-tags`.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use bdd_tags::cli::{Cli, run};
use bdd_tags::config::CliConfig;
use bdd_tags::error::CliError;
use bdd_tags::logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        dialect = %config.dialect,
        "starting bdd-tags"
    );

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    match run(&cli, &config, &mut input, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(cli.log_level, cli.dialect))
}
