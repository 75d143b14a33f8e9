//! cakeshop-config binary
//!
//! Command-line entry point for the Cakeshop configuration bootstrap.

use anyhow::Context;
use cakeshop_config::cli::{map_error, Cli, RunContext};
use cakeshop_config::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(Some(&build_logging_config(&cli))) {
        eprintln!("Failed to initialize logging: {:#}", anyhow::Error::new(e));
        process::exit(1);
    }

    if let Err(e) = run(&cli) {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    info!("cakeshop-config starting");
    let context = RunContext::from_cli(cli);

    let output = context
        .execute(&cli.command)
        .map_err(|e| {
            error!("Command failed: {}", e);
            anyhow::anyhow!(map_error(&e))
        })
        .with_context(|| format!("{:?} failed", cli.command))?;

    info!("Command completed successfully");
    println!("{}", output.trim_end());
    Ok(())
}

/// Build logging configuration from CLI args.
/// Precedence: CLI flags override defaults; CAKESHOP_LOG* env vars override both.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = LoggingConfig::default();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }
    config
}
