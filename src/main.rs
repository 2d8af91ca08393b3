//! Hookline — priority-ordered hook and filter runner.
//!
//! Loads a hook plan from configuration, registers its callbacks and fires
//! its hooks, printing the outcome.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use hookline_core::config::AppConfig;
use hookline_core::config::logging::LoggingConfig;
use hookline_core::error::AppError;

mod commands;
mod output;

use commands::Cli;

fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = cli.execute(&config) {
        tracing::error!("Command failed: {}", e);
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Load configuration from an explicit file or the default/env overlay.
fn load_configuration(cli: &Cli) -> Result<AppConfig, AppError> {
    match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(&cli.env),
    }
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
