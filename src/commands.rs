//! CLI command definitions and dispatch.

use clap::{Parser, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use hookline_core::config::AppConfig;
use hookline_core::error::AppError;
use hookline_hooks::{FireOutcome, RegistrationInfo, build_table, run_fires};

use crate::output::{self, OutputFormat};

/// Hookline — priority-ordered hook and filter runner
#[derive(Debug, Parser)]
#[command(name = "hookline", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (defaults to config/default + config/<env>)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay used when no explicit config file is given
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register the plan's callbacks and fire its hooks
    Run,
    /// List the plan's registrations in firing order
    List,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let table = build_table(config)?;

        match self.command {
            Commands::Run => {
                let outcomes = run_fires(&table, &config.fire);
                let rows: Vec<FireRow> = outcomes.iter().map(FireRow::from).collect();
                output::print_list(&rows, self.format);
                if self.format == OutputFormat::Table {
                    output::print_success(&format!("Fired {} hook(s)", outcomes.len()));
                }
            }
            Commands::List => {
                let rows: Vec<RegistrationRow> = table
                    .registrations()
                    .iter()
                    .map(RegistrationRow::from)
                    .collect();
                output::print_list(&rows, self.format);
            }
        }

        Ok(())
    }
}

/// One fire outcome as printed.
#[derive(Debug, Serialize, Tabled)]
struct FireRow {
    hook: String,
    mode: String,
    callbacks: usize,
    result: String,
}

impl From<&FireOutcome> for FireRow {
    fn from(outcome: &FireOutcome) -> Self {
        Self {
            hook: outcome.hook.clone(),
            mode: outcome.mode.to_string(),
            callbacks: outcome.callbacks,
            result: outcome.result.to_string(),
        }
    }
}

/// One registration as printed.
#[derive(Debug, Serialize, Tabled)]
struct RegistrationRow {
    hook: String,
    priority: i64,
    callback: String,
    accepted_args: usize,
}

impl From<&RegistrationInfo> for RegistrationRow {
    fn from(info: &RegistrationInfo) -> Self {
        Self {
            hook: info.hook.clone(),
            priority: info.priority,
            callback: info.callback.to_string(),
            accepted_args: info.accepted_args,
        }
    }
}
