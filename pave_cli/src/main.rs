//! # pave - Concrete Pavement Advisor CLI
//!
//! Command-line front end for `pave_core`. Every command prints a plain-text
//! report, or JSON with `--json`.
//!
//! ```text
//! pave score -p trafficVolume=2 -p designLife=20 -p subgradeCBR=3 -p slabThickness=200 --explain
//! pave design --type JPCP -p slabThickness=200
//! pave estimate --samples 100000 --seed 42 --parallel
//! pave calibrate --jrcp 1.1 --crcp 0.9
//! ```

mod cli;
mod config;
mod error;
mod report;
mod telemetry;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

fn start(cli: Cli) -> CliResult<String> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    cli::run(cli, &config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match start(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error [{}]: {}", err.code(), err);
            if let CliError::Core(core) = &err {
                if let Ok(json) = serde_json::to_string_pretty(core) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::from(err.exit_code())
        }
    }
}
