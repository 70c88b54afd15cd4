//! modelcap CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or configuration

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use modelcap_core::ModelError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_CONFIG: u8 = 2;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(cli.verbose)));

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Models(args) => commands::models::execute(args),
        Commands::Router(args) => commands::router::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

/// Log filter used when RUST_LOG is not set.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "modelcap_cli=debug,modelcap_core=debug,warn"
    } else {
        "modelcap_cli=info,modelcap_core=info,warn"
    }
}

/// Configuration mistakes get their own exit code so scripts can tell them apart.
fn categorize_error(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<ModelError>() {
        Some(model_error) if model_error.is_configuration_error() => ExitCodes::INVALID_CONFIG,
        _ => ExitCodes::GENERAL_ERROR,
    }
}
