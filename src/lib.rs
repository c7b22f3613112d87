pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::domain::error::AppError;
use crate::interfaces::cli::{execute, Cli};

pub fn run() -> ExitCode {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    let result = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::Internal(format!("Failed to start async runtime: {}", e)))
        .and_then(|runtime| runtime.block_on(execute(cli)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
