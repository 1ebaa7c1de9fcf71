//! CLI command implementations
//!
//! Both commands load configuration the same way; `init` stops after the
//! database exists, `serve` goes on to run the HTTP server.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::api::ApiServer;
use crate::config::AppConfig;
use crate::logging;
use crate::storage::Storage;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Create the database file and address schema without serving
///
/// Idempotent: running against an existing database leaves its data
/// untouched.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        Storage::connect(&config.database_path)
            .await
            .map_err(|e| CliError::boot_failed(format!("Storage setup failed: {}", e)))
    })?;

    println!(
        "{}",
        json!({"initialized": true, "database": config.database_path})
    );

    Ok(())
}

/// Boot storage and serve the HTTP API
///
/// The --port flag, when given, overrides the configured port.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }

    logging::init();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        let storage = Storage::connect(&config.database_path)
            .await
            .map_err(|e| CliError::boot_failed(format!("Storage setup failed: {}", e)))?;

        let server = ApiServer::new(config, Arc::new(storage));
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent
fn load_config(path: &Path) -> CliResult<AppConfig> {
    AppConfig::load_or_default(path).map_err(|e| CliError::config_error(e.to_string()))
}
