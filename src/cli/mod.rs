//! CLI module for geobook
//!
//! Provides command-line interface for:
//! - init: Create the database file and schema
//! - serve: Boot storage and serve the HTTP API

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use errors::{CliError, CliResult};
