//! CLI argument definitions using clap
//!
//! Commands:
//! - geobook init --config <path>
//! - geobook serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// geobook - A geospatial address book HTTP API
#[derive(Parser, Debug)]
#[command(name = "geobook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and schema without serving
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./geobook.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./geobook.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
