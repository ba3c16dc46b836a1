//! CLI argument definitions using clap
//!
//! Commands:
//! - datagate serve --config <path> [--port <port>]
//! - datagate check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// datagate - a validated REST facade over a hosted record table
#[derive(Parser, Debug)]
#[command(name = "datagate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./datagate.json")]
        config: PathBuf,

        /// Port to listen on, overriding the configuration
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load and validate the configuration, then print it
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./datagate.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
