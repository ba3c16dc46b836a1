//! CLI module for datagate
//!
//! Provides command-line interface for:
//! - serve: load configuration and run the HTTP server
//! - check-config: validate and print the resolved configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{build_storage, check_config, run, run_command, serve};
pub use errors::{CliError, CliResult};
