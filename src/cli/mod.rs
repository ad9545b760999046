//! CLI module for docdash
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API over the configured document store
//! - collections / fields / show: Browse collections and documents
//! - add / edit / delete / drop: Mutate through the API
//! - export: Write the filtered view to a spreadsheet

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{ApiArgs, Cli, Command, FilterArgs, ServeArgs};
pub use commands::{build_filter, run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
