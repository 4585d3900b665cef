//! CLI module for gridbase
//!
//! Provides command-line interface for:
//! - init: Create the workbook file, optionally seeding a table
//! - serve: Run the HTTP API
//! - read: One-shot read of a table
//! - write: One-shot write, body read from stdin

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, read, run, run_command, serve, write};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_body, write_response};
