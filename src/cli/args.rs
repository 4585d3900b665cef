//! CLI argument definitions using clap
//!
//! Commands:
//! - gridbase init --config <path> [--table <name> --columns a,b,c]
//! - gridbase serve --config <path> [--port <port>]
//! - gridbase read --config <path> [--table <name>]
//! - gridbase write --config <path> [--table <name>] < body.json

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gridbase - CRUD over header-keyed tables
#[derive(Parser, Debug)]
#[command(name = "gridbase")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log filter (error, warn, info, debug, trace, or a full directive)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the workbook named in the configuration
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./gridbase.json")]
        config: PathBuf,

        /// Seed the workbook with a table of this name
        #[arg(long, requires = "columns")]
        table: Option<String>,

        /// Header row of the seeded table, comma separated
        #[arg(long, value_delimiter = ',', requires = "table")]
        columns: Vec<String>,
    },

    /// Serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./gridbase.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print every record of a table
    Read {
        /// Path to configuration file
        #[arg(long, default_value = "./gridbase.json")]
        config: PathBuf,

        /// Table to read (default: configured or first table)
        #[arg(long)]
        table: Option<String>,
    },

    /// Run an add, update or delete read from stdin
    Write {
        /// Path to configuration file
        #[arg(long, default_value = "./gridbase.json")]
        config: PathBuf,

        /// Table to write (default: configured or first table)
        #[arg(long)]
        table: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_init_with_columns() {
        let cli = Cli::parse_from([
            "gridbase", "init", "--table", "people", "--columns", "id,name",
        ]);
        match cli.command {
            Command::Init { table, columns, config } => {
                assert_eq!(table.as_deref(), Some("people"));
                assert_eq!(columns, vec!["id", "name"]);
                assert_eq!(config, PathBuf::from("./gridbase.json"));
            }
            other => panic!("Expected Init, got {:?}", other),
        }
    }

    #[test]
    fn test_table_requires_columns() {
        assert!(Cli::try_parse_from(["gridbase", "init", "--table", "people"]).is_err());
    }

    #[test]
    fn test_global_log_level() {
        let cli = Cli::parse_from(["gridbase", "read", "--log-level", "debug"]);
        assert_eq!(cli.log_level, "debug");
    }
}
