//! CLI command implementations
//!
//! `read` and `write` go through the same [`ApiHandler`] as the HTTP
//! server, so they print exactly the envelope a client would receive.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::ApiHandler;
use crate::grid::{CellValue, GridStore, JsonWorkbookStore, Sheet};
use crate::http_server::HttpServer;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_body, write_response};

/// Main CLI entry point
///
/// Parses arguments, sets up logging, and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(&cli.log_level);
    run_command(cli.command)
}

/// Logs go to stderr so stdout carries only response envelopes
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_env("GRIDBASE_LOG")
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init {
            config,
            table,
            columns,
        } => init(&config, table.as_deref(), &columns),
        Command::Serve { config, port } => serve(&config, port),
        Command::Read { config, table } => read(&config, table.as_deref()),
        Command::Write { config, table } => write(&config, table.as_deref()),
    }
}

/// Create the workbook named in the configuration.
///
/// With `table`, the workbook starts with one table whose header row is
/// `columns`; otherwise it starts empty.
pub fn init(config_path: &Path, table: Option<&str>, columns: &[String]) -> CliResult<()> {
    let config = Config::load(config_path)?;
    if config.workbook.exists() {
        return Err(CliError::already_initialized(&config.workbook));
    }

    let sheets = match table {
        Some(name) => {
            if columns.iter().any(|c| c.trim().is_empty()) {
                return Err(CliError::config_error("Column names must not be blank"));
            }
            let header = columns
                .iter()
                .map(|c| CellValue::from(c.trim()))
                .collect();
            vec![Sheet::new(name, vec![header])]
        }
        None => Vec::new(),
    };

    let store = JsonWorkbookStore::create(&config.workbook, sheets)?;
    info!(workbook = %store.path().display(), "workbook created");
    Ok(())
}

fn handler(config: &Config) -> CliResult<ApiHandler<dyn GridStore>> {
    let store: Arc<dyn GridStore> = Arc::new(JsonWorkbookStore::open(&config.workbook)?);
    Ok(ApiHandler::new(store)
        .with_default_table(config.default_table.clone())
        .with_encoding(config.data_encoding))
}

/// Print every record of a table
pub fn read(config_path: &Path, table: Option<&str>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let response = handler(&config)?.handle_read(table);
    write_response(&response)
}

/// Run the write body read from stdin
pub fn write(config_path: &Path, table: Option<&str>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let handler = handler(&config)?;
    let body = read_body()?;
    let response = handler.handle_write(table, &body);
    write_response(&response)
}

/// Serve the HTTP API until the process is stopped
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let handler = Arc::new(handler(&config)?);
    let server = HttpServer::new(config.http.clone(), handler);
    info!(
        addr = %server.socket_addr(),
        workbook = %config.workbook.display(),
        "starting HTTP server"
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}
