//! JSON I/O handling for CLI
//!
//! - Input: one write body via stdin
//! - Output: one response envelope via stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use crate::api::Response;

use super::errors::{CliError, CliResult};

/// Read the whole of stdin as a request body
pub fn read_body() -> CliResult<String> {
    let mut body = String::new();
    io::stdin().lock().read_to_string(&mut body)?;

    if body.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(body)
}

/// Write a response envelope to stdout
pub fn write_response(response: &Response) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
