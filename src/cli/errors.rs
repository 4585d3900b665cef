//! CLI-specific error types
//!
//! CLI errors end the process with a non-zero exit. Request-level failures
//! are not CLI errors: they are printed as 400 envelopes.

use std::fmt;
use std::io;

use crate::grid::GridError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Workbook already exists
    AlreadyInitialized,
    /// Workbook could not be opened
    WorkbookError,
    /// Server failed to start or stopped with an error
    ServeFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "GRID_CLI_CONFIG_ERROR",
            Self::IoError => "GRID_CLI_IO_ERROR",
            Self::AlreadyInitialized => "GRID_CLI_ALREADY_INITIALIZED",
            Self::WorkbookError => "GRID_CLI_WORKBOOK_ERROR",
            Self::ServeFailed => "GRID_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Workbook already present
    pub fn already_initialized(path: &std::path::Path) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Workbook already exists: {}", path.display()),
        )
    }

    /// Serve failed
    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<GridError> for CliError {
    fn from(e: GridError) -> Self {
        Self::new(CliErrorCode::WorkbookError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("workbook must not be empty");
        assert_eq!(
            err.to_string(),
            "GRID_CLI_CONFIG_ERROR: workbook must not be empty"
        );
    }

    #[test]
    fn test_grid_error_conversion() {
        let err: CliError = GridError::Corrupt("eof".into()).into();
        assert_eq!(err.code(), &CliErrorCode::WorkbookError);
        assert!(err.message().contains("eof"));
    }
}
