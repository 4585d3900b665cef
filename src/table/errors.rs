//! # Table Engine Errors

use thiserror::Error;

use crate::grid::GridError;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Table engine errors.
///
/// Every variant is a client error: nothing here maps to a 5xx.
#[derive(Debug, Clone, Error)]
pub enum TableError {
    /// Named table missing, or no table to fall back on
    #[error("Table does not exist. {}", not_found_detail(.0))]
    NotFound(Option<String>),

    /// Payload failed a presence or shape check
    #[error("{0}")]
    Validation(String),

    /// Column name absent from the header row
    #[error("Unable to find column {0}")]
    UnknownColumn(String),

    /// Store raised before anything was written
    #[error("{0}")]
    Storage(#[from] GridError),

    /// Store raised partway through an update
    #[error("{completed} of {planned} cell writes applied before the store failed: {source}")]
    PartialUpdate {
        completed: usize,
        planned: usize,
        source: GridError,
    },

    /// Store raised partway through a delete
    #[error("{completed} of {planned} rows deleted before the store failed: {source}")]
    PartialDelete {
        completed: usize,
        planned: usize,
        source: GridError,
    },
}

fn not_found_detail(requested: &Option<String>) -> String {
    match requested {
        Some(name) => format!("Requested {}", name),
        None => "Spreadsheet may be empty?".to_string(),
    }
}

impl TableError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            TableError::NotFound(_) => "GRID_TABLE_NOT_FOUND",
            TableError::Validation(_) => "GRID_VALIDATION",
            TableError::UnknownColumn(_) => "GRID_UNKNOWN_COLUMN",
            TableError::Storage(_) => "GRID_STORAGE_FAULT",
            TableError::PartialUpdate { .. } => "GRID_PARTIAL_UPDATE",
            TableError::PartialDelete { .. } => "GRID_PARTIAL_DELETE",
        }
    }

    /// Response status for this error
    pub fn status_code(&self) -> u16 {
        400
    }
}
