//! # Grid Storage Errors

use thiserror::Error;

/// Result type for grid storage operations
pub type GridResult<T> = Result<T, GridError>;

/// Faults raised by a grid store
#[derive(Debug, Clone, Error)]
pub enum GridError {
    /// The handle names a table that no longer exists
    #[error("Table no longer exists: {0}")]
    TableMissing(String),

    /// Row index outside the grid
    #[error("Row {row} is out of range for table {table} ({rows} rows)")]
    RowOutOfRange {
        table: String,
        row: usize,
        rows: usize,
    },

    /// Attempt to delete the header row
    #[error("Header row of table {0} cannot be deleted")]
    HeaderImmutable(String),

    /// Table name already taken
    #[error("Table already exists: {0}")]
    TableExists(String),

    // I/O
    #[error("I/O error: {0}")]
    Io(String),

    /// Workbook file could not be decoded
    #[error("Corrupt workbook: {0}")]
    Corrupt(String),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GridError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            GridError::TableMissing(_) => "GRID_TABLE_MISSING",
            GridError::RowOutOfRange { .. } => "GRID_ROW_OUT_OF_RANGE",
            GridError::HeaderImmutable(_) => "GRID_HEADER_IMMUTABLE",
            GridError::TableExists(_) => "GRID_TABLE_EXISTS",
            GridError::Io(_) => "GRID_IO",
            GridError::Corrupt(_) => "GRID_CORRUPT",
            GridError::Internal(_) => "GRID_INTERNAL",
        }
    }
}

impl From<std::io::Error> for GridError {
    fn from(e: std::io::Error) -> Self {
        GridError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(e: serde_json::Error) -> Self {
        GridError::Corrupt(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GridError::TableMissing("t".into()).code(), "GRID_TABLE_MISSING");
        assert_eq!(
            GridError::RowOutOfRange { table: "t".into(), row: 9, rows: 2 }.code(),
            "GRID_ROW_OUT_OF_RANGE"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: GridError = std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into();
        assert!(matches!(err, GridError::Io(_)));
        assert!(err.to_string().contains("disk gone"));
    }
}
