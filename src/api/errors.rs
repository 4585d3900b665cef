//! API error types
//!
//! Table engine errors pass through unchanged; the API adds the request
//! context ("Unable to update data. ...") around them. Add validation
//! failures are the exception and are reported bare.

use thiserror::Error;

use crate::table::TableError;

use super::request::Action;

/// API error
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// POST body is not a JSON object
    #[error("Something went wrong with your POST request: {0}")]
    MalformedBody(String),

    /// `action` missing or not one of the three legal values
    #[error(
        "Unable to complete request. Request body must include action field. \
         The value of action must be one of: \"add\", \"update\", or \"delete\"."
    )]
    UnknownAction,

    /// `data` missing or lacking the fields the action needs
    #[error(
        "Unable to {action} data. Request body must include a data field, \
         which should store an object describing the data to {action}."
    )]
    MissingData { action: Action },

    /// Table could not be resolved
    #[error("Unable to {method} data. {source}")]
    Resolve {
        method: &'static str,
        source: TableError,
    },

    /// Read failed after the table was resolved
    #[error("Something went wrong with your GET request: {0}")]
    Read(TableError),

    /// Engine rejected or failed an action
    #[error("Unable to {action} data. {source}")]
    Action { action: Action, source: TableError },

    /// Record rejected by add validation; the message stands alone
    #[error("{0}")]
    Rejected(TableError),

    /// Request task did not run to completion
    #[error("Something went wrong with your request: {0}")]
    Dispatch(String),
}

impl ApiError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MalformedBody(_) => "GRID_MALFORMED_BODY",
            ApiError::UnknownAction => "GRID_UNKNOWN_ACTION",
            ApiError::MissingData { .. } => "GRID_MISSING_DATA",
            ApiError::Resolve { source, .. } => source.code(),
            ApiError::Read(source) => source.code(),
            ApiError::Action { source, .. } => source.code(),
            ApiError::Rejected(source) => source.code(),
            ApiError::Dispatch(_) => "GRID_DISPATCH_FAILED",
        }
    }

    /// Response status. Every API failure is a client error.
    pub fn status_code(&self) -> u16 {
        400
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
