//! API layer for gridbase
//!
//! Turns an inbound read or write into a table engine call and wraps the
//! outcome in the response envelope.
//!
//! # Design Principles
//!
//! - One request handled at a time, behind a single mutex
//! - Every failure becomes a 400 envelope; nothing escapes as a panic or 5xx
//! - The table is resolved before the action is interpreted
//!
//! # Supported Operations
//!
//! - read (GET)
//! - add, update, delete (POST, selected by the `action` field)

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiResult};
pub use handler::ApiHandler;
pub use request::{Action, DeleteRequest, RawRequest, UpdateRequest, WriteRequest};
pub use response::{DataEncoding, Response};
