//! API response types
//!
//! Every outcome, success or failure, is the same envelope:
//!
//! ```json
//! { "status": 200, "data": "[{\"id\":1}]", "message": "Data retrieved" }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::ApiError;

/// How a success payload is placed in `data`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataEncoding {
    /// Payload JSON-encoded into a string, as spreadsheet-API clients expect
    #[default]
    Stringified,
    /// Payload embedded as JSON
    Nested,
}

impl DataEncoding {
    fn encode(&self, payload: Value) -> Value {
        match self {
            DataEncoding::Nested => payload,
            DataEncoding::Stringified => Value::String(
                serde_json::to_string(&payload).unwrap_or_else(|_| "{}".to_string()),
            ),
        }
    }
}

/// Response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub data: Value,
    pub message: String,
}

impl Response {
    /// Success carrying a payload
    pub fn success(message: impl Into<String>, payload: Value, encoding: DataEncoding) -> Self {
        Self {
            status: 200,
            data: encoding.encode(payload),
            message: message.into(),
        }
    }

    /// Success with an empty payload
    pub fn ok(message: impl Into<String>, encoding: DataEncoding) -> Self {
        Self::success(message, Value::Object(Map::new()), encoding)
    }

    /// Failure envelope; `data` is always an empty object
    pub fn error(err: &ApiError) -> Self {
        Self {
            status: err.status_code(),
            data: Value::Object(Map::new()),
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// The payload as JSON, undoing string encoding if present
    pub fn payload(&self) -> Option<Value> {
        match &self.data {
            Value::String(s) => serde_json::from_str(s).ok(),
            other => Some(other.clone()),
        }
    }
}
