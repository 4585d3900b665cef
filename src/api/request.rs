//! API request types
//!
//! Parsing of the write (POST) body:
//!
//! ```json
//! { "action": "update", "data": { "select": {"id": 2}, "update": {"name": "z"} } }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::table::{Record, TableError};

use super::errors::{ApiError, ApiResult};

/// Write action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Add,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Exact, case-sensitive match against the three action names
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "add" => Some(Action::Add),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Update request
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub select: Record,
    pub update: Record,
}

/// Delete request
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    pub select: Record,
}

/// Validated write request
#[derive(Debug, Clone, PartialEq)]
pub enum WriteRequest {
    Add(Record),
    Update(UpdateRequest),
    Delete(DeleteRequest),
}

impl WriteRequest {
    pub fn action(&self) -> Action {
        match self {
            WriteRequest::Add(_) => Action::Add,
            WriteRequest::Update(_) => Action::Update,
            WriteRequest::Delete(_) => Action::Delete,
        }
    }
}

/// POST body before the action is interpreted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRequest {
    #[serde(default)]
    pub action: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl RawRequest {
    /// Parse a POST body. Only JSON syntax is checked here.
    pub fn parse(body: &str) -> ApiResult<Self> {
        serde_json::from_str(body).map_err(|e| ApiError::MalformedBody(e.to_string()))
    }

    /// Interpret the action and validate its payload
    pub fn into_request(self) -> ApiResult<WriteRequest> {
        let action = self
            .action
            .as_ref()
            .and_then(Value::as_str)
            .and_then(Action::parse)
            .ok_or(ApiError::UnknownAction)?;

        let missing = || ApiError::MissingData { action };
        let data = match self.data {
            Some(Value::Object(map)) => map,
            _ => return Err(missing()),
        };

        match action {
            Action::Add => {
                if data.is_empty() {
                    return Err(missing());
                }
                Ok(WriteRequest::Add(to_record(action, Value::Object(data))?))
            }
            Action::Update => {
                let select = criteria(&data, "select").ok_or_else(missing)?;
                let update = criteria(&data, "update").ok_or_else(missing)?;
                Ok(WriteRequest::Update(UpdateRequest {
                    select: to_record(action, select)?,
                    update: to_record(action, update)?,
                }))
            }
            Action::Delete => {
                let select = criteria(&data, "select").ok_or_else(missing)?;
                Ok(WriteRequest::Delete(DeleteRequest {
                    select: to_record(action, select)?,
                }))
            }
        }
    }
}

/// A non-empty object under `key`
fn criteria(data: &Map<String, Value>, key: &str) -> Option<Value> {
    match data.get(key) {
        Some(Value::Object(map)) if !map.is_empty() => Some(Value::Object(map.clone())),
        _ => None,
    }
}

fn to_record(action: Action, value: Value) -> ApiResult<Record> {
    serde_json::from_value(value).map_err(|e| ApiError::Action {
        action,
        source: TableError::Validation(format!("Column values must be scalars: {}", e)),
    })
}
