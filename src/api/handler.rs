//! API Handler for gridbase
//!
//! Dispatches reads and writes to the table engine behind a single mutex.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::grid::GridStore;
use crate::table::{TableEngine, TableError};

use super::errors::{ApiError, ApiResult};
use super::request::{Action, RawRequest, WriteRequest};
use super::response::{DataEncoding, Response};

/// API Handler with global execution lock
pub struct ApiHandler<S: ?Sized> {
    /// Serializes request handling
    lock: Mutex<()>,

    /// Table used when a request names none
    default_table: Option<String>,

    /// Placement of success payloads
    encoding: DataEncoding,

    store: Arc<S>,
}

impl<S: GridStore + ?Sized> ApiHandler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            lock: Mutex::new(()),
            default_table: None,
            encoding: DataEncoding::default(),
            store,
        }
    }

    pub fn with_default_table(mut self, table: Option<String>) -> Self {
        self.default_table = table;
        self
    }

    pub fn with_encoding(mut self, encoding: DataEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Handle a read of one table
    pub fn handle_read(&self, table: Option<&str>) -> Response {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        let span = info_span!("read", request_id = %Uuid::new_v4(), table = table.unwrap_or(""));
        let _enter = span.enter();

        match self.read(table) {
            Ok(records) => {
                info!(rows = records.as_array().map_or(0, Vec::len), "data retrieved");
                Response::success("Data retrieved", records, self.encoding)
            }
            Err(e) => {
                warn!(code = e.code(), error = %e, "read rejected");
                Response::error(&e)
            }
        }
    }

    /// Handle a write whose body names the action
    pub fn handle_write(&self, table: Option<&str>, body: &str) -> Response {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        let span = info_span!("write", request_id = %Uuid::new_v4(), table = table.unwrap_or(""));
        let _enter = span.enter();

        match self.write(table, body) {
            Ok((action, message)) => {
                info!(%action, "{}", message);
                Response::ok(message, self.encoding)
            }
            Err(e) => {
                warn!(code = e.code(), error = %e, "write rejected");
                Response::error(&e)
            }
        }
    }

    fn open(&self, table: Option<&str>, method: &'static str) -> ApiResult<TableEngine<'_, S>> {
        TableEngine::open(self.store.as_ref(), table, self.default_table.as_deref())
            .map_err(|source| ApiError::Resolve { method, source })
    }

    fn read(&self, table: Option<&str>) -> ApiResult<Value> {
        let engine = self.open(table, "GET")?;
        let records = engine.read().map_err(ApiError::Read)?;
        serde_json::to_value(records)
            .map_err(|e| ApiError::Read(TableError::Validation(e.to_string())))
    }

    /// Flow:
    /// 1. Parse the body as JSON
    /// 2. Resolve the table
    /// 3. Interpret the action and validate its payload
    /// 4. Run it
    fn write(&self, table: Option<&str>, body: &str) -> ApiResult<(Action, String)> {
        let raw = RawRequest::parse(body)?;
        let engine = self.open(table, "POST")?;
        let request = raw.into_request()?;
        let action = request.action();
        let fail = |source| ApiError::Action { action, source };

        let message = match request {
            WriteRequest::Add(record) => {
                engine.add(&record).map_err(|e| match e {
                    TableError::Validation(_) => ApiError::Rejected(e),
                    other => fail(other),
                })?;
                "Data added successfully".to_string()
            }
            WriteRequest::Update(req) => {
                let report = engine.update(&req.select, &req.update).map_err(fail)?;
                format!("Data updated successfully. {}", report.summary())
            }
            WriteRequest::Delete(req) => {
                let report = engine.delete(&req.select).map_err(fail)?;
                format!(
                    "Delete request complete. {} matching rows deleted",
                    report.count()
                )
            }
        };
        Ok((action, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellValue, GridHandle, InMemoryGridStore};
    use serde_json::json;

    fn create_test_handler() -> (Arc<InMemoryGridStore>, ApiHandler<InMemoryGridStore>) {
        let store = Arc::new(InMemoryGridStore::new().with_table(
            "Sheet1",
            vec![
                vec!["id".into(), "name".into()],
                vec![1.into(), "x".into()],
                vec![2.into(), "y".into()],
            ],
        ));
        let handler = ApiHandler::new(store.clone()).with_encoding(DataEncoding::Nested);
        (store, handler)
    }

    fn rows(store: &InMemoryGridStore) -> Vec<Vec<CellValue>> {
        store.read_all(&GridHandle::new("Sheet1")).unwrap()
    }

    #[test]
    fn test_read_default_table() {
        let (_, handler) = create_test_handler();
        let resp = handler.handle_read(None);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.message, "Data retrieved");
        assert_eq!(resp.data, json!([{"id": 1, "name": "x"}, {"id": 2, "name": "y"}]));
    }

    #[test]
    fn test_read_unknown_table() {
        let (_, handler) = create_test_handler();
        let resp = handler.handle_read(Some("Ghost"));
        assert_eq!(resp.status, 400);
        assert_eq!(resp.data, json!({}));
        assert_eq!(resp.message, "Unable to GET data. Table does not exist. Requested Ghost");
    }

    #[test]
    fn test_read_stringified() {
        let (store, _) = create_test_handler();
        let handler = ApiHandler::new(store);
        let resp = handler.handle_read(Some("Sheet1"));
        assert!(resp.data.is_string());
        assert_eq!(resp.payload().unwrap()[1]["name"], "y");
    }

    #[test]
    fn test_write_add() {
        let (store, handler) = create_test_handler();
        let resp = handler.handle_write(None, r#"{"action":"add","data":{"id":3,"name":"w"}}"#);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.message, "Data added successfully");
        assert_eq!(rows(&store).len(), 4);
    }

    #[test]
    fn test_write_update_message() {
        let (_, handler) = create_test_handler();
        let resp = handler.handle_write(
            None,
            r#"{"action":"update","data":{"select":{"id":2},"update":{"name":"z"}}}"#,
        );
        assert_eq!(resp.status, 200);
        assert_eq!(resp.message, "Data updated successfully. Set 3, 2 to z. ");
    }

    #[test]
    fn test_write_delete_message() {
        let (store, handler) = create_test_handler();
        let resp =
            handler.handle_write(None, r#"{"action":"delete","data":{"select":{"name":"x"}}}"#);
        assert_eq!(resp.message, "Delete request complete. 1 matching rows deleted");
        assert_eq!(rows(&store).len(), 2);
    }

    #[test]
    fn test_table_checked_before_action() {
        let (_, handler) = create_test_handler();
        let resp = handler.handle_write(Some("Ghost"), r#"{"action":"bogus"}"#);
        assert_eq!(
            resp.message,
            "Unable to POST data. Table does not exist. Requested Ghost"
        );
    }

    #[test]
    fn test_unknown_column_is_client_error() {
        let (store, handler) = create_test_handler();
        let resp =
            handler.handle_write(None, r#"{"action":"delete","data":{"select":{"nope":1}}}"#);
        assert_eq!(resp.status, 400);
        assert_eq!(resp.message, "Unable to delete data. Unable to find column nope");
        assert_eq!(rows(&store).len(), 3);
    }

    #[test]
    fn test_add_missing_columns_message() {
        let store = Arc::new(InMemoryGridStore::new().with_table(
            "Sheet1",
            vec![vec!["A".into(), "B".into(), "C".into()]],
        ));
        let handler = ApiHandler::new(store.clone());
        let resp = handler.handle_write(None, r#"{"action":"add","data":{"A":1,"B":2}}"#);
        assert_eq!(resp.status, 400);
        assert_eq!(resp.data, json!({}));
        assert_eq!(
            resp.message,
            "All table fields are required. Found column A. Found column B. Missing column C."
        );
        assert_eq!(store.read_all(&GridHandle::new("Sheet1")).unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_body() {
        let (_, handler) = create_test_handler();
        let resp = handler.handle_write(None, "action=add");
        assert_eq!(resp.status, 400);
        assert!(resp
            .message
            .starts_with("Something went wrong with your POST request:"));
    }

    #[test]
    fn test_empty_store() {
        let handler = ApiHandler::new(Arc::new(InMemoryGridStore::new()));
        let resp = handler.handle_read(None);
        assert_eq!(resp.status, 400);
        assert!(resp.message.ends_with("Spreadsheet may be empty?"));
    }
}
