//! Table HTTP Routes
//!
//! `GET /?table=T` reads a table, `POST /?table=T` runs the body's action.
//! `/exec` is accepted as an alias of `/`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tokio::task;
use tracing::error;

use crate::api::{ApiError, ApiHandler, Response};
use crate::grid::GridStore;

/// Handler shared across requests
pub type SharedHandler = Arc<ApiHandler<dyn GridStore>>;

/// Query string of every table request
#[derive(Debug, Default, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub table: Option<String>,
}

/// Build the table router
pub fn table_routes(handler: SharedHandler) -> Router {
    Router::new()
        .route("/", get(read_handler).post(write_handler))
        .route("/exec", get(read_handler).post(write_handler))
        .with_state(handler)
}

/// Read table handler
async fn read_handler(
    State(handler): State<SharedHandler>,
    Query(query): Query<TableQuery>,
) -> (StatusCode, Json<Response>) {
    dispatch(move || handler.handle_read(query.table.as_deref())).await
}

/// Write handler; the body is taken as text whatever its content type
async fn write_handler(
    State(handler): State<SharedHandler>,
    Query(query): Query<TableQuery>,
    body: String,
) -> (StatusCode, Json<Response>) {
    dispatch(move || handler.handle_write(query.table.as_deref(), &body)).await
}

/// Run a request on the blocking pool; store calls do synchronous file I/O
async fn dispatch<F>(f: F) -> (StatusCode, Json<Response>)
where
    F: FnOnce() -> Response + Send + 'static,
{
    let response = task::spawn_blocking(f).await.unwrap_or_else(|e| {
        error!(error = %e, "request task failed");
        Response::error(&ApiError::Dispatch(e.to_string()))
    });
    respond(response)
}

/// HTTP status mirrors the envelope status
fn respond(response: Response) -> (StatusCode, Json<Response>) {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::InMemoryGridStore;

    #[test]
    fn test_status_mirrors_envelope() {
        let (status, _) = respond(Response::error(&ApiError::UnknownAction));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = respond(Response::ok("done", Default::default()));
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dispatch_runs_off_the_runtime() {
        let store: Arc<dyn GridStore> = Arc::new(InMemoryGridStore::new().with_table(
            "People",
            vec![vec!["id".into()], vec![1.into()]],
        ));
        let handler: SharedHandler = Arc::new(ApiHandler::new(store));
        let (status, Json(resp)) = dispatch(move || handler.handle_read(Some("People"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.message, "Data retrieved");
    }

    #[tokio::test]
    async fn test_dispatch_panic_is_client_error() {
        let (status, Json(resp)) = dispatch(|| panic!("store exploded")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.status, 400);
        assert!(resp
            .message
            .starts_with("Something went wrong with your request:"));
    }
}
