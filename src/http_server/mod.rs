//! # HTTP Server
//!
//! HTTP transport for the table API. A GET reads a table, a POST carries
//! an `action` body; both take the table name from `?table=`.

mod config;
mod server;
mod table_routes;

pub use config::{HttpServerConfig, DEFAULT_PORT};
pub use server::HttpServer;
pub use table_routes::{table_routes, SharedHandler, TableQuery};
