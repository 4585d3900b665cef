//! gridbase - CRUD over header-keyed tables
//!
//! Each table is a grid whose first row names the columns. Reads return
//! the remaining rows as records; writes add, update or delete rows
//! selected by exact-match criteria.
//!
//! Layers, leaves first:
//! - [`grid`]: storage the engine runs against (in-memory or JSON workbook)
//! - [`table`]: resolution, marshaling, matching and mutation
//! - [`api`]: request parsing, dispatch and the response envelope
//! - [`http_server`]: HTTP transport
//! - [`cli`]: command line and configuration

pub mod api;
pub mod cli;
pub mod grid;
pub mod http_server;
pub mod table;
