//! # Table Engine
//!
//! CRUD over header-keyed grids. Row 0 of a grid names the columns; every
//! later row is a record keyed by those names.
//!
//! # Operations
//!
//! - read: every data row as a [`Record`]
//! - add: append one record, all columns required
//! - update: select rows by exact-match criteria, overwrite columns
//! - delete: select rows by exact-match criteria, remove them
//!
//! Nothing is cached between calls. Headers and rows are read from the
//! store on every operation, and mutations are not transactional: a fault
//! halfway through an update or delete leaves the earlier writes in place.

mod engine;
mod errors;
mod matcher;
mod record;
mod resolver;

pub use engine::{CellWrite, DeleteReport, TableEngine, UpdateReport};
pub use errors::{TableError, TableResult};
pub use matcher::{matching_rows, ColumnCriteria};
pub use record::{
    grid_to_records, record_to_row, records_to_grid, row_to_record, Headers, Record, RowRef,
};
pub use resolver::resolve;
