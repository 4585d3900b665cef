//! # Grid Storage
//!
//! The storage collaborator the table engine runs against. A store holds
//! named grids (rows x columns of scalar cells); row 0 of each grid is the
//! header row.
//!
//! The engine never holds a grid across calls. Every operation goes back to
//! the store, so edits made between requests are always observed.

mod errors;
mod memory;
mod store;
mod value;
mod workbook;

pub use errors::{GridError, GridResult};
pub use memory::InMemoryGridStore;
pub use store::{GridHandle, GridStore, Sheet};
pub use value::CellValue;
pub use workbook::JsonWorkbookStore;
