//! # Table Engine
//!
//! Read, add, update and delete against one resolved table.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::grid::{CellValue, GridHandle, GridStore};

use super::errors::{TableError, TableResult};
use super::matcher::{matching_rows, ColumnCriteria};
use super::record::{grid_to_records, record_to_row, Headers, Record, RowRef};
use super::resolver::resolve;

/// One cell overwritten by an update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellWrite {
    pub row: RowRef,
    pub column: usize,
    pub value: CellValue,
}

/// Sheet coordinates, both 1-based
impl fmt::Display for CellWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Set {}, {} to {}.",
            self.row.sheet_row(),
            self.column + 1,
            self.value
        )
    }
}

/// Outcome of an update
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateReport {
    /// Rows selected, top to bottom
    pub matched: Vec<RowRef>,
    /// Writes performed, in the order applied
    pub writes: Vec<CellWrite>,
}

impl UpdateReport {
    /// `Set r, c to v.` for every write
    pub fn summary(&self) -> String {
        self.writes
            .iter()
            .map(|w| format!("{} ", w))
            .collect::<String>()
    }
}

/// Outcome of a delete
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteReport {
    /// Rows removed, in the order removed (bottom to top)
    pub deleted: Vec<RowRef>,
}

impl DeleteReport {
    pub fn count(&self) -> usize {
        self.deleted.len()
    }
}

/// Operations bound to one table of a store.
///
/// Holds only the store reference and the table handle. Headers and rows
/// are fetched again by every operation.
pub struct TableEngine<'a, S: ?Sized> {
    store: &'a S,
    grid: GridHandle,
}

impl<'a, S: GridStore + ?Sized> TableEngine<'a, S> {
    /// Resolve a table and bind to it
    pub fn open(
        store: &'a S,
        requested: Option<&str>,
        default_table: Option<&str>,
    ) -> TableResult<Self> {
        let grid = resolve(store, requested, default_table)?;
        Ok(Self { store, grid })
    }

    /// Name of the bound table
    pub fn table_name(&self) -> &str {
        self.grid.name()
    }

    fn headers(&self) -> TableResult<Headers> {
        Ok(Headers::from_cells(&self.store.header_row(&self.grid)?))
    }

    /// Every data row as a record
    pub fn read(&self) -> TableResult<Vec<Record>> {
        let rows = self.store.read_all(&self.grid)?;
        Ok(grid_to_records(&rows))
    }

    /// Append a record. Every header must have a value.
    pub fn add(&self, record: &Record) -> TableResult<Vec<CellValue>> {
        let headers = self.headers()?;
        let row = record_to_row(&headers, record)?;
        self.store.append_row(&self.grid, row.clone())?;
        debug!(table = self.table_name(), columns = row.len(), "row appended");
        Ok(row)
    }

    /// Overwrite the `update` columns on every row matching `select`.
    ///
    /// Writes go row by row in match order. A store fault stops the update
    /// and the writes already made stay in place.
    pub fn update(&self, select: &Record, update: &Record) -> TableResult<UpdateReport> {
        if select.is_empty() || update.is_empty() {
            return Err(TableError::Validation(
                "Select and update criteria must each name at least one column.".to_string(),
            ));
        }
        let headers = self.headers()?;
        let select = headers.resolve_criteria(select)?;
        let update = headers.resolve_criteria(update)?;

        let matched = self.select(&select)?;
        let planned = matched.len() * update.len();
        let mut writes = Vec::with_capacity(planned);

        for row in &matched {
            for (column, value) in update.iter() {
                self.store
                    .write_cell(&self.grid, row.grid_index(), column, value.clone())
                    .map_err(|source| TableError::PartialUpdate {
                        completed: writes.len(),
                        planned,
                        source,
                    })?;
                writes.push(CellWrite {
                    row: *row,
                    column,
                    value: value.clone(),
                });
            }
        }

        Ok(UpdateReport { matched, writes })
    }

    /// Remove every row matching `select`.
    ///
    /// Rows go bottom to top so the positions still queued stay valid after
    /// each removal shifts the rows below it.
    pub fn delete(&self, select: &Record) -> TableResult<DeleteReport> {
        if select.is_empty() {
            return Err(TableError::Validation(
                "Select criteria must name at least one column.".to_string(),
            ));
        }
        let headers = self.headers()?;
        let select = headers.resolve_criteria(select)?;

        let mut matched = self.select(&select)?;
        matched.reverse();
        let planned = matched.len();
        let mut deleted = Vec::with_capacity(planned);

        for row in matched {
            self.store
                .delete_row(&self.grid, row.grid_index())
                .map_err(|source| TableError::PartialDelete {
                    completed: deleted.len(),
                    planned,
                    source,
                })?;
            deleted.push(row);
        }

        Ok(DeleteReport { deleted })
    }

    fn select(&self, criteria: &ColumnCriteria) -> TableResult<Vec<RowRef>> {
        let rows = self.store.read_all(&self.grid)?;
        let matched = matching_rows(&rows, criteria);
        debug!(
            table = self.table_name(),
            scanned = rows.len().saturating_sub(1),
            matched = matched.len(),
            "rows selected"
        );
        Ok(matched)
    }
}
