//! # Grid Store Trait

use serde::{Deserialize, Serialize};

use super::errors::{GridError, GridResult};
use super::value::CellValue;

/// Handle to one table of a store.
///
/// Handles are issued by [`GridStore::get_table`] and only name the table;
/// they carry no row data, so a handle never goes stale in content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridHandle {
    name: String,
}

impl GridHandle {
    /// Create a handle. Stores call this from `get_table`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Backend trait for grid storage.
///
/// Row and column indices are 0-based grid positions; row 0 is the header.
pub trait GridStore: Send + Sync {
    /// Table names, in workbook order
    fn list_tables(&self) -> GridResult<Vec<String>>;

    /// Look up a table by exact name
    fn get_table(&self, name: &str) -> GridResult<Option<GridHandle>>;

    /// Every row of the grid, header included
    fn read_all(&self, grid: &GridHandle) -> GridResult<Vec<Vec<CellValue>>>;

    /// Row 0 of the grid, or an empty row for an empty grid
    fn header_row(&self, grid: &GridHandle) -> GridResult<Vec<CellValue>>;

    /// Append a row after the last row
    fn append_row(&self, grid: &GridHandle, values: Vec<CellValue>) -> GridResult<()>;

    /// Overwrite one cell
    fn write_cell(
        &self,
        grid: &GridHandle,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> GridResult<()>;

    /// Remove a data row, shifting later rows up by one
    fn delete_row(&self, grid: &GridHandle, row: usize) -> GridResult<()>;
}

/// A named grid as both stores keep it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub(crate) fn header(&self) -> Vec<CellValue> {
        self.rows.first().cloned().unwrap_or_default()
    }

    pub(crate) fn append(&mut self, values: Vec<CellValue>) {
        self.rows.push(values);
    }

    /// Write a cell, padding a short row with nulls up to `col`
    pub(crate) fn write(&mut self, row: usize, col: usize, value: CellValue) -> GridResult<()> {
        let rows = self.rows.len();
        let cells = self
            .rows
            .get_mut(row)
            .ok_or_else(|| GridError::RowOutOfRange {
                table: self.name.clone(),
                row,
                rows,
            })?;
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Null);
        }
        cells[col] = value;
        Ok(())
    }

    pub(crate) fn delete(&mut self, row: usize) -> GridResult<()> {
        if row == 0 {
            return Err(GridError::HeaderImmutable(self.name.clone()));
        }
        if row >= self.rows.len() {
            return Err(GridError::RowOutOfRange {
                table: self.name.clone(),
                row,
                rows: self.rows.len(),
            });
        }
        self.rows.remove(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Sheet {
        Sheet::new(
            "people",
            vec![
                vec!["id".into(), "name".into()],
                vec![1.into(), "x".into()],
                vec![2.into()],
            ],
        )
    }

    #[test]
    fn test_write_pads_short_row() {
        let mut s = sheet();
        s.write(2, 1, "y".into()).unwrap();
        assert_eq!(s.rows[2], vec![CellValue::from(2), CellValue::from("y")]);

        s.write(1, 3, true.into()).unwrap();
        assert_eq!(s.rows[1].len(), 4);
        assert_eq!(s.rows[1][2], CellValue::Null);
    }

    #[test]
    fn test_write_out_of_range() {
        let mut s = sheet();
        assert!(matches!(
            s.write(5, 0, 1.into()),
            Err(GridError::RowOutOfRange { row: 5, rows: 3, .. })
        ));
    }

    #[test]
    fn test_delete_rules() {
        let mut s = sheet();
        assert!(matches!(s.delete(0), Err(GridError::HeaderImmutable(_))));
        assert!(matches!(s.delete(3), Err(GridError::RowOutOfRange { .. })));
        s.delete(1).unwrap();
        assert_eq!(s.rows.len(), 2);
        assert_eq!(s.rows[1][0], CellValue::from(2));
    }
}
