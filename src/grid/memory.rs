//! # In-Memory Grid Store

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{GridError, GridResult};
use super::store::{GridHandle, GridStore, Sheet};
use super::value::CellValue;

/// Grid store kept entirely in memory.
///
/// Used for tests and as a scratch workbook.
#[derive(Debug, Default)]
pub struct InMemoryGridStore {
    sheets: RwLock<Vec<Sheet>>,
}

impl InMemoryGridStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a table with the given rows (header first)
    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        self.sheets
            .get_mut()
            .unwrap_or_else(|p| p.into_inner())
            .push(Sheet::new(name, rows));
        self
    }

    /// Create a table holding only a header row
    pub fn create_table(&self, name: &str, headers: &[&str]) -> GridResult<()> {
        let mut sheets = self.write()?;
        if sheets.iter().any(|s| s.name == name) {
            return Err(GridError::TableExists(name.to_string()));
        }
        let header = headers.iter().map(|h| CellValue::from(*h)).collect();
        sheets.push(Sheet::new(name, vec![header]));
        Ok(())
    }

    fn read(&self) -> GridResult<RwLockReadGuard<'_, Vec<Sheet>>> {
        self.sheets
            .read()
            .map_err(|_| GridError::Internal("Lock poisoned".to_string()))
    }

    fn write(&self) -> GridResult<RwLockWriteGuard<'_, Vec<Sheet>>> {
        self.sheets
            .write()
            .map_err(|_| GridError::Internal("Lock poisoned".to_string()))
    }

    fn with_sheet<T>(&self, grid: &GridHandle, f: impl FnOnce(&Sheet) -> T) -> GridResult<T> {
        let sheets = self.read()?;
        sheets
            .iter()
            .find(|s| s.name == grid.name())
            .map(f)
            .ok_or_else(|| GridError::TableMissing(grid.name().to_string()))
    }

    fn with_sheet_mut<T>(
        &self,
        grid: &GridHandle,
        f: impl FnOnce(&mut Sheet) -> GridResult<T>,
    ) -> GridResult<T> {
        let mut sheets = self.write()?;
        let sheet = sheets
            .iter_mut()
            .find(|s| s.name == grid.name())
            .ok_or_else(|| GridError::TableMissing(grid.name().to_string()))?;
        f(sheet)
    }
}

impl GridStore for InMemoryGridStore {
    fn list_tables(&self) -> GridResult<Vec<String>> {
        Ok(self.read()?.iter().map(|s| s.name.clone()).collect())
    }

    fn get_table(&self, name: &str) -> GridResult<Option<GridHandle>> {
        Ok(self
            .read()?
            .iter()
            .find(|s| s.name == name)
            .map(|s| GridHandle::new(&s.name)))
    }

    fn read_all(&self, grid: &GridHandle) -> GridResult<Vec<Vec<CellValue>>> {
        self.with_sheet(grid, |s| s.rows.clone())
    }

    fn header_row(&self, grid: &GridHandle) -> GridResult<Vec<CellValue>> {
        self.with_sheet(grid, Sheet::header)
    }

    fn append_row(&self, grid: &GridHandle, values: Vec<CellValue>) -> GridResult<()> {
        self.with_sheet_mut(grid, |s| {
            s.append(values);
            Ok(())
        })
    }

    fn write_cell(
        &self,
        grid: &GridHandle,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> GridResult<()> {
        self.with_sheet_mut(grid, |s| s.write(row, col, value))
    }

    fn delete_row(&self, grid: &GridHandle, row: usize) -> GridResult<()> {
        self.with_sheet_mut(grid, |s| s.delete(row))
    }
}
