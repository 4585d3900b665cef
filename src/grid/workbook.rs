//! # JSON Workbook Store
//!
//! Persists a workbook as one JSON file:
//!
//! ```json
//! { "sheets": [ { "name": "Sheet1", "rows": [["id", "name"], [1, "x"]] } ] }
//! ```
//!
//! The file is read on every call and rewritten on every mutation, so edits
//! made to it by hand between requests are picked up without a restart.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::errors::{GridError, GridResult};
use super::store::{GridHandle, GridStore, Sheet};
use super::value::CellValue;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Workbook {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

/// File-backed grid store
#[derive(Debug)]
pub struct JsonWorkbookStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonWorkbookStore {
    /// Open an existing workbook file
    pub fn open(path: impl Into<PathBuf>) -> GridResult<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(GridError::Io(format!(
                "Workbook not found: {}",
                path.display()
            )));
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Create a new workbook file holding the given sheets
    pub fn create(path: impl Into<PathBuf>, sheets: Vec<Sheet>) -> GridResult<Self> {
        let path = path.into();
        if path.exists() {
            return Err(GridError::Io(format!(
                "Workbook already exists: {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        save(&path, &Workbook { sheets })?;
        Self::open(path)
    }

    /// Path of the workbook file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T>(&self, f: impl FnOnce(&Workbook) -> GridResult<T>) -> GridResult<T> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| GridError::Internal("Lock poisoned".to_string()))?;
        f(&load(&self.path)?)
    }

    fn mutate(
        &self,
        grid: &GridHandle,
        f: impl FnOnce(&mut Sheet) -> GridResult<()>,
    ) -> GridResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| GridError::Internal("Lock poisoned".to_string()))?;
        let mut workbook = load(&self.path)?;
        let sheet = workbook
            .sheets
            .iter_mut()
            .find(|s| s.name == grid.name())
            .ok_or_else(|| GridError::TableMissing(grid.name().to_string()))?;
        f(sheet)?;
        save(&self.path, &workbook)
    }
}

fn load(path: &Path) -> GridResult<Workbook> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write to a sibling file, then rename over the workbook
fn save(path: &Path, workbook: &Workbook) -> GridResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let bytes = serde_json::to_vec_pretty(workbook)
        .map_err(|e| GridError::Internal(format!("Failed to encode workbook: {}", e)))?;
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn find<'a>(workbook: &'a Workbook, grid: &GridHandle) -> GridResult<&'a Sheet> {
    workbook
        .sheets
        .iter()
        .find(|s| s.name == grid.name())
        .ok_or_else(|| GridError::TableMissing(grid.name().to_string()))
}

impl GridStore for JsonWorkbookStore {
    fn list_tables(&self) -> GridResult<Vec<String>> {
        self.read(|wb| Ok(wb.sheets.iter().map(|s| s.name.clone()).collect()))
    }

    fn get_table(&self, name: &str) -> GridResult<Option<GridHandle>> {
        self.read(|wb| {
            Ok(wb
                .sheets
                .iter()
                .find(|s| s.name == name)
                .map(|s| GridHandle::new(&s.name)))
        })
    }

    fn read_all(&self, grid: &GridHandle) -> GridResult<Vec<Vec<CellValue>>> {
        self.read(|wb| Ok(find(wb, grid)?.rows.clone()))
    }

    fn header_row(&self, grid: &GridHandle) -> GridResult<Vec<CellValue>> {
        self.read(|wb| Ok(find(wb, grid)?.header()))
    }

    fn append_row(&self, grid: &GridHandle, values: Vec<CellValue>) -> GridResult<()> {
        self.mutate(grid, |s| {
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
        self.mutate(grid, |s| s.write(row, col, value))
    }

    fn delete_row(&self, grid: &GridHandle, row: usize) -> GridResult<()> {
        self.mutate(grid, |s| s.delete(row))
    }
}
