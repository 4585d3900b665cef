//! Table name resolution.

use crate::grid::{GridHandle, GridStore};

use super::errors::{TableError, TableResult};

/// Map a requested table name to a handle.
///
/// A blank or absent name falls back to `default_table` when one is
/// configured, and otherwise to the first table of the store.
pub fn resolve<S: GridStore + ?Sized>(
    store: &S,
    requested: Option<&str>,
    default_table: Option<&str>,
) -> TableResult<GridHandle> {
    let named = requested
        .filter(|n| !n.is_empty())
        .or_else(|| default_table.filter(|n| !n.is_empty()));

    match named {
        Some(name) => store
            .get_table(name)?
            .ok_or_else(|| TableError::NotFound(Some(name.to_string()))),
        None => {
            let first = store.list_tables()?.into_iter().next();
            match first {
                Some(name) => store.get_table(&name)?.ok_or(TableError::NotFound(None)),
                None => Err(TableError::NotFound(None)),
            }
        }
    }
}
