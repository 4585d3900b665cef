//! # Row Matching
//!
//! Exact-match conjunctions over column positions.

use crate::grid::CellValue;

use super::record::RowRef;

/// Column-position keyed criteria, combined with AND
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnCriteria {
    entries: Vec<(usize, CellValue)>,
}

impl ColumnCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a criterion. A second value for the same column replaces the first.
    pub fn push(&mut self, column: usize, value: CellValue) {
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &CellValue)> {
        self.entries.iter().map(|(c, v)| (*c, v))
    }

    /// True when every criterion holds for the row. Cells past the end of
    /// a short row count as `Null`.
    pub fn matches(&self, row: &[CellValue]) -> bool {
        self.entries.iter().all(|(col, value)| match row.get(*col) {
            Some(cell) => cell == value,
            None => matches!(value, CellValue::Null),
        })
    }
}

impl FromIterator<(usize, CellValue)> for ColumnCriteria {
    fn from_iter<I: IntoIterator<Item = (usize, CellValue)>>(iter: I) -> Self {
        let mut criteria = ColumnCriteria::new();
        for (c, v) in iter {
            criteria.push(c, v);
        }
        criteria
    }
}

/// Data rows satisfying every criterion, top to bottom.
///
/// `rows` is the full grid; row 0 is the header and is never matched.
/// Empty criteria match nothing.
pub fn matching_rows(rows: &[Vec<CellValue>], criteria: &ColumnCriteria) -> Vec<RowRef> {
    if criteria.is_empty() {
        return Vec::new();
    }
    rows.iter()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| criteria.matches(row))
        .map(|(i, _)| RowRef::new(i))
        .collect()
}
