//! # Record Marshaling
//!
//! Converts between grid rows (cells by column position) and records (cells
//! by column name). The header row fixes both the names and their order.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::grid::CellValue;

use super::errors::{TableError, TableResult};
use super::matcher::ColumnCriteria;

/// Ordered column names from row 0 of a grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<String>);

impl Headers {
    /// Build from header cells. The header ends at the first blank cell.
    pub fn from_cells(cells: &[CellValue]) -> Self {
        Self(
            cells
                .iter()
                .take_while(|c| !c.is_blank())
                .map(|c| c.to_string())
                .collect(),
        )
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of a column name
    pub fn index_of(&self, name: &str) -> TableResult<usize> {
        self.0
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// Translate name-keyed criteria into column positions.
    ///
    /// Fails on the first unknown name.
    pub fn resolve_criteria(&self, record: &Record) -> TableResult<ColumnCriteria> {
        let mut criteria = ColumnCriteria::new();
        for (name, value) in record.iter() {
            criteria.push(self.index_of(name)?, value.clone());
        }
        Ok(criteria)
    }
}

impl<S: Into<String>> FromIterator<S> for Headers {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Column-name keyed view of one row.
///
/// Keeps insertion order, so a record built from a row serializes its
/// fields in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Set a field, replacing any earlier value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<CellValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of column names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((k, v)) = access.next_entry::<String, CellValue>()? {
                    record.insert(k, v);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// 1-based position of a data row; position 1 is the row after the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct RowRef(usize);

impl RowRef {
    pub fn new(position: usize) -> Self {
        debug_assert!(position >= 1, "row 0 is the header");
        Self(position)
    }

    pub fn position(&self) -> usize {
        self.0
    }

    /// 0-based index into the full grid. The header sits at 0, so this is
    /// the same number as the data position.
    pub fn grid_index(&self) -> usize {
        self.0
    }

    /// 1-based spreadsheet row number, as shown to users
    pub fn sheet_row(&self) -> usize {
        self.0 + 1
    }
}

/// Zip headers with row cells. Headers past the end of a short row map to
/// `Null`; cells past the last header are dropped.
pub fn row_to_record(headers: &Headers, row: &[CellValue]) -> Record {
    let fields = headers
        .names()
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), row.get(i).cloned().unwrap_or_default()))
        .collect();
    Record { fields }
}

/// Every data row of a grid as a record. A grid without at least a header
/// and one data row yields no records.
pub fn grid_to_records(rows: &[Vec<CellValue>]) -> Vec<Record> {
    if rows.len() < 2 {
        return Vec::new();
    }
    let headers = Headers::from_cells(&rows[0]);
    rows[1..]
        .iter()
        .map(|row| row_to_record(&headers, row))
        .collect()
}

/// Inverse of [`grid_to_records`] for the data rows: absent fields become
/// `Null` cells.
pub fn records_to_grid(headers: &Headers, records: &[Record]) -> Vec<Vec<CellValue>> {
    records
        .iter()
        .map(|record| {
            headers
                .names()
                .iter()
                .map(|name| record.get(name).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Order a record's values by header for appending.
///
/// All-or-nothing: any header with no value, a null, or an empty string
/// fails the whole record. The message walks every header and says which
/// were found and which were missing.
pub fn record_to_row(headers: &Headers, record: &Record) -> TableResult<Vec<CellValue>> {
    if headers.is_empty() {
        return Err(TableError::Validation(
            "Table has no header row to add data against.".to_string(),
        ));
    }

    let mut row = Vec::with_capacity(headers.len());
    let mut report = String::new();
    let mut missing = false;

    for name in headers.names() {
        match record.get(name).filter(|v| !v.is_blank()) {
            Some(value) => {
                report.push_str(&format!(" Found column {}.", name));
                row.push(value.clone());
            }
            None => {
                report.push_str(&format!(" Missing column {}.", name));
                missing = true;
            }
        }
    }

    if missing {
        return Err(TableError::Validation(format!(
            "All table fields are required.{}",
            report
        )));
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers() -> Headers {
        ["A", "B", "C"].into_iter().collect()
    }

    #[test]
    fn test_headers_stop_at_blank() {
        let cells = vec!["id".into(), "name".into(), CellValue::Null, "stray".into()];
        let headers = Headers::from_cells(&cells);
        assert_eq!(headers.names(), ["id", "name"]);
    }

    #[test]
    fn test_numeric_header_names() {
        let headers = Headers::from_cells(&[2024.into(), "total".into()]);
        assert_eq!(headers.index_of("2024").unwrap(), 0);
    }

    #[test]
    fn test_index_of_unknown() {
        let err = headers().index_of("nope").unwrap_err();
        assert!(matches!(err, TableError::UnknownColumn(ref c) if c == "nope"));
        assert_eq!(err.to_string(), "Unable to find column nope");
    }

    #[test]
    fn test_short_row_pads_with_null() {
        let record = row_to_record(&headers(), &[1.into()]);
        assert_eq!(record.get("A"), Some(&CellValue::from(1)));
        assert_eq!(record.get("C"), Some(&CellValue::Null));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_grid_to_records_needs_data() {
        assert!(grid_to_records(&[]).is_empty());
        assert!(grid_to_records(&[vec!["id".into()]]).is_empty());
    }

    #[test]
    fn test_record_serializes_in_header_order() {
        let record = row_to_record(&headers(), &["c".into(), "b".into(), "a".into()]);
        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r#"{"A":"c","B":"b","C":"a"}"#);
    }

    #[test]
    fn test_record_deserialize() {
        let record: Record = serde_json::from_value(json!({"B": 2, "A": "x"})).unwrap();
        assert_eq!(record.iter().next().map(|(k, _)| k), Some("B"));
        assert!(serde_json::from_value::<Record>(json!({"A": [1]})).is_err());
        assert!(serde_json::from_value::<Record>(json!([1, 2])).is_err());
    }

    #[test]
    fn test_record_to_row_orders_by_header() {
        let record: Record = [("C", 3), ("A", 1), ("B", 2)].into_iter().collect();
        let row = record_to_row(&headers(), &record).unwrap();
        assert_eq!(row, vec![1.into(), 2.into(), 3.into()]);
    }

    #[test]
    fn test_record_to_row_lists_every_missing_column() {
        let record: Record = [("B", 2)].into_iter().collect();
        let msg = record_to_row(&headers(), &record).unwrap_err().to_string();
        assert_eq!(
            msg,
            "All table fields are required. Missing column A. Found column B. Missing column C."
        );
    }

    #[test]
    fn test_record_to_row_blank_values_are_missing() {
        let mut record: Record = [("A", 1), ("B", 2)].into_iter().collect();
        record.insert("C", "");
        assert!(record_to_row(&headers(), &record).is_err());

        record.insert("C", CellValue::Null);
        assert!(record_to_row(&headers(), &record).is_err());

        record.insert("C", 0);
        assert!(record_to_row(&headers(), &record).is_ok());
    }

    #[test]
    fn test_record_to_row_without_headers() {
        let record: Record = [("A", 1)].into_iter().collect();
        assert!(matches!(
            record_to_row(&Headers::default(), &record),
            Err(TableError::Validation(_))
        ));
    }

    #[test]
    fn test_row_ref_coordinates() {
        let row = RowRef::new(1);
        assert_eq!(row.grid_index(), 1);
        assert_eq!(row.sheet_row(), 2);
    }
}
