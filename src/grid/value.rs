//! Scalar cell values.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A single grid cell.
///
/// Serialized untagged, so each variant maps onto the matching JSON scalar.
/// Arrays and objects are not cells and fail to deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Empty cell, or a cell past the end of a short row
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl CellValue {
    /// True for values that do not count as present: null and the empty string
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Convert a JSON value into a cell, rejecting arrays and objects
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(CellValue::Null),
            Value::Bool(b) => Some(CellValue::Bool(b)),
            Value::Number(n) => Some(CellValue::Number(n)),
            Value::String(s) => Some(CellValue::String(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Convert into the equivalent JSON scalar
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Number(n) => Value::Number(n.clone()),
            CellValue::String(s) => Value::String(s.clone()),
        }
    }
}

/// Strict equality: variants never compare equal to each other, so the
/// string `"1"` does not match the number `1`. Numbers compare by value.
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Number(a), CellValue::Number(b)) => {
                if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
                    x == y
                } else if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
                    x == y
                } else if a.is_f64() || b.is_f64() {
                    a.as_f64() == b.as_f64()
                } else {
                    // one negative i64, one u64 beyond i64::MAX
                    false
                }
            }
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n.into())
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n.into())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<f64> for CellValue {
    /// Non-finite floats have no JSON form and become `Null`
    fn from(n: f64) -> Self {
        Number::from_f64(n)
            .map(CellValue::Number)
            .unwrap_or(CellValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_equality() {
        assert_eq!(CellValue::from(1), CellValue::from(1));
        assert_ne!(CellValue::from("1"), CellValue::from(1));
        assert_ne!(CellValue::from(true), CellValue::from(1));
        assert_ne!(CellValue::Null, CellValue::from(""));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert_eq!(CellValue::from(2), CellValue::from(2.0));
        assert_ne!(CellValue::from(2), CellValue::from(2.5));
    }

    #[test]
    fn test_large_integers_stay_distinct() {
        let a = CellValue::Number(Number::from(9_007_199_254_740_993u64));
        let b = CellValue::Number(Number::from(9_007_199_254_740_992u64));
        assert_ne!(a, b);
        assert_eq!(a, CellValue::Number(Number::from(9_007_199_254_740_993u64)));

        let big = CellValue::Number(Number::from(u64::MAX));
        assert_ne!(big, CellValue::Number(Number::from(u64::MAX - 1)));
        assert_ne!(big, CellValue::from(-1));
    }

    #[test]
    fn test_blank() {
        assert!(CellValue::Null.is_blank());
        assert!(CellValue::from("").is_blank());
        assert!(!CellValue::from(0).is_blank());
        assert!(!CellValue::from(false).is_blank());
    }

    #[test]
    fn test_untagged_serde() {
        let cells: Vec<CellValue> = serde_json::from_value(json!([null, true, 3, "x"])).unwrap();
        assert_eq!(
            cells,
            vec![CellValue::Null, CellValue::from(true), CellValue::from(3), CellValue::from("x")]
        );
        assert_eq!(serde_json::to_value(&cells).unwrap(), json!([null, true, 3, "x"]));
    }

    #[test]
    fn test_rejects_nested_json() {
        assert!(CellValue::from_json(json!([1, 2])).is_none());
        assert!(CellValue::from_json(json!({"a": 1})).is_none());
        assert!(serde_json::from_value::<CellValue>(json!({"a": 1})).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::from("z").to_string(), "z");
        assert_eq!(CellValue::from(7).to_string(), "7");
        assert_eq!(CellValue::Null.to_string(), "");
    }
}
