//! Row access
//!
//! Rows stay typed; the table reads them through [`TableRow::field`] and a
//! closed [`FieldValue`] so search, filter and plain rendering need no
//! per-type code.

use std::fmt;

/// A single field read out of a row
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// String coercion used by search and plain cells; null is empty
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }

    /// Identity key, if this value can serve as one
    pub fn as_key(&self) -> Option<RowKey> {
        match self {
            FieldValue::Int(i) => Some(RowKey::Int(*i)),
            FieldValue::Text(s) if !s.is_empty() => Some(RowKey::Text(s.clone())),
            FieldValue::Bool(b) => Some(RowKey::Bool(*b)),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

macro_rules! field_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Int(i64::from(value))
                }
            }

            impl From<&$ty> for FieldValue {
                fn from(value: &$ty) -> Self {
                    FieldValue::Int(i64::from(*value))
                }
            }
        )*
    };
}

field_from_int!(i64, i32, u32, i16, u16, u8);

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&bool> for FieldValue {
    fn from(value: &bool) -> Self {
        FieldValue::Bool(*value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&f64> for FieldValue {
    fn from(value: &f64) -> Self {
        FieldValue::Float(*value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

macro_rules! field_from_option {
    ($($ty:ty),*) => {
        $(
            impl From<&Option<$ty>> for FieldValue {
                fn from(value: &Option<$ty>) -> Self {
                    value.as_ref().map(FieldValue::from).unwrap_or_default()
                }
            }
        )*
    };
}

field_from_option!(i64, i32, u32, i16, u16, u8, bool, f64, String);

/// Hashable row identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Int(i64),
    Text(String),
    Bool(bool),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Int(i) => write!(f, "{i}"),
            RowKey::Text(s) => write!(f, "{s}"),
            RowKey::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// A record the data table can display.
///
/// Unknown keys read as [`FieldValue::Null`].
pub trait TableRow: Clone + 'static {
    fn field(&self, key: &str) -> FieldValue;
}

/// Implement [`TableRow`] by listing the struct fields columns may name.
///
/// ```ignore
/// table_row!(Rule { id, codigo_regla, descripcion, status });
/// ```
#[macro_export]
macro_rules! table_row {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::table::TableRow for $ty {
            fn field(&self, key: &str) -> $crate::table::FieldValue {
                match key {
                    $(stringify!($field) => $crate::table::FieldValue::from(&self.$field),)*
                    _ => $crate::table::FieldValue::Null,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        assert_eq!(FieldValue::Null.to_text(), "");
        assert_eq!(FieldValue::from(42i64).to_text(), "42");
        assert_eq!(FieldValue::from(true).to_text(), "true");
        assert_eq!(FieldValue::from("Abc").to_text(), "Abc");
        assert_eq!(FieldValue::from(&None::<String>), FieldValue::Null);
        assert_eq!(FieldValue::from(&Some(3i32)), FieldValue::Int(3));
        assert_eq!(FieldValue::from(&Some(false)), FieldValue::Bool(false));
        assert_eq!(FieldValue::from(&None::<i64>), FieldValue::Null);
    }

    #[test]
    fn test_keys() {
        assert_eq!(FieldValue::Int(7).as_key(), Some(RowKey::Int(7)));
        assert_eq!(
            FieldValue::from("r-1").as_key(),
            Some(RowKey::Text("r-1".to_string()))
        );
        assert_eq!(FieldValue::from("").as_key(), None);
        assert_eq!(FieldValue::Null.as_key(), None);
        assert_eq!(FieldValue::Float(1.5).as_key(), None);
        assert_eq!(RowKey::Int(12).to_string(), "12");
    }
}
