//! Owned SQL values carried as bound parameters and decoded from rows.

use compact_str::CompactString;

/// A dialect-neutral SQL value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Bool(bool),
}

impl Value {
    /// Name of the variant, used in decode errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "INTEGER",
            Value::Real(_) => "REAL",
            Value::Text(_) => "TEXT",
            Value::Blob(_) => "BLOB",
            Value::Bool(_) => "BOOLEAN",
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Blob(v) => write!(f, "<{} bytes>", v.len()),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::Integer(i64::from(value))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::Real(f64::from(value))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<CompactString> for Value {
    #[inline]
    fn from(value: CompactString) -> Self {
        Value::Text(value.into_string())
    }
}

impl From<&[u8]> for Value {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Value::Blob(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "chrono")]
mod chrono_values {
    use super::Value;

    impl From<chrono::NaiveDate> for Value {
        fn from(value: chrono::NaiveDate) -> Self {
            Value::Text(value.format("%Y-%m-%d").to_string())
        }
    }

    impl From<chrono::NaiveTime> for Value {
        fn from(value: chrono::NaiveTime) -> Self {
            Value::Text(value.format("%H:%M:%S%.f").to_string())
        }
    }

    impl From<chrono::NaiveDateTime> for Value {
        fn from(value: chrono::NaiveDateTime) -> Self {
            Value::Text(value.format("%Y-%m-%d %H:%M:%S%.f").to_string())
        }
    }
}

#[cfg(feature = "rusqlite")]
mod rusqlite_values {
    use super::Value;
    use rusqlite::types::{ToSqlOutput, ValueRef};

    impl rusqlite::ToSql for Value {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            Ok(match self {
                Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
                Value::Integer(v) => ToSqlOutput::Borrowed(ValueRef::Integer(*v)),
                Value::Real(v) => ToSqlOutput::Borrowed(ValueRef::Real(*v)),
                Value::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
                Value::Blob(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v)),
                Value::Bool(v) => ToSqlOutput::Borrowed(ValueRef::Integer(i64::from(*v))),
            })
        }
    }

    impl From<ValueRef<'_>> for Value {
        fn from(value: ValueRef<'_>) -> Self {
            match value {
                ValueRef::Null => Value::Null,
                ValueRef::Integer(v) => Value::Integer(v),
                ValueRef::Real(v) => Value::Real(v),
                ValueRef::Text(v) => Value::Text(String::from_utf8_lossy(v).into_owned()),
                ValueRef::Blob(v) => Value::Blob(v.to_vec()),
            }
        }
    }
}
