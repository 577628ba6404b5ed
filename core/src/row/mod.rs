//! Decoding result rows into Rust tuples.
//!
//! A [`Query`](crate::query::Query) knows its row type from the resolved
//! select list: each SQL type maps to a Rust type through [`SQLTypeToRust`],
//! wrapped in `Option` when the column is nullable. Decoding reads the row
//! column by column through [`RowSource`], so any driver row that can hand
//! out [`Value`]s works.
//!
//! ```text
//! select((user.id, user.email))   → Resolved<id, Int, NonNull>, Resolved<email, Text, Null>
//! query.decode(&row)              → (i32, Option<String>)
//! ```

#[cfg(feature = "rusqlite")]
mod rusqlite;

use crate::error::{Result, SqlweaveError};
use crate::traits::with_tuple_sizes;
use crate::types::{
    BigInt, Bool, Bytes, DataType, Date, Double, Float, Int, SmallInt, Text, Time, Timestamp,
    VarChar,
};
use crate::value::Value;

// =============================================================================
// RowSource
// =============================================================================

/// A result row that hands out values by column index.
pub trait RowSource {
    fn column_count(&self) -> usize;

    /// The value of column `index`.
    fn value(&self, index: usize) -> Result<Value>;
}

impl RowSource for [Value] {
    fn column_count(&self) -> usize {
        self.len()
    }

    fn value(&self, index: usize) -> Result<Value> {
        self.get(index)
            .cloned()
            .ok_or(SqlweaveError::ColumnIndex {
                index,
                count: self.len(),
            })
    }
}

impl RowSource for Vec<Value> {
    fn column_count(&self) -> usize {
        self.len()
    }

    fn value(&self, index: usize) -> Result<Value> {
        self.as_slice().value(index)
    }
}

// =============================================================================
// FromValue
// =============================================================================

/// Converts one column value into a Rust value.
#[diagnostic::on_unimplemented(
    message = "cannot decode `{Self}` from a column value",
    label = "this type does not implement FromValue"
)]
pub trait FromValue: Sized {
    /// `index` is only used in error reports.
    fn from_value(value: Value, index: usize) -> Result<Self>;
}

fn mismatch<T>(expected: &'static str, found: &Value, index: usize) -> Result<T> {
    if found.is_null() {
        return Err(SqlweaveError::UnexpectedNull { index });
    }
    Err(SqlweaveError::TypeMismatch {
        expected,
        found: found.kind(),
    })
}

macro_rules! from_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value, index: usize) -> Result<Self> {
                    match value {
                        Value::Integer(v) => <$ty>::try_from(v).map_err(|_| {
                            SqlweaveError::OutOfRange {
                                value: v,
                                target: stringify!($ty),
                            }
                        }),
                        Value::Bool(b) => Ok(<$ty>::from(b)),
                        other => mismatch("INTEGER", &other, index),
                    }
                }
            }
        )*
    };
}

from_value_int!(i16, i32, i64);

impl FromValue for f64 {
    fn from_value(value: Value, index: usize) -> Result<Self> {
        match value {
            Value::Real(v) => Ok(v),
            Value::Integer(v) => Ok(v as f64),
            other => mismatch("REAL", &other, index),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value, index: usize) -> Result<Self> {
        f64::from_value(value, index).map(|v| v as f32)
    }
}

impl FromValue for bool {
    fn from_value(value: Value, index: usize) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            // SQLite has no boolean storage class
            Value::Integer(v) => Ok(v != 0),
            other => mismatch("BOOLEAN", &other, index),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value, index: usize) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v),
            other => mismatch("TEXT", &other, index),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value, index: usize) -> Result<Self> {
        match value {
            Value::Blob(v) => Ok(v),
            Value::Text(v) => Ok(v.into_bytes()),
            other => mismatch("BLOB", &other, index),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value, index: usize) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other, index).map(Some),
        }
    }
}

#[cfg(feature = "chrono")]
mod chrono_values {
    use super::{FromValue, mismatch};
    use crate::error::{Result, SqlweaveError};
    use crate::value::Value;

    fn parse<T>(value: Value, index: usize, target: &'static str, formats: &[&str]) -> Result<T>
    where
        T: ParseWith,
    {
        let text = match value {
            Value::Text(text) => text,
            other => return mismatch("TEXT", &other, index),
        };
        formats
            .iter()
            .find_map(|format| T::parse_with(&text, format))
            .ok_or(SqlweaveError::Parse { text, target })
    }

    trait ParseWith: Sized {
        fn parse_with(text: &str, format: &str) -> Option<Self>;
    }

    impl ParseWith for chrono::NaiveDate {
        fn parse_with(text: &str, format: &str) -> Option<Self> {
            Self::parse_from_str(text, format).ok()
        }
    }

    impl ParseWith for chrono::NaiveTime {
        fn parse_with(text: &str, format: &str) -> Option<Self> {
            Self::parse_from_str(text, format).ok()
        }
    }

    impl ParseWith for chrono::NaiveDateTime {
        fn parse_with(text: &str, format: &str) -> Option<Self> {
            Self::parse_from_str(text, format).ok()
        }
    }

    impl FromValue for chrono::NaiveDate {
        fn from_value(value: Value, index: usize) -> Result<Self> {
            parse(value, index, "NaiveDate", &["%Y-%m-%d"])
        }
    }

    impl FromValue for chrono::NaiveTime {
        fn from_value(value: Value, index: usize) -> Result<Self> {
            parse(value, index, "NaiveTime", &["%H:%M:%S%.f", "%H:%M"])
        }
    }

    impl FromValue for chrono::NaiveDateTime {
        fn from_value(value: Value, index: usize) -> Result<Self> {
            parse(
                value,
                index,
                "NaiveDateTime",
                &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"],
            )
        }
    }
}

// =============================================================================
// FromRow
// =============================================================================

/// Reads a Rust value spanning `COLUMN_COUNT` columns of a row.
///
/// Tuples read their elements left to right: `(A, B)` reads `A` at
/// `offset` and `B` at `offset + 1`.
#[diagnostic::on_unimplemented(
    message = "cannot decode `{Self}` from a result row",
    label = "expected a tuple of decodable values"
)]
pub trait FromRow: Sized {
    const COLUMN_COUNT: usize;

    fn from_row_at<R: RowSource + ?Sized>(row: &R, offset: usize) -> Result<Self>;

    /// Reads the whole row. The row needs at least `COLUMN_COUNT` columns.
    fn from_row<R: RowSource + ?Sized>(row: &R) -> Result<Self> {
        let count = row.column_count();
        if count < Self::COLUMN_COUNT {
            return Err(SqlweaveError::ColumnIndex {
                index: count,
                count,
            });
        }
        Self::from_row_at(row, 0)
    }
}

impl FromRow for () {
    const COLUMN_COUNT: usize = 0;

    fn from_row_at<R: RowSource + ?Sized>(_row: &R, _offset: usize) -> Result<Self> {
        Ok(())
    }
}

macro_rules! impl_from_row_tuple {
    ($($T:ident),+; $($idx:tt),+) => {
        impl<$($T: FromValue),+> FromRow for ($($T,)+) {
            const COLUMN_COUNT: usize = 0 $(+ { let _ = $idx; 1 })+;

            fn from_row_at<__R: RowSource + ?Sized>(row: &__R, offset: usize) -> Result<Self> {
                Ok(($(
                    $T::from_value(row.value(offset + $idx)?, offset + $idx)?,
                )+))
            }
        }
    };
}

with_tuple_sizes!(impl_from_row_tuple);

// =============================================================================
// SQLTypeToRust
// =============================================================================

/// The Rust type a SQL type decodes to.
///
/// Temporal types decode to chrono types with the `chrono` feature and to
/// their text form without it.
#[diagnostic::on_unimplemented(
    message = "SQL type `{Self}` has no Rust mapping",
    label = "cannot be decoded"
)]
pub trait SQLTypeToRust: DataType {
    type Rust: FromValue;
}

macro_rules! sql_rust_mapping {
    ($($sql:ident => $rust:ty),+ $(,)?) => {
        $(
            impl SQLTypeToRust for $sql {
                type Rust = $rust;
            }
        )+
    };
}

sql_rust_mapping! {
    SmallInt => i16,
    Int      => i32,
    BigInt   => i64,
    Float    => f32,
    Double   => f64,
    Text     => String,
    VarChar  => String,
    Bool     => bool,
    Bytes    => Vec<u8>,
}

#[cfg(feature = "chrono")]
sql_rust_mapping! {
    Date      => chrono::NaiveDate,
    Time      => chrono::NaiveTime,
    Timestamp => chrono::NaiveDateTime,
}

#[cfg(not(feature = "chrono"))]
sql_rust_mapping! {
    Date      => String,
    Time      => String,
    Timestamp => String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuples_read_consecutive_columns() {
        let row = vec![Value::Integer(1), Value::Text("a".into()), Value::Null];
        let decoded = <(i64, String, Option<f64>)>::from_row(&row).unwrap();
        assert_eq!(decoded, (1, "a".to_string(), None));
        assert_eq!(<(i64, String, Option<f64>) as FromRow>::COLUMN_COUNT, 3);
    }

    #[test]
    fn null_in_non_null_column() {
        let row = vec![Value::Integer(1), Value::Null];
        assert!(matches!(
            <(i32, i32)>::from_row(&row),
            Err(SqlweaveError::UnexpectedNull { index: 1 })
        ));
    }

    #[test]
    fn narrow_integers_are_range_checked() {
        assert!(matches!(
            i16::from_value(Value::Integer(70_000), 0),
            Err(SqlweaveError::OutOfRange { value: 70_000, target: "i16" })
        ));
        assert_eq!(i32::from_value(Value::Bool(true), 0).unwrap(), 1);
    }

    #[test]
    fn short_rows_are_rejected() {
        let row = [Value::Integer(1)];
        assert!(matches!(
            <(i32, i32)>::from_row(&row[..]),
            Err(SqlweaveError::ColumnIndex { index: 1, count: 1 })
        ));
    }

    #[test]
    fn sqlite_booleans_are_integers() {
        assert!(bool::from_value(Value::Integer(1), 0).unwrap());
        assert!(matches!(
            bool::from_value(Value::Text("yes".into()), 0),
            Err(SqlweaveError::TypeMismatch { expected: "BOOLEAN", found: "TEXT" })
        ));
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn temporal_values_parse_from_text() {
        let date = chrono::NaiveDate::from_value(Value::Text("2024-02-29".into()), 0).unwrap();
        assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let stamp =
            chrono::NaiveDateTime::from_value(Value::Text("2024-02-29T10:30:00".into()), 0).unwrap();
        assert_eq!(stamp.date(), date);
        assert!(matches!(
            chrono::NaiveDate::from_value(Value::Text("nope".into()), 0),
            Err(SqlweaveError::Parse { target: "NaiveDate", .. })
        ));
    }
}
