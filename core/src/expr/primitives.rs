//! Expr implementations for Rust primitive types.
//!
//! These implementations allow using Rust literals directly in type-safe
//! SQL expressions. Every literal is bound as a parameter, never inlined.

use compact_str::CompactString;
use sqlweave_types::sql::DataType;

use crate::sql::{SQL, Token};
use crate::traits::ToSQL;
use crate::types::{BigInt, Bool, Bytes, Double, Float, Int, SmallInt, Text};
use crate::value::Value;
use crate::Nil;

use super::{Expr, NonNull, Null, SQLExpr, Scalar};

/// A Rust value that maps to a single SQL type.
pub trait Literal: Into<Value> + Clone {
    type SQLType: DataType;
}

macro_rules! literals {
    ($($ty:ty => $sql:ty),* $(,)?) => {
        $(
            impl Literal for $ty {
                type SQLType = $sql;
            }

            impl ToSQL for $ty {
                fn to_sql(&self) -> SQL {
                    SQL::param(self.clone())
                }

                fn into_sql(self) -> SQL {
                    SQL::param(self)
                }
            }

            impl Expr for $ty {
                type SQLType = $sql;
                type Nullable = NonNull;
                type Aggregate = Scalar;
                type Tables = Nil;
                type Ungrouped = Nil;
                type Subqueries = Nil;
            }
        )*
    };
}

// =============================================================================
// Integer, Float, Text, Bool, Blob Types
// =============================================================================

literals! {
    i16 => SmallInt,
    i32 => Int,
    i64 => BigInt,
    u32 => BigInt,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    &str => Text,
    String => Text,
    Vec<u8> => Bytes,
}

#[cfg(feature = "chrono")]
literals! {
    chrono::NaiveDate => crate::types::Date,
    chrono::NaiveTime => crate::types::Time,
    chrono::NaiveDateTime => crate::types::Timestamp,
}

// =============================================================================
// Option<T>
// =============================================================================

impl<T: Literal> ToSQL for Option<T> {
    fn to_sql(&self) -> SQL {
        match self {
            Some(value) => SQL::param(value.clone()),
            None => SQL::token(Token::NULL),
        }
    }
}

impl<T: Literal> Expr for Option<T> {
    type SQLType = T::SQLType;
    type Nullable = Null;
    type Aggregate = Scalar;
    type Tables = Nil;
    type Ungrouped = Nil;
    type Subqueries = Nil;
}

// =============================================================================
// Explicit values
// =============================================================================

/// Wraps a Rust value as a bound parameter.
///
/// Literals are already expressions; `value` is useful when the type must be
/// stated, e.g. `value(3).as_(Three)` in a select list.
pub fn value<T: Literal>(value: T) -> SQLExpr<T::SQLType> {
    SQLExpr::new(SQL::param(value))
}

/// A typed SQL `NULL`.
pub fn null<T: DataType>() -> SQLExpr<T, Null> {
    SQLExpr::new(SQL::token(Token::NULL))
}

/// A named parameter of SQL type `T`, bound later with
/// [`Query::bind`](crate::query::Query::bind).
pub fn placeholder<T: DataType>(name: impl Into<CompactString>) -> SQLExpr<T> {
    SQLExpr::new(SQL::placeholder(name))
}

/// Same as [`placeholder`] but the bound value may be NULL.
pub fn nullable_placeholder<T: DataType>(name: impl Into<CompactString>) -> SQLExpr<T, Null> {
    SQLExpr::new(SQL::placeholder(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_bind_as_parameters() {
        let sql = 5i32.to_sql();
        assert_eq!(sql.sql(), "?");
        assert_eq!(sql.params().collect::<Vec<_>>(), [&Value::Integer(5)]);
        assert_eq!("x".to_sql().params().next(), Some(&Value::Text("x".into())));
    }

    #[test]
    fn none_renders_null() {
        assert_eq!(None::<i32>.to_sql().sql(), "NULL");
        assert_eq!(Some(1i64).to_sql().sql(), "?");
        assert_eq!(null::<Int>().to_sql().sql(), "NULL");
    }

    #[test]
    fn placeholders_are_named() {
        let sql = placeholder::<Text>("name").into_sql();
        assert_eq!(sql.placeholders().collect::<Vec<_>>(), ["name"]);
    }
}
