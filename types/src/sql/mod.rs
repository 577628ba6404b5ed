//! SQL data type markers for compile-time type safety.
//!
//! This module provides zero-sized type markers that represent SQL data types
//! at the Rust type level, enabling the type system to verify compatible
//! comparisons and operations at compile time.

mod coerce;
mod ops;

pub use coerce::*;
pub use ops::*;

mod private {
    pub trait Sealed {}
}

/// Represents a SQL data type at the type level.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a recognized SQL data type",
    label = "use a sqlweave SQL type marker (Int, Text, Bool, etc.)"
)]
pub trait DataType: private::Sealed + Copy + Default + Send + Sync + 'static {
    /// Generic SQL spelling of the type, used in schema metadata.
    const SQL_NAME: &'static str;
}

/// Numeric SQL types that support arithmetic operations (+, -, *, /).
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a numeric SQL type",
    label = "arithmetic operations require Int, SmallInt, BigInt, Float, or Double"
)]
pub trait Numeric: DataType {}

/// Integer SQL types (SMALLINT, INTEGER, BIGINT).
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an integer SQL type",
    label = "expected SmallInt, Int, or BigInt"
)]
pub trait Integral: Numeric {}

/// Floating-point SQL types (REAL, DOUBLE PRECISION).
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a floating-point SQL type",
    label = "expected Float or Double"
)]
pub trait Floating: Numeric {}

/// String/text SQL types (TEXT, VARCHAR).
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a text SQL type",
    label = "expected Text or VarChar"
)]
pub trait Textual: DataType {}

/// Binary data types (BLOB, BYTEA).
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a binary SQL type",
    label = "expected Bytes (BLOB/BYTEA)"
)]
pub trait Binary: DataType {}

/// Temporal SQL types (DATE, TIME, TIMESTAMP).
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a temporal SQL type",
    label = "expected Date, Time, or Timestamp"
)]
pub trait Temporal: DataType {}

/// Types usable as a condition (WHERE, HAVING, ON, CASE WHEN).
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a boolean SQL type",
    label = "conditions must be boolean expressions"
)]
pub trait BooleanLike: DataType {}

macro_rules! data_types {
    ($($(#[$meta:meta])* $name:ident => $sql:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            impl private::Sealed for $name {}

            impl DataType for $name {
                const SQL_NAME: &'static str = $sql;
            }
        )*
    };
}

data_types! {
    /// 16-bit integer.
    SmallInt => "SMALLINT",
    /// 32-bit integer.
    Int => "INTEGER",
    /// 64-bit integer.
    BigInt => "BIGINT",
    /// Single-precision float.
    Float => "REAL",
    /// Double-precision float.
    Double => "DOUBLE PRECISION",
    /// Unbounded text.
    Text => "TEXT",
    /// Bounded text.
    VarChar => "VARCHAR",
    Bool => "BOOLEAN",
    /// Binary data.
    Bytes => "BLOB",
    Date => "DATE",
    Time => "TIME",
    Timestamp => "TIMESTAMP",
}

impl Numeric for SmallInt {}
impl Numeric for Int {}
impl Numeric for BigInt {}
impl Numeric for Float {}
impl Numeric for Double {}

impl Integral for SmallInt {}
impl Integral for Int {}
impl Integral for BigInt {}

impl Floating for Float {}
impl Floating for Double {}

impl Textual for Text {}
impl Textual for VarChar {}

impl Binary for Bytes {}

impl Temporal for Date {}
impl Temporal for Time {}
impl Temporal for Timestamp {}

impl BooleanLike for Bool {}
