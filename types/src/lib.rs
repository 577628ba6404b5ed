//! Shared type definitions for sqlweave
//!
//! This crate provides the pieces that every sqlweave crate agrees on:
//!
//! - [`Dialect`] - Database dialect enum (SQLite, PostgreSQL, MySQL)
//! - SQL data type markers in the [`sql`] module
//!
//! # Features
//!
//! - `std` - Standard library support (enabled by default)
//! - `serde` - Enable serde serialization/deserialization of [`Dialect`]

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod dialect;
pub mod sql;

pub use dialect::{Dialect, DialectParseError};

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::Dialect;
    pub use crate::sql::{
        ArithmeticOutput, BigInt, Binary, Bool, BooleanLike, Bytes, Compatible, DataType, Date,
        Double, Float, Floating, Int, Integral, Numeric, SmallInt, Temporal, Text, Textual, Time,
        Timestamp, VarChar,
    };
}
