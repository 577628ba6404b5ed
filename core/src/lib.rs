//! Compile-time checked SQL statements.
//!
//! Tables are declared with [`table!`], statements are assembled with the
//! builders in [`builder`], and every structural rule of SQL that can be
//! decided from the shape of a statement is a trait bound or a constant
//! assertion on the call that would break it:
//!
//! - columns only from tables in scope, including correlated subqueries;
//! - join conditions only over joined tables;
//! - no aggregates in WHERE, no bare columns next to aggregates without
//!   GROUP BY;
//! - CTEs declared before use;
//! - INSERT covering every required column;
//! - result nullability following outer joins.
//!
//! Built statements render for SQLite, PostgreSQL and MySQL with bound
//! parameters, and decode result rows into Rust tuples.

#[macro_use]
mod macros;
mod tracing;

pub mod builder;
pub mod dynamic;
pub mod error;
pub mod expr;
pub mod from;
pub mod join;
pub mod names;
pub mod query;
pub mod row;
pub mod schema;
pub mod sql;
pub mod traits;
pub mod value;

/// SQL type markers and the dialect enum.
pub mod types {
    pub use sqlweave_types::Dialect;
    pub use sqlweave_types::sql::*;

    pub use crate::traits::Nullable;
}

pub use error::{Result, SqlweaveError};
pub use traits::*;

/// Everything needed to declare tables and write statements.
pub mod prelude {
    #[doc(hidden)]
    pub use paste::paste;

    pub use crate::builder::{
        assign, cte, default_value, delete_from, insert_into, select, select_distinct, update,
        with,
    };
    #[cfg(feature = "sqlite")]
    pub use crate::builder::{insert_or_ignore_into, insert_or_replace_into};
    pub use crate::dynamic::dynamic;
    pub use crate::error::SqlweaveError;
    pub use crate::expr::*;
    pub use crate::join::JoinExt;
    pub use crate::query::Query;
    pub use crate::schema::{ColumnExt, TableExt, all_of};
    pub use crate::traits::{Column, Name, Nullable, Table, ToSQL};
    pub use crate::types::*;
    // `expr::Binary` is the two-operand expression alias; the prelude keeps
    // the SQL type category.
    pub use crate::types::Binary;
    pub use crate::value::Value;
    pub use crate::{name_tag, table};
}
