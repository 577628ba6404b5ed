//! Core traits for SQL generation.

mod table;
mod tuple;
mod type_set;

pub use table::*;
pub use type_set::*;

pub(crate) use tuple::{seq_dual, seq_tuples, with_dual_tuple_sizes, with_tuple_sizes};

use crate::expr::Shape;
use crate::sql::SQL;

/// Types that can be converted to SQL fragments.
pub trait ToSQL {
    fn to_sql(&self) -> SQL;

    /// Consume self and return SQL without cloning.
    /// Default delegates to `to_sql()`. Types that own their SQL override this.
    fn into_sql(self) -> SQL
    where
        Self: Sized,
    {
        self.to_sql()
    }

    /// Operator class of the rendered fragment.
    fn shape(&self) -> Shape {
        Shape::Atom
    }
}

impl<T: ToSQL> ToSQL for &T {
    fn to_sql(&self) -> SQL {
        (**self).to_sql()
    }

    fn shape(&self) -> Shape {
        (**self).shape()
    }
}

/// A static SQL name attached to a zero-sized tag type.
///
/// Tags stand in for SQL aliases: `expr.as_(Total)`, `table.as_(Parent)`,
/// `cte(Recent)`. Declare them with [`name_tag!`](crate::name_tag).
pub trait Name: Copy + Default + Send + Sync + 'static {
    const NAME: &'static str;
}
