//! SQLExpr - A typed SQL expression wrapper.

use core::fmt::{self, Display};
use core::marker::PhantomData;

use sqlweave_types::sql::DataType;

use crate::sql::SQL;
use crate::traits::{ColumnSet, ToSQL, TypeSet};
use crate::Nil;

use super::{AggregateKind, Expr, NonNull, Nullability, Scalar, Shape, SubqueryList};

/// A SQL expression that carries type information.
///
/// This wrapper preserves the SQL type through operations, enabling
/// compile-time type checking of SQL expressions.
///
/// # Type Parameters
///
/// - `T`: The SQL data type marker (Int, Text, etc.)
/// - `N`: The nullability marker (NonNull or Null)
/// - `A`: The aggregation marker (Scalar or Agg)
/// - `Tb`: Tables read by the expression
/// - `U`: Bare columns outside aggregates
/// - `Sq`: Embedded subqueries
pub struct SQLExpr<T, N = NonNull, A = Scalar, Tb = Nil, U = Nil, Sq = Nil> {
    sql: SQL,
    shape: Shape,
    _ty: PhantomData<fn() -> (T, N, A, Tb, U, Sq)>,
}

impl<T, N, A, Tb, U, Sq> SQLExpr<T, N, A, Tb, U, Sq> {
    /// Create a new typed expression from raw SQL.
    #[inline]
    pub fn new(sql: SQL) -> Self {
        Self::with_shape(sql, Shape::Atom)
    }

    #[inline]
    pub(crate) fn with_shape(sql: SQL, shape: Shape) -> Self {
        Self {
            sql,
            shape,
            _ty: PhantomData,
        }
    }

    /// Get a reference to the inner SQL.
    #[inline]
    pub fn as_sql(&self) -> &SQL {
        &self.sql
    }
}

impl<T, N, A, Tb, U, Sq> Clone for SQLExpr<T, N, A, Tb, U, Sq> {
    fn clone(&self) -> Self {
        Self::with_shape(self.sql.clone(), self.shape)
    }
}

impl<T, N, A, Tb, U, Sq> fmt::Debug for SQLExpr<T, N, A, Tb, U, Sq> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SQLExpr")
            .field("sql", &self.sql.sql())
            .field("shape", &self.shape)
            .finish()
    }
}

// =============================================================================
// ToSQL Implementation
// =============================================================================

impl<T, N, A, Tb, U, Sq> ToSQL for SQLExpr<T, N, A, Tb, U, Sq> {
    fn to_sql(&self) -> SQL {
        self.sql.clone()
    }

    fn into_sql(self) -> SQL {
        self.sql
    }

    fn shape(&self) -> Shape {
        self.shape
    }
}

impl<T, N, A, Tb, U, Sq> From<SQLExpr<T, N, A, Tb, U, Sq>> for SQL {
    fn from(expr: SQLExpr<T, N, A, Tb, U, Sq>) -> Self {
        expr.sql
    }
}

// =============================================================================
// Expr Implementation
// =============================================================================

impl<T, N, A, Tb, U, Sq> Expr for SQLExpr<T, N, A, Tb, U, Sq>
where
    T: DataType,
    N: Nullability,
    A: AggregateKind,
    Tb: TypeSet,
    U: ColumnSet,
    Sq: SubqueryList,
{
    type SQLType = T;
    type Nullable = N;
    type Aggregate = A;
    type Tables = Tb;
    type Ungrouped = U;
    type Subqueries = Sq;
}

crate::__expr_ops!([T, N, A, Tb, U, Sq] SQLExpr<T, N, A, Tb, U, Sq>);

// =============================================================================
// Display Implementation
// =============================================================================

impl<T, N, A, Tb, U, Sq> Display for SQLExpr<T, N, A, Tb, U, Sq> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.sql, f)
    }
}
