//! Typed SQL expressions.
//!
//! Every expression carries, in its type:
//!
//! - the SQL data type it evaluates to,
//! - whether it can be NULL,
//! - whether it is an aggregate,
//! - the tables it reads directly,
//! - the bare columns it uses outside any aggregate,
//! - the correlated subqueries it embeds.
//!
//! Clauses and statements inspect these to reject ill-formed SQL before it is
//! ever rendered.

mod agg;
mod case;
mod cmp;
mod ext;
mod logical;
mod math;
mod null;
mod ops;
mod primitives;
mod set;
mod string;
mod subquery;
mod typed;
mod util;

pub use agg::*;
pub use case::*;
pub use cmp::*;
pub use ext::*;
pub use logical::*;
pub use math::*;
pub use null::*;
pub use primitives::*;
pub use set::*;
pub use string::*;
pub use subquery::*;
pub use typed::*;

pub(crate) use util::{argument, binary_op, operand};

use sqlweave_types::sql::DataType;

use crate::traits::{ColumnSet, Concat, ToSQL, TypeSet};

// =============================================================================
// Nullability
// =============================================================================

/// Type-level nullability flag.
pub trait Nullability: Copy + Default + Send + Sync + 'static {
    /// `Null` if either side is `Null`.
    type Or<N: Nullability>: Nullability;

    /// `T` or `Option<T>`.
    type Wrap<T>;

    const NULLABLE: bool;
}

/// The expression never evaluates to NULL.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonNull;

/// The expression may evaluate to NULL.
#[derive(Debug, Clone, Copy, Default)]
pub struct Null;

impl Nullability for NonNull {
    type Or<N: Nullability> = N;
    type Wrap<T> = T;

    const NULLABLE: bool = false;
}

impl Nullability for Null {
    type Or<N: Nullability> = Null;
    type Wrap<T> = Option<T>;

    const NULLABLE: bool = true;
}

/// Nullability of an expression combining `L` and `R`.
pub type NullOr<L, R> = <L as Nullability>::Or<R>;

/// A value of nullability `N` may be stored where `Self` is expected.
#[diagnostic::on_unimplemented(
    message = "a nullable value cannot be assigned to a NOT NULL column",
    label = "this value may be NULL"
)]
pub trait AssignableTo<Target: Nullability> {}

impl<Target: Nullability> AssignableTo<Target> for NonNull {}
impl AssignableTo<Null> for Null {}

// =============================================================================
// Aggregation
// =============================================================================

/// Type-level aggregate flag.
pub trait AggregateKind: Copy + Default + Send + Sync + 'static {
    /// `Agg` if either side is `Agg`.
    type Or<A: AggregateKind>: AggregateKind;

    /// Tables through which an outer join makes this expression nullable.
    ///
    /// For scalars that is every table read. For aggregates only the tables
    /// of bare columns count; `COUNT(t.x)` is not NULL just because `t` was
    /// outer-joined.
    type NullVia<Tables: TypeSet, Ungrouped: ColumnSet>: TypeSet;

    const AGGREGATE: bool;
}

/// Plain row-level expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalar;

/// Expression containing an aggregate function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Agg;

impl AggregateKind for Scalar {
    type Or<A: AggregateKind> = A;
    type NullVia<Tables: TypeSet, Ungrouped: ColumnSet> = Tables;

    const AGGREGATE: bool = false;
}

impl AggregateKind for Agg {
    type Or<A: AggregateKind> = Agg;
    type NullVia<Tables: TypeSet, Ungrouped: ColumnSet> = <Ungrouped as ColumnSet>::Tables;

    const AGGREGATE: bool = true;
}

/// Aggregate flag of an expression combining `L` and `R`.
pub type AggOr<L, R> = <L as AggregateKind>::Or<R>;

/// Tables whose outer-join status decides whether `E` can be NULL.
pub type NullVia<E> = <<E as Expr>::Aggregate as AggregateKind>::NullVia<
    <E as Expr>::Tables,
    <E as Expr>::Ungrouped,
>;

/// Rejects aggregates where SQL only allows row-level expressions.
#[diagnostic::on_unimplemented(
    message = "aggregate functions are not allowed here",
    label = "this expression contains an aggregate",
    note = "WHERE, ON, SET and aggregate arguments only accept row-level expressions; use having() for aggregate conditions"
)]
pub trait NonAggregate: AggregateKind {}

impl NonAggregate for Scalar {}

/// Without GROUP BY, an aggregate select list may not use bare columns.
#[diagnostic::on_unimplemented(
    message = "select list mixes aggregates with the bare columns `{U}`",
    label = "bare column used next to an aggregate",
    note = "add the columns to group_by() or wrap them in an aggregate"
)]
pub trait ConsistentAggregates<U> {}

impl<U> ConsistentAggregates<U> for Scalar {}
impl ConsistentAggregates<crate::Nil> for Agg {}

// =============================================================================
// Expression trait
// =============================================================================

/// Operator class of a rendered expression, used to decide where
/// parentheses are required when it becomes an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    /// Columns, parameters, function calls, CASE, parenthesized subqueries.
    #[default]
    Atom,
    /// `a = b`, `a IS NULL`, `a IN (...)`, `a LIKE b`, `a BETWEEN b AND c`.
    Compare,
    /// `a + b` and friends.
    Arith,
    /// `NOT a`
    Not,
    /// `a AND b AND ...`
    And,
    /// `a OR b OR ...`
    Or,
}

/// A typed SQL expression.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a SQL expression",
    label = "expected a column, literal or expression"
)]
pub trait Expr: ToSQL {
    type SQLType: DataType;
    type Nullable: Nullability;
    type Aggregate: AggregateKind;
    /// Tables read directly, outside of subqueries.
    type Tables: TypeSet;
    /// Bare columns used outside of aggregate functions.
    type Ungrouped: ColumnSet;
    /// Subqueries embedded in this expression.
    type Subqueries: SubqueryList;
}

// =============================================================================
// Signature helpers
// =============================================================================

/// `Null` if either operand is nullable.
pub type NullOf2<L, R> = NullOr<<L as Expr>::Nullable, <R as Expr>::Nullable>;

/// Tables read by both operands.
pub type TablesOf2<L, R> = Concat<<L as Expr>::Tables, <R as Expr>::Tables>;

/// Bare columns of both operands.
pub type UngroupedOf2<L, R> =
    <<L as Expr>::Ungrouped as ColumnSet>::Union<<R as Expr>::Ungrouped>;

/// Subqueries of both operands.
pub type SubqueriesOf2<L, R> =
    <<L as Expr>::Subqueries as SubqueryList>::Append<<R as Expr>::Subqueries>;

/// An expression derived from one operand.
pub type Unary<T, N, E> = SQLExpr<
    T,
    N,
    <E as Expr>::Aggregate,
    <E as Expr>::Tables,
    <E as Expr>::Ungrouped,
    <E as Expr>::Subqueries,
>;

/// An expression derived from two operands.
pub type Binary<T, N, L, R> = SQLExpr<
    T,
    N,
    AggOr<<L as Expr>::Aggregate, <R as Expr>::Aggregate>,
    TablesOf2<L, R>,
    UngroupedOf2<L, R>,
    SubqueriesOf2<L, R>,
>;

/// An expression derived from three operands.
pub type Ternary<T, N, A, B, C> = SQLExpr<
    T,
    N,
    AggOr<<A as Expr>::Aggregate, AggOr<<B as Expr>::Aggregate, <C as Expr>::Aggregate>>,
    Concat<<A as Expr>::Tables, TablesOf2<B, C>>,
    <<A as Expr>::Ungrouped as ColumnSet>::Union<UngroupedOf2<B, C>>,
    <<A as Expr>::Subqueries as SubqueryList>::Append<SubqueriesOf2<B, C>>,
>;

/// An aggregate over `E`: no bare columns remain.
pub type Aggregated<T, N, E> = SQLExpr<
    T,
    N,
    Agg,
    <E as Expr>::Tables,
    crate::Nil,
    <E as Expr>::Subqueries,
>;
