//! Subqueries used as expressions (EXISTS, scalar subqueries, IN).
//!
//! A subquery may read tables of the statement around it. Those references
//! are not checked where the subquery is built. Instead the subquery travels
//! inside the expression type as a [`Subquery`] element, and the statement
//! that finally embeds it checks that every table the subquery requires is
//! provided either by the subquery itself or by that statement.

use core::marker::PhantomData;

use crate::sql::{SQL, Token};
use crate::traits::{Concat, Cons, Nil, SubsetOf, TableList, ToSQL, TypeSet};
use crate::types::{Bool, Compatible, DataType};

use super::{Expr, NonNull, Null, SQLExpr, Scalar, Shape, operand};

// =============================================================================
// Subquery lists
// =============================================================================

/// A subquery embedded in an expression.
///
/// - `Req`: tables the subquery reads
/// - `Prov`: tables its own FROM clause provides
/// - `Ctes`: CTEs it references
pub struct Subquery<Req, Prov, Ctes>(PhantomData<fn() -> (Req, Prov, Ctes)>);

/// A type-level list of [`Subquery`] elements.
pub trait SubqueryList: TypeSet {
    type Append<Rhs: SubqueryList>: SubqueryList;

    /// Every element with `Extra` added to what it provides. Subqueries
    /// nested in a subquery may read the tables of the subquery around them.
    type Widen<Extra: TableList>: SubqueryList;

    /// CTEs required by any element.
    type Ctes: TypeSet;
}

impl SubqueryList for Nil {
    type Append<Rhs: SubqueryList> = Rhs;
    type Widen<Extra: TableList> = Nil;
    type Ctes = Nil;
}

impl<Req, Prov, C, Tail> SubqueryList for Cons<Subquery<Req, Prov, C>, Tail>
where
    Req: TypeSet,
    Prov: TableList,
    C: TypeSet,
    Tail: SubqueryList,
{
    type Append<Rhs: SubqueryList> = Cons<Subquery<Req, Prov, C>, Tail::Append<Rhs>>;
    type Widen<Extra: TableList> = Cons<Subquery<Req, Prov::Append<Extra>, C>, Tail::Widen<Extra>>;
    type Ctes = Concat<C, Tail::Ctes>;
}

/// Every subquery in `Self` reads only tables provided by itself or by the
/// enclosing scope `Outer`.
#[diagnostic::on_unimplemented(
    message = "a subquery reads tables that are not in scope",
    label = "subquery requirements not satisfied here",
    note = "a correlated subquery may only reference tables of its own FROM clause or of the enclosing statement"
)]
pub trait ResolvesIn<Outer, Indices> {}

impl<Outer> ResolvesIn<Outer, Nil> for Nil {}

impl<Req, Prov, C, Tail, Outer, I, Is> ResolvesIn<Outer, Cons<I, Is>>
    for Cons<Subquery<Req, Prov, C>, Tail>
where
    Prov: TableList,
    Outer: TableList,
    Req: SubsetOf<Prov::Append<Outer>, I>,
    Tail: ResolvesIn<Outer, Is>,
{
}

// =============================================================================
// Statements usable as subqueries
// =============================================================================

/// A complete SELECT that can be embedded in an expression.
///
/// Implemented by executable select builders and by built queries.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a subquery",
    label = "expected a complete SELECT statement",
    note = "a select with a FROM clause needs where_() or unconditionally() first"
)]
pub trait SubqueryStatement: ToSQL {
    /// SQL types of the selected columns, as a type-level list.
    type Columns;
    /// Tables read by the statement's clauses.
    type Required: TypeSet;
    /// Tables provided by the statement's FROM clause.
    type Provided: TableList;
    /// CTEs referenced by the statement.
    type Ctes: TypeSet;
    /// Subqueries nested in the statement.
    type Subqueries: SubqueryList;
}

/// A subquery that selects exactly one column.
#[diagnostic::on_unimplemented(
    message = "subquery must select exactly one column",
    label = "selects `{Self}`"
)]
pub trait SingleColumn {
    type SQLType: DataType;
}

impl<T: DataType> SingleColumn for Cons<T, Nil> {
    type SQLType = T;
}

/// The subquery list an expression gains by embedding `S`.
pub type SubqueriesOf<S> = Cons<
    Subquery<
        <S as SubqueryStatement>::Required,
        <S as SubqueryStatement>::Provided,
        <S as SubqueryStatement>::Ctes,
    >,
    <<S as SubqueryStatement>::Subqueries as SubqueryList>::Widen<
        <S as SubqueryStatement>::Provided,
    >,
>;

/// SQL type of a one-column subquery.
pub type ColumnOf<S> = <<S as SubqueryStatement>::Columns as SingleColumn>::SQLType;

/// Result of `exists`/`not_exists`.
pub type Exists<S> = SQLExpr<Bool, NonNull, Scalar, Nil, Nil, SubqueriesOf<S>>;

/// Result of `scalar`.
pub type ScalarSubquery<S> = SQLExpr<ColumnOf<S>, Null, Scalar, Nil, Nil, SubqueriesOf<S>>;

/// Result of `in_query`/`not_in_query`.
pub type InQuery<E, S> = SQLExpr<
    Bool,
    <E as Expr>::Nullable,
    <E as Expr>::Aggregate,
    <E as Expr>::Tables,
    <E as Expr>::Ungrouped,
    <<E as Expr>::Subqueries as SubqueryList>::Append<SubqueriesOf<S>>,
>;

// =============================================================================
// EXISTS
// =============================================================================

/// EXISTS subquery check.
///
/// Returns true if the subquery returns any rows. Only SELECTs can be
/// embedded:
///
/// ```compile_fail,E0277
/// use sqlweave_core::builder::{delete_from, select};
/// use sqlweave_core::expr::exists;
/// use sqlweave_core::table;
/// use sqlweave_core::types::Int;
///
/// table! { struct Log("log") { id: Int } }
///
/// let log = Log::default();
/// let removed = delete_from(log).unconditionally().returning(log.id).build();
/// let _ = select(exists(removed));
/// ```
pub fn exists<S: SubqueryStatement>(subquery: S) -> Exists<S> {
    Exists::<S>::new(SQL::token(Token::EXISTS).append(subquery.into_sql().parens()))
}

/// NOT EXISTS subquery check.
///
/// Returns true if the subquery returns no rows.
pub fn not_exists<S: SubqueryStatement>(subquery: S) -> Exists<S> {
    let sql = SQL::token(Token::NOT)
        .push(Token::EXISTS)
        .append(subquery.into_sql().parens());
    Exists::<S>::with_shape(sql, Shape::Not)
}

// =============================================================================
// Scalar subquery
// =============================================================================

/// A one-column subquery used as a value.
///
/// Always nullable: a subquery that returns no row yields NULL.
pub fn scalar<S>(subquery: S) -> ScalarSubquery<S>
where
    S: SubqueryStatement,
    S::Columns: SingleColumn,
{
    ScalarSubquery::<S>::new(subquery.into_sql().parens())
}

// =============================================================================
// IN subquery
// =============================================================================

fn membership<E: Expr, S: SubqueryStatement>(expr: E, subquery: S, negated: bool) -> InQuery<E, S> {
    let mut sql = operand(expr, Shape::Compare);
    if negated {
        sql.push_mut(Token::NOT);
    }
    let sql = sql.push(Token::IN).append(subquery.into_sql().parens());
    InQuery::<E, S>::with_shape(sql, Shape::Compare)
}

/// IN subquery check.
///
/// The subquery must select one column compatible with `expr`.
pub fn in_query<E, S>(expr: E, subquery: S) -> InQuery<E, S>
where
    E: Expr,
    S: SubqueryStatement,
    S::Columns: SingleColumn,
    E::SQLType: Compatible<ColumnOf<S>>,
{
    membership(expr, subquery, false)
}

/// NOT IN subquery check.
pub fn not_in_query<E, S>(expr: E, subquery: S) -> InQuery<E, S>
where
    E: Expr,
    S: SubqueryStatement,
    S::Columns: SingleColumn,
    E::SQLType: Compatible<ColumnOf<S>>,
{
    membership(expr, subquery, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Outer;

    struct A;
    struct B;

    impl crate::traits::ScopeTable for A {
        const SCOPE_NAME: &'static str = "a";
        type Outer = Outer<A>;
    }

    impl crate::traits::ScopeTable for B {
        const SCOPE_NAME: &'static str = "b";
        type Outer = Outer<B>;
    }

    fn resolves<L: ResolvesIn<P, Is>, P, Is>() {}

    #[test]
    fn correlated_subquery_resolves_against_outer_scope() {
        // reads `a` and `b`, provides `b`, enclosed by a statement over `a`
        type Sub = Cons<Subquery<Cons<A, Cons<B, Nil>>, Cons<B, Nil>, Nil>, Nil>;
        resolves::<Sub, Cons<A, Nil>, _>();
        resolves::<<Sub as SubqueryList>::Widen<Cons<A, Nil>>, Nil, _>();
    }
}
