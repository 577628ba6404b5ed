use core::fmt;
use core::marker::PhantomData;

use crate::expr::{Condition, Expr, NonAggregate, ResolvesIn, SubqueryList};
use crate::from::FromItem;
use crate::join::assert_disjoint;
use crate::query::{Modification, Query};
use crate::schema::table_target;
use crate::sql::{SQL, Token};
use crate::traits::{Concat, Cons, Nil, SubsetOf, Table, TableList, ToSQL, TypeSet};
use crate::types::BooleanLike;

use super::{ConditionTables, ExecutableState, WithConditionSubqueries, push_clause};
#[cfg(any(feature = "postgres", feature = "sqlite"))]
use super::{Returning, ReturningList};
#[cfg(any(feature = "postgres", feature = "sqlite"))]
use crate::query::ResolveRow;

//------------------------------------------------------------------------------
// Type State Markers
//------------------------------------------------------------------------------

/// Marker for the initial state of DeleteBuilder.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteInitial;

/// Marker for the state after USING clause
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteUsingSet;

/// Marker for the state after WHERE clause (or `unconditionally()`)
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteWhereSet;

/// Marker for the state after RETURNING clause
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteReturningSet;

impl ExecutableState for DeleteWhereSet {}
impl ExecutableState for DeleteReturningSet {}

/// States that accept `where_` and `unconditionally`.
#[doc(hidden)]
pub trait DeleteFilterable {}

impl DeleteFilterable for DeleteInitial {}
impl DeleteFilterable for DeleteUsingSet {}

//------------------------------------------------------------------------------
// DeleteBuilder
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct DeleteClauses {
    table: SQL,
    using: SQL,
    where_: SQL,
    returning: SQL,
}

impl DeleteClauses {
    fn into_sql(self) -> SQL {
        let mut sql = SQL::token(Token::DELETE_FROM).append(self.table);
        push_clause(&mut sql, Token::USING, self.using);
        push_clause(&mut sql, Token::WHERE, self.where_);
        push_clause(&mut sql, Token::RETURNING, self.returning);
        sql
    }
}

/// A DELETE statement under construction.
///
/// - `T`: the target table
/// - `State`: typestate marker
/// - `P`: tables in scope, the target plus USING
/// - `C`: CTEs referenced by USING
/// - `Ret`: resolved RETURNING list
/// - `Subs`: subqueries embedded in USING and WHERE
pub struct DeleteBuilder<T, State, P = Cons<T, Nil>, C = Nil, Ret = Nil, Subs = Nil> {
    clauses: DeleteClauses,
    _state: PhantomData<fn() -> (T, State, P, C, Ret, Subs)>,
}

/// Starts a DELETE statement.
///
/// ```
/// use sqlweave_core::builder::delete_from;
/// use sqlweave_core::expr::ExprExt;
/// use sqlweave_core::table;
/// use sqlweave_core::types::Int;
///
/// table! { struct Session("session") { id: Int, age: Int } }
///
/// let s = Session::default();
/// let query = delete_from(s).where_(s.age.gt(30)).build();
/// assert_eq!(query.to_string(), r#"DELETE FROM "session" WHERE "session"."age" > ?"#);
/// ```
///
/// ```compile_fail,E0599
/// use sqlweave_core::builder::delete_from;
/// use sqlweave_core::table;
/// use sqlweave_core::types::Int;
///
/// table! { struct Session("session") { id: Int } }
///
/// // calling where() or unconditionally() required
/// let _ = delete_from(Session::default()).build();
/// ```
pub fn delete_from<T: Table>(_table: T) -> DeleteBuilder<T, DeleteInitial> {
    DeleteBuilder {
        clauses: DeleteClauses {
            table: table_target::<T>(),
            using: SQL::empty(),
            where_: SQL::empty(),
            returning: SQL::empty(),
        },
        _state: PhantomData,
    }
}

impl<T, State, P, C, Ret, Subs> DeleteBuilder<T, State, P, C, Ret, Subs> {
    fn advance<S2, P2, C2, R2, Sb2>(self) -> DeleteBuilder<T, S2, P2, C2, R2, Sb2> {
        DeleteBuilder {
            clauses: self.clauses,
            _state: PhantomData,
        }
    }
}

impl<T: Table + FromItem> DeleteBuilder<T, DeleteInitial> {
    /// `USING from_item` (PostgreSQL). Its tables join the scope of WHERE
    /// and RETURNING.
    ///
    /// The USING items must not repeat the target table.
    pub fn using<F: FromItem>(
        self,
        from: F,
    ) -> DeleteBuilder<
        T,
        DeleteUsingSet,
        <Cons<T, Nil> as TableList>::Append<F::Provided>,
        F::Ctes,
        Nil,
        F::Subqueries,
    > {
        assert_disjoint::<T, F>();
        let mut next = self.advance();
        next.clauses.using = from.from_sql();
        next
    }
}

impl<T, State, P, C, Subs> DeleteBuilder<T, State, P, C, Nil, Subs>
where
    State: DeleteFilterable,
    P: TableList,
    Subs: SubqueryList,
{
    /// Adds a WHERE clause. The condition may read the target and USING.
    pub fn where_<Cond, Is>(
        self,
        condition: Cond,
    ) -> DeleteBuilder<T, DeleteWhereSet, P, C, Nil, WithConditionSubqueries<Cond, Subs>>
    where
        Cond: Condition,
        <Cond::Expr as Expr>::SQLType: BooleanLike,
        <Cond::Expr as Expr>::Aggregate: NonAggregate,
        ConditionTables<Cond>: SubsetOf<P, Is>,
    {
        let mut next = self.advance();
        next.clauses.where_ = condition.condition_sql();
        next
    }

    /// Explicitly deletes every row.
    pub fn unconditionally(self) -> DeleteBuilder<T, DeleteWhereSet, P, C, Nil, Subs> {
        self.advance()
    }
}

#[cfg(any(feature = "postgres", feature = "sqlite"))]
impl<T, P, C, Subs> DeleteBuilder<T, DeleteWhereSet, P, C, Nil, Subs>
where
    P: TableList,
{
    /// `RETURNING columns` of the deleted rows.
    pub fn returning<L, Is, Rs>(
        self,
        columns: L,
    ) -> DeleteBuilder<T, DeleteReturningSet, P, C, Returning<L, P, Rs>, Subs>
    where
        L: ReturningList<P, Is, Rs>,
        L::Items: ResolveRow<P, Rs>,
    {
        let mut next = self.advance();
        next.clauses.returning = columns.returning_sql();
        next
    }
}

impl<T, State, P, C, Ret, Subs> DeleteBuilder<T, State, P, C, Ret, Subs>
where
    State: ExecutableState,
    P: TableList,
    C: TypeSet,
    Subs: SubqueryList,
{
    /// Finishes the statement.
    pub fn build<Js>(self) -> Query<Ret, Concat<C, Subs::Ctes>, Modification>
    where
        Subs: ResolvesIn<P, Js>,
    {
        Query::new(self.clauses.into_sql())
    }
}

impl<T, State, P, C, Ret, Subs> ToSQL for DeleteBuilder<T, State, P, C, Ret, Subs> {
    fn to_sql(&self) -> SQL {
        self.clauses.clone().into_sql()
    }

    fn into_sql(self) -> SQL {
        self.clauses.into_sql()
    }
}

impl<T, State, P, C, Ret, Subs> Clone for DeleteBuilder<T, State, P, C, Ret, Subs> {
    fn clone(&self) -> Self {
        Self {
            clauses: self.clauses.clone(),
            _state: PhantomData,
        }
    }
}

impl<T, State, P, C, Ret, Subs> fmt::Debug for DeleteBuilder<T, State, P, C, Ret, Subs> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteBuilder")
            .field("sql", &self.to_sql().sql())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{ExprExt, exists};
    use crate::builder::select;
    use crate::table;
    use crate::types::{Dialect, Int};

    table! {
        struct Author("author") {
            id: Int,
            banned: Int,
        }
    }

    table! {
        struct Book("book") {
            id: Int,
            author_id: Int,
        }
    }

    #[test]
    fn using_brings_tables_into_scope() {
        let (a, b) = (Author::default(), Book::default());
        let query = delete_from(b)
            .using(a)
            .where_(b.author_id.eq(a.id) & a.banned.eq(1))
            .build();
        assert_eq!(
            query.render(Dialect::PostgreSQL).unwrap().sql,
            r#"DELETE FROM "book" USING "author" WHERE "book"."author_id" = "author"."id" AND "author"."banned" = $1"#
        );
        assert!(query.render(Dialect::SQLite).is_err());
    }

    #[test]
    fn correlated_subquery_sees_the_target() {
        let (a, b) = (Author::default(), Book::default());
        let banned = select(a.id).from(a).where_(a.id.eq(b.author_id) & a.banned.eq(1));
        let query = delete_from(b).where_(exists(banned)).build();
        assert_eq!(
            query.to_string(),
            r#"DELETE FROM "book" WHERE EXISTS (SELECT "author"."id" FROM "author" WHERE "author"."id" = "book"."author_id" AND "author"."banned" = ?)"#
        );
    }
}
