use core::fmt;
use core::marker::PhantomData;

use crate::expr::{Condition, Expr, NonAggregate, ResolvesIn, SubqueryList};
use crate::query::{Modification, Query};
use crate::schema::table_target;
use crate::sql::{SQL, Token};
use crate::traits::{Cons, Nil, SubsetOf, Table, ToSQL};
use crate::types::BooleanLike;

use super::{
    AssignList, Assignments, ConditionTables, ExecutableState, WithConditionSubqueries,
    assert_unique_columns, push_clause, set_list_sql,
};
#[cfg(any(feature = "postgres", feature = "sqlite"))]
use super::{Returning, ReturningList};
#[cfg(any(feature = "postgres", feature = "sqlite"))]
use crate::query::ResolveRow;

//------------------------------------------------------------------------------
// Type State Markers
//------------------------------------------------------------------------------

/// Marker for the initial state of UpdateBuilder.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateInitial;

/// Marker for the state after SET clause
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateSetClauseSet;

/// Marker for the state after WHERE clause (or `unconditionally()`)
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateWhereSet;

/// Marker for the state after RETURNING clause
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateReturningSet;

impl ExecutableState for UpdateWhereSet {}
impl ExecutableState for UpdateReturningSet {}

//------------------------------------------------------------------------------
// UpdateBuilder
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct UpdateClauses {
    table: SQL,
    set: SQL,
    where_: SQL,
    returning: SQL,
}

impl UpdateClauses {
    fn into_sql(self) -> SQL {
        let mut sql = SQL::token(Token::UPDATE).append(self.table);
        push_clause(&mut sql, Token::SET, self.set);
        push_clause(&mut sql, Token::WHERE, self.where_);
        push_clause(&mut sql, Token::RETURNING, self.returning);
        sql
    }
}

/// An UPDATE statement under construction.
///
/// - `T`: the target table
/// - `State`: typestate marker
/// - `Ret`: resolved RETURNING list
/// - `Subs`: subqueries embedded in SET values and WHERE
///
/// ```compile_fail,E0277
/// use sqlweave_core::builder::update;
/// use sqlweave_core::schema::ColumnExt;
/// use sqlweave_core::table;
/// use sqlweave_core::types::Int;
///
/// table! { struct A("a") { n: Int } }
/// table! { struct B("b") { n: Int } }
///
/// // values may only read the updated table
/// let _ = update(A::default()).set(A::default().n.assign(B::default().n));
/// ```
pub struct UpdateBuilder<T, State, Ret = Nil, Subs = Nil> {
    clauses: UpdateClauses,
    _state: PhantomData<fn() -> (T, State, Ret, Subs)>,
}

/// Starts an UPDATE statement.
///
/// ```
/// use sqlweave_core::builder::update;
/// use sqlweave_core::expr::ExprExt;
/// use sqlweave_core::schema::ColumnExt;
/// use sqlweave_core::table;
/// use sqlweave_core::types::Int;
///
/// table! { struct Counter("counter") { id: Int, hits: Int } }
///
/// let c = Counter::default();
/// let query = update(c).set(c.hits.assign(c.hits + 1)).where_(c.id.eq(3)).build();
/// assert_eq!(
///     query.to_string(),
///     r#"UPDATE "counter" SET "hits" = "counter"."hits" + ? WHERE "counter"."id" = ?"#
/// );
/// ```
pub fn update<T: Table>(_table: T) -> UpdateBuilder<T, UpdateInitial> {
    UpdateBuilder {
        clauses: UpdateClauses {
            table: table_target::<T>(),
            set: SQL::empty(),
            where_: SQL::empty(),
            returning: SQL::empty(),
        },
        _state: PhantomData,
    }
}

impl<T, State, Ret, Subs> UpdateBuilder<T, State, Ret, Subs> {
    fn advance<S2, R2, Sb2>(self) -> UpdateBuilder<T, S2, R2, Sb2> {
        UpdateBuilder {
            clauses: self.clauses,
            _state: PhantomData,
        }
    }
}

impl<T: Table> UpdateBuilder<T, UpdateInitial> {
    /// Sets the SET clause.
    ///
    /// At least one assignment must be non-dynamic, so the clause is never
    /// empty. Values may read the target table.
    pub fn set<A, Is>(
        self,
        assignments: A,
    ) -> UpdateBuilder<T, UpdateSetClauseSet, Nil, <A::Items as AssignList<T>>::Subqueries>
    where
        A: Assignments<T>,
        <A::Items as AssignList<T>>::Tables: SubsetOf<Cons<T, Nil>, Is>,
    {
        const {
            assert_unique_columns(<A::Items as AssignList<T>>::NAMES);
            assert!(
                !<A::Items as AssignList<T>>::STATIC_NAMES.is_empty(),
                "update requires at least one non-dynamic assignment"
            );
        };
        let mut next = self.advance();
        next.clauses.set = set_list_sql(assignments.parts());
        next
    }
}

impl<T, Subs> UpdateBuilder<T, UpdateSetClauseSet, Nil, Subs>
where
    T: Table,
    Subs: SubqueryList,
{
    /// Adds a WHERE clause. The condition may only read the target table.
    pub fn where_<C, Is>(
        self,
        condition: C,
    ) -> UpdateBuilder<T, UpdateWhereSet, Nil, WithConditionSubqueries<C, Subs>>
    where
        C: Condition,
        <C::Expr as Expr>::SQLType: BooleanLike,
        <C::Expr as Expr>::Aggregate: NonAggregate,
        ConditionTables<C>: SubsetOf<Cons<T, Nil>, Is>,
    {
        let mut next = self.advance();
        next.clauses.where_ = condition.condition_sql();
        next
    }

    /// Explicitly updates every row.
    pub fn unconditionally(self) -> UpdateBuilder<T, UpdateWhereSet, Nil, Subs> {
        self.advance()
    }
}

#[cfg(any(feature = "postgres", feature = "sqlite"))]
impl<T, Subs> UpdateBuilder<T, UpdateWhereSet, Nil, Subs>
where
    T: Table,
{
    /// `RETURNING columns` of the updated rows.
    pub fn returning<L, Is, Rs>(
        self,
        columns: L,
    ) -> UpdateBuilder<T, UpdateReturningSet, Returning<L, Cons<T, Nil>, Rs>, Subs>
    where
        L: ReturningList<Cons<T, Nil>, Is, Rs>,
        L::Items: ResolveRow<Cons<T, Nil>, Rs>,
    {
        let mut next = self.advance();
        next.clauses.returning = columns.returning_sql();
        next
    }
}

impl<T, State, Ret, Subs> UpdateBuilder<T, State, Ret, Subs>
where
    T: Table,
    State: ExecutableState,
    Subs: SubqueryList,
{
    /// Finishes the statement. Subqueries may correlate with the target
    /// table.
    pub fn build<Js>(self) -> Query<Ret, Subs::Ctes, Modification>
    where
        Subs: ResolvesIn<Cons<T, Nil>, Js>,
    {
        Query::new(self.clauses.into_sql())
    }
}

impl<T, State, Ret, Subs> ToSQL for UpdateBuilder<T, State, Ret, Subs> {
    fn to_sql(&self) -> SQL {
        self.clauses.clone().into_sql()
    }

    fn into_sql(self) -> SQL {
        self.clauses.into_sql()
    }
}

impl<T, State, Ret, Subs> Clone for UpdateBuilder<T, State, Ret, Subs> {
    fn clone(&self) -> Self {
        Self {
            clauses: self.clauses.clone(),
            _state: PhantomData,
        }
    }
}

impl<T, State, Ret, Subs> fmt::Debug for UpdateBuilder<T, State, Ret, Subs> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateBuilder")
            .field("sql", &self.to_sql().sql())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::dynamic;
    use crate::schema::ColumnExt;
    use crate::table;
    use crate::traits::Nullable;
    use crate::types::{Dialect, Int, Text};

    table! {
        struct Profile("profile") {
            id: Int [primary_key],
            name: Text,
            bio: Nullable<Text>,
        }
    }

    #[test]
    fn dynamic_assignments_are_left_out() {
        let p = Profile::default();
        let query = update(p)
            .set((p.name.assign("n"), dynamic(false, p.bio.assign(None::<&str>))))
            .unconditionally()
            .build();
        assert_eq!(
            query.render(Dialect::SQLite).unwrap().sql,
            r#"UPDATE "profile" SET "name" = ?"#
        );
    }

    #[cfg(any(feature = "postgres", feature = "sqlite"))]
    #[test]
    fn returning_updated_rows() {
        let p = Profile::default();
        let query = update(p)
            .set(p.bio.assign(Some("hi")))
            .where_(crate::expr::eq(p.id, 1))
            .returning((p.id, p.bio))
            .build();
        let rendered = query.render(Dialect::PostgreSQL).unwrap();
        assert_eq!(
            rendered.sql,
            r#"UPDATE "profile" SET "bio" = $1 WHERE "profile"."id" = $2 RETURNING "profile"."id", "profile"."bio""#
        );
        let row = vec![crate::value::Value::Integer(1), crate::value::Value::Null];
        let (id, bio) = query.decode(&row).unwrap();
        assert_eq!((id, bio), (1, None));
    }
}
