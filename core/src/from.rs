//! FROM items.
//!
//! A FROM item renders itself and describes, as types, the scope tables it
//! brings into the statement, the CTEs it needs and the subqueries its join
//! conditions embed.

use core::fmt;
use core::marker::PhantomData;

use crate::expr::SubqueryList;
use crate::query::{Field, FindItem, ResolvedList};
use crate::sql::SQL;
use crate::traits::{Cons, Name, Nil, Outer, ScopeTable, TableList, ToSQL, TypeSet};

/// Anything that can follow FROM (or USING).
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used in FROM",
    label = "expected a table, an aliased table, a CTE, a derived table or a join"
)]
pub trait FromItem {
    /// Scope tables brought into the statement.
    type Provided: TableList;
    /// CTEs referenced.
    type Ctes: TypeSet;
    /// Subqueries embedded in join conditions.
    type Subqueries: SubqueryList;

    /// Joins render unparenthesized and need parentheses on the right of
    /// another join.
    const JOIN: bool = false;

    fn from_sql(self) -> SQL;
}

/// The FROM item of a select without FROM clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFrom;

impl FromItem for NoFrom {
    type Provided = Nil;
    type Ctes = Nil;
    type Subqueries = Nil;

    fn from_sql(self) -> SQL {
        SQL::empty()
    }
}

// =============================================================================
// Derived tables
// =============================================================================

/// A built query used as a FROM item: `(SELECT ...) AS "n"`.
///
/// ```
/// use sqlweave_core::builder::select;
/// use sqlweave_core::expr::{ExprExt, value};
/// use sqlweave_core::name_tag;
///
/// name_tag!(struct Answer = "answer"; struct Sub = "sub";);
///
/// let sub = select(value(42).as_(Answer)).build().as_(Sub);
/// let query = select(sub.col(Answer)).from(sub).unconditionally().build();
/// assert_eq!(
///     query.to_string(),
///     r#"SELECT "sub"."answer" FROM (SELECT ? AS "answer") AS "sub""#
/// );
/// ```
pub struct DerivedTable<N, Res, C = Nil> {
    sql: SQL,
    _query: PhantomData<fn() -> (N, Res, C)>,
}

/// Scope table of a derived table named `N` with resolved columns `Res`.
pub struct DerivedRef<N, Res>(PhantomData<fn() -> (N, Res)>);

impl<N: Name, Res: ResolvedList> ScopeTable for DerivedRef<N, Res> {
    const SCOPE_NAME: &'static str = N::NAME;

    type Outer = Outer<Self>;
}

impl<N, Res, C> DerivedTable<N, Res, C> {
    pub(crate) fn new(sql: SQL) -> Self {
        Self {
            sql,
            _query: PhantomData,
        }
    }
}

impl<N: Name, Res: ResolvedList, C> DerivedTable<N, Res, C> {
    /// The column of the derived table selected as `tag`.
    pub fn col<Tag, I>(&self, _tag: Tag) -> Field<DerivedRef<N, Res>, Res::Found>
    where
        Tag: Name,
        Res: FindItem<Tag, I>,
    {
        Field::new()
    }
}

impl<N, Res, C> FromItem for DerivedTable<N, Res, C>
where
    N: Name,
    Res: ResolvedList,
    C: TypeSet,
{
    type Provided = Cons<DerivedRef<N, Res>, Nil>;
    type Ctes = C;
    type Subqueries = Nil;

    fn from_sql(self) -> SQL {
        self.sql.parens().alias(N::NAME)
    }
}

impl<N: Name, Res, C> ToSQL for DerivedTable<N, Res, C> {
    fn to_sql(&self) -> SQL {
        self.sql.clone().parens().alias(N::NAME)
    }
}

impl<N, Res, C> Clone for DerivedTable<N, Res, C> {
    fn clone(&self) -> Self {
        Self::new(self.sql.clone())
    }
}

impl<N: Name, Res, C> fmt::Debug for DerivedTable<N, Res, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedTable")
            .field("name", &N::NAME)
            .field("sql", &self.sql.sql())
            .finish()
    }
}
