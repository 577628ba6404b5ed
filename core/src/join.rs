//! Joins.
//!
//! A join is itself a [`FromItem`]. Its provided set is the two sides'
//! sets, with the nullable side of an outer join wrapped in [`Outer`] so
//! that every column read through it resolves as nullable.
//!
//! [`Outer`]: crate::traits::Outer

use core::fmt;
use core::marker::PhantomData;

use crate::expr::{Expr, NonAggregate, SubqueryList, argument};
use crate::from::FromItem;
use crate::sql::{SQL, Token};
use crate::traits::{Concat, Nil, SubsetOf, TableList, ToSQL};
use crate::types::BooleanLike;

// =============================================================================
// Join kinds
// =============================================================================

/// How a join combines the provided sets of its sides.
pub trait JoinKind {
    type Provided<L: TableList, R: TableList>: TableList;
}

/// `JOIN` / `INNER JOIN`
#[derive(Debug, Clone, Copy, Default)]
pub struct Inner;

/// `LEFT [OUTER] JOIN`: the right side becomes nullable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Left;

/// `RIGHT [OUTER] JOIN`: the left side becomes nullable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Right;

/// `FULL [OUTER] JOIN`: both sides become nullable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Full;

/// `CROSS JOIN`
#[derive(Debug, Clone, Copy, Default)]
pub struct Cross;

impl JoinKind for Inner {
    type Provided<L: TableList, R: TableList> = L::Append<R>;
}

impl JoinKind for Left {
    type Provided<L: TableList, R: TableList> = L::Append<R::Outer>;
}

impl JoinKind for Right {
    type Provided<L: TableList, R: TableList> = <L::Outer as TableList>::Append<R>;
}

impl JoinKind for Full {
    type Provided<L: TableList, R: TableList> = <L::Outer as TableList>::Append<R::Outer>;
}

impl JoinKind for Cross {
    type Provided<L: TableList, R: TableList> = L::Append<R>;
}

/// Provided set of a join of `L` and `R`.
pub type JoinProvided<K, L, R> =
    <K as JoinKind>::Provided<<L as FromItem>::Provided, <R as FromItem>::Provided>;

const fn disjoint<L: FromItem, R: FromItem>() -> bool {
    <L::Provided as TableList>::NAMES.is_disjoint(&<R::Provided as TableList>::NAMES)
}

/// Fails to compile when `L` and `R` provide a table of the same name.
pub(crate) fn assert_disjoint<L: FromItem, R: FromItem>() {
    const { assert!(disjoint::<L, R>(), "duplicate table names detected in join") };
}

// =============================================================================
// Joins
// =============================================================================

/// A join still waiting for its `ON` condition.
pub struct PendingJoin<L, R, K> {
    sql: SQL,
    _sides: PhantomData<fn() -> (L, R, K)>,
}

impl<L: FromItem, R: FromItem, K: JoinKind> PendingJoin<L, R, K> {
    fn new(left: L, right: R, token: Token) -> Self {
        assert_disjoint::<L, R>();
        Self {
            sql: join_sql(left, right, token),
            _sides: PhantomData,
        }
    }

    /// Completes the join.
    ///
    /// The condition may only read tables provided by this join.
    ///
    /// ```compile_fail,E0277
    /// use sqlweave_core::expr::eq;
    /// use sqlweave_core::join::JoinExt;
    /// use sqlweave_core::table;
    /// use sqlweave_core::types::Int;
    ///
    /// table! { struct A("a") { id: Int } }
    /// table! { struct B("b") { id: Int } }
    /// table! { struct C("c") { id: Int } }
    ///
    /// // `c` is not part of this join
    /// let _ = A::default().join(B::default()).on(eq(A::default().id, C::default().id));
    /// ```
    pub fn on<C, Is>(self, condition: C) -> Join<L, R, K, C::Subqueries>
    where
        C: Expr,
        C::SQLType: BooleanLike,
        C::Aggregate: NonAggregate,
        C::Tables: SubsetOf<JoinProvided<K, L, R>, Is>,
    {
        Join::new(self.sql.push(Token::ON).append(argument(condition)))
    }
}

fn join_sql<L: FromItem, R: FromItem>(left: L, right: R, token: Token) -> SQL {
    let right = if R::JOIN {
        right.from_sql().parens()
    } else {
        right.from_sql()
    };
    left.from_sql().push(token).append(right)
}

/// A complete join.
///
/// - `K`: the [`JoinKind`]
/// - `Sq`: subqueries embedded in the `ON` condition
pub struct Join<L, R, K, Sq = Nil> {
    sql: SQL,
    _sides: PhantomData<fn() -> (L, R, K, Sq)>,
}

impl<L, R, K, Sq> Join<L, R, K, Sq> {
    fn new(sql: SQL) -> Self {
        Self {
            sql,
            _sides: PhantomData,
        }
    }
}

impl<L, R, K, Sq> FromItem for Join<L, R, K, Sq>
where
    L: FromItem,
    R: FromItem,
    K: JoinKind,
    Sq: SubqueryList,
{
    type Provided = JoinProvided<K, L, R>;
    type Ctes = Concat<L::Ctes, R::Ctes>;
    type Subqueries =
        <<L::Subqueries as SubqueryList>::Append<R::Subqueries> as SubqueryList>::Append<Sq>;

    const JOIN: bool = true;

    fn from_sql(self) -> SQL {
        self.sql
    }
}

impl<L, R, K, Sq> ToSQL for Join<L, R, K, Sq> {
    fn to_sql(&self) -> SQL {
        self.sql.clone()
    }

    fn into_sql(self) -> SQL {
        self.sql
    }
}

impl<L, R, K, Sq> Clone for Join<L, R, K, Sq> {
    fn clone(&self) -> Self {
        Self::new(self.sql.clone())
    }
}

impl<L, R, K, Sq> fmt::Debug for Join<L, R, K, Sq> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Join").field(&self.sql.sql()).finish()
    }
}

// =============================================================================
// Method syntax
// =============================================================================

/// Join methods for every [`FromItem`].
///
/// ```
/// use sqlweave_core::expr::eq;
/// use sqlweave_core::join::JoinExt;
/// use sqlweave_core::table;
/// use sqlweave_core::from::FromItem;
/// use sqlweave_core::types::Int;
///
/// table! { struct A("a") { id: Int } }
/// table! { struct B("b") { a_id: Int } }
///
/// let (a, b) = (A::default(), B::default());
/// let from = a.left_join(b).on(eq(a.id, b.a_id));
/// assert_eq!(from.from_sql().sql(), r#""a" LEFT JOIN "b" ON "a"."id" = "b"."a_id""#);
/// ```
pub trait JoinExt: FromItem + Sized {
    /// `self JOIN right`
    fn join<R: FromItem>(self, right: R) -> PendingJoin<Self, R, Inner> {
        PendingJoin::new(self, right, Token::JOIN)
    }

    /// `self INNER JOIN right`
    fn inner_join<R: FromItem>(self, right: R) -> PendingJoin<Self, R, Inner> {
        PendingJoin::new(self, right, Token::INNER_JOIN)
    }

    /// `self LEFT JOIN right`
    fn left_join<R: FromItem>(self, right: R) -> PendingJoin<Self, R, Left> {
        PendingJoin::new(self, right, Token::LEFT_JOIN)
    }

    /// `self LEFT OUTER JOIN right`
    fn left_outer_join<R: FromItem>(self, right: R) -> PendingJoin<Self, R, Left> {
        PendingJoin::new(self, right, Token::LEFT_OUTER_JOIN)
    }

    /// `self RIGHT JOIN right`
    fn right_join<R: FromItem>(self, right: R) -> PendingJoin<Self, R, Right> {
        PendingJoin::new(self, right, Token::RIGHT_JOIN)
    }

    /// `self RIGHT OUTER JOIN right`
    fn right_outer_join<R: FromItem>(self, right: R) -> PendingJoin<Self, R, Right> {
        PendingJoin::new(self, right, Token::RIGHT_OUTER_JOIN)
    }

    /// `self FULL JOIN right`. Not available on MySQL.
    fn full_join<R: FromItem>(self, right: R) -> PendingJoin<Self, R, Full> {
        PendingJoin::new(self, right, Token::FULL_JOIN)
    }

    /// `self FULL OUTER JOIN right`. Not available on MySQL.
    fn full_outer_join<R: FromItem>(self, right: R) -> PendingJoin<Self, R, Full> {
        PendingJoin::new(self, right, Token::FULL_OUTER_JOIN)
    }

    /// `self CROSS JOIN right`
    ///
    /// Listing the same table on both sides fails to compile; alias one side.
    fn cross_join<R: FromItem>(self, right: R) -> Join<Self, R, Cross> {
        assert_disjoint::<Self, R>();
        Join::new(join_sql(self, right, Token::CROSS_JOIN))
    }
}

impl<F: FromItem> JoinExt for F {}
