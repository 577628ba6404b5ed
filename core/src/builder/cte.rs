//! Common table expressions.
//!
//! `cte(Name).as_(query)` defines a CTE. Selecting from it (through
//! [`Cte::table`]) or reading its fields records a [`CteRef`] in the
//! statement's CTE requirements, and [`with`] is the only way to discharge
//! them:
//!
//! ```
//! use sqlweave_core::builder::{cte, select, with};
//! use sqlweave_core::expr::{ExprExt, value};
//! use sqlweave_core::name_tag;
//! use sqlweave_core::types::Dialect;
//!
//! name_tag!(struct N = "n"; struct Nums = "nums";);
//!
//! let nums = cte(Nums).as_(select(value(1).as_(N)).build());
//! let query = select(nums.col(N))
//!     .from(nums.table())
//!     .unconditionally()
//!     .build();
//! let query = with(nums).query(query);
//! assert_eq!(
//!     query.render(Dialect::SQLite).unwrap().sql,
//!     r#"WITH "nums" AS (SELECT ? AS "n") SELECT "nums"."n" FROM "nums""#
//! );
//! ```

use core::fmt;
use core::marker::PhantomData;

use crate::from::FromItem;
use crate::names::NameSet;
use crate::query::{
    Compound, Field, FindItem, Query, ResolvedList, RowStatement, Select, StatementKind, UnionHead,
    UnionOperand,
};
use crate::sql::{SQL, Token};
use crate::traits::{
    Concat, Cons, Name, Nil, Outer, Pluck, ScopeTable, SubsetOf, ToSQL, TypeSet, with_tuple_sizes,
};

// =============================================================================
// Definition
// =============================================================================

/// First step of a CTE definition, see [`cte`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CteBuilder<N>(PhantomData<N>);

/// Starts the definition of a CTE named `N`.
pub fn cte<N: Name>(_name: N) -> CteBuilder<N> {
    CteBuilder(PhantomData)
}

impl<N: Name> CteBuilder<N> {
    /// `"name" AS (query)`. The CTE's fields are the query's result columns.
    pub fn as_<Res, C, K>(self, query: Query<Res, C, K>) -> Cte<N, Res, C, K>
    where
        Res: ResolvedList,
        C: TypeSet,
        K: RowStatement,
    {
        Cte {
            sql: query.into_sql(),
            recursive: false,
            _def: PhantomData,
        }
    }
}

/// A defined CTE.
///
/// - `N`: its name tag
/// - `Res`: resolved columns of the defining query
/// - `C`: CTEs the definition itself references
/// - `K`: statement kind of the definition
pub struct Cte<N, Res, C = Nil, K = Select> {
    sql: SQL,
    recursive: bool,
    _def: PhantomData<fn() -> (N, Res, C, K)>,
}

impl<N, Res, C, K> Cte<N, Res, C, K>
where
    N: Name,
    Res: ResolvedList,
    C: TypeSet,
{
    /// The CTE as a FROM item.
    pub fn table(&self) -> CteRef<N, Res> {
        CteRef(PhantomData)
    }

    /// The field selected as `tag` by the defining query.
    pub fn col<Tag, I>(&self, tag: Tag) -> Field<CteRef<N, Res>, Res::Found>
    where
        Tag: Name,
        Res: FindItem<Tag, I>,
    {
        self.table().col(tag)
    }

    /// Makes the CTE recursive: `base UNION ALL step`.
    ///
    /// `step` has to read the CTE itself and produce the same row type.
    ///
    /// ```compile_fail,E0277
    /// use sqlweave_core::builder::{cte, select};
    /// use sqlweave_core::expr::{ExprExt, value};
    /// use sqlweave_core::name_tag;
    ///
    /// name_tag!(struct N = "n"; struct Nums = "nums";);
    ///
    /// let nums = cte(Nums).as_(select(value(1).as_(N)).build());
    /// // the step never reads `nums`
    /// let _ = nums.union_all(select(value(2).as_(N)).build());
    /// ```
    pub fn union_all<Res2, C2, K2, I>(
        self,
        step: Query<Res2, C2, K2>,
    ) -> Cte<N, Res, RecursiveCtes<N, Res, C, C2, I>, Compound>
    where
        K: UnionHead,
        Res2: ResolvedList<Values = Res::Values>,
        C2: Pluck<CteRef<N, Res>, I>,
        K2: UnionOperand,
    {
        self.recurse(Token::UNION_ALL, step)
    }

    /// Makes the CTE recursive with duplicate elimination: `base UNION step`.
    pub fn union_distinct<Res2, C2, K2, I>(
        self,
        step: Query<Res2, C2, K2>,
    ) -> Cte<N, Res, RecursiveCtes<N, Res, C, C2, I>, Compound>
    where
        K: UnionHead,
        Res2: ResolvedList<Values = Res::Values>,
        C2: Pluck<CteRef<N, Res>, I>,
        K2: UnionOperand,
    {
        self.recurse(Token::UNION_DISTINCT, step)
    }

    fn recurse<Res2, C2, C3, K2>(self, token: Token, step: Query<Res2, C2, K2>) -> Cte<N, Res, C3, Compound> {
        Cte {
            sql: self.sql.push(token).append(step.into_sql()),
            recursive: true,
            _def: PhantomData,
        }
    }
}

/// CTE requirements of a recursive CTE: the base's plus the step's, minus
/// the CTE itself.
pub type RecursiveCtes<N, Res, C, C2, I> =
    Concat<C, <C2 as Pluck<CteRef<N, Res>, I>>::Rest>;

impl<N, Res, C, K> Clone for Cte<N, Res, C, K> {
    fn clone(&self) -> Self {
        Self {
            sql: self.sql.clone(),
            recursive: self.recursive,
            _def: PhantomData,
        }
    }
}

impl<N: Name, Res, C, K> fmt::Debug for Cte<N, Res, C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cte")
            .field("name", &N::NAME)
            .field("recursive", &self.recursive)
            .field("sql", &self.sql.sql())
            .finish()
    }
}

// =============================================================================
// References
// =============================================================================

/// A CTE in a FROM clause: both a scope table and a CTE requirement.
pub struct CteRef<N, Res>(PhantomData<fn() -> (N, Res)>);

impl<N: Name, Res: ResolvedList> CteRef<N, Res> {
    /// The field selected as `tag` by the defining query.
    pub fn col<Tag, I>(&self, _tag: Tag) -> Field<Self, Res::Found>
    where
        Tag: Name,
        Res: FindItem<Tag, I>,
    {
        Field::new()
    }
}

impl<N, Res> Clone for CteRef<N, Res> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, Res> Copy for CteRef<N, Res> {}

impl<N, Res> Default for CteRef<N, Res> {
    fn default() -> Self {
        CteRef(PhantomData)
    }
}

impl<N: Name, Res> fmt::Debug for CteRef<N, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CteRef({})", N::NAME)
    }
}

impl<N: Name, Res: ResolvedList> ScopeTable for CteRef<N, Res> {
    const SCOPE_NAME: &'static str = N::NAME;

    type Outer = Outer<Self>;
}

impl<N: Name, Res: ResolvedList> FromItem for CteRef<N, Res> {
    type Provided = Cons<Self, Nil>;
    type Ctes = Cons<Self, Nil>;
    type Subqueries = Nil;

    fn from_sql(self) -> SQL {
        SQL::ident(N::NAME)
    }
}

impl<N: Name, Res> ToSQL for CteRef<N, Res> {
    fn to_sql(&self) -> SQL {
        SQL::ident(N::NAME)
    }
}

// =============================================================================
// WITH
// =============================================================================

/// One CTE as an element of a WITH clause.
pub trait CteDef {
    /// The reference that statements record when they use the CTE.
    type Ref;
    /// CTEs the definition references.
    type Requires: TypeSet;

    const NAME: &'static str;

    fn is_recursive(&self) -> bool;

    /// `"name" AS (query)`
    fn definition_sql(self) -> SQL;
}

impl<N, Res, C, K> CteDef for Cte<N, Res, C, K>
where
    N: Name,
    Res: ResolvedList,
    C: TypeSet,
{
    type Ref = CteRef<N, Res>;
    type Requires = C;

    const NAME: &'static str = N::NAME;

    fn is_recursive(&self) -> bool {
        self.recursive
    }

    fn definition_sql(self) -> SQL {
        SQL::ident(N::NAME).push(Token::AS).append(self.sql.parens())
    }
}

/// Every CTE of `Self` only references CTEs declared before it.
///
/// `Prev` accumulates the references declared so far; `Declared` is the
/// full set once the list is walked.
#[diagnostic::on_unimplemented(
    message = "a common table expression references one that is not declared before it",
    label = "declaration order not satisfied",
    note = "list CTEs in with() so that each one only uses CTEs to its left"
)]
pub trait DeclaredInOrder<Prev, Indices> {
    type Declared: TypeSet;
}

impl<Prev: TypeSet> DeclaredInOrder<Prev, Nil> for Nil {
    type Declared = Prev;
}

impl<D, Rest, Prev, I, Is> DeclaredInOrder<Prev, Cons<I, Is>> for Cons<D, Rest>
where
    D: CteDef,
    Prev: TypeSet,
    D::Requires: SubsetOf<Prev, I>,
    Rest: DeclaredInOrder<Concat<Prev, Cons<D::Ref, Nil>>, Is>,
{
    type Declared = Rest::Declared;
}

/// The argument of [`with`]: one CTE or a tuple of them.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a list of common table expressions",
    label = "expected `cte(Name).as_(query)` or a tuple of them"
)]
pub trait CteList {
    /// The definitions as a `Cons` list, in declaration order.
    type Defs;

    const NAMES: NameSet;

    /// Rendered definitions and whether any of them is recursive.
    fn definitions(self) -> (Vec<SQL>, bool);
}

impl<D: CteDef> CteList for D {
    type Defs = Cons<D, Nil>;

    const NAMES: NameSet = NameSet::EMPTY.with(D::NAME);

    fn definitions(self) -> (Vec<SQL>, bool) {
        let recursive = self.is_recursive();
        (vec![self.definition_sql()], recursive)
    }
}

macro_rules! impl_cte_list {
    ($($T:ident),+; $($idx:tt),+) => {
        impl<$($T: CteDef),+> CteList for ($($T,)+) {
            type Defs = crate::__type_list!($($T),+);

            const NAMES: NameSet = NameSet::EMPTY $(.with($T::NAME))+;

            fn definitions(self) -> (Vec<SQL>, bool) {
                let recursive = false $(|| self.$idx.is_recursive())+;
                (vec![$(self.$idx.definition_sql()),+], recursive)
            }
        }
    };
}

with_tuple_sizes!(impl_cte_list);

/// A WITH clause whose CTEs `Declared` may be used by the attached query.
pub struct With<Declared> {
    sql: SQL,
    _declared: PhantomData<fn() -> Declared>,
}

/// Starts a WITH clause.
///
/// CTE names must be unique and each CTE may only use CTEs listed before it.
///
/// ```compile_fail,E0277
/// use sqlweave_core::builder::{cte, select, with};
/// use sqlweave_core::expr::{ExprExt, value};
/// use sqlweave_core::name_tag;
///
/// name_tag!(struct N = "n"; struct First = "first"; struct Second = "second";);
///
/// let first = cte(First).as_(select(value(1).as_(N)).build());
/// let second = cte(Second).as_(
///     select(first.col(N)).from(first.table()).unconditionally().build(),
/// );
/// // `second` reads `first`, so `first` has to come first
/// let _ = with((second, first));
/// ```
pub fn with<L, Is>(ctes: L) -> With<<L::Defs as DeclaredInOrder<Nil, Is>>::Declared>
where
    L: CteList,
    L::Defs: DeclaredInOrder<Nil, Is>,
{
    const {
        assert!(
            L::NAMES.first_duplicate().is_none(),
            "duplicate common table expression names"
        )
    };
    let (definitions, recursive) = ctes.definitions();
    let mut sql = SQL::token(Token::WITH);
    if recursive {
        sql.push_mut(Token::RECURSIVE);
    }
    With {
        sql: sql.append(SQL::join(definitions, Token::COMMA)),
        _declared: PhantomData,
    }
}

impl<Declared> With<Declared> {
    /// Prefixes `query` with the WITH clause. Every CTE the query uses must
    /// be declared here; the result needs no further CTEs.
    ///
    /// A prefixed SELECT can still start a UNION but no longer follow one.
    pub fn query<Res, C, K, Is>(self, query: Query<Res, C, K>) -> Query<Res, Nil, K::WithPrefixed>
    where
        C: SubsetOf<Declared, Is>,
        K: StatementKind,
    {
        let (sql, bindings) = query.into_parts();
        Query::with_bindings(self.sql.append(sql), bindings)
    }
}

impl<Declared> Clone for With<Declared> {
    fn clone(&self) -> Self {
        Self {
            sql: self.sql.clone(),
            _declared: PhantomData,
        }
    }
}

impl<Declared> fmt::Debug for With<Declared> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("With").field("sql", &self.sql.sql()).finish()
    }
}
