//! Resolution of select lists into result rows.
//!
//! Once FROM is known, every select item is resolved to its tag, its SQL
//! type and its final nullability. The resolved list fixes the Rust row
//! type of a query, and it is what CTEs and derived tables expose as
//! fields.

use core::fmt;
use core::marker::PhantomData;

use crate::builder::{ItemList, SelectItem};
use crate::expr::{Expr, NonNull, NullOr, NullVia, Nullability, Scalar};
use crate::names::NameSet;
use crate::row::SQLTypeToRust;
use crate::sql::SQL;
use crate::traits::{
    Cons, Here, Name, Nil, ScopeTable, ScopedColumn, SubsetOf, There, ToSQL, TypeSet,
    with_tuple_sizes,
};
use crate::types::DataType;

/// One resolved result column: tag, SQL type and nullability.
pub struct Resolved<Tag, T, N>(PhantomData<fn() -> (Tag, T, N)>);

/// A `Cons` list of [`Resolved`] columns.
pub trait ResolvedList: TypeSet + 'static {
    /// Rust value types, as a `Cons` list.
    type Values;
    /// SQL types, as a `Cons` list.
    type Columns;

    /// Result column names, in order.
    const NAMES: NameSet;
}

impl ResolvedList for Nil {
    type Values = Nil;
    type Columns = Nil;

    const NAMES: NameSet = NameSet::EMPTY;
}

impl<Tag, T, N, Rest> ResolvedList for Cons<Resolved<Tag, T, N>, Rest>
where
    Tag: Name,
    T: SQLTypeToRust,
    N: Nullability,
    Rest: ResolvedList,
{
    type Values = Cons<N::Wrap<T::Rust>, Rest::Values>;
    type Columns = Cons<T, Rest::Columns>;

    const NAMES: NameSet = NameSet::EMPTY.with(Tag::NAME).union(Rest::NAMES);
}

/// Nullability of select item `I` in a statement providing `P`.
///
/// NULL if the expression is, if the item is dynamic, or if a table it
/// reads sits on the nullable side of an outer join.
pub type ItemNullable<I, P, Ix> = NullOr<
    NullOr<<<I as SelectItem>::Expr as Expr>::Nullable, <I as SelectItem>::Dynamic>,
    <NullVia<<I as SelectItem>::Expr> as SubsetOf<P, Ix>>::Nullable,
>;

/// Resolves a select list against the provided set `P`.
pub trait ResolveRow<P, Indices>: ItemList {
    type Resolved: ResolvedList;
}

impl<P> ResolveRow<P, Nil> for Nil {
    type Resolved = Nil;
}

impl<I, Rest, P, Ix, Rs> ResolveRow<P, Cons<Ix, Rs>> for Cons<I, Rest>
where
    I: SelectItem,
    Rest: ResolveRow<P, Rs>,
    NullVia<I::Expr>: SubsetOf<P, Ix>,
    <I::Expr as Expr>::SQLType: SQLTypeToRust,
{
    type Resolved = Cons<
        Resolved<I::Tag, <I::Expr as Expr>::SQLType, ItemNullable<I, P, Ix>>,
        Rest::Resolved,
    >;
}

/// The resolved list of `Items` in a statement providing `P`.
pub type Resolve<Items, P, Rs> = <Items as ResolveRow<P, Rs>>::Resolved;

/// Finds the resolved column tagged `Tag`.
#[diagnostic::on_unimplemented(
    message = "no column `{Tag}` in `{Self}`",
    label = "unknown field",
    note = "fields of a CTE or derived table are the tags of its select list"
)]
pub trait FindItem<Tag, Index> {
    type Found;
}

impl<Tag, T, N, Rest> FindItem<Tag, Here> for Cons<Resolved<Tag, T, N>, Rest> {
    type Found = Resolved<Tag, T, N>;
}

impl<Tag, Head, Rest, I> FindItem<Tag, There<I>> for Cons<Head, Rest>
where
    Rest: FindItem<Tag, I>,
{
    type Found = Rest::Found;
}

// =============================================================================
// Rows
// =============================================================================

/// Converts a `Cons` list of types into the matching tuple.
pub trait IntoTuple {
    type Tuple;
}

impl IntoTuple for Nil {
    type Tuple = ();
}

macro_rules! impl_into_tuple {
    ($($T:ident),+; $($idx:tt),+) => {
        impl<$($T),+> IntoTuple for crate::__type_list!($($T),+) {
            type Tuple = ($($T,)+);
        }
    };
}

with_tuple_sizes!(impl_into_tuple);

/// Rust row type of a resolved list.
pub type RowOf<Res> = <<Res as ResolvedList>::Values as IntoTuple>::Tuple;

// =============================================================================
// Fields of CTEs and derived tables
// =============================================================================

/// A column of a CTE or derived table `S`, resolved as `R`.
pub struct Field<S, R>(PhantomData<fn() -> (S, R)>);

impl<S, R> Field<S, R> {
    pub(crate) fn new() -> Self {
        Field(PhantomData)
    }
}

impl<S, R> Clone for Field<S, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, R> Copy for Field<S, R> {}

impl<S, R> Default for Field<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ScopeTable, Tag: Name, T, N> fmt::Debug for Field<S, Resolved<Tag, T, N>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field({}.{})", S::SCOPE_NAME, Tag::NAME)
    }
}

impl<S: ScopeTable, Tag: Name, T, N> ToSQL for Field<S, Resolved<Tag, T, N>> {
    fn to_sql(&self) -> SQL {
        SQL::qualified(S::SCOPE_NAME, Tag::NAME)
    }
}

impl<S, Tag, T, N> Expr for Field<S, Resolved<Tag, T, N>>
where
    S: ScopeTable,
    Tag: Name,
    T: DataType,
    N: Nullability,
{
    type SQLType = T;
    type Nullable = N;
    type Aggregate = Scalar;
    type Tables = Cons<S, Nil>;
    type Ungrouped = Cons<Self, Nil>;
    type Subqueries = Nil;
}

impl<S, Tag, T, N> ScopedColumn for Field<S, Resolved<Tag, T, N>>
where
    S: ScopeTable,
    Tag: Name,
    T: DataType,
    N: Nullability,
{
    type Scope = S;
}

impl<S, Tag, T, N> SelectItem for Field<S, Resolved<Tag, T, N>>
where
    S: ScopeTable,
    Tag: Name,
    T: DataType,
    N: Nullability,
{
    type Tag = Tag;
    type Expr = Self;
    type Dynamic = NonNull;

    fn item_sql(self) -> SQL {
        self.into_sql()
    }
}

crate::__expr_ops!([S, Tag, T, N] Field<S, Resolved<Tag, T, N>>);
