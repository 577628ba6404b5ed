//! Type-level lists used as sets of tables, columns and CTEs.
//!
//! Membership is proven by an inferred index (`Here`, `There<I>`) instead of
//! by type inequality, so every check here is an ordinary trait bound that
//! the caller never spells out.

use core::marker::PhantomData;

use crate::expr::{NonNull, Null, Nullability};

/// Empty type-level set/list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nil;

/// Non-empty type-level set/list node.
pub struct Cons<Head, Tail>(PhantomData<(Head, Tail)>);

/// Marker trait for type-level sets/lists.
pub trait TypeSet {
    /// Type-level concatenation.
    type Concat<Rhs: TypeSet>: TypeSet;
    /// Every element wrapped in [`Shielded`].
    type Shielded: TypeSet;

    const LEN: usize;
}

impl TypeSet for Nil {
    type Concat<Rhs: TypeSet> = Rhs;
    type Shielded = Nil;

    const LEN: usize = 0;
}

impl<Head, Tail> TypeSet for Cons<Head, Tail>
where
    Tail: TypeSet,
{
    type Concat<Rhs: TypeSet> = Cons<Head, Tail::Concat<Rhs>>;
    type Shielded = Cons<Shielded<Head>, Tail::Shielded>;

    const LEN: usize = 1 + Tail::LEN;
}

/// `L ++ R`
pub type Concat<L, R> = <L as TypeSet>::Concat<R>;

/// Wraps a table that is only reachable through the nullable side of an
/// outer join. Every column read through it becomes nullable.
pub struct Outer<T>(PhantomData<T>);

/// Index: the element is the head of the list.
pub struct Here;

/// Index: the element is the head of the list, wrapped in [`Outer`].
pub struct HereOuter;

/// A table read by an expression that stays non-NULL when the table is
/// outer-joined, such as the operand of `IS NULL` or the first argument of
/// `COALESCE`. It must still be in scope.
pub struct Shielded<T>(PhantomData<T>);

/// Index: the element is a [`Shielded`] table found at the head, wrapped in
/// [`Outer`] or not.
pub struct HereShielded<I>(PhantomData<I>);

/// Index: the element is somewhere in the tail.
pub struct There<I>(PhantomData<I>);

/// Proof that `T` is an element of `Self`.
///
/// `Nullable` reports whether `T` was found behind an outer join.
#[diagnostic::on_unimplemented(
    message = "`{T}` is not available in this statement",
    label = "required here but not provided",
    note = "tables must be listed in FROM or joined; in GROUP BY statements, bare columns must appear in group_by()"
)]
pub trait Contains<T, Index> {
    type Nullable: Nullability;
}

impl<T, Tail> Contains<T, Here> for Cons<T, Tail> {
    type Nullable = NonNull;
}

impl<T, Tail> Contains<T, HereOuter> for Cons<Outer<T>, Tail> {
    type Nullable = Null;
}

impl<T, Head, Tail, I> Contains<Shielded<T>, HereShielded<I>> for Cons<Head, Tail>
where
    Cons<Head, Nil>: Contains<T, I>,
{
    type Nullable = NonNull;
}

impl<T, Head, Tail, I> Contains<T, There<I>> for Cons<Head, Tail>
where
    Tail: Contains<T, I>,
{
    type Nullable = <Tail as Contains<T, I>>::Nullable;
}

/// Every element of `Self` is contained in `Super`.
///
/// `Nullable` is `Null` if any element was found behind an outer join.
///
/// ```
/// use sqlweave_core::{Cons, Nil, SubsetOf};
///
/// struct A;
/// struct B;
/// fn subset<S: SubsetOf<Super, Is>, Super, Is>() {}
/// subset::<Cons<B, Nil>, Cons<A, Cons<B, Nil>>, _>();
/// ```
///
/// ```compile_fail,E0277
/// use sqlweave_core::{Cons, Nil, SubsetOf};
///
/// struct A;
/// struct B;
/// fn subset<S: SubsetOf<Super, Is>, Super, Is>() {}
/// subset::<Cons<B, Nil>, Cons<A, Nil>, _>();
/// ```
pub trait SubsetOf<Super, Indices> {
    type Nullable: Nullability;
}

impl<Super> SubsetOf<Super, Nil> for Nil {
    type Nullable = NonNull;
}

impl<Head, Tail, Super, I, Is> SubsetOf<Super, Cons<I, Is>> for Cons<Head, Tail>
where
    Super: Contains<Head, I>,
    Tail: SubsetOf<Super, Is>,
{
    type Nullable = <<Super as Contains<Head, I>>::Nullable as Nullability>::Or<
        <Tail as SubsetOf<Super, Is>>::Nullable,
    >;
}

/// Removes one occurrence of `T` from `Self`.
#[diagnostic::on_unimplemented(
    message = "`{T}` does not occur in `{Self}`",
    label = "a recursive part must reference the common table expression it extends"
)]
pub trait Pluck<T, Index> {
    type Rest: TypeSet;
}

impl<T, Tail: TypeSet> Pluck<T, Here> for Cons<T, Tail> {
    type Rest = Tail;
}

impl<T, Head, Tail, I> Pluck<T, There<I>> for Cons<Head, Tail>
where
    Tail: Pluck<T, I>,
{
    type Rest = Cons<Head, <Tail as Pluck<T, I>>::Rest>;
}

/// Builds a `Cons` list type from a list of types.
#[macro_export]
#[doc(hidden)]
macro_rules! __type_list {
    () => { $crate::Nil };
    ($head:ty $(, $tail:ty)* $(,)?) => {
        $crate::Cons<$head, $crate::__type_list!($($tail),*)>
    };
}
