//! Type-safe string functions.
//!
//! These functions require `Textual` types (Text, VarChar) and provide
//! compile-time enforcement of string operations.
//!
//! # Type Safety
//!
//! - `upper`, `lower`, `trim`: Require `Textual` types, keep the input type
//! - `length`: Returns BigInt from `Textual` input
//! - `concat`: Takes a tuple of `Textual` expressions, returns Text

use crate::sql::{SQL, Token};
use crate::traits::{ColumnSet, Concat};
use crate::types::{BigInt, Text, Textual};

use super::{AggOr, Expr, NonNull, NullOr, SQLExpr, Scalar, SubqueryList, Unary, argument};

/// Result of a text function applied to `E`.
pub type TextFn<E> = Unary<<E as Expr>::SQLType, <E as Expr>::Nullable, E>;

// =============================================================================
// CASE CONVERSION
// =============================================================================

/// UPPER - converts string to uppercase.
///
/// Preserves the nullability of the input expression.
///
/// ```compile_fail,E0277
/// use sqlweave_core::expr::upper;
///
/// // Int is not Textual
/// let _ = upper(1);
/// ```
pub fn upper<E>(expr: E) -> TextFn<E>
where
    E: Expr,
    E::SQLType: Textual,
{
    TextFn::<E>::new(SQL::func("UPPER", expr.into_sql()))
}

/// LOWER - converts string to lowercase.
///
/// Preserves the nullability of the input expression.
pub fn lower<E>(expr: E) -> TextFn<E>
where
    E: Expr,
    E::SQLType: Textual,
{
    TextFn::<E>::new(SQL::func("LOWER", expr.into_sql()))
}

// =============================================================================
// TRIM
// =============================================================================

/// TRIM - removes leading and trailing whitespace.
pub fn trim<E>(expr: E) -> TextFn<E>
where
    E: Expr,
    E::SQLType: Textual,
{
    TextFn::<E>::new(SQL::func("TRIM", expr.into_sql()))
}

// =============================================================================
// LENGTH
// =============================================================================

/// LENGTH - returns the length of a string.
///
/// Returns BigInt type, preserves nullability.
pub fn length<E>(expr: E) -> Unary<BigInt, E::Nullable, E>
where
    E: Expr,
    E::SQLType: Textual,
{
    Unary::<BigInt, E::Nullable, E>::new(SQL::func("LENGTH", expr.into_sql()))
}

// =============================================================================
// CONCAT
// =============================================================================

/// A tuple of textual expressions accepted by [`concat`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be concatenated",
    label = "expected a tuple of at least two text expressions"
)]
pub trait ConcatArgs {
    type Nullable: super::Nullability;
    type Aggregate: super::AggregateKind;
    type Tables: crate::traits::TypeSet;
    type Ungrouped: ColumnSet;
    type Subqueries: SubqueryList;

    fn concat_sql(self) -> SQL;
}

macro_rules! fold_nullable {
    () => { NonNull };
    ($T:ident $(, $rest:ident)*) => { NullOr<<$T as Expr>::Nullable, fold_nullable!($($rest),*)> };
}

macro_rules! fold_aggregate {
    () => { Scalar };
    ($T:ident $(, $rest:ident)*) => { AggOr<<$T as Expr>::Aggregate, fold_aggregate!($($rest),*)> };
}

macro_rules! fold_tables {
    () => { crate::Nil };
    ($T:ident $(, $rest:ident)*) => { Concat<<$T as Expr>::Tables, fold_tables!($($rest),*)> };
}

macro_rules! fold_ungrouped {
    () => { crate::Nil };
    ($T:ident $(, $rest:ident)*) => {
        <<$T as Expr>::Ungrouped as ColumnSet>::Union<fold_ungrouped!($($rest),*)>
    };
}

macro_rules! fold_subqueries {
    () => { crate::Nil };
    ($T:ident $(, $rest:ident)*) => {
        <<$T as Expr>::Subqueries as SubqueryList>::Append<fold_subqueries!($($rest),*)>
    };
}

macro_rules! impl_concat_args {
    ($T0:ident; $i0:tt) => {};
    ($($T:ident),+; $($idx:tt),+) => {
        impl<$($T),+> ConcatArgs for ($($T,)+)
        where
            $($T: Expr, <$T as Expr>::SQLType: Textual,)+
        {
            type Nullable = fold_nullable!($($T),+);
            type Aggregate = fold_aggregate!($($T),+);
            type Tables = fold_tables!($($T),+);
            type Ungrouped = fold_ungrouped!($($T),+);
            type Subqueries = fold_subqueries!($($T),+);

            fn concat_sql(self) -> SQL {
                SQL::join([$(argument(self.$idx)),+], Token::COMMA)
            }
        }
    };
}

crate::traits::with_tuple_sizes!(impl_concat_args);

/// Result of `concat`.
pub type Concatenated<A> = SQLExpr<
    Text,
    <A as ConcatArgs>::Nullable,
    <A as ConcatArgs>::Aggregate,
    <A as ConcatArgs>::Tables,
    <A as ConcatArgs>::Ungrouped,
    <A as ConcatArgs>::Subqueries,
>;

/// CONCAT - joins text expressions.
///
/// NULL if any argument is.
///
/// ```
/// use sqlweave_core::expr::concat;
/// use sqlweave_core::ToSQL;
///
/// assert_eq!(concat(("a", "b", "c")).to_sql().sql(), "CONCAT(?, ?, ?)");
/// ```
///
/// ```compile_fail,E0277
/// use sqlweave_core::expr::concat;
///
/// let _ = concat(("a", 1));
/// ```
pub fn concat<A: ConcatArgs>(args: A) -> Concatenated<A> {
    Concatenated::<A>::new(SQL::func("CONCAT", args.concat_sql()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Null, SQLExpr};
    use crate::traits::ToSQL;
    use crate::types::VarChar;

    #[test]
    fn text_functions() {
        let name = || SQLExpr::<VarChar, Null>::new(SQL::ident("name"));
        assert_eq!(upper(name()).to_sql().sql(), r#"UPPER("name")"#);
        assert_eq!(trim(lower(name())).to_sql().sql(), r#"TRIM(LOWER("name"))"#);
        let len: SQLExpr<BigInt, Null> = length(name());
        assert_eq!(len.to_sql().sql(), r#"LENGTH("name")"#);
    }

    #[test]
    fn concat_nullability_follows_arguments() {
        let name = SQLExpr::<VarChar, Null>::new(SQL::ident("name"));
        let joined: SQLExpr<Text, Null> = concat(("Dr. ", name));
        assert_eq!(joined.to_sql().sql(), r#"CONCAT(?, "name")"#);
    }
}
