//! Method syntax for expressions.

use crate::builder::{Aliased, Sort};
use crate::traits::Name;
use crate::types::{ArithmeticOutput, Compatible, Integral, Textual};

use super::{
    Arith, Between, ColumnOf, Comparison, DistinctTest, Expr, InList, InQuery, NullTest, Shifted,
    Signed, SingleColumn, SubqueryStatement,
};

/// Extension trait providing method-based operators for every [`Expr`].
///
/// ```
/// use sqlweave_core::expr::ExprExt;
/// use sqlweave_core::ToSQL;
///
/// assert_eq!(5i32.gt(3).to_sql().sql(), "? > ?");
/// assert_eq!("x".like("%").to_sql().sql(), "? LIKE ?");
/// assert_eq!(1i32.is_distinct_from(None::<i32>).to_sql().sql(), "? IS DISTINCT FROM NULL");
/// ```
pub trait ExprExt: Expr + Sized {
    /// `self = rhs`
    fn eq<R>(self, rhs: R) -> Comparison<Self, R>
    where
        R: Expr,
        Self::SQLType: Compatible<R::SQLType>,
    {
        super::eq(self, rhs)
    }

    /// `self <> rhs`
    fn neq<R>(self, rhs: R) -> Comparison<Self, R>
    where
        R: Expr,
        Self::SQLType: Compatible<R::SQLType>,
    {
        super::neq(self, rhs)
    }

    /// `self < rhs`
    fn lt<R>(self, rhs: R) -> Comparison<Self, R>
    where
        R: Expr,
        Self::SQLType: Compatible<R::SQLType>,
    {
        super::lt(self, rhs)
    }

    /// `self <= rhs`
    fn lte<R>(self, rhs: R) -> Comparison<Self, R>
    where
        R: Expr,
        Self::SQLType: Compatible<R::SQLType>,
    {
        super::lte(self, rhs)
    }

    /// `self > rhs`
    fn gt<R>(self, rhs: R) -> Comparison<Self, R>
    where
        R: Expr,
        Self::SQLType: Compatible<R::SQLType>,
    {
        super::gt(self, rhs)
    }

    /// `self >= rhs`
    fn gte<R>(self, rhs: R) -> Comparison<Self, R>
    where
        R: Expr,
        Self::SQLType: Compatible<R::SQLType>,
    {
        super::gte(self, rhs)
    }

    /// `self IS NULL`
    fn is_null(self) -> NullTest<Self> {
        super::is_null(self)
    }

    /// `self IS NOT NULL`
    fn is_not_null(self) -> NullTest<Self> {
        super::is_not_null(self)
    }

    /// `self IS DISTINCT FROM rhs`
    fn is_distinct_from<R>(self, rhs: R) -> DistinctTest<Self, R>
    where
        R: Expr,
        Self::SQLType: Compatible<R::SQLType>,
    {
        super::is_distinct_from(self, rhs)
    }

    /// `self IS NOT DISTINCT FROM rhs`
    fn is_not_distinct_from<R>(self, rhs: R) -> DistinctTest<Self, R>
    where
        R: Expr,
        Self::SQLType: Compatible<R::SQLType>,
    {
        super::is_not_distinct_from(self, rhs)
    }

    /// `self IN (values...)`
    fn in_<I, V>(self, values: I) -> InList<Self, V>
    where
        I: IntoIterator<Item = V>,
        V: Expr,
        Self::SQLType: Compatible<V::SQLType>,
    {
        super::in_(self, values)
    }

    /// `self NOT IN (values...)`
    fn not_in<I, V>(self, values: I) -> InList<Self, V>
    where
        I: IntoIterator<Item = V>,
        V: Expr,
        Self::SQLType: Compatible<V::SQLType>,
    {
        super::not_in(self, values)
    }

    /// `self IN (subquery)`
    fn in_query<S>(self, subquery: S) -> InQuery<Self, S>
    where
        S: SubqueryStatement,
        S::Columns: SingleColumn,
        Self::SQLType: Compatible<ColumnOf<S>>,
    {
        super::in_query(self, subquery)
    }

    /// `self NOT IN (subquery)`
    fn not_in_query<S>(self, subquery: S) -> InQuery<Self, S>
    where
        S: SubqueryStatement,
        S::Columns: SingleColumn,
        Self::SQLType: Compatible<ColumnOf<S>>,
    {
        super::not_in_query(self, subquery)
    }

    /// `self BETWEEN low AND high`
    fn between<Lo, Hi>(self, low: Lo, high: Hi) -> Between<Self, Lo, Hi>
    where
        Lo: Expr,
        Hi: Expr,
        Self::SQLType: Compatible<Lo::SQLType> + Compatible<Hi::SQLType>,
    {
        super::between(self, low, high)
    }

    /// `self NOT BETWEEN low AND high`
    fn not_between<Lo, Hi>(self, low: Lo, high: Hi) -> Between<Self, Lo, Hi>
    where
        Lo: Expr,
        Hi: Expr,
        Self::SQLType: Compatible<Lo::SQLType> + Compatible<Hi::SQLType>,
    {
        super::not_between(self, low, high)
    }

    /// `self LIKE pattern`
    fn like<R>(self, pattern: R) -> Comparison<Self, R>
    where
        R: Expr,
        Self::SQLType: Textual,
        R::SQLType: Textual,
    {
        super::like(self, pattern)
    }

    /// `self NOT LIKE pattern`
    fn not_like<R>(self, pattern: R) -> Comparison<Self, R>
    where
        R: Expr,
        Self::SQLType: Textual,
        R::SQLType: Textual,
    {
        super::not_like(self, pattern)
    }

    /// `self & rhs`
    fn bit_and<R>(self, rhs: R) -> Arith<Self, R>
    where
        R: Expr,
        R::SQLType: Integral,
        Self::SQLType: Integral + ArithmeticOutput<R::SQLType>,
    {
        super::bit_and(self, rhs)
    }

    /// `self | rhs`
    fn bit_or<R>(self, rhs: R) -> Arith<Self, R>
    where
        R: Expr,
        R::SQLType: Integral,
        Self::SQLType: Integral + ArithmeticOutput<R::SQLType>,
    {
        super::bit_or(self, rhs)
    }

    /// Bitwise XOR of `self` and `rhs`.
    fn bit_xor<R>(self, rhs: R) -> Arith<Self, R>
    where
        R: Expr,
        R::SQLType: Integral,
        Self::SQLType: Integral + ArithmeticOutput<R::SQLType>,
    {
        super::bit_xor(self, rhs)
    }

    /// `~self`
    fn bit_not(self) -> Signed<Self>
    where
        Self::SQLType: Integral,
    {
        super::bit_not(self)
    }

    /// `self << bits`
    fn shl<R>(self, bits: R) -> Shifted<Self, R>
    where
        R: Expr,
        Self::SQLType: Integral,
        R::SQLType: Integral,
    {
        super::shl(self, bits)
    }

    /// `self >> bits`
    fn shr<R>(self, bits: R) -> Shifted<Self, R>
    where
        R: Expr,
        Self::SQLType: Integral,
        R::SQLType: Integral,
    {
        super::shr(self, bits)
    }

    /// Names the expression for a select list: `self AS "name"`.
    fn as_<N: Name>(self, name: N) -> Aliased<Self, N> {
        Aliased::new(self, name)
    }

    /// Ascending sort item.
    fn asc(self) -> Sort<Self> {
        Sort::asc(self)
    }

    /// Descending sort item.
    fn desc(self) -> Sort<Self> {
        Sort::desc(self)
    }
}

impl<E: Expr> ExprExt for E {}
