//! Type-safe comparison functions.
//!
//! These functions enforce type compatibility at compile time using the
//! `Expr` trait and `Compatible` constraint. Comparing incompatible types
//! (e.g., `eq(int_column, "text")`) will fail at compile time.
//!
//! # Type Safety
//!
//! - `eq`, `neq`, `gt`, `gte`, `lt`, `lte`: Require compatible types
//! - `like`, `not_like`: Require textual types on both sides
//! - `between`, `not_between`: Require the expression to be compatible with both bounds
//!
//! A comparison is NULL when either side is, so the result is nullable
//! whenever an operand is.

use crate::sql::Token;
use crate::types::{Bool, Compatible, Textual};

use super::{Binary, Expr, NullOf2, NullOr, Shape, Ternary, binary_op, operand};

/// Result of a two-operand comparison.
pub type Comparison<L, R> = Binary<Bool, NullOf2<L, R>, L, R>;

/// Result of `between`.
pub type Between<E, Lo, Hi> = Ternary<
    Bool,
    NullOr<<E as Expr>::Nullable, NullOf2<Lo, Hi>>,
    E,
    Lo,
    Hi,
>;

fn compare<L: Expr, R: Expr>(left: L, op: Token, right: R) -> Comparison<L, R> {
    Comparison::<L, R>::with_shape(binary_op(left, op, right, Shape::Compare), Shape::Compare)
}

// =============================================================================
// Equality Comparisons
// =============================================================================

/// Equality comparison (`=`).
///
/// Requires both operands to have compatible SQL types.
///
/// ```
/// use sqlweave_core::expr::eq;
/// use sqlweave_core::ToSQL;
///
/// assert_eq!(eq(1, 2i64).to_sql().sql(), "? = ?");
/// ```
///
/// ```compile_fail,E0277
/// use sqlweave_core::expr::eq;
///
/// // Int cannot be compared with Text
/// let _ = eq(1, "hello");
/// ```
pub fn eq<L, R>(left: L, right: R) -> Comparison<L, R>
where
    L: Expr,
    R: Expr,
    L::SQLType: Compatible<R::SQLType>,
{
    compare(left, Token::EQ, right)
}

/// Inequality comparison (`<>`).
///
/// Requires both operands to have compatible SQL types.
pub fn neq<L, R>(left: L, right: R) -> Comparison<L, R>
where
    L: Expr,
    R: Expr,
    L::SQLType: Compatible<R::SQLType>,
{
    compare(left, Token::NE, right)
}

// =============================================================================
// Ordering Comparisons
// =============================================================================

/// Greater-than comparison (`>`).
///
/// Requires both operands to have compatible SQL types.
pub fn gt<L, R>(left: L, right: R) -> Comparison<L, R>
where
    L: Expr,
    R: Expr,
    L::SQLType: Compatible<R::SQLType>,
{
    compare(left, Token::GT, right)
}

/// Greater-than-or-equal comparison (`>=`).
pub fn gte<L, R>(left: L, right: R) -> Comparison<L, R>
where
    L: Expr,
    R: Expr,
    L::SQLType: Compatible<R::SQLType>,
{
    compare(left, Token::GE, right)
}

/// Less-than comparison (`<`).
pub fn lt<L, R>(left: L, right: R) -> Comparison<L, R>
where
    L: Expr,
    R: Expr,
    L::SQLType: Compatible<R::SQLType>,
{
    compare(left, Token::LT, right)
}

/// Less-than-or-equal comparison (`<=`).
pub fn lte<L, R>(left: L, right: R) -> Comparison<L, R>
where
    L: Expr,
    R: Expr,
    L::SQLType: Compatible<R::SQLType>,
{
    compare(left, Token::LE, right)
}

// =============================================================================
// Pattern Matching
// =============================================================================

/// LIKE pattern matching.
///
/// Requires both operands to be textual types (TEXT, VARCHAR).
///
/// ```compile_fail,E0277
/// use sqlweave_core::expr::like;
///
/// // Int is not Textual
/// let _ = like(123, "%1%");
/// ```
pub fn like<L, R>(left: L, pattern: R) -> Comparison<L, R>
where
    L: Expr,
    R: Expr,
    L::SQLType: Textual,
    R::SQLType: Textual,
{
    compare(left, Token::LIKE, pattern)
}

/// NOT LIKE pattern matching.
pub fn not_like<L, R>(left: L, pattern: R) -> Comparison<L, R>
where
    L: Expr,
    R: Expr,
    L::SQLType: Textual,
    R::SQLType: Textual,
{
    let sql = operand(left, Shape::Compare)
        .push(Token::NOT)
        .push(Token::LIKE)
        .append(operand(pattern, Shape::Compare));
    Comparison::<L, R>::with_shape(sql, Shape::Compare)
}

// =============================================================================
// Range
// =============================================================================

fn range<E: Expr, Lo: Expr, Hi: Expr>(expr: E, negated: bool, low: Lo, high: Hi) -> Between<E, Lo, Hi> {
    let mut sql = operand(expr, Shape::Compare);
    if negated {
        sql.push_mut(Token::NOT);
    }
    let sql = sql
        .push(Token::BETWEEN)
        .append(operand(low, Shape::Compare))
        .push(Token::AND)
        .append(operand(high, Shape::Compare));
    Between::<E, Lo, Hi>::with_shape(sql, Shape::Compare)
}

/// BETWEEN comparison.
///
/// Requires the expression to be compatible with both bounds.
pub fn between<E, Lo, Hi>(expr: E, low: Lo, high: Hi) -> Between<E, Lo, Hi>
where
    E: Expr,
    Lo: Expr,
    Hi: Expr,
    E::SQLType: Compatible<Lo::SQLType> + Compatible<Hi::SQLType>,
{
    range(expr, false, low, high)
}

/// NOT BETWEEN comparison.
pub fn not_between<E, Lo, Hi>(expr: E, low: Lo, high: Hi) -> Between<E, Lo, Hi>
where
    E: Expr,
    Lo: Expr,
    Hi: Expr,
    E::SQLType: Compatible<Lo::SQLType> + Compatible<Hi::SQLType>,
{
    range(expr, true, low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::SQLExpr;
    use crate::sql::SQL;
    use crate::traits::ToSQL;
    use crate::types::{Int, Text};

    #[test]
    fn comparisons_render_operators() {
        let a = || SQLExpr::<Int>::new(SQL::ident("a"));
        assert_eq!(neq(a(), 1).to_sql().sql(), r#""a" <> ?"#);
        assert_eq!(lte(a(), a() + 1).to_sql().sql(), r#""a" <= ("a" + ?)"#);
        assert_eq!(between(a(), 1, 10).to_sql().sql(), r#""a" BETWEEN ? AND ?"#);
        assert_eq!(not_between(a(), 1, 10).to_sql().sql(), r#""a" NOT BETWEEN ? AND ?"#);
    }

    #[test]
    fn like_is_textual() {
        let name = SQLExpr::<Text>::new(SQL::ident("name"));
        assert_eq!(not_like(name, "%x%").to_sql().sql(), r#""name" NOT LIKE ?"#);
    }
}
