//! Set membership over value lists (IN, NOT IN).
//!
//! Membership in a subquery lives in [`subquery`](super::subquery).

use crate::sql::{SQL, Token};
use crate::types::Compatible;

use super::{Comparison, Expr, Shape, argument, operand};

/// Result of `in_`/`not_in`.
pub type InList<E, V> = Comparison<E, V>;

fn membership<E, I, V>(expr: E, values: I, negated: bool) -> InList<E, V>
where
    E: Expr,
    I: IntoIterator<Item = V>,
    V: Expr,
{
    let list = SQL::join(values.into_iter().map(argument), Token::COMMA);

    // An empty list is decided without the column: nothing is IN (), and
    // everything is NOT IN ().
    if list.is_empty() {
        let sql = SQL::token(if negated { Token::TRUE } else { Token::FALSE });
        return InList::<E, V>::new(sql);
    }

    let mut sql = operand(expr, Shape::Compare);
    if negated {
        sql.push_mut(Token::NOT);
    }
    let sql = sql.push(Token::IN).append(list.parens());
    InList::<E, V>::with_shape(sql, Shape::Compare)
}

// =============================================================================
// IN / NOT IN
// =============================================================================

/// IN list check.
///
/// Returns true if the expression's value is in the provided values. Requires
/// the expression type to be compatible with the element type. An empty list
/// renders `FALSE`.
///
/// ```
/// use sqlweave_core::expr::in_;
/// use sqlweave_core::ToSQL;
///
/// assert_eq!(in_(1, [1, 2, 3]).to_sql().sql(), "? IN (?, ?, ?)");
/// assert_eq!(in_(1, Vec::<i32>::new()).to_sql().sql(), "FALSE");
/// ```
pub fn in_<E, I, V>(expr: E, values: I) -> InList<E, V>
where
    E: Expr,
    I: IntoIterator<Item = V>,
    V: Expr,
    E::SQLType: Compatible<V::SQLType>,
{
    membership(expr, values, false)
}

/// NOT IN list check.
///
/// An empty list renders `TRUE`.
pub fn not_in<E, I, V>(expr: E, values: I) -> InList<E, V>
where
    E: Expr,
    I: IntoIterator<Item = V>,
    V: Expr,
    E::SQLType: Compatible<V::SQLType>,
{
    membership(expr, values, true)
}
