//! Logical operators (AND, OR, NOT).
//!
//! This module provides both function-based and operator-based logical operations:
//!
//! ```ignore
//! // Function style
//! and(condition1, condition2)
//! or(condition1, condition2)
//! not(condition)
//!
//! // Operator style (via std::ops traits)
//! condition1 & condition2   // BitAnd
//! condition1 | condition2   // BitOr
//! !condition                // Not
//! ```
//!
//! Operands of `and`/`or` may be [`dynamic`](crate::dynamic::dynamic): a
//! disabled operand is left out of the rendered chain. With both operands
//! disabled the chain is its identity, `TRUE` for AND and `FALSE` for OR.

use crate::dynamic::Dynamic;
use crate::sql::{SQL, Token};
use crate::traits::ToSQL;
use crate::types::{Bool, BooleanLike};

use super::{Binary, Expr, NullOf2, Shape, Unary, operand};

// =============================================================================
// Condition
// =============================================================================

/// A boolean operand that may be switched off at runtime.
///
/// Every [`Expr`] is a condition; so is [`Dynamic`] wrapping one.
pub trait Condition {
    /// The typed expression the condition stands for.
    type Expr: Expr;

    /// Rendered condition, or empty SQL when disabled.
    fn condition_sql(self) -> SQL;

    fn condition_shape(&self) -> Shape;
}

impl<E: Expr> Condition for E {
    type Expr = E;

    fn condition_sql(self) -> SQL {
        self.into_sql()
    }

    fn condition_shape(&self) -> Shape {
        self.shape()
    }
}

impl<E: Expr> Condition for Dynamic<E> {
    type Expr = E;

    fn condition_sql(self) -> SQL {
        match self.into_inner() {
            Some(expr) => expr.into_sql(),
            None => SQL::empty(),
        }
    }

    fn condition_shape(&self) -> Shape {
        self.get().map_or(Shape::Atom, ToSQL::shape)
    }
}

/// Result of `and`/`or`.
pub type Logical<L, R> = Binary<
    Bool,
    NullOf2<<L as Condition>::Expr, <R as Condition>::Expr>,
    <L as Condition>::Expr,
    <R as Condition>::Expr,
>;

/// Result of `not`.
pub type Negated<E> = Unary<Bool, <E as Expr>::Nullable, E>;

struct Rendered(SQL, Shape);

impl ToSQL for Rendered {
    fn to_sql(&self) -> SQL {
        self.0.clone()
    }

    fn into_sql(self) -> SQL {
        self.0
    }

    fn shape(&self) -> Shape {
        self.1
    }
}

fn chain<L: Condition, R: Condition>(
    left: L,
    right: R,
    token: Token,
    identity: Token,
    shape: Shape,
) -> (SQL, Shape) {
    let (left_shape, right_shape) = (left.condition_shape(), right.condition_shape());
    let left = left.condition_sql();
    let right = right.condition_sql();
    match (left.is_empty(), right.is_empty()) {
        (true, true) => (SQL::token(identity), Shape::Atom),
        (false, true) => (left, left_shape),
        (true, false) => (right, right_shape),
        (false, false) => {
            let sql = operand(Rendered(left, left_shape), shape)
                .push(token)
                .append(operand(Rendered(right, right_shape), shape));
            (sql, shape)
        }
    }
}

// =============================================================================
// AND
// =============================================================================

/// Logical AND.
///
/// Requires both operands to be boolean. Nested ANDs render as one flat
/// chain; an OR operand is parenthesized.
pub fn and<L, R>(left: L, right: R) -> Logical<L, R>
where
    L: Condition,
    R: Condition,
    <L::Expr as Expr>::SQLType: BooleanLike,
    <R::Expr as Expr>::SQLType: BooleanLike,
{
    let (sql, shape) = chain(left, right, Token::AND, Token::TRUE, Shape::And);
    Logical::<L, R>::with_shape(sql, shape)
}

// =============================================================================
// OR
// =============================================================================

/// Logical OR.
///
/// Requires both operands to be boolean. Nested ORs render as one flat
/// chain; an AND operand is parenthesized.
pub fn or<L, R>(left: L, right: R) -> Logical<L, R>
where
    L: Condition,
    R: Condition,
    <L::Expr as Expr>::SQLType: BooleanLike,
    <R::Expr as Expr>::SQLType: BooleanLike,
{
    let (sql, shape) = chain(left, right, Token::OR, Token::FALSE, Shape::Or);
    Logical::<L, R>::with_shape(sql, shape)
}

// =============================================================================
// NOT
// =============================================================================

/// Logical NOT.
///
/// Negates a boolean expression. Anything but a single atom is
/// parenthesized: `NOT "t"."flag"`, `NOT ("t"."a" > ?)`.
pub fn not<E>(expr: E) -> Negated<E>
where
    E: Expr,
    E::SQLType: BooleanLike,
{
    let sql = SQL::token(Token::NOT).append(operand(expr, Shape::Not));
    Negated::<E>::with_shape(sql, Shape::Not)
}
