//! Operand rendering shared by the expression builders.

use crate::sql::{SQL, Token};
use crate::traits::ToSQL;

use super::Shape;

/// Renders `expr` as an operand of an operator of class `within`,
/// adding parentheses where precedence would otherwise change the meaning.
pub(crate) fn operand<E: ToSQL>(expr: E, within: Shape) -> SQL {
    let shape = expr.shape();
    let sql = expr.into_sql();
    if sql.is_subquery() {
        return sql.parens();
    }
    let needs_parens = match (within, shape) {
        (_, Shape::Atom) => false,
        (Shape::And, Shape::Compare | Shape::Not | Shape::And) => false,
        (Shape::Or, Shape::Compare | Shape::Not | Shape::Or) => false,
        _ => true,
    };
    if needs_parens { sql.parens() } else { sql }
}

/// Renders `expr` as a function argument. Only subqueries need parentheses.
pub(crate) fn argument<E: ToSQL>(expr: E) -> SQL {
    let sql = expr.into_sql();
    if sql.is_subquery() { sql.parens() } else { sql }
}

/// `left <op> right` with both sides rendered as operands of `shape`.
pub(crate) fn binary_op<L: ToSQL, R: ToSQL>(left: L, op: Token, right: R, shape: Shape) -> SQL {
    operand(left, shape).push(op).append(operand(right, shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::SQLExpr;
    use crate::types::Bool;

    fn shaped(text: &'static str, shape: Shape) -> SQLExpr<Bool> {
        SQLExpr::with_shape(SQL::raw(text), shape)
    }

    #[test]
    fn same_operator_chains_flatten() {
        let sql = binary_op(shaped("a AND b", Shape::And), Token::AND, shaped("c", Shape::Atom), Shape::And);
        assert_eq!(sql.sql(), "a AND b AND c");
    }

    #[test]
    fn mixed_operators_get_parentheses() {
        let sql = binary_op(shaped("a OR b", Shape::Or), Token::AND, shaped("x = y", Shape::Compare), Shape::And);
        assert_eq!(sql.sql(), "(a OR b) AND x = y");

        let sql = binary_op(shaped("x + 1", Shape::Arith), Token::GT, shaped("2", Shape::Atom), Shape::Compare);
        assert_eq!(sql.sql(), "(x + 1) > 2");
    }
}
