//! Type-safe CASE/WHEN expressions.
//!
//! A typestate builder that tracks the result type and nullability through
//! each WHEN branch and the optional ELSE clause.
//!
//! ```
//! use sqlweave_core::expr::{case_when, gt, value};
//! use sqlweave_core::ToSQL;
//!
//! // With ELSE, the result is NonNull Text
//! let label = case_when(gt(70, 65))
//!     .then("Senior")
//!     .when(gt(70, 18))
//!     .then("Adult")
//!     .else_("Minor");
//! assert_eq!(
//!     label.to_sql().sql(),
//!     "CASE WHEN ? > ? THEN ? WHEN ? > ? THEN ? ELSE ? END"
//! );
//!
//! // Without ELSE, the result is nullable
//! let maybe = case_when(gt(70, 18)).then(value(1)).end();
//! # let _ = maybe;
//! ```
//!
//! Every branch must be compatible with the first:
//!
//! ```compile_fail,E0277
//! use sqlweave_core::expr::{case_when, gt};
//!
//! let _ = case_when(gt(1, 0)).then("one").else_(2);
//! ```

use core::marker::PhantomData;

use crate::sql::{SQL, Token};
use crate::types::{BooleanLike, Compatible};

use super::{Binary, Expr, Null, NullOr, Ternary, Unary, argument};

// =============================================================================
// Builder states
// =============================================================================

/// Marker for a CASE without any branch yet.
#[derive(Debug, Clone, Copy)]
pub struct NoBranch;

/// A WHEN condition waiting for its THEN value.
#[derive(Debug, Clone)]
pub struct CaseWhen<Prev, C> {
    sql: SQL,
    _state: PhantomData<fn() -> (Prev, C)>,
}

/// A CASE with at least one complete branch.
///
/// `E` is the expression type accumulated from all branches so far.
#[derive(Debug, Clone)]
pub struct Case<E> {
    sql: SQL,
    _expr: PhantomData<fn() -> E>,
}

/// Start a searched CASE expression with its first condition.
pub fn case_when<C>(condition: C) -> CaseWhen<NoBranch, C>
where
    C: Expr,
    C::SQLType: BooleanLike,
{
    CaseWhen {
        sql: SQL::token(Token::CASE).push(Token::WHEN).append(argument(condition)),
        _state: PhantomData,
    }
}

/// Type of a CASE after its first branch.
pub type FirstBranch<C, V> = Binary<<V as Expr>::SQLType, <V as Expr>::Nullable, C, V>;

/// Type of a CASE after a further branch.
pub type NextBranch<E, C, V> = Ternary<
    <E as Expr>::SQLType,
    NullOr<<E as Expr>::Nullable, <V as Expr>::Nullable>,
    E,
    C,
    V,
>;

/// Type of a CASE finished with ELSE.
pub type CaseElse<E, V> =
    Binary<<E as Expr>::SQLType, NullOr<<E as Expr>::Nullable, <V as Expr>::Nullable>, E, V>;

impl<C: Expr> CaseWhen<NoBranch, C> {
    /// The value of the first branch; it fixes the result type.
    pub fn then<V: Expr>(self, value: V) -> Case<FirstBranch<C, V>> {
        Case {
            sql: self.sql.push(Token::THEN).append(argument(value)),
            _expr: PhantomData,
        }
    }
}

impl<E: Expr, C: Expr> CaseWhen<Case<E>, C> {
    /// The value of a further branch. Must be compatible with the first.
    pub fn then<V>(self, value: V) -> Case<NextBranch<E, C, V>>
    where
        V: Expr,
        E::SQLType: Compatible<V::SQLType>,
    {
        Case {
            sql: self.sql.push(Token::THEN).append(argument(value)),
            _expr: PhantomData,
        }
    }
}

impl<E: Expr> Case<E> {
    /// Adds another WHEN branch.
    pub fn when<C>(self, condition: C) -> CaseWhen<Case<E>, C>
    where
        C: Expr,
        C::SQLType: BooleanLike,
    {
        CaseWhen {
            sql: self.sql.push(Token::WHEN).append(argument(condition)),
            _state: PhantomData,
        }
    }

    /// Finishes with an ELSE value. Nullable only if some branch is.
    pub fn else_<V>(self, value: V) -> CaseElse<E, V>
    where
        V: Expr,
        E::SQLType: Compatible<V::SQLType>,
    {
        let sql = self
            .sql
            .push(Token::ELSE)
            .append(argument(value))
            .push(Token::END);
        CaseElse::<E, V>::new(sql)
    }

    /// Finishes without ELSE. Rows matching no branch yield NULL.
    pub fn end(self) -> Unary<E::SQLType, Null, E> {
        Unary::<E::SQLType, Null, E>::new(self.sql.push(Token::END))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{NonNull, Nullability, SQLExpr, eq};
    use crate::traits::ToSQL;
    use crate::types::{Bool, Int, Text};

    fn nullable<E: Expr>(_: &E) -> bool {
        <E::Nullable as Nullability>::NULLABLE
    }

    #[test]
    fn else_keeps_branch_nullability() {
        let flag = SQLExpr::<Bool>::new(SQL::ident("flag"));
        let expr = case_when(flag).then("yes").else_("no");
        assert!(!nullable(&expr));
        assert_eq!(expr.to_sql().sql(), r#"CASE WHEN "flag" THEN ? ELSE ? END"#);
    }

    #[test]
    fn end_is_nullable() {
        let n = SQLExpr::<Int>::new(SQL::ident("n"));
        let expr = case_when(eq(n, 1)).then(SQLExpr::<Text, NonNull>::new(SQL::raw("'one'"))).end();
        assert!(nullable(&expr));
        assert_eq!(expr.to_sql().sql(), r#"CASE WHEN "n" = ? THEN 'one' END"#);
    }
}
