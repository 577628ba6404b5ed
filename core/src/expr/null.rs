//! NULL tests and COALESCE.
//!
//! These never turn NULL because an operand's table was outer-joined, so
//! their operands' tables are carried as
//! [`Shielded`](crate::traits::Shielded): still checked for
//! scope, ignored for nullability.

use crate::sql::{SQL, Token};
use crate::traits::{Concat, TypeSet};
use crate::types::{Bool, Compatible};

use super::{
    AggOr, Expr, NonNull, SQLExpr, Shape, SubqueriesOf2, UngroupedOf2, argument, binary_op,
    operand,
};

/// Tables of `E`, none of which can make the result NULL.
pub type ShieldedTables<E> = <<E as Expr>::Tables as TypeSet>::Shielded;

/// Result of `is_null`/`is_not_null`. Never NULL itself.
pub type NullTest<E> = SQLExpr<
    Bool,
    NonNull,
    <E as Expr>::Aggregate,
    ShieldedTables<E>,
    <E as Expr>::Ungrouped,
    <E as Expr>::Subqueries,
>;

/// Result of `coalesce`.
///
/// NULL only when the fallback can be. An outer join on the tables of
/// `expr` does not change that.
pub type Coalesce<L, R> = SQLExpr<
    <L as Expr>::SQLType,
    <R as Expr>::Nullable,
    AggOr<<L as Expr>::Aggregate, <R as Expr>::Aggregate>,
    Concat<ShieldedTables<L>, <R as Expr>::Tables>,
    UngroupedOf2<L, R>,
    SubqueriesOf2<L, R>,
>;

/// `expr IS NULL`
pub fn is_null<E: Expr>(expr: E) -> NullTest<E> {
    let sql = operand(expr, Shape::Compare).push(Token::IS).push(Token::NULL);
    NullTest::<E>::with_shape(sql, Shape::Compare)
}

/// `expr IS NOT NULL`
pub fn is_not_null<E: Expr>(expr: E) -> NullTest<E> {
    let sql = operand(expr, Shape::Compare)
        .push(Token::IS)
        .push(Token::NOT)
        .push(Token::NULL);
    NullTest::<E>::with_shape(sql, Shape::Compare)
}

/// Result of `is_distinct_from`/`is_not_distinct_from`. Never NULL itself.
pub type DistinctTest<L, R> = SQLExpr<
    Bool,
    NonNull,
    AggOr<<L as Expr>::Aggregate, <R as Expr>::Aggregate>,
    Concat<ShieldedTables<L>, ShieldedTables<R>>,
    UngroupedOf2<L, R>,
    SubqueriesOf2<L, R>,
>;

/// `left IS DISTINCT FROM right`: NULL-safe inequality.
///
/// Not available on MySQL; rendering for it fails with `Unsupported`.
pub fn is_distinct_from<L, R>(left: L, right: R) -> DistinctTest<L, R>
where
    L: Expr,
    R: Expr,
    L::SQLType: Compatible<R::SQLType>,
{
    let sql = binary_op(left, Token::IS_DISTINCT_FROM, right, Shape::Compare);
    DistinctTest::<L, R>::with_shape(sql, Shape::Compare)
}

/// `left IS NOT DISTINCT FROM right`: NULL-safe equality.
pub fn is_not_distinct_from<L, R>(left: L, right: R) -> DistinctTest<L, R>
where
    L: Expr,
    R: Expr,
    L::SQLType: Compatible<R::SQLType>,
{
    let sql = binary_op(left, Token::IS_NOT_DISTINCT_FROM, right, Shape::Compare);
    DistinctTest::<L, R>::with_shape(sql, Shape::Compare)
}

/// `COALESCE(expr, fallback)`
///
/// Requires compatible types. The result keeps the type of `expr`.
pub fn coalesce<L, R>(expr: L, fallback: R) -> Coalesce<L, R>
where
    L: Expr,
    R: Expr,
    L::SQLType: Compatible<R::SQLType>,
{
    let args = SQL::join([argument(expr), argument(fallback)], Token::COMMA);
    Coalesce::<L, R>::new(SQL::func("COALESCE", args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Null, SQLExpr};
    use crate::traits::ToSQL;
    use crate::types::Int;

    #[test]
    fn null_tests() {
        let a = || SQLExpr::<Int, Null>::new(SQL::ident("a"));
        assert_eq!(is_null(a()).to_sql().sql(), r#""a" IS NULL"#);
        assert_eq!(is_not_null(a() + 1).to_sql().sql(), r#"("a" + ?) IS NOT NULL"#);
    }

    #[test]
    fn coalesce_with_fallback() {
        let a = SQLExpr::<Int, Null>::new(SQL::ident("a"));
        let expr: SQLExpr<Int> = coalesce(a, 0);
        assert_eq!(expr.to_sql().sql(), r#"COALESCE("a", ?)"#);
    }

    #[test]
    fn distinct_from_is_null_safe() {
        let a = SQLExpr::<Int, Null>::new(SQL::ident("a"));
        let expr = is_not_distinct_from(a, None::<i32>);
        assert_eq!(expr.to_sql().sql(), r#""a" IS NOT DISTINCT FROM NULL"#);
    }
}
