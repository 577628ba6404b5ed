//! Type-safe aggregate functions.
//!
//! These functions return expressions marked as aggregates, which can be used
//! to enforce GROUP BY rules at compile time. An aggregate swallows the bare
//! columns of its argument: `COUNT("t"."id")` needs no `group_by("t"."id")`.
//!
//! # Type Safety
//!
//! - `sum`, `avg`: Require `Numeric` types (Int, BigInt, Float, Double)
//! - `count`: Works with any type
//! - `min`, `max`: Work with any type (ordered types in SQL)
//! - Aggregates do not nest: the argument must be a row-level expression

use crate::sql::{SQL, Token};
use crate::types::{BigInt, Double, Numeric};

use super::{Agg, Aggregated, Expr, NonAggregate, NonNull, Null, SQLExpr};

fn distinct<E: Expr>(expr: E) -> SQL {
    SQL::token(Token::DISTINCT).append(expr.into_sql())
}

// =============================================================================
// COUNT
// =============================================================================

/// COUNT(*) - counts all rows.
///
/// Returns a BigInt, NonNull (count is never NULL), Aggregate expression.
pub fn count_all() -> SQLExpr<BigInt, NonNull, Agg> {
    SQLExpr::new(SQL::raw("COUNT(*)"))
}

/// COUNT(expr) - counts non-null values.
///
/// Returns a BigInt, NonNull (count is never NULL), Aggregate expression.
/// Works with any expression type.
///
/// ```compile_fail,E0277
/// use sqlweave_core::expr::{count, count_all};
///
/// // aggregates do not nest
/// let _ = count(count_all());
/// ```
pub fn count<E>(expr: E) -> Aggregated<BigInt, NonNull, E>
where
    E: Expr,
    E::Aggregate: NonAggregate,
{
    Aggregated::<BigInt, NonNull, E>::new(SQL::func("COUNT", expr.into_sql()))
}

/// COUNT(DISTINCT expr) - counts distinct non-null values.
pub fn count_distinct<E>(expr: E) -> Aggregated<BigInt, NonNull, E>
where
    E: Expr,
    E::Aggregate: NonAggregate,
{
    Aggregated::<BigInt, NonNull, E>::new(SQL::func("COUNT", distinct(expr)))
}

// =============================================================================
// SUM / AVG
// =============================================================================

/// SUM(expr) - sums numeric values.
///
/// Requires the expression to be `Numeric`. Preserves the input expression's
/// SQL type. Returns a nullable expression (empty set returns NULL).
///
/// ```compile_fail,E0277
/// use sqlweave_core::expr::sum;
///
/// // Text is not Numeric
/// let _ = sum("x");
/// ```
pub fn sum<E>(expr: E) -> Aggregated<E::SQLType, Null, E>
where
    E: Expr,
    E::SQLType: Numeric,
    E::Aggregate: NonAggregate,
{
    Aggregated::<E::SQLType, Null, E>::new(SQL::func("SUM", expr.into_sql()))
}

/// AVG(expr) - averages numeric values.
///
/// Always returns Double. Nullable, since the average of no rows is NULL.
pub fn avg<E>(expr: E) -> Aggregated<Double, Null, E>
where
    E: Expr,
    E::SQLType: Numeric,
    E::Aggregate: NonAggregate,
{
    Aggregated::<Double, Null, E>::new(SQL::func("AVG", expr.into_sql()))
}

// =============================================================================
// MIN / MAX
// =============================================================================

/// MIN(expr) - smallest value, NULL for an empty set.
pub fn min<E>(expr: E) -> Aggregated<E::SQLType, Null, E>
where
    E: Expr,
    E::Aggregate: NonAggregate,
{
    Aggregated::<E::SQLType, Null, E>::new(SQL::func("MIN", expr.into_sql()))
}

/// MAX(expr) - largest value, NULL for an empty set.
pub fn max<E>(expr: E) -> Aggregated<E::SQLType, Null, E>
where
    E: Expr,
    E::Aggregate: NonAggregate,
{
    Aggregated::<E::SQLType, Null, E>::new(SQL::func("MAX", expr.into_sql()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::AggregateKind;
    use crate::traits::ToSQL;
    use crate::types::Int;

    fn is_aggregate<E: Expr>(_: &E) -> bool {
        <E::Aggregate as AggregateKind>::AGGREGATE
    }

    #[test]
    fn aggregates_render() {
        let col = || SQLExpr::<Int>::new(SQL::ident("a"));
        assert_eq!(count_all().to_sql().sql(), "COUNT(*)");
        assert_eq!(count_distinct(col()).to_sql().sql(), r#"COUNT(DISTINCT "a")"#);
        assert_eq!(sum(col() * 2).to_sql().sql(), r#"SUM("a" * ?)"#);
        assert!(is_aggregate(&avg(col())));
        assert!(!is_aggregate(&col()));
    }

    #[test]
    fn aggregates_combine_with_scalars() {
        let expr = max(SQLExpr::<Int>::new(SQL::ident("a"))) + 1;
        assert!(is_aggregate(&expr));
        assert_eq!(expr.to_sql().sql(), r#"MAX("a") + ?"#);
    }
}
