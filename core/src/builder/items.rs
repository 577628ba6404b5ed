//! Select items, sort items and group lists.
//!
//! Tuples of up to 16 elements are converted to `Cons` lists once, and every
//! type-level fold (tables read, bare columns, aggregate flag) is computed
//! over those lists.

use core::marker::PhantomData;

use crate::dynamic::Dynamic;
use crate::expr::{
    AggOr, AggregateKind, ConsistentAggregates, Expr, NonNull, Null, Nullability, SubqueryList,
    argument,
};
use crate::names::NameSet;
use crate::sql::{SQL, Token};
use crate::traits::{
    ColumnSet, Concat, Cons, Name, Nil, ScopedColumn, SubsetOf, TypeSet, with_tuple_sizes,
};

// =============================================================================
// Select items
// =============================================================================

/// One named entry of a select list.
///
/// Unnamed expressions are not select items; name them with
/// [`as_`](crate::expr::ExprExt::as_).
///
/// ```compile_fail,E0277
/// use sqlweave_core::builder::select;
/// use sqlweave_core::expr::value;
///
/// // `value(1) + 2` has no name
/// let _ = select(value(1) + 2);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be selected",
    label = "expected a column, an aliased expression or a CTE field",
    note = "name computed expressions with `.as_(Tag)`"
)]
pub trait SelectItem {
    /// Tag naming the item in the result and in CTE field lookups.
    type Tag: Name;
    /// The typed expression behind the item.
    type Expr: Expr;
    /// `Null` when the item may be switched off at runtime.
    type Dynamic: Nullability;

    fn item_sql(self) -> SQL;
}

/// An expression named with `expr.as_(Tag)`.
#[derive(Debug, Clone)]
pub struct Aliased<E, N> {
    expr: E,
    _name: PhantomData<N>,
}

impl<E: Expr, N: Name> Aliased<E, N> {
    pub fn new(expr: E, _name: N) -> Self {
        Self {
            expr,
            _name: PhantomData,
        }
    }
}

impl<E: Expr, N: Name> SelectItem for Aliased<E, N> {
    type Tag = N;
    type Expr = E;
    type Dynamic = NonNull;

    fn item_sql(self) -> SQL {
        argument(self.expr).alias(N::NAME)
    }
}

impl<I: SelectItem> SelectItem for Dynamic<I> {
    type Tag = I::Tag;
    type Expr = I::Expr;
    type Dynamic = Null;

    fn item_sql(self) -> SQL {
        match self.into_inner() {
            Some(item) => item.item_sql(),
            None => SQL::token(Token::NULL).alias(<I::Tag as Name>::NAME),
        }
    }
}

// =============================================================================
// Item lists
// =============================================================================

/// A `Cons` list of select items with its type-level summary.
pub trait ItemList: TypeSet {
    /// Tables read by any item.
    type Tables: TypeSet;
    /// Bare columns used outside aggregates.
    type Ungrouped: ColumnSet;
    /// `Agg` if any item is an aggregate.
    type Aggregate: AggregateKind;
    type Subqueries: SubqueryList;
    /// SQL types of the items, as a `Cons` list.
    type Columns;

    /// Result column names, in order.
    const NAMES: NameSet;
}

impl ItemList for Nil {
    type Tables = Nil;
    type Ungrouped = Nil;
    type Aggregate = crate::expr::Scalar;
    type Subqueries = Nil;
    type Columns = Nil;

    const NAMES: NameSet = NameSet::EMPTY;
}

impl<I: SelectItem, Rest: ItemList> ItemList for Cons<I, Rest> {
    type Tables = Concat<<I::Expr as Expr>::Tables, Rest::Tables>;
    type Ungrouped = <<I::Expr as Expr>::Ungrouped as ColumnSet>::Union<Rest::Ungrouped>;
    type Aggregate = AggOr<<I::Expr as Expr>::Aggregate, Rest::Aggregate>;
    type Subqueries = <<I::Expr as Expr>::Subqueries as SubqueryList>::Append<Rest::Subqueries>;
    type Columns = Cons<<I::Expr as Expr>::SQLType, Rest::Columns>;

    const NAMES: NameSet = NameSet::EMPTY
        .with(<I::Tag as Name>::NAME)
        .union(Rest::NAMES);
}

/// The argument of `select`: one item or a tuple of items.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a select list",
    label = "expected a select item or a tuple of up to 16 select items"
)]
pub trait SelectList {
    type Items: ItemList;

    fn list_sql(self) -> SQL;
}

impl<I: SelectItem> SelectList for I {
    type Items = Cons<I, Nil>;

    fn list_sql(self) -> SQL {
        self.item_sql()
    }
}

macro_rules! impl_select_list {
    ($($T:ident),+; $($idx:tt),+) => {
        impl<$($T: SelectItem),+> SelectList for ($($T,)+) {
            type Items = crate::__type_list!($($T),+);

            fn list_sql(self) -> SQL {
                SQL::join([$(self.$idx.item_sql()),+], Token::COMMA)
            }
        }
    };
}

with_tuple_sizes!(impl_select_list);

/// Select list items must be uniquely named.
pub(crate) const fn assert_unique_names(names: NameSet) {
    assert!(
        names.first_duplicate().is_none(),
        "duplicate column names in select list"
    );
}

// =============================================================================
// Grouping
// =============================================================================

/// Marker for a select without GROUP BY.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGroupBy;

/// Marker for a select grouped by the columns in `C`.
pub struct GroupBy<C>(PhantomData<fn() -> C>);

/// The select list is well-formed under this grouping.
#[diagnostic::on_unimplemented(
    message = "select list is not valid under `{Self}`",
    label = "aggregates and bare columns are mixed",
    note = "without GROUP BY, a select list with an aggregate may not use bare columns"
)]
pub trait Grouping<Items: ItemList> {}

impl<Items: ItemList> Grouping<Items> for NoGroupBy where
    Items::Aggregate: ConsistentAggregates<Items::Ungrouped>
{
}

// `group_by` already required the bare columns to be grouped
impl<Items: ItemList, C> Grouping<Items> for GroupBy<C> {}

/// Bare columns `U` may be used after this grouping.
#[diagnostic::on_unimplemented(
    message = "`{U}` is neither grouped nor aggregated",
    label = "bare column outside of group_by()",
    note = "with GROUP BY, ORDER BY may only use group columns or aggregates"
)]
pub trait GroupedBy<U, Indices> {}

impl<U> GroupedBy<U, ()> for NoGroupBy {}

impl<U, C, Is> GroupedBy<U, Is> for GroupBy<C> where U: SubsetOf<C, Is> {}

/// The argument of `group_by`: a column or a tuple of columns.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be grouped by",
    label = "expected a column or a tuple of columns"
)]
pub trait GroupList {
    type Columns: ColumnSet;

    fn group_sql(self) -> SQL;
}

impl<C: ScopedColumn> GroupList for C {
    type Columns = Cons<C, Nil>;

    fn group_sql(self) -> SQL {
        self.into_sql()
    }
}

macro_rules! impl_group_list {
    ($($T:ident),+; $($idx:tt),+) => {
        impl<$($T: ScopedColumn),+> GroupList for ($($T,)+) {
            type Columns = crate::__type_list!($($T),+);

            fn group_sql(self) -> SQL {
                SQL::join([$(self.$idx.into_sql()),+], Token::COMMA)
            }
        }
    };
}

with_tuple_sizes!(impl_group_list);

// =============================================================================
// Sorting
// =============================================================================

/// An ORDER BY entry with an explicit direction.
#[derive(Debug, Clone)]
pub struct Sort<E> {
    expr: E,
    direction: Token,
    nulls: Option<Token>,
}

impl<E: Expr> Sort<E> {
    pub fn asc(expr: E) -> Self {
        Self {
            expr,
            direction: Token::ASC,
            nulls: None,
        }
    }

    pub fn desc(expr: E) -> Self {
        Self {
            expr,
            direction: Token::DESC,
            nulls: None,
        }
    }

    /// `NULLS FIRST`. Not available on MySQL.
    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(Token::NULLS_FIRST);
        self
    }

    /// `NULLS LAST`. Not available on MySQL.
    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(Token::NULLS_LAST);
        self
    }
}

/// One ORDER BY entry: an expression, a [`Sort`], or a dynamic one of those.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be sorted by",
    label = "expected an expression or `expr.asc()`/`expr.desc()`"
)]
pub trait SortItem {
    type Expr: Expr;

    /// Rendered entry, empty when disabled.
    fn sort_sql(self) -> SQL;
}

impl<E: Expr> SortItem for E {
    type Expr = E;

    fn sort_sql(self) -> SQL {
        argument(self)
    }
}

impl<E: Expr> SortItem for Sort<E> {
    type Expr = E;

    fn sort_sql(self) -> SQL {
        let sql = argument(self.expr).push(self.direction);
        match self.nulls {
            Some(nulls) => sql.push(nulls),
            None => sql,
        }
    }
}

impl<S: SortItem> SortItem for Dynamic<S> {
    type Expr = S::Expr;

    fn sort_sql(self) -> SQL {
        self.into_inner().map_or_else(SQL::empty, SortItem::sort_sql)
    }
}

/// A `Cons` list of sort items.
pub trait SortItems: TypeSet {
    type Tables: TypeSet;
    type Ungrouped: ColumnSet;
    type Subqueries: SubqueryList;
}

impl SortItems for Nil {
    type Tables = Nil;
    type Ungrouped = Nil;
    type Subqueries = Nil;
}

impl<S: SortItem, Rest: SortItems> SortItems for Cons<S, Rest> {
    type Tables = Concat<<S::Expr as Expr>::Tables, Rest::Tables>;
    type Ungrouped = <<S::Expr as Expr>::Ungrouped as ColumnSet>::Union<Rest::Ungrouped>;
    type Subqueries = <<S::Expr as Expr>::Subqueries as SubqueryList>::Append<Rest::Subqueries>;
}

/// The argument of `order_by`: one sort item or a tuple of them.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an ORDER BY list",
    label = "expected a sort item or a tuple of up to 16 sort items"
)]
pub trait SortList {
    type Items: SortItems;

    /// Rendered entries; empty when every entry is disabled.
    fn sort_list_sql(self) -> SQL;
}

impl<S: SortItem> SortList for S {
    type Items = Cons<S, Nil>;

    fn sort_list_sql(self) -> SQL {
        self.sort_sql()
    }
}

macro_rules! impl_sort_list {
    ($($T:ident),+; $($idx:tt),+) => {
        impl<$($T: SortItem),+> SortList for ($($T,)+) {
            type Items = crate::__type_list!($($T),+);

            fn sort_list_sql(self) -> SQL {
                SQL::join([$(self.$idx.sort_sql()),+], Token::COMMA)
            }
        }
    };
}

with_tuple_sizes!(impl_sort_list);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::dynamic;
    use crate::expr::{SQLExpr, count_all};
    use crate::types::Int;

    #[derive(Debug, Clone, Copy, Default)]
    struct Total;

    impl Name for Total {
        const NAME: &'static str = "total";
    }

    fn col(name: &'static str) -> SQLExpr<Int> {
        SQLExpr::new(SQL::ident(name))
    }

    #[test]
    fn aliased_items_render_with_as() {
        let item = Aliased::new(count_all(), Total);
        assert_eq!(item.item_sql().sql(), r#"COUNT(*) AS "total""#);
    }

    #[test]
    fn disabled_item_selects_null() {
        let item = dynamic(false, Aliased::new(col("a"), Total));
        assert_eq!(item.item_sql().sql(), r#"NULL AS "total""#);
    }

    #[test]
    fn sort_entries() {
        let list = (Sort::desc(col("a")).nulls_last(), dynamic(false, Sort::asc(col("b"))), col("c"));
        assert_eq!(list.sort_list_sql().sql(), r#""a" DESC NULLS LAST, "c""#);
    }

    #[test]
    fn item_names_are_collected() {
        type Items = <(Aliased<SQLExpr<Int>, Total>,) as SelectList>::Items;
        assert_eq!(<Items as ItemList>::NAMES.get(0), Some("total"));
        assert_eq!(<Items as TypeSet>::LEN, 1);
    }
}
