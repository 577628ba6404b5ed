use core::fmt;
use core::marker::PhantomData;

use crate::expr::{
    Condition, Expr, NonAggregate, ResolvesIn, SubqueryList, SubqueryStatement, argument,
};
use crate::from::{FromItem, NoFrom};
use crate::query::{OrderedSelect, Query, Resolve, ResolveRow, Select, StatementKind};
use crate::sql::{SQL, Token};
use crate::traits::{ColumnSet, Concat, Nil, SubsetOf, ToSQL, TypeSet};
use crate::types::{BooleanLike, Integral};

use super::{
    ConditionTables, ExecutableState, GroupBy, GroupList, GroupedBy, Grouping, ItemList,
    NoGroupBy, SelectList, SortItems, SortList, WithConditionSubqueries, assert_unique_names,
    push_clause,
};

//------------------------------------------------------------------------------
// Type State Markers
//------------------------------------------------------------------------------

/// Marker for the initial state of SelectBuilder.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectInitial;

/// Marker for the state after FROM clause
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectFromSet;

/// Marker for the state after WHERE clause (or `unconditionally()`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectWhereSet;

/// Marker for the state after GROUP BY clause
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectGroupSet;

/// Marker for the state after HAVING clause
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectHavingSet;

/// Marker for the state after ORDER BY clause
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectOrderSet;

/// Marker for the state after LIMIT clause
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectLimitSet;

/// Marker for the state after OFFSET clause
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectOffsetSet;

impl ExecutableState for SelectInitial {}
impl ExecutableState for SelectWhereSet {}
impl ExecutableState for SelectGroupSet {}
impl ExecutableState for SelectHavingSet {}
impl ExecutableState for SelectOrderSet {}
impl ExecutableState for SelectLimitSet {}
impl ExecutableState for SelectOffsetSet {}

/// Kind of the query a select built in this state is.
#[doc(hidden)]
pub trait SelectKind {
    type Kind: StatementKind;
}

impl SelectKind for SelectInitial {
    type Kind = Select;
}
impl SelectKind for SelectFromSet {
    type Kind = Select;
}
impl SelectKind for SelectWhereSet {
    type Kind = Select;
}
impl SelectKind for SelectGroupSet {
    type Kind = Select;
}
impl SelectKind for SelectHavingSet {
    type Kind = Select;
}
impl SelectKind for SelectOrderSet {
    type Kind = OrderedSelect;
}
impl SelectKind for SelectLimitSet {
    type Kind = OrderedSelect;
}
impl SelectKind for SelectOffsetSet {
    type Kind = OrderedSelect;
}

/// States that accept `order_by`.
#[doc(hidden)]
pub trait SelectOrderable: ExecutableState {}

impl SelectOrderable for SelectWhereSet {}
impl SelectOrderable for SelectGroupSet {}
impl SelectOrderable for SelectHavingSet {}

/// States that accept `limit`.
#[doc(hidden)]
pub trait SelectLimitable: ExecutableState {}

impl SelectLimitable for SelectWhereSet {}
impl SelectLimitable for SelectGroupSet {}
impl SelectLimitable for SelectHavingSet {}
impl SelectLimitable for SelectOrderSet {}

//------------------------------------------------------------------------------
// SelectBuilder
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct SelectClauses {
    distinct: bool,
    columns: SQL,
    from: SQL,
    where_: SQL,
    group_by: SQL,
    having: SQL,
    order_by: SQL,
    limit: SQL,
    offset: SQL,
}

impl SelectClauses {
    fn into_sql(self) -> SQL {
        let mut sql = SQL::token(Token::SELECT);
        if self.distinct {
            sql.push_mut(Token::DISTINCT);
        }
        sql.append_mut(self.columns);
        push_clause(&mut sql, Token::FROM, self.from);
        push_clause(&mut sql, Token::WHERE, self.where_);
        push_clause(&mut sql, Token::GROUP_BY, self.group_by);
        push_clause(&mut sql, Token::HAVING, self.having);
        push_clause(&mut sql, Token::ORDER_BY, self.order_by);
        push_clause(&mut sql, Token::LIMIT, self.limit);
        push_clause(&mut sql, Token::OFFSET, self.offset);
        sql
    }
}

/// A SELECT statement under construction.
///
/// - `State`: typestate marker
/// - `Items`: the select list as a `Cons` list of select items
/// - `F`: the FROM item
/// - `Req`: tables read by WHERE, GROUP BY, HAVING and ORDER BY
/// - `Subs`: subqueries embedded in those clauses
/// - `G`: [`NoGroupBy`] or [`GroupBy`]
pub struct SelectBuilder<State, Items, F = NoFrom, Req = Nil, Subs = Nil, G = NoGroupBy> {
    clauses: SelectClauses,
    _state: PhantomData<fn() -> (State, Items, F, Req, Subs, G)>,
}

/// Every subquery a select embeds: in its items, its FROM item and its
/// other clauses.
pub type AllSubqueries<Items, F, Subs> = <<<Items as ItemList>::Subqueries as SubqueryList>::Append<
    <F as FromItem>::Subqueries,
> as SubqueryList>::Append<Subs>;

/// Starts a SELECT statement.
///
/// ```
/// use sqlweave_core::builder::select;
/// use sqlweave_core::expr::{ExprExt, value};
/// use sqlweave_core::name_tag;
///
/// name_tag!(struct Answer = "answer";);
///
/// let query = select(value(42).as_(Answer)).build();
/// assert_eq!(query.to_string(), r#"SELECT ? AS "answer""#);
/// ```
pub fn select<L: SelectList>(columns: L) -> SelectBuilder<SelectInitial, L::Items> {
    SelectBuilder::start(columns, false)
}

/// Starts a SELECT DISTINCT statement.
pub fn select_distinct<L: SelectList>(columns: L) -> SelectBuilder<SelectInitial, L::Items> {
    SelectBuilder::start(columns, true)
}

impl<State, Items, F, Req, Subs, G> SelectBuilder<State, Items, F, Req, Subs, G> {
    fn advance<S2, F2, R2, Sb2, G2>(self) -> SelectBuilder<S2, Items, F2, R2, Sb2, G2> {
        SelectBuilder {
            clauses: self.clauses,
            _state: PhantomData,
        }
    }
}

impl<Items: ItemList> SelectBuilder<SelectInitial, Items> {
    fn start<L: SelectList<Items = Items>>(columns: L, distinct: bool) -> Self {
        Self {
            clauses: SelectClauses {
                distinct,
                columns: columns.list_sql(),
                ..SelectClauses::default()
            },
            _state: PhantomData,
        }
    }

    /// Sets the FROM item: a table, an aliased table, a CTE, a derived
    /// table or a join.
    pub fn from<F: FromItem>(self, from: F) -> SelectBuilder<SelectFromSet, Items, F> {
        let mut next = self.advance::<SelectFromSet, F, Nil, Nil, NoGroupBy>();
        next.clauses.from = from.from_sql();
        next
    }
}

//------------------------------------------------------------------------------
// WHERE
//------------------------------------------------------------------------------

impl<Items, F, Req, Subs> SelectBuilder<SelectFromSet, Items, F, Req, Subs>
where
    Req: TypeSet,
    Subs: SubqueryList,
{
    /// Adds a WHERE clause.
    ///
    /// The condition must be boolean and may not contain aggregates. A
    /// disabled [`dynamic`](crate::dynamic::dynamic) condition drops the
    /// clause.
    ///
    /// ```compile_fail,E0277
    /// use sqlweave_core::builder::select;
    /// use sqlweave_core::expr::{count_all, gt};
    /// use sqlweave_core::table;
    /// use sqlweave_core::types::Int;
    ///
    /// table! { struct Tab("tab") { id: Int } }
    ///
    /// // aggregates belong in having()
    /// let _ = select(Tab::default().id).from(Tab::default()).where_(gt(count_all(), 1));
    /// ```
    pub fn where_<C>(
        self,
        condition: C,
    ) -> SelectBuilder<
        SelectWhereSet,
        Items,
        F,
        Concat<ConditionTables<C>, Req>,
        WithConditionSubqueries<C, Subs>,
    >
    where
        C: Condition,
        <C::Expr as Expr>::SQLType: BooleanLike,
        <C::Expr as Expr>::Aggregate: NonAggregate,
    {
        let mut next = self.advance();
        next.clauses.where_ = condition.condition_sql();
        next
    }

    /// Explicitly selects every row.
    pub fn unconditionally(self) -> SelectBuilder<SelectWhereSet, Items, F, Req, Subs> {
        self.advance()
    }
}

//------------------------------------------------------------------------------
// GROUP BY / HAVING
//------------------------------------------------------------------------------

impl<Items, F, Req, Subs> SelectBuilder<SelectWhereSet, Items, F, Req, Subs>
where
    Items: ItemList,
    Req: TypeSet,
{
    /// Adds a GROUP BY clause.
    ///
    /// Every bare column of the select list has to be one of `columns`.
    pub fn group_by<L, Is>(
        self,
        columns: L,
    ) -> SelectBuilder<
        SelectGroupSet,
        Items,
        F,
        Concat<<L::Columns as ColumnSet>::Tables, Req>,
        Subs,
        GroupBy<L::Columns>,
    >
    where
        L: GroupList,
        Items::Ungrouped: SubsetOf<L::Columns, Is>,
    {
        let mut next = self.advance();
        next.clauses.group_by = columns.group_sql();
        next
    }
}

impl<Items, F, Req, Subs, Cols> SelectBuilder<SelectGroupSet, Items, F, Req, Subs, GroupBy<Cols>>
where
    Req: TypeSet,
    Subs: SubqueryList,
{
    /// Adds a HAVING clause.
    ///
    /// Bare columns in the condition must be group columns; aggregates are
    /// allowed.
    pub fn having<C, Is>(
        self,
        condition: C,
    ) -> SelectBuilder<
        SelectHavingSet,
        Items,
        F,
        Concat<ConditionTables<C>, Req>,
        WithConditionSubqueries<C, Subs>,
        GroupBy<Cols>,
    >
    where
        C: Condition,
        <C::Expr as Expr>::SQLType: BooleanLike,
        <C::Expr as Expr>::Ungrouped: SubsetOf<Cols, Is>,
    {
        let mut next = self.advance();
        next.clauses.having = condition.condition_sql();
        next
    }
}

//------------------------------------------------------------------------------
// ORDER BY / LIMIT / OFFSET
//------------------------------------------------------------------------------

impl<State, Items, F, Req, Subs, G> SelectBuilder<State, Items, F, Req, Subs, G>
where
    State: SelectOrderable,
    Req: TypeSet,
    Subs: SubqueryList,
{
    /// Adds an ORDER BY clause. Disabled dynamic entries are dropped, and
    /// the clause is omitted when none remain.
    pub fn order_by<L, Is>(
        self,
        sorts: L,
    ) -> SelectBuilder<
        SelectOrderSet,
        Items,
        F,
        Concat<<L::Items as SortItems>::Tables, Req>,
        <<L::Items as SortItems>::Subqueries as SubqueryList>::Append<Subs>,
        G,
    >
    where
        L: SortList,
        G: GroupedBy<<L::Items as SortItems>::Ungrouped, Is>,
    {
        let mut next = self.advance();
        next.clauses.order_by = sorts.sort_list_sql();
        next
    }
}

impl<State, Items, F, Req, Subs, G> SelectBuilder<State, Items, F, Req, Subs, G>
where
    State: SelectLimitable,
{
    /// Adds a LIMIT clause.
    pub fn limit<E>(self, count: E) -> SelectBuilder<SelectLimitSet, Items, F, Req, Subs, G>
    where
        E: Expr<Tables = Nil, Subqueries = Nil>,
        E::SQLType: Integral,
        E::Aggregate: NonAggregate,
    {
        let mut next = self.advance();
        next.clauses.limit = argument(count);
        next
    }
}

impl<Items, F, Req, Subs, G> SelectBuilder<SelectLimitSet, Items, F, Req, Subs, G> {
    /// Adds an OFFSET clause.
    pub fn offset<E>(self, count: E) -> SelectBuilder<SelectOffsetSet, Items, F, Req, Subs, G>
    where
        E: Expr<Tables = Nil, Subqueries = Nil>,
        E::SQLType: Integral,
        E::Aggregate: NonAggregate,
    {
        let mut next = self.advance();
        next.clauses.offset = argument(count);
        next
    }
}

//------------------------------------------------------------------------------
// build
//------------------------------------------------------------------------------

impl<State, Items, F, Req, Subs, G> SelectBuilder<State, Items, F, Req, Subs, G>
where
    Items: ItemList,
    F: FromItem,
    Req: TypeSet,
    Subs: SubqueryList,
{
    /// Finishes the statement.
    ///
    /// Every table read by any clause must be provided by FROM, and every
    /// subquery must resolve against its own FROM plus this one.
    ///
    /// ```compile_fail,E0277
    /// use sqlweave_core::builder::select;
    /// use sqlweave_core::table;
    /// use sqlweave_core::types::Int;
    ///
    /// table! { struct Tab("tab") { id: Int } }
    ///
    /// // a statement with FROM needs where_() or unconditionally()
    /// let _ = select(Tab::default().id).from(Tab::default()).build();
    /// ```
    ///
    /// ```compile_fail,E0277
    /// use sqlweave_core::builder::select;
    /// use sqlweave_core::table;
    /// use sqlweave_core::types::Int;
    ///
    /// table! { struct Tab("tab") { id: Int } }
    /// table! { struct Other("other") { id: Int } }
    ///
    /// // `other` is not in FROM
    /// let _ = select(Other::default().id).from(Tab::default()).unconditionally().build();
    /// ```
    pub fn build<Is, Js, Rs>(
        self,
    ) -> Query<
        Resolve<Items, F::Provided, Rs>,
        Concat<F::Ctes, <AllSubqueries<Items, F, Subs> as SubqueryList>::Ctes>,
        State::Kind,
    >
    where
        State: ExecutableState + SelectKind,
        G: Grouping<Items>,
        Concat<Items::Tables, Req>: SubsetOf<F::Provided, Is>,
        AllSubqueries<Items, F, Subs>: ResolvesIn<F::Provided, Js>,
        Items: ResolveRow<F::Provided, Rs>,
    {
        const { assert_unique_names(Items::NAMES) };
        Query::new(self.clauses.into_sql())
    }
}

//------------------------------------------------------------------------------
// Rendering and subquery use
//------------------------------------------------------------------------------

impl<State, Items, F, Req, Subs, G> ToSQL for SelectBuilder<State, Items, F, Req, Subs, G> {
    fn to_sql(&self) -> SQL {
        self.clauses.clone().into_sql()
    }

    fn into_sql(self) -> SQL {
        self.clauses.into_sql()
    }
}

impl<State, Items, F, Req, Subs, G> SubqueryStatement for SelectBuilder<State, Items, F, Req, Subs, G>
where
    State: ExecutableState,
    Items: ItemList,
    F: FromItem,
    Req: TypeSet,
    Subs: SubqueryList,
    G: Grouping<Items>,
{
    type Columns = Items::Columns;
    type Required = Concat<Items::Tables, Req>;
    type Provided = F::Provided;
    type Ctes = F::Ctes;
    type Subqueries = AllSubqueries<Items, F, Subs>;
}

impl<State, Items, F, Req, Subs, G> Clone for SelectBuilder<State, Items, F, Req, Subs, G> {
    fn clone(&self) -> Self {
        Self {
            clauses: self.clauses.clone(),
            _state: PhantomData,
        }
    }
}

impl<State, Items, F, Req, Subs, G> fmt::Debug for SelectBuilder<State, Items, F, Req, Subs, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectBuilder")
            .field("sql", &self.to_sql().sql())
            .finish()
    }
}

impl<State, Items, F, Req, Subs, G> fmt::Display for SelectBuilder<State, Items, F, Req, Subs, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql().sql())
    }
}
