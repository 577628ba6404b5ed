use core::fmt;
use core::marker::PhantomData;

use crate::expr::{ResolvesIn, SubqueryList};
use crate::names::NameSet;
use crate::query::{Modification, Query};
use crate::schema::{required_columns_covered, table_target};
use crate::sql::{SQL, Token};
use crate::traits::{Column, Concat, Cons, Name, Nil, Table, ToSQL, TypeSet, with_dual_tuple_sizes, with_tuple_sizes};

use super::{
    AssignList, AssignValue, Assignments, ExecutableState, NoTables, assert_unique_columns,
    push_clause, set_list_sql,
};
#[cfg(any(feature = "postgres", feature = "sqlite"))]
use super::{Returning, ReturningList};
#[cfg(any(feature = "postgres", feature = "sqlite"))]
use crate::query::ResolveRow;

//------------------------------------------------------------------------------
// Type State Markers
//------------------------------------------------------------------------------

/// Marker for the initial state of InsertBuilder.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertInitial;

/// Marker for the state after `set()` or `default_values()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertValuesSet;

/// Marker for the state after `columns()`, waiting for rows.
pub struct InsertColumnsSet<Cs>(PhantomData<fn() -> Cs>);

/// Marker for the state after at least one `values()` row.
pub struct InsertRowsSet<Cs>(PhantomData<fn() -> Cs>);

/// Marker for the state after `on_conflict()`, waiting for its action.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertConflictPending;

/// Marker for the state after `do_nothing()` or `do_update()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertConflictSet;

/// Marker for the state after `returning()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertReturningSet;

impl ExecutableState for InsertValuesSet {}
impl<Cs> ExecutableState for InsertRowsSet<Cs> {}
impl ExecutableState for InsertConflictSet {}
impl ExecutableState for InsertReturningSet {}

/// States with a complete VALUES part.
#[doc(hidden)]
pub trait InsertBodySet: ExecutableState {}

impl InsertBodySet for InsertValuesSet {}
impl<Cs> InsertBodySet for InsertRowsSet<Cs> {}

/// States that accept `returning`.
#[doc(hidden)]
pub trait InsertReturnable: ExecutableState {}

impl InsertReturnable for InsertValuesSet {}
impl<Cs> InsertReturnable for InsertRowsSet<Cs> {}
impl InsertReturnable for InsertConflictSet {}

//------------------------------------------------------------------------------
// Column lists
//------------------------------------------------------------------------------

/// The argument of `columns` and `on_conflict`: one column of `T` or a
/// tuple of them.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a list of columns of `{T}`",
    label = "expected a column of the target table or a tuple of them"
)]
pub trait InsertColumns<T> {
    /// The columns, as a `Cons` list.
    type Columns: TypeSet;

    const NAMES: NameSet;
}

impl<T, C: Column<Table = T>> InsertColumns<T> for C {
    type Columns = Cons<C, Nil>;

    const NAMES: NameSet = NameSet::EMPTY.with(<C as Name>::NAME);
}

macro_rules! impl_insert_columns {
    ($($T:ident),+; $($idx:tt),+) => {
        impl<Tab, $($T: Column<Table = Tab>),+> InsertColumns<Tab> for ($($T,)+) {
            type Columns = crate::__type_list!($($T),+);

            const NAMES: NameSet = NameSet::EMPTY$(.with(<$T as Name>::NAME))+;
        }
    };
}

with_tuple_sizes!(impl_insert_columns);

fn column_list_sql(names: NameSet) -> SQL {
    SQL::join(names.iter().map(SQL::ident), Token::COMMA).parens()
}

/// One row for `values`: a tuple matching the column list `Cs`.
///
/// Row values may not read tables or embed subqueries.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not match the insert columns `{Cs}`",
    label = "expected a tuple with one compatible value per column"
)]
pub trait ValueRow<Cs> {
    /// `DEFAULT` is only used for columns with a default.
    const DEFAULTS_ALLOWED: bool;

    fn row_sql(self) -> SQL;
}

macro_rules! impl_value_row {
    ($($C:ident),+; $($V:ident),+; $($idx:tt),+) => {
        impl<$($C: Column, $V),+> ValueRow<crate::__type_list!($($C),+)> for ($($V,)+)
        where
            $($V: AssignValue<$C, Subqueries = Nil>, $V::Tables: NoTables,)+
        {
            const DEFAULTS_ALLOWED: bool =
                true $(&& (!<$V as AssignValue<$C>>::IS_DEFAULT || <$C as Column>::HAS_DEFAULT))+;

            fn row_sql(self) -> SQL {
                SQL::join([$(self.$idx.value_sql()),+], Token::COMMA).parens()
            }
        }
    };
}

with_dual_tuple_sizes!(impl_value_row);

//------------------------------------------------------------------------------
// InsertBuilder
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct InsertClauses {
    verb: Token,
    table: SQL,
    body: SQL,
    conflict: SQL,
    returning: SQL,
}

impl InsertClauses {
    fn into_sql(self) -> SQL {
        let mut sql = SQL::token(self.verb).append(self.table);
        sql.append_mut(self.body);
        sql.append_mut(self.conflict);
        push_clause(&mut sql, Token::RETURNING, self.returning);
        sql
    }
}

/// An INSERT statement under construction.
///
/// - `T`: the target table
/// - `State`: typestate marker
/// - `Ret`: resolved RETURNING list
/// - `C`: CTEs referenced by value subqueries
pub struct InsertBuilder<T, State, Ret = Nil, C = Nil> {
    clauses: InsertClauses,
    _state: PhantomData<fn() -> (T, State, Ret, C)>,
}

/// Starts an INSERT statement.
///
/// ```
/// use sqlweave_core::builder::insert_into;
/// use sqlweave_core::schema::ColumnExt;
/// use sqlweave_core::table;
/// use sqlweave_core::traits::Nullable;
/// use sqlweave_core::types::{Int, Text};
///
/// table! { struct Tag("tag") { id: Int [default], label: Text, note: Nullable<Text> } }
///
/// let tag = Tag::default();
/// let query = insert_into(tag).set((tag.label.assign("rust"), tag.note.assign(None::<&str>))).build();
/// assert_eq!(query.to_string(), r#"INSERT INTO "tag" ("label", "note") VALUES (?, NULL)"#);
/// ```
///
/// Every NOT NULL column without a default must be assigned, or the
/// statement fails to compile.
pub fn insert_into<T: Table>(table: T) -> InsertBuilder<T, InsertInitial> {
    InsertBuilder::start(table, Token::INSERT_INTO)
}

/// Starts an `INSERT OR REPLACE` statement (`REPLACE` on MySQL).
#[cfg(feature = "sqlite")]
pub fn insert_or_replace_into<T: Table>(table: T) -> InsertBuilder<T, InsertInitial> {
    InsertBuilder::start(table, Token::INSERT_OR_REPLACE_INTO)
}

/// Starts an `INSERT OR IGNORE` statement (`INSERT IGNORE` on MySQL).
#[cfg(feature = "sqlite")]
pub fn insert_or_ignore_into<T: Table>(table: T) -> InsertBuilder<T, InsertInitial> {
    InsertBuilder::start(table, Token::INSERT_OR_IGNORE_INTO)
}

impl<T, State, Ret, C> InsertBuilder<T, State, Ret, C> {
    fn advance<S2, R2, C2>(self) -> InsertBuilder<T, S2, R2, C2> {
        InsertBuilder {
            clauses: self.clauses,
            _state: PhantomData,
        }
    }
}

impl<T: Table> InsertBuilder<T, InsertInitial> {
    fn start(_table: T, verb: Token) -> Self {
        Self {
            clauses: InsertClauses {
                verb,
                table: table_target::<T>(),
                body: SQL::empty(),
                conflict: SQL::empty(),
                returning: SQL::empty(),
            },
            _state: PhantomData,
        }
    }

    /// Inserts one row from assignments.
    ///
    /// Every required column must be assigned by a non-dynamic assignment.
    /// Values may not read tables; subqueries must be self-contained.
    pub fn set<A, Js>(
        self,
        assignments: A,
    ) -> InsertBuilder<
        T,
        InsertValuesSet,
        Nil,
        <<A::Items as AssignList<T>>::Subqueries as SubqueryList>::Ctes,
    >
    where
        A: Assignments<T>,
        <A::Items as AssignList<T>>::Tables: NoTables,
        <A::Items as AssignList<T>>::Subqueries: ResolvesIn<Nil, Js>,
    {
        const {
            assert_unique_columns(<A::Items as AssignList<T>>::NAMES);
            assert!(
                required_columns_covered(T::COLUMNS, &<A::Items as AssignList<T>>::STATIC_NAMES),
                "insert does not assign every required column"
            );
        };
        let parts = assignments.parts();
        let body = if parts.is_empty() {
            SQL::token(Token::DEFAULT_VALUES)
        } else {
            let columns = SQL::join(parts.iter().map(|(name, _)| SQL::ident(*name)), Token::COMMA);
            let values = SQL::join(parts.into_iter().map(|(_, value)| value), Token::COMMA);
            columns.parens().push(Token::VALUES).append(values.parens())
        };
        let mut next = self.advance();
        next.clauses.body = body;
        next
    }

    /// `DEFAULT VALUES`. Only allowed when no column is required.
    pub fn default_values(self) -> InsertBuilder<T, InsertValuesSet> {
        const {
            assert!(
                required_columns_covered(T::COLUMNS, &NameSet::EMPTY),
                "default_values() requires every column to be nullable or have a default"
            )
        };
        let mut next = self.advance();
        next.clauses.body = SQL::token(Token::DEFAULT_VALUES);
        next
    }

    /// Starts a multi-row insert into `columns`.
    ///
    /// The columns must cover every required column.
    pub fn columns<L: InsertColumns<T>>(self, _columns: L) -> InsertBuilder<T, InsertColumnsSet<L::Columns>> {
        const {
            assert_unique_columns(L::NAMES);
            assert!(
                required_columns_covered(T::COLUMNS, &L::NAMES),
                "insert does not assign every required column"
            );
        };
        let mut next = self.advance();
        next.clauses.body = column_list_sql(L::NAMES).push(Token::VALUES);
        next
    }
}

impl<T, Cs> InsertBuilder<T, InsertColumnsSet<Cs>> {
    /// Adds the first row.
    pub fn values<R: ValueRow<Cs>>(self, row: R) -> InsertBuilder<T, InsertRowsSet<Cs>> {
        const { assert!(R::DEFAULTS_ALLOWED, "default_value() requires a column with a default") };
        let mut next = self.advance();
        next.clauses.body.append_mut(row.row_sql());
        next
    }
}

impl<T, Cs> InsertBuilder<T, InsertRowsSet<Cs>> {
    /// Adds another row.
    pub fn values<R: ValueRow<Cs>>(mut self, row: R) -> Self {
        const { assert!(R::DEFAULTS_ALLOWED, "default_value() requires a column with a default") };
        self.clauses.body.push_mut(Token::COMMA);
        self.clauses.body.append_mut(row.row_sql());
        self
    }
}

//------------------------------------------------------------------------------
// ON CONFLICT / RETURNING
//------------------------------------------------------------------------------

#[cfg(any(feature = "postgres", feature = "sqlite"))]
impl<T, State, C> InsertBuilder<T, State, Nil, C>
where
    T: Table,
    State: InsertBodySet,
{
    /// `ON CONFLICT (columns)`, followed by `do_nothing()` or `do_update()`.
    pub fn on_conflict<L: InsertColumns<T>>(self, _target: L) -> InsertBuilder<T, InsertConflictPending, Nil, C> {
        let mut next = self.advance();
        next.clauses.conflict = SQL::token(Token::ON_CONFLICT).append(column_list_sql(L::NAMES));
        next
    }
}

#[cfg(any(feature = "postgres", feature = "sqlite"))]
impl<T, C> InsertBuilder<T, InsertConflictPending, Nil, C>
where
    T: Table,
    C: TypeSet,
{
    /// `DO NOTHING`
    pub fn do_nothing(mut self) -> InsertBuilder<T, InsertConflictSet, Nil, C> {
        self.clauses.conflict.push_mut(Token::DO_NOTHING);
        self.advance()
    }

    /// `DO UPDATE SET ...`. Values may read the target table.
    pub fn do_update<A, Is, Js>(
        mut self,
        assignments: A,
    ) -> InsertBuilder<
        T,
        InsertConflictSet,
        Nil,
        Concat<C, <<A::Items as AssignList<T>>::Subqueries as SubqueryList>::Ctes>,
    >
    where
        A: Assignments<T>,
        <A::Items as AssignList<T>>::Tables: crate::traits::SubsetOf<Cons<T, Nil>, Is>,
        <A::Items as AssignList<T>>::Subqueries: ResolvesIn<Cons<T, Nil>, Js>,
    {
        const {
            assert_unique_columns(<A::Items as AssignList<T>>::NAMES);
            assert!(
                !<A::Items as AssignList<T>>::STATIC_NAMES.is_empty(),
                "do_update() requires at least one non-dynamic assignment"
            );
        };
        self.clauses.conflict.push_mut(Token::DO_UPDATE_SET);
        self.clauses.conflict.append_mut(set_list_sql(assignments.parts()));
        self.advance()
    }
}

#[cfg(any(feature = "postgres", feature = "sqlite"))]
impl<T, State, C> InsertBuilder<T, State, Nil, C>
where
    T: Table,
    State: InsertReturnable,
{
    /// `RETURNING columns`. Only columns of the target table can be returned.
    pub fn returning<L, Is, Rs>(self, columns: L) -> InsertBuilder<T, InsertReturningSet, Returning<L, Cons<T, Nil>, Rs>, C>
    where
        L: ReturningList<Cons<T, Nil>, Is, Rs>,
        L::Items: ResolveRow<Cons<T, Nil>, Rs>,
    {
        let mut next = self.advance();
        next.clauses.returning = columns.returning_sql();
        next
    }
}

//------------------------------------------------------------------------------
// build
//------------------------------------------------------------------------------

impl<T, State, Ret, C> InsertBuilder<T, State, Ret, C>
where
    State: ExecutableState,
{
    /// Finishes the statement.
    pub fn build(self) -> Query<Ret, C, Modification> {
        Query::new(self.clauses.into_sql())
    }
}

impl<T, State, Ret, C> ToSQL for InsertBuilder<T, State, Ret, C> {
    fn to_sql(&self) -> SQL {
        self.clauses.clone().into_sql()
    }

    fn into_sql(self) -> SQL {
        self.clauses.into_sql()
    }
}

impl<T, State, Ret, C> Clone for InsertBuilder<T, State, Ret, C> {
    fn clone(&self) -> Self {
        Self {
            clauses: self.clauses.clone(),
            _state: PhantomData,
        }
    }
}

impl<T, State, Ret, C> fmt::Debug for InsertBuilder<T, State, Ret, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertBuilder")
            .field("sql", &self.to_sql().sql())
            .finish()
    }
}
