//! Tables, columns and the sets they form in a statement's scope.

use core::marker::PhantomData;

use sqlweave_types::sql::{
    BigInt, Bool, Bytes, DataType, Date, Double, Float, Int, SmallInt, Text, Time, Timestamp,
    VarChar,
};

use super::{Cons, Name, Nil, Outer, TypeSet};
use crate::expr::{Expr, NonNull, Null, Nullability};
use crate::names::NameSet;

// =============================================================================
// Scope tables
// =============================================================================

/// Anything that can occupy a slot in a FROM clause's provided set:
/// tables, aliased tables, CTE references and derived tables.
pub trait ScopeTable: 'static {
    /// Name the element is referenced by in SQL.
    const SCOPE_NAME: &'static str;

    /// The element as seen through the nullable side of an outer join.
    type Outer: ScopeTable;
}

impl<T: ScopeTable> ScopeTable for Outer<T> {
    const SCOPE_NAME: &'static str = T::SCOPE_NAME;

    type Outer = Outer<T>;
}

/// A type-level list of scope tables.
pub trait TableList: TypeSet {
    type Append<Rhs: TableList>: TableList;

    /// Every element wrapped in [`Outer`].
    type Outer: TableList;

    /// Names of all elements, in order.
    const NAMES: NameSet;
}

impl TableList for Nil {
    type Append<Rhs: TableList> = Rhs;
    type Outer = Nil;

    const NAMES: NameSet = NameSet::EMPTY;
}

impl<H: ScopeTable, T: TableList> TableList for Cons<H, T> {
    type Append<Rhs: TableList> = Cons<H, T::Append<Rhs>>;
    type Outer = Cons<H::Outer, T::Outer>;

    const NAMES: NameSet = NameSet::EMPTY.with(H::SCOPE_NAME).union(T::NAMES);
}

// =============================================================================
// Columns as scope members
// =============================================================================

/// An expression that names a column of some scope table: a table column,
/// a column of an aliased table, or a field of a CTE or derived table.
pub trait ScopedColumn: Expr {
    type Scope: ScopeTable;
}

/// A type-level list of scoped columns.
pub trait ColumnSet: TypeSet {
    type Union<Rhs: ColumnSet>: ColumnSet;

    /// Scope tables of all columns.
    type Tables: TypeSet;
}

impl ColumnSet for Nil {
    type Union<Rhs: ColumnSet> = Rhs;
    type Tables = Nil;
}

impl<H: ScopedColumn, T: ColumnSet> ColumnSet for Cons<H, T> {
    type Union<Rhs: ColumnSet> = Cons<H, T::Union<Rhs>>;
    type Tables = Cons<H::Scope, T::Tables>;
}

// =============================================================================
// Schema description
// =============================================================================

/// Static description of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub nullable: bool,
    pub has_default: bool,
    pub primary_key: bool,
}

impl ColumnInfo {
    /// NOT NULL and without a default: every INSERT has to provide it.
    pub const fn is_required(&self) -> bool {
        !self.nullable && !self.has_default
    }
}

/// A table declared with [`table!`](crate::table).
pub trait Table: ScopeTable + Copy + Default + Send + Sync {
    const NAME: &'static str;
    /// Schema the table lives in, written before its name as the target of
    /// FROM, INSERT, UPDATE and DELETE. Columns stay qualified by `NAME`.
    const SCHEMA: Option<&'static str> = None;
    const COLUMNS: &'static [ColumnInfo];

    /// Tuple of all columns, in declaration order.
    type AllColumns: Copy;

    fn all_columns(&self) -> Self::AllColumns;
}

/// A column of a [`Table`].
///
/// SQL type and nullability are the column's [`Expr`] types, its name is
/// the [`Name`] impl.
pub trait Column: ScopedColumn + Name {
    type Table: Table;

    const HAS_DEFAULT: bool;
    const PRIMARY_KEY: bool;
}

/// Marks a nullable column type in [`table!`](crate::table).
pub struct Nullable<T>(PhantomData<T>);

/// SQL type plus nullability, as written in a column declaration.
pub trait ColumnType {
    type SQLType: DataType;
    type Nullable: Nullability;
}

macro_rules! column_types {
    ($($ty:ident),* $(,)?) => {
        $(
            impl ColumnType for $ty {
                type SQLType = $ty;
                type Nullable = NonNull;
            }
        )*
    };
}

column_types!(
    SmallInt, Int, BigInt, Float, Double, Text, VarChar, Bool, Bytes, Date, Time, Timestamp,
);

impl<T: DataType> ColumnType for Nullable<T> {
    type SQLType = T;
    type Nullable = Null;
}
