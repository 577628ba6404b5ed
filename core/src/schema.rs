//! Table aliases and schema helpers.
//!
//! Tables and their columns are declared with [`table!`](crate::table);
//! this module adds what works on any declared table: aliasing, column
//! assignment and the const checks the builders run over
//! [`ColumnInfo`] lists.

use core::fmt;
use core::marker::PhantomData;

use crate::builder::{AssignValue, Assignment, SelectItem};
use crate::expr::{Expr, NonNull};
use crate::from::FromItem;
use crate::names::{NameSet, str_eq};
use crate::sql::SQL;
use crate::traits::{Column, ColumnInfo, Cons, Name, Nil, Outer, ScopeTable, ScopedColumn, Table, ToSQL};

/// `"schema"."name"` or `"name"`: how statements name table `T`.
pub fn table_target<T: Table>() -> SQL {
    match T::SCHEMA {
        Some(schema) => SQL::qualified(schema, T::NAME),
        None => SQL::ident(T::NAME),
    }
}

// =============================================================================
// Aliased tables
// =============================================================================

/// Table `T` referenced as `N`: `"t" AS "n"`.
///
/// The alias is a separate scope table, so a table can be joined to itself.
///
/// ```
/// use sqlweave_core::expr::eq;
/// use sqlweave_core::from::FromItem;
/// use sqlweave_core::join::JoinExt;
/// use sqlweave_core::schema::TableExt;
/// use sqlweave_core::{name_tag, table};
/// use sqlweave_core::types::{Int, Nullable};
///
/// table! { struct Node("node") { id: Int, parent_id: Nullable<Int> } }
/// name_tag!(struct Parent = "parent";);
///
/// let node = Node::default();
/// let parent = node.as_(Parent);
/// let from = node.left_join(parent).on(eq(node.parent_id, parent.col(node.id)));
/// assert_eq!(
///     from.from_sql().sql(),
///     r#""node" LEFT JOIN "node" AS "parent" ON "node"."parent_id" = "parent"."id""#
/// );
/// ```
pub struct TableAs<T, N>(PhantomData<fn() -> (T, N)>);

impl<T: Table, N: Name> TableAs<T, N> {
    /// Column `column` of `T`, read through the alias.
    pub fn col<C>(&self, _column: C) -> AliasedColumn<C, N>
    where
        C: Column<Table = T>,
    {
        AliasedColumn(PhantomData)
    }
}

impl<T, N> Clone for TableAs<T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, N> Copy for TableAs<T, N> {}

impl<T, N> Default for TableAs<T, N> {
    fn default() -> Self {
        TableAs(PhantomData)
    }
}

impl<T: Table, N: Name> fmt::Debug for TableAs<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableAs({} AS {})", T::NAME, N::NAME)
    }
}

impl<T: Table, N: Name> ScopeTable for TableAs<T, N> {
    const SCOPE_NAME: &'static str = N::NAME;

    type Outer = Outer<Self>;
}

impl<T: Table, N: Name> FromItem for TableAs<T, N> {
    type Provided = Cons<Self, Nil>;
    type Ctes = Nil;
    type Subqueries = Nil;

    fn from_sql(self) -> SQL {
        table_target::<T>().alias(N::NAME)
    }
}

/// Column `C` read through table alias `N`.
pub struct AliasedColumn<C, N>(PhantomData<fn() -> (C, N)>);

impl<C, N> Clone for AliasedColumn<C, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, N> Copy for AliasedColumn<C, N> {}

impl<C, N> Default for AliasedColumn<C, N> {
    fn default() -> Self {
        AliasedColumn(PhantomData)
    }
}

impl<C: Column, N: Name> fmt::Debug for AliasedColumn<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AliasedColumn({}.{})", N::NAME, <C as Name>::NAME)
    }
}

impl<C: Column, N: Name> ToSQL for AliasedColumn<C, N> {
    fn to_sql(&self) -> SQL {
        SQL::qualified(N::NAME, <C as Name>::NAME)
    }
}

impl<C: Column, N: Name> Expr for AliasedColumn<C, N> {
    type SQLType = C::SQLType;
    type Nullable = C::Nullable;
    type Aggregate = crate::expr::Scalar;
    type Tables = Cons<TableAs<C::Table, N>, Nil>;
    type Ungrouped = Cons<Self, Nil>;
    type Subqueries = Nil;
}

impl<C: Column, N: Name> ScopedColumn for AliasedColumn<C, N> {
    type Scope = TableAs<C::Table, N>;
}

impl<C: Column, N: Name> SelectItem for AliasedColumn<C, N> {
    type Tag = C;
    type Expr = Self;
    type Dynamic = NonNull;

    fn item_sql(self) -> SQL {
        self.into_sql()
    }
}

crate::__expr_ops!([C, N] AliasedColumn<C, N>);

// =============================================================================
// Method syntax
// =============================================================================

/// Methods on declared tables.
pub trait TableExt: Table {
    /// `self AS "name"`
    fn as_<N: Name>(self, _name: N) -> TableAs<Self, N> {
        TableAs::default()
    }
}

impl<T: Table> TableExt for T {}

/// Methods on declared columns.
pub trait ColumnExt: Column + Sized {
    /// `"column" = value`, for INSERT, UPDATE and ON CONFLICT DO UPDATE.
    fn assign<V: AssignValue<Self>>(self, value: V) -> Assignment<Self, V> {
        crate::builder::assign(self, value)
    }
}

impl<C: Column> ColumnExt for C {}

/// Every column of `table`, in declaration order.
pub fn all_of<T: Table>(table: T) -> T::AllColumns {
    table.all_columns()
}

// =============================================================================
// Const checks
// =============================================================================

/// Every required column of `columns` is named in `assigned`.
pub const fn required_columns_covered(columns: &[ColumnInfo], assigned: &NameSet) -> bool {
    first_missing_column(columns, assigned).is_none()
}

/// First required column of `columns` not named in `assigned`.
pub const fn first_missing_column(
    columns: &[ColumnInfo],
    assigned: &NameSet,
) -> Option<&'static str> {
    let mut i = 0;
    while i < columns.len() {
        if columns[i].is_required() && !assigned.contains(columns[i].name) {
            return Some(columns[i].name);
        }
        i += 1;
    }
    None
}

/// `flag` occurs in `flags`.
#[doc(hidden)]
pub const fn __has_flag(flags: &[&str], flag: &str) -> bool {
    let mut i = 0;
    while i < flags.len() {
        if str_eq(flags[i], flag) {
            return true;
        }
        i += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[ColumnInfo] = &[
        ColumnInfo {
            name: "id",
            sql_type: "INTEGER",
            nullable: false,
            has_default: true,
            primary_key: true,
        },
        ColumnInfo {
            name: "name",
            sql_type: "TEXT",
            nullable: false,
            has_default: false,
            primary_key: false,
        },
        ColumnInfo {
            name: "note",
            sql_type: "TEXT",
            nullable: true,
            has_default: false,
            primary_key: false,
        },
    ];

    #[test]
    fn required_columns() {
        assert!(!required_columns_covered(COLUMNS, &NameSet::of(&["id", "note"])));
        assert_eq!(first_missing_column(COLUMNS, &NameSet::EMPTY), Some("name"));
        assert!(required_columns_covered(COLUMNS, &NameSet::of(&["name"])));
    }

    #[test]
    fn flags() {
        assert!(__has_flag(&["primary_key", "default"], "default"));
        assert!(!__has_flag(&[], "default"));
    }
}
