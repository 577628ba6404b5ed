//! Column assignments for INSERT, UPDATE and ON CONFLICT DO UPDATE.

use core::marker::PhantomData;

use crate::dynamic::Dynamic;
use crate::expr::{AssignableTo, Expr, NonAggregate, SubqueryList, argument};
use crate::names::NameSet;
use crate::sql::{SQL, Token};
use crate::traits::{Column, Concat, Cons, Name, Nil, TypeSet, with_tuple_sizes};
use crate::types::Compatible;

/// `column = value`.
#[derive(Debug, Clone)]
pub struct Assignment<C, V> {
    value: V,
    _column: PhantomData<fn() -> C>,
}

/// Assigns `value` to `column`.
///
/// The value must have a compatible SQL type, may only be nullable for a
/// nullable column and may not be an aggregate.
///
/// ```compile_fail,E0277
/// use sqlweave_core::builder::assign;
/// use sqlweave_core::table;
/// use sqlweave_core::types::Text;
///
/// table! { struct Tag("tag") { label: Text } }
///
/// // a nullable value cannot be stored in a NOT NULL column
/// let _ = assign(Tag::default().label, None::<&str>);
/// ```
pub fn assign<C: Column, V: AssignValue<C>>(_column: C, value: V) -> Assignment<C, V> {
    const {
        assert!(
            !V::IS_DEFAULT || C::HAS_DEFAULT,
            "default_value() requires a column with a default"
        )
    };
    Assignment {
        value,
        _column: PhantomData,
    }
}

/// The `DEFAULT` keyword as an assigned value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValue;

/// `DEFAULT`, for columns declared with a default.
pub fn default_value() -> DefaultValue {
    DefaultValue
}

/// A value that can be assigned to column `C`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be assigned to `{C}`",
    label = "incompatible value",
    note = "the value must be an expression of a compatible SQL type, or default_value()"
)]
pub trait AssignValue<C> {
    type Tables: TypeSet;
    type Subqueries: SubqueryList;

    const IS_DEFAULT: bool;

    fn value_sql(self) -> SQL;
}

impl<C, V> AssignValue<C> for V
where
    C: Column,
    V: Expr,
    V::SQLType: Compatible<C::SQLType>,
    V::Nullable: AssignableTo<C::Nullable>,
    V::Aggregate: NonAggregate,
{
    type Tables = V::Tables;
    type Subqueries = V::Subqueries;

    const IS_DEFAULT: bool = false;

    fn value_sql(self) -> SQL {
        argument(self)
    }
}

impl<C: Column> AssignValue<C> for DefaultValue {
    type Tables = Nil;
    type Subqueries = Nil;

    const IS_DEFAULT: bool = true;

    fn value_sql(self) -> SQL {
        SQL::token(Token::DEFAULT)
    }
}

// =============================================================================
// Assignment lists
// =============================================================================

/// One entry of a SET list: an [`Assignment`] or a [`Dynamic`] one.
pub trait AssignItem {
    type Column: Column;
    type Tables: TypeSet;
    type Subqueries: SubqueryList;

    /// `false` when the assignment may be switched off at runtime.
    const STATIC: bool;

    /// Column name and rendered value, `None` when disabled.
    fn assign_parts(self) -> Option<(&'static str, SQL)>;
}

impl<C: Column, V: AssignValue<C>> AssignItem for Assignment<C, V> {
    type Column = C;
    type Tables = V::Tables;
    type Subqueries = V::Subqueries;

    const STATIC: bool = true;

    fn assign_parts(self) -> Option<(&'static str, SQL)> {
        Some((<C as Name>::NAME, self.value.value_sql()))
    }
}

impl<A: AssignItem> AssignItem for Dynamic<A> {
    type Column = A::Column;
    type Tables = A::Tables;
    type Subqueries = A::Subqueries;

    const STATIC: bool = false;

    fn assign_parts(self) -> Option<(&'static str, SQL)> {
        self.into_inner().and_then(AssignItem::assign_parts)
    }
}

/// A `Cons` list of assignments to columns of table `T`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` assigns columns that do not belong to `{T}`",
    label = "assignment to a foreign column"
)]
pub trait AssignList<T>: TypeSet {
    /// Tables read by the values.
    type Tables: TypeSet;
    type Subqueries: SubqueryList;

    /// Every assigned column.
    const NAMES: NameSet;
    /// Columns assigned unconditionally.
    const STATIC_NAMES: NameSet;
}

impl<T> AssignList<T> for Nil {
    type Tables = Nil;
    type Subqueries = Nil;

    const NAMES: NameSet = NameSet::EMPTY;
    const STATIC_NAMES: NameSet = NameSet::EMPTY;
}

impl<T, A, Rest> AssignList<T> for Cons<A, Rest>
where
    A: AssignItem,
    A::Column: Column<Table = T>,
    Rest: AssignList<T>,
{
    type Tables = Concat<A::Tables, Rest::Tables>;
    type Subqueries = <A::Subqueries as SubqueryList>::Append<Rest::Subqueries>;

    const NAMES: NameSet = NameSet::EMPTY
        .with(<A::Column as Name>::NAME)
        .union(Rest::NAMES);
    const STATIC_NAMES: NameSet = if A::STATIC {
        NameSet::EMPTY
            .with(<A::Column as Name>::NAME)
            .union(Rest::STATIC_NAMES)
    } else {
        Rest::STATIC_NAMES
    };
}

/// The argument of `set` and `do_update`: one assignment or a tuple.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a list of assignments to `{T}`",
    label = "expected `col.assign(value)` or a tuple of assignments"
)]
pub trait Assignments<T> {
    type Items: AssignList<T>;

    /// `(column, value)` pairs of the enabled assignments.
    fn parts(self) -> Vec<(&'static str, SQL)>;
}

impl<T, A> Assignments<T> for A
where
    A: AssignItem,
    A::Column: Column<Table = T>,
{
    type Items = Cons<A, Nil>;

    fn parts(self) -> Vec<(&'static str, SQL)> {
        self.assign_parts().into_iter().collect()
    }
}

macro_rules! impl_assignments {
    ($($T:ident),+; $($idx:tt),+) => {
        impl<Tab, $($T),+> Assignments<Tab> for ($($T,)+)
        where
            $($T: AssignItem, $T::Column: Column<Table = Tab>,)+
        {
            type Items = crate::__type_list!($($T),+);

            fn parts(self) -> Vec<(&'static str, SQL)> {
                [$(self.$idx.assign_parts()),+].into_iter().flatten().collect()
            }
        }
    };
}

with_tuple_sizes!(impl_assignments);

/// Renders `"a" = ?, "b" = ?` from assignment parts.
pub(crate) fn set_list_sql(parts: Vec<(&'static str, SQL)>) -> SQL {
    SQL::join(
        parts
            .into_iter()
            .map(|(name, value)| SQL::ident(name).push(Token::EQ).append(value)),
        Token::COMMA,
    )
}

/// Assigned column names must be unique.
pub(crate) const fn assert_unique_columns(names: NameSet) {
    assert!(
        names.first_duplicate().is_none(),
        "duplicate column names in assignments"
    );
}

/// Values that may not read any table.
#[diagnostic::on_unimplemented(
    message = "insert values must not reference tables",
    label = "this value reads `{Self}`",
    note = "use literals, placeholders or subqueries instead of columns"
)]
pub trait NoTables {}

impl NoTables for Nil {}
