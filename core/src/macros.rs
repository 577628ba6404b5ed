//! Declaration macros for tables and name tags.

/// Declares zero-sized name tags for aliases, CTEs and derived tables.
///
/// ```
/// use sqlweave_core::name_tag;
/// use sqlweave_core::traits::Name;
///
/// name_tag! {
///     /// Number of posts per author.
///     pub struct PostCount = "post_count";
///     struct Recent = "recent";
/// }
///
/// assert_eq!(PostCount::NAME, "post_count");
/// assert_eq!(Recent::NAME, "recent");
/// ```
#[macro_export]
macro_rules! name_tag {
    ($($(#[$meta:meta])* $vis:vis struct $name:ident = $sql:literal;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default)]
            $vis struct $name;

            impl $crate::traits::Name for $name {
                const NAME: &'static str = $sql;
            }
        )*
    };
}

/// Declares a table.
///
/// Generates the table struct with one public field per column, a module
/// named after the table (in snake case) holding one zero-sized type per
/// column, and every trait the builders need. Column types get the table's
/// visibility, so private tables work in tests and function bodies.
///
/// Column types are SQL type markers, optionally wrapped in
/// [`Nullable`](crate::traits::Nullable). Flags in brackets mark columns
/// with a database default (`default`) and primary keys (`primary_key`).
/// A name written as `("schema"."table")` puts the table in a schema.
///
/// ```
/// use sqlweave_core::table;
/// use sqlweave_core::traits::{Nullable, Table};
/// use sqlweave_core::types::{Int, Text};
///
/// table! {
///     /// Blog posts.
///     pub struct Post("post") {
///         id: Int [primary_key, default],
///         title: Text,
///         body: Nullable<Text>,
///     }
/// }
///
/// table! {
///     struct Archived("archive"."post") {
///         id: Int [primary_key],
///     }
/// }
///
/// assert_eq!(Post::NAME, "post");
/// assert_eq!(Post::COLUMNS.len(), 3);
/// assert!(Post::COLUMNS[1].is_required());
/// assert!(!Post::COLUMNS[0].is_required());
/// assert!(Post::COLUMNS[2].nullable);
/// assert_eq!(Archived::SCHEMA, Some("archive"));
/// let _title: post::title = Post::default().title;
/// ```
#[macro_export]
macro_rules! table {
    ($(#[$meta:meta])* pub struct $($rest:tt)*) => {
        $crate::__table!([pub] [pub] $(#[$meta])* $($rest)*);
    };
    ($(#[$meta:meta])* pub(crate) struct $($rest:tt)*) => {
        $crate::__table!([pub(crate)] [pub(crate)] $(#[$meta])* $($rest)*);
    };
    ($(#[$meta:meta])* pub(super) struct $($rest:tt)*) => {
        $crate::__table!([pub(super)] [pub(in super::super)] $(#[$meta])* $($rest)*);
    };
    ($(#[$meta:meta])* struct $($rest:tt)*) => {
        $crate::__table!([] [pub(super)] $(#[$meta])* $($rest)*);
    };
}

/// Body of [`table!`] once the visibility of the column types is known.
#[doc(hidden)]
#[macro_export]
macro_rules! __table {
    (
        [$($vis:tt)*] [$col_vis:vis]
        $(#[$meta:meta])*
        $name:ident($($names:tt)+) {
            $(
                $(#[$col_meta:meta])*
                $col:ident : $ty:ty $([$($flag:ident),* $(,)?])?
            ),* $(,)?
        }
    ) => {
        $crate::prelude::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default)]
            $($vis)* struct $name {
                $(
                    $(#[$col_meta])*
                    pub $col: [<$name:snake>]::$col,
                )*
            }

            #[doc = "Columns of [`" $name "`]."]
            #[allow(non_camel_case_types)]
            $($vis)* mod [<$name:snake>] {
                $(
                    #[doc = "Column `" $col "`."]
                    #[derive(Debug, Clone, Copy, Default)]
                    $col_vis struct $col;
                )*
            }

            impl $crate::traits::ScopeTable for $name {
                const SCOPE_NAME: &'static str = $crate::__table_name!(name; $($names)+);

                type Outer = $crate::traits::Outer<$name>;
            }

            impl $crate::traits::Table for $name {
                const NAME: &'static str = $crate::__table_name!(name; $($names)+);
                const SCHEMA: ::core::option::Option<&'static str> =
                    $crate::__table_name!(schema; $($names)+);
                const COLUMNS: &'static [$crate::traits::ColumnInfo] = &[
                    $(
                        $crate::traits::ColumnInfo {
                            name: stringify!($col),
                            sql_type: <<$ty as $crate::traits::ColumnType>::SQLType
                                as $crate::types::DataType>::SQL_NAME,
                            nullable: <<$ty as $crate::traits::ColumnType>::Nullable
                                as $crate::expr::Nullability>::NULLABLE,
                            has_default: $crate::schema::__has_flag(
                                &[$($(stringify!($flag)),*)?],
                                "default",
                            ),
                            primary_key: $crate::schema::__has_flag(
                                &[$($(stringify!($flag)),*)?],
                                "primary_key",
                            ),
                        },
                    )*
                ];

                type AllColumns = ($([<$name:snake>]::$col,)*);

                fn all_columns(&self) -> Self::AllColumns {
                    ($(self.$col,)*)
                }
            }

            impl $crate::from::FromItem for $name {
                type Provided = $crate::Cons<$name, $crate::Nil>;
                type Ctes = $crate::Nil;
                type Subqueries = $crate::Nil;

                fn from_sql(self) -> $crate::sql::SQL {
                    $crate::schema::table_target::<$name>()
                }
            }

            $(
                $crate::__table_column!(
                    $name,
                    [<$name:snake>],
                    $col,
                    $ty,
                    [$($($flag),*)?]
                );
            )*
        }
    };
}

/// Table name or schema from `"table"` / `"schema"."table"`.
#[doc(hidden)]
#[macro_export]
macro_rules! __table_name {
    (name; $schema:literal . $name:literal) => {
        $name
    };
    (name; $name:literal) => {
        $name
    };
    (schema; $schema:literal . $name:literal) => {
        ::core::option::Option::Some($schema)
    };
    (schema; $name:literal) => {
        ::core::option::Option::None
    };
}

/// Trait impls for one column declared by [`table!`].
#[doc(hidden)]
#[macro_export]
macro_rules! __table_column {
    ($table:ident, $module:ident, $col:ident, $ty:ty, [$($flag:ident),*]) => {
        impl $crate::traits::Name for $module::$col {
            const NAME: &'static str = stringify!($col);
        }

        impl $crate::traits::ToSQL for $module::$col {
            fn to_sql(&self) -> $crate::sql::SQL {
                $crate::sql::SQL::qualified(
                    <$table as $crate::traits::Table>::NAME,
                    stringify!($col),
                )
            }
        }

        impl $crate::expr::Expr for $module::$col {
            type SQLType = <$ty as $crate::traits::ColumnType>::SQLType;
            type Nullable = <$ty as $crate::traits::ColumnType>::Nullable;
            type Aggregate = $crate::expr::Scalar;
            type Tables = $crate::Cons<$table, $crate::Nil>;
            type Ungrouped = $crate::Cons<Self, $crate::Nil>;
            type Subqueries = $crate::Nil;
        }

        impl $crate::traits::ScopedColumn for $module::$col {
            type Scope = $table;
        }

        impl $crate::traits::Column for $module::$col {
            type Table = $table;

            const HAS_DEFAULT: bool = $crate::schema::__has_flag(&[$(stringify!($flag)),*], "default");
            const PRIMARY_KEY: bool =
                $crate::schema::__has_flag(&[$(stringify!($flag)),*], "primary_key");
        }

        impl $crate::builder::SelectItem for $module::$col {
            type Tag = Self;
            type Expr = Self;
            type Dynamic = $crate::expr::NonNull;

            fn item_sql(self) -> $crate::sql::SQL {
                $crate::traits::ToSQL::into_sql(self)
            }
        }

        $crate::__expr_ops!([] $module::$col);
    };
}

#[cfg(test)]
mod tests {
    use crate::ToSQL;
    use crate::traits::{Column, Name, Nullable, Table};
    use crate::types::{Int, Text};

    table! {
        struct Account("account") {
            id: Int [primary_key, default],
            email: Text,
            nickname: Nullable<Text>,
        }
    }

    table! {
        pub(crate) struct Ledger("audit"."ledger") {
            id: Int [primary_key],
        }
    }

    mod nested {
        use crate::types::Int;

        table! {
            pub(super) struct Entry("entry") {
                id: Int,
            }
        }
    }

    name_tag!(struct Owner = "owner";);

    #[test]
    fn table_metadata() {
        assert_eq!(Account::NAME, "account");
        let names: Vec<_> = Account::COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(names, ["id", "email", "nickname"]);
        assert_eq!(Account::COLUMNS[0].sql_type, "INTEGER");
        assert!(Account::COLUMNS[0].primary_key);
        assert!(Account::COLUMNS[2].nullable);
    }

    #[test]
    fn column_metadata() {
        assert!(<account::id as Column>::HAS_DEFAULT);
        assert!(<account::id as Column>::PRIMARY_KEY);
        assert!(!<account::email as Column>::HAS_DEFAULT);
        assert_eq!(<account::nickname as Name>::NAME, "nickname");
        assert_eq!(Owner::NAME, "owner");
    }

    #[test]
    fn columns_render_qualified() {
        let account = Account::default();
        assert_eq!(account.email.to_sql().sql(), r#""account"."email""#);
        assert_eq!(crate::schema::all_of(account).2.to_sql().sql(), r#""account"."nickname""#);
    }

    #[test]
    fn schema_qualifies_targets_not_columns() {
        use crate::from::FromItem;

        let ledger = Ledger::default();
        assert_eq!(Ledger::SCHEMA, Some("audit"));
        assert_eq!(Account::SCHEMA, None);
        assert_eq!(ledger.from_sql().sql(), r#""audit"."ledger""#);
        assert_eq!(ledger.id.to_sql().sql(), r#""ledger"."id""#);
    }

    #[test]
    fn restricted_visibility_tables() {
        let entry = nested::Entry::default();
        let _: nested::entry::id = entry.id;
        assert_eq!(entry.id.to_sql().sql(), r#""entry"."id""#);
    }
}
