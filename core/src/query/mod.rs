//! Built statements.
//!
//! A [`Query`] is the finished form of every builder. It knows its result
//! row type and the CTEs it still needs; only a query that needs none can
//! be rendered.

mod kind;
mod resolve;
mod union;

pub use kind::*;
pub use resolve::*;

use core::fmt;
use core::marker::PhantomData;

use compact_str::CompactString;
use sqlweave_types::Dialect;

use crate::error::{Result, SqlweaveError};
use crate::expr::SubqueryStatement;
use crate::from::DerivedTable;
use crate::row::{FromRow, RowSource};
use crate::sql::{Bindings, Rendered, SQL, SQLChunk};
use crate::tracing::{sqlweave_trace_bind, sqlweave_trace_decode, sqlweave_trace_render};
use crate::traits::{Name, Nil, ToSQL, TypeSet};
use crate::value::Value;

/// A complete statement.
///
/// - `Res`: the [`ResolvedList`] describing result rows (`Nil` for
///   statements without RETURNING)
/// - `Ctes`: CTE references not yet declared by a WITH clause
/// - `K`: the [`StatementKind`], deciding where the query may be embedded
///
/// ```compile_fail,E0599
/// use sqlweave_core::builder::{cte, select};
/// use sqlweave_core::expr::{ExprExt, value};
/// use sqlweave_core::name_tag;
/// use sqlweave_core::types::Dialect;
///
/// name_tag!(struct One = "one"; struct Ones = "ones";);
///
/// let ones = cte(Ones).as_(select(value(1).as_(One)).build());
/// let query = select(ones.col(One)).from(ones.table()).unconditionally().build();
/// // `ones` is never declared with `with(...)`
/// let _ = query.render(Dialect::SQLite);
/// ```
pub struct Query<Res, Ctes = Nil, K = Select> {
    sql: SQL,
    bindings: Bindings,
    _rows: PhantomData<fn() -> (Res, Ctes, K)>,
}

impl<Res, Ctes, K> Query<Res, Ctes, K> {
    pub(crate) fn new(sql: SQL) -> Self {
        Self::with_bindings(sql, Bindings::new())
    }

    pub(crate) fn with_bindings(sql: SQL, bindings: Bindings) -> Self {
        Self {
            sql,
            bindings,
            _rows: PhantomData,
        }
    }

    pub(crate) fn into_parts(self) -> (SQL, Bindings) {
        (self.sql, self.bindings)
    }

    /// The statement as SQL chunks, placeholders unresolved.
    pub fn as_sql(&self) -> &SQL {
        &self.sql
    }

    /// Binds a value to the named placeholder `name`.
    ///
    /// Binding the same name twice keeps the last value.
    pub fn bind(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        if !self.sql.placeholders().any(|p| p == name) {
            return Err(SqlweaveError::UnknownPlaceholder(name.to_string()));
        }
        sqlweave_trace_bind!(name);
        self.bindings.insert(CompactString::from(name), value.into());
        Ok(self)
    }

    /// Uses the query as a FROM item named `N`.
    pub fn as_<N: Name>(self, _name: N) -> DerivedTable<N, Res, Ctes>
    where
        K: RowStatement,
    {
        DerivedTable::new(self.into_sql())
    }
}

impl<Res, Ctes, K> Query<Res, Ctes, K>
where
    Res: ResolvedList,
{
    /// Decodes one result row.
    pub fn decode<R>(&self, row: &R) -> Result<RowOf<Res>>
    where
        R: RowSource + ?Sized,
        Res::Values: IntoTuple,
        RowOf<Res>: FromRow,
    {
        sqlweave_trace_decode!(<RowOf<Res> as FromRow>::COLUMN_COUNT);
        <RowOf<Res> as FromRow>::from_row(row)
    }

    /// Result column names, in order.
    pub fn column_names(&self) -> Vec<&'static str> {
        Res::NAMES.iter().collect()
    }
}

impl<Res, K> Query<Res, Nil, K> {
    /// Renders SQL text and positional parameters for `dialect`.
    ///
    /// Fails if a placeholder is unbound or a clause has no spelling in
    /// `dialect`.
    pub fn render(&self, dialect: Dialect) -> Result<Rendered> {
        let rendered = self.sql.render(dialect, &self.bindings)?;
        sqlweave_trace_render!(&rendered.sql, rendered.params.len(), dialect);
        Ok(rendered)
    }
}

impl<Res, Ctes, K> ToSQL for Query<Res, Ctes, K> {
    /// Bound placeholders are replaced by their values, so the statement
    /// keeps them when embedded in another one.
    fn to_sql(&self) -> SQL {
        if self.bindings.is_empty() {
            return self.sql.clone();
        }
        self.sql
            .chunks
            .iter()
            .map(|chunk| match chunk {
                SQLChunk::Placeholder(name) => match self.bindings.get(name) {
                    Some(value) => SQLChunk::Param(value.clone()),
                    None => chunk.clone(),
                },
                other => other.clone(),
            })
            .collect()
    }
}

impl<Res, Ctes, K> SubqueryStatement for Query<Res, Ctes, K>
where
    Res: ResolvedList,
    Ctes: TypeSet,
    K: RowStatement,
{
    type Columns = Res::Columns;
    type Required = Nil;
    type Provided = Nil;
    type Ctes = Ctes;
    type Subqueries = Nil;
}

impl<Res, Ctes, K> Clone for Query<Res, Ctes, K> {
    fn clone(&self) -> Self {
        Self::with_bindings(self.sql.clone(), self.bindings.clone())
    }
}

impl<Res, Ctes, K> fmt::Debug for Query<Res, Ctes, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("sql", &self.sql.sql())
            .field("bindings", &self.bindings)
            .finish()
    }
}

impl<Res, Ctes, K> fmt::Display for Query<Res, Ctes, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql.sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{ExprExt, placeholder, value};
    use crate::name_tag;
    use crate::types::Int;
    use crate::builder::select;

    name_tag!(struct Limit = "limit";);

    #[test]
    fn bind_resolves_placeholders() {
        let query = select(placeholder::<Int>("max").as_(Limit)).build();
        assert!(matches!(
            query.render(Dialect::SQLite),
            Err(SqlweaveError::UnboundPlaceholder(name)) if name == "max"
        ));

        let query = query.bind("max", 10).unwrap();
        let rendered = query.render(Dialect::PostgreSQL).unwrap();
        assert_eq!(rendered.sql, r#"SELECT $1 AS "limit""#);
        assert_eq!(rendered.params, [Value::Integer(10)]);
    }

    #[test]
    fn bind_rejects_unknown_names() {
        let query = select(value(1).as_(Limit)).build();
        assert!(matches!(
            query.bind("nope", 1),
            Err(SqlweaveError::UnknownPlaceholder(name)) if name == "nope"
        ));
    }

    #[test]
    fn embedding_keeps_bound_values() {
        let query = select(placeholder::<Int>("max").as_(Limit)).build().bind("max", 3).unwrap();
        let sql = query.to_sql();
        assert_eq!(sql.params().collect::<Vec<_>>(), [&Value::Integer(3)]);
        assert_eq!(sql.placeholders().count(), 0);
    }

    #[test]
    fn decode_reads_result_rows() {
        let query = select(value(1).as_(Limit)).build();
        let row = vec![Value::Integer(7)];
        let (limit,) = query.decode(&row).unwrap();
        assert_eq!(limit, 7i32);
        assert_eq!(query.column_names(), ["limit"]);
    }
}
