mod chunk;
mod tokens;

use std::collections::HashMap;
use std::fmt::{Display, Write};

pub use chunk::*;
use compact_str::CompactString;
use smallvec::SmallVec;
use sqlweave_types::Dialect;
pub use tokens::*;

use crate::error::{Result, SqlweaveError};
use crate::traits::ToSQL;
use crate::value::Value;

/// Named parameter values bound to a query.
pub type Bindings = HashMap<CompactString, Value>;

/// An ordered list of SQL chunks. Rendering to text happens only once the
/// dialect is known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SQL {
    pub chunks: SmallVec<[SQLChunk; 8]>,
}

/// SQL text plus the positional parameters it references, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Display for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, r#"sql: "{}", params: {:?}"#, self.sql, self.params)
    }
}

impl SQL {
    // ==================== constructors ====================

    #[inline]
    pub const fn empty() -> Self {
        Self {
            chunks: SmallVec::new_const(),
        }
    }

    #[inline]
    pub fn token(t: Token) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Token(t)],
        }
    }

    #[inline]
    pub fn ident(name: impl Into<CompactString>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Ident(name.into())],
        }
    }

    /// `"table"."column"`
    #[inline]
    pub fn qualified(table: &str, column: &str) -> Self {
        Self {
            chunks: smallvec::smallvec![
                SQLChunk::Ident(table.into()),
                SQLChunk::Token(Token::DOT),
                SQLChunk::Ident(column.into()),
            ],
        }
    }

    #[inline]
    pub fn raw(text: impl Into<CompactString>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Raw(text.into())],
        }
    }

    #[inline]
    pub fn number(value: i64) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Number(value)],
        }
    }

    #[inline]
    pub fn param(value: impl Into<Value>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Param(value.into())],
        }
    }

    #[inline]
    pub fn placeholder(name: impl Into<CompactString>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Placeholder(name.into())],
        }
    }

    /// `NAME(args)`, parenthesizing a bare subquery argument.
    #[inline]
    pub fn func(name: &'static str, args: SQL) -> Self {
        let args = if args.is_subquery() {
            args.parens()
        } else {
            args
        };
        SQL::from(SQLChunk::raw_static(name))
            .push(Token::LPAREN)
            .append(args)
            .push(Token::RPAREN)
    }

    // ==================== builder methods ====================

    #[inline]
    pub fn append(mut self, other: impl Into<SQL>) -> Self {
        let other = other.into();

        if self.chunks.is_empty() {
            return other;
        }
        if other.chunks.is_empty() {
            return self;
        }

        self.chunks.extend(other.chunks);
        self
    }

    #[inline]
    pub fn append_mut(&mut self, other: impl Into<SQL>) {
        let other = other.into();

        if self.chunks.is_empty() {
            self.chunks = other.chunks;
            return;
        }
        self.chunks.extend(other.chunks);
    }

    #[inline]
    pub fn push(mut self, chunk: impl Into<SQLChunk>) -> Self {
        self.chunks.push(chunk.into());
        self
    }

    #[inline]
    pub fn push_mut(&mut self, chunk: impl Into<SQLChunk>) {
        self.chunks.push(chunk.into());
    }

    // ==================== combinators ====================

    /// Joins the parts with `separator`, skipping empty ones.
    pub fn join<T>(sqls: T, separator: Token) -> SQL
    where
        T: IntoIterator,
        T::Item: Into<SQL>,
    {
        let mut result = SQL::empty();
        for item in sqls {
            let other = item.into();
            if other.is_empty() {
                continue;
            }
            if !result.is_empty() {
                result.chunks.push(SQLChunk::Token(separator));
            }
            result.chunks.extend(other.chunks);
        }
        result
    }

    #[inline]
    pub fn parens(self) -> Self {
        SQL::token(Token::LPAREN).append(self).push(Token::RPAREN)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[inline]
    pub fn is_subquery(&self) -> bool {
        matches!(
            self.chunks.first(),
            Some(SQLChunk::Token(Token::SELECT | Token::WITH))
        )
    }

    /// `self AS "name"`
    pub fn alias(self, name: impl Into<CompactString>) -> SQL {
        self.push(Token::AS).push(SQLChunk::Ident(name.into()))
    }

    // ==================== output methods ====================

    /// Bound positional values in order of appearance.
    pub fn params(&self) -> impl Iterator<Item = &Value> {
        self.chunks.iter().filter_map(|chunk| match chunk {
            SQLChunk::Param(value) => Some(value),
            _ => None,
        })
    }

    /// Names of all placeholders in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().filter_map(|chunk| match chunk {
            SQLChunk::Placeholder(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Renders SQL text for `dialect`, resolving named placeholders from
    /// `bindings`.
    pub fn render(&self, dialect: Dialect, bindings: &Bindings) -> Result<Rendered> {
        let mut buf = String::with_capacity(self.chunks.len().saturating_mul(8).max(64));
        let mut params = Vec::new();

        for (i, chunk) in self.chunks.iter().enumerate() {
            match chunk {
                SQLChunk::Token(token) => {
                    let text = token.for_dialect(dialect).ok_or(SqlweaveError::Unsupported {
                        feature: token.as_str(),
                        dialect,
                    })?;
                    buf.push_str(text);
                }
                SQLChunk::Ident(name) => write_ident(&mut buf, dialect, name),
                SQLChunk::Raw(text) => buf.push_str(text),
                SQLChunk::Number(n) => {
                    let _ = write!(buf, "{n}");
                }
                SQLChunk::Param(value) => {
                    params.push(value.clone());
                    buf.push_str(&dialect.render_placeholder(params.len()));
                }
                SQLChunk::Placeholder(name) => {
                    let value = bindings
                        .get(name)
                        .ok_or_else(|| SqlweaveError::UnboundPlaceholder(name.to_string()))?;
                    params.push(value.clone());
                    buf.push_str(&dialect.render_placeholder(params.len()));
                }
            }

            if self.needs_space(i) {
                buf.push(' ');
            }
        }

        Ok(Rendered { sql: buf, params })
    }

    /// SQLite-flavored text for debugging. Named placeholders show as
    /// `:name` and nothing is rejected.
    pub fn sql(&self) -> String {
        let mut buf = String::with_capacity(self.chunks.len().saturating_mul(8).max(64));
        for (i, chunk) in self.chunks.iter().enumerate() {
            match chunk {
                SQLChunk::Token(token) => buf.push_str(token.as_str()),
                SQLChunk::Ident(name) => write_ident(&mut buf, Dialect::SQLite, name),
                SQLChunk::Raw(text) => buf.push_str(text),
                SQLChunk::Number(n) => {
                    let _ = write!(buf, "{n}");
                }
                SQLChunk::Param(_) => buf.push('?'),
                SQLChunk::Placeholder(name) => {
                    buf.push(':');
                    buf.push_str(name);
                }
            }

            if self.needs_space(i) {
                buf.push(' ');
            }
        }
        buf
    }

    fn needs_space(&self, index: usize) -> bool {
        let Some(next) = self.chunks.get(index + 1) else {
            return false;
        };

        let current = &self.chunks[index];
        chunk_needs_space(current, next)
    }
}

fn write_ident(buf: &mut String, dialect: Dialect, name: &str) {
    let quote = dialect.quote_char();
    buf.push(quote);
    for c in name.chars() {
        if c == quote {
            buf.push(quote);
        }
        buf.push(c);
    }
    buf.push(quote);
}

// ==================== trait implementations ====================

impl From<Token> for SQL {
    fn from(value: Token) -> Self {
        SQL::token(value)
    }
}

impl From<SQLChunk> for SQL {
    fn from(value: SQLChunk) -> Self {
        Self {
            chunks: smallvec::smallvec![value],
        }
    }
}

impl Display for SQL {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<_> = self.params().collect();
        write!(f, r#"sql: "{}", params: {:?}"#, self.sql(), params)
    }
}

impl ToSQL for SQL {
    fn to_sql(&self) -> SQL {
        self.clone()
    }

    fn into_sql(self) -> SQL {
        self
    }
}

impl<T> FromIterator<T> for SQL
where
    SQLChunk: From<T>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let chunks = SmallVec::from_iter(iter.into_iter().map(SQLChunk::from));
        Self { chunks }
    }
}

impl IntoIterator for SQL {
    type Item = SQLChunk;
    type IntoIter = smallvec::IntoIter<[SQLChunk; 8]>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}
