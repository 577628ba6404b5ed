use compact_str::CompactString;

use crate::sql::tokens::Token;
use crate::value::Value;

/// A SQL chunk represents a part of an SQL statement.
///
/// - `Token` - SQL keywords and operators (SELECT, FROM, =, etc.)
/// - `Ident` - Quoted identifiers ("table_name", "column_name")
/// - `Raw` - Unquoted raw SQL text (function names)
/// - `Number` - Inline integer literal (LIMIT 10)
/// - `Param` - Bound value, rendered as a placeholder
/// - `Placeholder` - Named parameter bound later on the query
#[derive(Debug, Clone, PartialEq)]
pub enum SQLChunk {
    /// SQL keywords and operators: SELECT, FROM, WHERE, =, AND, etc.
    Token(Token),

    /// Quoted identifier for table names, column names and aliases.
    Ident(CompactString),

    /// Raw SQL text (unquoted), e.g. function names like COUNT.
    Raw(CompactString),

    /// Integer literal rendered inline.
    Number(i64),

    /// Value bound as a positional parameter.
    Param(Value),

    /// Named parameter, resolved from the query bindings at render time.
    Placeholder(CompactString),
}

impl SQLChunk {
    /// Creates raw SQL text from a static string - const
    #[inline]
    pub const fn raw_static(text: &'static str) -> Self {
        Self::Raw(CompactString::const_new(text))
    }

    /// Creates a quoted identifier from a static string - const
    #[inline]
    pub const fn ident_static(name: &'static str) -> Self {
        Self::Ident(CompactString::const_new(name))
    }

    /// Check if this chunk is "word-like" (needs space separation from other word-like chunks)
    #[inline]
    pub(crate) const fn is_word_like(&self) -> bool {
        match self {
            SQLChunk::Token(t) => !matches!(
                t,
                Token::LPAREN
                    | Token::RPAREN
                    | Token::COMMA
                    | Token::DOT
                    | Token::EQ
                    | Token::NE
                    | Token::LT
                    | Token::GT
                    | Token::LE
                    | Token::GE
            ),
            SQLChunk::Ident(_)
            | SQLChunk::Raw(_)
            | SQLChunk::Number(_)
            | SQLChunk::Param(_)
            | SQLChunk::Placeholder(_) => true,
        }
    }
}

impl From<Token> for SQLChunk {
    #[inline]
    fn from(value: Token) -> Self {
        Self::Token(value)
    }
}

impl From<Value> for SQLChunk {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Param(value)
    }
}

pub(crate) fn chunk_needs_space(current: &SQLChunk, next: &SQLChunk) -> bool {
    match (current, next) {
        // Function call: COUNT(
        (SQLChunk::Raw(_), SQLChunk::Token(Token::LPAREN)) => false,
        // No space before closing/separator punctuation
        (_, SQLChunk::Token(Token::RPAREN | Token::COMMA | Token::DOT)) => false,
        // No space after opening punctuation
        (SQLChunk::Token(Token::LPAREN | Token::DOT), _) => false,
        // Space after comma
        (SQLChunk::Token(Token::COMMA), _) => true,
        // Space after closing paren if next is word-like (e.g., ") FROM")
        (SQLChunk::Token(Token::RPAREN), next) => next.is_word_like() || is_operator(next),
        // Space before opening paren if preceded by word-like (e.g., "AS (")
        (current, SQLChunk::Token(Token::LPAREN)) => current.is_word_like() || is_operator(current),
        // Space around comparison/arithmetic operators
        (SQLChunk::Token(t), _) if t.is_operator() => true,
        (_, SQLChunk::Token(t)) if t.is_operator() => true,
        // Space between all word-like chunks
        _ => current.is_word_like() && next.is_word_like(),
    }
}

#[inline]
fn is_operator(chunk: &SQLChunk) -> bool {
    matches!(chunk, SQLChunk::Token(t) if t.is_operator())
}
