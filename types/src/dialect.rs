//! Database dialect enum
//!
//! The dialect is the only piece of runtime configuration a query needs: it
//! decides identifier quoting, placeholder syntax and which vendor clauses
//! can be rendered at all.

use alloc::borrow::Cow;
use alloc::format;

/// SQL dialect for database-specific rendering
///
/// # Examples
///
/// ```
/// use sqlweave_types::Dialect;
///
/// let dialect = Dialect::PostgreSQL;
/// assert!(dialect.uses_numbered_placeholders());
///
/// let sqlite = Dialect::SQLite;
/// assert!(!sqlite.uses_numbered_placeholders());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Dialect {
    /// SQLite - uses `?` positional placeholders
    #[default]
    SQLite,

    /// PostgreSQL - uses `$1, $2, ...` numbered placeholders
    PostgreSQL,

    /// MySQL - uses `?` positional placeholders and backtick quoting
    MySQL,
}

impl Dialect {
    /// Returns `true` if this dialect uses numbered placeholders (`$1, $2, ...`)
    #[inline]
    #[must_use]
    pub const fn uses_numbered_placeholders(&self) -> bool {
        matches!(self, Dialect::PostgreSQL)
    }

    /// Renders the placeholder for the parameter at `index` (1-based).
    ///
    /// ```
    /// use sqlweave_types::Dialect;
    ///
    /// assert_eq!(Dialect::PostgreSQL.render_placeholder(3), "$3");
    /// assert_eq!(Dialect::SQLite.render_placeholder(3), "?");
    /// ```
    #[must_use]
    pub fn render_placeholder(&self, index: usize) -> Cow<'static, str> {
        if self.uses_numbered_placeholders() {
            Cow::Owned(format!("${index}"))
        } else {
            Cow::Borrowed("?")
        }
    }

    /// Character used to quote identifiers.
    #[inline]
    #[must_use]
    pub const fn quote_char(&self) -> char {
        match self {
            Dialect::MySQL => '`',
            Dialect::SQLite | Dialect::PostgreSQL => '"',
        }
    }

    /// `INSERT ... RETURNING` / `UPDATE ... RETURNING` support.
    #[inline]
    #[must_use]
    pub const fn supports_returning(&self) -> bool {
        !matches!(self, Dialect::MySQL)
    }

    /// `FULL OUTER JOIN` support.
    #[inline]
    #[must_use]
    pub const fn supports_full_outer_join(&self) -> bool {
        !matches!(self, Dialect::MySQL)
    }

    /// Parse a dialect from a string (case-insensitive)
    ///
    /// Supports various common aliases:
    /// - SQLite: `"sqlite"`, `"sqlite3"`
    /// - PostgreSQL: `"postgresql"`, `"postgres"`, `"pg"`
    /// - MySQL: `"mysql"`, `"mariadb"`
    ///
    /// ```
    /// use sqlweave_types::Dialect;
    ///
    /// assert_eq!(Dialect::parse("sqlite"), Some(Dialect::SQLite));
    /// assert_eq!(Dialect::parse("pg"), Some(Dialect::PostgreSQL));
    /// assert_eq!(Dialect::parse("unknown"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("sqlite") || s.eq_ignore_ascii_case("sqlite3") {
            Some(Dialect::SQLite)
        } else if s.eq_ignore_ascii_case("postgresql")
            || s.eq_ignore_ascii_case("postgres")
            || s.eq_ignore_ascii_case("pg")
        {
            Some(Dialect::PostgreSQL)
        } else if s.eq_ignore_ascii_case("mysql") || s.eq_ignore_ascii_case("mariadb") {
            Some(Dialect::MySQL)
        } else {
            None
        }
    }

    /// Get the dialect name as a lowercase string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dialect::SQLite => "sqlite",
            Dialect::PostgreSQL => "postgresql",
            Dialect::MySQL => "mysql",
        }
    }
}

impl core::fmt::Display for Dialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::parse(s).ok_or_else(|| DialectParseError(s.into()))
    }
}

/// Error returned when parsing an unknown dialect string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect `{0}`")]
pub struct DialectParseError(pub alloc::string::String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_parse() {
        assert_eq!(Dialect::parse("sqlite"), Some(Dialect::SQLite));
        assert_eq!(Dialect::parse("SQLite3"), Some(Dialect::SQLite));
        assert_eq!(Dialect::parse("postgres"), Some(Dialect::PostgreSQL));
        assert_eq!(Dialect::parse("PG"), Some(Dialect::PostgreSQL));
        assert_eq!(Dialect::parse("MariaDB"), Some(Dialect::MySQL));
        assert_eq!(Dialect::parse(""), None);
    }

    #[test]
    fn test_dialect_from_str_error() {
        let err = "oracle".parse::<Dialect>().unwrap_err();
        assert_eq!(err.to_string(), "unknown dialect `oracle`");
        assert_eq!("mysql".parse::<Dialect>(), Ok(Dialect::MySQL));
    }

    #[test]
    fn test_dialect_placeholders() {
        assert_eq!(Dialect::SQLite.render_placeholder(1), "?");
        assert_eq!(Dialect::PostgreSQL.render_placeholder(12), "$12");
        assert_eq!(Dialect::MySQL.render_placeholder(2), "?");
    }

    #[test]
    fn test_dialect_quoting_and_features() {
        assert_eq!(Dialect::MySQL.quote_char(), '`');
        assert_eq!(Dialect::PostgreSQL.quote_char(), '"');
        assert!(!Dialect::MySQL.supports_returning());
        assert!(Dialect::SQLite.supports_full_outer_join());
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(format!("{}", Dialect::SQLite), "sqlite");
        assert_eq!(format!("{}", Dialect::PostgreSQL), "postgresql");
        assert_eq!(format!("{}", Dialect::MySQL), "mysql");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_dialect_serde() {
        let json = serde_json::to_string(&Dialect::PostgreSQL).unwrap();
        assert_eq!(json, "\"postgresql\"");
        let back: Dialect = serde_json::from_str("\"mysql\"").unwrap();
        assert_eq!(back, Dialect::MySQL);
    }
}
