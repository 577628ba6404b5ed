use sqlweave_types::Dialect;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlweaveError {
    /// A named placeholder was rendered without a bound value
    #[error("No value bound for placeholder `{0}`")]
    UnboundPlaceholder(String),

    /// `bind` was called with a name the query does not use
    #[error("Query has no placeholder named `{0}`")]
    UnknownPlaceholder(String),

    /// The statement uses a clause the target dialect cannot express
    #[error("`{feature}` is not supported by {dialect}")]
    Unsupported {
        feature: &'static str,
        dialect: Dialect,
    },

    /// A row had fewer columns than the result type needs
    #[error("Column index {index} out of range for row with {count} columns")]
    ColumnIndex { index: usize, count: usize },

    /// NULL found where the result type does not allow it
    #[error("Unexpected NULL in column {index}")]
    UnexpectedNull { index: usize },

    /// Value of the wrong kind for the Rust target type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Integer value does not fit the Rust target type
    #[error("Value {value} out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },

    /// Text that could not be parsed into the Rust target type
    #[error("Could not parse `{text}` as {target}")]
    Parse { text: String, target: &'static str },

    /// Rusqlite specific errors
    #[cfg(feature = "rusqlite")]
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
}

/// Result type for rendering and decoding
pub type Result<T> = std::result::Result<T, SqlweaveError>;
