//! # sqlweave
//!
//! A SQL query builder that checks statements in the type system.
//!
//! ```rust
//! use sqlweave::prelude::*;
//!
//! table! {
//!     pub struct Author("author") {
//!         id: Int [primary_key, default],
//!         name: Text,
//!     }
//! }
//!
//! table! {
//!     pub struct Book("book") {
//!         id: Int [primary_key, default],
//!         author_id: Int,
//!         title: Text,
//!         subtitle: Nullable<Text>,
//!     }
//! }
//!
//! name_tag!(struct BookCount = "book_count";);
//!
//! # fn main() -> sqlweave::Result<()> {
//! let (author, book) = (Author::default(), Book::default());
//!
//! let query = select((author.name, count(book.id).as_(BookCount)))
//!     .from(author.left_join(book).on(book.author_id.eq(author.id)))
//!     .unconditionally()
//!     .group_by(author.name)
//!     .build();
//!
//! let rendered = query.render(Dialect::PostgreSQL)?;
//! assert_eq!(
//!     rendered.sql,
//!     r#"SELECT "author"."name", COUNT("book"."id") AS "book_count" FROM "author" LEFT JOIN "book" ON "book"."author_id" = "author"."id" GROUP BY "author"."name""#
//! );
//!
//! // rows decode into (String, i64)
//! let (name, books) = query.decode(&vec![Value::from("Le Guin"), Value::from(7i64)])?;
//! assert_eq!((name.as_str(), books), ("Le Guin", 7));
//! # Ok(())
//! # }
//! ```
//!
//! ## Dialects
//!
//! | Dialect    | Placeholders | Quoting | Extras behind features           |
//! |------------|--------------|---------|----------------------------------|
//! | SQLite     | `?`          | `"x"`   | `sqlite`: INSERT OR REPLACE/IGNORE |
//! | PostgreSQL | `$1`         | `"x"`   | `postgres`: RETURNING, ON CONFLICT |
//! | MySQL      | `?`          | `` `x` `` |                                |
//!
//! ## Features
//!
//! - `sqlite`, `postgres`: dialect-specific statement extras (default)
//! - `chrono`: `Date`, `Time` and `Timestamp` decode to chrono types
//! - `rusqlite`: values bind to and rows decode from rusqlite
//! - `serde`: serialization of [`Dialect`](types::Dialect)
//! - `tracing`: debug events for rendering, binding and decoding

pub use sqlweave_core::*;

#[cfg(feature = "rusqlite")]
pub use rusqlite;

/// Everything needed to declare tables and write statements.
pub mod prelude {
    pub use sqlweave_core::prelude::*;
}
