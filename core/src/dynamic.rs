//! Clause parts that are switched on or off at runtime.
//!
//! `dynamic(cond, x)` keeps the type-level effect of `x` whether or not it
//! is enabled, so the statement is checked once for both cases. What a
//! disabled part renders as depends on where it is used:
//!
//! | position                     | disabled renders as        |
//! |------------------------------|----------------------------|
//! | select item                  | `NULL AS "name"`           |
//! | operand of `and`/`or`        | left out of the chain      |
//! | both operands of `and`/`or`  | `TRUE` / `FALSE`           |
//! | `where_`/`having` condition  | no WHERE/HAVING clause     |
//! | sort item                    | left out of ORDER BY       |
//! | assignment                   | left out of SET            |
//!
//! A dynamic select item is always nullable in the result row.

/// A value that only takes part in the statement when enabled.
#[derive(Debug, Clone, Copy)]
pub struct Dynamic<T> {
    inner: Option<T>,
}

impl<T> Dynamic<T> {
    /// Whether the part is rendered.
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// The wrapped value, if enabled.
    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    pub fn into_inner(self) -> Option<T> {
        self.inner
    }
}

/// Wraps `value` so that it only takes part in the statement when `enabled`.
///
/// ```
/// use sqlweave_core::dynamic::dynamic;
/// use sqlweave_core::expr::{and, gt};
/// use sqlweave_core::ToSQL;
///
/// let only_adults = false;
/// let cond = and(gt(2, 1), dynamic(only_adults, gt(30, 18)));
/// assert_eq!(cond.to_sql().sql(), "? > ?");
/// ```
pub fn dynamic<T>(enabled: bool, value: T) -> Dynamic<T> {
    Dynamic {
        inner: enabled.then_some(value),
    }
}
