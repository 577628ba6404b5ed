//! Statement builders.
//!
//! Each builder moves through typestate markers; a clause is only callable
//! in the states where SQL allows it, and `build()` only in executable
//! states. The rules of every clause are trait bounds on the call that adds
//! it, so a misplaced column fails right where it is written.

mod assign;
mod cte;
mod delete;
mod insert;
mod items;
mod select;
mod update;

pub use assign::*;
pub use cte::*;
pub use delete::*;
pub use insert::*;
pub use items::*;
pub use select::*;
pub use update::*;

use crate::expr::{Condition, Expr, NonAggregate, SubqueryList};
use crate::query::{Resolve, ResolveRow};
use crate::sql::{SQL, Token};
use crate::traits::{Nil, SubsetOf};

/// A builder state from which `build()` may be called.
#[diagnostic::on_unimplemented(
    message = "calling where() or unconditionally() required",
    label = "`{Self}` is not a complete statement",
    note = "SELECT with FROM, UPDATE and DELETE need where_() or unconditionally(); INSERT needs set(), default_values() or values()"
)]
pub trait ExecutableState {}

/// Tables read by condition `C`.
pub type ConditionTables<C> = <<C as Condition>::Expr as Expr>::Tables;

/// `Subs` plus the subqueries embedded in condition `C`.
pub type WithConditionSubqueries<C, Subs> =
    <<<C as Condition>::Expr as Expr>::Subqueries as SubqueryList>::Append<Subs>;

/// Appends `token body` to `sql` unless `body` is empty.
pub(crate) fn push_clause(sql: &mut SQL, token: Token, body: SQL) {
    if !body.is_empty() {
        sql.push_mut(token);
        sql.append_mut(body);
    }
}

/// A RETURNING list resolved against the statement's tables `P`.
///
/// Same shape as a select list; items may only read `P` and may not
/// aggregate or embed subqueries.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned here",
    label = "RETURNING may only use columns of the modified tables",
    note = "aggregates and subqueries are not allowed in RETURNING"
)]
pub trait ReturningList<P, Is, Rs>: SelectList {
    fn returning_sql(self) -> SQL;
}

impl<L, P, Is, Rs> ReturningList<P, Is, Rs> for L
where
    L: SelectList,
    L::Items: ItemList<Subqueries = Nil> + ResolveRow<P, Rs>,
    <L::Items as ItemList>::Tables: SubsetOf<P, Is>,
    <L::Items as ItemList>::Aggregate: NonAggregate,
{
    fn returning_sql(self) -> SQL {
        const { assert_unique_names(<L::Items as ItemList>::NAMES) };
        self.list_sql()
    }
}

/// Resolved row of RETURNING list `L` over tables `P`.
pub type Returning<L, P, Rs> = Resolve<<L as SelectList>::Items, P, Rs>;
