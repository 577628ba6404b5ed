//! What statement a [`Query`](super::Query) holds.
//!
//! The kind decides where a built query may be embedded: only row-producing
//! statements become subqueries, derived tables or CTE bodies, and only a
//! plain SELECT may be an operand of a UNION.

/// Kind of a built statement.
pub trait StatementKind: 'static {
    /// The kind once a WITH clause is put in front.
    type WithPrefixed: StatementKind;
}

/// A SELECT without ORDER BY, LIMIT or OFFSET.
#[derive(Debug, Clone, Copy, Default)]
pub struct Select;

/// A SELECT ending in ORDER BY, LIMIT or OFFSET.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedSelect;

/// SELECTs combined with UNION, or a SELECT behind a WITH clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compound;

/// INSERT, UPDATE or DELETE.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modification;

impl StatementKind for Select {
    type WithPrefixed = Compound;
}

impl StatementKind for OrderedSelect {
    type WithPrefixed = OrderedSelect;
}

impl StatementKind for Compound {
    type WithPrefixed = Compound;
}

impl StatementKind for Modification {
    type WithPrefixed = Modification;
}

/// Statements whose result rows can be read by another statement.
#[diagnostic::on_unimplemented(
    message = "a `{Self}` statement cannot be embedded in another statement",
    label = "expected a SELECT",
    note = "subqueries, derived tables and CTE definitions take a SELECT or a UNION of SELECTs"
)]
pub trait RowStatement: StatementKind {}

impl RowStatement for Select {}
impl RowStatement for OrderedSelect {}
impl RowStatement for Compound {}

/// Statements that may start a UNION.
#[diagnostic::on_unimplemented(
    message = "a `{Self}` statement cannot start a UNION",
    label = "expected a SELECT without ORDER BY, LIMIT or OFFSET",
    note = "order or limit the combined rows by selecting from the union as a derived table"
)]
pub trait UnionHead: RowStatement {}

impl UnionHead for Select {}
impl UnionHead for Compound {}

/// Statements that may follow `UNION [ALL]`.
#[diagnostic::on_unimplemented(
    message = "a `{Self}` statement cannot be the right side of a UNION",
    label = "expected a SELECT without ORDER BY, LIMIT or OFFSET",
    note = "chain unions from the left: `a.union_all(b).union_all(c)`"
)]
pub trait UnionOperand: UnionHead {}

impl UnionOperand for Select {}
