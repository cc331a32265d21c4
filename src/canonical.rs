//! Canonical sum and product forms of truth tables

use crate::*;

/// Canonical disjunctive normal form: the sum of the full minterms of all true rows.
///
/// Each term is the product of all variables in canonical order, negated when the variable is
/// false in the row. Without any true row, the result is the constant 0.
///
/// ```
/// use logikit::{build_table, to_ccnf, to_cdnf, Expr};
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let table = build_table(&"A ^ B".parse()?, None)?;
/// assert_eq!(format!("{}", to_cdnf(&table)), "!A * B + A * !B");
/// assert_eq!(format!("{}", to_ccnf(&table)), "(A + B) * (!A + !B)");
/// # Ok(())
/// # }
/// ```
pub fn to_cdnf(table: &Table) -> Expr {
    canonical_form(table, Cell::High, Form::Dnf)
}

/// Canonical conjunctive normal form: the product of the full maxterms of all false rows.
///
/// Each clause is the sum of all variables in canonical order, negated when the variable is
/// true in the row, and enclosed in a group. Without any false row, the result is the constant 1.
pub fn to_ccnf(table: &Table) -> Expr {
    canonical_form(table, Cell::Low, Form::Cnf)
}

/// The sum of the full minterms of all don't care rows.
///
/// Building a table with this expression as don't care expression restores the don't care rows.
/// Without any don't care row, the result is the constant 0.
pub fn to_dont_care_dnf(table: &Table) -> Expr {
    canonical_form(table, Cell::DontCare, Form::Dnf)
}

fn canonical_form(table: &Table, target: Cell, form: Form) -> Expr {
    let width = table.variables().len();
    let terms = table
        .indices_with(target)
        .map(|row| Implicant::minterm(width, row).to_term(table.variables(), form));
    form.join_all(terms)
}
