//! Quine-McCluskey minimization of truth tables

use crate::cover::select_cover;
use crate::efmt::ExprFormatter;
use crate::*;

use std::fmt;

/// The two dual normal forms produced by the minimizer
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Form {
    /// Disjunctive normal form: a sum of products, built from the true rows
    Dnf,
    /// Conjunctive normal form: a product of sums, built from the false rows
    Cnf,
}

impl Form {
    pub fn is_dnf(self) -> bool {
        self == Form::Dnf
    }

    /// The output of the rows which must be covered
    pub fn target(self) -> Cell {
        match self {
            Form::Dnf => Cell::High,
            Form::Cnf => Cell::Low,
        }
    }

    /// The operator connecting the terms
    pub fn operator(self) -> Operator {
        match self {
            Form::Dnf => Operator::Or,
            Form::Cnf => Operator::And,
        }
    }

    /// Connect a list of terms, an empty list gives the neutral constant of the operator
    pub fn join_all(self, terms: impl IntoIterator<Item = Expr>) -> Expr {
        self.operator()
            .join_all(terms)
            .unwrap_or(Expr::Constant(!self.is_dnf()))
    }
}

/// A minimal cover of a truth table and the corresponding expression.
///
/// The expression is the sum (or product) of the terms of the selected implicants, sorted from
/// the largest implicant to the smallest. It can be displayed and evaluated like the expression
/// it wraps.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Solution {
    form: Form,
    essential: Vec<Implicant>,
    additional: Vec<Implicant>,
    expr: Expr,
}

impl Solution {
    fn new(
        form: Form,
        variables: &VarSet,
        essential: &[Implicant],
        additional: Vec<Implicant>,
    ) -> Self {
        let mut result = Self {
            form,
            essential: essential.to_vec(),
            additional,
            expr: Expr::Constant(false),
        };
        let terms: Vec<Expr> = result
            .implicants()
            .iter()
            .map(|p| p.to_term(variables, form))
            .collect();
        result.expr = form.join_all(terms);
        result
    }

    pub fn form(&self) -> Form {
        self.form
    }

    /// The implicants which are the only cover of at least one required row
    pub fn essential(&self) -> &[Implicant] {
        &self.essential
    }

    /// The implicants selected to cover the rows left by the essential implicants
    pub fn additional(&self) -> &[Implicant] {
        &self.additional
    }

    /// All selected implicants, sorted
    pub fn implicants(&self) -> Vec<Implicant> {
        let mut result: Vec<Implicant> = self
            .essential
            .iter()
            .chain(&self.additional)
            .copied()
            .collect();
        result.sort();
        result
    }

    pub fn term_count(&self) -> usize {
        self.essential.len() + self.additional.len()
    }

    pub fn literal_count(&self) -> usize {
        self.expr.literal_count()
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }
}

impl Rule for Solution {
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result {
        self.expr.fmt_with(f)
    }

    fn eval(&self, assignment: &Assignment) -> Result<bool, LogicError> {
        self.expr.eval(assignment)
    }

    fn collect_variables(&self, variables: &mut VarSet) {
        self.expr.collect_variables(variables)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rule::fmt_rule(self, f)
    }
}

/// Minimal sum of products agreeing with all defined rows of a table.
///
/// Don't care rows may take any value in the result. Unspecified rows are not covered:
/// call [Table::fill_unspecified] first to decide their value.
///
/// ```
/// use logikit::{build_table, minimize_cnf, minimize_dnf, Expr};
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let table = build_table(&"A B C + A !B C + C !A".parse()?, None)?;
/// assert_eq!(format!("{}", minimize_dnf(&table)?), "C");
/// assert_eq!(format!("{}", minimize_cnf(&table)?), "(C)");
/// # Ok(())
/// # }
/// ```
pub fn minimize_dnf(table: &Table) -> Result<Expr, LogicError> {
    minimize_dnf_with_limits(table, &Limits::default())
}

pub fn minimize_dnf_with_limits(table: &Table, limits: &Limits) -> Result<Expr, LogicError> {
    Ok(minimize(table, Form::Dnf, limits)?.into_expr())
}

/// Minimal product of sums agreeing with all defined rows of a table.
///
/// This is the dual of [minimize_dnf]: the false rows are covered and each implicant
/// gives a clause.
pub fn minimize_cnf(table: &Table) -> Result<Expr, LogicError> {
    minimize_cnf_with_limits(table, &Limits::default())
}

pub fn minimize_cnf_with_limits(table: &Table, limits: &Limits) -> Result<Expr, LogicError> {
    Ok(minimize(table, Form::Cnf, limits)?.into_expr())
}

/// Select a single minimal solution.
///
/// When several solutions have the same cost, the first one of [all_minimal_solutions_with_limits]
/// is returned.
pub fn minimize(table: &Table, form: Form, limits: &Limits) -> Result<Solution, LogicError> {
    let mut solutions = all_minimal_solutions_with_limits(table, form, limits)?;
    // The cover selection always gives at least one alternative
    Ok(solutions.swap_remove(0))
}

/// List all solutions with the lowest number of implicants and then of literals.
///
/// Solutions are sorted by comparing their sorted lists of implicants.
///
/// ```
/// use logikit::{all_minimal_solutions, Cell, Form, Table};
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// // Each row is covered by two overlapping prime implicants
/// let cells = "11100111".chars().map(|c| (c == '1').into()).collect();
/// let table = Table::new("A B C".parse()?, cells)?;
/// let solutions = all_minimal_solutions(&table, Form::Dnf)?;
/// assert_eq!(solutions.len(), 2);
/// assert_eq!(format!("{}", solutions[0]), "!A * !B + B * !C + A * C");
/// assert_eq!(format!("{}", solutions[1]), "!A * !C + !B * C + A * B");
/// # Ok(())
/// # }
/// ```
pub fn all_minimal_solutions(table: &Table, form: Form) -> Result<Vec<Solution>, LogicError> {
    all_minimal_solutions_with_limits(table, form, &Limits::default())
}

pub fn all_minimal_solutions_with_limits(
    table: &Table,
    form: Form,
    limits: &Limits,
) -> Result<Vec<Solution>, LogicError> {
    limits.check_variables(table.variables().len())?;

    let primes = Primes::of_table(table, form.target());
    let required: Vec<usize> = table.indices_with(form.target()).collect();
    debug!(
        "Minimizing {:?} over {} variables: {} required rows, {} prime implicants",
        form,
        table.variables().len(),
        required.len(),
        primes.len()
    );

    let cover = select_cover(&primes, &required, limits);
    let solutions = cover
        .alternatives
        .into_iter()
        .map(|additional| Solution::new(form, table.variables(), &cover.essential, additional))
        .collect();
    Ok(solutions)
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn table_from(expr: &str) -> Result<Table, LogicError> {
        build_table(&expr.parse()?, None)
    }

    #[test]
    fn single_variable() -> Result<(), LogicError> {
        let table = table_from("A B C + A !B C + C !A")?;
        let dnf = minimize_dnf(&table)?;
        assert_eq!(dnf, Expr::var("C"));
        let cnf = minimize_cnf(&table)?;
        assert_eq!(cnf, Expr::var("C").group());
        Ok(())
    }

    #[test]
    fn constants() -> Result<(), LogicError> {
        let table = table_from("A !A")?;
        assert_eq!(minimize_dnf(&table)?, Expr::Constant(false));
        assert_eq!(minimize_cnf(&table)?, Expr::Constant(false));

        let table = table_from("A + !A")?;
        assert_eq!(minimize_dnf(&table)?, Expr::Constant(true));
        assert_eq!(minimize_cnf(&table)?, Expr::Constant(true));
        Ok(())
    }

    #[test]
    fn dont_care() -> Result<(), LogicError> {
        // Rows 4, 8, 10, 11, 12, 15 with don't care rows 9 and 14
        let vars: VarSet = "A B C D".parse()?;
        let cells = (0..16)
            .map(|row| match row {
                4 | 8 | 10 | 11 | 12 | 15 => Cell::High,
                9 | 14 => Cell::DontCare,
                _ => Cell::Low,
            })
            .collect();
        let table = Table::new(vars, cells)?;

        let solutions = all_minimal_solutions(&table, Form::Dnf)?;
        let rendered: Vec<String> = solutions.iter().map(|s| format!("{}", s)).collect();
        assert_eq!(
            rendered,
            vec![
                "A * !B + A * C + B * !C * !D",
                "A * !D + A * C + B * !C * !D"
            ]
        );
        for s in &solutions {
            assert_eq!(s.essential().len(), 2);
            assert_eq!(s.additional().len(), 1);
            assert_eq!(s.term_count(), 3);
            assert_eq!(s.literal_count(), 7);
            assert!(table.check_expression(s)?.is_satisfied());
        }

        assert_eq!(minimize_dnf(&table)?, solutions[0].expr().clone());
        Ok(())
    }

    #[test]
    fn unspecified_rows() -> Result<(), LogicError> {
        let cells = "01010?0?"
            .chars()
            .map(|c| match c {
                '0' => Cell::Low,
                '1' => Cell::High,
                _ => Cell::Unspecified,
            })
            .collect();
        let table = Table::new("A B C".parse()?, cells)?;

        // Unspecified rows are neither covered nor used to merge implicants
        let dnf = minimize_dnf(&table)?;
        let cnf = minimize_cnf(&table)?;
        assert_eq!(format!("{}", dnf), "!A * C");
        assert_eq!(format!("{}", cnf), "(C)");
        assert!(table.check_expression(&dnf)?.is_satisfied());
        assert!(table.check_expression(&cnf)?.is_satisfied());
        let row = table.assignment(0b101);
        assert_eq!((dnf.eval(&row)?, cnf.eval(&row)?), (false, true));

        let high = table.clone().fill_unspecified(Cell::High);
        assert_eq!(format!("{}", minimize_dnf(&high)?), "C");
        let free = table.fill_unspecified(Cell::DontCare);
        assert_eq!(format!("{}", minimize_dnf(&free)?), "C");
        Ok(())
    }

    #[test]
    fn exact_cover_beats_greedy() -> Result<(), LogicError> {
        let optimal: Expr = "!A B !D + A !B !D + !B !C D + !A C D".parse()?;
        let table = build_table(&optimal, None)?;
        let solution = minimize(&table, Form::Dnf, &Limits::default())?;
        assert_eq!(solution.term_count(), 4);
        assert!(table.check_expression(&solution)?.is_satisfied());
        assert!(solution.literal_count() <= to_cdnf(&table).literal_count());
        Ok(())
    }

    #[test]
    fn greedy_fallback_is_sound() -> Result<(), LogicError> {
        let table = table_from("A ^ B ^ C + A B D + !A !C !D")?;
        let limits = Limits::default().with_max_cover_terms(0);
        let dnf = minimize_dnf_with_limits(&table, &limits)?;
        assert!(table.check_expression(&dnf)?.is_satisfied());
        let cnf = minimize_cnf_with_limits(&table, &limits)?;
        assert!(table.check_expression(&cnf)?.is_satisfied());
        Ok(())
    }

    #[test]
    fn dual_forms() -> Result<(), LogicError> {
        let table = table_from("A B + !A C")?;
        assert_eq!(format!("{}", minimize_dnf(&table)?), "!A * C + A * B");
        let cnf = minimize_cnf(&table)?;
        assert_eq!(format!("{}", cnf), "(A + C) * (!A + B)");
        assert!(table.check_expression(&cnf)?.is_satisfied());
        Ok(())
    }

    #[test]
    fn limits() -> Result<(), LogicError> {
        let table = table_from("A B C")?;
        let limits = Limits::default().with_max_variables(2);
        assert_eq!(
            minimize_dnf_with_limits(&table, &limits),
            Err(LogicError::TooManyVariables { count: 3, limit: 2 })
        );
        Ok(())
    }
}
