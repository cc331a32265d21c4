//! Truth tables enumerating all assignments of a set of variables

use crate::config::MAX_SUPPORTED_VARIABLES;
use crate::variable::is_valid_name;
use crate::*;

use std::fmt;

/// The output value associated to a row of a truth table
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Cell {
    /// The function is false
    Low,
    /// The function is true
    High,
    /// The function can take any value
    DontCare,
    /// No value was given for this row
    Unspecified,
}

impl Cell {
    /// The Boolean value of a defined cell
    pub fn value(self) -> Option<bool> {
        match self {
            Cell::Low => Some(false),
            Cell::High => Some(true),
            Cell::DontCare | Cell::Unspecified => None,
        }
    }

    /// Test if a Boolean value is acceptable for this cell.
    ///
    /// Any value is acceptable for don't care and unspecified cells.
    pub fn accepts(self, value: bool) -> bool {
        self.value().map(|b| b == value).unwrap_or(true)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        match b {
            true => Cell::High,
            false => Cell::Low,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match self {
            Cell::Low => '0',
            Cell::High => '1',
            Cell::DontCare => '*',
            Cell::Unspecified => '?',
        };
        write!(f, "{}", c)
    }
}

/// A row of a truth table: the input vector and the output cell
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Row {
    /// Index of the row, i.e. the binary value of the input vector
    pub index: usize,
    /// Input values, following the canonical order of variables
    pub inputs: Vec<bool>,
    pub output: Cell,
}

/// A complete truth table over a set of variables.
///
/// The table contains exactly one cell for each of the 2ⁿ assignments of its n variables.
/// The rows are ordered by the binary value of their input vector, where the first variable
/// (in canonical order) is the most significant bit. A table without variables has a single row.
///
/// ```
/// use logikit::{build_table, Cell, Expr};
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let expr: Expr = "A !B".parse()?;
/// let table = build_table(&expr, None)?;
/// assert_eq!(table.len(), 4);
/// assert_eq!(table.cell(0b10), Some(Cell::High));
/// let high: Vec<usize> = table.indices_with(Cell::High).collect();
/// assert_eq!(high, vec![2]);
///
/// let dont_care: Expr = "A B".parse()?;
/// let table = build_table(&expr, Some(&dont_care))?;
/// assert_eq!(table.cell(0b11), Some(Cell::DontCare));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Table {
    variables: VarSet,
    cells: Vec<Cell>,
}

/// Build the truth table of an expression, over the variables it uses.
///
/// If a don't care expression is given, the table is built over the union of the variables
/// of both expressions, and the rows for which the don't care expression is true are
/// marked as [Cell::DontCare], regardless of the value of the main expression.
pub fn build_table(expr: &Expr, dont_care: Option<&Expr>) -> Result<Table, LogicError> {
    build_table_with_limits(expr, dont_care, &Limits::default())
}

/// Build a truth table, refusing tables with more variables than the limit
pub fn build_table_with_limits(
    expr: &Expr,
    dont_care: Option<&Expr>,
    limits: &Limits,
) -> Result<Table, LogicError> {
    let mut variables = expr.variables();
    if let Some(dc) = dont_care {
        dc.collect_variables(&mut variables);
    }
    build_table_over(expr, dont_care, variables, limits)
}

/// Build a truth table over a given set of variables.
///
/// The set can contain variables which are not used by the expressions, but it must contain
/// all the variables which are used.
pub fn build_table_over(
    expr: &Expr,
    dont_care: Option<&Expr>,
    variables: VarSet,
    limits: &Limits,
) -> Result<Table, LogicError> {
    limits.check_variables(variables.len())?;

    let mut cells = Vec::with_capacity(1 << variables.len());
    for assignment in Assignment::enumerate(&variables) {
        let value = expr.eval(&assignment)?;
        let cell = match dont_care {
            Some(dc) if dc.eval(&assignment)? => Cell::DontCare,
            _ => Cell::from(value),
        };
        cells.push(cell);
    }

    let table = Table { variables, cells };
    debug!(
        "Built a table over {} variables: {} rows, {} high, {} don't care",
        table.variables.len(),
        table.len(),
        table.indices_with(Cell::High).count(),
        table.indices_with(Cell::DontCare).count()
    );
    Ok(table)
}

impl Table {
    /// Assemble a table from a list of variables and the output cells in row order.
    ///
    /// Fails if a name is not a valid identifier or if the number of cells is not 2ⁿ.
    pub fn new(variables: VarSet, cells: Vec<Cell>) -> Result<Self, LogicError> {
        Limits::default()
            .with_max_variables(MAX_SUPPORTED_VARIABLES)
            .check_variables(variables.len())?;
        if let Some(name) = variables.iter().find(|n| !is_valid_name(n)) {
            return Err(LogicError::InvalidName(name.clone()));
        }
        let expected = 1usize << variables.len();
        if cells.len() != expected {
            return Err(LogicError::InvalidTable(format!(
                "{} variables require {} cells, found {}",
                variables.len(),
                expected,
                cells.len()
            )));
        }
        Ok(Self { variables, cells })
    }

    /// Create a table where all cells have the same value
    pub fn filled(variables: VarSet, cell: Cell) -> Result<Self, LogicError> {
        Limits::default()
            .with_max_variables(MAX_SUPPORTED_VARIABLES)
            .check_variables(variables.len())?;
        let count = 1 << variables.len();
        Self::new(variables, vec![cell; count])
    }

    pub fn variables(&self) -> &VarSet {
        &self.variables
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A table always has at least one row
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Input values of a row, following the canonical order of variables
    pub fn inputs(&self, index: usize) -> Vec<bool> {
        let n = self.variables.len();
        (0..n).map(|pos| (index >> (n - 1 - pos)) & 1 == 1).collect()
    }

    pub fn row(&self, index: usize) -> Option<Row> {
        self.cell(index).map(|output| Row {
            index,
            inputs: self.inputs(index),
            output,
        })
    }

    /// Iterate over all rows in index order
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.cells.iter().enumerate().map(move |(index, output)| Row {
            index,
            inputs: self.inputs(index),
            output: *output,
        })
    }

    /// The assignment of variables associated to a row
    pub fn assignment(&self, index: usize) -> Assignment {
        Assignment::from_index(&self.variables, index)
    }

    /// Indices of the rows with the given output
    pub fn indices_with(&self, cell: Cell) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == cell)
            .map(|(index, _)| index)
    }

    /// Test if some rows have no value
    pub fn has_unspecified(&self) -> bool {
        self.cells.contains(&Cell::Unspecified)
    }

    /// Build a copy of this table where all unspecified cells take the given value
    pub fn fill_unspecified(self, cell: Cell) -> Self {
        let cells = self
            .cells
            .into_iter()
            .map(|c| match c {
                Cell::Unspecified => cell,
                c => c,
            })
            .collect();
        Self {
            variables: self.variables,
            cells,
        }
    }

    /// Check that a rule agrees with every defined cell of this table.
    ///
    /// Rows with a don't care or unspecified output are always satisfied.
    /// Fails if the rule uses a variable which is not part of the table.
    pub fn check_expression<R: Rule + ?Sized>(&self, rule: &R) -> Result<Satisfaction, LogicError> {
        let mut result = Satisfaction::default();
        for (index, cell) in self.cells.iter().enumerate() {
            let value = rule.eval(&self.assignment(index))?;
            match cell.value() {
                None => (),
                Some(expected) if expected == value => result.checked += 1,
                Some(expected) => {
                    result.checked += 1;
                    result.conflicts.push(Conflict {
                        index,
                        expected,
                        found: value,
                    })
                }
            }
        }
        Ok(result)
    }
}

/// Report on the agreement between a rule and a truth table
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Satisfaction {
    /// Number of rows with a defined output
    pub checked: usize,
    /// Rows where the rule contradicts the table, in index order
    pub conflicts: Vec<Conflict>,
}

/// A row where a rule contradicts a truth table
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Conflict {
    pub index: usize,
    pub expected: bool,
    pub found: bool,
}

impl Satisfaction {
    pub fn is_satisfied(&self) -> bool {
        self.conflicts.is_empty()
    }
}
