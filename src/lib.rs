//! Parse Boolean expressions, build their truth tables and minimize them.
//!
//! Expressions are written in a compact notation: variables are identifiers, ```0``` and ```1```
//! are constants, and the operators are, from the tightest to the weakest:
//! negation (```!```, ```~``` or ```-```), AND (```*```, ```&``` or simply juxtaposition),
//! NAND (```@```), and finally OR (```+```, ```|```), XOR (```^```) and NOR (```%```)
//! which share the same priority.
//!
//! The [parser](parse()) produces an [expression tree](Expr) which keeps the exact structure of the
//! source text, including redundant parenthesis. NAND and NOR are not associative: chains are
//! nested from the left and are never flattened.
//!
//! ```
//! use logikit::{Assignment, Expr, Rule};
//! # use logikit::LogicError;
//! # fn main() -> Result<(), LogicError> {
//!
//! let expr: Expr = "A B + !(C @ A)".parse()?;
//! assert_eq!(format!("{}", expr), "A * B + !(C @ A)");
//! assert_eq!(format!("{}", expr.variables()), "A,B,C");
//!
//! let state: Assignment = "A=1 B=0 C=1".parse()?;
//! assert!(expr.eval(&state)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Truth tables and canonical forms
//!
//! A [truth table](Table) gives the value of a function for every assignment of its variables,
//! sorted by their canonical (alphabetical) order. Besides true and false values, a table
//! can contain don't care cells, where any value is acceptable, and unspecified cells.
//! The canonical sum of products and product of sums are derived directly from the table.
//!
//! ```
//! use logikit::{build_table, to_cdnf, Cell, Expr};
//! # use logikit::LogicError;
//! # fn main() -> Result<(), LogicError> {
//!
//! let expr: Expr = "A B C + A !B C + C !A".parse()?;
//! let table = build_table(&expr, None)?;
//! let cells: Vec<Cell> = table.cells().to_vec();
//! assert_eq!(cells[0b000], Cell::Low);
//! assert_eq!(cells[0b001], Cell::High);
//!
//! let cdnf = to_cdnf(&table);
//! assert_eq!(cdnf.literal_count(), 12);
//! # Ok(())
//! # }
//! ```
//!
//! # Minimization
//!
//! The Quine-McCluskey method extracts the [prime implicants](Primes) of a table, then selects a
//! minimal subset covering all required rows. The essential implicants are always selected and
//! the remaining rows are covered using Petrick's method, with a fixed tie-break order so that the
//! result is reproducible.
//!
//! ```
//! use logikit::{build_table, minimize_cnf, minimize_dnf, Expr};
//! # use logikit::LogicError;
//! # fn main() -> Result<(), LogicError> {
//!
//! let table = build_table(&"A B C + A !B C + C !A".parse()?, None)?;
//! assert_eq!(format!("{}", minimize_dnf(&table)?), "C");
//! assert_eq!(format!("{}", minimize_cnf(&table)?), "(C)");
//! # Ok(())
//! # }
//! ```
//!
//! # Equivalence
//!
//! Two expressions are compared by enumerating all assignments of their variables. The first
//! assignment on which they differ is reported.
//!
//! ```
//! use logikit::{check_equivalent, Expr};
//! # use logikit::LogicError;
//! # fn main() -> Result<(), LogicError> {
//!
//! let left: Expr = "A @ B @ C".parse()?;
//! let right: Expr = "A @ (B @ C)".parse()?;
//! let result = check_equivalent(&left, &right)?;
//! assert_eq!(format!("{}", result.counterexample.unwrap().assignment), "{A:0,B:0,C:1}");
//! # Ok(())
//! # }
//! ```
//!
//! # Resource limits
//!
//! Tables, minimization and equivalence checks enumerate all 2ⁿ assignments. The default
//! [Limits] reject expressions with more than 16 variables before any enumeration, the
//! ```*_with_limits``` variants accept custom limits.

mod assignment;
mod canonical;
mod config;
mod convert;
mod cover;
pub mod efmt;
mod equiv;
mod error;
mod expr;
mod implicant;
pub mod lexer;
mod minimize;
pub mod parse;
mod primes;
mod rules;
mod table;
mod transform;
mod variable;

#[macro_use]
extern crate pest_derive;

#[macro_use]
extern crate tracing;

// Export public structures and API
pub use assignment::Assignment;
pub use canonical::{to_ccnf, to_cdnf, to_dont_care_dnf};
pub use config::{Limits, MAX_EXPRESSION_HEIGHT, MAX_NESTING_DEPTH, MAX_SUPPORTED_VARIABLES};
pub use equiv::{check_equivalent, check_equivalent_with_limits, Counterexample, Equivalence};
pub use error::LogicError;
pub use expr::{Expr, Operator};
pub use implicant::Implicant;
pub use lexer::{tokenize, Token, TokenKind};
pub use minimize::{
    all_minimal_solutions, all_minimal_solutions_with_limits, minimize, minimize_cnf,
    minimize_cnf_with_limits, minimize_dnf, minimize_dnf_with_limits, Form, Solution,
};
pub use parse::{parse, parse_expression};
pub use primes::Primes;
pub use rules::{evaluate, Rule};
pub use table::{
    build_table, build_table_over, build_table_with_limits, Cell, Conflict, Row, Satisfaction,
    Table,
};
pub use transform::{simplify, to_nand_only, to_nor_only};
pub use variable::{is_valid_name, VarSet};
