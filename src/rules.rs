use crate::efmt::{ExprFormatter, InfixFormatter};
use crate::{Assignment, LogicError, VarSet};
use std::fmt;

/// Common API for all Boolean rules.
///
/// This trait defines the API to evaluate and display Boolean rules: parsed
/// [expressions](crate::Expr) and the [solutions](crate::Solution) of the minimizer.
pub trait Rule {
    /// Display the rule using the selected formatter
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result;

    /// Evaluate the rule for the given assignment.
    ///
    /// Fails if a variable used by the rule has no value in the assignment.
    fn eval(&self, assignment: &Assignment) -> Result<bool, LogicError>;

    /// Add all variables used by this rule to the set
    fn collect_variables(&self, variables: &mut VarSet);

    /// Construct the canonical set of variables used by this rule
    fn variables(&self) -> VarSet {
        let mut variables = VarSet::default();
        self.collect_variables(&mut variables);
        variables
    }

    /// Display the rule with the default infix formatter
    fn fmt_rule(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_with(&mut InfixFormatter::new(f))
    }
}

/// Evaluate a rule for a total assignment of its variables.
///
/// ```
/// use logikit::{evaluate, Expr};
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let expr: Expr = "A % !B".parse()?;
/// assert!(evaluate(&expr, &"A=0 B=1".parse()?)?);
/// assert!(evaluate(&expr, &"A=0".parse()?).is_err());
/// # Ok(())
/// # }
/// ```
pub fn evaluate<R: Rule + ?Sized>(rule: &R, assignment: &Assignment) -> Result<bool, LogicError> {
    rule.eval(assignment)
}
