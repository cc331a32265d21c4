//! Semantic comparison of rules by exhaustive enumeration

use crate::*;

use std::fmt;

/// Result of the comparison of two rules
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Equivalence {
    /// The union of the variables used by both rules
    pub variables: VarSet,
    /// The first assignment (in row order) for which the rules differ
    pub counterexample: Option<Counterexample>,
}

/// An assignment for which two rules take different values
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Counterexample {
    pub assignment: Assignment,
    pub left: bool,
    pub right: bool,
}

impl Equivalence {
    pub fn is_equal(&self) -> bool {
        self.counterexample.is_none()
    }
}

impl fmt::Display for Counterexample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} gives {} on the left and {} on the right",
            self.assignment, self.left as u8, self.right as u8
        )
    }
}

/// Check if two rules have the same value for every assignment of their variables.
///
/// Variables used by only one of the rules are also enumerated. The assignments are visited in
/// increasing row order over the union of variables, and the first difference is reported.
/// Explicit groups have no effect on the result.
///
/// ```
/// use logikit::{check_equivalent, Expr};
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let left: Expr = "A @ B @ C".parse()?;
/// let right: Expr = "A @ (B @ C)".parse()?;
/// let result = check_equivalent(&left, &right)?;
/// assert!(!result.is_equal());
///
/// let diff = result.counterexample.unwrap();
/// assert_eq!(format!("{}", diff.assignment), "{A:0,B:0,C:1}");
/// assert_eq!((diff.left, diff.right), (false, true));
///
/// let left: Expr = "A B C + C !D B + B C".parse()?;
/// let right: Expr = "B C".parse()?;
/// assert!(check_equivalent(&left, &right)?.is_equal());
/// # Ok(())
/// # }
/// ```
pub fn check_equivalent<L, R>(left: &L, right: &R) -> Result<Equivalence, LogicError>
where
    L: Rule + ?Sized,
    R: Rule + ?Sized,
{
    check_equivalent_with_limits(left, right, &Limits::default())
}

pub fn check_equivalent_with_limits<L, R>(
    left: &L,
    right: &R,
    limits: &Limits,
) -> Result<Equivalence, LogicError>
where
    L: Rule + ?Sized,
    R: Rule + ?Sized,
{
    let mut variables = left.variables();
    right.collect_variables(&mut variables);
    limits.check_variables(variables.len())?;

    let mut counterexample = None;
    for assignment in Assignment::enumerate(&variables) {
        let l = left.eval(&assignment)?;
        let r = right.eval(&assignment)?;
        if l != r {
            debug!("Rules differ for {}", assignment);
            counterexample = Some(Counterexample {
                assignment,
                left: l,
                right: r,
            });
            break;
        }
    }

    Ok(Equivalence {
        variables,
        counterexample,
    })
}
