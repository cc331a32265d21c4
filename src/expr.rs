//! Boolean expressions defined as syntax trees

use core::ops::BitAnd;
use core::ops::BitOr;
use core::ops::BitXor;
use core::ops::Not;
use std::fmt;
use std::str::FromStr;

use crate::efmt::ExprFormatter;
use crate::*;

/// A Boolean expression tree.
///
/// Represents a Boolean expression as a strict tree where internal nodes are Boolean
/// operations and leaves are variables or constants. Each node owns its children.
///
/// Unlike a normalized representation, the tree keeps the exact shape of the source text:
/// * explicit parentheses are kept as [Expr::Group] nodes, even when redundant;
/// * chained operators are nested binary nodes, never flattened;
/// * constants and double negations are not simplified.
///
/// Two trees are *identical* ([PartialEq]) if they have the same shape, including groups.
/// Use the [equivalence checker](crate::check_equivalent) to compare their meaning.
///
/// Expressions overload the ```&```, ```|```, ```^``` and ```!``` operators, NAND and NOR are
/// available as [Expr::nand] and [Expr::nor]. None of these builders simplify or
/// reassociate their operands.
///
/// ```
/// use logikit::{Assignment, Expr, Rule};
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let a = Expr::var("A");
/// let b = Expr::var("B");
/// let c = Expr::var("C");
///
/// let expr = a.nand(b & !&c);
/// assert_eq!(format!("{}", expr), "A @ B * !C");
///
/// let parsed: Expr = "A @ B * !C".parse()?;
/// assert_eq!(parsed, expr);
///
/// let state: Assignment = "A=1 B=1 C=0".parse()?;
/// assert_eq!(expr.eval(&state)?, false);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum Expr {
    /// A fixed Boolean value
    Constant(bool),

    /// A named variable
    Variable(String),

    /// Negation of a sub-expression
    Not(Box<Expr>),

    /// Two expressions connected with a binary operator
    Operation(Operator, Box<(Expr, Expr)>),

    /// Explicit parenthesis around a sub-expression
    Group(Box<Expr>),
}

/// Binary operators available in expression trees.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Operator {
    /// AND operator: both children need to be true
    And,
    /// OR operator: at least one child needs to be true
    Or,
    /// XOR operator: exactly one child needs to be true
    Xor,
    /// Negated AND
    Nand,
    /// Negated OR
    Nor,
}

/// Binding strength of leaves, groups and negations
const ATOM_PRIORITY: u8 = 5;

impl Operator {
    /// Define the priority of operators: a higher value binds tighter.
    ///
    /// OR, XOR and NOR share the weakest level.
    pub fn priority(self) -> u8 {
        match self {
            Operator::And => 4,
            Operator::Nand => 3,
            Operator::Or | Operator::Xor | Operator::Nor => 2,
        }
    }

    /// NAND and NOR are not associative: ```(A @ B) @ C``` differs from ```A @ (B @ C)```
    pub fn is_associative(self) -> bool {
        !matches!(self, Operator::Nand | Operator::Nor)
    }

    /// Apply this operator to a pair of values
    pub fn apply(self, b1: bool, b2: bool) -> bool {
        match self {
            Operator::And => b1 && b2,
            Operator::Or => b1 || b2,
            Operator::Xor => b1 != b2,
            Operator::Nand => !(b1 && b2),
            Operator::Nor => !(b1 || b2),
        }
    }

    /// Connect two expressions with this operator
    pub fn join(self, e1: impl Into<Expr>, e2: impl Into<Expr>) -> Expr {
        Expr::Operation(self, Box::new((e1.into(), e2.into())))
    }

    /// Connect a sequence of expressions as a left-nested chain: ```((e1 op e2) op e3) ...```
    ///
    /// Return None for an empty sequence.
    pub fn join_all(self, terms: impl IntoIterator<Item = Expr>) -> Option<Expr> {
        terms.into_iter().reduce(|acc, e| self.join(acc, e))
    }

    /// Test if a child of this operator must be enclosed in parenthesis to preserve the tree shape
    /// when formatted as infix text.
    pub(crate) fn needs_parenthesis(self, child: &Expr, right_side: bool) -> bool {
        let child_op = match child {
            Expr::Operation(op, _) => *op,
            _ => return false,
        };
        let (p, pc) = (self.priority(), child_op.priority());
        if pc < p {
            return true;
        }
        right_side && pc == p && (!self.is_associative() || child_op != self)
    }
}

impl Expr {
    /// Create a variable node
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    /// Create a constant node
    pub fn constant(value: bool) -> Self {
        Expr::Constant(value)
    }

    /// Wrap this expression in an explicit parenthesis
    pub fn group(self) -> Self {
        Expr::Group(Box::new(self))
    }

    pub fn nand(self, rhs: impl Into<Expr>) -> Self {
        Operator::Nand.join(self, rhs)
    }

    pub fn nor(self, rhs: impl Into<Expr>) -> Self {
        Operator::Nor.join(self, rhs)
    }

    /// Structural comparison: groups and operand order matter.
    ///
    /// Use [check_equivalent](crate::check_equivalent) to compare the meaning of expressions.
    pub fn identical_to(&self, other: &Expr) -> bool {
        self == other
    }

    /// Skip the explicit parenthesis around this expression, if any
    pub fn ungrouped(&self) -> &Expr {
        match self {
            Expr::Group(inner) => inner.ungrouped(),
            _ => self,
        }
    }

    /// Remove all explicit parenthesis from the tree.
    ///
    /// The result has the same meaning, but its infix rendering only uses the parenthesis
    /// required by operator priorities.
    pub fn without_groups(&self) -> Expr {
        match self {
            Expr::Constant(_) | Expr::Variable(_) => self.clone(),
            Expr::Not(child) => !child.without_groups(),
            Expr::Group(inner) => inner.without_groups(),
            Expr::Operation(op, children) => {
                op.join(children.0.without_groups(), children.1.without_groups())
            }
        }
    }

    /// Get the fixed value associated to this expression, or none if it is not a constant
    pub fn get_fixed(&self) -> Option<bool> {
        match self.ungrouped() {
            Expr::Constant(b) => Some(*b),
            _ => None,
        }
    }

    /// Count the occurrences of variables in this expression
    pub fn literal_count(&self) -> usize {
        match self {
            Expr::Constant(_) => 0,
            Expr::Variable(_) => 1,
            Expr::Not(child) | Expr::Group(child) => child.literal_count(),
            Expr::Operation(_, children) => {
                children.0.literal_count() + children.1.literal_count()
            }
        }
    }

    /// Leaves, negations and groups never need extra parenthesis
    pub(crate) fn binding_priority(&self) -> u8 {
        match self {
            Expr::Operation(op, _) => op.priority(),
            _ => ATOM_PRIORITY,
        }
    }

    pub(crate) fn fmt_expr(&self, f: &mut dyn ExprFormatter, parenthesize: bool) -> fmt::Result {
        match self {
            Expr::Constant(b) => f.write_constant(*b),
            Expr::Variable(name) => f.write_variable(name),
            Expr::Group(inner) => {
                f.start_group()?;
                inner.fmt_expr(f, false)?;
                f.end_group()
            }
            Expr::Not(child) => {
                f.start_not()?;
                child.fmt_expr(f, child.binding_priority() < ATOM_PRIORITY)?;
                f.end_not()
            }
            Expr::Operation(op, children) => {
                f.start_operation(*op, parenthesize)?;
                children
                    .0
                    .fmt_expr(f, op.needs_parenthesis(&children.0, false))?;
                f.sep_operation(*op)?;
                children
                    .1
                    .fmt_expr(f, op.needs_parenthesis(&children.1, true))?;
                f.end_operation(*op, parenthesize)
            }
        }
    }
}

impl Rule for Expr {
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result {
        self.fmt_expr(f, false)
    }

    /// Evaluate both operands of every operation, so that an incomplete assignment
    /// is always detected.
    fn eval(&self, assignment: &Assignment) -> Result<bool, LogicError> {
        Ok(match self {
            Expr::Constant(b) => *b,
            Expr::Variable(name) => assignment.value_of(name)?,
            Expr::Not(child) => !child.eval(assignment)?,
            Expr::Group(inner) => inner.eval(assignment)?,
            Expr::Operation(op, children) => {
                let b1 = children.0.eval(assignment)?;
                let b2 = children.1.eval(assignment)?;
                op.apply(b1, b2)
            }
        })
    }

    fn collect_variables(&self, variables: &mut VarSet) {
        match self {
            Expr::Constant(_) => (),
            Expr::Variable(name) => {
                variables.insert(name);
            }
            Expr::Not(child) | Expr::Group(child) => child.collect_variables(variables),
            Expr::Operation(_, children) => {
                children.0.collect_variables(variables);
                children.1.collect_variables(variables);
            }
        }
    }
}

impl FromStr for Expr {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_expression(s)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Constant(b)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::var(name)
    }
}

impl From<&Expr> for Expr {
    fn from(e: &Expr) -> Self {
        e.clone()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", efmt::DEFAULT_FMT_CFG.operator(*self))
    }
}

// Delegate Display to the rule trait
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rule::fmt_rule(self, f)
    }
}

/* ************************************************************************************* */
/* ******************************   Operator overloading  ****************************** */
/* ************************************************************************************* */

impl Not for Expr {
    type Output = Self;
    fn not(self) -> Self::Output {
        Expr::Not(Box::new(self))
    }
}

impl Not for &Expr {
    type Output = Expr;
    fn not(self) -> Self::Output {
        Expr::Not(Box::new(self.clone()))
    }
}

impl<T: Into<Expr>> BitAnd<T> for Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(self, rhs)
    }
}

impl<T: Into<Expr>> BitAnd<T> for &Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(self, rhs)
    }
}

impl<T: Into<Expr>> BitOr<T> for Expr {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(self, rhs)
    }
}

impl<T: Into<Expr>> BitOr<T> for &Expr {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(self, rhs)
    }
}

impl<T: Into<Expr>> BitXor<T> for Expr {
    type Output = Expr;
    fn bitxor(self, rhs: T) -> Self::Output {
        Operator::Xor.join(self, rhs)
    }
}

impl<T: Into<Expr>> BitXor<T> for &Expr {
    type Output = Expr;
    fn bitxor(self, rhs: T) -> Self::Output {
        Operator::Xor.join(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn construct_and_display() {
        let a = Expr::var("A");
        let b = Expr::var("B");
        let c = Expr::var("C");

        let e = &a | (&b & &c);
        assert_eq!(format!("{}", e), "A + B * C");

        let e = (&a | &b) & &c;
        assert_eq!(format!("{}", e), "(A + B) * C");

        let e = (&a | &b).group() & &c;
        assert_eq!(format!("{}", e), "(A + B) * C");

        let e = !(&a ^ &b);
        assert_eq!(format!("{}", e), "!(A ^ B)");

        let e = !!a.clone();
        assert_eq!(format!("{}", e), "!!A");

        let e = a.clone() & true | false;
        assert_eq!(format!("{}", e), "A * 1 + 0");
    }

    #[test]
    fn non_associative_display() {
        let a = Expr::var("A");
        let b = Expr::var("B");
        let c = Expr::var("C");

        let left = a.clone().nand(b.clone()).nand(c.clone());
        assert_eq!(format!("{}", left), "A @ B @ C");

        let right = a.clone().nand(b.clone().nand(c.clone()));
        assert_eq!(format!("{}", right), "A @ (B @ C)");

        let right = a.clone().nor(b.clone().nor(c.clone()));
        assert_eq!(format!("{}", right), "A % (B % C)");

        // Mixed operators of the same level keep their grouping
        let mixed = &a | (&b ^ &c);
        assert_eq!(format!("{}", mixed), "A + (B ^ C)");
        let chained = &a | (&b | &c);
        assert_eq!(format!("{}", chained), "A + B + C");
    }

    #[test]
    fn eval() -> Result<(), LogicError> {
        let e: Expr = "(A B) + (C (D + !E))".parse()?;
        let state: Assignment = "A=0 B=1 C=1 D=0 E=0".parse()?;
        assert!(e.eval(&state)?);

        let state: Assignment = "A=0 B=1 C=1 D=0 E=1".parse()?;
        assert!(!e.eval(&state)?);

        let e: Expr = "A % B".parse()?;
        assert!(e.eval(&"A=0 B=0".parse()?)?);
        assert!(!e.eval(&"A=1 B=0".parse()?)?);

        let e: Expr = "A @ B".parse()?;
        assert!(!e.eval(&"A=1 B=1".parse()?)?);
        assert!(e.eval(&"A=0 B=1".parse()?)?);
        Ok(())
    }

    #[test]
    fn eval_requires_total_assignment() -> Result<(), LogicError> {
        // The first operand fixes the result, but B must still be bound
        let e: Expr = "0 * B".parse()?;
        assert_eq!(
            e.eval(&Assignment::default()),
            Err(LogicError::UnboundVariable("B".to_string()))
        );
        Ok(())
    }

    #[test]
    fn variables_and_literals() -> Result<(), LogicError> {
        let e: Expr = "b A + !(A c) ^ 1".parse()?;
        assert_eq!(format!("{}", e.variables()), "A,b,c");
        assert_eq!(e.literal_count(), 4);
        assert_eq!(Expr::from(true).literal_count(), 0);
        Ok(())
    }

    #[test]
    fn groups() -> Result<(), LogicError> {
        let e: Expr = "((A)) + B".parse()?;
        assert!(!e.identical_to(&"A + B".parse()?));
        assert!(e.identical_to(&"((A)) + B".parse()?));
        assert_eq!(e.without_groups(), "A + B".parse()?);
        assert_eq!(Expr::from(false).group().get_fixed(), Some(false));
        Ok(())
    }
}
