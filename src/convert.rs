use crate::{build_table, Expr, LogicError, Solution, Table};
use std::borrow::Cow;

impl From<Solution> for Expr {
    fn from(solution: Solution) -> Self {
        solution.into_expr()
    }
}

impl From<&Solution> for Expr {
    fn from(solution: &Solution) -> Self {
        solution.expr().clone()
    }
}

impl<'a> From<&'a Solution> for Cow<'a, Expr> {
    fn from(solution: &'a Solution) -> Self {
        Cow::Borrowed(solution.expr())
    }
}

impl TryFrom<&Expr> for Table {
    type Error = LogicError;

    fn try_from(expr: &Expr) -> Result<Self, Self::Error> {
        build_table(expr, None)
    }
}
