//! Rewrite expressions into equivalent expressions

use crate::*;

use std::borrow::Cow;

/// Rewrite an expression using only NAND operations and constants.
///
/// Negation becomes ```X @ 1```, AND and OR are expressed with NAND of negated operands.
/// Existing NAND nodes are kept with their original grouping and explicit groups are kept.
///
/// ```
/// use logikit::{check_equivalent, to_nand_only, Expr};
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let expr: Expr = "!A + B".parse()?;
/// let nand = to_nand_only(&expr);
/// assert_eq!(format!("{}", nand), "A @ 1 @ 1 @ (B @ 1)");
/// assert!(check_equivalent(&expr, &nand)?.is_equal());
/// # Ok(())
/// # }
/// ```
pub fn to_nand_only(expr: &Expr) -> Expr {
    let not = |e: Expr| e.nand(true);
    match expr {
        Expr::Constant(_) | Expr::Variable(_) => expr.clone(),
        Expr::Group(inner) => to_nand_only(inner).group(),
        Expr::Not(child) => not(to_nand_only(child)),
        Expr::Operation(op, children) => {
            let l = to_nand_only(&children.0);
            let r = to_nand_only(&children.1);
            match op {
                Operator::Nand => l.nand(r),
                Operator::And => not(l.nand(r)),
                Operator::Or => not(l).nand(not(r)),
                Operator::Nor => not(not(l).nand(not(r))),
                Operator::Xor => {
                    let left = not(l.clone()).nand(r.clone());
                    let right = l.nand(not(r));
                    left.nand(right)
                }
            }
        }
    }
}

/// Rewrite an expression using only NOR operations and constants.
///
/// Negation becomes ```X % 0```, AND and OR are expressed with NOR of negated operands.
/// Existing NOR nodes are kept with their original grouping and explicit groups are kept.
///
/// ```
/// use logikit::{check_equivalent, to_nor_only, Expr};
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let expr: Expr = "A * !B".parse()?;
/// let nor = to_nor_only(&expr);
/// assert_eq!(format!("{}", nor), "A % 0 % (B % 0 % 0)");
/// assert!(check_equivalent(&expr, &nor)?.is_equal());
/// # Ok(())
/// # }
/// ```
pub fn to_nor_only(expr: &Expr) -> Expr {
    let not = |e: Expr| e.nor(false);
    match expr {
        Expr::Constant(_) | Expr::Variable(_) => expr.clone(),
        Expr::Group(inner) => to_nor_only(inner).group(),
        Expr::Not(child) => not(to_nor_only(child)),
        Expr::Operation(op, children) => {
            let l = to_nor_only(&children.0);
            let r = to_nor_only(&children.1);
            match op {
                Operator::Nor => l.nor(r),
                Operator::Or => not(l.nor(r)),
                Operator::And => not(l).nor(not(r)),
                Operator::Nand => not(not(l).nor(not(r))),
                Operator::Xor => {
                    let both = not(l.clone()).nor(not(r.clone()));
                    let none = l.nor(r);
                    both.nor(none)
                }
            }
        }
    }
}

/// Apply local simplifications: constant folding, idempotence and removal of redundant groups.
///
/// * ```X * 1``` and ```X + 0``` give ```X```
/// * ```X * 0``` gives ```0``` and ```X + 1``` gives ```1```
/// * ```!0``` gives ```1``` and ```!1``` gives ```0```
/// * ```X * X``` and ```X + X``` give ```X```
/// * nested groups and groups around a single variable or constant are removed
///
/// The rules are applied bottom-up in a single pass. Operations without a matching rule,
/// including NAND and NOR, are never reordered or reassociated.
///
/// ```
/// use logikit::{simplify, Expr};
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let expr: Expr = "((A * 1)) + B * !1".parse()?;
/// assert_eq!(format!("{}", simplify(&expr)), "A");
/// # Ok(())
/// # }
/// ```
pub fn simplify(expr: &Expr) -> Expr {
    simplified(expr).into_owned()
}

/// Outcome of the simplification of a single operation
enum Fold {
    Constant(bool),
    Left,
    Right,
}

fn fold(op: Operator, l: &Expr, r: &Expr) -> Option<Fold> {
    Some(match (op, l.get_fixed(), r.get_fixed()) {
        (Operator::And, Some(false), _) | (Operator::And, _, Some(false)) => Fold::Constant(false),
        (Operator::And, Some(true), _) => Fold::Right,
        (Operator::And, _, Some(true)) => Fold::Left,
        (Operator::Or, Some(true), _) | (Operator::Or, _, Some(true)) => Fold::Constant(true),
        (Operator::Or, Some(false), _) => Fold::Right,
        (Operator::Or, _, Some(false)) => Fold::Left,
        (Operator::And | Operator::Or, _, _) if l == r => Fold::Left,
        _ => return None,
    })
}

/// Test if a simplified subtree is the original one
fn unchanged(simple: &Cow<'_, Expr>, original: &Expr) -> bool {
    matches!(simple, Cow::Borrowed(e) if std::ptr::eq(*e, original))
}

/// Simplify a subtree, borrowing it when nothing changes
fn simplified(expr: &Expr) -> Cow<'_, Expr> {
    match expr {
        Expr::Constant(_) | Expr::Variable(_) => Cow::Borrowed(expr),
        Expr::Group(inner) => {
            let simple = simplified(inner);
            let redundant = matches!(
                simple.as_ref(),
                Expr::Group(_) | Expr::Constant(_) | Expr::Variable(_)
            );
            if redundant {
                simple
            } else if unchanged(&simple, inner) {
                Cow::Borrowed(expr)
            } else {
                Cow::Owned(simple.into_owned().group())
            }
        }
        Expr::Not(child) => {
            let simple = simplified(child);
            match simple.get_fixed() {
                Some(b) => Cow::Owned(Expr::Constant(!b)),
                None if unchanged(&simple, child) => Cow::Borrowed(expr),
                None => Cow::Owned(!simple.into_owned()),
            }
        }
        Expr::Operation(op, children) => {
            let l = simplified(&children.0);
            let r = simplified(&children.1);
            match fold(*op, &l, &r) {
                Some(Fold::Constant(b)) => Cow::Owned(Expr::Constant(b)),
                Some(Fold::Left) => l,
                Some(Fold::Right) => r,
                None if unchanged(&l, &children.0) && unchanged(&r, &children.1) => {
                    Cow::Borrowed(expr)
                }
                None => Cow::Owned(op.join(l.into_owned(), r.into_owned())),
            }
        }
    }
}
