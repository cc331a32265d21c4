//! Formatting API for expressions

use crate::{Operator, Rule};
use delegate::delegate;

use std::fmt;

/// Symbols used to render the operators of an expression.
pub struct FormatterConfig<'a> {
    s_and: &'a str,
    s_or: &'a str,
    s_xor: &'a str,
    s_nand: &'a str,
    s_nor: &'a str,
    s_not: &'a str,
    implicit_and: bool,
}

/// The ASCII notation accepted by the parser, with explicit AND
pub static DEFAULT_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "*",
    s_or: "+",
    s_xor: "^",
    s_nand: "@",
    s_nor: "%",
    s_not: "!",
    implicit_and: false,
};

/// The ASCII notation accepted by the parser, where AND is denoted by adjacency
pub static IMPLICIT_AND_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "*",
    s_or: "+",
    s_xor: "^",
    s_nand: "@",
    s_nor: "%",
    s_not: "!",
    implicit_and: true,
};

/// Textbook notation, for display only
pub static PRETTY_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "∧",
    s_or: "∨",
    s_xor: "⊕",
    s_nand: "NAND",
    s_nor: "NOR",
    s_not: "¬",
    implicit_and: false,
};

/// Wrap a rule to display it with a custom configuration
pub struct InfixFormatted<'a, T: Rule> {
    rule: &'a T,
    cfg: &'a FormatterConfig<'a>,
}

/// Define hooks to display separate parts of expressions.
///
/// This trait provide entry points used by [Rule::fmt_with] to control the presentation of the expression.
/// The expression visits the inner tree and calls the hooks defined in this trait for each node and leaf.
/// The tree decides where parenthesis are needed to preserve its shape, explicit groups are always
/// reported.
pub trait ExprFormatter {
    /// Pass-through function calling an internal [fmt::Formatter].
    ///
    /// This function enables the use of the ```write!``` macro in other functions.
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;

    /// Write a constant node
    fn write_constant(&mut self, b: bool) -> fmt::Result;

    /// Write a single variable
    fn write_variable(&mut self, name: &str) -> fmt::Result;

    /// Start writing a negation
    fn start_not(&mut self) -> fmt::Result;

    /// Stop writing a negation
    fn end_not(&mut self) -> fmt::Result;

    /// Start writing an explicit parenthesis
    fn start_group(&mut self) -> fmt::Result;

    /// Stop writing an explicit parenthesis
    fn end_group(&mut self) -> fmt::Result;

    /// Start writing an operation.
    ///
    /// The flag is set if the operation must be enclosed in parenthesis to preserve the tree structure.
    fn start_operation(&mut self, op: Operator, parenthesize: bool) -> fmt::Result;

    /// Stop writing an operation
    fn end_operation(&mut self, op: Operator, parenthesize: bool) -> fmt::Result;

    /// Separate the two operands of an operation
    fn sep_operation(&mut self, op: Operator) -> fmt::Result;
}

impl FormatterConfig<'_> {
    pub fn operator(&self, op: Operator) -> &str {
        match op {
            Operator::And => self.s_and,
            Operator::Or => self.s_or,
            Operator::Xor => self.s_xor,
            Operator::Nand => self.s_nand,
            Operator::Nor => self.s_nor,
        }
    }

    pub fn negation(&self) -> &str {
        self.s_not
    }

    pub fn implicit_and(&self) -> bool {
        self.implicit_and
    }

    pub fn infix<'a, T: Rule>(&'a self, rule: &'a T) -> InfixFormatted<'a, T> {
        InfixFormatted { rule, cfg: self }
    }
}

pub struct InfixFormatter<'a, 'b>(&'a mut fmt::Formatter<'b>, &'a FormatterConfig<'a>);

/// Show the tree structure as nested prefix operations: ```(@ (@ A B) C)```.
///
/// Explicit parenthesis are displayed as square brackets.
pub struct PrefixFormatter<'a, 'b>(InfixFormatter<'a, 'b>);

impl<'a, 'b> InfixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(f, &DEFAULT_FMT_CFG)
    }
    pub fn with(f: &'a mut fmt::Formatter<'b>, cfg: &'a FormatterConfig<'a>) -> Self {
        Self(f, cfg)
    }
}

impl<'a, 'b> PrefixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(InfixFormatter::new(f))
    }
}

impl ExprFormatter for InfixFormatter<'_, '_> {
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result {
        fmt::Formatter::write_fmt(self.0, args)
    }

    fn write_constant(&mut self, b: bool) -> fmt::Result {
        match b {
            false => write!(self, "0"),
            true => write!(self, "1"),
        }
    }

    fn write_variable(&mut self, name: &str) -> fmt::Result {
        write!(self, "{}", name)
    }

    fn start_not(&mut self) -> fmt::Result {
        let cfg = self.1;
        write!(self, "{}", cfg.s_not)
    }

    fn end_not(&mut self) -> fmt::Result {
        Ok(())
    }

    fn start_group(&mut self) -> fmt::Result {
        write!(self, "(")
    }

    fn end_group(&mut self) -> fmt::Result {
        write!(self, ")")
    }

    fn start_operation(&mut self, _op: Operator, parenthesize: bool) -> fmt::Result {
        match parenthesize {
            true => write!(self, "("),
            false => Ok(()),
        }
    }

    fn end_operation(&mut self, _op: Operator, parenthesize: bool) -> fmt::Result {
        match parenthesize {
            true => write!(self, ")"),
            false => Ok(()),
        }
    }

    fn sep_operation(&mut self, op: Operator) -> fmt::Result {
        let cfg = self.1;
        match (op, cfg.implicit_and) {
            (Operator::And, true) => write!(self, " "),
            _ => write!(self, " {} ", cfg.operator(op)),
        }
    }
}

pub struct PrefixFormatted<'a, R: Rule>(pub &'a R);

impl<'a, R: Rule> fmt::Display for PrefixFormatted<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ef = PrefixFormatter::new(f);
        self.0.fmt_with(&mut ef)
    }
}

impl<T: Rule> fmt::Display for InfixFormatted<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ef = InfixFormatter::with(f, self.cfg);
        self.rule.fmt_with(&mut ef)
    }
}

impl ExprFormatter for PrefixFormatter<'_, '_> {
    delegate! {
        to self.0 {
            fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;
            fn write_constant(&mut self, b: bool) -> fmt::Result;
            fn write_variable(&mut self, name: &str) -> fmt::Result;
        }
    }

    fn start_not(&mut self) -> fmt::Result {
        write!(self, "(! ")
    }

    fn end_not(&mut self) -> fmt::Result {
        write!(self, ")")
    }

    fn start_group(&mut self) -> fmt::Result {
        write!(self, "[")
    }

    fn end_group(&mut self) -> fmt::Result {
        write!(self, "]")
    }

    fn start_operation(&mut self, op: Operator, _parenthesize: bool) -> fmt::Result {
        write!(self, "({} ", DEFAULT_FMT_CFG.operator(op))
    }

    fn end_operation(&mut self, _op: Operator, _parenthesize: bool) -> fmt::Result {
        write!(self, ")")
    }

    fn sep_operation(&mut self, _op: Operator) -> fmt::Result {
        write!(self, " ")
    }
}
