//! Build expression trees from token sequences

use crate::lexer::{tokenize, Token, TokenKind};
use crate::config::{MAX_EXPRESSION_HEIGHT, MAX_NESTING_DEPTH};
use crate::{Expr, LogicError, Operator};

/// Operators sharing the weakest priority level
static WEAK_OPERATORS: [Operator; 3] = [Operator::Or, Operator::Xor, Operator::Nor];

/// Parse an expression string.
///
/// This is a shortcut for [tokenize] followed by [parse].
pub fn parse_expression(text: &str) -> Result<Expr, LogicError> {
    parse(&tokenize(text)?)
}

/// Build an expression tree from a sequence of tokens.
///
/// Operators are ranked as follows, from the tightest to the weakest:
/// * parenthesis, which are kept in the tree as [Expr::Group] nodes
/// * negation, as a prefix ```!```, ```~``` or ```-```
/// * AND, explicit (```*```, ```&```) or implicit between two adjacent operands
/// * NAND (```@```)
/// * OR (```+```, ```|```), XOR (```^```) and NOR (```%```)
///
/// Chains of operators with the same priority are nested from the left: ```A @ B @ C```
/// is read as ```(A @ B) @ C```. This is only a grouping convention for the non-associative
/// NAND and NOR, which are never flattened.
///
/// ```
/// use logikit::efmt::PrefixFormatted;
/// use logikit::parse_expression;
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let expr = parse_expression("A @ B C")?;
/// assert_eq!(format!("{}", PrefixFormatted(&expr)), "(@ A (* B C))");
///
/// let expr = parse_expression("A @ B @ (C)")?;
/// assert_eq!(format!("{}", PrefixFormatted(&expr)), "(@ (@ A B) [C])");
/// # Ok(())
/// # }
/// ```
pub fn parse(tokens: &[Token]) -> Result<Expr, LogicError> {
    let mut parser = TokenParser {
        tokens,
        pos: 0,
        nesting: 0,
    };
    if tokens.is_empty() {
        return Err(parser.error("expression"));
    }
    let (expr, _) = parser.expr()?;
    if parser.pos < tokens.len() {
        return Err(parser.error("operator or end of input"));
    }
    Ok(expr)
}

/// Recursive descent parser.
///
/// Each rule returns the parsed subtree with its height. The height and the nesting of groups
/// and negations are bounded, so that the parser and the recursive passes over its result
/// never exhaust the stack.
struct TokenParser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    nesting: usize,
}

impl<'t, 'a> TokenParser<'t, 'a> {
    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it is one of the given operators
    fn next_operator(&mut self, accepted: &[Operator]) -> Option<Operator> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Operator(op),
                ..
            }) if accepted.contains(op) => {
                self.pos += 1;
                Some(*op)
            }
            _ => None,
        }
    }

    /// Height of a new node above subtrees of the given heights
    fn grow(&self, left: usize, right: usize) -> Result<usize, LogicError> {
        let height = left.max(right) + 1;
        if height > MAX_EXPRESSION_HEIGHT {
            return Err(self.error("a shorter expression"));
        }
        Ok(height)
    }

    /// Enter a group or a negation, before consuming its first token
    fn enter(&mut self) -> Result<(), LogicError> {
        if self.nesting >= MAX_NESTING_DEPTH {
            return Err(self.error("fewer nested groups or negations"));
        }
        self.nesting += 1;
        Ok(())
    }

    fn expr(&mut self) -> Result<(Expr, usize), LogicError> {
        let (mut lhs, mut height) = self.nand_term()?;
        while let Some(op) = self.next_operator(&WEAK_OPERATORS) {
            let (rhs, h) = self.nand_term()?;
            height = self.grow(height, h)?;
            lhs = op.join(lhs, rhs);
        }
        Ok((lhs, height))
    }

    fn nand_term(&mut self) -> Result<(Expr, usize), LogicError> {
        let (mut lhs, mut height) = self.and_term()?;
        while self.next_operator(&[Operator::Nand]).is_some() {
            let (rhs, h) = self.and_term()?;
            height = self.grow(height, h)?;
            lhs = lhs.nand(rhs);
        }
        Ok((lhs, height))
    }

    fn and_term(&mut self) -> Result<(Expr, usize), LogicError> {
        let (mut lhs, mut height) = self.atom()?;
        loop {
            let explicit = self.next_operator(&[Operator::And]).is_some();
            if !explicit && !self.peek().map(|t| t.starts_operand()).unwrap_or(false) {
                return Ok((lhs, height));
            }
            let (rhs, h) = self.atom()?;
            height = self.grow(height, h)?;
            lhs = lhs & rhs;
        }
    }

    fn atom(&mut self) -> Result<(Expr, usize), LogicError> {
        let token = match self.peek() {
            None => return Err(self.error("operand")),
            Some(t) => t,
        };
        match token.kind {
            TokenKind::Identifier => {
                self.pos += 1;
                Ok((Expr::var(token.text), 1))
            }
            TokenKind::Constant(b) => {
                self.pos += 1;
                Ok((Expr::constant(b), 1))
            }
            TokenKind::Not => {
                self.enter()?;
                self.pos += 1;
                let (child, h) = self.atom()?;
                self.nesting -= 1;
                Ok((!child, self.grow(h, 0)?))
            }
            TokenKind::OpenParen => {
                self.enter()?;
                self.pos += 1;
                let (inner, h) = self.expr()?;
                match self.peek().map(|t| t.kind) {
                    Some(TokenKind::CloseParen) => {
                        self.next();
                        self.nesting -= 1;
                        Ok((inner.group(), self.grow(h, 0)?))
                    }
                    _ => Err(self.error("')'")),
                }
            }
            TokenKind::Operator(_) | TokenKind::CloseParen => Err(self.error("operand")),
        }
    }

    /// Report the current token (or the end of input) as unexpected
    fn error(&self, expected: &'static str) -> LogicError {
        match self.peek() {
            Some(token) => LogicError::Syntax {
                position: token.position,
                expected,
                found: token.to_string(),
            },
            None => LogicError::Syntax {
                position: self
                    .tokens
                    .last()
                    .map(|t| t.position + t.text.chars().count())
                    .unwrap_or(0),
                expected,
                found: "end of input".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{MAX_EXPRESSION_HEIGHT, MAX_NESTING_DEPTH};
    use crate::efmt::PrefixFormatted;
    use crate::parse::*;
    use crate::*;

    fn prefix(s: &str) -> Result<String, LogicError> {
        Ok(format!("{}", PrefixFormatted(&parse_expression(s)?)))
    }

    #[test]
    fn precedence() -> Result<(), LogicError> {
        assert_eq!(prefix("A + B C")?, "(+ A (* B C))");
        assert_eq!(prefix("A B + C")?, "(+ (* A B) C)");
        assert_eq!(prefix("A @ B C")?, "(@ A (* B C))");
        assert_eq!(prefix("A * B @ C")?, "(@ (* A B) C)");
        assert_eq!(prefix("A + B @ C")?, "(+ A (@ B C))");
        assert_eq!(prefix("A % B @ C")?, "(% A (@ B C))");
        assert_eq!(prefix("!A B")?, "(* (! A) B)");
        assert_eq!(prefix("-(A + B)")?, "(! [(+ A B)])");
        assert_eq!(prefix("~~A")?, "(! (! A))");
        Ok(())
    }

    #[test]
    fn left_nesting() -> Result<(), LogicError> {
        assert_eq!(prefix("A @ B @ C")?, "(@ (@ A B) C)");
        assert_eq!(prefix("A % B % C % D")?, "(% (% (% A B) C) D)");
        assert_eq!(prefix("A + B ^ C")?, "(^ (+ A B) C)");
        assert_eq!(prefix("A ^ B % C")?, "(% (^ A B) C)");
        assert_eq!(prefix("A @ (B @ C)")?, "(@ A [(@ B C)])");
        Ok(())
    }

    #[test]
    fn implicit_and() -> Result<(), LogicError> {
        assert_eq!(prefix("A B C")?, "(* (* A B) C)");
        assert_eq!(prefix("A !B")?, "(* A (! B))");
        assert_eq!(prefix("A (B + C)")?, "(* A [(+ B C)])");
        assert_eq!(prefix("A B * C & D")?, "(* (* (* A B) C) D)");
        assert_eq!(prefix("1 0")?, "(* 1 0)");
        assert_eq!(parse_expression("A B")?, parse_expression("A * B")?);
        Ok(())
    }

    #[test]
    fn groups_are_kept() -> Result<(), LogicError> {
        assert_eq!(prefix("((A))")?, "[[A]]");
        assert_eq!(prefix("(A B) + C")?, "(+ [(* A B)] C)");
        Ok(())
    }

    #[test]
    fn syntax_errors() {
        let err = |s: &str| match parse_expression(s) {
            Err(LogicError::Syntax {
                position,
                expected,
                found,
            }) => Some((position, expected, found)),
            _ => None,
        };

        assert_eq!(err(""), Some((0, "expression", "end of input".into())));
        assert_eq!(err("   "), Some((0, "expression", "end of input".into())));
        assert_eq!(err("A +"), Some((3, "operand", "end of input".into())));
        assert_eq!(err("A + * B"), Some((4, "operand", "'*'".into())));
        assert_eq!(err("(A + B"), Some((6, "')'", "end of input".into())));
        assert_eq!(
            err("A + B)"),
            Some((5, "operator or end of input", "')'".into()))
        );
        assert_eq!(err("()"), Some((1, "operand", "')'".into())));
        assert_eq!(err("!"), Some((1, "operand", "end of input".into())));
    }

    #[test]
    fn nesting_limits() -> Result<(), LogicError> {
        let nested = |depth: usize| format!("{}A{}", "(".repeat(depth), ")".repeat(depth));
        assert!(parse_expression(&nested(MAX_NESTING_DEPTH)).is_ok());
        assert_eq!(
            parse_expression(&nested(100_000)),
            Err(LogicError::Syntax {
                position: MAX_NESTING_DEPTH,
                expected: "fewer nested groups or negations",
                found: "'('".into(),
            })
        );

        let negated = format!("{}A", "!".repeat(100_000));
        assert!(matches!(
            parse_expression(&negated),
            Err(LogicError::Syntax {
                position: MAX_NESTING_DEPTH,
                ..
            })
        ));

        // Long chains are flat in the text but deep in the tree
        let chain = |len: usize| vec!["A"; len].join(" @ ");
        assert!(parse_expression(&chain(MAX_EXPRESSION_HEIGHT)).is_ok());
        assert!(matches!(
            parse_expression(&chain(100_000)),
            Err(LogicError::Syntax {
                expected: "a shorter expression",
                ..
            })
        ));

        let implicit = vec!["A"; 100_000].join(" ");
        assert!(parse_expression(&implicit).is_err());
        Ok(())
    }

    #[test]
    fn lex_errors_are_forwarded() {
        assert_eq!(
            parse_expression("A # B"),
            Err(LogicError::Lex {
                position: 2,
                found: '#'
            })
        );
    }
}
