//! Split expression strings into tokens

use crate::{LogicError, Operator};
use pest::error::InputLocation;
use pest::{iterators::Pair, Parser};
use std::fmt;

#[derive(Parser)]
#[grammar_inline = r####"
tokens  = _{ SOI ~ token* ~ EOI }
token   = _{ ident | constant | or_op | and_op | xor_op | nand_op | nor_op | not_op | lparen | rparen }
ident   = @{ (ASCII_ALPHA | "_") ~ (ASCII_ALPHANUMERIC | "_")* }
constant = { "0" | "1" }
or_op   = { "+" | "|" }
and_op  = { "*" | "&" }
xor_op  = { "^" }
nand_op = { "@" }
nor_op  = { "%" }
not_op  = { "!" | "~" | "-" }
lparen  = { "(" }
rparen  = { ")" }

WHITESPACE = _{ " " | "\t" | "\r" | "\n" }
"####]
struct TokenGrammar;

/// The different kinds of tokens
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Identifier,
    Constant(bool),
    Operator(Operator),
    Not,
    OpenParen,
    CloseParen,
}

/// A token with its source text and its position (in characters) in the source string.
///
/// Whitespace is not emitted. Two consecutive operand tokens without an operator token
/// between them denote an implicit AND.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: usize,
}

impl Token<'_> {
    /// Test if this token can start an operand
    pub fn starts_operand(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier | TokenKind::Constant(_) | TokenKind::Not | TokenKind::OpenParen
        )
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}'", self.text)
    }
}

/// Split a string into a sequence of tokens.
///
/// ```
/// use logikit::lexer::{tokenize, TokenKind};
/// use logikit::Operator;
///
/// let tokens = tokenize("A !B + 1").unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, vec![
///     TokenKind::Identifier,
///     TokenKind::Not,
///     TokenKind::Identifier,
///     TokenKind::Operator(Operator::Or),
///     TokenKind::Constant(true),
/// ]);
/// assert_eq!(tokens[2].position, 3);
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>, LogicError> {
    let pairs = TokenGrammar::parse(Rule::tokens, text).map_err(|e| {
        let offset = match e.location {
            InputLocation::Pos(p) => p,
            InputLocation::Span((p, _)) => p,
        };
        lex_error(text, offset)
    })?;

    let mut tokens = vec![];
    for pair in pairs {
        if let Some(kind) = token_kind(&pair) {
            let span = pair.as_span();
            tokens.push(Token {
                kind,
                text: span.as_str(),
                position: char_position(text, span.start()),
            });
        }
    }
    Ok(tokens)
}

fn token_kind(pair: &Pair<Rule>) -> Option<TokenKind> {
    Some(match pair.as_rule() {
        Rule::ident => TokenKind::Identifier,
        Rule::constant => TokenKind::Constant(pair.as_str() == "1"),
        Rule::or_op => TokenKind::Operator(Operator::Or),
        Rule::and_op => TokenKind::Operator(Operator::And),
        Rule::xor_op => TokenKind::Operator(Operator::Xor),
        Rule::nand_op => TokenKind::Operator(Operator::Nand),
        Rule::nor_op => TokenKind::Operator(Operator::Nor),
        Rule::not_op => TokenKind::Not,
        Rule::lparen => TokenKind::OpenParen,
        Rule::rparen => TokenKind::CloseParen,
        // End of input marker and hidden rules
        _ => return None,
    })
}

fn char_position(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

/// The grammar accepts any sequence of tokens: a failure always points at the first
/// character which can not start a token.
fn lex_error(text: &str, byte_offset: usize) -> LogicError {
    let offset = byte_offset.min(text.len());
    let found = text[offset..].chars().next().unwrap_or(' ');
    LogicError::Lex {
        position: char_position(text, offset),
        found,
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::*;

    fn kinds(text: &str) -> Result<Vec<TokenKind>, LogicError> {
        Ok(tokenize(text)?.iter().map(|t| t.kind).collect())
    }

    #[test]
    fn operators() -> Result<(), LogicError> {
        let op = TokenKind::Operator;
        assert_eq!(
            kinds("+|*&^@%!~-()")?,
            vec![
                op(Operator::Or),
                op(Operator::Or),
                op(Operator::And),
                op(Operator::And),
                op(Operator::Xor),
                op(Operator::Nand),
                op(Operator::Nor),
                TokenKind::Not,
                TokenKind::Not,
                TokenKind::Not,
                TokenKind::OpenParen,
                TokenKind::CloseParen,
            ]
        );
        Ok(())
    }

    #[test]
    fn identifiers_and_constants() -> Result<(), LogicError> {
        let tokens = tokenize("  _a1 Foo_2\t01 ")?;
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["_a1", "Foo_2", "0", "1"]);
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![2, 6, 12, 13]);
        assert_eq!(tokens[2].kind, TokenKind::Constant(false));
        assert_eq!(tokens[3].kind, TokenKind::Constant(true));

        assert!(tokenize("")?.is_empty());
        assert!(tokenize("   ")?.is_empty());
        Ok(())
    }

    #[test]
    fn errors() {
        assert_eq!(
            tokenize("A + $B"),
            Err(LogicError::Lex {
                position: 4,
                found: '$'
            })
        );
        assert_eq!(
            tokenize("A2 2"),
            Err(LogicError::Lex {
                position: 3,
                found: '2'
            })
        );
        assert_eq!(
            tokenize("é"),
            Err(LogicError::Lex {
                position: 0,
                found: 'é'
            })
        );
    }
}
