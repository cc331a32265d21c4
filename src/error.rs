use thiserror::Error;

/// Errors raised while parsing, evaluating or tabulating Boolean expressions.
///
/// All operations are all-or-nothing: when one of these errors is returned, no partial
/// expression or table is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    /// The lexer met a character which does not start any token
    #[error("Unexpected character '{found}' at position {position}")]
    Lex { position: usize, found: char },

    /// The token stream does not follow the expression grammar
    #[error("Syntax error at position {position}: expected {expected}, found {found}")]
    Syntax {
        position: usize,
        expected: &'static str,
        found: String,
    },

    /// The evaluator was given an assignment without a value for this variable
    #[error("No value assigned to variable '{0}'")]
    UnboundVariable(String),

    /// Refuse exponential work above the configured ceiling
    #[error("Too many variables: {count} (the limit is {limit})")]
    TooManyVariables { count: usize, limit: usize },

    /// An assignment entry is not a ```name=value``` pair with a value of 0 or 1
    #[error("Invalid assignment '{0}'")]
    InvalidAssignment(String),

    /// The name is not a valid identifier
    #[error("The name '{0}' is invalid")]
    InvalidName(String),

    /// The table is not consistent with its list of variables
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// The implicant pattern is malformed
    #[error("Invalid pattern '{0}'")]
    InvalidPattern(String),
}
