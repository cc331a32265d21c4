//! Bounds on the exponential parts of the engine

use crate::LogicError;

/// Implicants and table indices are encoded in 32-bit words.
pub const MAX_SUPPORTED_VARIABLES: usize = 30;

/// Deepest accepted nesting of groups and negations in parsed text.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Tallest accepted expression tree in parsed text, chains of operators included.
pub const MAX_EXPRESSION_HEIGHT: usize = 2048;

/// Ceilings applied before any enumeration or cover search.
///
/// Tables grow as 2ⁿ and the merge passes of the minimizer are exponential in the number
/// of variables, so callers accepting untrusted input should keep the default ceiling
/// or lower it.
///
/// ```
/// use logikit::{Limits, LogicError};
///
/// let limits = Limits::default().with_max_variables(4);
/// assert!(limits.check_variables(4).is_ok());
/// assert!(matches!(limits.check_variables(5), Err(LogicError::TooManyVariables { .. })));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted variable count for tables, minimization and equivalence checks
    pub max_variables: usize,

    /// Largest number of intermediate products kept by the exact cover search
    /// before falling back to greedy selection
    pub max_cover_terms: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_variables: 16,
            max_cover_terms: 4096,
        }
    }
}

impl Limits {
    pub fn with_max_variables(mut self, max_variables: usize) -> Self {
        self.max_variables = max_variables;
        self
    }

    pub fn with_max_cover_terms(mut self, max_cover_terms: usize) -> Self {
        self.max_cover_terms = max_cover_terms;
        self
    }

    /// Fail fast if the given number of variables exceeds the ceiling.
    pub fn check_variables(&self, count: usize) -> Result<(), LogicError> {
        let limit = self.max_variables.min(MAX_SUPPORTED_VARIABLES);
        if count > limit {
            return Err(LogicError::TooManyVariables { count, limit });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;

    #[test]
    fn hard_ceiling() {
        let limits = Limits::default().with_max_variables(1000);
        assert_eq!(
            limits.check_variables(31),
            Err(LogicError::TooManyVariables {
                count: 31,
                limit: MAX_SUPPORTED_VARIABLES
            })
        );
        assert!(limits.check_variables(30).is_ok());
        assert!(Limits::default().check_variables(0).is_ok());
    }
}
