//! Named variables and their canonical ordering

use crate::LogicError;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::iter::FromIterator;
use std::slice::Iter;
use std::str::FromStr;

static RE_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap());

static NAME_SEPARATORS: [char; 4] = [' ', ',', ';', '\t'];

/// Test if a name could be used as a variable in an expression.
pub fn is_valid_name(name: &str) -> bool {
    RE_IDENTIFIER.is_match(name)
}

/// A set of variable names kept in canonical (lexicographic) order.
///
/// The position of a variable in this order defines its column in a [truth table](crate::Table)
/// and its position in the bit-vector of a row: position 0 is the most significant bit of the
/// row index.
///
/// ```
/// use logikit::VarSet;
///
/// let vars: VarSet = "C, A B".parse().unwrap();
/// assert_eq!(vars.len(), 3);
/// assert_eq!(vars.position("B"), Some(1));
/// assert_eq!(format!("{}", vars), "A,B,C");
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug, Hash)]
pub struct VarSet {
    names: Vec<String>,
}

impl VarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from caller-provided names, rejecting invalid identifiers
    pub fn from_names<S: AsRef<str>>(
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self, LogicError> {
        let mut result = Self::default();
        for name in names {
            let name = name.as_ref();
            if !is_valid_name(name) {
                return Err(LogicError::InvalidName(name.to_string()));
            }
            result.insert(name);
        }
        Ok(result)
    }

    /// Add a variable, preserving the canonical order. Return false if it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        match self.names.binary_search_by(|n| n.as_str().cmp(name)) {
            Ok(_) => false,
            Err(idx) => {
                self.names.insert(idx, name.to_string());
                true
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Position of a variable in the canonical order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).ok()
    }

    /// Add all variables from another set
    pub fn union_with(&mut self, other: &VarSet) {
        for name in &other.names {
            self.insert(name);
        }
    }

    pub fn union(&self, other: &VarSet) -> VarSet {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(|n| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String> {
        self.names.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl<S: AsRef<str>> FromIterator<S> for VarSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut result = VarSet::default();
        for name in iter {
            result.insert(name.as_ref());
        }
        result
    }
}

impl<'a> IntoIterator for &'a VarSet {
    type Item = &'a String;
    type IntoIter = Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

impl FromStr for VarSet {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_names(s.split(&NAME_SEPARATORS[..]).filter(|n| !n.is_empty()))
    }
}

impl fmt::Display for VarSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.names.iter().join(","))
    }
}
