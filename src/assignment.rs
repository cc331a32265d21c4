use crate::variable::is_valid_name;
use crate::{LogicError, VarSet};

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

static RE_PAIR_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*([=:])\s*").unwrap());

/// A mapping from variable names to Boolean values.
///
/// The evaluator expects a *total* assignment: every variable referenced by the evaluated
/// expression must have a value. Assignments are usually enumerated from a [VarSet],
/// where the index of a row gives the values of all variables, the first variable of the
/// canonical order being the most significant bit.
///
/// ```
/// use logikit::{Assignment, VarSet};
///
/// let vars: VarSet = "A B C".parse().unwrap();
/// let assignment = Assignment::from_index(&vars, 0b001);
/// assert_eq!(assignment.get("A"), Some(false));
/// assert_eq!(assignment.get("C"), Some(true));
/// assert_eq!(format!("{}", assignment), "{A:0,B:0,C:1}");
///
/// let parsed: Assignment = "A=0, B=0, C=1".parse().unwrap();
/// assert_eq!(parsed, assignment);
/// ```
#[derive(Clone, PartialEq, Eq, Default, Debug, Hash)]
pub struct Assignment {
    values: BTreeMap<String, bool>,
}

impl Assignment {
    /// Build the assignment corresponding to a row index of a table over these variables
    pub fn from_index(variables: &VarSet, index: usize) -> Self {
        let n = variables.len();
        let values = variables
            .iter()
            .enumerate()
            .map(|(pos, name)| (name.clone(), (index >> (n - 1 - pos)) & 1 == 1))
            .collect();
        Self { values }
    }

    /// Enumerate all assignments over a set of variables, in increasing row order
    pub fn enumerate(variables: &VarSet) -> impl Iterator<Item = Assignment> + '_ {
        (0..1usize << variables.len()).map(move |index| Self::from_index(variables, index))
    }

    /// Retrieve the row index of this assignment in a table over the given variables.
    ///
    /// Return None if a variable has no value.
    pub fn index_in(&self, variables: &VarSet) -> Option<usize> {
        let mut index = 0;
        for name in variables {
            index = (index << 1) | self.get(name)? as usize;
        }
        Some(index)
    }

    pub fn set(&mut self, name: &str, value: bool) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    /// Look up a variable, treating a missing value as a contract violation
    pub fn value_of(&self, name: &str) -> Result<bool, LogicError> {
        self.get(name)
            .ok_or_else(|| LogicError::UnboundVariable(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the variables and their values in canonical order
    pub fn iter(&self) -> btree_map::Iter<'_, String, bool> {
        self.values.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(n, b)| (n.into(), b)).collect(),
        }
    }
}

impl FromStr for Assignment {
    type Err = LogicError;

    /// Parse a list of ```name=value``` (or ```name:value```) pairs, optionally enclosed in braces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .unwrap_or(s);

        let s = RE_PAIR_SEPARATOR.replace_all(s, "$1");

        let mut result = Assignment::default();
        for elt in s.split(&[',', ';', ' ', '\t'][..]).filter(|e| !e.is_empty()) {
            let (name, value) = elt
                .split_once(&['=', ':'][..])
                .ok_or_else(|| LogicError::InvalidAssignment(elt.to_string()))?;
            if !is_valid_name(name) {
                return Err(LogicError::InvalidName(name.to_string()));
            }
            let value = match value {
                "0" => false,
                "1" => true,
                _ => return Err(LogicError::InvalidAssignment(elt.to_string())),
            };
            result.set(name, value);
        }
        Ok(result)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.values
                .iter()
                .map(|(n, b)| format!("{}:{}", n, *b as u8))
                .join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn enumerate_in_row_order() -> Result<(), LogicError> {
        let vars: VarSet = "B A".parse()?;
        let rows: Vec<String> = Assignment::enumerate(&vars)
            .map(|a| format!("{}", a))
            .collect();
        assert_eq!(
            rows,
            vec!["{A:0,B:0}", "{A:0,B:1}", "{A:1,B:0}", "{A:1,B:1}"]
        );

        for (index, a) in Assignment::enumerate(&vars).enumerate() {
            assert_eq!(a.index_in(&vars), Some(index));
        }
        Ok(())
    }

    #[test]
    fn empty_set_has_one_assignment() {
        let vars = VarSet::default();
        let all: Vec<Assignment> = Assignment::enumerate(&vars).collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
    }

    #[test]
    fn parsing() -> Result<(), LogicError> {
        let a: Assignment = "{x:1,y:0}".parse()?;
        assert_eq!(a.get("x"), Some(true));
        assert_eq!(a.get("y"), Some(false));
        assert_eq!(a.value_of("z"), Err(LogicError::UnboundVariable("z".into())));

        let a: Assignment = "A = 1, B :0 C= 1".parse()?;
        assert_eq!(format!("{}", a), "{A:1,B:0,C:1}");

        assert_eq!(
            "x=2".parse::<Assignment>(),
            Err(LogicError::InvalidAssignment("x=2".into()))
        );
        assert_eq!(
            "x".parse::<Assignment>(),
            Err(LogicError::InvalidAssignment("x".into()))
        );
        assert_eq!(
            "9x = 1".parse::<Assignment>(),
            Err(LogicError::InvalidName("9x".into()))
        );
        Ok(())
    }
}
