//! Prime implicants extracted by iterative merge passes

use crate::config::MAX_SUPPORTED_VARIABLES;
use crate::*;

use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::slice::Iter;
use std::vec::IntoIter;

/// The prime implicants of a set of rows.
///
/// Rows are first seeded as single-row implicants, which are then merged in successive passes:
/// each pass combines pairs of implicants with the same free positions and a single conflicting
/// fixed position. An implicant which does not merge with any other during its pass is prime.
///
/// Prime implicants are kept sorted: larger implicants first, then by fixed values.
///
/// ```
/// use logikit::Primes;
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// // Rows 0, 1, 2 and 5 over 3 variables
/// let primes = Primes::from_rows(3, [0, 1, 2, 5])?;
/// assert_eq!(format!("{}", primes), "00-\n0-0\n-01\n");
///
/// assert!(Primes::from_rows(3, [8]).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Primes {
    width: usize,
    patterns: Vec<Implicant>,
}

impl Primes {
    /// Compute the prime implicants covering exactly the given rows.
    ///
    /// Fails if the width exceeds [MAX_SUPPORTED_VARIABLES] or if a row is not below 2^width.
    pub fn from_rows(
        width: usize,
        rows: impl IntoIterator<Item = usize>,
    ) -> Result<Self, LogicError> {
        Limits::default()
            .with_max_variables(MAX_SUPPORTED_VARIABLES)
            .check_variables(width)?;
        let rows: Vec<usize> = rows.into_iter().collect();
        if let Some(row) = rows.iter().find(|row| **row >> width != 0) {
            return Err(LogicError::InvalidTable(format!(
                "row {} is out of range for {} variables",
                row, width
            )));
        }
        Ok(Self::merge_rows(width, rows))
    }

    /// Compute the prime implicants of valid rows
    fn merge_rows(width: usize, rows: impl IntoIterator<Item = usize>) -> Self {
        let mut current: BTreeSet<Implicant> = rows
            .into_iter()
            .map(|row| Implicant::minterm(width, row))
            .collect();
        debug!("Seeded {} implicants over {} variables", current.len(), width);

        let mut patterns = vec![];
        let mut pass = 0;
        while !current.is_empty() {
            pass += 1;
            let (merged, used) = merge_pass(&current);
            let before = patterns.len();
            patterns.extend(current.iter().filter(|p| !used.contains(p)).copied());
            debug!(
                "Merge pass {}: {} implicants, {} merged, {} new primes",
                pass,
                current.len(),
                merged.len(),
                patterns.len() - before
            );
            current = merged;
        }

        patterns.sort();
        for p in &patterns {
            trace!("Prime implicant {}", p);
        }
        Self { width, patterns }
    }

    /// Compute the prime implicants of the rows of a table matching a target cell.
    ///
    /// Don't care rows are always included: they help building larger implicants.
    pub fn of_table(table: &Table, target: Cell) -> Self {
        let rows = table
            .rows()
            .filter(|row| row.output == target || row.output == Cell::DontCare)
            .map(|row| row.index);
        Self::merge_rows(table.variables().len(), rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the number of prime implicants
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Return whether there are no prime implicant (no row was given)
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Implicant> {
        self.patterns.iter()
    }

    pub fn as_slice(&self) -> &[Implicant] {
        &self.patterns
    }
}

/// Merge all compatible pairs of implicants.
///
/// Return the set of merged implicants (without duplicates) and the set of implicants involved
/// in at least one merge.
fn merge_pass(current: &BTreeSet<Implicant>) -> (BTreeSet<Implicant>, BTreeSet<Implicant>) {
    // Only implicants with the same free positions and one more fixed 1 can merge
    let mut groups: BTreeMap<(u32, u32), Vec<Implicant>> = BTreeMap::new();
    for p in current {
        groups.entry((p.mask(), p.ones())).or_default().push(*p);
    }

    let mut merged = BTreeSet::new();
    let mut used = BTreeSet::new();
    for ((mask, ones), lower) in &groups {
        let upper = match groups.get(&(*mask, ones + 1)) {
            None => continue,
            Some(upper) => upper,
        };
        for (p, q) in lower.iter().cartesian_product(upper.iter()) {
            if let Some(m) = p.merge(q) {
                merged.insert(m);
                used.insert(*p);
                used.insert(*q);
            }
        }
    }
    (merged, used)
}

impl<'a> IntoIterator for &'a Primes {
    type Item = &'a Implicant;
    type IntoIter = Iter<'a, Implicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

impl IntoIterator for Primes {
    type Item = Implicant;
    type IntoIter = IntoIter<Implicant>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.into_iter()
    }
}

impl fmt::Display for Primes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.patterns {
            writeln!(f, "{}", p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::MAX_SUPPORTED_VARIABLES;
    use crate::*;

    fn patterns(primes: &Primes) -> Vec<String> {
        primes.iter().map(|p| format!("{}", p)).collect()
    }

    #[test]
    fn count_primes() -> Result<(), LogicError> {
        // Classic example with rows 4, 8, 10, 11, 12, 15 and don't care rows 9, 14
        let primes = Primes::from_rows(4, [4, 8, 9, 10, 11, 12, 14, 15])?;
        assert_eq!(patterns(&primes), vec!["10--", "1--0", "1-1-", "-100"]);

        let primes = Primes::from_rows(3, 0..8)?;
        assert_eq!(patterns(&primes), vec!["---"]);

        let primes = Primes::from_rows(3, [1, 3, 5, 7])?;
        assert_eq!(patterns(&primes), vec!["--1"]);
        Ok(())
    }

    #[test]
    fn isolated_rows() -> Result<(), LogicError> {
        let primes = Primes::from_rows(3, [0, 3, 5, 6])?;
        assert_eq!(primes.len(), 4);
        assert!(primes.iter().all(|p| p.fixed_count() == 3));

        let primes = Primes::from_rows(2, [])?;
        assert!(primes.is_empty());
        Ok(())
    }

    #[test]
    fn no_variables() -> Result<(), LogicError> {
        let primes = Primes::from_rows(0, [0])?;
        assert_eq!(primes.len(), 1);
        assert_eq!(primes.as_slice()[0].fixed_count(), 0);
        Ok(())
    }

    #[test]
    fn invalid_rows() {
        assert!(matches!(
            Primes::from_rows(2, [1, 4]),
            Err(LogicError::InvalidTable(_))
        ));
        assert!(matches!(
            Primes::from_rows(0, [1]),
            Err(LogicError::InvalidTable(_))
        ));
        assert_eq!(
            Primes::from_rows(40, [0]),
            Err(LogicError::TooManyVariables {
                count: 40,
                limit: MAX_SUPPORTED_VARIABLES
            })
        );
    }

    #[test]
    fn primes_cover_all_rows() -> Result<(), LogicError> {
        let rows = [0, 2, 5, 6, 7, 8, 10, 12, 13, 14, 15];
        let primes = Primes::from_rows(4, rows)?;
        for row in 0..16 {
            let covered = primes.iter().any(|p| p.covers(row));
            assert_eq!(covered, rows.contains(&row));
        }
        // No prime is contained in another one
        for p in &primes {
            for q in &primes {
                assert!(p == q || !p.contains(q));
            }
        }
        Ok(())
    }
}
