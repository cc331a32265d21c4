//! Patterns of fixed and free positions used by the minimizer

use crate::config::MAX_SUPPORTED_VARIABLES;
use crate::*;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A cube of rows in a truth table.
///
/// Each position is fixed (```0``` or ```1```) or free (```-```). Positions follow the canonical
/// order of the table variables: position 0 (the first character of the text form) is the most
/// significant bit of a row index. The implicant covers all rows which agree with its fixed
/// positions.
///
/// Internally, the fixed values and the free positions are stored as two bit-vectors over the
/// row index. The value of a free position is always 0, so two implicants covering the same rows
/// are always equal.
///
/// ```
/// use logikit::Implicant;
/// # use logikit::LogicError;
/// # fn main() -> Result<(), LogicError> {
///
/// let p: Implicant = "1-0".parse()?;
/// assert_eq!(p.width(), 3);
/// assert_eq!(p.fixed_count(), 2);
/// assert!(p.covers(0b100));
/// assert!(p.covers(0b110));
/// assert!(!p.covers(0b101));
///
/// // Two conflicting positions
/// let q: Implicant = "0-1".parse()?;
/// assert_eq!(p.merge(&q), None);
/// // Different free positions
/// let q: Implicant = "11-".parse()?;
/// assert_eq!(p.merge(&q), None);
/// let q: Implicant = "1-1".parse()?;
/// assert_eq!(format!("{}", p.merge(&q).unwrap()), "1--");
/// let q: Implicant = "0-0".parse()?;
/// assert_eq!(format!("{}", p.merge(&q).unwrap()), "--0");
/// # Ok(())
/// # }
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Implicant {
    value: u32,
    mask: u32,
    width: usize,
}

impl Implicant {
    /// The implicant covering a single row, the row must be below 2^width
    pub(crate) fn minterm(width: usize, row: usize) -> Self {
        Self {
            value: row as u32,
            mask: 0,
            width,
        }
    }

    /// Number of positions (variables)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of fixed positions, i.e. the number of literals in the corresponding term
    pub fn fixed_count(&self) -> usize {
        self.width - self.mask.count_ones() as usize
    }

    /// Number of rows covered by this implicant
    pub fn row_count(&self) -> usize {
        1 << self.mask.count_ones()
    }

    /// The value of a position if it is fixed, the position must be below the width
    pub(crate) fn position(&self, pos: usize) -> Option<bool> {
        let bit = self.width - 1 - pos;
        match (self.mask >> bit) & 1 {
            1 => None,
            _ => Some((self.value >> bit) & 1 == 1),
        }
    }

    /// Test if a row (given by its index) is covered by this implicant
    pub fn covers(&self, row: usize) -> bool {
        (row as u32 & !self.mask) == self.value
    }

    /// Test if all rows covered by another implicant are covered by this one
    pub fn contains(&self, other: &Implicant) -> bool {
        (other.mask & !self.mask) == 0 && (other.value & !self.mask) == self.value
    }

    /// Merge two implicants with the same free positions and a single conflicting fixed position.
    ///
    /// The conflicting position is freed in the result, which covers the rows of both implicants.
    pub fn merge(&self, other: &Implicant) -> Option<Implicant> {
        if self.mask != other.mask || self.width != other.width {
            return None;
        }
        let diff = self.value ^ other.value;
        if diff.count_ones() != 1 {
            return None;
        }
        Some(Implicant {
            value: self.value & !diff,
            mask: self.mask | diff,
            width: self.width,
        })
    }

    /// Enumerate the rows covered by this implicant in increasing order
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..1usize << self.width).filter(move |row| self.covers(*row))
    }

    /// Number of fixed positions set to 1, used to group implicants before merging
    pub(crate) fn ones(&self) -> u32 {
        self.value.count_ones()
    }

    pub(crate) fn mask(&self) -> u32 {
        self.mask
    }

    /// Build the term represented by this implicant.
    ///
    /// In a DNF, the implicant is the product of its fixed positions: ```1-0``` gives ```A * !C```.
    /// In a CNF, the implicant describes rows where the function is false and gives the clause
    /// excluding them: ```1-0``` gives ```(!A + C)```. Clauses are always enclosed in a group.
    ///
    /// Without any fixed position, the DNF term is the constant 1 and the CNF clause is the constant 0.
    /// Variables beyond the width of the implicant are ignored.
    pub fn to_term(&self, variables: &VarSet, form: Form) -> Expr {
        let literals = variables
            .iter()
            .take(self.width)
            .enumerate()
            .filter_map(|(pos, name)| {
                self.position(pos).map(|b| match b == form.is_dnf() {
                    true => Expr::var(name.as_str()),
                    false => !Expr::var(name.as_str()),
                })
            });
        match form {
            Form::Dnf => Operator::And.join_all(literals).unwrap_or(Expr::Constant(true)),
            Form::Cnf => match Operator::Or.join_all(literals) {
                Some(clause) => clause.group(),
                None => Expr::Constant(false),
            },
        }
    }
}

/// Larger implicants come first, then implicants are sorted by their fixed values
impl Ord for Implicant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fixed_count()
            .cmp(&other.fixed_count())
            .then_with(|| self.width.cmp(&other.width))
            .then_with(|| self.value.cmp(&other.value))
            .then_with(|| self.mask.cmp(&other.mask))
    }
}

impl PartialOrd for Implicant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Implicant {
    type Err = LogicError;

    /// Parse a pattern of ```0```, ```1``` and ```-``` characters.
    ///
    /// Spaces and single quotes are ignored to allow grouping positions for readability.
    fn from_str(descr: &str) -> Result<Self, Self::Err> {
        let mut result = Implicant {
            value: 0,
            mask: 0,
            width: 0,
        };
        for c in descr.chars() {
            let (value, mask) = match c {
                ' ' | '\t' | '\'' => continue,
                '0' => (0, 0),
                '1' => (1, 0),
                '-' => (0, 1),
                _ => return Err(LogicError::InvalidPattern(descr.to_string())),
            };
            if result.width == MAX_SUPPORTED_VARIABLES {
                return Err(LogicError::InvalidPattern(descr.to_string()));
            }
            result.value = (result.value << 1) | value;
            result.mask = (result.mask << 1) | mask;
            result.width += 1;
        }
        Ok(result)
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for pos in 0..self.width {
            let c = match self.position(pos) {
                None => '-',
                Some(false) => '0',
                Some(true) => '1',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn parse_and_display() -> Result<(), LogicError> {
        let p: Implicant = "-0--01-1".parse()?;
        assert_eq!(format!("{}", p), "-0--01-1");
        assert_eq!(p.width(), 8);
        assert_eq!(p.fixed_count(), 4);
        assert_eq!(p.position(0), None);
        assert_eq!(p.position(1), Some(false));
        assert_eq!(p.position(5), Some(true));

        let p: Implicant = "10'-1".parse()?;
        assert_eq!(format!("{}", p), "10-1");

        assert_eq!(
            "10x".parse::<Implicant>(),
            Err(LogicError::InvalidPattern("10x".to_string()))
        );
        assert!("-".repeat(31).parse::<Implicant>().is_err());
        Ok(())
    }

    #[test]
    fn covered_rows() -> Result<(), LogicError> {
        let p: Implicant = "1-0-".parse()?;
        let rows: Vec<usize> = p.rows().collect();
        assert_eq!(rows, vec![0b1000, 0b1001, 0b1100, 0b1101]);
        assert_eq!(p.row_count(), 4);

        let m = Implicant::minterm(4, 0b1101);
        assert!(p.contains(&m));
        assert!(!m.contains(&p));
        assert!(p.contains(&p));
        Ok(())
    }

    #[test]
    fn merging() -> Result<(), LogicError> {
        let p: Implicant = "10-1".parse()?;
        let merged = p.merge(&"11-1".parse()?);
        assert_eq!(merged, Some("1--1".parse()?));
        let p: Implicant = "1-0".parse()?;
        assert_eq!(p.merge(&"1-1".parse()?), Some("1--".parse()?));
        assert_eq!(p.merge(&"0-1".parse()?), None);
        assert_eq!(p.merge(&"11-".parse()?), None);
        let p: Implicant = "10-1".parse()?;

        // Different free positions
        assert_eq!(p.merge(&"1-01".parse()?), None);
        // Two conflicts
        assert_eq!(p.merge(&"01-1".parse()?), None);
        // Identical
        assert_eq!(p.merge(&p), None);
        Ok(())
    }

    #[test]
    fn terms() -> Result<(), LogicError> {
        let vars: VarSet = "A B C".parse()?;
        let p: Implicant = "1-0".parse()?;
        assert_eq!(format!("{}", p.to_term(&vars, Form::Dnf)), "A * !C");
        assert_eq!(format!("{}", p.to_term(&vars, Form::Cnf)), "(!A + C)");

        let free: Implicant = "---".parse()?;
        assert_eq!(free.to_term(&vars, Form::Dnf), Expr::Constant(true));
        assert_eq!(free.to_term(&vars, Form::Cnf), Expr::Constant(false));
        Ok(())
    }

    #[test]
    fn ordering() -> Result<(), LogicError> {
        let mut patterns: Vec<Implicant> = ["110", "1-1", "--1", "0-0", "011"]
            .iter()
            .map(|s| s.parse())
            .collect::<Result<_, _>>()?;
        patterns.sort();
        let sorted: Vec<String> = patterns.iter().map(|p| format!("{}", p)).collect();
        assert_eq!(sorted, vec!["--1", "0-0", "1-1", "011", "110"]);
        Ok(())
    }
}
