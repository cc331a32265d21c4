//! Selection of prime implicants covering all required rows

use crate::*;

use bit_set::BitSet;
use std::cmp::Reverse;

/// Result of the cover selection.
///
/// Each alternative, combined with the essential implicants, covers all required rows.
/// All alternatives have the same cost (number of implicants, then number of literals).
pub(crate) struct Cover {
    pub essential: Vec<Implicant>,
    pub alternatives: Vec<Vec<Implicant>>,
}

/// Select the prime implicants covering a list of required rows.
///
/// Implicants which are the only candidate for at least one row are essential. The rows which are
/// not covered by the essential implicants are then covered using Petrick's method: the product of
/// the sums of candidates for each row is expanded and reduced by absorption, and the products with
/// the lowest cost are retained. If the number of intermediate products exceeds the limit, a single
/// alternative is picked by greedy selection.
pub(crate) fn select_cover(primes: &Primes, required: &[usize], limits: &Limits) -> Cover {
    let candidates: Vec<Implicant> = primes
        .iter()
        .filter(|p| required.iter().any(|row| p.covers(*row)))
        .copied()
        .collect();

    // Candidates covering each required row
    let coverers: Vec<BitSet> = required
        .iter()
        .map(|row| {
            candidates
                .iter()
                .enumerate()
                .filter(|(_, p)| p.covers(*row))
                .map(|(idx, _)| idx)
                .collect()
        })
        .collect();

    let mut essential = BitSet::new();
    for c in coverers.iter().filter(|c| c.len() == 1) {
        essential.union_with(c);
    }

    let mut remaining: Vec<BitSet> = coverers
        .into_iter()
        .filter(|c| c.is_disjoint(&essential))
        .collect();
    remaining.sort();
    remaining.dedup();

    debug!(
        "{} candidates for {} required rows: {} essential, {} rows left",
        candidates.len(),
        required.len(),
        essential.len(),
        remaining.len()
    );

    let products = match petrick(&remaining, limits.max_cover_terms) {
        Some(products) => products,
        None => {
            warn!(
                "Exact cover search exceeds {} products, falling back to greedy selection",
                limits.max_cover_terms
            );
            vec![greedy(&remaining, &candidates)]
        }
    };

    let cost = |selection: &BitSet| {
        let literals: usize = selection.iter().map(|i| candidates[i].fixed_count()).sum();
        (selection.len(), literals)
    };
    let best = products.iter().map(cost).min();
    let mut alternatives: Vec<Vec<Implicant>> = products
        .iter()
        .filter(|s| Some(cost(s)) == best)
        .map(|s| s.iter().map(|i| candidates[i]).collect())
        .collect();
    alternatives.sort();
    debug!("Found {} minimal alternatives", alternatives.len());

    Cover {
        essential: essential.iter().map(|i| candidates[i]).collect(),
        alternatives,
    }
}

/// Expand the product of sums of candidates.
///
/// Return None if the number of products exceeds the budget.
fn petrick(rows: &[BitSet], budget: usize) -> Option<Vec<BitSet>> {
    let mut products = vec![BitSet::new()];
    for coverers in rows {
        if products.len().saturating_mul(coverers.len()) > budget {
            return None;
        }
        let mut next = Vec::with_capacity(products.len() * coverers.len());
        for p in &products {
            if !p.is_disjoint(coverers) {
                next.push(p.clone());
                continue;
            }
            for c in coverers {
                let mut q = p.clone();
                q.insert(c);
                next.push(q);
            }
        }
        products = absorb(next);
        trace!("{} products after absorption", products.len());
    }
    Some(products)
}

/// Remove the products which contain another product
pub(crate) fn absorb(mut products: Vec<BitSet>) -> Vec<BitSet> {
    products.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    products.dedup();
    let mut kept: Vec<BitSet> = Vec::with_capacity(products.len());
    for p in products {
        if !kept.iter().any(|k| k.is_subset(&p)) {
            kept.push(p);
        }
    }
    kept
}

/// Pick candidates covering the most uncovered rows until all rows are covered.
///
/// Ties are broken by the number of literals, then by the order of the candidates.
fn greedy(rows: &[BitSet], candidates: &[Implicant]) -> BitSet {
    let mut uncovered: Vec<&BitSet> = rows.iter().collect();
    let mut selection = BitSet::new();
    while !uncovered.is_empty() {
        let best = (0..candidates.len())
            .filter(|i| !selection.contains(*i))
            .max_by_key(|&i| {
                let count = uncovered.iter().filter(|c| c.contains(i)).count();
                (count, Reverse(candidates[i].fixed_count()), Reverse(i))
            });
        let best = match best {
            Some(i) => i,
            None => break,
        };
        selection.insert(best);
        uncovered.retain(|c| !c.contains(best));
    }
    selection
}

#[cfg(test)]
mod tests {
    use crate::cover::*;

    fn set(items: &[usize]) -> BitSet {
        items.iter().copied().collect()
    }

    #[test]
    fn absorption() {
        assert_eq!(absorb(vec![set(&[0]), set(&[0, 1])]), vec![set(&[0])]);
        assert_eq!(
            absorb(vec![set(&[0, 1]), set(&[0, 2])]),
            vec![set(&[0, 1]), set(&[0, 2])]
        );
        assert_eq!(
            absorb(vec![set(&[0, 1]), set(&[0, 2]), set(&[0])]),
            vec![set(&[0])]
        );
        assert_eq!(
            absorb(vec![set(&[0, 1]), set(&[0, 2]), set(&[2])]),
            vec![set(&[2]), set(&[0, 1])]
        );
    }

    #[test]
    fn essential_and_alternatives() -> Result<(), LogicError> {
        // Rows 4, 8, 10, 11, 12, 15 with don't care rows 9 and 14
        let primes = Primes::from_rows(4, [4, 8, 9, 10, 11, 12, 14, 15])?;
        let cover = select_cover(&primes, &[4, 8, 10, 11, 12, 15], &Limits::default());

        let essential: Vec<String> = cover.essential.iter().map(|p| format!("{}", p)).collect();
        assert_eq!(essential, vec!["1-1-", "-100"]);

        let alternatives: Vec<Vec<String>> = cover
            .alternatives
            .iter()
            .map(|a| a.iter().map(|p| format!("{}", p)).collect())
            .collect();
        assert_eq!(alternatives, vec![vec!["10--"], vec!["1--0"]]);
        Ok(())
    }

    #[test]
    fn greedy_fallback() -> Result<(), LogicError> {
        // Cyclic cover: no essential implicant, several alternatives
        let primes = Primes::from_rows(3, [0, 1, 2, 5, 6, 7])?;
        let required = [0, 1, 2, 5, 6, 7];

        let exact = select_cover(&primes, &required, &Limits::default());
        assert!(exact.essential.is_empty());
        assert_eq!(exact.alternatives.len(), 2);
        assert!(exact.alternatives.iter().all(|a| a.len() == 3));

        let limits = Limits::default().with_max_cover_terms(1);
        let greedy = select_cover(&primes, &required, &limits);
        assert_eq!(greedy.alternatives.len(), 1);
        let selection = &greedy.alternatives[0];
        for row in required {
            assert!(selection.iter().any(|p| p.covers(row)));
        }
        Ok(())
    }

    #[test]
    fn nothing_required() -> Result<(), LogicError> {
        let primes = Primes::from_rows(2, [1])?;
        let cover = select_cover(&primes, &[], &Limits::default());
        assert!(cover.essential.is_empty());
        assert_eq!(cover.alternatives, vec![Vec::<Implicant>::new()]);
        Ok(())
    }
}
