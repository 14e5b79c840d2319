//! Leap-n generator sets: n-fold compositions of hops

use std::collections::BTreeSet;

use crate::algebra::Permutation;
use crate::core::config::Budget;
use crate::Result;

/// The generator set of the nth leap group: all compositions
/// `h1 . h2 . ... . hn` of hops, deduplicated, in ascending images order
///
/// Built iteratively, one composition level per round, so the budget is
/// checked between levels and no recursion depth is involved. `n = 0`
/// yields the identity alone; `n = 1` returns the hop set unchanged.
pub(crate) fn leap_generators(
    hops: &[Permutation],
    degree: usize,
    n: u32,
    budget: &mut Budget,
) -> Result<Vec<Permutation>> {
    if n == 0 {
        return Ok(vec![Permutation::identity(degree)]);
    }

    // Deduplicating each level preserves the final set: the products of
    // length k are exactly hops composed with the distinct products of
    // length k - 1.
    let mut current: BTreeSet<Permutation> = hops.iter().cloned().collect();
    for _ in 1..n {
        budget.charge_generators((hops.len() * current.len()) as u64)?;
        let mut next = BTreeSet::new();
        for h in hops {
            for q in &current {
                next.insert(h.compose(q));
            }
        }
        current = next;
    }

    Ok(current.into_iter().collect())
}
