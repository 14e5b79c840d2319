//! End-to-end leap-group computation for a single graph

use num_bigint::BigUint;

use crate::core::classify::describe_group;
use crate::core::closure::StabilizerChain;
use crate::core::config::{Budget, ComputeConfig};
use crate::core::generators::leap_generators;
use crate::core::hops::enumerate_hops;
use crate::graph::Graph;
use crate::Result;

/// The computed nth leap group of a graph
pub struct LeapGroup {
    /// Best-effort isomorphism description
    pub description: String,
    /// Exact group order
    pub order: BigUint,
    chain: StabilizerChain,
}

impl LeapGroup {
    /// The underlying stabilizer chain, usable for membership tests
    pub fn chain(&self) -> &StabilizerChain {
        &self.chain
    }
}

/// Compute the nth leap group of `graph`
///
/// Enumerates the hops of the graph, forms all length-`n` compositions
/// as generators, closes them into a stabilizer chain and classifies the
/// result. All three stages draw on the budgets in `config`; an overrun
/// aborts with [`crate::LeaperError::ResourceExhausted`] and partial
/// work is discarded.
pub fn leap_group(graph: &Graph, n: u32, config: &ComputeConfig) -> Result<LeapGroup> {
    config.validate()?;
    let mut budget = Budget::new(config);

    let hop_set = enumerate_hops(graph, &mut budget)?;
    let generators = leap_generators(&hop_set, graph.order(), n, &mut budget)?;
    let chain = StabilizerChain::build_with_budget(graph.order(), &generators, &mut budget)?;

    let order = chain.order();
    let description = describe_group(&order, chain.strong_generators());

    Ok(LeapGroup {
        description,
        order,
        chain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Permutation;
    use crate::LeaperError;
    use std::collections::BTreeSet;

    fn triangle() -> Graph {
        Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]).unwrap()
    }

    fn four_cycle() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap()
    }

    fn complete_graph(n: usize) -> Graph {
        let mut edges = Vec::new();
        for u in 0..n {
            for v in (u + 1)..n {
                edges.push((u, v));
            }
        }
        Graph::from_edges(n, &edges).unwrap()
    }

    #[test]
    fn test_triangle_leap_one_is_cyclic_of_order_3() {
        let lg = leap_group(&triangle(), 1, &ComputeConfig::default()).unwrap();
        assert_eq!(lg.order, BigUint::from(3u32));
        assert_eq!(lg.description, "cyclic group of order 3");
        // both rotations are members, no transposition is
        assert!(lg
            .chain()
            .is_member(&Permutation::from_images(vec![2, 0, 1]).unwrap()));
        assert!(!lg
            .chain()
            .is_member(&Permutation::from_images(vec![1, 0, 2]).unwrap()));
    }

    #[test]
    fn test_leap_zero_is_trivial() {
        let lg = leap_group(&triangle(), 0, &ComputeConfig::default()).unwrap();
        assert_eq!(lg.order, BigUint::from(1u32));
        assert_eq!(lg.description, "trivial group");
    }

    #[test]
    fn test_path_graph_has_no_hops() {
        // middle vertex is wanted by both ends; no hop exists
        let g = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let lg = leap_group(&g, 1, &ComputeConfig::default()).unwrap();
        assert_eq!(lg.order, BigUint::from(1u32));
        assert_eq!(lg.description, "trivial group");
    }

    #[test]
    fn test_four_cycle_leap_one_matches_oracle() {
        let g = four_cycle();
        let lg = leap_group(&g, 1, &ComputeConfig::default()).unwrap();

        // independent brute-force closure over the hop set
        let hop_set = crate::core::hops::hops(&g, &ComputeConfig::default()).unwrap();
        let mut elements: BTreeSet<Permutation> = BTreeSet::new();
        elements.insert(Permutation::identity(4));
        loop {
            let fresh: Vec<_> = elements
                .iter()
                .flat_map(|e| hop_set.iter().map(move |h| h.compose(e)))
                .filter(|p| !elements.contains(p))
                .collect();
            if fresh.is_empty() {
                break;
            }
            elements.extend(fresh);
        }

        assert_eq!(lg.order, BigUint::from(elements.len()));
        assert_eq!(lg.order, BigUint::from(8u32));
        assert_eq!(lg.description, "dihedral group of order 8");
        for e in &elements {
            assert!(lg.chain().is_member(e));
        }
    }

    #[test]
    fn test_triangle_leap_two_gains_the_identity() {
        // squares of the two rotations still generate the same rotations
        let lg = leap_group(&triangle(), 2, &ComputeConfig::default()).unwrap();
        assert_eq!(lg.order, BigUint::from(3u32));
        assert_eq!(lg.description, "cyclic group of order 3");
    }

    #[test]
    fn test_complete_graph_leap_one() {
        // hops of K4 are the 9 derangements of 4 points; they generate
        // the full symmetric group
        let lg = leap_group(&complete_graph(4), 1, &ComputeConfig::default()).unwrap();
        assert_eq!(lg.order, BigUint::from(24u32));
        assert_eq!(lg.description, "group of order 24");
    }

    #[test]
    fn test_tiny_budget_aborts_instead_of_hanging() {
        let tiny = ComputeConfig {
            max_search_steps: 100,
            max_generators: 100,
            max_closure_steps: 100,
            deadline: None,
        };
        let result = leap_group(&complete_graph(12), 3, &tiny);
        assert!(matches!(result, Err(LeaperError::ResourceExhausted(_))));
    }
}
