//! Hop enumeration: permutations moving every vertex to a neighbor

use crate::algebra::Permutation;
use crate::core::config::{Budget, ComputeConfig};
use crate::graph::Graph;
use crate::Result;

/// True iff `p` is a hop on `graph`: every vertex maps to one of its
/// neighbors (out-neighbors for a directed graph)
pub fn is_hop(graph: &Graph, p: &Permutation) -> bool {
    p.degree() == graph.order()
        && (0..graph.order()).all(|v| graph.is_neighbor(v, p.apply(v)))
}

/// All hops on `graph`, in ascending images order
///
/// The search assigns images vertex by vertex, restricting candidates to
/// the unused neighbors of the current vertex, so no non-hop permutation
/// is ever materialized. A vertex without neighbors short-circuits the
/// whole search to the empty set.
pub fn hops(graph: &Graph, config: &ComputeConfig) -> Result<Vec<Permutation>> {
    config.validate()?;
    let mut budget = Budget::new(config);
    enumerate_hops(graph, &mut budget)
}

/// The first hop on `graph` in ascending images order, if one exists
pub fn first_hop(graph: &Graph, config: &ComputeConfig) -> Result<Option<Permutation>> {
    config.validate()?;
    let mut budget = Budget::new(config);
    let mut search = HopSearch::new(graph, Some(1));
    search.run(&mut budget)?;
    Ok(search.found.pop())
}

pub(crate) fn enumerate_hops(graph: &Graph, budget: &mut Budget) -> Result<Vec<Permutation>> {
    let mut search = HopSearch::new(graph, None);
    search.run(budget)?;
    Ok(search.found)
}

/// Backtracking state for the constrained image-assignment search
struct HopSearch<'a> {
    graph: &'a Graph,
    images: Vec<usize>,
    used: Vec<bool>,
    found: Vec<Permutation>,
    limit: Option<usize>,
}

impl<'a> HopSearch<'a> {
    fn new(graph: &'a Graph, limit: Option<usize>) -> Self {
        HopSearch {
            graph,
            images: Vec::with_capacity(graph.order()),
            used: vec![false; graph.order()],
            found: Vec::new(),
            limit,
        }
    }

    fn run(&mut self, budget: &mut Budget) -> Result<()> {
        if self.graph.has_isolated_vertex() {
            return Ok(());
        }
        self.extend(budget)?;
        Ok(())
    }

    /// Try every unused neighbor as the image of the next vertex.
    /// Neighbor lists are sorted, so solutions arrive in ascending
    /// images order. Returns true when the result limit is reached.
    fn extend(&mut self, budget: &mut Budget) -> Result<bool> {
        let v = self.images.len();
        if v == self.graph.order() {
            self.found
                .push(Permutation::from_images(self.images.clone())?);
            return Ok(self.limit.map_or(false, |limit| self.found.len() >= limit));
        }

        for &candidate in self.graph.neighbors(v) {
            if self.used[candidate] {
                continue;
            }
            budget.charge_search(1)?;
            self.images.push(candidate);
            self.used[candidate] = true;
            let done = self.extend(budget)?;
            self.used[candidate] = false;
            self.images.pop();
            if done {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]).unwrap()
    }

    fn four_cycle() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap()
    }

    #[test]
    fn test_is_hop_matches_pointwise_definition() {
        let g = four_cycle();
        let rotation = Permutation::from_images(vec![1, 2, 3, 0]).unwrap();
        assert!(is_hop(&g, &rotation));
        assert!((0..4).all(|v| g.is_neighbor(v, rotation.apply(v))));

        // the diagonal swap moves 0 to a non-neighbor
        let diagonal = Permutation::from_images(vec![2, 3, 0, 1]).unwrap();
        assert!(!is_hop(&g, &diagonal));
    }

    #[test]
    fn test_identity_is_never_a_hop() {
        let g = triangle();
        assert!(!is_hop(&g, &Permutation::identity(3)));
    }

    #[test]
    fn test_triangle_hops_are_the_two_rotations() {
        let found = hops(&triangle(), &ComputeConfig::default()).unwrap();
        let expected = vec![
            Permutation::from_images(vec![1, 2, 0]).unwrap(),
            Permutation::from_images(vec![2, 0, 1]).unwrap(),
        ];
        assert_eq!(found, expected);
    }

    #[test]
    fn test_four_cycle_hops() {
        let found = hops(&four_cycle(), &ComputeConfig::default()).unwrap();
        // two rotations and two edge-pair swaps
        assert_eq!(found.len(), 4);
        for p in &found {
            assert!(is_hop(&four_cycle(), p));
        }
        // ascending images order is canonical
        let mut sorted = found.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(found, sorted);
    }

    #[test]
    fn test_recomputation_is_deterministic() {
        let g = four_cycle();
        let config = ComputeConfig::default();
        assert_eq!(hops(&g, &config).unwrap(), hops(&g, &config).unwrap());
    }

    #[test]
    fn test_isolated_vertex_short_circuits() {
        let g = Graph::from_edges(3, &[(0, 1)]).unwrap();
        let tiny = ComputeConfig {
            max_search_steps: 1,
            ..ComputeConfig::default()
        };
        // no search step is ever charged
        assert_eq!(hops(&g, &tiny).unwrap(), Vec::new());
    }

    #[test]
    fn test_directed_out_neighbors() {
        // arcs 0->1, 1->2, 2->0: only the forward rotation is a hop
        let g = Graph::from_arcs(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let found = hops(&g, &ComputeConfig::default()).unwrap();
        assert_eq!(
            found,
            vec![Permutation::from_images(vec![1, 2, 0]).unwrap()]
        );
    }

    #[test]
    fn test_first_hop_stops_early() {
        let g = triangle();
        let first = first_hop(&g, &ComputeConfig::default()).unwrap();
        assert_eq!(
            first,
            Some(Permutation::from_images(vec![1, 2, 0]).unwrap())
        );

        let empty = Graph::from_edges(2, &[]).unwrap();
        assert_eq!(first_hop(&empty, &ComputeConfig::default()).unwrap(), None);
    }

    #[test]
    fn test_budget_exhaustion() {
        // complete graph on 9 vertices: far more steps than the budget
        let mut edges = Vec::new();
        for u in 0..9 {
            for v in (u + 1)..9 {
                edges.push((u, v));
            }
        }
        let g = Graph::from_edges(9, &edges).unwrap();
        let tiny = ComputeConfig {
            max_search_steps: 50,
            ..ComputeConfig::default()
        };
        assert!(matches!(
            hops(&g, &tiny),
            Err(crate::LeaperError::ResourceExhausted(_))
        ));
    }
}
