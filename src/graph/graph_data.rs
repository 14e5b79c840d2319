//! Immutable graph built once per request from an edge list

use serde::{Deserialize, Serialize};

use crate::{LeaperError, Result};

/// A finite graph on vertices `0..n`, stored as sorted neighbor lists
///
/// - No vertex is its own neighbor (self-loop edges are rejected)
/// - For undirected graphs the adjacency relation is symmetric
/// - For directed graphs `neighbors(v)` are the out-neighbors of `v`
/// - Immutable once built; all computations treat it as read-only input
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    neighbors: Vec<Vec<usize>>,
    directed: bool,
    num_edges: usize,
}

impl Graph {
    /// Build an undirected graph from 0-indexed edge endpoints
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        Self::build(n, edges, false)
    }

    /// Build a directed graph from 0-indexed `(source, target)` pairs
    pub fn from_arcs(n: usize, arcs: &[(usize, usize)]) -> Result<Self> {
        Self::build(n, arcs, true)
    }

    fn build(n: usize, edges: &[(usize, usize)], directed: bool) -> Result<Self> {
        let mut neighbors = vec![Vec::new(); n];

        for &(u, v) in edges {
            if u >= n || v >= n {
                return Err(LeaperError::InvalidGraph(format!(
                    "edge ({}, {}) out of range for {} vertices",
                    u, v, n
                )));
            }
            if u == v {
                return Err(LeaperError::InvalidGraph(format!(
                    "self-loop at vertex {}",
                    u
                )));
            }
            neighbors[u].push(v);
            if !directed {
                neighbors[v].push(u);
            }
        }

        let mut num_edges = 0;
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
            num_edges += list.len();
        }
        if !directed {
            num_edges /= 2;
        }

        Ok(Graph {
            neighbors,
            directed,
            num_edges,
        })
    }

    /// Number of vertices
    pub fn order(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of edges (arcs for a directed graph)
    pub fn size(&self) -> usize {
        self.num_edges
    }

    /// Whether this graph is directed
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Neighbors of `v` in ascending order (out-neighbors if directed)
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.neighbors[v]
    }

    /// Degree of `v` (out-degree if directed)
    pub fn degree(&self, v: usize) -> usize {
        self.neighbors[v].len()
    }

    /// True iff `u` is adjacent to `v` (an arc `u -> v` if directed)
    pub fn is_neighbor(&self, u: usize, v: usize) -> bool {
        self.neighbors[u].binary_search(&v).is_ok()
    }

    /// True iff some vertex has no neighbors to hop to
    pub fn has_isolated_vertex(&self) -> bool {
        self.neighbors.iter().any(|list| list.is_empty())
    }
}
