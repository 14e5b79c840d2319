//! Boundary types and operations for the web layer
//!
//! Everything here speaks the external 1-indexed convention: vertices
//! are labelled `1..=n` and permutations arrive and leave in 1-indexed
//! one-line notation. Conversion to the crate's 0-indexed core happens
//! exactly once, at this boundary.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::algebra::Permutation;
use crate::core::{self, ComputeConfig};
use crate::graph::Graph;
use crate::{LeaperError, Result};

/// A graph as submitted by a client: vertex labels `1..=n` plus an edge
/// list of unordered (ordered, if directed) 1-indexed pairs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphInput {
    /// Vertex labels; must be exactly `1..=n`
    pub vertices: Vec<usize>,
    /// Edge endpoints, 1-indexed
    pub edges: Vec<(usize, usize)>,
    /// Treat the edge list as directed arcs
    #[serde(default)]
    pub directed: bool,
}

/// One hop, in both external notations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HopData {
    /// 1-indexed one-line notation
    pub one_line: Vec<usize>,
    /// Disjoint-cycle notation, 1-indexed
    pub cycle: String,
}

/// The hops of a graph, in ascending one-line order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HopsResponse {
    /// The hops themselves
    pub hops: Vec<HopData>,
    /// Number of hops returned
    pub count: usize,
}

/// Order and structure of a computed leap group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeapGroupResponse {
    /// Best-effort structure description
    pub structure: String,
    /// Exact group order
    pub order: BigUint,
}

/// A hop-verification request: a graph plus a candidate permutation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifyHopRequest {
    /// Vertex labels; must be exactly `1..=n`
    pub vertices: Vec<usize>,
    /// Edge endpoints, 1-indexed
    pub edges: Vec<(usize, usize)>,
    /// Candidate permutation in 1-indexed one-line notation
    pub one_line: Vec<usize>,
    /// Treat the edge list as directed arcs
    #[serde(default)]
    pub directed: bool,
}

impl GraphInput {
    /// A plain undirected input for `1..=n` vertices
    pub fn new(n: usize, edges: Vec<(usize, usize)>) -> Self {
        GraphInput {
            vertices: (1..=n).collect(),
            edges,
            directed: false,
        }
    }
}

/// Convert a 1-indexed boundary graph into the internal 0-indexed form
fn build_graph(vertices: &[usize], edges: &[(usize, usize)], directed: bool) -> Result<Graph> {
    let n = vertices.len();
    for (i, &label) in vertices.iter().enumerate() {
        if label != i + 1 {
            return Err(LeaperError::InvalidGraph(format!(
                "vertex labels must be 1..={}, found {} at position {}",
                n, label, i
            )));
        }
    }

    let mut shifted = Vec::with_capacity(edges.len());
    for &(u, v) in edges {
        if u == 0 || v == 0 {
            return Err(LeaperError::InvalidGraph(format!(
                "edge ({}, {}) uses 0; external vertices are 1-indexed",
                u, v
            )));
        }
        shifted.push((u - 1, v - 1));
    }

    if directed {
        Graph::from_arcs(n, &shifted)
    } else {
        Graph::from_edges(n, &shifted)
    }
}

fn hop_data(p: &Permutation) -> HopData {
    HopData {
        one_line: p.one_line(),
        cycle: p.cycle_notation(),
    }
}

/// Compute the nth leap group of the submitted graph
pub fn compute_leap_group(
    input: &GraphInput,
    n: u32,
    config: &ComputeConfig,
) -> Result<LeapGroupResponse> {
    let graph = build_graph(&input.vertices, &input.edges, input.directed)?;
    let lg = core::leap_group(&graph, n, config)?;
    Ok(LeapGroupResponse {
        structure: lg.description,
        order: lg.order,
    })
}

/// List every hop of the submitted graph
pub fn list_hops(input: &GraphInput, config: &ComputeConfig) -> Result<HopsResponse> {
    let graph = build_graph(&input.vertices, &input.edges, input.directed)?;
    let hops = core::hops(&graph, config)?;
    let hops: Vec<HopData> = hops.iter().map(hop_data).collect();
    let count = hops.len();
    Ok(HopsResponse { hops, count })
}

/// Return the first hop of the submitted graph, or an empty response
pub fn first_hop(input: &GraphInput, config: &ComputeConfig) -> Result<HopsResponse> {
    let graph = build_graph(&input.vertices, &input.edges, input.directed)?;
    let hops: Vec<HopData> = core::first_hop(&graph, config)?
        .iter()
        .map(hop_data)
        .collect();
    let count = hops.len();
    Ok(HopsResponse { hops, count })
}

/// Check whether the submitted one-line sequence is a hop of the graph
///
/// Fails with [`LeaperError::InvalidPermutation`] when the sequence has
/// the wrong length or is not a bijection on `1..=n`; the predicate is
/// never evaluated in that case.
pub fn verify_hop(request: &VerifyHopRequest) -> Result<bool> {
    let graph = build_graph(&request.vertices, &request.edges, request.directed)?;
    if request.one_line.len() != graph.order() {
        return Err(LeaperError::InvalidPermutation(format!(
            "one-line length {} does not match vertex count {}",
            request.one_line.len(),
            graph.order()
        )));
    }
    let p = Permutation::from_one_line(&request.one_line)?;
    Ok(core::is_hop(&graph, &p))
}
