//! # Leaper: leap groups of finite graphs
//!
//! This library computes algebraic invariants of *leap groups*: permutation
//! groups derived from a finite graph by identifying *hops* (permutations
//! that move every vertex to one of its neighbors) and forming the group
//! generated by all length-n compositions of hops.
//!
//! ## Features
//!
//! - **Permutation algebra**: composition, inversion, cycle notation
//! - **Hop enumeration**: pruned backtracking search over a graph
//! - **Group closure**: exact order and membership via Schreier-Sims
//! - **Structure classification**: best-effort names for small groups
//! - **Batch driver**: parallel per-graph rows with failure isolation

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Permutation value type and its algebra
pub mod algebra;

/// Immutable graph data model
pub mod graph;

/// The leap-group computation engine
pub mod core;

/// Boundary types and operations for the web layer (1-indexed)
pub mod api;

/// Batch driver support: many graphs, one row each
pub mod batch;

/// Utility functions and helpers
pub mod utils;

// Re-export commonly used types
pub use crate::algebra::Permutation;
pub use crate::core::{leap_group, ComputeConfig, LeapGroup, StabilizerChain};
pub use crate::graph::Graph;

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum LeaperError {
    /// Malformed graph input (out-of-range or self-loop edge)
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// A sequence that is not a bijection of the expected size
    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    /// A search or closure exceeded its configured budget
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, LeaperError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        algebra::Permutation,
        api::{GraphInput, HopsResponse, LeapGroupResponse},
        core::{ComputeConfig, LeapGroup, StabilizerChain, leap_group},
        graph::Graph,
        LeaperError, Result,
    };
}
