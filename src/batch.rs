//! Batch driver support: one result row per graph
//!
//! Graph generation, chromatic numbers and image rendering belong to
//! external collaborators; their outputs arrive here as optional fields
//! on each entry. This module contributes the per-graph leap-group
//! columns, fanned out over a rayon worker pool. A failure on one entry
//! (budget overrun, degenerate input) becomes an absent column in that
//! row and never aborts the batch.

use std::collections::HashMap;

use num_bigint::BigUint;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{leap_group, ComputeConfig};
use crate::graph::Graph;

/// Read-only canonical-signature to display-name table, injected at
/// batch start by whoever owns the naming data
#[derive(Clone, Debug, Default)]
pub struct NameLookup {
    names: HashMap<String, String>,
}

impl NameLookup {
    /// Build a lookup from (signature, name) pairs
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        NameLookup {
            names: entries.into_iter().collect(),
        }
    }

    /// Resolve a canonical signature to a display name
    pub fn get(&self, signature: &str) -> Option<&str> {
        self.names.get(signature).map(String::as_str)
    }
}

/// One graph to process, with whatever the external collaborators have
/// already computed for it
#[derive(Clone, Debug)]
pub struct BatchEntry {
    /// Display name, if already known
    pub name: Option<String>,
    /// Canonical signature used against the name lookup
    pub signature: Option<String>,
    /// The graph itself
    pub graph: Graph,
    /// Chromatic number, computed externally
    pub chromatic_number: Option<u32>,
    /// Rendered image path, produced externally
    pub image_path: Option<String>,
}

/// Leap-group result for one leap order; both fields absent when the
/// computation failed for this entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeapColumn {
    /// Structure description
    pub structure: Option<String>,
    /// Group order
    pub order: Option<BigUint>,
}

/// One output row, ready for CSV or JSON serialization by the caller
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    /// Display name: explicit, looked up, or the signature itself
    pub name: Option<String>,
    /// Vertex count
    pub vertices: usize,
    /// Edge count
    pub edges: usize,
    /// Chromatic number, when the external collaborator produced one
    pub chromatic_number: Option<u32>,
    /// Image path, when rendering was enabled
    pub image_path: Option<String>,
    /// One column per leap order `1..=max_leap_order`
    pub leaps: Vec<LeapColumn>,
}

/// Process every entry, one row each, in parallel
pub fn run_batch(
    entries: &[BatchEntry],
    max_leap_order: u32,
    config: &ComputeConfig,
    names: Option<&NameLookup>,
) -> Vec<BatchRow> {
    entries
        .par_iter()
        .map(|entry| row_for(entry, max_leap_order, config, names))
        .collect()
}

fn row_for(
    entry: &BatchEntry,
    max_leap_order: u32,
    config: &ComputeConfig,
    names: Option<&NameLookup>,
) -> BatchRow {
    let name = entry.name.clone().or_else(|| {
        let signature = entry.signature.as_deref()?;
        match names.and_then(|lookup| lookup.get(signature)) {
            Some(found) => Some(found.to_string()),
            // unnamed graphs fall back to their signature, the way the
            // generator's canonical string is used as a name
            None => Some(signature.to_string()),
        }
    });

    let leaps = (1..=max_leap_order)
        .map(|n| match leap_group(&entry.graph, n, config) {
            Ok(lg) => LeapColumn {
                structure: Some(lg.description),
                order: Some(lg.order),
            },
            Err(_) => LeapColumn {
                structure: None,
                order: None,
            },
        })
        .collect();

    BatchRow {
        name,
        vertices: entry.graph.order(),
        edges: entry.graph.size(),
        chromatic_number: entry.chromatic_number,
        image_path: entry.image_path.clone(),
        leaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(graph: Graph) -> BatchEntry {
        BatchEntry {
            name: None,
            signature: None,
            graph,
            chromatic_number: None,
            image_path: None,
        }
    }

    fn triangle() -> Graph {
        Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]).unwrap()
    }

    #[test]
    fn test_rows_line_up_with_entries() {
        let entries = vec![
            entry(triangle()),
            entry(Graph::from_edges(2, &[(0, 1)]).unwrap()),
        ];
        let rows = run_batch(&entries, 2, &ComputeConfig::default(), None);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].vertices, 3);
        assert_eq!(rows[0].edges, 3);
        assert_eq!(rows[0].leaps.len(), 2);
        assert_eq!(
            rows[0].leaps[0].structure.as_deref(),
            Some("cyclic group of order 3")
        );
        // the single edge graph: its only hop is the swap
        assert_eq!(rows[1].leaps[0].order, Some(BigUint::from(2u32)));
    }

    #[test]
    fn test_failed_entry_is_isolated() {
        let mut edges = Vec::new();
        for u in 0..10 {
            for v in (u + 1)..10 {
                edges.push((u, v));
            }
        }
        let big = Graph::from_edges(10, &edges).unwrap();

        let tiny = ComputeConfig {
            max_search_steps: 50,
            max_generators: 50,
            max_closure_steps: 50,
            deadline: None,
        };
        let entries = vec![entry(big), entry(triangle())];
        let rows = run_batch(&entries, 1, &tiny, None);

        // the oversized graph overruns its budget; the triangle still
        // completes within the same batch
        assert_eq!(rows[0].leaps[0], LeapColumn { structure: None, order: None });
        assert_eq!(rows[1].leaps[0].order, Some(BigUint::from(3u32)));
    }

    #[test]
    fn test_name_resolution_order() {
        let lookup = NameLookup::new([("sigK3".to_string(), "Triangle".to_string())]);

        let named = BatchEntry {
            name: Some("explicit".to_string()),
            signature: Some("sigK3".to_string()),
            ..entry(triangle())
        };
        let looked_up = BatchEntry {
            signature: Some("sigK3".to_string()),
            ..entry(triangle())
        };
        let fallback = BatchEntry {
            signature: Some("unknown-sig".to_string()),
            ..entry(triangle())
        };

        let rows = run_batch(
            &[named, looked_up, fallback],
            0,
            &ComputeConfig::default(),
            Some(&lookup),
        );
        assert_eq!(rows[0].name.as_deref(), Some("explicit"));
        assert_eq!(rows[1].name.as_deref(), Some("Triangle"));
        assert_eq!(rows[2].name.as_deref(), Some("unknown-sig"));
    }

    #[test]
    fn test_chromatic_and_image_pass_through() {
        let mut e = entry(triangle());
        e.chromatic_number = Some(3);
        e.image_path = Some("images/graph_0.png".to_string());
        let rows = run_batch(&[e], 1, &ComputeConfig::default(), None);
        assert_eq!(rows[0].chromatic_number, Some(3));
        assert_eq!(rows[0].image_path.as_deref(), Some("images/graph_0.png"));
    }
}
