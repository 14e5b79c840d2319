//! Utility functions for leaper

use std::fs::File;
use std::io::{Read, Write};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algebra::Permutation;
use crate::graph::Graph;

/// Save object to JSON file
pub fn save_json<T: Serialize>(obj: &T, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(obj)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Load object from JSON file
pub fn load_json<T: for<'de> Deserialize<'de>>(
    path: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let obj = serde_json::from_str(&contents)?;
    Ok(obj)
}

/// Generate a uniformly random permutation of `n` points
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Permutation {
    let mut images: Vec<usize> = (0..n).collect();
    images.shuffle(rng);
    Permutation::from_images(images).expect("a shuffled range is a permutation")
}

/// Generate a random undirected graph on `n` vertices where each edge
/// appears independently with probability `p`
pub fn random_graph<R: Rng>(n: usize, p: f64, rng: &mut R) -> Graph {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                edges.push((u, v));
            }
        }
    }
    Graph::from_edges(n, &edges).expect("generated endpoints are in range")
}
