//! Permutation value type: bijections on {0..n-1}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{LeaperError, Result};

/// A permutation of `{0..n-1}`, stored as its images array
///
/// - `images[v]` is the image of point `v`
/// - Equality, ordering and hashing are lexicographic on the images array
/// - Immutable once constructed; all operations return new values
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Permutation {
    images: Vec<usize>,
}

impl Permutation {
    /// The identity permutation on `n` points
    pub fn identity(n: usize) -> Self {
        Permutation {
            images: (0..n).collect(),
        }
    }

    /// Build a permutation from a 0-indexed images array
    ///
    /// Fails unless the array contains every point of `0..n` exactly once.
    pub fn from_images(images: Vec<usize>) -> Result<Self> {
        let n = images.len();
        let mut seen = vec![false; n];

        for &image in &images {
            if image >= n {
                return Err(LeaperError::InvalidPermutation(format!(
                    "image {} out of range for degree {}",
                    image, n
                )));
            }
            if seen[image] {
                return Err(LeaperError::InvalidPermutation(format!(
                    "image {} repeated",
                    image
                )));
            }
            seen[image] = true;
        }

        Ok(Permutation { images })
    }

    /// Build a permutation from 1-indexed one-line notation
    ///
    /// `[2, 3, 1]` maps 1->2, 2->3, 3->1 externally, i.e. 0->1, 1->2, 2->0
    /// internally. Fails on a zero entry or a non-bijection.
    pub fn from_one_line(one_line: &[usize]) -> Result<Self> {
        let mut images = Vec::with_capacity(one_line.len());
        for &image in one_line {
            if image == 0 {
                return Err(LeaperError::InvalidPermutation(
                    "one-line notation is 1-indexed; found 0".to_string(),
                ));
            }
            images.push(image - 1);
        }
        Self::from_images(images)
    }

    /// The 1-indexed one-line form of this permutation
    pub fn one_line(&self) -> Vec<usize> {
        self.images.iter().map(|&v| v + 1).collect()
    }

    /// Number of points this permutation acts on
    pub fn degree(&self) -> usize {
        self.images.len()
    }

    /// The 0-indexed images array
    pub fn images(&self) -> &[usize] {
        &self.images
    }

    /// Image of a single point
    pub fn apply(&self, v: usize) -> usize {
        self.images[v]
    }

    /// Composition `self . other`: apply `other` first, then `self`
    ///
    /// This is the one composition convention of the whole crate;
    /// generator building and stabilizer-chain sifting both rely on it.
    pub fn compose(&self, other: &Permutation) -> Permutation {
        assert_eq!(
            self.degree(),
            other.degree(),
            "composing permutations of different degree"
        );
        Permutation {
            images: other.images.iter().map(|&v| self.images[v]).collect(),
        }
    }

    /// The inverse permutation
    pub fn inverse(&self) -> Permutation {
        let mut images = vec![0; self.images.len()];
        for (v, &image) in self.images.iter().enumerate() {
            images[image] = v;
        }
        Permutation { images }
    }

    /// True iff every point is fixed
    pub fn is_identity(&self) -> bool {
        self.images.iter().enumerate().all(|(v, &image)| v == image)
    }

    /// The smallest point moved by this permutation, if any
    pub fn smallest_moved_point(&self) -> Option<usize> {
        self.images
            .iter()
            .enumerate()
            .find(|&(v, &image)| v != image)
            .map(|(v, _)| v)
    }

    /// Decompose into nontrivial cycles (0-indexed, each starting at its
    /// smallest point, cycles ordered by that point)
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let n = self.images.len();
        let mut seen = vec![false; n];
        let mut cycles = Vec::new();

        for start in 0..n {
            if seen[start] || self.images[start] == start {
                continue;
            }
            let mut cycle = vec![start];
            seen[start] = true;
            let mut v = self.images[start];
            while v != start {
                seen[v] = true;
                cycle.push(v);
                v = self.images[v];
            }
            cycles.push(cycle);
        }

        cycles
    }

    /// Disjoint-cycle string form, 1-indexed, fixed points omitted
    ///
    /// The identity renders as `"()"`, matching the external convention
    /// used alongside 1-indexed one-line notation.
    pub fn cycle_notation(&self) -> String {
        let cycles = self.cycles();
        if cycles.is_empty() {
            return "()".to_string();
        }
        let mut out = String::new();
        for cycle in cycles {
            out.push('(');
            for (i, v) in cycle.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&(v + 1).to_string());
            }
            out.push(')');
        }
        out
    }

    /// Multiplicative order of this permutation (lcm of its cycle lengths)
    pub fn element_order(&self) -> u64 {
        self.cycles()
            .iter()
            .fold(1u64, |acc, cycle| lcm(acc, cycle.len() as u64))
    }

    /// True iff `self` and `other` commute
    pub fn commutes_with(&self, other: &Permutation) -> bool {
        self.compose(other) == other.compose(self)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permutation({:?})", self.images)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cycle_notation())
    }
}
