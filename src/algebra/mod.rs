//! Permutations of a finite point set and their algebra

mod permutation;

pub use permutation::Permutation;
