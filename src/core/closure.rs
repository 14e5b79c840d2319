//! Exact group closure via a base and strong generating set
//!
//! Builds a stabilizer chain (Schreier-Sims) from an arbitrary generator
//! set. The chain gives the exact group order as a product of orbit sizes
//! and decides membership by sifting, in time polynomial in the degree
//! and the number of generators rather than factorial in the degree.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use num_bigint::BigUint;
use num_traits::One;

use crate::algebra::Permutation;
use crate::core::config::{Budget, ComputeConfig};
use crate::Result;

/// One level of the chain: a base point, the generators of the subgroup
/// stabilizing all earlier base points, and the orbit of the base point
/// under those generators with one transversal witness per orbit point
#[derive(Clone, Debug)]
struct Level {
    base: usize,
    gens: Vec<Permutation>,
    /// orbit point -> u with u(base) = point
    transversal: BTreeMap<usize, Permutation>,
}

impl Level {
    fn new(base: usize) -> Self {
        Level {
            base,
            gens: Vec::new(),
            transversal: BTreeMap::new(),
        }
    }
}

/// A base and strong generating set for a permutation group
///
/// Invariant: the group order is the product of orbit sizes across all
/// levels, and a permutation belongs to the group iff sifting it through
/// the chain reduces it to the identity.
pub struct StabilizerChain {
    degree: usize,
    levels: Vec<Level>,
}

impl StabilizerChain {
    /// Build the chain for the group generated by `generators` on
    /// `degree` points
    ///
    /// Duplicate and identity generators are ignored; an empty generator
    /// set yields the trivial group. Work is charged against the closure
    /// budget of `config`.
    pub fn build(
        degree: usize,
        generators: &[Permutation],
        config: &ComputeConfig,
    ) -> Result<Self> {
        config.validate()?;
        let mut budget = Budget::new(config);
        Self::build_with_budget(degree, generators, &mut budget)
    }

    pub(crate) fn build_with_budget(
        degree: usize,
        generators: &[Permutation],
        budget: &mut Budget,
    ) -> Result<Self> {
        let mut chain = StabilizerChain {
            degree,
            levels: Vec::new(),
        };

        let mut seen = BTreeSet::new();
        for g in generators {
            assert_eq!(
                g.degree(),
                degree,
                "generator degree does not match the chain"
            );
            if g.is_identity() || !seen.insert(g.clone()) {
                continue;
            }
            chain.seed(g.clone());
        }

        for k in 0..chain.levels.len() {
            chain.recompute_orbit(k, budget)?;
        }

        // Verify bottom-up: a level is complete when all of its Schreier
        // generators sift to the identity through the deeper levels.
        // Adding a generator at a deeper level restarts verification
        // there and re-verifies the levels above it on the way back up.
        let mut i = chain.levels.len() as i64 - 1;
        while i >= 0 {
            match chain.verify_level(i as usize, budget)? {
                None => i -= 1,
                Some(j) => i = j as i64,
            }
        }

        for g in generators {
            assert!(
                chain.is_member(g),
                "stabilizer chain does not contain its own generator {}",
                g
            );
        }

        Ok(chain)
    }

    /// Number of points the group acts on
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The ordered base points
    pub fn base(&self) -> Vec<usize> {
        self.levels.iter().map(|level| level.base).collect()
    }

    /// The strong generators (generators of the whole group)
    pub fn strong_generators(&self) -> &[Permutation] {
        self.levels.first().map_or(&[], |level| &level.gens)
    }

    /// Orbit size at each level
    pub fn orbit_lengths(&self) -> Vec<usize> {
        self.levels
            .iter()
            .map(|level| level.transversal.len())
            .collect()
    }

    /// Exact group order: the product of orbit sizes across all levels
    pub fn order(&self) -> BigUint {
        self.levels
            .iter()
            .fold(BigUint::one(), |acc, level| {
                acc * BigUint::from(level.transversal.len())
            })
    }

    /// Decide membership by sifting `p` through the chain
    pub fn is_member(&self, p: &Permutation) -> bool {
        if p.degree() != self.degree {
            return false;
        }
        let mut residue = p.clone();
        for level in &self.levels {
            let t = residue.apply(level.base);
            match level.transversal.get(&t) {
                None => return false,
                Some(u) => residue = u.inverse().compose(&residue),
            }
        }
        residue.is_identity()
    }

    /// Insert a fresh generator into every level whose preceding base
    /// points it fixes, opening a new level if it fixes them all
    fn seed(&mut self, g: Permutation) {
        let mut k = 0;
        loop {
            if k == self.levels.len() {
                let base = g
                    .smallest_moved_point()
                    .expect("identity generators are filtered before seeding");
                self.levels.push(Level::new(base));
            }
            let moves_base = g.apply(self.levels[k].base) != self.levels[k].base;
            self.levels[k].gens.push(g.clone());
            if moves_base {
                return;
            }
            k += 1;
        }
    }

    /// Breadth-first orbit of the level's base point under its
    /// generators, recording one transversal witness per point
    fn recompute_orbit(&mut self, k: usize, budget: &mut Budget) -> Result<()> {
        let base = self.levels[k].base;
        let gens = self.levels[k].gens.clone();

        let mut transversal = BTreeMap::new();
        transversal.insert(base, Permutation::identity(self.degree));
        let mut queue = VecDeque::from([base]);

        while let Some(t) = queue.pop_front() {
            let u_t = transversal[&t].clone();
            for s in &gens {
                budget.charge_closure(1)?;
                let st = s.apply(t);
                if !transversal.contains_key(&st) {
                    // (s . u_t) maps the base point to s(t)
                    transversal.insert(st, s.compose(&u_t));
                    queue.push_back(st);
                }
            }
        }

        self.levels[k].transversal = transversal;
        Ok(())
    }

    /// Check every Schreier generator of level `k` against the deeper
    /// levels. Returns `None` when the level is complete, or `Some(j)`
    /// after extending levels `k+1..=j` with a non-sifting residue.
    fn verify_level(&mut self, k: usize, budget: &mut Budget) -> Result<Option<usize>> {
        let points: Vec<usize> = self.levels[k].transversal.keys().copied().collect();
        let gens = self.levels[k].gens.clone();

        for t in points {
            let u_t = self.levels[k].transversal[&t].clone();
            for s in &gens {
                budget.charge_closure(1)?;
                let st = s.apply(t);
                let u_st = self.levels[k]
                    .transversal
                    .get(&st)
                    .unwrap_or_else(|| {
                        panic!("orbit at level {} is not closed under its generators", k)
                    })
                    .clone();

                // Schreier generator: fixes this level's base point
                let schreier = u_st.inverse().compose(&s.compose(&u_t));
                if schreier.is_identity() {
                    continue;
                }

                let (j, residue) = self.sift_from(k + 1, schreier, budget)?;
                if residue.is_identity() {
                    continue;
                }

                // The residue fixes the bases of levels 0..j; it extends
                // the generating sets of every level between here and j.
                if j == self.levels.len() {
                    let base = residue
                        .smallest_moved_point()
                        .expect("non-identity residue moves a point");
                    self.levels.push(Level::new(base));
                }
                for u in (k + 1)..=j {
                    self.levels[u].gens.push(residue.clone());
                    self.recompute_orbit(u, budget)?;
                }
                return Ok(Some(j));
            }
        }

        Ok(None)
    }

    /// Strip `p` through levels `start..`, returning the level where
    /// stripping stopped and the remaining residue
    fn sift_from(
        &self,
        start: usize,
        p: Permutation,
        budget: &mut Budget,
    ) -> Result<(usize, Permutation)> {
        let mut residue = p;
        for k in start..self.levels.len() {
            budget.charge_closure(1)?;
            let t = residue.apply(self.levels[k].base);
            match self.levels[k].transversal.get(&t) {
                None => return Ok((k, residue)),
                Some(u) => residue = u.inverse().compose(&residue),
            }
        }
        Ok((self.levels.len(), residue))
    }
}

impl std::fmt::Debug for StabilizerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StabilizerChain")
            .field("degree", &self.degree)
            .field("base", &self.base())
            .field("orbit_lengths", &self.orbit_lengths())
            .finish()
    }
}
