//! Budgets for the combinatorial search stages

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::{LeaperError, Result};

/// Resource limits for one leap-group computation
///
/// Hop enumeration is factorial in the vertex count on dense graphs and
/// generator building is exponential in the leap order, so every stage
/// charges work against these limits and aborts with
/// [`LeaperError::ResourceExhausted`] instead of running away.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComputeConfig {
    /// Backtracking steps allowed during hop enumeration
    pub max_search_steps: u64,
    /// Compositions allowed while building the leap-n generator set
    pub max_generators: u64,
    /// Orbit extensions and sifts allowed during group closure
    pub max_closure_steps: u64,
    /// Optional wall-clock deadline for the whole computation
    pub deadline: Option<Duration>,
}

impl ComputeConfig {
    /// Validate the limits
    pub fn validate(&self) -> Result<()> {
        if self.max_search_steps == 0 || self.max_generators == 0 || self.max_closure_steps == 0 {
            return Err(LeaperError::ResourceExhausted(
                "budget limits must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ComputeConfig {
    fn default() -> Self {
        ComputeConfig {
            max_search_steps: 5_000_000,
            max_generators: 1_000_000,
            max_closure_steps: 10_000_000,
            deadline: None,
        }
    }
}

/// Running budget for a single computation
///
/// Created from a [`ComputeConfig`] when the computation starts; each
/// stage draws from its own step pool, and the deadline is shared.
pub(crate) struct Budget {
    search_steps: u64,
    generator_steps: u64,
    closure_steps: u64,
    expires: Option<Instant>,
}

impl Budget {
    pub(crate) fn new(config: &ComputeConfig) -> Self {
        Budget {
            search_steps: config.max_search_steps,
            generator_steps: config.max_generators,
            closure_steps: config.max_closure_steps,
            expires: config.deadline.map(|d| Instant::now() + d),
        }
    }

    pub(crate) fn charge_search(&mut self, steps: u64) -> Result<()> {
        Self::draw(&mut self.search_steps, steps, "hop enumeration")?;
        self.check_deadline()
    }

    pub(crate) fn charge_generators(&mut self, steps: u64) -> Result<()> {
        Self::draw(&mut self.generator_steps, steps, "generator building")?;
        self.check_deadline()
    }

    pub(crate) fn charge_closure(&mut self, steps: u64) -> Result<()> {
        Self::draw(&mut self.closure_steps, steps, "group closure")?;
        self.check_deadline()
    }

    fn draw(pool: &mut u64, steps: u64, stage: &str) -> Result<()> {
        if *pool < steps {
            *pool = 0;
            return Err(LeaperError::ResourceExhausted(format!(
                "{} exceeded its step budget",
                stage
            )));
        }
        *pool -= steps;
        Ok(())
    }

    fn check_deadline(&self) -> Result<()> {
        if let Some(expires) = self.expires {
            if Instant::now() > expires {
                return Err(LeaperError::ResourceExhausted(
                    "computation deadline exceeded".to_string(),
                ));
            }
        }
        Ok(())
    }
}
