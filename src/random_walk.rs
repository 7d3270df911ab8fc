//! Random walk generation over a [`Topology`].

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::error::Result;
use crate::graph::GraphRef;
use crate::topology::Topology;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkConfig {
    /// Location the walk starts from.
    pub start: String,
    /// Number of moves; the produced sequence has `steps + 1` entries.
    pub steps: usize,
    pub seed: u64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self { start: "Foyer".to_string(), steps: 10_000, seed: 42 }
    }
}

/// A single agent moving uniformly at random between adjacent locations.
///
/// The random source is owned by the walker and supplied by the caller, so a
/// seeded generator replays the same walk.
#[derive(Debug)]
pub struct Walker<'t, R> {
    topology: &'t Topology,
    current: usize,
    rng: R,
}

impl<'t, R: Rng> Walker<'t, R> {
    pub fn new(topology: &'t Topology, start: &str, rng: R) -> Result<Self> {
        let current = topology.index_of(start)?;
        Ok(Self { topology, current, rng })
    }

    pub fn current(&self) -> &'t str {
        let topology: &'t Topology = self.topology;
        topology.locations()[self.current].as_str()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Move to a uniformly chosen neighbor and return it.
    pub fn step(&mut self) -> &'t str {
        self.current = self.step_index();
        self.current()
    }

    fn step_index(&mut self) -> usize {
        let neighbors = self.topology.neighbors_ref(self.current);
        // Topology construction guarantees at least one neighbor.
        neighbors[self.rng.random_range(0..neighbors.len())]
    }

    /// The current location followed by `steps` moves, as indices.
    pub fn walk(&mut self, steps: usize) -> Vec<usize> {
        let mut walk = Vec::with_capacity(steps + 1);
        walk.push(self.current);
        for _ in 0..steps {
            self.current = self.step_index();
            walk.push(self.current);
        }
        walk
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl<'t> Walker<'t, ChaCha8Rng> {
    pub fn seeded(topology: &'t Topology, start: &str, seed: u64) -> Result<Self> {
        Self::new(topology, start, ChaCha8Rng::seed_from_u64(seed))
    }
}

/// One seeded walk of `config.steps` moves, suitable as training data.
pub fn generate_walk(topology: &Topology, config: &WalkConfig) -> Result<Vec<usize>> {
    let mut walker = Walker::seeded(topology, &config.start, config.seed)?;
    let walk = walker.walk(config.steps);
    tracing::debug!(start = %config.start, steps = config.steps, seed = config.seed, "walk generated");
    Ok(walk)
}
