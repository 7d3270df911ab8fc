//! k-step destination ranking with an uncertainty score.

use crate::error::{Error, Result};
use crate::learner::TransitionLearner;
use crate::topk::top_k;
use crate::topology::Topology;

/// Number of destinations returned when the caller has no preference.
pub const DEFAULT_TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    pub location: String,
    /// Probability as a percentage in `0..=100`, rounded to two decimals.
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forecast {
    /// Most probable destinations first; ties by ascending index.
    pub ranked: Vec<Recommendation>,
    /// Shannon entropy of the full k-step distribution, in bits.
    pub entropy: f64,
}

/// Read-only view over a topology and a trained learner.
#[derive(Debug, Clone, Copy)]
pub struct ForecastRanker<'a> {
    topology: &'a Topology,
    learner: &'a TransitionLearner,
}

impl<'a> ForecastRanker<'a> {
    /// Fails if the learner was not sized for this topology.
    pub fn new(topology: &'a Topology, learner: &'a TransitionLearner) -> Result<Self> {
        if topology.len() != learner.len() {
            return Err(Error::InvalidArgument(format!(
                "learner covers {} states but topology has {} locations",
                learner.len(),
                topology.len()
            )));
        }
        Ok(Self { topology, learner })
    }

    /// Where a walker at `current` is most likely to be after `k` steps.
    pub fn recommend(&self, current: &str, k: i64, top_n: usize) -> Result<Forecast> {
        if top_n == 0 {
            return Err(Error::InvalidArgument("top_n must be positive".to_string()));
        }
        let start = self.topology.index_of(current)?;
        let probs = self.learner.predict(start, k)?;
        let entropy = entropy_bits(&probs);

        let ranked = top_k(&probs, top_n)
            .into_iter()
            .map(|(i, p)| -> Result<Recommendation> {
                Ok(Recommendation {
                    location: self.topology.location_at(i)?.to_string(),
                    probability: as_percent(p),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(current, k, top_n, entropy, "forecast ranked");
        Ok(Forecast { ranked, entropy })
    }

    /// [`recommend`](Self::recommend) with [`DEFAULT_TOP_N`].
    pub fn recommend_default(&self, current: &str, k: i64) -> Result<Forecast> {
        self.recommend(current, k, DEFAULT_TOP_N)
    }
}

/// `-Σ p·log2(p)` over strictly positive entries.
pub fn entropy_bits(probs: &[f64]) -> f64 {
    let h: f64 = probs.iter().filter(|&&p| p > 0.0).map(|&p| p * p.log2()).sum();
    // `-0.0` for a one-hot vector; report it as plain zero.
    if h == 0.0 {
        0.0
    } else {
        -h
    }
}

fn as_percent(p: f64) -> f64 {
    (p * 10_000.0).round() / 100.0
}
