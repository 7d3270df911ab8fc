//! First-order transition learning and k-step forecasting.
//!
//! The learner keeps raw transition counts and a probability view derived from
//! them. Training only ever adds counts, so training on `a` then `b` is the same
//! as training on every transition of `a` and `b` at once.
//!
//! A row that has never been a transition source is [`RowState::Unobserved`],
//! never an all-zero distribution. What forecasting does when it meets such a
//! row is decided by [`UnobservedPolicy`].

use crate::error::{Error, Result};
use crate::graph::{reachable_within, GraphRef};
use crate::matrix::{power, SquareMatrix};
use crate::topk::normalize;
#[cfg(feature = "serde")]
use crate::movelog::MoveLog;

/// How forecasting treats rows that were never observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnobservedPolicy {
    /// Fail with [`Error::UnobservedState`] if the forecast needs such a row.
    #[default]
    Strict,
    /// Treat the row as a self-loop: a walker there stays there.
    AbsorbingSelfLoop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowState<'a> {
    Unobserved,
    /// Normalized transition probabilities out of this state.
    Observed(&'a [f64]),
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationaryConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for StationaryConfig {
    fn default() -> Self {
        Self { max_iterations: 10_000, tolerance: 1e-12 }
    }
}

#[derive(Debug, Clone)]
pub struct TransitionLearner {
    n: usize,
    counts: Vec<u64>,
    row_totals: Vec<u64>,
    /// Observed targets per source, in first-seen order.
    successors: Vec<Vec<usize>>,
    probabilities: SquareMatrix,
    policy: UnobservedPolicy,
}

impl TransitionLearner {
    /// An untrained learner over `n` states.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            counts: vec![0; n * n],
            row_totals: vec![0; n],
            successors: vec![Vec::new(); n],
            probabilities: SquareMatrix::zeros(n),
            policy: UnobservedPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnobservedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> UnobservedPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Count every consecutive pair of `sequence` as one transition.
    ///
    /// All indices are checked before anything is counted; on error the
    /// learner is unchanged.
    pub fn train(&mut self, sequence: &[usize]) -> Result<()> {
        if let Some(&index) = sequence.iter().find(|&&i| i >= self.n) {
            return Err(Error::IndexOutOfRange { index, len: self.n });
        }

        let mut touched = vec![false; self.n];
        for pair in sequence.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let cell = &mut self.counts[from * self.n + to];
            if *cell == 0 {
                self.successors[from].push(to);
            }
            *cell += 1;
            self.row_totals[from] += 1;
            touched[from] = true;
        }

        let mut renormalized = 0usize;
        for (from, _) in touched.iter().enumerate().filter(|(_, &t)| t) {
            self.normalize_row(from);
            renormalized += 1;
        }
        tracing::debug!(
            transitions = sequence.len().saturating_sub(1),
            rows = renormalized,
            observed = self.observed_rows().count(),
            "transition counts updated"
        );
        Ok(())
    }

    /// Train on a persisted move log after validating it against this learner's size.
    #[cfg(feature = "serde")]
    pub fn train_log(&mut self, log: &MoveLog) -> Result<()> {
        log.validate(self.n)?;
        self.train(&log.movements)
    }

    fn normalize_row(&mut self, from: usize) {
        let total = self.row_totals[from] as f64;
        let counts = &self.counts[from * self.n..(from + 1) * self.n];
        for (p, &c) in self.probabilities.row_mut(from).iter_mut().zip(counts) {
            *p = c as f64 / total;
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.n {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { index, len: self.n })
        }
    }

    /// Raw transition counts out of `from`.
    pub fn counts(&self, from: usize) -> Result<&[u64]> {
        self.check_index(from)?;
        Ok(&self.counts[from * self.n..(from + 1) * self.n])
    }

    /// Number of transitions seen across all training calls.
    pub fn total_observations(&self) -> u64 {
        self.row_totals.iter().sum()
    }

    pub fn row_state(&self, from: usize) -> Result<RowState<'_>> {
        self.check_index(from)?;
        Ok(if self.row_totals[from] == 0 {
            RowState::Unobserved
        } else {
            RowState::Observed(self.probabilities.row(from))
        })
    }

    pub fn is_observed(&self, from: usize) -> bool {
        self.row_totals.get(from).is_some_and(|&t| t > 0)
    }

    /// Indices of every state seen as a transition source.
    pub fn observed_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.row_totals.iter().enumerate().filter(|(_, &t)| t > 0).map(|(i, _)| i)
    }

    /// Learned one-step probability. Fails for unobserved sources.
    pub fn probability(&self, from: usize, to: usize) -> Result<f64> {
        self.check_index(to)?;
        match self.row_state(from)? {
            RowState::Observed(row) => Ok(row[to]),
            RowState::Unobserved => Err(Error::UnobservedState { index: from }),
        }
    }

    /// Distribution after `k` steps from `start`: `one_hot(start) · M^k`.
    ///
    /// `k == 0` returns the one-hot vector without consulting any row.
    pub fn predict(&self, start: usize, k: i64) -> Result<Vec<f64>> {
        if k < 0 {
            return Err(Error::InvalidHorizon(k));
        }
        self.check_index(start)?;
        tracing::trace!(start, k, policy = ?self.policy, "predict");

        if k == 0 {
            let mut v = vec![0.0; self.n];
            v[start] = 1.0;
            return Ok(v);
        }

        if self.policy == UnobservedPolicy::Strict {
            // Rows occupied at steps 0..k-1 are the ones the product reads.
            let depth = usize::try_from(k - 1).unwrap_or(usize::MAX);
            if let Some(index) = reachable_within(self, start, depth)
                .into_iter()
                .find(|&i| !self.is_observed(i))
            {
                return Err(Error::UnobservedState { index });
            }
        }

        let pk = power(&self.forecast_matrix(), k as u64);
        Ok(pk.row(start).to_vec())
    }

    /// The stochastic matrix forecasts are computed from.
    ///
    /// Under [`UnobservedPolicy::AbsorbingSelfLoop`] unobserved rows become
    /// identity rows; under `Strict` they stay zero and are never read.
    pub fn forecast_matrix(&self) -> SquareMatrix {
        let mut m = self.probabilities.clone();
        if self.policy == UnobservedPolicy::AbsorbingSelfLoop {
            for i in (0..self.n).filter(|&i| !self.is_observed(i)) {
                m[(i, i)] = 1.0;
            }
        }
        m
    }

    /// Long-run occupancy of the learned chain.
    ///
    /// Power iteration from the uniform vector on the lazy chain `(I + M) / 2`,
    /// which has the same stationary distribution as `M` but converges on
    /// periodic chains too. Under `Strict` every row must be observed.
    pub fn stationary_distribution(&self, config: StationaryConfig) -> Result<Vec<f64>> {
        if self.n == 0 {
            return Ok(Vec::new());
        }
        if self.policy == UnobservedPolicy::Strict {
            if let Some(index) = (0..self.n).find(|&i| !self.is_observed(i)) {
                return Err(Error::UnobservedState { index });
            }
        }

        let m = self.forecast_matrix();
        let n = self.n;
        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];

        for iteration in 0..config.max_iterations {
            new_scores.iter_mut().zip(&scores).for_each(|(new, &old)| *new = 0.5 * old);
            for (u, &mass) in scores.iter().enumerate() {
                if mass == 0.0 {
                    continue;
                }
                for (v, &p) in m.row(u).iter().enumerate() {
                    new_scores[v] += 0.5 * mass * p;
                }
            }
            let diff: f64 = scores.iter().zip(new_scores.iter()).map(|(old, new)| (old - new).abs()).sum();
            std::mem::swap(&mut scores, &mut new_scores);
            if diff < config.tolerance {
                tracing::debug!(iterations = iteration + 1, "stationary distribution converged");
                break;
            }
        }
        normalize(&mut scores);
        Ok(scores)
    }
}

/// The learned support: `u -> v` whenever `u -> v` was observed at least once.
impl GraphRef for TransitionLearner {
    fn node_count(&self) -> usize {
        self.n
    }

    fn neighbors_ref(&self, node: usize) -> &[usize] {
        self.successors.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}
