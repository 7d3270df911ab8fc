//! # chainwalk
//!
//! Graph-constrained random walks, first-order Markov transition learning,
//! and k-step forecasts ranked with their Shannon entropy.
//!
//! Data flow:
//! [`Topology`] → [`Walker`] (index sequence) → [`TransitionLearner::train`]
//! → [`ForecastRanker::recommend`] → ranked destinations plus entropy.
//!
//! Everything is synchronous and free of global state. Training takes
//! `&mut self` and forecasting `&self`, so one learner has one writer or many
//! readers, never both.

pub mod error;
pub mod graph;
pub mod learner;
pub mod matrix;
#[cfg(feature = "serde")]
pub mod movelog;
pub mod random_walk;
pub mod ranker;
pub mod topk;
pub mod topology;

pub use error::{Error, Result};
pub use graph::{reachable_within, GraphRef};
pub use learner::{RowState, StationaryConfig, TransitionLearner, UnobservedPolicy};
pub use matrix::{multiply, power, SquareMatrix};
#[cfg(feature = "serde")]
pub use movelog::{MoveLog, MoveLogMetadata};
pub use random_walk::{generate_walk, WalkConfig, Walker};
pub use ranker::{entropy_bits, Forecast, ForecastRanker, Recommendation, DEFAULT_TOP_N};
pub use topk::{normalize, rank_descending, top_k};
pub use topology::Topology;
