//! Errors for topology construction, training and forecasting.
//!
//! Nothing here is recovered internally. Every variant carries the offending
//! name, index or argument so a caller can report it without re-deriving state.

use thiserror::Error;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A location name that is not part of the topology.
    #[error("unknown location: {0:?}")]
    UnknownLocation(String),

    /// A dense index outside `0..len`.
    #[error("index {index} out of range for {len} locations")]
    IndexOutOfRange { index: usize, len: usize },

    /// Forecasting needed a transition row that was never trained.
    #[error("state {index} was never observed as a transition source")]
    UnobservedState { index: usize },

    /// Negative step count.
    #[error("invalid horizon {0}: step count must be non-negative")]
    InvalidHorizon(i64),

    /// Malformed call-site argument (e.g. `top_n == 0`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("topology must contain at least one location")]
    EmptyTopology,

    #[error("location {0:?} is declared more than once")]
    DuplicateLocation(String),

    /// An adjacency list names a location that was never declared.
    #[error("location {location:?} lists undeclared neighbor {neighbor:?}")]
    UnknownNeighbor { location: String, neighbor: String },

    /// A location with no outgoing neighbors; the walker cannot leave it.
    #[error("location {0:?} has no neighbors")]
    IsolatedLocation(String),

    /// A move log whose declared step count disagrees with its payload.
    #[error("move log declares {declared} steps but carries {actual} movements")]
    LogLengthMismatch { declared: usize, actual: usize },

    /// A move log that could not be parsed or written.
    #[error("malformed move log: {0}")]
    MalformedLog(String),
}
