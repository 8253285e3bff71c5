//! Error types for walk simulations.
//!
//! The simulation is a deterministic offline batch computation: every error
//! here is fatal for the current invocation and there are no retries. Errors
//! propagate to the caller; no partial tables are ever produced.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    /// The constructed adjacency matrix is not symmetric. Guards against a
    /// malformed topology sneaking through graph construction.
    #[error("adjacency matrix is not symmetric at ({row}, {col})")]
    AsymmetricAdjacency { row: usize, col: usize },

    /// An external topology identifier did not name a known topology.
    #[error("unsupported topology: {0}")]
    UnsupportedTopology(String),

    /// A non-finite value appeared in a populated field mid-evolution.
    #[error("non-finite value in {table} at step {step}, site {site}")]
    NonFinite {
        table: String,
        step: usize,
        site: usize,
    },

    /// A run configuration that cannot describe a valid simulation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, WalkError>;
