//! # rwalk-sim
//!
//! Time evolution of classical and quantum random walks over discrete
//! spatial structures: an open line, a periodic ring, and a seeded random
//! 2-regular graph.
//!
//! ## Pipeline
//!
//! ```text
//! RunConfig (walker, time-mode, topology, parameters)
//!   ↓
//! Graph / Laplacian          (continuous time only)
//!   ↓
//! Walker → pdf table (+ quantum amplitude fields)
//!   ↓
//! StdSeries (pdf · coords²)  (skipped for random-regular)
//!   ↓
//! ResultSink (stable table keys, consumed by the dashboard)
//! ```
//!
//! Discrete-time walkers advance a local neighbor recurrence; continuous
//! time uses exp(−t·γ·L) for the classical walker and a spectral eigenmode
//! sum for the quantum one.
//!
//! ## Usage
//!
//! ```no_run
//! use rwalk_sim::prelude::*;
//!
//! let config = RunConfig::new(
//!     WalkerKind::Quantum,
//!     TimeMode::Discrete,
//!     Topology::Line,
//!     0,   // signed initial site
//!     80,  // half-width: N = 161 sites
//!     100, // steps
//! );
//! let mut sink = MemorySink::new();
//! let output = run_into(&config, &mut sink).unwrap();
//! println!("final std: {:?}", output.std.map(|s| s[100]));
//! ```

pub mod config;
pub mod continuous;
pub mod discrete;
pub mod error;
pub mod graph;
pub mod run;
pub mod sink;
pub mod stats;
pub mod topology;

pub mod prelude {
    pub use crate::config::{RunConfig, TableKind, TimeMode, WalkerKind, DEFAULT_SEED};
    pub use crate::continuous::{GAMMA_CLASSICAL, GAMMA_QUANTUM};
    pub use crate::error::{Result, WalkError};
    pub use crate::graph::{Graph, TopologyExport};
    pub use crate::run::{persist, run, run_into, QuantumInternals, RunOutput};
    pub use crate::sink::{MemorySink, ResultSink};
    pub use crate::topology::Topology;
}
