//! Run configuration and the persisted table-naming contract.
//!
//! One explicit configuration struct describes a simulation invocation: the
//! (walker, time-mode, topology) tuple plus its numeric parameters. It is
//! built once by the caller and passed by reference through the pipeline;
//! there is no registry and no name-based lookup.

use serde::{Deserialize, Serialize};

use crate::continuous::{GAMMA_CLASSICAL, GAMMA_QUANTUM};
use crate::error::{Result, WalkError};
use crate::topology::Topology;

/// Fixed seed for random-regular graph generation; the same N always yields
/// the same graph.
pub const DEFAULT_SEED: u64 = 0;

/// Which recurrence drives the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalkerKind {
    Classical,
    Quantum,
}

impl WalkerKind {
    /// Short tag used in persisted table keys (`crw` / `qrw`).
    pub fn label(&self) -> &'static str {
        match self {
            WalkerKind::Classical => "crw",
            WalkerKind::Quantum => "qrw",
        }
    }
}

/// Step-by-step recurrence or Laplacian-generated evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeMode {
    Discrete,
    Continuous,
}

/// Which table of a run a key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Pdf,
    Std,
    Topology,
}

/// Full description of one simulation invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub walker: WalkerKind,
    pub time_mode: TimeMode,
    pub topology: Topology,
    /// Signed initial site in the topology's coordinate system.
    pub init_site: i64,
    /// Half-width defining the site count N.
    pub limit: usize,
    /// Number of evolution steps T; tables carry T+1 rows.
    pub steps: usize,
    /// Continuous-time rate constant; `None` picks the per-walker default.
    pub gamma: Option<f64>,
    /// Random-regular generation seed.
    pub seed: u64,
}

impl RunConfig {
    pub fn new(
        walker: WalkerKind,
        time_mode: TimeMode,
        topology: Topology,
        init_site: i64,
        limit: usize,
        steps: usize,
    ) -> Self {
        Self {
            walker,
            time_mode,
            topology,
            init_site,
            limit,
            steps,
            gamma: None,
            seed: DEFAULT_SEED,
        }
    }

    /// Number of sites N for this configuration.
    pub fn site_count(&self) -> usize {
        self.topology.site_count(self.limit)
    }

    /// Effective rate constant: 0.15 for classical, 0.35 for quantum unless
    /// overridden.
    pub fn gamma(&self) -> f64 {
        self.gamma.unwrap_or(match self.walker {
            WalkerKind::Classical => GAMMA_CLASSICAL,
            WalkerKind::Quantum => GAMMA_QUANTUM,
        })
    }

    /// Check the configuration and resolve the start column index.
    pub fn validate(&self) -> Result<usize> {
        if self.steps == 0 {
            return Err(WalkError::InvalidConfig(
                "step count must be at least 1".to_string(),
            ));
        }
        if self.limit == 0 {
            return Err(WalkError::InvalidConfig(
                "half-width limit must be at least 1".to_string(),
            ));
        }
        if let Some(gamma) = self.gamma {
            if !gamma.is_finite() || gamma <= 0.0 {
                return Err(WalkError::InvalidConfig(format!(
                    "rate constant must be finite and positive, got {}",
                    gamma
                )));
            }
        }
        if self.topology == Topology::RandomRegular && self.time_mode == TimeMode::Discrete {
            return Err(WalkError::InvalidConfig(
                "random-regular topology has no discrete-time recurrence".to_string(),
            ));
        }
        self.topology.start_index(self.init_site, self.limit)
    }

    /// Stable key for a persisted table: `{walker}_{topology}[_ct]_{suffix}`.
    pub fn table_key(&self, kind: TableKind) -> String {
        let ct = match self.time_mode {
            TimeMode::Discrete => "",
            TimeMode::Continuous => "_ct",
        };
        let suffix = match kind {
            TableKind::Pdf => "pdf",
            TableKind::Std => "std",
            TableKind::Topology => "topology",
        };
        format!(
            "{}_{}{}_{}",
            self.walker.label(),
            self.topology.label(),
            ct,
            suffix
        )
    }
}
