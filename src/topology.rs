//! Spatial topologies for walk simulations.
//!
//! Three fixed one-dimensional structures are supported:
//!
//! 1. **Line** — open chain of N = 2·limit + 1 sites with signed coordinates
//!    [−limit, limit]; the walker starts from a signed site offset by `limit`.
//! 2. **Ring** — periodic chain of N = limit + 1 sites; distances are
//!    measured along the shortest circular arc (folded coordinates).
//! 3. **RandomRegular** — random 2-regular graph on N = limit + 1 sites,
//!    generated from a fixed seed; site coordinates are undefined.
//!
//! The topology is a closed enum dispatched by exhaustive matching; external
//! string identifiers are only accepted at the `FromStr` boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WalkError};

/// Spatial structure a walk evolves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// Open chain, N = 2·limit + 1 sites.
    Line,
    /// Periodic chain, N = limit + 1 sites.
    Ring,
    /// Random 2-regular graph, N = limit + 1 sites.
    RandomRegular,
}

impl Topology {
    /// Number of sites for a given half-width `limit`.
    pub fn site_count(&self, limit: usize) -> usize {
        match self {
            Topology::Line => 2 * limit + 1,
            Topology::Ring | Topology::RandomRegular => limit + 1,
        }
    }

    /// Column index of the caller's signed initial site.
    ///
    /// Line offsets by `limit` so that site 0 lands in the middle of the
    /// chain; the periodic topologies reduce the signed site modulo N.
    pub fn start_index(&self, init_site: i64, limit: usize) -> Result<usize> {
        let n = self.site_count(limit) as i64;
        match self {
            Topology::Line => {
                let idx = init_site + limit as i64;
                if (0..n).contains(&idx) {
                    Ok(idx as usize)
                } else {
                    Err(WalkError::InvalidConfig(format!(
                        "initial site {} outside line range [{}, {}]",
                        init_site,
                        -(limit as i64),
                        limit
                    )))
                }
            }
            Topology::Ring | Topology::RandomRegular => Ok(init_site.rem_euclid(n) as usize),
        }
    }

    /// Physical coordinate of each column index, used for the standard
    /// deviation of a distribution.
    ///
    /// Line sites carry the symmetric range [−limit, limit]. Ring sites use
    /// the *folded* sequence (0…⌊limit/2⌋ followed by the negative run up to
    /// −1) so a coordinate is the shortest circular distance from the origin.
    /// Random-regular sites have no coordinates; returns `None`.
    pub fn site_coordinates(&self, limit: usize) -> Option<Vec<i64>> {
        match self {
            Topology::Line => Some((-(limit as i64)..=limit as i64).collect()),
            Topology::Ring => {
                let n = self.site_count(limit);
                let half = (limit / 2) as i64;
                let mut coords: Vec<i64> = (0..=half).collect();
                let neg_len = n as i64 - half - 1;
                coords.extend(-neg_len..=-1);
                Some(coords)
            }
            Topology::RandomRegular => None,
        }
    }

    /// Short tag used in persisted table keys.
    pub fn label(&self) -> &'static str {
        match self {
            Topology::Line => "line",
            Topology::Ring => "ring",
            Topology::RandomRegular => "random",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Line => write!(f, "line"),
            Topology::Ring => write!(f, "ring"),
            Topology::RandomRegular => write!(f, "random-regular"),
        }
    }
}

impl FromStr for Topology {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "line" => Ok(Topology::Line),
            "ring" => Ok(Topology::Ring),
            "random-regular" => Ok(Topology::RandomRegular),
            other => Err(WalkError::UnsupportedTopology(other.to_string())),
        }
    }
}
