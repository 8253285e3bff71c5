//! Simulation pipeline: dispatch a [`RunConfig`] to the right walker,
//! derive statistics, and hand finished tables to a [`ResultSink`].
//!
//! The pipeline is a synchronous single pass. A graph is built only for
//! continuous-time runs; discrete walkers work straight from the neighbor
//! recurrence. Any validation or numeric failure aborts the whole run and
//! nothing is persisted.

use log::{debug, info};
use nalgebra::DMatrix;
use num_complex::Complex;

use crate::config::{RunConfig, TableKind, TimeMode, WalkerKind};
use crate::continuous;
use crate::discrete;
use crate::error::{Result, WalkError};
use crate::graph::{Graph, TopologyExport};
use crate::sink::ResultSink;
use crate::stats;

/// Quantum internal state carried alongside a pdf table. The pdf is always
/// derived from these fields, never stored independently of them.
#[derive(Debug, Clone)]
pub enum QuantumInternals {
    /// Discrete coined walk: the two coin components.
    Coined {
        coin_up: DMatrix<Complex<f64>>,
        coin_down: DMatrix<Complex<f64>>,
    },
    /// Continuous spectral walk: the eigenmode-summed amplitudes.
    Spectral { amplitudes: DMatrix<Complex<f64>> },
}

/// Everything one simulation invocation produces.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// (T+1)×N probability table, row t = distribution at step/sample t.
    pub pdf: DMatrix<f64>,
    /// Standard-deviation series; absent for random-regular topologies.
    pub std: Option<Vec<f64>>,
    /// Quantum amplitude fields; absent for classical walkers.
    pub internals: Option<QuantumInternals>,
    /// Node/edge export; present only when a graph was built (continuous
    /// mode).
    pub export: Option<TopologyExport>,
    /// Continuous-mode sample times; absent in discrete mode where rows are
    /// integer steps.
    pub sample_times: Option<Vec<f64>>,
}

/// Fail on the first non-finite entry of a populated table.
fn ensure_finite(pdf: &DMatrix<f64>, table: &str) -> Result<()> {
    for t in 0..pdf.nrows() {
        for j in 0..pdf.ncols() {
            if !pdf[(t, j)].is_finite() {
                return Err(WalkError::NonFinite {
                    table: table.to_string(),
                    step: t,
                    site: j,
                });
            }
        }
    }
    Ok(())
}

/// Run one simulation described by `config`.
pub fn run(config: &RunConfig) -> Result<RunOutput> {
    let start = config.validate()?;
    let n = config.site_count();
    info!(
        "running {:?} {:?} walk on {} ({} sites, {} steps, start index {})",
        config.walker, config.time_mode, config.topology, n, config.steps, start
    );

    let (pdf, internals, export, sample_times) = match config.time_mode {
        TimeMode::Discrete => match config.walker {
            WalkerKind::Classical => {
                let pdf = discrete::classical_pdf(config.topology, n, start, config.steps)?;
                (pdf, None, None, None)
            }
            WalkerKind::Quantum => {
                let walk = discrete::coined_walk(config.topology, n, start, config.steps)?;
                (
                    walk.pdf,
                    Some(QuantumInternals::Coined {
                        coin_up: walk.coin_up,
                        coin_down: walk.coin_down,
                    }),
                    None,
                    None,
                )
            }
        },
        TimeMode::Continuous => {
            let graph = Graph::build(config.topology, n, config.seed)?;
            let laplacian = graph.laplacian();
            let export = graph.export(config.topology);
            let times = continuous::sample_times(config.steps);
            debug!(
                "laplacian built for {} sites, sampling {} times up to {:.3}",
                n,
                times.len(),
                times[times.len() - 1]
            );
            match config.walker {
                WalkerKind::Classical => {
                    let pdf =
                        continuous::diffusion_pdf(&laplacian, config.gamma(), start, config.steps);
                    (pdf, None, Some(export), Some(times))
                }
                WalkerKind::Quantum => {
                    let walk =
                        continuous::spectral_walk(&laplacian, config.gamma(), start, config.steps);
                    (
                        walk.pdf,
                        Some(QuantumInternals::Spectral {
                            amplitudes: walk.amplitudes,
                        }),
                        Some(export),
                        Some(times),
                    )
                }
            }
        }
    };

    ensure_finite(&pdf, &config.table_key(TableKind::Pdf))?;

    let std = config
        .topology
        .site_coordinates(config.limit)
        .map(|coords| stats::std_series(&pdf, &coords));
    if std.is_none() {
        debug!(
            "{}: no site coordinates, skipping std series",
            config.topology
        );
    }

    Ok(RunOutput {
        pdf,
        std,
        internals,
        export,
        sample_times,
    })
}

/// Persist a finished run under the stable table keys.
pub fn persist(config: &RunConfig, output: &RunOutput, sink: &mut dyn ResultSink) {
    sink.store_pdf(&config.table_key(TableKind::Pdf), &output.pdf);
    if let Some(std) = &output.std {
        sink.store_std(&config.table_key(TableKind::Std), std);
    }
    if let Some(export) = &output.export {
        sink.store_topology(&config.table_key(TableKind::Topology), export);
    }
    info!("persisted tables for {}", config.table_key(TableKind::Pdf));
}

/// Run and persist in one call; on error nothing reaches the sink.
pub fn run_into(config: &RunConfig, sink: &mut dyn ResultSink) -> Result<RunOutput> {
    let output = run(config)?;
    persist(config, &output, sink);
    Ok(output)
}
