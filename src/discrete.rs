//! Discrete-time walkers: classical diffusion and the Hadamard coined
//! quantum walk.
//!
//! Both walkers advance a per-site field step by step with a local neighbor
//! recurrence and never touch the graph Laplacian. The boundary policy is
//! part of the contract:
//!
//! - **Ring** wraps indices mod N; total probability/norm is conserved at
//!   every step.
//! - **Line, classical**: the two edge sites copy the *full* value of their
//!   single neighbor (`new(0) = old(1)`, `new(N−1) = old(N−2)`), so mass can
//!   be double-counted once the walk front reaches the edge. This is the
//!   specified behavior, not a bug to fix here.
//! - **Line, quantum**: the two edge sites stay at zero; amplitude flowing
//!   past the tracked window is dropped (absorbing boundary).
//!
//! The local recurrence is only defined on index-adjacent topologies, so
//! random-regular graphs are rejected in discrete time.

use nalgebra::DMatrix;
use num_complex::Complex;
use num_traits::Zero;

use crate::error::{Result, WalkError};
use crate::topology::Topology;

/// Result of a discrete coined quantum walk. The pdf is derived from the
/// two coin components and is never populated independently of them.
#[derive(Debug, Clone)]
pub struct CoinedWalk {
    /// |up|² + |down|² per (step, site).
    pub pdf: DMatrix<f64>,
    /// First coin component, (T+1)×N.
    pub coin_up: DMatrix<Complex<f64>>,
    /// Second coin component, (T+1)×N.
    pub coin_down: DMatrix<Complex<f64>>,
}

fn check_discrete_topology(topology: Topology, n: usize) -> Result<()> {
    match topology {
        Topology::Line | Topology::Ring => {
            if n < 2 {
                Err(WalkError::InvalidConfig(format!(
                    "discrete walk needs at least 2 sites, got {}",
                    n
                )))
            } else {
                Ok(())
            }
        }
        Topology::RandomRegular => Err(WalkError::InvalidConfig(
            "random-regular topology has no discrete-time recurrence".to_string(),
        )),
    }
}

/// Classical discrete-time walk: unit mass at `start`, advanced for `steps`
/// steps of the half-half neighbor rule.
///
/// Returns the (steps+1)×n probability table, row t = distribution after t
/// steps.
pub fn classical_pdf(
    topology: Topology,
    n: usize,
    start: usize,
    steps: usize,
) -> Result<DMatrix<f64>> {
    check_discrete_topology(topology, n)?;
    let mut pdf = DMatrix::zeros(steps + 1, n);
    pdf[(0, start)] = 1.0;
    for t in 1..=steps {
        for j in 0..n {
            pdf[(t, j)] = match topology {
                Topology::Ring => {
                    0.5 * pdf[(t - 1, (j + n - 1) % n)] + 0.5 * pdf[(t - 1, (j + 1) % n)]
                }
                Topology::Line => {
                    if j == 0 {
                        // Edge sites take the full value of their single
                        // neighbor; mass is not conserved here.
                        pdf[(t - 1, 1)]
                    } else if j == n - 1 {
                        pdf[(t - 1, n - 2)]
                    } else {
                        0.5 * pdf[(t - 1, j - 1)] + 0.5 * pdf[(t - 1, j + 1)]
                    }
                }
                Topology::RandomRegular => unreachable!("rejected above"),
            };
        }
    }
    Ok(pdf)
}

/// Quantum coined walk: two complex coin components evolved by the Hadamard
/// rule, starting from the fixed coin state (1/√2, −i/√2) at `start`.
pub fn coined_walk(topology: Topology, n: usize, start: usize, steps: usize) -> Result<CoinedWalk> {
    check_discrete_topology(topology, n)?;
    let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();

    let mut coin_up = DMatrix::from_element(steps + 1, n, Complex::zero());
    let mut coin_down = DMatrix::from_element(steps + 1, n, Complex::zero());
    let mut pdf = DMatrix::zeros(steps + 1, n);

    coin_up[(0, start)] = Complex::new(inv_sqrt2, 0.0);
    coin_down[(0, start)] = Complex::new(0.0, -inv_sqrt2);
    pdf[(0, start)] = coin_up[(0, start)].norm_sqr() + coin_down[(0, start)].norm_sqr();

    // Line keeps both edge sites at zero: the amplitude that would flow
    // past the window is dropped.
    let (first, last) = match topology {
        Topology::Line => (1, n - 1),
        Topology::Ring => (0, n),
        Topology::RandomRegular => unreachable!("rejected above"),
    };
    for t in 1..=steps {
        for j in first..last {
            let left = (j + n - 1) % n;
            let right = (j + 1) % n;
            let up = (coin_up[(t - 1, left)] + coin_down[(t - 1, left)]) * inv_sqrt2;
            let down = (coin_up[(t - 1, right)] - coin_down[(t - 1, right)]) * inv_sqrt2;
            coin_up[(t, j)] = up;
            coin_down[(t, j)] = down;
            pdf[(t, j)] = up.norm_sqr() + down.norm_sqr();
        }
    }

    Ok(CoinedWalk {
        pdf,
        coin_up,
        coin_down,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_sum(pdf: &DMatrix<f64>, t: usize) -> f64 {
        pdf.row(t).sum()
    }

    #[test]
    fn classical_starts_as_delta() {
        let pdf = classical_pdf(Topology::Line, 101, 50, 10).unwrap();
        assert_eq!(pdf[(0, 50)], 1.0);
        assert_eq!(row_sum(&pdf, 0), 1.0);
    }

    #[test]
    fn classical_line_limit_one_doubles_mass() {
        // N = 3, start at the center. After one step the interior site gets
        // 0.5·pdf(0,0) + 0.5·pdf(0,2) = 0 while each edge site copies the
        // full center value, so the row sums to 2.0.
        let pdf = classical_pdf(Topology::Line, 3, 1, 1).unwrap();
        assert_eq!(pdf.row(0).iter().copied().collect::<Vec<_>>(), [0.0, 1.0, 0.0]);
        assert_eq!(pdf.row(1).iter().copied().collect::<Vec<_>>(), [1.0, 0.0, 1.0]);
        assert_eq!(row_sum(&pdf, 1), 2.0);
    }

    #[test]
    fn classical_line_conserves_before_boundary_hit() {
        // limit = 10, 5 steps: the front cannot have reached the edges yet.
        let pdf = classical_pdf(Topology::Line, 21, 10, 5).unwrap();
        for t in 0..=5 {
            assert!(
                (row_sum(&pdf, t) - 1.0).abs() < 1e-12,
                "step {}: mass {}",
                t,
                row_sum(&pdf, t)
            );
        }
    }

    #[test]
    fn classical_ring_limit_two_wraps() {
        // N = 3, start at 0: neighbors of 0 are 1 and 2 (mod 3).
        let pdf = classical_pdf(Topology::Ring, 3, 0, 1).unwrap();
        assert_eq!(pdf[(1, 0)], 0.0);
        assert_eq!(pdf[(1, 1)], 0.5);
        assert_eq!(pdf[(1, 2)], 0.5);
        assert_eq!(row_sum(&pdf, 1), 1.0);
    }

    #[test]
    fn classical_ring_conserves_mass() {
        let pdf = classical_pdf(Topology::Ring, 11, 0, 40).unwrap();
        for t in 0..=40 {
            assert!(
                (row_sum(&pdf, t) - 1.0).abs() < 1e-12,
                "step {}: mass {}",
                t,
                row_sum(&pdf, t)
            );
        }
    }

    #[test]
    fn coined_walk_starts_as_delta() {
        let walk = coined_walk(Topology::Line, 161, 80, 10).unwrap();
        assert!((walk.pdf[(0, 80)] - 1.0).abs() < 1e-12);
        assert!((row_sum(&walk.pdf, 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn coined_walk_initial_coin_state() {
        let walk = coined_walk(Topology::Line, 5, 2, 1).unwrap();
        let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
        assert!((walk.coin_up[(0, 2)].re - inv_sqrt2).abs() < 1e-15);
        assert!((walk.coin_down[(0, 2)].im + inv_sqrt2).abs() < 1e-15);
    }

    #[test]
    fn coined_ring_conserves_norm() {
        let walk = coined_walk(Topology::Ring, 11, 0, 30).unwrap();
        for t in 0..=30 {
            assert!(
                (row_sum(&walk.pdf, t) - 1.0).abs() < 1e-10,
                "step {}: norm {}",
                t,
                row_sum(&walk.pdf, t)
            );
        }
    }

    #[test]
    fn coined_line_boundaries_stay_zero() {
        let walk = coined_walk(Topology::Line, 7, 3, 6).unwrap();
        for t in 1..=6 {
            assert_eq!(walk.pdf[(t, 0)], 0.0, "left edge at step {}", t);
            assert_eq!(walk.pdf[(t, 6)], 0.0, "right edge at step {}", t);
        }
    }

    #[test]
    fn coined_line_leaks_at_boundary() {
        // limit = 2 (N = 5): the front reaches the window edge within a few
        // steps and amplitude is absorbed, so norm drops below 1.
        let walk = coined_walk(Topology::Line, 5, 2, 6).unwrap();
        assert!(
            row_sum(&walk.pdf, 6) < 1.0,
            "norm {} should leak",
            row_sum(&walk.pdf, 6)
        );
    }

    #[test]
    fn coined_walk_spreads_ballistically_vs_classical() {
        // Interference pushes probability outward faster than diffusion:
        // compare second moments on the same line after the same steps.
        let limit = 20;
        let n = 2 * limit + 1;
        let steps = 10;
        let classical = classical_pdf(Topology::Line, n, limit, steps).unwrap();
        let quantum = coined_walk(Topology::Line, n, limit, steps).unwrap();
        let second_moment = |pdf: &DMatrix<f64>| -> f64 {
            (0..n)
                .map(|j| {
                    let x = j as f64 - limit as f64;
                    pdf[(steps, j)] * x * x
                })
                .sum()
        };
        assert!(second_moment(&quantum.pdf) > second_moment(&classical));
    }

    #[test]
    fn discrete_random_regular_rejected() {
        assert!(classical_pdf(Topology::RandomRegular, 10, 0, 5).is_err());
        assert!(coined_walk(Topology::RandomRegular, 10, 0, 5).is_err());
    }
}
