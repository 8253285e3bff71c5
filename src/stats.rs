//! Standard-deviation series derived from a probability table.
//!
//! For each row t of a pdf table, variance(t) = Σ_j pdf(t, j)·coord(j)² and
//! std(t) = sqrt(variance(t)). The coordinates come from the topology: the
//! signed range for the line, the folded shortest-circular-distance sequence
//! for the ring. Random-regular topologies have no coordinates and the
//! caller skips the series entirely.

use nalgebra::DMatrix;

/// Standard deviation per pdf row against the given site coordinates.
///
/// The coordinate slice length must equal the pdf column count; that is the
/// caller's contract with the topology layer.
pub fn std_series(pdf: &DMatrix<f64>, coords: &[i64]) -> Vec<f64> {
    assert_eq!(
        coords.len(),
        pdf.ncols(),
        "coordinate count must match pdf columns"
    );
    (0..pdf.nrows())
        .map(|t| {
            let variance: f64 = coords
                .iter()
                .enumerate()
                .map(|(j, &x)| pdf[(t, j)] * (x * x) as f64)
                .sum();
            variance.sqrt()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discrete;
    use crate::topology::Topology;

    #[test]
    fn delta_at_origin_has_zero_std() {
        let mut pdf = DMatrix::zeros(1, 5);
        pdf[(0, 2)] = 1.0;
        let std = std_series(&pdf, &[-2, -1, 0, 1, 2]);
        assert_eq!(std, vec![0.0]);
    }

    #[test]
    fn symmetric_pair_std() {
        // Half mass at ±1: variance = 1, std = 1.
        let mut pdf = DMatrix::zeros(1, 3);
        pdf[(0, 0)] = 0.5;
        pdf[(0, 2)] = 0.5;
        let std = std_series(&pdf, &[-1, 0, 1]);
        assert!((std[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn classical_line_std_grows_as_sqrt_t() {
        // Away from the boundary the discrete classical walk has
        // variance(t) = t exactly.
        let limit = 20;
        let pdf = discrete::classical_pdf(Topology::Line, 2 * limit + 1, limit, 10).unwrap();
        let coords = Topology::Line.site_coordinates(limit).unwrap();
        let std = std_series(&pdf, &coords);
        for t in 0..=10 {
            assert!(
                (std[t] - (t as f64).sqrt()).abs() < 1e-10,
                "step {}: std {} vs sqrt(t) {}",
                t,
                std[t],
                (t as f64).sqrt()
            );
        }
    }

    #[test]
    fn ring_std_uses_folded_coordinates() {
        // Mass on the last ring site is one step from the origin, not N−1.
        let n = 5;
        let mut pdf = DMatrix::zeros(1, n);
        pdf[(0, n - 1)] = 1.0;
        let coords = Topology::Ring.site_coordinates(n - 1).unwrap();
        let std = std_series(&pdf, &coords);
        assert!((std[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "coordinate count")]
    fn mismatched_coordinates_panic() {
        let pdf = DMatrix::zeros(1, 4);
        std_series(&pdf, &[0, 1]);
    }
}
