//! Post-fill consistency check.
//!
//! Recomputes every pairwise distance from scratch and compares it against
//! the stored matrix. The matrix stores values rounded to 2 decimals while
//! the reference here is unrounded, so the tolerance and the rounding rule
//! are deliberately coupled: rounding moves a value by at most 0.005.

use distmat_core::{DistanceMatrix, DistmatError, Point};

/// Maximum allowed deviation between a stored entry and its reference value.
pub const DISTANCE_TOLERANCE: f64 = 0.01;

/// Check every cell of `matrix` (diagonal included) against an independently
/// computed reference distance.
///
/// Returns `ConsistencyViolation` for the first deviating cell in row-major
/// order, or `InvalidArgument` if the matrix dimension does not match the
/// point count. A violation indicates a partition or rounding bug, not a
/// runtime condition to recover from.
pub fn verify_matrix(points: &[Point], matrix: &DistanceMatrix) -> Result<(), DistmatError> {
    if matrix.n() != points.len() {
        return Err(DistmatError::InvalidArgument(format!(
            "matrix is {}x{} but the point set has {} points",
            matrix.n(),
            matrix.n(),
            points.len()
        )));
    }

    for (i, p) in points.iter().enumerate() {
        for (j, q) in points.iter().enumerate() {
            let found = matrix.get(i, j);
            let dx = p.x as f64 - q.x as f64;
            let dy = p.y as f64 - q.y as f64;
            let expected = (dx.powi(2) + dy.powi(2)).sqrt();
            if (found - expected).abs() > DISTANCE_TOLERANCE {
                return Err(DistmatError::ConsistencyViolation {
                    row: i,
                    col: j,
                    expected,
                    found,
                });
            }
        }
    }
    Ok(())
}
