use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D point with integer coordinates.
///
/// Coordinates are integral throughout the pipeline: exact inputs keep the
/// fill bit-reproducible across runs and worker counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Exact (unrounded) Euclidean distance to another point.
    ///
    /// Coordinates widen to `f64` before subtracting: a difference between
    /// opposite-sign extremes can exceed `i64::MAX`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
