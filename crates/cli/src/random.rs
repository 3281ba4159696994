use distmat_core::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Exclusive upper bound for generated coordinates.
pub const MAX_COORD: i64 = 1000;

/// Generates `count` points with coordinates uniform in `0..MAX_COORD`.
///
/// A seed makes the set reproducible; without one the generator is
/// entropy-seeded.
pub fn generate_points(count: usize, seed: Option<u64>) -> Vec<Point> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let points: Vec<Point> = (0..count)
        .map(|_| Point::new(rng.gen_range(0..MAX_COORD), rng.gen_range(0..MAX_COORD)))
        .collect();
    debug!(count = points.len(), seeded = seed.is_some(), "Generated random points");
    points
}
