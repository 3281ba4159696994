use clap::Parser;

use distmat_core::Point;

/// Concurrent pairwise distance matrix calculator.
///
/// Computes the symmetric matrix of Euclidean distances between 2D points,
/// splitting the matrix cells round-robin across a fixed pool of workers.
/// With no points given it runs on a randomly generated set.
#[derive(Parser, Debug)]
#[command(name = "distmat", about = "Concurrent pairwise distance matrix calculator")]
pub struct CliArgs {
    /// Points as X,Y integer pairs, e.g. `0,0 3,4`. Put negative
    /// coordinates after a `--` separator. Providing any disables random mode.
    #[arg(value_parser = parse_point)]
    pub points: Vec<Point>,

    /// Number of workers sharing the matrix cells
    #[arg(long, default_value = "2")]
    pub workers: usize,

    /// How many random points to generate when none are provided
    #[arg(long, default_value = "3")]
    pub random: usize,

    /// RNG seed for reproducible random points
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit points and matrix as JSON instead of the text listing
    #[arg(long)]
    pub json: bool,

    /// Skip the post-fill consistency check
    #[arg(long)]
    pub no_verify: bool,
}

/// Parses a single `X,Y` coordinate pair.
fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{raw}'"))?;
    let x = x
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad X coordinate '{}': {e}", x.trim()))?;
    let y = y
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad Y coordinate '{}': {e}", y.trim()))?;
    Ok(Point::new(x, y))
}
