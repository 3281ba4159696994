mod cli;
mod output;
mod random;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use distmat_compute::{compute_distance_matrix, verify_matrix};

use crate::cli::CliArgs;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    // Resolve the input set: explicit coordinates, or the random sanity run
    let random_mode = args.points.is_empty();
    let points = if random_mode {
        random::generate_points(args.random, args.seed)
    } else {
        args.points.clone()
    };
    info!(
        points = points.len(),
        workers = args.workers,
        random = random_mode,
        "Starting distance matrix run"
    );

    if !args.json {
        if random_mode {
            println!("<<-----Random Values----->>");
        } else {
            println!("<<-----Provided Values----->>");
        }
        output::print_points(&points);
    }

    let matrix = compute_distance_matrix(&points, args.workers)
        .context("failed to compute the distance matrix")?;

    if args.json {
        output::print_json(&points, &matrix)?;
    } else {
        output::print_matrix(&matrix);
    }

    if !args.no_verify {
        verify_matrix(&points, &matrix)
            .context("distance matrix failed the consistency check")?;
        info!("Consistency check passed");
    }

    Ok(())
}
