//! Matrix fill: fan out the worker tasks, fan in their results.
//!
//! The coordinator owns the result matrix for the whole fill. Workers run on
//! a pool of exactly K threads and report their computed entries over a
//! channel; the cell partition is exact, so no two reports ever carry the
//! same cell and the single-owner merge needs no locking. The pool scope is
//! the fan-in barrier: it returns only once every worker has finished or
//! observed cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Instant;

use distmat_core::{DistanceMatrix, DistmatError, Point};
use tracing::{debug, info, warn};

use crate::scheduler::{partition_cells, CellAssignment, WorkerTask};

/// Euclidean distance rounded to 2 decimal places, half away from zero.
///
/// This is the value stored in the matrix. The consistency check in
/// [`crate::verify`] compares against the unrounded reference with a 0.01
/// tolerance, so the rounding rule and the tolerance must not drift apart.
pub fn rounded_distance(a: &Point, b: &Point) -> f64 {
    (a.distance_to(b) * 100.0).round() / 100.0
}

/// What one worker sends back through the fan-in channel.
struct WorkerReport {
    worker_id: usize,
    outcome: WorkerOutcome,
}

enum WorkerOutcome {
    /// Every assigned cell was computed.
    Completed(Vec<(CellAssignment, f64)>),
    /// The worker hit an internal fault and set the cancel flag.
    Failed(DistmatError),
    /// The worker stopped early because a sibling failed.
    Cancelled { computed: usize },
}

/// Compute the full pairwise distance matrix for `points` using `workers`
/// concurrent workers.
///
/// The result is symmetric with a zero diagonal and is identical for every
/// worker count. Fails with `InvalidArgument` if `points` is empty or
/// `workers` is zero, and with `ComputationFailure` if any worker faults;
/// a failed fill never returns a partial matrix.
pub fn compute_distance_matrix(
    points: &[Point],
    workers: usize,
) -> Result<DistanceMatrix, DistmatError> {
    if points.is_empty() {
        return Err(DistmatError::InvalidArgument(
            "point set must not be empty".to_string(),
        ));
    }
    let tasks = partition_cells(points.len(), workers)?;
    fill_tasks(points, &tasks)
}

/// Run pre-built worker tasks against `points`.
///
/// Crate-internal so tests can drive the failure path with hand-made
/// (malformed) tasks.
pub(crate) fn fill_tasks(
    points: &[Point],
    tasks: &[WorkerTask],
) -> Result<DistanceMatrix, DistmatError> {
    let n = points.len();
    let mut matrix = DistanceMatrix::zeros(n);

    let total_cells: usize = tasks.iter().map(WorkerTask::len).sum();
    if total_cells == 0 {
        // Single point: the zero matrix is already complete.
        return Ok(matrix);
    }

    let start = Instant::now();
    info!(
        "Filling {}x{} distance matrix: {} cells across {} workers",
        n,
        n,
        total_cells,
        tasks.len()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(tasks.len())
        .build()
        .map_err(|e| {
            DistmatError::ComputationFailure(format!("failed to build worker pool: {e}"))
        })?;

    let cancel = AtomicBool::new(false);
    let (tx, rx) = mpsc::channel::<WorkerReport>();

    // Fan-out: one worker per task. The scope returns only after every
    // spawned worker has run, which is the fan-in barrier.
    pool.scope(|scope| {
        for task in tasks {
            let tx = tx.clone();
            let cancel = &cancel;
            scope.spawn(move |_| {
                let outcome = run_worker(points, task, cancel);
                // The receiver outlives the scope, so the send cannot fail.
                let _ = tx.send(WorkerReport {
                    worker_id: task.worker_id,
                    outcome,
                });
            });
        }
    });
    drop(tx);

    // Merge: the partition is exact, so every cell pair is written once.
    let mut first_failure: Option<DistmatError> = None;
    for report in rx {
        match report.outcome {
            WorkerOutcome::Completed(entries) => {
                debug!(
                    "Worker {} completed {} cells",
                    report.worker_id,
                    entries.len()
                );
                for (cell, distance) in entries {
                    matrix.set(cell.row, cell.col, distance);
                    matrix.set(cell.col, cell.row, distance);
                }
            }
            WorkerOutcome::Failed(err) => {
                warn!("Worker {} failed: {}", report.worker_id, err);
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
            WorkerOutcome::Cancelled { computed } => {
                debug!(
                    "Worker {} cancelled after {} cells",
                    report.worker_id, computed
                );
            }
        }
    }

    if let Some(err) = first_failure {
        return Err(err);
    }

    info!(
        "Matrix fill complete in {:.1}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(matrix)
}

/// Compute every cell assigned to one task, checking the cancel flag between
/// cells so a sibling failure stops the whole fill promptly. A faulting
/// worker raises the flag itself before reporting.
fn run_worker(points: &[Point], task: &WorkerTask, cancel: &AtomicBool) -> WorkerOutcome {
    let mut entries = Vec::with_capacity(task.len());
    for &cell in &task.cells {
        if cancel.load(Ordering::Relaxed) {
            return WorkerOutcome::Cancelled {
                computed: entries.len(),
            };
        }
        match compute_cell(points, cell) {
            Ok(distance) => entries.push((cell, distance)),
            Err(err) => {
                cancel.store(true, Ordering::Relaxed);
                return WorkerOutcome::Failed(err);
            }
        }
    }
    WorkerOutcome::Completed(entries)
}

/// One cell: look both points up and produce the rounded distance.
///
/// A cell referencing an out-of-range point or producing a non-finite value
/// is a fault in the task itself, reported rather than left to panic the
/// pool.
fn compute_cell(points: &[Point], cell: CellAssignment) -> Result<f64, DistmatError> {
    let p = points.get(cell.row).ok_or_else(|| {
        DistmatError::ComputationFailure(format!(
            "cell [{},{}] references row point {} outside the set of {}",
            cell.row,
            cell.col,
            cell.row,
            points.len()
        ))
    })?;
    let q = points.get(cell.col).ok_or_else(|| {
        DistmatError::ComputationFailure(format!(
            "cell [{},{}] references column point {} outside the set of {}",
            cell.row,
            cell.col,
            cell.col,
            points.len()
        ))
    })?;

    let distance = rounded_distance(p, q);
    if !distance.is_finite() {
        return Err(DistmatError::ComputationFailure(format!(
            "cell [{},{}] produced a non-finite distance",
            cell.row, cell.col
        )));
    }
    Ok(distance)
}
