//! Cell scheduling: upper-triangle enumeration and round-robin partitioning.
//!
//! A symmetric matrix with a zero diagonal is fully determined by its upper
//! triangle, so only cells with `row < col` are ever assigned. Cells are
//! enumerated row-major and the t-th cell goes to worker `t mod K`, which
//! keeps every worker within one cell of equal load for any N and K.

use distmat_core::DistmatError;
use serde::{Deserialize, Serialize};

/// One upper-triangle cell to compute: `row < col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAssignment {
    pub row: usize,
    pub col: usize,
}

/// The ordered cells one worker owns for the lifetime of a single fill.
///
/// Plain data: a task is handed to an execution unit at fill time and is
/// never shared between workers or reassigned.
#[derive(Debug, Clone)]
pub struct WorkerTask {
    /// Stable worker slot index in `0..K`.
    pub worker_id: usize,
    pub cells: Vec<CellAssignment>,
}

impl WorkerTask {
    fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            cells: Vec::new(),
        }
    }

    /// Number of cells assigned to this worker.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Number of upper-triangle cells in an n×n matrix.
pub fn cell_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Row-major iterator over the upper-triangle cells of an n×n grid.
///
/// Yields `(0,1), (0,2), .., (0,n-1), (1,2), .., (n-2,n-1)`. For n ≤ 1 the
/// triangle is empty and nothing is yielded. The iterator carries its own
/// cursor, so enumeration can be stepped and inspected in isolation from
/// any execution machinery.
#[derive(Debug, Clone)]
pub struct UpperTriangle {
    n: usize,
    row: usize,
    col: usize,
}

impl UpperTriangle {
    pub fn new(n: usize) -> Self {
        Self { n, row: 0, col: 1 }
    }

    fn remaining(&self) -> usize {
        if self.n < 2 || self.row >= self.n - 1 {
            return 0;
        }
        // Cells left in the current row, plus the full rows below it.
        let tail_rows = self.n - 2 - self.row;
        (self.n - self.col) + tail_rows * (tail_rows + 1) / 2
    }
}

impl Iterator for UpperTriangle {
    type Item = CellAssignment;

    fn next(&mut self) -> Option<CellAssignment> {
        if self.n < 2 || self.row >= self.n - 1 {
            return None;
        }
        let cell = CellAssignment {
            row: self.row,
            col: self.col,
        };
        self.col += 1;
        if self.col == self.n {
            self.row += 1;
            self.col = self.row + 1;
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for UpperTriangle {}

/// Split the upper triangle of an n×n matrix into `workers` round-robin
/// tasks.
///
/// The t-th enumerated cell goes to worker `t % workers`, so no two task
/// sizes differ by more than one cell. Workers beyond the cell count receive
/// empty tasks.
///
/// Returns `InvalidArgument` if `n` or `workers` is zero.
pub fn partition_cells(n: usize, workers: usize) -> Result<Vec<WorkerTask>, DistmatError> {
    if n < 1 {
        return Err(DistmatError::InvalidArgument(
            "point count must be at least 1".to_string(),
        ));
    }
    if workers < 1 {
        return Err(DistmatError::InvalidArgument(
            "worker count must be at least 1".to_string(),
        ));
    }

    let mut tasks: Vec<WorkerTask> = (0..workers).map(WorkerTask::new).collect();
    for (t, cell) in UpperTriangle::new(n).enumerate() {
        tasks[t % workers].cells.push(cell);
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn cell(row: usize, col: usize) -> CellAssignment {
        CellAssignment { row, col }
    }

    #[test]
    fn enumeration_is_row_major() {
        let cells: Vec<CellAssignment> = UpperTriangle::new(4).collect();
        assert_eq!(
            cells,
            vec![
                cell(0, 1),
                cell(0, 2),
                cell(0, 3),
                cell(1, 2),
                cell(1, 3),
                cell(2, 3),
            ]
        );
    }

    #[test]
    fn empty_triangle_for_tiny_grids() {
        assert_eq!(UpperTriangle::new(0).count(), 0);
        assert_eq!(UpperTriangle::new(1).count(), 0);
    }

    #[test]
    fn exact_size_tracks_consumption() {
        let mut iter = UpperTriangle::new(5);
        assert_eq!(iter.len(), cell_count(5));
        iter.next();
        iter.next();
        assert_eq!(iter.len(), cell_count(5) - 2);
        let consumed: Vec<_> = iter.by_ref().collect();
        assert_eq!(consumed.len(), cell_count(5) - 2);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn cell_count_formula() {
        assert_eq!(cell_count(0), 0);
        assert_eq!(cell_count(1), 0);
        assert_eq!(cell_count(2), 1);
        assert_eq!(cell_count(3), 3);
        assert_eq!(cell_count(10), 45);
    }

    #[test]
    fn partition_covers_triangle_exactly() {
        for (n, workers) in [
            (1, 1),
            (2, 1),
            (2, 5),
            (5, 2),
            (6, 4),
            (7, 3),
            (10, 1),
            (10, 10),
            (10, 45),
            (4, 100),
        ] {
            let tasks = partition_cells(n, workers).unwrap();
            assert_eq!(tasks.len(), workers, "n={n} workers={workers}");

            let assigned: Vec<CellAssignment> =
                tasks.iter().flat_map(|t| t.cells.iter().copied()).collect();
            let unique: HashSet<CellAssignment> = assigned.iter().copied().collect();
            let expected: HashSet<CellAssignment> = UpperTriangle::new(n).collect();

            assert_eq!(
                assigned.len(),
                unique.len(),
                "duplicate cell for n={n} workers={workers}"
            );
            assert_eq!(unique, expected, "coverage gap for n={n} workers={workers}");
        }
    }

    #[test]
    fn partition_is_balanced_within_one_cell() {
        for (n, workers) in [(5, 2), (6, 4), (7, 3), (9, 5), (10, 7), (12, 11)] {
            let tasks = partition_cells(n, workers).unwrap();
            let max = tasks.iter().map(WorkerTask::len).max().unwrap();
            let min = tasks.iter().map(WorkerTask::len).min().unwrap();
            assert!(
                max - min <= 1,
                "imbalance {max}-{min} for n={n} workers={workers}"
            );
        }
    }

    #[test]
    fn round_robin_assignment_order() {
        let tasks = partition_cells(4, 2).unwrap();
        assert_eq!(tasks[0].worker_id, 0);
        assert_eq!(tasks[0].cells, vec![cell(0, 1), cell(0, 3), cell(1, 3)]);
        assert_eq!(tasks[1].worker_id, 1);
        assert_eq!(tasks[1].cells, vec![cell(0, 2), cell(1, 2), cell(2, 3)]);
    }

    #[test]
    fn partition_is_deterministic() {
        let first = partition_cells(9, 4).unwrap();
        let second = partition_cells(9, 4).unwrap();
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.cells, b.cells);
        }
    }

    #[test]
    fn surplus_workers_receive_empty_tasks() {
        let tasks = partition_cells(2, 5).unwrap();
        assert_eq!(tasks.len(), 5);
        assert_eq!(tasks[0].cells, vec![cell(0, 1)]);
        for task in &tasks[1..] {
            assert!(task.is_empty(), "worker {} should be idle", task.worker_id);
        }
    }

    #[test]
    fn single_point_yields_only_empty_tasks() {
        let tasks = partition_cells(1, 3).unwrap();
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(WorkerTask::is_empty));
    }

    #[test]
    fn zero_points_rejected() {
        let err = partition_cells(0, 2).unwrap_err();
        assert!(matches!(err, DistmatError::InvalidArgument(_)), "{err}");
    }

    #[test]
    fn zero_workers_rejected() {
        let err = partition_cells(3, 0).unwrap_err();
        assert!(matches!(err, DistmatError::InvalidArgument(_)), "{err}");
    }
}
