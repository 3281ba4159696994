use thiserror::Error;

/// Errors surfaced by the distance matrix pipeline.
#[derive(Error, Debug)]
pub enum DistmatError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Worker computation failed: {0}")]
    ComputationFailure(String),

    #[error("Consistency violation at cell [{row},{col}]: expected {expected}, found {found}")]
    ConsistencyViolation {
        row: usize,
        col: usize,
        expected: f64,
        found: f64,
    },
}
