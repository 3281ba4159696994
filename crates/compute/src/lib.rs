pub mod coordinator;
pub mod scheduler;
pub mod verify;

pub use coordinator::{compute_distance_matrix, rounded_distance};
pub use scheduler::{cell_count, partition_cells, CellAssignment, UpperTriangle, WorkerTask};
pub use verify::{verify_matrix, DISTANCE_TOLERANCE};
