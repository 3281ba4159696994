pub mod error;
pub mod matrix;
pub mod point;

pub use error::*;
pub use matrix::*;
pub use point::*;
