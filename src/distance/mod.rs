//! Distance and speed matrices of a road network.
//!
//! Both matrices are dense, square, and indexed by 0-based vertex index
//! (vertex id minus one).

mod matrix;
mod speed_matrix;

pub use matrix::DistanceMatrix;
pub use speed_matrix::SpeedMatrix;
