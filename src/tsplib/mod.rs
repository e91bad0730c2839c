//! TSPLIB input and output.
//!
//! Only explicit edge weights are understood: coordinate-based problems
//! are rejected while reading.

pub mod reader;
pub mod writer;

pub use reader::{EdgeWeightFormat, ProblemType, TsplibProblem};
pub use writer::TourFile;
