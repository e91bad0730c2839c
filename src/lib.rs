//! # little-tsp
//!
//! Exact solver for the (asymmetric) Traveling Salesman Problem using
//! Little's branch-and-bound algorithm.
//!
//! - Row/column reduction bounds every branch from below
//! - Branching on the zero cell with the largest regret
//! - Subtour elimination keeps every finished branch a single circuit
//! - Depth-first search with pruning against the best tour so far
//!
//! ## Example
//!
//! ```rust
//! use little_tsp::prelude::*;
//!
//! const NO_EDGE: i64 = 999_999_999;
//! let matrix = CostMatrix::from_rows(
//!     vec![
//!         vec![NO_EDGE, 20, 30, 10, 11],
//!         vec![15, NO_EDGE, 16, 4, 2],
//!         vec![3, 5, NO_EDGE, 2, 4],
//!         vec![19, 6, 18, NO_EDGE, 3],
//!         vec![16, 4, 7, 16, NO_EDGE],
//!     ],
//!     NO_EDGE,
//! )?;
//!
//! let mut solver = LittleSolver::new(matrix)?;
//! solver.find_tour()?;
//! assert_eq!(solver.cost(), 28);
//! assert!(solver.is_optimal());
//! # Ok::<(), TspError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Index loops mirror the matrix notation
)]

pub mod cli;
pub mod config;
pub mod cost;
pub mod error;
pub mod little;
pub mod matrix;
pub mod tsplib;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{LittleConfig, LittleConfigBuilder, SolverConfig};
    pub use crate::cost::Cost;
    pub use crate::error::{TspError, TspResult};
    pub use crate::little::{LittleSolver, SearchStats, Solution};
    pub use crate::matrix::CostMatrix;
    pub use crate::tsplib::{TourFile, TsplibProblem};
}

/// Re-export for public API
pub use error::{TspError, TspResult};
