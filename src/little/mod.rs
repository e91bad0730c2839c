//! Little's branch-and-bound algorithm for the asymmetric TSP.
//!
//! Matrices handed to the submodules are augmented: row 0 and column 0
//! carry city labels `1..=n` so that cells keep their identity while rows
//! and columns are deleted during the search.

pub mod reduction;
pub mod solver;
pub mod subtour;
pub mod tree;

pub use reduction::{reduce_matrix, select_branch, Branch, Reduction, Regret};
pub use solver::{LittleSolver, SearchStats, Solution};
pub use tree::{Edge, NodeId, SearchNode, SearchTree};
