//! Little's branch-and-bound search.
//!
//! The search walks the branch tree depth first with an explicit stack.
//! At every level it branches on the zero cell of largest regret: the
//! excluding child is deferred on the stack with its own copy of the matrix,
//! the including child is continued immediately on the shrunk matrix. A
//! branch is abandoned as soon as its bound reaches the best tour found.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::cost::Cost;
use crate::error::{TspError, TspResult};
use crate::matrix::{Axis, CostMatrix};

use super::reduction::{col_label, reduce_matrix, row_label, select_branch};
use super::subtour::{chain_fragment, forbid_closing_edge, order_tour};
use super::tree::{Edge, NodeId, SearchNode, SearchTree};

/// Augmented size of a matrix with two cities left.
const BASE_ROWS: usize = 3;

/// Label of the city every reported tour starts from.
const FIRST_LABEL: usize = 1;

/// Best tour of a finished search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution<T> {
    /// Zero-based city indices, starting at city 0.
    pub tour: Vec<usize>,
    /// Total cost including the closing edge.
    pub cost: T,
    /// Whether the search finished without hitting the node budget.
    pub optimal: bool,
}

/// Counters of one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes appended to the tree.
    pub nodes: usize,
    /// Excluding branches deferred on the stack.
    pub branches_pushed: usize,
    /// Excluding branches dropped because of their bound.
    pub branches_pruned: usize,
    /// Number of times the best tour improved.
    pub improvements: usize,
    /// Whether the node budget stopped the search.
    pub truncated: bool,
}

/// Deferred branch: where it hangs in the tree and the matrix to resume from.
#[derive(Debug, Clone)]
struct PendingBranch<T> {
    node: NodeId,
    matrix: CostMatrix<T>,
}

/// Exact TSP solver over an explicit cost matrix.
///
/// # Example
///
/// ```rust
/// use little_tsp::prelude::*;
///
/// const NO_EDGE: i64 = 999_999_999;
/// let matrix = CostMatrix::from_rows(
///     vec![
///         vec![NO_EDGE, 1, 20, 20],
///         vec![20, NO_EDGE, 2, 20],
///         vec![20, 20, NO_EDGE, 3],
///         vec![4, 20, 20, NO_EDGE],
///     ],
///     NO_EDGE,
/// )?;
/// let mut solver = LittleSolver::new(matrix)?;
/// solver.find_tour()?;
/// assert_eq!(solver.tour(), &[0, 1, 2, 3]);
/// assert_eq!(solver.cost(), 10);
/// assert!(solver.is_optimal());
/// # Ok::<(), little_tsp::TspError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LittleSolver<T> {
    infinity: T,
    initial: CostMatrix<T>,
    config: SolverConfig,
    tree: SearchTree<T>,
    best_cost: T,
    best_tour: Vec<usize>,
    optimal: bool,
    root_bound: Option<T>,
    stats: SearchStats,
}

impl<T: Cost> LittleSolver<T> {
    /// Create a solver with default settings.
    ///
    /// # Errors
    ///
    /// See [`LittleSolver::with_config`].
    pub fn new(matrix: CostMatrix<T>) -> TspResult<Self> {
        Self::with_config(matrix, SolverConfig::default())
    }

    /// Create a solver for the n x n `matrix`.
    ///
    /// The matrix sentinel is the "no edge" value; self-loops are set to it.
    ///
    /// # Errors
    ///
    /// Returns error if the matrix is not square, has fewer than 2 cities,
    /// uses zero as sentinel, or has more cities than `T` can label.
    pub fn with_config(mut matrix: CostMatrix<T>, config: SolverConfig) -> TspResult<Self> {
        if !matrix.is_square() {
            return Err(TspError::NotSquare {
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }
        let n = matrix.rows();
        if n < 2 {
            return Err(TspError::TooFewCities(n));
        }
        let infinity = matrix.empty_value();
        if infinity == T::ZERO {
            return Err(TspError::config("the no-edge sentinel must not be zero"));
        }

        for i in 0..n {
            matrix.set(i, i, infinity)?;
        }
        add_labels(&mut matrix)?;

        Ok(Self {
            infinity,
            initial: matrix,
            config,
            tree: SearchTree::new(),
            best_cost: T::MAX,
            best_tour: Vec::new(),
            optimal: false,
            root_bound: None,
            stats: SearchStats::default(),
        })
    }

    /// Run the search to completion, or until the node budget is spent.
    ///
    /// Calling it again restarts from scratch.
    ///
    /// # Errors
    ///
    /// Only on an internal invariant violation (see
    /// [`TspError::is_invariant_violation`]).
    pub fn find_tour(&mut self) -> TspResult<()> {
        self.reset();

        let mut stack = vec![PendingBranch {
            node: NodeId::ROOT,
            matrix: self.initial.clone(),
        }];

        while let Some(PendingBranch { node, mut matrix }) = stack.pop() {
            let reduction = reduce_matrix(&mut matrix)?;

            let node = if self.tree.is_empty() {
                self.root_bound = reduction.feasible.then_some(reduction.bound);
                let cost = if reduction.feasible {
                    reduction.bound
                } else {
                    T::MAX
                };
                self.push_node(SearchNode::root(cost))
            } else if reduction.feasible {
                node
            } else {
                continue;
            };

            if !self.explore(node, matrix, &mut stack)? {
                self.stats.truncated = true;
                if self.best_tour.is_empty() {
                    warn!(
                        "node budget of {} reached with {} pending branches; no tour found yet",
                        self.tree.len(),
                        stack.len()
                    );
                } else {
                    warn!(
                        "node budget of {} reached with {} pending branches; best cost {} is not proven optimal",
                        self.tree.len(),
                        stack.len(),
                        self.best_cost
                    );
                }
                return Ok(());
            }
        }

        self.optimal = true;
        info!(
            "search finished: {} nodes, {} improvements, cost {}",
            self.stats.nodes, self.stats.improvements, self.best_cost
        );
        Ok(())
    }

    /// Follow the including branch from `id` down to a leaf.
    ///
    /// Returns `false` if the node budget ran out.
    fn explore(
        &mut self,
        mut id: NodeId,
        mut m: CostMatrix<T>,
        stack: &mut Vec<PendingBranch<T>>,
    ) -> TspResult<bool> {
        while m.rows() > BASE_ROWS && self.node_cost(id)? < self.best_cost {
            if self.budget_exhausted() {
                return Ok(false);
            }
            let Some(branch) = select_branch(&m)? else {
                return Ok(true);
            };
            let parent_cost = self.node_cost(id)?;

            let excluded_cost = branch.regret.add_to(parent_cost);
            let excluded = self.push_node(SearchNode::excluding(excluded_cost, branch.edge, id));
            if excluded_cost < self.best_cost {
                let mut matrix = m.clone();
                matrix.set(branch.row, branch.col, self.infinity)?;
                stack.push(PendingBranch {
                    node: excluded,
                    matrix,
                });
                self.stats.branches_pushed += 1;
            } else {
                self.stats.branches_pruned += 1;
            }

            m.remove_row(branch.row)?;
            m.remove_column(branch.col)?;
            let fragment = chain_fragment(branch.edge, self.tree.included_edges(excluded));
            forbid_closing_edge(&mut m, &fragment)?;

            let reduction = reduce_matrix(&mut m)?;
            let included_cost = if reduction.feasible {
                parent_cost.add_saturating(reduction.bound)
            } else {
                T::MAX
            };
            id = self.push_node(SearchNode::including(included_cost, branch.edge, id));
        }

        if m.rows() == BASE_ROWS && self.node_cost(id)? < self.best_cost {
            self.close_tour(id, &m)?;
        }
        Ok(true)
    }

    /// Complete the branch at `id` with the last two edges of the 2x2 block.
    fn close_tour(&mut self, id: NodeId, m: &CostMatrix<T>) -> TspResult<()> {
        let base_cost = self.node_cost(id)?;
        let lineage = self.tree.included_edges(id);

        let mut best: Option<(T, [Edge; 2])> = None;
        for cells in [[(1, 1), (2, 2)], [(1, 2), (2, 1)]] {
            let mut cost = base_cost;
            let mut edges = [Edge::new(0, 0); 2];
            let mut finite = true;
            for (edge, &(i, j)) in edges.iter_mut().zip(&cells) {
                let value = m.get(i, j)?;
                if m.is_empty_cell(value) {
                    finite = false;
                    break;
                }
                cost = cost.add_saturating(value);
                *edge = Edge::new(row_label(m, i)?, col_label(m, j)?);
            }
            if !finite || best.is_some_and(|(c, _)| cost >= c) {
                continue;
            }
            let mut all = lineage.clone();
            all.extend(edges);
            if order_tour(all, FIRST_LABEL).is_ok() {
                best = Some((cost, edges));
            }
        }

        let Some((cost, [first_edge, last_edge])) = best else {
            return Ok(());
        };
        if cost >= self.best_cost {
            return Ok(());
        }

        let first = self.push_node(SearchNode::including(cost, first_edge, id));
        let last = self.push_node(SearchNode::including(cost, last_edge, first));
        let tour = order_tour(self.tree.included_edges(last), FIRST_LABEL)?
            .into_iter()
            .map(|label| {
                label
                    .checked_sub(1)
                    .ok_or_else(|| TspError::reconstruction("bookkeeping label 0 in a tour"))
            })
            .collect::<TspResult<Vec<_>>>()?;

        if self.config.verify_cost {
            let actual = self.tour_cost(&tour)?;
            if actual != cost {
                return Err(TspError::reconstruction(format!(
                    "tour cost {actual} differs from its bound {cost}"
                )));
            }
        }

        self.best_cost = cost;
        self.best_tour = tour;
        self.stats.improvements += 1;
        debug!(
            "cost {} tour {:?} node {}",
            cost,
            self.best_tour,
            last.index()
        );
        Ok(())
    }

    /// Cost of `tour` (zero-based cities, closing edge included) in the input matrix.
    ///
    /// # Errors
    ///
    /// Returns error if a city is out of range or the tour uses a missing edge.
    pub fn tour_cost(&self, tour: &[usize]) -> TspResult<T> {
        let mut total = T::ZERO;
        for (k, &from) in tour.iter().enumerate() {
            let to = tour[(k + 1) % tour.len()];
            let value = self.initial.get(self.label_of(from)?, self.label_of(to)?)?;
            if self.initial.is_empty_cell(value) {
                return Err(TspError::reconstruction(format!(
                    "tour uses missing edge {from} -> {to}"
                )));
            }
            total = total.add_saturating(value);
        }
        Ok(total)
    }

    /// Label of the zero-based `city`.
    fn label_of(&self, city: usize) -> TspResult<usize> {
        if city < self.num_cities() {
            Ok(city + 1)
        } else {
            Err(TspError::IndexOutOfBounds {
                axis: Axis::Row,
                index: city,
                limit: self.num_cities(),
            })
        }
    }

    fn reset(&mut self) {
        self.tree = SearchTree::new();
        self.best_cost = T::MAX;
        self.best_tour.clear();
        self.optimal = false;
        self.root_bound = None;
        self.stats = SearchStats::default();
    }

    fn push_node(&mut self, node: SearchNode<T>) -> NodeId {
        let id = self.tree.push(node);
        self.stats.nodes += 1;
        if self.tree.len().checked_rem(self.config.progress_interval) == Some(0) {
            debug!("{} nodes ...", self.tree.len());
        }
        id
    }

    fn node_cost(&self, id: NodeId) -> TspResult<T> {
        self.tree
            .get(id)
            .map(|node| node.cost)
            .ok_or_else(|| TspError::reconstruction(format!("node {} is not in the tree", id.index())))
    }

    fn budget_exhausted(&self) -> bool {
        self.config
            .max_nodes
            .is_some_and(|max| self.tree.len() >= max)
    }

    /// Number of cities.
    #[must_use]
    pub fn num_cities(&self) -> usize {
        self.initial.rows() - 1
    }

    /// Best tour found, as zero-based cities starting at city 0.
    ///
    /// Empty if no feasible tour exists.
    #[must_use]
    pub fn tour(&self) -> &[usize] {
        &self.best_tour
    }

    /// Cost of [`LittleSolver::tour`]; `T::MAX` if there is none.
    #[must_use]
    pub fn cost(&self) -> T {
        self.best_cost
    }

    /// Whether the last search explored or pruned every branch.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.optimal
    }

    /// Bound of the root reduction; `None` if the root is infeasible.
    #[must_use]
    pub fn root_bound(&self) -> Option<T> {
        self.root_bound
    }

    /// Counters of the last search.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search tree of the last search.
    #[must_use]
    pub fn tree(&self) -> &SearchTree<T> {
        &self.tree
    }

    /// The augmented input matrix.
    #[must_use]
    pub fn initial_matrix(&self) -> &CostMatrix<T> {
        &self.initial
    }

    /// Best tour with cost and optimality, `None` if no tour was found.
    #[must_use]
    pub fn solution(&self) -> Option<Solution<T>> {
        if self.best_tour.is_empty() {
            return None;
        }
        Some(Solution {
            tour: self.best_tour.clone(),
            cost: self.best_cost,
            optimal: self.optimal,
        })
    }
}

/// Insert label row and column 0 holding 0..=n.
fn add_labels<T: Cost>(m: &mut CostMatrix<T>) -> TspResult<()> {
    m.insert_row(0)?;
    m.insert_column(0)?;
    for k in 0..m.rows() {
        let label = T::from_label(k).ok_or(TspError::CityLabel(k))?;
        m.set(0, k, label)?;
        m.set(k, 0, label)?;
    }
    Ok(())
}
