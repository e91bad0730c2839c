//! Row/column reduction and regret-based branch selection.
//!
//! All functions work on an augmented matrix: row 0 and column 0 carry city
//! labels and are never read as costs. Cells equal to the matrix sentinel
//! are infinite and never take part in arithmetic.

use crate::cost::Cost;
use crate::error::{TspError, TspResult};
use crate::matrix::CostMatrix;

use super::tree::Edge;

/// Outcome of reducing a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduction<T> {
    /// Sum of all subtracted row and column minima.
    pub bound: T,
    /// `false` if some row or column has no finite cell left.
    pub feasible: bool,
}

/// Penalty for forbidding a zero cell.
///
/// `Infinite` orders above every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Regret<T> {
    /// Cheapest detour cost.
    Finite(T),
    /// No detour exists: every tour of this branch uses the edge.
    Infinite,
}

impl<T: Cost> Regret<T> {
    /// Bound of the excluding child of a node with bound `cost`.
    #[must_use]
    pub fn add_to(self, cost: T) -> T {
        match self {
            Self::Finite(regret) => cost.add_saturating(regret),
            Self::Infinite => T::MAX,
        }
    }
}

/// Zero cell chosen for branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch<T> {
    /// Matrix row of the cell.
    pub row: usize,
    /// Matrix column of the cell.
    pub col: usize,
    /// City labels of the cell.
    pub edge: Edge,
    /// Cost of forbidding the edge.
    pub regret: Regret<T>,
}

/// Smallest finite cost in `row`, optionally skipping one column.
///
/// # Errors
///
/// Returns `TspError::IndexOutOfBounds` if `row` is out of range.
pub fn min_in_row<T: Cost>(
    m: &CostMatrix<T>,
    row: usize,
    ignored_col: Option<usize>,
) -> TspResult<Option<T>> {
    let cells = m.row(row)?;
    Ok(cells
        .iter()
        .enumerate()
        .skip(1)
        .filter(|&(j, &v)| Some(j) != ignored_col && !m.is_empty_cell(v))
        .map(|(_, &v)| v)
        .min())
}

/// Smallest finite cost in `col`, optionally skipping one row.
///
/// # Errors
///
/// Returns `TspError::IndexOutOfBounds` if `col` is out of range.
pub fn min_in_column<T: Cost>(
    m: &CostMatrix<T>,
    col: usize,
    ignored_row: Option<usize>,
) -> TspResult<Option<T>> {
    let mut min: Option<T> = None;
    for i in 1..m.rows() {
        if Some(i) == ignored_row {
            continue;
        }
        let v = m.get(i, col)?;
        if !m.is_empty_cell(v) {
            min = Some(min.map_or(v, |cur| cur.min(v)));
        }
    }
    Ok(min)
}

fn reduce_row<T: Cost>(m: &mut CostMatrix<T>, row: usize) -> TspResult<Option<T>> {
    let Some(min) = min_in_row(m, row, None)? else {
        return Ok(None);
    };
    if min != T::ZERO {
        for j in 1..m.cols() {
            let v = m.get(row, j)?;
            if !m.is_empty_cell(v) {
                m.set(row, j, v - min)?;
            }
        }
    }
    Ok(Some(min))
}

fn reduce_column<T: Cost>(m: &mut CostMatrix<T>, col: usize) -> TspResult<Option<T>> {
    let Some(min) = min_in_column(m, col, None)? else {
        return Ok(None);
    };
    if min != T::ZERO {
        for i in 1..m.rows() {
            let v = m.get(i, col)?;
            if !m.is_empty_cell(v) {
                m.set(i, col, v - min)?;
            }
        }
    }
    Ok(Some(min))
}

/// Reduce every row, then every column, of `m` in place.
///
/// Afterwards each feasible row and column holds at least one zero. An
/// all-infinite row or column is left as is and contributes nothing.
///
/// # Errors
///
/// Only on a bookkeeping defect (`TspError::IndexOutOfBounds`).
pub fn reduce_matrix<T: Cost>(m: &mut CostMatrix<T>) -> TspResult<Reduction<T>> {
    let mut bound = T::ZERO;
    let mut feasible = true;

    for i in 1..m.rows() {
        match reduce_row(m, i)? {
            Some(min) => bound = bound.add_saturating(min),
            None => feasible = false,
        }
    }
    for j in 1..m.cols() {
        match reduce_column(m, j)? {
            Some(min) => bound = bound.add_saturating(min),
            None => feasible = false,
        }
    }

    Ok(Reduction { bound, feasible })
}

/// Label stored in column 0 of `row`.
///
/// # Errors
///
/// Returns `TspError::Reconstruction` if the cell is not a valid label.
pub fn row_label<T: Cost>(m: &CostMatrix<T>, row: usize) -> TspResult<usize> {
    m.get(row, 0)?
        .to_label()
        .ok_or_else(|| TspError::reconstruction(format!("row {row} carries no city label")))
}

/// Label stored in row 0 of `col`.
///
/// # Errors
///
/// Returns `TspError::Reconstruction` if the cell is not a valid label.
pub fn col_label<T: Cost>(m: &CostMatrix<T>, col: usize) -> TspResult<usize> {
    m.get(0, col)?
        .to_label()
        .ok_or_else(|| TspError::reconstruction(format!("column {col} carries no city label")))
}

/// Pick the zero cell with the largest regret.
///
/// Ties keep the first cell in row-major order. Returns `None` when the
/// matrix has no zero cell.
///
/// # Errors
///
/// Only on a bookkeeping defect.
pub fn select_branch<T: Cost>(m: &CostMatrix<T>) -> TspResult<Option<Branch<T>>> {
    let mut best: Option<Branch<T>> = None;

    for i in 1..m.rows() {
        for j in 1..m.cols() {
            let v = m.get(i, j)?;
            if m.is_empty_cell(v) || v != T::ZERO {
                continue;
            }
            let regret = match (min_in_row(m, i, Some(j))?, min_in_column(m, j, Some(i))?) {
                (Some(r), Some(c)) => Regret::Finite(r.add_saturating(c)),
                _ => Regret::Infinite,
            };
            if best.map_or(true, |b| regret > b.regret) {
                best = Some(Branch {
                    row: i,
                    col: j,
                    edge: Edge::new(row_label(m, i)?, col_label(m, j)?),
                    regret,
                });
            }
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: i64 = i64::MAX;

    /// Augment `costs` with label row/column 0..=n.
    fn augmented(costs: &[&[i64]]) -> CostMatrix<i64> {
        let n = costs.len();
        let mut rows = vec![(0..=n as i64).collect::<Vec<_>>()];
        for (i, row) in costs.iter().enumerate() {
            let mut r = vec![i as i64 + 1];
            r.extend_from_slice(row);
            rows.push(r);
        }
        CostMatrix::from_rows(rows, INF).unwrap()
    }

    fn textbook() -> CostMatrix<i64> {
        augmented(&[
            &[INF, 20, 30, 10, 11],
            &[15, INF, 16, 4, 2],
            &[3, 5, INF, 2, 4],
            &[19, 6, 18, INF, 3],
            &[16, 4, 7, 16, INF],
        ])
    }

    #[test]
    fn test_row_and_column_minimum_skip_labels() {
        let m = textbook();
        assert_eq!(min_in_row(&m, 1, None).unwrap(), Some(10));
        assert_eq!(min_in_row(&m, 1, Some(4)).unwrap(), Some(11));
        assert_eq!(min_in_column(&m, 1, None).unwrap(), Some(3));
        assert_eq!(min_in_column(&m, 1, Some(3)).unwrap(), Some(15));
    }

    #[test]
    fn test_minimum_of_infinite_row_is_none() {
        let m = augmented(&[&[INF, INF], &[3, INF]]);
        assert_eq!(min_in_row(&m, 1, None).unwrap(), None);
        assert_eq!(min_in_column(&m, 2, None).unwrap(), None);
    }

    #[test]
    fn test_reduce_textbook_matrix() {
        let mut m = textbook();
        let reduction = reduce_matrix(&mut m).unwrap();
        assert_eq!(
            reduction,
            Reduction {
                bound: 25,
                feasible: true
            }
        );
        assert_eq!(m.row(1).unwrap(), &[1, INF, 10, 17, 0, 1]);
        assert_eq!(m.row(2).unwrap(), &[2, 12, INF, 11, 2, 0]);
        assert_eq!(m.row(3).unwrap(), &[3, 0, 3, INF, 0, 2]);
        assert_eq!(m.row(4).unwrap(), &[4, 15, 3, 12, INF, 0]);
        assert_eq!(m.row(5).unwrap(), &[5, 11, 0, 0, 12, INF]);
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let mut m = textbook();
        reduce_matrix(&mut m).unwrap();
        let again = reduce_matrix(&mut m).unwrap();
        assert_eq!(again.bound, 0);
        assert!(again.feasible);
    }

    #[test]
    fn test_reduce_leaves_infinite_row_untouched() {
        let mut m = augmented(&[&[INF, INF, INF], &[4, INF, 6], &[5, 7, INF]]);
        let reduction = reduce_matrix(&mut m).unwrap();
        assert!(!reduction.feasible);
        assert_eq!(m.row(1).unwrap(), &[1, INF, INF, INF]);
    }

    #[test]
    fn test_select_branch_prefers_first_maximum() {
        let mut m = textbook();
        reduce_matrix(&mut m).unwrap();
        let branch = select_branch(&m).unwrap().unwrap();
        // (3,1) and (5,3) both have regret 11; row-major keeps (3,1).
        assert_eq!((branch.row, branch.col), (3, 1));
        assert_eq!(branch.edge, Edge::new(3, 1));
        assert_eq!(branch.regret, Regret::Finite(11));
    }

    #[test]
    fn test_select_branch_reads_labels_after_deletion() {
        let mut m = textbook();
        reduce_matrix(&mut m).unwrap();
        m.remove_row(3).unwrap();
        m.remove_column(1).unwrap();
        reduce_matrix(&mut m).unwrap();
        let branch = select_branch(&m).unwrap().unwrap();
        assert_eq!(branch.edge.from, row_label(&m, branch.row).unwrap());
        assert_eq!(branch.edge.to, col_label(&m, branch.col).unwrap());
    }

    #[test]
    fn test_infinite_regret_wins() {
        // Row 1 has a single finite cell: forbidding it leaves no detour.
        let mut m = augmented(&[&[INF, 0, INF], &[0, INF, 0], &[0, 0, INF]]);
        reduce_matrix(&mut m).unwrap();
        let branch = select_branch(&m).unwrap().unwrap();
        assert_eq!((branch.row, branch.col), (1, 2));
        assert_eq!(branch.regret, Regret::Infinite);
        assert_eq!(branch.regret.add_to(5), INF);
    }

    #[test]
    fn test_no_zero_cell() {
        let m = augmented(&[&[INF, 3], &[4, INF]]);
        assert_eq!(select_branch(&m).unwrap(), None);
    }

    #[test]
    fn test_regret_ordering() {
        assert!(Regret::Infinite > Regret::Finite(u32::MAX));
        assert!(Regret::Finite(3) > Regret::Finite(2));
        assert_eq!(Regret::Finite(4).add_to(6u32), 10);
    }
}
