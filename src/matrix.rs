//! Resizable cost matrix with a sentinel "empty" value.
//!
//! Rows and columns can be inserted and removed anywhere; removal shifts the
//! following indices down by one. Every index is checked before the matrix
//! is touched and a violation is reported, never clamped.

use std::fmt;

use crate::error::{TspError, TspResult};

/// Matrix axis, used to report bounds violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Row index.
    Row,
    /// Column index.
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Column => write!(f, "column"),
        }
    }
}

/// Dense 2-D grid of cells with a designated empty value.
///
/// The empty value doubles as "infinite" cost for the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix<T> {
    rows: usize,
    cols: usize,
    empty: T,
    data: Vec<Vec<T>>,
}

impl<T: Copy + PartialEq> CostMatrix<T> {
    /// Create a `rows` x `cols` matrix with every cell set to `empty`.
    ///
    /// # Errors
    ///
    /// Returns `TspError::NegativeDimension` if either dimension is negative.
    pub fn new(rows: isize, cols: isize, empty: T) -> TspResult<Self> {
        match (usize::try_from(rows), usize::try_from(cols)) {
            (Ok(r), Ok(c)) => Ok(Self::filled(r, c, empty)),
            _ => Err(TspError::NegativeDimension { rows, cols }),
        }
    }

    /// Create a `rows` x `cols` matrix with every cell set to `empty`.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, empty: T) -> Self {
        Self {
            rows,
            cols,
            empty,
            data: vec![vec![empty; cols]; rows],
        }
    }

    /// Build a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns `TspError::RaggedRow` if the rows differ in length.
    pub fn from_rows(data: Vec<Vec<T>>, empty: T) -> TspResult<Self> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        if let Some((row, r)) = data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(TspError::RaggedRow {
                row,
                expected: cols,
                got: r.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            empty,
            data,
        })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// The sentinel value of empty cells.
    #[must_use]
    pub fn empty_value(&self) -> T {
        self.empty
    }

    /// Whether `value` is the sentinel.
    #[inline]
    #[must_use]
    pub fn is_empty_cell(&self, value: T) -> bool {
        value == self.empty
    }

    /// Whether the matrix has as many rows as columns.
    #[must_use]
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Read a cell.
    ///
    /// # Errors
    ///
    /// Returns `TspError::IndexOutOfBounds` if `row` or `col` is out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> TspResult<T> {
        self.check_row(row)?;
        self.check_col(col)?;
        Ok(self.data[row][col])
    }

    /// Write a cell.
    ///
    /// # Errors
    ///
    /// Returns `TspError::IndexOutOfBounds` if `row` or `col` is out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) -> TspResult<()> {
        self.check_row(row)?;
        self.check_col(col)?;
        self.data[row][col] = value;
        Ok(())
    }

    /// Borrow a whole row.
    ///
    /// # Errors
    ///
    /// Returns `TspError::IndexOutOfBounds` if `row` is out of range.
    pub fn row(&self, row: usize) -> TspResult<&[T]> {
        self.check_row(row)?;
        Ok(&self.data[row])
    }

    /// Insert a row of empty cells before position `at` (`at == rows` appends).
    ///
    /// # Errors
    ///
    /// Returns `TspError::IndexOutOfBounds` if `at > rows`.
    pub fn insert_row(&mut self, at: usize) -> TspResult<()> {
        if at > self.rows {
            return Err(Self::out_of_bounds(Axis::Row, at, self.rows + 1));
        }
        self.data.insert(at, vec![self.empty; self.cols]);
        self.rows += 1;
        Ok(())
    }

    /// Insert a column of empty cells before position `at` (`at == cols` appends).
    ///
    /// # Errors
    ///
    /// Returns `TspError::IndexOutOfBounds` if `at > cols`.
    pub fn insert_column(&mut self, at: usize) -> TspResult<()> {
        if at > self.cols {
            return Err(Self::out_of_bounds(Axis::Column, at, self.cols + 1));
        }
        for row in &mut self.data {
            row.insert(at, self.empty);
        }
        self.cols += 1;
        Ok(())
    }

    /// Remove the row at `at`.
    ///
    /// # Errors
    ///
    /// Returns `TspError::IndexOutOfBounds` if `at >= rows`.
    pub fn remove_row(&mut self, at: usize) -> TspResult<()> {
        self.check_row(at)?;
        self.data.remove(at);
        self.rows -= 1;
        Ok(())
    }

    /// Remove the column at `at`.
    ///
    /// # Errors
    ///
    /// Returns `TspError::IndexOutOfBounds` if `at >= cols`.
    pub fn remove_column(&mut self, at: usize) -> TspResult<()> {
        self.check_col(at)?;
        for row in &mut self.data {
            row.remove(at);
        }
        self.cols -= 1;
        Ok(())
    }

    fn check_row(&self, row: usize) -> TspResult<()> {
        if row < self.rows {
            Ok(())
        } else {
            Err(Self::out_of_bounds(Axis::Row, row, self.rows))
        }
    }

    fn check_col(&self, col: usize) -> TspResult<()> {
        if col < self.cols {
            Ok(())
        } else {
            Err(Self::out_of_bounds(Axis::Column, col, self.cols))
        }
    }

    const fn out_of_bounds(axis: Axis, index: usize, limit: usize) -> TspError {
        TspError::IndexOutOfBounds { axis, index, limit }
    }
}

/// Grid dump with `/` for empty cells.
impl<T: Copy + PartialEq + fmt::Display> fmt::Display for CostMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            for &value in row {
                if self.is_empty_cell(value) {
                    write!(f, "{:>5}", "/  ")?;
                } else {
                    write!(f, "{value:>4} ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
