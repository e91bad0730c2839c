//! Subtour elimination and tour reconstruction.
//!
//! Forced edges of a branch form disjoint paths. Whenever a new edge joins
//! or extends a path, the edge that would close that path into a cycle is
//! forbidden, so a finished branch always describes one Hamiltonian circuit.

use std::collections::VecDeque;

use crate::cost::Cost;
use crate::error::{TspError, TspResult};
use crate::matrix::CostMatrix;

use super::reduction::{col_label, row_label};
use super::tree::Edge;

/// Grow the longest path through `core` using the forced `segments`.
///
/// Segments are tried in list order; each is used at most once. Returns the
/// path as a sequence of city labels.
#[must_use]
pub fn chain_fragment(core: Edge, mut segments: Vec<Edge>) -> VecDeque<usize> {
    let mut fragment = VecDeque::from([core.from, core.to]);

    while let Some(pos) = segments
        .iter()
        .position(|s| fragment.front() == Some(&s.to) || fragment.back() == Some(&s.from))
    {
        let segment = segments.remove(pos);
        if fragment.front() == Some(&segment.to) {
            fragment.push_front(segment.from);
        } else {
            fragment.push_back(segment.to);
        }
    }

    fragment
}

/// Forbid the edge from the fragment's last city back to its first one.
///
/// Returns `false` when either city no longer has a row or column in `m`.
///
/// # Errors
///
/// Only on a bookkeeping defect.
pub fn forbid_closing_edge<T: Cost>(
    m: &mut CostMatrix<T>,
    fragment: &VecDeque<usize>,
) -> TspResult<bool> {
    let (Some(&first), Some(&last)) = (fragment.front(), fragment.back()) else {
        return Ok(false);
    };

    let mut row = None;
    for i in 1..m.rows() {
        if row_label(m, i)? == last {
            row = Some(i);
            break;
        }
    }
    let mut col = None;
    for j in 1..m.cols() {
        if col_label(m, j)? == first {
            col = Some(j);
            break;
        }
    }

    match (row, col) {
        (Some(i), Some(j)) => {
            let infinity = m.empty_value();
            m.set(i, j, infinity)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Order a set of edges into a circuit starting at `begin`.
///
/// The returned labels list every city once; the closing edge back to
/// `begin` is implied.
///
/// # Errors
///
/// Returns `TspError::Reconstruction` if the edges do not form exactly one
/// circuit through `begin`.
pub fn order_tour(mut edges: Vec<Edge>, begin: usize) -> TspResult<Vec<usize>> {
    let expected = edges.len();
    let mut tour = Vec::with_capacity(expected + 1);
    tour.push(begin);
    let mut tail = begin;

    while !edges.is_empty() {
        let pos = edges.iter().position(|e| e.from == tail).ok_or_else(|| {
            TspError::reconstruction(format!(
                "no forced edge leaves city label {tail} ({} edges left)",
                edges.len()
            ))
        })?;
        tail = edges.remove(pos).to;
        tour.push(tail);
    }

    if tail != begin || tour.len() != expected + 1 {
        return Err(TspError::reconstruction(format!(
            "forced edges end at label {tail} instead of closing at {begin}"
        )));
    }
    tour.pop();
    Ok(tour)
}
