//! Append-only search tree.
//!
//! Nodes are stored in insertion order and refer to their parent by index,
//! so walking a branch back to the root never needs shared ownership.

use serde::{Deserialize, Serialize};

/// Directed edge between two city labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Label of the departure city.
    pub from: usize,
    /// Label of the arrival city.
    pub to: usize,
}

impl Edge {
    /// Create an edge `from -> to`.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Index of a node in a [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root is always the first node pushed.
    pub const ROOT: Self = Self(0);

    /// Position in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One branching decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode<T> {
    /// Lower bound of every tour below this node.
    pub cost: T,
    /// Edge decided at this node; `None` for the root.
    pub edge: Option<Edge>,
    /// `true` if `edge` is forbidden below this node, `false` if forced.
    pub excluded: bool,
    /// Parent node; `None` for the root.
    pub parent: Option<NodeId>,
}

impl<T> SearchNode<T> {
    /// The root node holding the initial reduction bound.
    pub const fn root(cost: T) -> Self {
        Self {
            cost,
            edge: None,
            excluded: false,
            parent: None,
        }
    }

    /// Node forbidding `edge`.
    pub const fn excluding(cost: T, edge: Edge, parent: NodeId) -> Self {
        Self {
            cost,
            edge: Some(edge),
            excluded: true,
            parent: Some(parent),
        }
    }

    /// Node forcing `edge` into the tour.
    pub const fn including(cost: T, edge: Edge, parent: NodeId) -> Self {
        Self {
            cost,
            edge: Some(edge),
            excluded: false,
            parent: Some(parent),
        }
    }

    /// The edge this node forces into the tour, if any.
    pub fn included_edge(&self) -> Option<Edge> {
        match self.edge {
            Some(edge) if !self.excluded => Some(edge),
            _ => None,
        }
    }
}

/// Arena of search nodes.
#[derive(Debug, Clone, Default)]
pub struct SearchTree<T> {
    nodes: Vec<SearchNode<T>>,
}

impl<T> SearchTree<T> {
    /// Empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a node and return its id.
    pub fn push(&mut self, node: SearchNode<T>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Look a node up.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SearchNode<T>> {
        self.nodes.get(id.0)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node was pushed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<T>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Nodes from `id` up to and including the root.
    pub fn ancestry(&self, id: NodeId) -> Ancestry<'_, T> {
        Ancestry {
            tree: self,
            next: Some(id),
        }
    }

    /// Edges forced into the tour along the branch ending at `id`.
    ///
    /// Listed from `id` towards the root.
    #[must_use]
    pub fn included_edges(&self, id: NodeId) -> Vec<Edge> {
        self.ancestry(id)
            .filter_map(|(_, node)| node.included_edge())
            .collect()
    }
}

/// Iterator over a node and its ancestors.
#[derive(Debug)]
pub struct Ancestry<'a, T> {
    tree: &'a SearchTree<T>,
    next: Option<NodeId>,
}

impl<'a, T> Iterator for Ancestry<'a, T> {
    type Item = (NodeId, &'a SearchNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.get(id)?;
        self.next = node.parent;
        Some((id, node))
    }
}
