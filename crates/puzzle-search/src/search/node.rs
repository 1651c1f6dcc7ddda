//! Search nodes stored in an index-based arena.
//!
//! Nodes never own their parents. Each node records the [`NodeId`] of the
//! node it was generated from, and the [`SearchTree`] that owns every node of
//! one search run resolves those ids when a path is reconstructed.

use std::ops::Index;

/// Position of a node inside its [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One vertex of the search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<S> {
    pub state: S,
    /// `None` only for the root
    pub parent: Option<NodeId>,
    /// Steps from the root (unit step cost)
    pub g: u32,
    /// Heuristic estimate of the remaining cost
    pub h: u32,
}

impl<S> Node<S> {
    pub fn root(state: S, h: u32) -> Self {
        Self {
            state,
            parent: None,
            g: 0,
            h,
        }
    }

    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Arena owning every node generated by a single search invocation.
#[derive(Debug, Clone)]
pub struct SearchTree<S> {
    nodes: Vec<Node<S>>,
}

impl<S> Default for SearchTree<S> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<S> SearchTree<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn insert_root(&mut self, state: S, h: u32) -> NodeId {
        self.push(Node::root(state, h))
    }

    /// Add a node one step below `parent`.
    pub fn insert_child(&mut self, parent: NodeId, state: S, h: u32) -> NodeId {
        let g = self[parent].g + 1;
        self.push(Node {
            state,
            parent: Some(parent),
            g,
            h,
        })
    }

    fn push(&mut self, node: Node<S>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Ids from the root down to `id`, inclusive.
    pub fn lineage(&self, id: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self[id].g as usize + 1);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            ids.push(current);
            cursor = self[current].parent;
        }
        ids.reverse();
        ids
    }
}

impl<S: Clone> SearchTree<S> {
    /// States from the root down to `id`, inclusive.
    pub fn path(&self, id: NodeId) -> Vec<S> {
        self.lineage(id)
            .into_iter()
            .map(|step| self[step].state.clone())
            .collect()
    }
}

impl<S> Index<NodeId> for SearchTree<S> {
    type Output = Node<S>;

    fn index(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }
}
