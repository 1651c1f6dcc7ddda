//! Small hand-built search spaces for exercising the algorithms.

use std::collections::{HashMap, HashSet};

use super::Problem;

/// A directed graph over integer states with a fixed heuristic table.
#[derive(Debug, Clone, Default)]
pub(crate) struct GraphProblem {
    edges: HashMap<u32, Vec<u32>>,
    heuristic: HashMap<u32, u32>,
    goals: HashSet<u32>,
}

impl GraphProblem {
    /// Edges are listed in successor order; states missing from `heuristic`
    /// get `h = 0`.
    pub(crate) fn new(edges: &[(u32, u32)], heuristic: &[(u32, u32)], goals: &[u32]) -> Self {
        let mut adjacency: HashMap<u32, Vec<u32>> = HashMap::new();
        for &(from, to) in edges {
            adjacency.entry(from).or_default().push(to);
        }
        Self {
            edges: adjacency,
            heuristic: heuristic.iter().copied().collect(),
            goals: goals.iter().copied().collect(),
        }
    }

    /// A chain `0 -> 1 -> ... -> len` with the goal at the far end.
    pub(crate) fn chain(len: u32) -> Self {
        let edges: Vec<_> = (0..len).map(|i| (i, i + 1)).collect();
        let heuristic: Vec<_> = (0..=len).map(|i| (i, len - i)).collect();
        Self::new(&edges, &heuristic, &[len])
    }
}

impl Problem for GraphProblem {
    type State = u32;

    fn is_goal(&self, state: &u32) -> bool {
        self.goals.contains(state)
    }

    fn successors(&self, state: &u32) -> Vec<u32> {
        self.edges.get(state).cloned().unwrap_or_default()
    }

    fn heuristic(&self, state: &u32) -> u32 {
        self.heuristic.get(state).copied().unwrap_or(0)
    }
}
