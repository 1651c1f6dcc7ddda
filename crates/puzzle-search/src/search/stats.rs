//! Run statistics reported by every algorithm.

use serde::Serialize;

use super::budget::BudgetClock;

/// Counters collected during one search run.
///
/// The optional fields only apply to some algorithms and are left out of the
/// serialized form when absent; consumers should read a missing key as
/// "not applicable".
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Nodes created from an expansion (the root is not counted)
    pub nodes_generated: usize,
    /// Nodes taken off the frontier
    pub nodes_explored: usize,
    /// High-water mark of the frontier (or candidate list for hill-climbing)
    pub max_frontier_size: usize,
    /// Distinct states held in the visited/explored collections at the end
    pub visited_states: usize,
    /// Number of states on the returned solution path, root included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_length: Option<usize>,
    /// A*: g of the goal node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_cost: Option<u32>,
    /// DFS: deepest node taken off the frontier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth_reached: Option<usize>,
    /// Hill-climbing: improvement steps attempted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    pub elapsed_ms: u64,
}

impl SearchStats {
    pub(crate) fn observe_frontier(&mut self, size: usize) {
        self.max_frontier_size = self.max_frontier_size.max(size);
    }

    pub(crate) fn stamp(&mut self, clock: &BudgetClock) {
        self.elapsed_ms = clock.elapsed_ms();
    }
}
