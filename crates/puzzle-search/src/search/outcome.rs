//! How a search run ended and what it hands back.

use log::info;

use super::budget::BudgetClock;
use super::node::{Node, NodeId, SearchTree};
use super::stats::SearchStats;

/// Why hill-climbing stopped without reaching a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StuckReason {
    #[display("no unvisited successors")]
    NoUnvisitedSuccessors,
    #[display("local minimum (current h={current}, best successor h={best})")]
    LocalMinimum { current: u32, best: u32 },
    #[display("iteration limit of {_0} reached")]
    IterationLimit(usize),
}

/// Terminal status of a search run.
///
/// None of these is an error: "not found" is as ordinary a result as "found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Outcome {
    #[display("found")]
    Found,
    /// The reachable state space ran out without a goal
    #[display("exhausted")]
    Exhausted,
    /// Hill-climbing gave up
    #[display("stuck: {_0}")]
    Stuck(StuckReason),
    /// The caller's [`Budget`](super::Budget) ran out first
    #[display("budget exceeded")]
    BudgetExceeded,
}

impl Outcome {
    pub fn stuck_reason(self) -> Option<StuckReason> {
        match self {
            Outcome::Stuck(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Everything a search run returns.
#[derive(Debug, Clone)]
pub struct SearchResult<S> {
    pub outcome: Outcome,
    /// The goal node, when one was found
    pub goal: Option<Node<S>>,
    /// Root-to-goal states; for a stuck hill-climb, the states visited so far
    pub path: Option<Vec<S>>,
    pub stats: SearchStats,
}

impl<S: Clone> SearchResult<S> {
    /// The initial state already satisfies the goal test.
    pub(crate) fn at_root(initial: S, h: u32, mut stats: SearchStats, clock: &BudgetClock) -> Self {
        stats.max_frontier_size = stats.max_frontier_size.max(1);
        stats.visited_states = 1;
        stats.path_length = Some(1);
        stats.stamp(clock);
        Self {
            outcome: Outcome::Found,
            goal: Some(Node::root(initial.clone(), h)),
            path: Some(vec![initial]),
            stats,
        }
    }

    pub(crate) fn found(
        tree: &SearchTree<S>,
        goal: NodeId,
        mut stats: SearchStats,
        clock: &BudgetClock,
    ) -> Self {
        let path = tree.path(goal);
        stats.path_length = Some(path.len());
        stats.stamp(clock);
        info!(
            "goal found at depth {} after {} generated nodes",
            tree[goal].g, stats.nodes_generated
        );
        Self {
            outcome: Outcome::Found,
            goal: Some(tree[goal].clone()),
            path: Some(path),
            stats,
        }
    }

    pub(crate) fn unsolved(
        outcome: Outcome,
        path: Option<Vec<S>>,
        mut stats: SearchStats,
        clock: &BudgetClock,
    ) -> Self {
        stats.stamp(clock);
        info!(
            "search ended without a goal ({}) after {} generated nodes",
            outcome, stats.nodes_generated
        );
        Self {
            outcome,
            goal: None,
            path,
            stats,
        }
    }
}

impl<S> SearchResult<S> {
    pub fn is_found(&self) -> bool {
        self.outcome.is_found()
    }
}
