//! Depth-limited depth-first search.

use std::collections::HashSet;

use log::{debug, warn};

use super::node::SearchTree;
use super::outcome::{Outcome, SearchResult};
use super::stats::SearchStats;
use super::{Budget, Problem, PROGRESS_INTERVAL};

/// Depth-first search that never expands nodes at or below `max_depth`.
///
/// The frontier is a stack and each node's depth is its `g`. Nodes at
/// `max_depth` are popped but dropped without expansion, so the search is
/// incomplete by construction, and the first goal found is not necessarily
/// the closest one. Duplicates are filtered when generated, as in BFS.
pub fn dfs<P: Problem>(
    problem: &P,
    initial: P::State,
    max_depth: usize,
    budget: &Budget,
) -> SearchResult<P::State> {
    let clock = budget.start();
    let mut stats = SearchStats {
        max_depth_reached: Some(0),
        ..Default::default()
    };

    if problem.is_goal(&initial) {
        return SearchResult::at_root(initial, 0, stats, &clock);
    }

    let mut tree = SearchTree::new();
    let mut visited = HashSet::from([initial.clone()]);
    let mut frontier = vec![tree.insert_root(initial, 0)];
    let mut deepest = 0;
    stats.observe_frontier(frontier.len());

    while let Some(current) = frontier.pop() {
        if clock.exceeded(stats.nodes_generated) {
            warn!("DFS budget exceeded after {} nodes", stats.nodes_generated);
            stats.visited_states = visited.len();
            stats.max_depth_reached = Some(deepest);
            return SearchResult::unsolved(Outcome::BudgetExceeded, None, stats, &clock);
        }

        stats.nodes_explored += 1;
        let depth = tree[current].g as usize;
        deepest = deepest.max(depth);
        if stats.nodes_explored % PROGRESS_INTERVAL == 0 {
            debug!(
                "DFS explored {}, stack {}, depth {}",
                stats.nodes_explored,
                frontier.len(),
                depth
            );
        }

        if depth >= max_depth {
            continue;
        }

        let successors = problem.successors(&tree[current].state);
        for successor in successors {
            if visited.contains(&successor) {
                continue;
            }
            visited.insert(successor.clone());
            stats.nodes_generated += 1;

            let is_goal = problem.is_goal(&successor);
            let child = tree.insert_child(current, successor, 0);
            if is_goal {
                stats.visited_states = visited.len();
                stats.max_depth_reached = Some(deepest.max(depth + 1));
                return SearchResult::found(&tree, child, stats, &clock);
            }
            frontier.push(child);
        }
        stats.observe_frontier(frontier.len());
    }

    stats.visited_states = visited.len();
    stats.max_depth_reached = Some(deepest);
    SearchResult::unsolved(Outcome::Exhausted, None, stats, &clock)
}
