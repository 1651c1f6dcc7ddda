//! Breadth-first search.

use std::collections::{HashSet, VecDeque};

use log::{debug, warn};

use super::node::SearchTree;
use super::outcome::{Outcome, SearchResult};
use super::stats::SearchStats;
use super::{Budget, Problem, PROGRESS_INTERVAL};

/// Breadth-first search with generation-time duplicate detection.
///
/// A successor is marked visited and goal-tested as soon as it is generated,
/// and the search returns on the first goal it generates. Under unit step
/// cost that goal lies on a shortest path.
pub fn bfs<P: Problem>(problem: &P, initial: P::State, budget: &Budget) -> SearchResult<P::State> {
    let clock = budget.start();
    let mut stats = SearchStats::default();

    if problem.is_goal(&initial) {
        return SearchResult::at_root(initial, 0, stats, &clock);
    }

    let mut tree = SearchTree::new();
    let mut visited = HashSet::from([initial.clone()]);
    let mut frontier = VecDeque::from([tree.insert_root(initial, 0)]);
    stats.observe_frontier(frontier.len());

    while let Some(current) = frontier.pop_front() {
        if clock.exceeded(stats.nodes_generated) {
            warn!("BFS budget exceeded after {} nodes", stats.nodes_generated);
            stats.visited_states = visited.len();
            return SearchResult::unsolved(Outcome::BudgetExceeded, None, stats, &clock);
        }

        stats.nodes_explored += 1;
        if stats.nodes_explored % PROGRESS_INTERVAL == 0 {
            debug!(
                "BFS explored {}, frontier {}, depth {}",
                stats.nodes_explored,
                frontier.len(),
                tree[current].g
            );
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
                return SearchResult::found(&tree, child, stats, &clock);
            }
            frontier.push_back(child);
        }
        stats.observe_frontier(frontier.len());
    }

    stats.visited_states = visited.len();
    SearchResult::unsolved(Outcome::Exhausted, None, stats, &clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::GraphProblem;

    #[test]
    fn test_finds_shortest_path() {
        // 0 -> 1 -> 2 -> 3 (goal) and a shortcut 0 -> 4 -> 3
        let problem = GraphProblem::new(&[(0, 1), (1, 2), (2, 3), (0, 4), (4, 3)], &[], &[3]);
        let result = bfs(&problem, 0, &Budget::unlimited());

        assert!(result.is_found());
        assert_eq!(result.path, Some(vec![0, 4, 3]));
        assert_eq!(result.stats.path_length, Some(3));
        assert_eq!(result.goal.map(|node| node.g), Some(2));
    }

    #[test]
    fn test_cycles_do_not_loop_forever() {
        let problem = GraphProblem::new(&[(0, 1), (1, 0), (1, 2), (2, 0)], &[], &[]);
        let result = bfs(&problem, 0, &Budget::unlimited());

        assert_eq!(result.outcome, Outcome::Exhausted);
        assert!(result.path.is_none());
        assert_eq!(result.stats.visited_states, 3);
        assert_eq!(result.stats.nodes_generated, 2);
    }

    #[test]
    fn test_duplicates_are_not_enqueued() {
        // 3 is reachable through both 1 and 2; it should be generated once
        let problem = GraphProblem::new(&[(0, 1), (0, 2), (1, 3), (2, 3)], &[], &[]);
        let result = bfs(&problem, 0, &Budget::unlimited());

        assert_eq!(result.stats.nodes_generated, 3);
        assert_eq!(result.stats.nodes_explored, 4);
    }

    #[test]
    fn test_budget_stops_the_run() {
        let problem = GraphProblem::chain(100);
        let result = bfs(&problem, 0, &Budget::unlimited().with_max_nodes(5));

        assert!(result.outcome.is_budget_exceeded());
        assert_eq!(result.stats.nodes_generated, 5);
    }
}
