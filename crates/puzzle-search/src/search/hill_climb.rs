//! Steepest-ascent hill-climbing.

use std::collections::HashSet;

use log::{debug, warn};

use super::budget::BudgetClock;
use super::node::{NodeId, SearchTree};
use super::outcome::{Outcome, SearchResult, StuckReason};
use super::stats::SearchStats;
use super::{Budget, Problem};

/// Greedy local search over unvisited successors.
///
/// Each iteration scores every unvisited successor of the current state and
/// moves to the one with the lowest heuristic, but only when it is strictly
/// better than the current state. Ties go to the first successor generated.
/// Neither complete nor optimal: a failed run reports *why* it stopped via
/// [`Outcome::Stuck`], along with the path climbed so far.
pub fn hill_climbing<P: Problem>(
    problem: &P,
    initial: P::State,
    max_iterations: usize,
    budget: &Budget,
) -> SearchResult<P::State> {
    let clock = budget.start();
    let mut stats = SearchStats {
        iterations: Some(0),
        ..Default::default()
    };
    let initial_h = problem.heuristic(&initial);

    if problem.is_goal(&initial) {
        return SearchResult::at_root(initial, initial_h, stats, &clock);
    }

    let mut tree = SearchTree::new();
    let mut visited = HashSet::from([initial.clone()]);
    let mut current = tree.insert_root(initial, initial_h);

    for iteration in 0..max_iterations {
        if clock.exceeded(stats.nodes_generated) {
            warn!("hill-climbing budget exceeded at iteration {iteration}");
            stats.iterations = Some(iteration);
            stats.visited_states = visited.len();
            let path = tree.path(current);
            return SearchResult::unsolved(Outcome::BudgetExceeded, Some(path), stats, &clock);
        }

        stats.nodes_explored += 1;
        let candidates: Vec<P::State> = problem
            .successors(&tree[current].state)
            .into_iter()
            .filter(|successor| !visited.contains(successor))
            .collect();
        stats.observe_frontier(candidates.len());

        let mut scored = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            stats.nodes_generated += 1;
            let h = problem.heuristic(&candidate);

            if problem.is_goal(&candidate) {
                let goal = tree.insert_child(current, candidate.clone(), h);
                visited.insert(candidate);
                stats.iterations = Some(iteration + 1);
                stats.visited_states = visited.len();
                return SearchResult::found(&tree, goal, stats, &clock);
            }
            scored.push((h, candidate));
        }

        // min_by_key keeps the first of several equal minima
        let Some((best_h, next)) = scored.into_iter().min_by_key(|(h, _)| *h) else {
            return stuck(
                &tree,
                current,
                StuckReason::NoUnvisitedSuccessors,
                iteration,
                visited.len(),
                stats,
                &clock,
            );
        };

        let current_h = tree[current].h;
        if best_h >= current_h {
            return stuck(
                &tree,
                current,
                StuckReason::LocalMinimum {
                    current: current_h,
                    best: best_h,
                },
                iteration + 1,
                visited.len(),
                stats,
                &clock,
            );
        }

        debug!("hill-climbing step {iteration}: h {current_h} -> {best_h}");
        visited.insert(next.clone());
        current = tree.insert_child(current, next, best_h);
    }

    stuck(
        &tree,
        current,
        StuckReason::IterationLimit(max_iterations),
        max_iterations,
        visited.len(),
        stats,
        &clock,
    )
}

fn stuck<S: Clone>(
    tree: &SearchTree<S>,
    current: NodeId,
    reason: StuckReason,
    iterations: usize,
    visited: usize,
    mut stats: SearchStats,
    clock: &BudgetClock,
) -> SearchResult<S> {
    stats.iterations = Some(iterations);
    stats.visited_states = visited;
    SearchResult::unsolved(Outcome::Stuck(reason), Some(tree.path(current)), stats, clock)
}
