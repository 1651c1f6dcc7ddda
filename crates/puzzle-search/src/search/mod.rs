//! Generic state-space search.
//!
//! A puzzle plugs into the engine by implementing [`Problem`]: a goal test,
//! a successor function, and a heuristic. The algorithms never look inside a
//! state beyond equality and hashing, which is what the visited sets key on.
//!
//! All algorithms are synchronous and single-threaded. A run owns its node
//! arena and its frontier/visited collections outright and returns once it
//! finds a goal, runs out of states, gets stuck, or exceeds its [`Budget`].

mod astar;
mod bfs;
mod budget;
mod dfs;
mod hill_climb;
mod node;
mod outcome;
mod stats;

#[cfg(test)]
pub(crate) mod testing;

use std::hash::Hash;

use serde::Serialize;

pub use astar::astar;
pub use bfs::bfs;
pub use budget::Budget;
pub use dfs::dfs;
pub use hill_climb::hill_climbing;
pub use node::{Node, NodeId, SearchTree};
pub use outcome::{Outcome, SearchResult, StuckReason};
pub use stats::SearchStats;

/// Explored-node interval between progress log lines
pub(crate) const PROGRESS_INTERVAL: usize = 10_000;

/// DFS depth bound used when the caller does not pick one
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Hill-climbing iteration cap used when the caller does not pick one
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// A search space the algorithms can explore.
pub trait Problem {
    type State: Clone + Eq + Hash;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// States one step away from `state`.
    ///
    /// An empty list means `state` is a dead end.
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    /// Non-negative estimate of the steps left to a goal.
    fn heuristic(&self, state: &Self::State) -> u32;
}

/// What A* does when it finds a cheaper path to a state it has already seen.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReopenPolicy {
    /// A state marked visited when first generated is never pushed again.
    Never,
    /// A frontier state is pushed again when a strictly cheaper path shows
    /// up. Expanded states are never reopened.
    #[default]
    IfCheaper,
}

/// An algorithm together with its tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "name")]
pub enum Algorithm {
    Bfs,
    Dfs {
        #[serde(rename = "maxDepth")]
        max_depth: usize,
    },
    AStar { reopen: ReopenPolicy },
    HillClimbing {
        #[serde(rename = "maxIterations")]
        max_iterations: usize,
    },
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs { .. } => "DFS",
            Algorithm::AStar { .. } => "A*",
            Algorithm::HillClimbing { .. } => "Hill Climbing",
        }
    }

    /// Whether the algorithm ignores the heuristic.
    pub fn is_blind(&self) -> bool {
        matches!(self, Algorithm::Bfs | Algorithm::Dfs { .. })
    }
}

/// Run `algorithm` on `problem` starting from `initial`.
pub fn solve<P: Problem>(
    problem: &P,
    initial: P::State,
    algorithm: Algorithm,
    budget: &Budget,
) -> SearchResult<P::State> {
    log::debug!("starting {} search", algorithm.name());
    match algorithm {
        Algorithm::Bfs => bfs(problem, initial, budget),
        Algorithm::Dfs { max_depth } => dfs(problem, initial, max_depth, budget),
        Algorithm::AStar { reopen } => astar(problem, initial, reopen, budget),
        Algorithm::HillClimbing { max_iterations } => {
            hill_climbing(problem, initial, max_iterations, budget)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::GraphProblem;
    use super::*;

    fn all_algorithms() -> [Algorithm; 4] {
        [
            Algorithm::Bfs,
            Algorithm::Dfs {
                max_depth: DEFAULT_MAX_DEPTH,
            },
            Algorithm::AStar {
                reopen: ReopenPolicy::IfCheaper,
            },
            Algorithm::HillClimbing {
                max_iterations: DEFAULT_MAX_ITERATIONS,
            },
        ]
    }

    #[test]
    fn test_goal_at_root_for_every_algorithm() {
        let problem = GraphProblem::new(&[(0, 1)], &[(0, 0), (1, 0)], &[0]);
        for algorithm in all_algorithms() {
            let result = solve(&problem, 0, algorithm, &Budget::unlimited());
            assert!(result.is_found(), "{}", algorithm.name());
            assert_eq!(result.path, Some(vec![0]), "{}", algorithm.name());
            assert_eq!(result.stats.nodes_generated, 0, "{}", algorithm.name());
            assert_eq!(result.stats.path_length, Some(1), "{}", algorithm.name());
        }
    }

    #[test]
    fn test_reopen_policy_parses_kebab_case() {
        assert_eq!("never".parse::<ReopenPolicy>().unwrap(), ReopenPolicy::Never);
        assert_eq!(
            "if-cheaper".parse::<ReopenPolicy>().unwrap(),
            ReopenPolicy::IfCheaper
        );
        assert_eq!(ReopenPolicy::IfCheaper.to_string(), "if-cheaper");
    }

    #[test]
    fn test_only_bfs_and_dfs_are_blind() {
        let [bfs, dfs, astar, hill] = all_algorithms();
        assert!(bfs.is_blind());
        assert!(dfs.is_blind());
        assert!(!astar.is_blind());
        assert!(!hill.is_blind());
    }
}
