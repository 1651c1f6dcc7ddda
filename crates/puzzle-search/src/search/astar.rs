//! A* search.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::{debug, warn};

use super::node::{NodeId, SearchTree};
use super::outcome::{Outcome, SearchResult};
use super::stats::SearchStats;
use super::{Budget, Problem, ReopenPolicy, PROGRESS_INTERVAL};

/// A frontier entry. The heap pops the smallest `f`, then the smallest `h`
/// (the deepest node among equal `f`), then the earliest insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    f: u32,
    h: u32,
    seq: u64,
    node: NodeId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap behaves as a min-heap
        (other.f, other.h, other.seq).cmp(&(self.f, self.h, self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bookkeeping for states already seen, per [`ReopenPolicy`].
enum Seen<S> {
    /// Every state ever generated.
    Never { visited: HashSet<S> },
    /// Best known `g` for states still on the frontier, plus the set of
    /// expanded states.
    IfCheaper {
        open: HashMap<S, u32>,
        closed: HashSet<S>,
    },
}

impl<S: Clone + Eq + std::hash::Hash> Seen<S> {
    fn new(policy: ReopenPolicy, initial: &S) -> Self {
        match policy {
            ReopenPolicy::Never => Seen::Never {
                visited: HashSet::from([initial.clone()]),
            },
            ReopenPolicy::IfCheaper => Seen::IfCheaper {
                open: HashMap::from([(initial.clone(), 0)]),
                closed: HashSet::new(),
            },
        }
    }

    /// Called when `state` is popped with path cost `g`. Returns false for
    /// entries that were superseded or already expanded.
    fn begin_expansion(&mut self, state: &S, g: u32) -> bool {
        match self {
            Seen::Never { .. } => true,
            Seen::IfCheaper { open, closed } => {
                if closed.contains(state) {
                    return false;
                }
                if open.get(state).is_some_and(|&best| best < g) {
                    return false;
                }
                open.remove(state);
                closed.insert(state.clone());
                true
            }
        }
    }

    /// Whether a successor reached with path cost `g` should be pushed.
    /// Records it as seen when it should.
    fn admit(&mut self, state: &S, g: u32) -> bool {
        match self {
            Seen::Never { visited } => {
                if visited.contains(state) {
                    return false;
                }
                visited.insert(state.clone());
                true
            }
            Seen::IfCheaper { open, closed } => {
                if closed.contains(state) {
                    return false;
                }
                match open.entry(state.clone()) {
                    Entry::Occupied(mut known) => {
                        if g < *known.get() {
                            known.insert(g);
                            true
                        } else {
                            false
                        }
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(g);
                        true
                    }
                }
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Seen::Never { visited } => visited.len(),
            Seen::IfCheaper { open, closed } => open.len() + closed.len(),
        }
    }
}

/// A* with unit step cost, ordered by `f = g + h`.
///
/// The goal test runs when a node is popped, so with an admissible heuristic
/// under [`ReopenPolicy::IfCheaper`] the returned path is optimal.
/// [`ReopenPolicy::Never`] keeps the first path found to each state and can
/// return a longer path when that state is later reached more cheaply.
pub fn astar<P: Problem>(
    problem: &P,
    initial: P::State,
    reopen: ReopenPolicy,
    budget: &Budget,
) -> SearchResult<P::State> {
    let clock = budget.start();
    let mut stats = SearchStats::default();
    let root_h = problem.heuristic(&initial);

    if problem.is_goal(&initial) {
        stats.path_cost = Some(0);
        return SearchResult::at_root(initial, root_h, stats, &clock);
    }

    let mut seen = Seen::new(reopen, &initial);
    let mut tree = SearchTree::new();
    let mut frontier = BinaryHeap::new();
    let mut seq = 0;
    let root = tree.insert_root(initial, root_h);
    frontier.push(FrontierEntry {
        f: root_h,
        h: root_h,
        seq,
        node: root,
    });
    stats.observe_frontier(frontier.len());

    while let Some(entry) = frontier.pop() {
        if clock.exceeded(stats.nodes_generated) {
            warn!("A* budget exceeded after {} nodes", stats.nodes_generated);
            stats.visited_states = seen.len();
            return SearchResult::unsolved(Outcome::BudgetExceeded, None, stats, &clock);
        }

        let current = entry.node;
        let g = tree[current].g;
        if !seen.begin_expansion(&tree[current].state, g) {
            continue;
        }

        stats.nodes_explored += 1;
        if stats.nodes_explored % PROGRESS_INTERVAL == 0 {
            debug!(
                "A* explored {}, frontier {}, f={} h={}",
                stats.nodes_explored,
                frontier.len(),
                entry.f,
                entry.h
            );
        }

        if problem.is_goal(&tree[current].state) {
            stats.visited_states = seen.len();
            stats.path_cost = Some(g);
            return SearchResult::found(&tree, current, stats, &clock);
        }

        let successors = problem.successors(&tree[current].state);
        for successor in successors {
            if !seen.admit(&successor, g + 1) {
                continue;
            }
            stats.nodes_generated += 1;
            seq += 1;

            let h = problem.heuristic(&successor);
            let child = tree.insert_child(current, successor, h);
            frontier.push(FrontierEntry {
                f: g + 1 + h,
                h,
                seq,
                node: child,
            });
        }
        stats.observe_frontier(frontier.len());
    }

    stats.visited_states = seen.len();
    SearchResult::unsolved(Outcome::Exhausted, None, stats, &clock)
}
