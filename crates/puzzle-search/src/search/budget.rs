//! Caller-supplied resource limits.
//!
//! The algorithms check a budget only between expansions, so a limit can cut
//! a run short but never changes the order in which states are explored.

use std::time::{Duration, Instant};

/// Resource limits for one search run. The default is unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Budget {
    /// Stop once this many nodes have been generated
    pub max_nodes: Option<usize>,
    /// Stop once this much wall-clock time has passed
    pub timeout: Option<Duration>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn start(&self) -> BudgetClock {
        let started = Instant::now();
        BudgetClock {
            started,
            deadline: self.timeout.map(|timeout| started + timeout),
            max_nodes: self.max_nodes,
        }
    }
}

/// A running budget, created when a search starts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BudgetClock {
    started: Instant,
    deadline: Option<Instant>,
    max_nodes: Option<usize>,
}

impl BudgetClock {
    pub(crate) fn exceeded(&self, nodes_generated: usize) -> bool {
        if self.max_nodes.is_some_and(|max| nodes_generated >= max) {
            return true;
        }
        self.deadline.is_some_and(|deadline| Instant::now() > deadline)
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
