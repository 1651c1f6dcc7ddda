//! State-space search over small grid puzzles.
//!
//! The [`search`] module holds four generic algorithms (BFS, depth-limited
//! DFS, A*, and hill-climbing) written against the [`Problem`] trait. The
//! [`domain`] module provides three puzzles: a wrap-around pipe rotation
//! puzzle, Sudoku, and colored endpoint routing. [`adapter`] ties them
//! together for the command line.

pub mod adapter;
pub mod domain;
pub mod error;
pub mod search;

// Re-export main types
pub use adapter::{run, AlgorithmKind, Domain, DomainSettings, RunReport, SolveOptions};
pub use error::{ParseError, RunError};
pub use search::{
    astar, bfs, dfs, hill_climbing, solve, Algorithm, Budget, Outcome, Problem, ReopenPolicy,
    SearchResult, SearchStats, StuckReason,
};
