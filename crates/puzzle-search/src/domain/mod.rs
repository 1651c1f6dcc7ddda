//! Puzzle domains that plug into [`crate::search`].

pub mod flow;
pub mod pipes;
pub mod sudoku;
