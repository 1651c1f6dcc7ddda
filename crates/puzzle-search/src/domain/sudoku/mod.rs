//! Sudoku as a search space: each step writes one legal digit.

mod board;

use serde::Serialize;

pub use board::{Board, DigitSet, CELLS, SIDE};

use crate::search::Problem;

/// How the next cell to fill is chosen.
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
pub enum CellOrder {
    /// First empty cell in row-major order.
    #[default]
    FirstEmpty,
    /// Empty cell with the fewest remaining candidates.
    Mrv,
}

impl CellOrder {
    pub fn select(self, board: &Board) -> Option<usize> {
        match self {
            CellOrder::FirstEmpty => board.first_empty(),
            CellOrder::Mrv => board.most_constrained(),
        }
    }
}

/// One board per legal digit for the selected cell, in ascending digit
/// order. Empty for a full board and for a cell with no legal digit.
pub fn successors(board: &Board, order: CellOrder) -> Vec<Board> {
    let Some(index) = order.select(board) else {
        return Vec::new();
    };
    board
        .candidates(index)
        .iter()
        .map(|digit| board.with_digit(index, digit))
        .collect()
}

/// Remaining empty cells: exactly the number of steps left on any path to
/// a goal.
pub fn empty_cells(board: &Board) -> u32 {
    board.empty_count() as u32
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SudokuProblem {
    pub cell_order: CellOrder,
}

impl Problem for SudokuProblem {
    type State = Board;

    /// Givens are checked at parse time and successors only write legal
    /// digits, so a full board is a solved one.
    fn is_goal(&self, board: &Board) -> bool {
        board.is_full()
    }

    fn successors(&self, board: &Board) -> Vec<Board> {
        successors(board, self.cell_order)
    }

    fn heuristic(&self, board: &Board) -> u32 {
        empty_cells(board)
    }
}
