//! Colored endpoint routing on a wrap-around board.
//!
//! Each color has two endpoints. A move advances one unfinished color's head
//! by one cell, and the board is solved when every route is finished and no
//! cell is left empty.

mod board;

use serde::Serialize;

pub use board::{Color, FlowBoard, Position, Route};

use crate::search::Problem;

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
pub enum FlowHeuristic {
    /// Sum of wrapped head-to-goal distances over unfinished routes
    Distance,
    /// Cells still to fill
    EmptyCells,
    /// The larger of the two
    #[default]
    Combined,
}

impl FlowHeuristic {
    pub fn evaluate(self, board: &FlowBoard) -> u32 {
        match self {
            FlowHeuristic::Distance => head_distance(board),
            FlowHeuristic::EmptyCells => empty_cells(board),
            FlowHeuristic::Combined => head_distance(board).max(empty_cells(board)),
        }
    }
}

/// Each move shortens at most one route by one cell.
pub fn head_distance(board: &FlowBoard) -> u32 {
    board
        .routes()
        .iter()
        .filter(|route| !route.finished)
        .map(|route| board.distance(route.head, route.goal) as u32)
        .sum()
}

/// Each move fills at most one cell.
pub fn empty_cells(board: &FlowBoard) -> u32 {
    board.empty_cells() as u32
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlowProblem {
    pub heuristic: FlowHeuristic,
}

impl Problem for FlowProblem {
    type State = FlowBoard;

    fn is_goal(&self, board: &FlowBoard) -> bool {
        board.is_complete()
    }

    fn successors(&self, board: &FlowBoard) -> Vec<FlowBoard> {
        board.moves()
    }

    fn heuristic(&self, board: &FlowBoard) -> u32 {
        self.heuristic.evaluate(board)
    }
}
