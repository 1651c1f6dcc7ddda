//! The wrap-around pipe rotation puzzle.
//!
//! Every move turns one tile a quarter clockwise. The puzzle is solved when
//! no pipe end is left open, with connections allowed across the grid's
//! edges.

mod grid;
mod tile;

use serde::Serialize;

pub use grid::PipeGrid;
pub use tile::{Connections, Direction, Rotation, Tile};

use crate::search::Problem;

/// Which tiles a move may turn.
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
pub enum SuccessorMode {
    /// Any pipe tile other than a cross.
    Exhaustive,
    /// Only tiles with an open end and their non-empty neighbors.
    #[default]
    Pruned,
}

/// Heuristic estimates for the pipe puzzle.
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
pub enum PipeHeuristic {
    /// Raw open-end count.
    OpenEnds,
    /// Open ends halved: closing one connection removes two open ends.
    #[default]
    HalfOpenEnds,
}

impl PipeHeuristic {
    pub fn evaluate(self, grid: &PipeGrid) -> u32 {
        match self {
            PipeHeuristic::OpenEnds => open_ends(grid),
            PipeHeuristic::HalfOpenEnds => half_open_ends(grid),
        }
    }
}

pub fn open_ends(grid: &PipeGrid) -> u32 {
    grid.count_open_ends() as u32
}

pub fn half_open_ends(grid: &PipeGrid) -> u32 {
    open_ends(grid) / 2
}

/// Grids reachable by one quarter-turn.
///
/// In [`SuccessorMode::Pruned`] an empty result means no tile touches an
/// open end, so no single turn can make progress.
pub fn successors(grid: &PipeGrid, mode: SuccessorMode) -> Vec<PipeGrid> {
    let turnable = |&(row, col): &(usize, usize)| grid.tile(row, col).is_rotatable();
    let turn = |(row, col): (usize, usize)| grid.with_rotated(row, col);

    match mode {
        SuccessorMode::Exhaustive => grid.positions().filter(turnable).map(turn).collect(),
        SuccessorMode::Pruned => grid
            .rotation_candidates()
            .into_iter()
            .filter(turnable)
            .map(turn)
            .collect(),
    }
}

/// The pipe puzzle as a search problem.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipesProblem {
    pub mode: SuccessorMode,
    pub heuristic: PipeHeuristic,
}

impl Problem for PipesProblem {
    type State = PipeGrid;

    fn is_goal(&self, grid: &PipeGrid) -> bool {
        grid.is_solved()
    }

    fn successors(&self, grid: &PipeGrid) -> Vec<PipeGrid> {
        successors(grid, self.mode)
    }

    fn heuristic(&self, grid: &PipeGrid) -> u32 {
        self.heuristic.evaluate(grid)
    }
}
