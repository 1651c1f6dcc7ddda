//! Square pipe grid with toroidal adjacency.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use itertools::{iproduct, Itertools};
use strum::VariantArray;

use super::tile::{Direction, Tile};
use crate::error::{puzzle_rows, ParseError};

/// An N×N grid of tiles whose edges wrap around on both axes.
///
/// Grids are immutable: a move yields a new grid that differs from its
/// parent in exactly one tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipeGrid {
    size: usize,
    tiles: Box<[Tile]>,
}

impl PipeGrid {
    /// Build a grid from row-major tiles. `tiles.len()` must be a perfect
    /// square.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<PipeGrid, ParseError> {
        if tiles.is_empty() {
            return Err(ParseError::Empty);
        }
        let size = (1..=tiles.len())
            .take_while(|side| side * side <= tiles.len())
            .last()
            .unwrap_or(1);
        if size * size != tiles.len() {
            return Err(ParseError::CellCount {
                expected: size * size,
                found: tiles.len(),
            });
        }
        Ok(PipeGrid {
            size,
            tiles: tiles.into_boxed_slice(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.tiles[row * self.size + col]
    }

    /// Every (row, column) in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        iproduct!(0..self.size, 0..self.size)
    }

    /// Neighbor of (row, col) on side `direction`, wrapping at the edges.
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> (usize, usize) {
        let (dr, dc) = direction.delta();
        let n = self.size as isize;
        (
            (row as isize + dr).rem_euclid(n) as usize,
            (col as isize + dc).rem_euclid(n) as usize,
        )
    }

    /// Whether the pipe leaving (row, col) through `direction` meets a pipe
    /// coming back from the neighbor on that side.
    pub fn is_satisfied(&self, row: usize, col: usize, direction: Direction) -> bool {
        if !self.tile(row, col).connections().contains(direction) {
            return false;
        }
        let (nr, nc) = self.neighbor(row, col, direction);
        self.tile(nr, nc)
            .connections()
            .contains(direction.opposite())
    }

    /// Connections of the tile at (row, col) that lead nowhere.
    pub fn open_ends_at(&self, row: usize, col: usize) -> usize {
        self.tile(row, col)
            .connections()
            .iter()
            .filter(|&direction| !self.is_satisfied(row, col, direction))
            .count()
    }

    pub fn count_open_ends(&self) -> usize {
        self.positions()
            .map(|(row, col)| self.open_ends_at(row, col))
            .sum()
    }

    pub fn is_solved(&self) -> bool {
        self.positions()
            .all(|(row, col)| self.open_ends_at(row, col) == 0)
    }

    /// A copy of this grid with the tile at (row, col) turned one quarter
    /// clockwise.
    pub fn with_rotated(&self, row: usize, col: usize) -> PipeGrid {
        let mut tiles = self.tiles.clone();
        let index = row * self.size + col;
        tiles[index] = tiles[index].rotate(1);
        PipeGrid {
            size: self.size,
            tiles,
        }
    }

    /// Cells whose rotation can change the number of open ends: every tile
    /// with an open end, plus each non-empty neighbor of such a tile.
    ///
    /// Cells are returned in row-major order and may include crosses, which
    /// the caller skips when generating moves.
    pub fn rotation_candidates(&self) -> BTreeSet<(usize, usize)> {
        let mut candidates = BTreeSet::new();
        for (row, col) in self.positions() {
            if self.open_ends_at(row, col) == 0 {
                continue;
            }
            candidates.insert((row, col));
            for direction in Direction::VARIANTS.iter().copied() {
                let (nr, nc) = self.neighbor(row, col, direction);
                if !self.tile(nr, nc).is_empty() {
                    candidates.insert((nr, nc));
                }
            }
        }
        candidates
    }

    /// The grid in its input alphabet, rows joined by `/`.
    pub fn to_compact_string(&self) -> String {
        self.tiles
            .chunks(self.size)
            .map(|row| row.iter().map(|tile| tile.to_char()).collect::<String>())
            .join("/")
    }
}

impl FromStr for PipeGrid {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<PipeGrid, ParseError> {
        let rows = puzzle_rows(text);
        if rows.is_empty() {
            return Err(ParseError::Empty);
        }

        let size = rows.len();
        let mut tiles = Vec::with_capacity(size * size);
        for (line, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().collect();
            if cells.len() != size {
                return Err(ParseError::ColumnCount {
                    line: line + 1,
                    expected: size,
                    found: cells.len(),
                });
            }
            for (column, &ch) in cells.iter().enumerate() {
                let tile = Tile::from_char(ch).ok_or(ParseError::UnknownCharacter {
                    ch,
                    line: line + 1,
                    column: column + 1,
                })?;
                tiles.push(tile);
            }
        }

        Ok(PipeGrid {
            size,
            tiles: tiles.into_boxed_slice(),
        })
    }
}

impl fmt::Display for PipeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.tiles.chunks(self.size).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{}", tile.glyph())?;
            }
        }
        Ok(())
    }
}
