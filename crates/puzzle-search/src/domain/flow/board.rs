//! Colored endpoint board on a torus.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use itertools::{iproduct, Itertools};
use smallvec::SmallVec;
use strum::VariantArray;

use crate::domain::pipes::Direction;
use crate::error::{puzzle_rows, ParseError};

pub type Position = (usize, usize);

/// A route color, written as an uppercase letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(u8);

impl Color {
    pub fn from_char(ch: char) -> Option<Color> {
        ch.is_ascii_uppercase().then(|| Color(ch as u8))
    }

    pub fn letter(self) -> char {
        char::from(self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One color's progress: the head advances from the first endpoint until
/// it steps onto the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub color: Color,
    pub head: Position,
    pub goal: Position,
    pub finished: bool,
}

/// Cells and routes of a square wrap-around board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlowBoard {
    size: usize,
    cells: Box<[Option<Color>]>,
    routes: SmallVec<[Route; 8]>,
}

impl FlowBoard {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, (row, col): Position) -> Option<Color> {
        self.cells[row * self.size + col]
    }

    /// Routes ordered by color letter.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.routes.iter().all(|route| route.finished) && self.empty_cells() == 0
    }

    pub fn neighbor(&self, (row, col): Position, direction: Direction) -> Position {
        let (dr, dc) = direction.delta();
        let n = self.size as isize;
        (
            (row as isize + dr).rem_euclid(n) as usize,
            (col as isize + dc).rem_euclid(n) as usize,
        )
    }

    /// Manhattan distance where each axis may go either way round.
    pub fn distance(&self, from: Position, to: Position) -> usize {
        let axis = |a: usize, b: usize| {
            let d = a.abs_diff(b);
            d.min(self.size - d)
        };
        axis(from.0, to.0) + axis(from.1, to.1)
    }

    /// Boards one head-step away, grouped by route then by direction.
    ///
    /// A head may enter an empty cell, filling it with its color, or its own
    /// goal, which finishes the route.
    pub fn moves(&self) -> Vec<FlowBoard> {
        let mut next = Vec::new();
        for (index, route) in self.routes.iter().enumerate() {
            if route.finished {
                continue;
            }
            for direction in Direction::VARIANTS.iter().copied() {
                let target = self.neighbor(route.head, direction);
                if target == route.goal {
                    next.push(self.advanced(index, target, true));
                } else if self.cell(target).is_none() {
                    next.push(self.advanced(index, target, false));
                }
            }
        }
        next
    }

    fn advanced(&self, route: usize, target: Position, finishes: bool) -> FlowBoard {
        let mut board = self.clone();
        let color = board.routes[route].color;
        board.cells[target.0 * self.size + target.1] = Some(color);
        board.routes[route].head = target;
        board.routes[route].finished = finishes;
        board
    }

    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|&cell| cell_char(cell)).collect())
            .collect()
    }
}

fn cell_char(cell: Option<Color>) -> char {
    cell.map_or('.', Color::letter)
}

impl FromStr for FlowBoard {
    type Err = ParseError;

    /// `.` or `0` for empty cells, `A`-`Z` for endpoints. Each letter must
    /// appear exactly twice; the first in row-major order starts the route.
    fn from_str(text: &str) -> Result<FlowBoard, ParseError> {
        let rows = puzzle_rows(text);
        if rows.is_empty() {
            return Err(ParseError::Empty);
        }

        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (line, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.chars().collect();
            if chars.len() != size {
                return Err(ParseError::ColumnCount {
                    line: line + 1,
                    expected: size,
                    found: chars.len(),
                });
            }
            for (column, &ch) in chars.iter().enumerate() {
                let cell = match ch {
                    '.' | '0' => None,
                    _ => Some(Color::from_char(ch).ok_or(ParseError::UnknownCharacter {
                        ch,
                        line: line + 1,
                        column: column + 1,
                    })?),
                };
                cells.push(cell);
            }
        }

        let mut endpoints: BTreeMap<Color, Vec<Position>> = BTreeMap::new();
        for ((row, col), cell) in iproduct!(0..size, 0..size).zip(&cells) {
            if let Some(color) = cell {
                endpoints.entry(*color).or_default().push((row, col));
            }
        }

        let mut routes = SmallVec::new();
        for (color, positions) in endpoints {
            let &[head, goal] = positions.as_slice() else {
                return Err(ParseError::UnpairedColor {
                    color: color.letter(),
                    count: positions.len(),
                });
            };
            routes.push(Route {
                color,
                head,
                goal,
                finished: false,
            });
        }

        Ok(FlowBoard {
            size,
            cells: cells.into_boxed_slice(),
            routes,
        })
    }
}

impl fmt::Display for FlowBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .cells
            .chunks(self.size)
            .map(|row| row.iter().map(|&cell| cell_char(cell)).join(" "))
            .join("\n");
        f.write_str(&text)
    }
}
