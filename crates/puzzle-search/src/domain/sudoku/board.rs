//! The 9×9 board and its candidate filter.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::error::{puzzle_rows, ParseError};

pub const SIDE: usize = 9;
pub const CELLS: usize = SIDE * SIDE;
const BOX: usize = 3;

/// Digits 1-9 as bits 1-9 of a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DigitSet(u16);

impl DigitSet {
    pub const ALL: DigitSet = DigitSet(0b11_1111_1110);

    pub fn contains(self, digit: u8) -> bool {
        self.0 & (1 << digit) != 0
    }

    pub fn insert(&mut self, digit: u8) {
        self.0 |= 1 << digit;
    }

    pub fn without(self, other: DigitSet) -> DigitSet {
        DigitSet(self.0 & !other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=9).filter(move |&digit| self.contains(digit))
    }
}

/// Indices of every cell sharing a row, column, or box with `index`,
/// `index` itself included.
fn peers(index: usize) -> impl Iterator<Item = usize> {
    let (row, col) = (index / SIDE, index % SIDE);
    let (box_row, box_col) = (row / BOX * BOX, col / BOX * BOX);
    let row_cells = (0..SIDE).map(move |c| row * SIDE + c);
    let col_cells = (0..SIDE).map(move |r| r * SIDE + col);
    let box_cells = (0..BOX * BOX).map(move |i| (box_row + i / BOX) * SIDE + box_col + i % BOX);
    row_cells.chain(col_cells).chain(box_cells)
}

/// 81 digits in row-major order, 0 for an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board([u8; CELLS]);

impl Board {
    /// A board from raw digits. Every given must be consistent with the
    /// others.
    pub fn from_digits(digits: [u8; CELLS]) -> Result<Board, ParseError> {
        let board = Board(digits);
        for (index, &digit) in digits.iter().enumerate() {
            if digit > 9 {
                return Err(ParseError::UnknownCharacter {
                    ch: char::from_digit(u32::from(digit), 36).unwrap_or('?'),
                    line: index / SIDE + 1,
                    column: index % SIDE + 1,
                });
            }
            if digit != 0 && board.clashes(index, digit) {
                return Err(ParseError::ConflictingGiven {
                    digit,
                    line: index / SIDE + 1,
                    column: index % SIDE + 1,
                });
            }
        }
        Ok(board)
    }

    pub fn digit(&self, index: usize) -> u8 {
        self.0[index]
    }

    pub fn digits(&self) -> &[u8; CELLS] {
        &self.0
    }

    pub fn empty_count(&self) -> usize {
        self.0.iter().filter(|&&digit| digit == 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Whether `digit` already appears among the peers of `index`, ignoring
    /// the cell itself.
    fn clashes(&self, index: usize, digit: u8) -> bool {
        peers(index).any(|peer| peer != index && self.0[peer] == digit)
    }

    /// Digits not yet used in the row, column, or box of `index`.
    pub fn candidates(&self, index: usize) -> DigitSet {
        let mut used = DigitSet::default();
        for peer in peers(index) {
            if self.0[peer] != 0 {
                used.insert(self.0[peer]);
            }
        }
        DigitSet::ALL.without(used)
    }

    /// No filled cell repeats a digit among its peers.
    pub fn is_consistent(&self) -> bool {
        (0..CELLS).all(|index| self.0[index] == 0 || !self.clashes(index, self.0[index]))
    }

    /// A copy with `digit` written at `index`.
    pub fn with_digit(&self, index: usize, digit: u8) -> Board {
        let mut digits = self.0;
        digits[index] = digit;
        Board(digits)
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.0.iter().position(|&digit| digit == 0)
    }

    /// The empty cell with the fewest candidates, earliest on ties. Stops
    /// scanning at a cell with one candidate or none.
    pub fn most_constrained(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for index in (0..CELLS).filter(|&index| self.0[index] == 0) {
            let count = self.candidates(index).len();
            if best.map_or(true, |(_, fewest)| count < fewest) {
                best = Some((index, count));
                if count <= 1 {
                    break;
                }
            }
        }
        best.map(|(index, _)| index)
    }

    /// Rows as digit strings, `.` for empty.
    pub fn rows(&self) -> Vec<String> {
        self.0
            .chunks(SIDE)
            .map(|row| row.iter().map(|&digit| cell_char(digit)).collect())
            .collect()
    }
}

fn cell_char(digit: u8) -> char {
    if digit == 0 {
        '.'
    } else {
        char::from(b'0' + digit)
    }
}

impl FromStr for Board {
    type Err = ParseError;

    /// Nine rows of nine cells, or 81 cells spread over any other number of
    /// rows. Spaces are ignored; `0`, `.` and `_` mark an empty cell.
    fn from_str(text: &str) -> Result<Board, ParseError> {
        // (line, column, char) with positions taken from the raw text
        let rows: Vec<Vec<(usize, usize, char)>> = puzzle_rows(text)
            .into_iter()
            .enumerate()
            .map(|(line, row)| {
                row.chars()
                    .enumerate()
                    .filter(|(_, ch)| !ch.is_whitespace())
                    .map(|(column, ch)| (line + 1, column + 1, ch))
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(ParseError::Empty);
        }

        let total: usize = rows.iter().map(Vec::len).sum();
        if total != CELLS {
            return Err(ParseError::CellCount {
                expected: CELLS,
                found: total,
            });
        }
        if rows.len() == SIDE {
            if let Some(row) = rows.iter().find(|row| row.len() != SIDE) {
                return Err(ParseError::ColumnCount {
                    line: row[0].0,
                    expected: SIDE,
                    found: row.len(),
                });
            }
        }

        let mut digits = [0u8; CELLS];
        for (index, &(line, column, ch)) in rows.iter().flatten().enumerate() {
            digits[index] = match ch {
                '0' | '.' | '_' => 0,
                '1'..='9' => ch as u8 - b'0',
                _ => return Err(ParseError::UnknownCharacter { ch, line, column }),
            };
        }
        Board::from_digits(digits)
    }
}

impl fmt::Display for Board {
    /// Grid with `|` between boxes and a rule between bands.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.0.chunks(SIDE).enumerate() {
            if row > 0 {
                writeln!(f)?;
                if row % BOX == 0 {
                    writeln!(f, "------+-------+------")?;
                }
            }
            let line = cells
                .chunks(BOX)
                .map(|band| band.iter().map(|&digit| cell_char(digit)).join(" "))
                .join(" | ");
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SOLVED: &str = "534678912/672195348/198342567/859761423/426853791/713924856/961537284/287419635/345286179";

    #[test]
    fn test_parse_rows_and_flat() {
        let rows: Board = SOLVED.parse().unwrap();
        let flat: Board = SOLVED.replace('/', "").parse().unwrap();
        assert_eq!(rows, flat);
        assert!(rows.is_full());
        assert!(rows.is_consistent());
    }

    #[test]
    fn test_empty_markers_and_spaces() {
        let text = format!("5 3 . _ 7 0 . . .\n{}", "000000000\n".repeat(8));
        let board: Board = text.parse().unwrap();
        assert_eq!(board.empty_count(), 78);
        assert_eq!(board.digit(0), 5);
        assert_eq!(board.digit(4), 7);
    }

    #[test]
    fn test_ragged_rows() {
        let text = format!("12345678\n1{}", "000000000\n".repeat(8));
        assert_eq!(
            text.parse::<Board>(),
            Err(ParseError::ColumnCount {
                line: 1,
                expected: 9,
                found: 8
            })
        );
    }

    #[test]
    fn test_any_row_count_totalling_81_cells() {
        let text = "0".repeat(27) + "\n" + &"0".repeat(27) + "\n" + &"0".repeat(27);
        let board: Board = text.parse().unwrap();
        assert_eq!(board.empty_count(), CELLS);

        let uneven = format!("53\n{}", &SOLVED.replace('/', "")[2..]);
        assert_eq!(uneven.parse::<Board>(), SOLVED.parse::<Board>());
    }

    #[test]
    fn test_unknown_character_position_counts_spaces() {
        let text = format!("5 3 x 0 0 0 0 0 0\n{}", "000000000\n".repeat(8));
        assert_eq!(
            text.parse::<Board>(),
            Err(ParseError::UnknownCharacter {
                ch: 'x',
                line: 1,
                column: 5
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Board>(), Err(ParseError::Empty));
        assert_eq!(
            "123".parse::<Board>(),
            Err(ParseError::CellCount {
                expected: 81,
                found: 3
            })
        );
        let bad = format!("x{}", "0".repeat(80));
        assert_eq!(
            bad.parse::<Board>(),
            Err(ParseError::UnknownCharacter {
                ch: 'x',
                line: 1,
                column: 1
            })
        );
        let clash = format!("55{}", "0".repeat(79));
        assert_eq!(
            clash.parse::<Board>(),
            Err(ParseError::ConflictingGiven {
                digit: 5,
                line: 1,
                column: 1
            })
        );
    }

    #[test]
    fn test_candidates_exclude_peers() {
        let board: Board = SOLVED.parse().unwrap();
        let blank = board.with_digit(0, 0).with_digit(40, 0);
        assert_eq!(blank.candidates(0).iter().collect::<Vec<_>>(), vec![5]);
        assert_eq!(blank.candidates(40).iter().collect::<Vec<_>>(), vec![5]);
        assert_eq!(Board([0; CELLS]).candidates(0), DigitSet::ALL);
    }

    #[test]
    fn test_cell_selection() {
        let board: Board = SOLVED.parse().unwrap();
        assert_eq!(board.first_empty(), None);
        assert_eq!(board.most_constrained(), None);

        let mut digits = [0; CELLS];
        digits[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let board = Board::from_digits(digits).unwrap();
        assert_eq!(board.first_empty(), Some(8));
        assert_eq!(board.most_constrained(), Some(8));
        assert_eq!(board.candidates(8).iter().collect::<Vec<_>>(), vec![9]);

        // all-empty board: every cell ties, so the first one wins
        assert_eq!(Board([0; CELLS]).most_constrained(), Some(0));
    }

    #[test]
    fn test_display_groups_boxes() {
        let board: Board = SOLVED.parse().unwrap();
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "5 3 4 | 6 7 8 | 9 1 2");
        assert_eq!(lines[3], "------+-------+------");
    }

    proptest! {
        #[test]
        fn test_candidates_never_clash(blanks in proptest::collection::vec(0usize..CELLS, 1..40)) {
            let mut board: Board = SOLVED.parse().unwrap();
            for index in blanks {
                board = board.with_digit(index, 0);
            }
            for index in (0..CELLS).filter(|&i| board.digit(i) == 0) {
                for digit in board.candidates(index).iter() {
                    prop_assert!(board.with_digit(index, digit).is_consistent());
                }
            }
        }
    }
}
