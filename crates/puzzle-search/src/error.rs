//! Errors raised while turning puzzle text into an initial search state.
//!
//! Search itself never fails: running out of states, getting stuck, or
//! hitting a budget are all ordinary [`Outcome`](crate::search::Outcome)s.

/// A malformed puzzle description.
///
/// Line and column numbers are 1-based so they can be shown to a user as-is.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    #[display("puzzle text is empty")]
    Empty,
    #[display("line {line} has {found} cells, expected {expected}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[display("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },
    #[display("unknown character {ch:?} at line {line}, column {column}")]
    UnknownCharacter { ch: char, line: usize, column: usize },
    #[display("digit {digit} at line {line}, column {column} conflicts with another given")]
    ConflictingGiven {
        digit: u8,
        line: usize,
        column: usize,
    },
    #[display("color {color} appears {count} times, expected exactly 2")]
    UnpairedColor { color: char, count: usize },
}

/// Anything that stops a puzzle run before search starts.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum RunError {
    #[display("invalid puzzle: {_0}")]
    Parse(ParseError),
    #[display("unknown {domain} heuristic {name:?} (expected one of: {expected})")]
    #[from(ignore)]
    UnknownHeuristic {
        domain: &'static str,
        name: String,
        expected: &'static str,
    },
}

/// Splits puzzle text into rows.
///
/// Rows may be separated by newlines or by `/`, so a small grid can be
/// written on one line (`"L-7/|.|/r-J"`). Only line endings are stripped:
/// spaces are cells in some alphabets. Blank rows before the first and
/// after the last non-blank row are dropped; blank rows in between are kept.
pub(crate) fn puzzle_rows(text: &str) -> Vec<&str> {
    let rows: Vec<&str> = text
        .trim_start_matches('\u{feff}')
        .split(['\n', '/'])
        .map(|row| row.strip_suffix('\r').unwrap_or(row))
        .collect();
    match (
        rows.iter().position(|row| !row.is_empty()),
        rows.iter().rposition(|row| !row.is_empty()),
    ) {
        (Some(first), Some(last)) => rows[first..=last].to_vec(),
        _ => Vec::new(),
    }
}
