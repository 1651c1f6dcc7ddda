//! Pipe tiles and their rotation-adjusted connections.

use strum::VariantArray;

/// A side of a cell, in clockwise order starting from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, VariantArray)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn from_index(index: u8) -> Direction {
        Direction::VARIANTS[usize::from(index % 4)]
    }

    fn index(self) -> u8 {
        self as u8
    }

    pub fn opposite(self) -> Direction {
        self.rotated(2)
    }

    /// Turn clockwise by `quarter_turns` quarters.
    pub fn rotated(self, quarter_turns: u8) -> Direction {
        Direction::from_index(self.index() + quarter_turns % 4)
    }

    /// (row, column) offset of the neighbor on this side.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// A set of [`Direction`]s packed into the low four bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Connections(u8);

impl Connections {
    pub const NONE: Connections = Connections(0);

    pub const fn of(directions: &[Direction]) -> Connections {
        let mut bits = 0;
        let mut i = 0;
        while i < directions.len() {
            bits |= 1 << directions[i] as u8;
            i += 1;
        }
        Connections(bits)
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & (1 << direction.index()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Every member turned clockwise by `quarter_turns`.
    pub fn rotated(self, quarter_turns: u8) -> Connections {
        let k = quarter_turns % 4;
        Connections(((self.0 << k) | (self.0 >> (4 - k))) & 0b1111)
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::VARIANTS
            .iter()
            .copied()
            .filter(move |&direction| self.contains(direction))
    }
}

/// Number of clockwise quarter-turns, always in `0..4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rotation(u8);

impl Rotation {
    pub const ZERO: Rotation = Rotation(0);

    pub fn new(quarter_turns: u32) -> Rotation {
        Rotation((quarter_turns % 4) as u8)
    }

    pub fn quarter_turns(self) -> u8 {
        self.0
    }

    pub fn advanced(self, quarter_turns: u32) -> Rotation {
        Rotation::new(u32::from(self.0) + quarter_turns % 4)
    }
}

const STRAIGHT: Connections = Connections::of(&[Direction::Up, Direction::Down]);
const CORNER: Connections = Connections::of(&[Direction::Right, Direction::Down]);
const T_JUNCTION: Connections = Connections::of(&[Direction::Up, Direction::Right, Direction::Down]);
const CROSS: Connections = Connections::of(&[
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
]);

/// One cell of the pipe grid.
///
/// Tiles are plain values: rotating one produces a new tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    Straight(Rotation),
    Corner(Rotation),
    TJunction(Rotation),
    Cross(Rotation),
}

impl Tile {
    pub fn rotation(self) -> Rotation {
        match self {
            Tile::Empty => Rotation::ZERO,
            Tile::Straight(r) | Tile::Corner(r) | Tile::TJunction(r) | Tile::Cross(r) => r,
        }
    }

    /// Connections at rotation 0.
    fn base_connections(self) -> Connections {
        match self {
            Tile::Empty => Connections::NONE,
            Tile::Straight(_) => STRAIGHT,
            Tile::Corner(_) => CORNER,
            Tile::TJunction(_) => T_JUNCTION,
            Tile::Cross(_) => CROSS,
        }
    }

    pub fn connections(self) -> Connections {
        self.base_connections()
            .rotated(self.rotation().quarter_turns())
    }

    pub fn rotate(self, quarter_turns: u32) -> Tile {
        match self {
            Tile::Empty => Tile::Empty,
            Tile::Straight(r) => Tile::Straight(r.advanced(quarter_turns)),
            Tile::Corner(r) => Tile::Corner(r.advanced(quarter_turns)),
            Tile::TJunction(r) => Tile::TJunction(r.advanced(quarter_turns)),
            Tile::Cross(r) => Tile::Cross(r.advanced(quarter_turns)),
        }
    }

    /// Empty cells carry no pipe and a cross looks the same at every
    /// rotation, so neither is ever worth turning.
    pub fn is_rotatable(self) -> bool {
        !matches!(self, Tile::Empty | Tile::Cross(_))
    }

    pub fn is_empty(self) -> bool {
        self == Tile::Empty
    }

    pub fn from_char(ch: char) -> Option<Tile> {
        let r = Rotation::new;
        Some(match ch {
            '.' | ' ' => Tile::Empty,
            '|' => Tile::Straight(r(0)),
            '-' => Tile::Straight(r(1)),
            'L' => Tile::Corner(r(0)),
            '7' => Tile::Corner(r(1)),
            'J' => Tile::Corner(r(2)),
            'r' => Tile::Corner(r(3)),
            'T' => Tile::TJunction(r(0)),
            'F' => Tile::TJunction(r(1)),
            'H' => Tile::TJunction(r(2)),
            'E' => Tile::TJunction(r(3)),
            '+' => Tile::Cross(r(0)),
            _ => return None,
        })
    }

    /// Character in the input alphabet that draws the same connections.
    pub fn to_char(self) -> char {
        let turns = usize::from(self.rotation().quarter_turns());
        match self {
            Tile::Empty => '.',
            Tile::Straight(_) => ['|', '-'][turns % 2],
            Tile::Corner(_) => ['L', '7', 'J', 'r'][turns],
            Tile::TJunction(_) => ['T', 'F', 'H', 'E'][turns],
            Tile::Cross(_) => '+',
        }
    }

    /// Box-drawing glyph for display.
    pub fn glyph(self) -> char {
        let turns = usize::from(self.rotation().quarter_turns());
        match self {
            Tile::Empty => ' ',
            Tile::Straight(_) => ['│', '─'][turns % 2],
            Tile::Corner(_) => ['┌', '┐', '┘', '└'][turns],
            Tile::TJunction(_) => ['├', '┬', '┤', '┴'][turns],
            Tile::Cross(_) => '┼',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALPHABET: &str = ".|-L7JrTFHE+";

    fn any_tile() -> impl Strategy<Value = Tile> {
        proptest::sample::select(ALPHABET.chars().collect::<Vec<_>>())
            .prop_map(|ch| Tile::from_char(ch).unwrap())
    }

    #[test]
    fn test_opposites() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }

    #[test]
    fn test_connection_counts_per_shape() {
        assert_eq!(Tile::Empty.connections().len(), 0);
        assert_eq!(Tile::from_char('|').unwrap().connections().len(), 2);
        assert_eq!(Tile::from_char('L').unwrap().connections().len(), 2);
        assert_eq!(Tile::from_char('T').unwrap().connections().len(), 3);
        assert_eq!(Tile::from_char('+').unwrap().connections().len(), 4);
    }

    #[test]
    fn test_corner_letters_match_glyphs() {
        let corner = |ch| Tile::from_char(ch).unwrap().connections();
        use Direction::*;
        assert_eq!(corner('L'), Connections::of(&[Right, Down]));
        assert_eq!(corner('7'), Connections::of(&[Down, Left]));
        assert_eq!(corner('J'), Connections::of(&[Left, Up]));
        assert_eq!(corner('r'), Connections::of(&[Up, Right]));
    }

    #[test]
    fn test_rotating_a_straight_swaps_axis() {
        let vertical = Tile::from_char('|').unwrap();
        let horizontal = vertical.rotate(1);
        assert!(horizontal.connections().contains(Direction::Left));
        assert!(horizontal.connections().contains(Direction::Right));
        assert_eq!(horizontal.to_char(), '-');
        assert_eq!(horizontal.glyph(), '─');
    }

    #[test]
    fn test_unknown_character() {
        assert_eq!(Tile::from_char('x'), None);
    }

    #[test]
    fn test_only_real_pipes_rotate() {
        assert!(!Tile::Empty.is_rotatable());
        assert!(!Tile::from_char('+').unwrap().is_rotatable());
        assert!(Tile::from_char('F').unwrap().is_rotatable());
        assert_eq!(Tile::Empty.rotate(3), Tile::Empty);
    }

    proptest! {
        #[test]
        fn test_four_quarter_turns_is_identity(tile in any_tile()) {
            let turned = tile.rotate(1).rotate(1).rotate(1).rotate(1);
            prop_assert_eq!(turned, tile);
        }

        #[test]
        fn test_rotation_stays_normalized(tile in any_tile(), k in 0u32..100) {
            prop_assert!(tile.rotate(k).rotation().quarter_turns() < 4);
            prop_assert_eq!(tile.rotate(k), tile.rotate(k % 4));
        }

        #[test]
        fn test_connections_turn_with_the_tile(tile in any_tile(), k in 0u8..4) {
            let expected = tile.connections().rotated(k);
            prop_assert_eq!(tile.rotate(u32::from(k)).connections(), expected);
        }

        #[test]
        fn test_alphabet_round_trip(tile in any_tile()) {
            prop_assert_eq!(Tile::from_char(tile.to_char()), Some(tile));
        }
    }
}
