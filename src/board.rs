// Board layout: 9 columns (x 0-8) by 10 rows (y 0-9), origin top-left,
// x grows rightward and y grows downward. Cells hold raw piece codes.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};
use crate::rules::is_friend;

pub const BOARD_WIDTH: i32 = 9;
pub const BOARD_HEIGHT: i32 = 10;

/// Raw piece code: 0 empty, 1-7 red, 11-17 blue. `code % 10` is the role digit.
pub type PieceCode = i32;

/// An `(x, y)` coordinate pair.
pub type Square = (i32, i32);

pub type Grid = [[PieceCode; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

pub const EMPTY: PieceCode = 0;

// Starting position before any orientation flip: red on rows 0-3, blue on rows 6-9
const INITIAL_LAYOUT: Grid = [
    [1, 2, 3, 4, 5, 4, 3, 2, 1],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 6, 0, 0, 0, 0, 0, 6, 0],
    [7, 0, 7, 0, 7, 0, 7, 0, 7],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [17, 0, 17, 0, 17, 0, 17, 0, 17],
    [0, 16, 0, 0, 0, 0, 0, 16, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [11, 12, 13, 14, 15, 14, 13, 12, 11],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Side {
    Red = 0,
    Blue = 1,
}

impl Side {
    /// Side of a code, by the sign of `code - 10`. Code 10 has no side.
    pub fn of(code: PieceCode) -> Option<Side> {
        match code.cmp(&10) {
            std::cmp::Ordering::Less => Some(Side::Red),
            std::cmp::Ordering::Greater => Some(Side::Blue),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Request labels: `"red"` is red, anything else is blue.
    pub fn from_label(label: &str) -> Side {
        if label == "red" {
            Side::Red
        } else {
            Side::Blue
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Blue => "blue",
        }
    }

    pub fn is_red(self) -> bool {
        self == Side::Red
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Rook = 1,
    Horse = 2,
    Elephant = 3,
    Advisor = 4,
    General = 5,
    Cannon = 6,
    Soldier = 7,
}

impl PieceKind {
    /// Role of a code from its last digit. Digits 0, 8 and 9 have no role.
    pub fn from_code(code: PieceCode) -> Option<PieceKind> {
        match code.rem_euclid(10) {
            1 => Some(PieceKind::Rook),
            2 => Some(PieceKind::Horse),
            3 => Some(PieceKind::Elephant),
            4 => Some(PieceKind::Advisor),
            5 => Some(PieceKind::General),
            6 => Some(PieceKind::Cannon),
            7 => Some(PieceKind::Soldier),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub fn from_code(code: PieceCode) -> Option<Piece> {
        if code == EMPTY {
            return None;
        }
        Some(Piece {
            side: Side::of(code)?,
            kind: PieceKind::from_code(code)?,
        })
    }

    pub fn code(self) -> PieceCode {
        let base = match self.side {
            Side::Red => 0,
            Side::Blue => 10,
        };
        base + self.kind as PieceCode
    }

    pub fn glyph(self) -> char {
        match (self.side, self.kind) {
            (_, PieceKind::Rook) => '車',
            (_, PieceKind::Horse) => '马',
            (_, PieceKind::Cannon) => '炮',
            (Side::Red, PieceKind::Elephant) => '相',
            (Side::Red, PieceKind::Advisor) => '仕',
            (Side::Red, PieceKind::General) => '帅',
            (Side::Red, PieceKind::Soldier) => '兵',
            (Side::Blue, PieceKind::Elephant) => '象',
            (Side::Blue, PieceKind::Advisor) => '士',
            (Side::Blue, PieceKind::General) => '将',
            (Side::Blue, PieceKind::Soldier) => '卒',
        }
    }
}

/// A move as sent over the wire: `[sx, sy, tx, ty]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move(pub i32, pub i32, pub i32, pub i32);

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move(from.0, from.1, to.0, to.1)
    }

    pub fn to_sq(self) -> Square {
        (self.2, self.3)
    }
}

/// A full 9x10 grid. Always exactly this size; out-of-range squares are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    grid: Grid,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            grid: [[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
        }
    }

    /// Starting position. With `red_below` the row order is reversed so the
    /// red codes sit on the bottom rows; otherwise the layout is used as stored.
    pub fn initial_board(red_below: bool) -> Self {
        let mut grid = INITIAL_LAYOUT;
        if red_below {
            grid.reverse();
        }
        Self { grid }
    }

    /// Build from caller-supplied rows. Only the shape is checked.
    pub fn from_rows(rows: &[Vec<PieceCode>]) -> Result<Self> {
        if rows.len() != BOARD_HEIGHT as usize {
            return Err(RuleError::invalid_board(format!(
                "expected {} rows, got {}",
                BOARD_HEIGHT,
                rows.len()
            )));
        }
        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            if row.len() != BOARD_WIDTH as usize {
                return Err(RuleError::invalid_board(format!(
                    "row {} has {} columns, expected {}",
                    y,
                    row.len(),
                    BOARD_WIDTH
                )));
            }
            board.grid[y].copy_from_slice(row);
        }
        Ok(board)
    }

    pub fn rows(&self) -> Vec<Vec<PieceCode>> {
        self.grid.iter().map(|row| row.to_vec()).collect()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn in_bounds(x: i32, y: i32) -> bool {
        (0..BOARD_WIDTH).contains(&x) && (0..BOARD_HEIGHT).contains(&y)
    }

    /// Bounds-checked probe; `None` means the square is off the board.
    #[inline]
    pub fn try_get(&self, x: i32, y: i32) -> Option<PieceCode> {
        if Self::in_bounds(x, y) {
            Some(self.grid[y as usize][x as usize])
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Result<PieceCode> {
        self.try_get(x, y).ok_or(RuleError::OutOfBounds { x, y })
    }

    pub fn set(&mut self, x: i32, y: i32, code: PieceCode) -> Result<()> {
        if !Self::in_bounds(x, y) {
            return Err(RuleError::OutOfBounds { x, y });
        }
        self.grid[y as usize][x as usize] = code;
        Ok(())
    }

    /// Wholesale substitution of the grid. Piece codes are taken at face value.
    pub fn replace(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// Move a piece without consulting any movement rule. The target may be
    /// empty or hold an enemy piece, which is overwritten.
    pub fn step(&mut self, sx: i32, sy: i32, tx: i32, ty: i32) -> Result<()> {
        let src = self.get(sx, sy)?;
        let dst = self.get(tx, ty)?;
        if src == EMPTY {
            return Err(RuleError::EmptySquare { x: sx, y: sy });
        }
        if dst != EMPTY && is_friend(src, dst) {
            return Err(RuleError::FriendlyTarget { x: tx, y: ty });
        }
        self.grid[ty as usize][tx as usize] = src;
        self.grid[sy as usize][sx as usize] = EMPTY;
        Ok(())
    }

    /// Occupied squares in row-major order, with their raw codes.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, PieceCode)> + '_ {
        self.grid.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &code)| code != EMPTY)
                .map(move |(x, &code)| ((x as i32, y as i32), code))
        })
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.grid.iter() {
            for (x, &code) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                match Piece::from_code(code) {
                    Some(p) => write!(f, "{}", p.glyph())?,
                    None if code == EMPTY => write!(f, "．")?,
                    None => write!(f, "？")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_board_keeps_layout_when_not_reversed() {
        let board = Board::initial_board(false);
        assert_eq!(board.get(4, 0), Ok(5));
        assert_eq!(board.get(4, 9), Ok(15));
        assert_eq!(board.get(1, 2), Ok(6));
        assert_eq!(board.get(8, 6), Ok(17));
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn initial_board_reverses_rows_for_red_below() {
        let board = Board::initial_board(true);
        assert_eq!(board.get(0, 9), Ok(1));
        assert_eq!(board.get(4, 9), Ok(5));
        assert_eq!(board.get(7, 2), Ok(16));
        assert_eq!(board.get(4, 0), Ok(15));
        assert_eq!(board.get(2, 6), Ok(7));
    }

    #[test]
    fn get_reports_out_of_bounds() {
        let board = Board::initial_board(false);
        assert_eq!(board.get(-1, 0), Err(RuleError::OutOfBounds { x: -1, y: 0 }));
        assert_eq!(board.get(0, -1), Err(RuleError::OutOfBounds { x: 0, y: -1 }));
        assert_eq!(board.get(9, 0), Err(RuleError::OutOfBounds { x: 9, y: 0 }));
        assert_eq!(board.get(0, 10), Err(RuleError::OutOfBounds { x: 0, y: 10 }));
        assert_eq!(board.get(8, 9), Ok(11));
        assert_eq!(board.try_get(8, 10), None);
    }

    #[test]
    fn from_rows_checks_shape() {
        let rows = Board::initial_board(true).rows();
        assert_eq!(Board::from_rows(&rows), Ok(Board::initial_board(true)));

        let short = rows[..9].to_vec();
        assert!(matches!(Board::from_rows(&short), Err(RuleError::InvalidBoard(_))));

        let mut ragged = rows.clone();
        ragged[3].push(0);
        assert!(matches!(Board::from_rows(&ragged), Err(RuleError::InvalidBoard(_))));
    }

    #[test]
    fn step_moves_and_captures() {
        let mut board = Board::initial_board(false);
        // cannon takes the horse behind the screen, no rule check involved
        board.step(1, 7, 1, 0).unwrap();
        assert_eq!(board.get(1, 0), Ok(16));
        assert_eq!(board.get(1, 7), Ok(EMPTY));
        assert_eq!(board.occupied().count(), 31);
    }

    #[test]
    fn step_rejects_bad_requests() {
        let mut board = Board::initial_board(false);
        assert_eq!(board.step(4, 4, 4, 5), Err(RuleError::EmptySquare { x: 4, y: 4 }));
        assert_eq!(board.step(0, 9, 1, 9), Err(RuleError::FriendlyTarget { x: 1, y: 9 }));
        assert_eq!(board.step(0, 9, -1, 9), Err(RuleError::OutOfBounds { x: -1, y: 9 }));
        assert_eq!(board, Board::initial_board(false));
    }

    #[test]
    fn piece_code_round_trip_and_sides() {
        for code in (1..=7).chain(11..=17) {
            let piece = Piece::from_code(code).unwrap();
            assert_eq!(piece.code(), code);
        }
        assert_eq!(Piece::from_code(0), None);
        assert_eq!(Piece::from_code(8), None);
        assert_eq!(Piece::from_code(10), None);
        assert_eq!(Side::of(3), Some(Side::Red));
        assert_eq!(Side::of(13), Some(Side::Blue));
        assert_eq!(Side::from_label("red"), Side::Red);
        assert_eq!(Side::from_label("blue"), Side::Blue);
        assert_eq!(Side::from_label("anything"), Side::Blue);
    }

    #[test]
    fn side_of_extreme_codes() {
        assert_eq!(Side::of(i32::MIN), Some(Side::Red));
        assert_eq!(Side::of(-2147483643), Some(Side::Red));
        assert_eq!(Side::of(i32::MAX), Some(Side::Blue));
        assert_eq!(PieceKind::from_code(-2147483643), Some(PieceKind::Soldier));
        assert_eq!(PieceKind::from_code(i32::MAX), Some(PieceKind::Soldier));
    }

    #[test]
    fn side_names_are_strict() {
        use clap::ValueEnum;
        assert_eq!(Side::from_str("red", false), Ok(Side::Red));
        assert_eq!(Side::from_str("blue", false), Ok(Side::Blue));
        assert!(Side::from_str("green", false).is_err());
    }

    #[test]
    fn display_renders_glyphs() {
        let text = Board::initial_board(false).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("車 马 相 仕 帅"));
        assert!(lines[9].contains('将'));
    }

    #[test]
    fn move_serializes_as_array() {
        let mv = Move::new((0, 0), (0, 1));
        assert_eq!(serde_json::to_string(&mv).unwrap(), "[0,0,0,1]");
        assert_eq!(mv.to_sq(), (0, 1));
    }
}
