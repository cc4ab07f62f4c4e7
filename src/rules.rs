//! Xiangqi move-legality rules.
//!
//! [`ChessRule`] owns one board snapshot and a fixed side perspective. For an
//! occupied square it lists the squares that piece could move to when this is
//! the only move under consideration: no check filtering, no turn validation.
//! Off-board probes end a scan and never surface as errors.

use crate::board::{Board, PieceCode, PieceKind, Side, Square, EMPTY};
use crate::error::Result;

const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const HORSE_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];
const ELEPHANT_OFFSETS: [(i32, i32); 4] = [(2, 2), (-2, 2), (2, -2), (-2, -2)];
const ADVISOR_OFFSETS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const GENERAL_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

/// True when both codes belong to the same side: `(c1 - 10) * (c2 - 10) > 0`.
///
/// Never call this with an empty square; every rule checks for `EMPTY` first.
#[inline]
pub fn is_friend(code1: PieceCode, code2: PieceCode) -> bool {
    debug_assert!(
        code1 != EMPTY && code2 != EMPTY,
        "is_friend called with an empty square ({code1}, {code2})"
    );
    (code1 as i64 - 10) * (code2 as i64 - 10) > 0
}

// Shrink an offset component toward zero by one step, keeping its sign.
#[inline]
fn shrink(d: i32) -> i32 {
    d.signum() * (d.abs() - 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessRule {
    is_red: bool,
    board: Board,
}

impl ChessRule {
    /// Engine for one side, starting from the initial position with that
    /// side on the bottom rows.
    pub fn new(is_red: bool) -> Self {
        Self {
            is_red,
            board: Board::initial_board(is_red),
        }
    }

    pub fn with_board(is_red: bool, board: Board) -> Self {
        Self { is_red, board }
    }

    pub fn is_red(&self) -> bool {
        self.is_red
    }

    pub fn side(&self) -> Side {
        if self.is_red {
            Side::Red
        } else {
            Side::Blue
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the whole board. The perspective is untouched.
    pub fn set_chessboard(&mut self, board: Board) {
        self.board = board;
    }

    pub fn get_chess(&self, x: i32, y: i32) -> Result<PieceCode> {
        self.board.get(x, y)
    }

    // Re-orient a side argument to this engine's perspective.
    #[inline]
    fn orient(&self, for_red: bool) -> bool {
        if self.is_red {
            for_red
        } else {
            !for_red
        }
    }

    /// Whether `(x, y)` lies in the half named by `for_red`, seen from this
    /// engine's perspective. Off-board points are in no territory.
    pub fn in_territory(&self, x: i32, y: i32, for_red: bool) -> bool {
        if !Board::in_bounds(x, y) {
            return false;
        }
        let own = self.orient(for_red);
        (own && y > 4) || (!own && y < 5)
    }

    /// Palace test. `None` accepts either palace; `Some(side)` only that
    /// side's palace, oriented like [`ChessRule::in_territory`].
    pub fn in_palace(&self, x: i32, y: i32, for_red: Option<bool>) -> bool {
        let columns = x > 2 && x < 6;
        let top = (0..=2).contains(&y);
        let bottom = (7..=9).contains(&y);
        match for_red {
            None => columns && (top || bottom),
            Some(red) => {
                if self.orient(red) {
                    columns && bottom
                } else {
                    columns && top
                }
            }
        }
    }

    /// Candidate destinations for the piece on `(x, y)`.
    ///
    /// Empty or off-board origins, and codes whose last digit names no role,
    /// yield an empty list.
    pub fn candidate_moves(&self, x: i32, y: i32) -> Vec<Square> {
        let mut out = Vec::new();
        let chess = match self.board.try_get(x, y) {
            Some(code) if code != EMPTY => code,
            _ => return out,
        };
        let Some(kind) = PieceKind::from_code(chess) else {
            return out;
        };
        match kind {
            PieceKind::Rook => self.rook_moves(chess, x, y, &mut out),
            PieceKind::Horse => self.horse_moves(chess, x, y, &mut out),
            PieceKind::Elephant => self.elephant_moves(chess, x, y, &mut out),
            PieceKind::Advisor => self.palace_steps(chess, x, y, &ADVISOR_OFFSETS, &mut out),
            PieceKind::General => self.palace_steps(chess, x, y, &GENERAL_OFFSETS, &mut out),
            PieceKind::Cannon => self.cannon_moves(chess, x, y, &mut out),
            PieceKind::Soldier => self.soldier_moves(chess, x, y, &mut out),
        }
        out
    }

    // On the board and either empty or holding an enemy of `chess`.
    #[inline]
    fn is_open(&self, chess: PieceCode, x: i32, y: i32) -> bool {
        match self.board.try_get(x, y) {
            Some(EMPTY) => true,
            Some(other) => !is_friend(chess, other),
            None => false,
        }
    }

    #[inline]
    fn is_empty(&self, x: i32, y: i32) -> bool {
        self.board.try_get(x, y) == Some(EMPTY)
    }

    fn rook_moves(&self, chess: PieceCode, x: i32, y: i32, out: &mut Vec<Square>) {
        for (dx, dy) in ORTHOGONAL {
            let (mut tx, mut ty) = (x + dx, y + dy);
            while let Some(code) = self.board.try_get(tx, ty) {
                if code == EMPTY {
                    out.push((tx, ty));
                } else {
                    if !is_friend(chess, code) {
                        out.push((tx, ty));
                    }
                    break;
                }
                tx += dx;
                ty += dy;
            }
        }
    }

    fn horse_moves(&self, chess: PieceCode, x: i32, y: i32, out: &mut Vec<Square>) {
        for (dx, dy) in HORSE_OFFSETS {
            let (tx, ty) = (x + dx, y + dy);
            if !self.is_open(chess, tx, ty) {
                continue;
            }
            // leg: the square next to the horse along the long axis
            if self.is_empty(x + shrink(dx), y + shrink(dy)) {
                out.push((tx, ty));
            }
        }
    }

    fn elephant_moves(&self, chess: PieceCode, x: i32, y: i32, out: &mut Vec<Square>) {
        for (dx, dy) in ELEPHANT_OFFSETS {
            let (tx, ty) = (x + dx, y + dy);
            if !self.is_open(chess, tx, ty) || !self.in_territory(tx, ty, false) {
                continue;
            }
            // eye
            if self.is_empty(x + shrink(dx), y + shrink(dy)) {
                out.push((tx, ty));
            }
        }
    }

    // Advisor and general: one step, must land inside a palace (either one).
    fn palace_steps(
        &self,
        chess: PieceCode,
        x: i32,
        y: i32,
        offsets: &[(i32, i32)],
        out: &mut Vec<Square>,
    ) {
        for &(dx, dy) in offsets {
            let (tx, ty) = (x + dx, y + dy);
            if self.is_open(chess, tx, ty) && self.in_palace(tx, ty, None) {
                out.push((tx, ty));
            }
        }
    }

    fn cannon_moves(&self, chess: PieceCode, x: i32, y: i32, out: &mut Vec<Square>) {
        for (dx, dy) in ORTHOGONAL {
            let (mut tx, mut ty) = (x + dx, y + dy);
            // quiet slide up to the screen
            while self.board.try_get(tx, ty) == Some(EMPTY) {
                out.push((tx, ty));
                tx += dx;
                ty += dy;
            }
            if self.board.try_get(tx, ty).is_none() {
                continue;
            }
            // past the screen, the first piece found is captured if it is an enemy
            tx += dx;
            ty += dy;
            while let Some(code) = self.board.try_get(tx, ty) {
                if code != EMPTY {
                    if !is_friend(chess, code) {
                        out.push((tx, ty));
                    }
                    break;
                }
                tx += dx;
                ty += dy;
            }
        }
    }

    fn soldier_moves(&self, chess: PieceCode, x: i32, y: i32, out: &mut Vec<Square>) {
        // red codes step toward y = 0, blue toward y = 9, flipped again for a blue engine
        let toward = match Side::of(chess) {
            Some(Side::Red) => -1,
            Some(Side::Blue) => 1,
            None => return,
        };
        let forward = if self.is_red { toward } else { -toward };
        let mut steps = vec![(0, forward)];
        if self.in_territory(x, y, false) {
            steps.extend([(1, 0), (-1, 0)]);
        }
        for (dx, dy) in steps {
            let (tx, ty) = (x + dx, y + dy);
            if self.is_open(chess, tx, ty) {
                out.push((tx, ty));
            }
        }
    }
}
