//! Invariants of candidate generation over the starting position and random boards.

use chessai::board::{Board, PieceCode, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};
use chessai::{is_friend, ChessRule};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// Weighted towards empty squares so rays have room to run.
const CODES: [PieceCode; 22] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 11, 12, 13, 14, 15, 16, 17,
];

fn random_board(rng: &mut StdRng) -> Board {
    let mut board = Board::empty();
    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            let code = *CODES.choose(rng).unwrap();
            board.set(x, y, code).unwrap();
        }
    }
    board
}

fn all_squares() -> impl Iterator<Item = (i32, i32)> {
    (0..BOARD_HEIGHT).flat_map(|y| (0..BOARD_WIDTH).map(move |x| (x, y)))
}

#[test]
fn replace_with_same_grid_keeps_candidates() {
    for is_red in [true, false] {
        let mut rule = ChessRule::new(is_red);
        let before: Vec<_> = all_squares().map(|(x, y)| rule.candidate_moves(x, y)).collect();

        let grid = *rule.board().grid();
        for (x, y) in all_squares() {
            assert_eq!(rule.board().get(x, y), Ok(grid[y as usize][x as usize]));
        }
        rule.board_mut().replace(grid);

        let after: Vec<_> = all_squares().map(|(x, y)| rule.candidate_moves(x, y)).collect();
        assert_eq!(before, after);
    }
}

#[test]
fn starting_position_move_counts() {
    // pseudo-legal move totals for the side at the bottom of each layout
    for is_red in [true, false] {
        let rule = ChessRule::new(is_red);
        let own: Vec<_> = rule
            .board()
            .occupied()
            .filter(|&((_, y), _)| y > 4)
            .collect();
        assert_eq!(own.len(), 16);
        let total: usize = own
            .iter()
            .map(|&((x, y), _)| rule.candidate_moves(x, y).len())
            .sum();
        // shared: 4 rook, 4 horse, 2 advisor, 1 general, 24 cannon.
        // Red engine: elephants stuck (territory is y < 5), soldiers forward only = 5.
        // Blue engine: elephants 4, soldiers at y = 6 are in territory and step sideways = 14.
        let expected = if is_red { 40 } else { 53 };
        assert_eq!(total, expected, "is_red={}", is_red);
    }
}

#[test]
fn is_friend_is_symmetric_on_random_pairs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10_000 {
        let a = rng.gen_range(1..=30);
        let b = rng.gen_range(1..=30);
        if a == 10 || b == 10 {
            continue;
        }
        assert_eq!(is_friend(a, b), is_friend(b, a), "{} vs {}", a, b);
    }
}

#[test]
fn random_boards_only_yield_open_on_board_targets() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..300 {
        let board = random_board(&mut rng);
        for is_red in [true, false] {
            let rule = ChessRule::with_board(is_red, board.clone());
            for (x, y) in all_squares() {
                // is_friend asserts its inputs are non-empty in debug builds
                let moves = rule.candidate_moves(x, y);
                let origin = board.get(x, y).unwrap();
                if origin == EMPTY {
                    assert!(moves.is_empty());
                    continue;
                }
                let mut seen = moves.clone();
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len(), moves.len(), "duplicate target from ({}, {})", x, y);
                for &(tx, ty) in &moves {
                    assert_ne!((tx, ty), (x, y));
                    let target = board
                        .get(tx, ty)
                        .unwrap_or_else(|e| panic!("off-board target from ({}, {}): {}", x, y, e));
                    assert!(
                        target == EMPTY || !is_friend(origin, target),
                        "friendly capture {} -> {} at ({}, {})",
                        origin,
                        target,
                        tx,
                        ty
                    );
                }
            }
        }
    }
}

#[test]
fn random_boards_respect_zone_rules() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let board = random_board(&mut rng);
        for is_red in [true, false] {
            let rule = ChessRule::with_board(is_red, board.clone());
            for ((x, y), code) in board.occupied() {
                let moves = rule.candidate_moves(x, y);
                match code % 10 {
                    3 => assert!(moves.iter().all(|&(tx, ty)| rule.in_territory(tx, ty, false))),
                    4 | 5 => assert!(moves.iter().all(|&(tx, ty)| rule.in_palace(tx, ty, None))),
                    7 => assert!(moves.len() <= 3),
                    _ => {}
                }
            }
        }
    }
}
