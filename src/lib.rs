pub mod board;
pub mod error;
pub mod protocol;
pub mod rules;

pub use board::{Board, Move, Piece, PieceCode, PieceKind, Side, Square};
pub use error::{ProtocolError, RuleError};
pub use rules::{is_friend, ChessRule};
