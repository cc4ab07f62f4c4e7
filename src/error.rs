//! Error types shared by the board, the rule engine and the request loop.

use thiserror::Error;

/// Failures raised by board access.
///
/// `OutOfBounds` is the ordinary "ray left the board" signal. The rule engine
/// probes with [`crate::board::Board::try_get`] and never lets it escape a
/// candidate-generation call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("square ({x}, {y}) is off the board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("no piece on ({x}, {y})")]
    EmptySquare { x: i32, y: i32 },

    #[error("({x}, {y}) holds a friendly piece")]
    FriendlyTarget { x: i32, y: i32 },

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}

impl RuleError {
    pub fn invalid_board(msg: impl Into<String>) -> Self {
        Self::InvalidBoard(msg.into())
    }
}

/// Failures of the line protocol. Each one becomes an `error ...` response.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("missing chessboard")]
    MissingChessboard,

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad arguments for {command}: {reason}")]
    BadArguments { command: String, reason: String },

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("invalid value for option {name}: {value}")]
    InvalidOptionValue { name: String, value: String },

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ProtocolError {
    pub fn bad_arguments(command: &str, reason: impl Into<String>) -> Self {
        Self::BadArguments {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;
