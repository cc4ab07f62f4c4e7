//! Service options for the chessai request loop
//!
//! Options are set at startup from the command line or at runtime with
//! `setoption name <Name> value <value>`.

use clap::ValueEnum;

use crate::board::{Move, Side};
use crate::error::ProtocolError;

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Perspective used when an engine has to be built without a request side
    pub side: Side,

    /// Placeholder move returned for every `ai` request
    pub reply_move: Move,

    /// Engine name
    pub engine_name: String,

    /// Echo request diagnostics as `info string` lines
    pub debug_log: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            side: Side::Red,
            reply_move: Move(0, 0, 0, 1),
            engine_name: "chessai".to_string(),
            debug_log: false,
        }
    }
}

fn invalid_value(name: &str, value: &str) -> ProtocolError {
    ProtocolError::InvalidOptionValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

// Accepts "0 0 0 1", "0,0,0,1" or "[0, 0, 0, 1]".
fn parse_move(value: &str) -> Option<Move> {
    let nums: Vec<i32> = value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i32>().ok())
        .collect::<Option<Vec<_>>>()?;
    match nums.as_slice() {
        &[sx, sy, tx, ty] => Some(Move(sx, sy, tx, ty)),
        _ => None,
    }
}

impl ServiceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set option value
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ProtocolError> {
        let Some(v) = value else {
            return Err(invalid_value(name, "<none>"));
        };
        match name {
            "Side" => {
                self.side = Side::from_str(v, false).map_err(|_| invalid_value(name, v))?;
            }
            "ReplyMove" => {
                self.reply_move = parse_move(v).ok_or_else(|| invalid_value(name, v))?;
            }
            "DebugLog" => {
                self.debug_log = v.parse::<bool>().map_err(|_| invalid_value(name, v))?;
            }
            _ => return Err(ProtocolError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}
