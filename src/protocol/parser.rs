//! Line-command parser for the chessai request loop.
//!
//! One command per line. JSON payloads (`ai`, `position board`) run to the end of the line.

use crate::board::Side;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    IsReady,
    /// Raw JSON request body: `{"chessboard": [[...]], "round": "red"}`.
    Ai {
        payload: String,
    },
    NewGame {
        side: Option<Side>,
    },
    /// `None` resets to the starting position; `Some` carries JSON rows.
    Position {
        board: Option<String>,
    },
    Moves {
        x: i32,
        y: i32,
    },
    Step {
        sx: i32,
        sy: i32,
        tx: i32,
        ty: i32,
    },
    SetOption {
        name: String,
        value: Option<String>,
    },
    Display,
    Quit,
    Invalid {
        command: String,
        reason: String,
    },
    Unknown(String),
}

fn invalid(command: &str, reason: impl Into<String>) -> Command {
    Command::Invalid {
        command: command.to_string(),
        reason: reason.into(),
    }
}

// Split off the first whitespace-delimited word; the rest is trimmed.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

fn parse_coords<const N: usize>(command: &str, args: &[&str]) -> Result<[i32; N], Command> {
    if args.len() != N {
        return Err(invalid(
            command,
            format!("expected {} coordinates, got {}", N, args.len()),
        ));
    }
    let mut out = [0i32; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse::<i32>()
            .map_err(|_| invalid(command, format!("not a number: {}", arg)))?;
    }
    Ok(out)
}

/// Parse one protocol line.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Unknown("".to_string());
    }

    let (word, rest) = split_word(trimmed);
    let parts: Vec<&str> = rest.split_whitespace().collect();
    match word {
        "isready" => Command::IsReady,
        "quit" => Command::Quit,
        "d" => Command::Display,
        "ai" => {
            if rest.is_empty() {
                invalid("ai", "missing request body")
            } else {
                Command::Ai {
                    payload: rest.to_string(),
                }
            }
        }
        "newgame" => match parts.first() {
            None => Command::NewGame { side: None },
            Some(&label) => Command::NewGame {
                side: Some(Side::from_label(label)),
            },
        },
        "position" => {
            // position startpos | position board <json rows>
            let (kind, body) = split_word(rest);
            match kind {
                "startpos" => Command::Position { board: None },
                "board" if !body.is_empty() => Command::Position {
                    board: Some(body.to_string()),
                },
                "board" => invalid("position", "missing board rows"),
                other => invalid("position", format!("unknown position kind: {}", other)),
            }
        }
        "moves" => match parse_coords::<2>("moves", &parts) {
            Ok([x, y]) => Command::Moves { x, y },
            Err(cmd) => cmd,
        },
        "step" => match parse_coords::<4>("step", &parts) {
            Ok([sx, sy, tx, ty]) => Command::Step { sx, sy, tx, ty },
            Err(cmd) => cmd,
        },
        "setoption" => {
            // expected: setoption name <name> [value <val>]
            let mut name = String::new();
            let mut value: Option<String> = None;
            let mut i = 0usize;
            while i < parts.len() {
                match parts[i] {
                    "name" => {
                        i += 1;
                        let mut vals = Vec::new();
                        while i < parts.len() && parts[i] != "value" {
                            vals.push(parts[i]);
                            i += 1;
                        }
                        name = vals.join(" ");
                    }
                    "value" => {
                        i += 1;
                        value = Some(parts[i..].join(" "));
                        break;
                    }
                    _ => {
                        i += 1;
                    }
                }
            }
            Command::SetOption { name, value }
        }
        other => Command::Unknown(other.to_string()),
    }
}
