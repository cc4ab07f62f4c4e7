//! Request loop and session state for chessai

use std::io::{self, BufRead, Write};

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::options::ServiceOptions;
use super::parser::{parse_command, Command};
use crate::board::{Board, Move, PieceCode, Side};
use crate::error::ProtocolError;
use crate::rules::ChessRule;

/// Body of an `ai` request.
#[derive(Debug, Clone, Deserialize)]
pub struct AiRequest {
    pub chessboard: Option<Vec<Vec<PieceCode>>>,
    #[serde(default = "default_round")]
    pub round: String,
}

fn default_round() -> String {
    "red".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceState {
    /// No engine built yet
    Init,
    Ready,
}

pub struct ChessService {
    state: ServiceState,
    rule: Option<ChessRule>,
    running: bool,
    options: ServiceOptions,
}

impl Default for ChessService {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessService {
    pub fn new() -> Self {
        Self::with_options(ServiceOptions::default())
    }

    pub fn with_options(options: ServiceOptions) -> Self {
        Self {
            state: ServiceState::Init,
            rule: None,
            running: true,
            options,
        }
    }

    pub fn state(&self) -> &ServiceState {
        &self.state
    }

    pub fn rule(&self) -> Option<&ChessRule> {
        self.rule.as_ref()
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn install(&mut self, rule: ChessRule) {
        info!(side = rule.side().label(), "engine created");
        self.state = ServiceState::Ready;
        self.rule = Some(rule);
    }

    // The current engine, built from the configured side if none exists yet.
    fn engine_mut(&mut self) -> &mut ChessRule {
        let side = self.options.side;
        if self.rule.is_none() {
            info!(side = side.label(), "engine created");
        }
        self.state = ServiceState::Ready;
        self.rule.get_or_insert_with(|| ChessRule::new(side.is_red()))
    }

    /// Handle one `ai` request body and return the reply move.
    ///
    /// The first request fixes the engine perspective from `round`; later
    /// requests only replace the board.
    pub fn handle_ai_request(&mut self, payload: &str) -> Result<Move, ProtocolError> {
        let request: AiRequest = serde_json::from_str(payload)?;
        let rows = request.chessboard.ok_or(ProtocolError::MissingChessboard)?;
        let board = Board::from_rows(&rows)?;

        match self.rule.as_mut() {
            Some(rule) => {
                rule.set_chessboard(board);
                info!(round = %request.round, "board replaced");
            }
            None => {
                let is_red = Side::from_label(&request.round).is_red();
                self.install(ChessRule::with_board(is_red, board));
            }
        }
        Ok(self.options.reply_move)
    }

    fn try_handle(&mut self, cmd: Command) -> Result<Vec<String>, ProtocolError> {
        let mut res = Vec::new();
        match cmd {
            Command::IsReady => {
                res.push("readyok".to_string());
            }
            Command::Ai { payload } => {
                let mv = self.handle_ai_request(&payload)?;
                if self.options.debug_log {
                    if let Some(rule) = &self.rule {
                        res.push(format!(
                            "info string {} board set, perspective {}",
                            self.options.engine_name,
                            rule.side().label()
                        ));
                    }
                }
                res.push(serde_json::to_string(&mv)?);
            }
            Command::NewGame { side } => {
                let side = side.unwrap_or(self.options.side);
                self.install(ChessRule::new(side.is_red()));
            }
            Command::Position { board: None } => {
                let rule = self.engine_mut();
                let start = Board::initial_board(rule.is_red());
                rule.set_chessboard(start);
            }
            Command::Position { board: Some(json) } => {
                let rows: Vec<Vec<PieceCode>> = serde_json::from_str(&json)?;
                let board = Board::from_rows(&rows)?;
                self.engine_mut().set_chessboard(board);
            }
            Command::Moves { x, y } => {
                let moves = self.engine_mut().candidate_moves(x, y);
                debug!(x, y, count = moves.len(), "candidates generated");
                res.push(format!("moves {}", serde_json::to_string(&moves)?));
            }
            Command::Step { sx, sy, tx, ty } => {
                self.engine_mut().board_mut().step(sx, sy, tx, ty)?;
                res.push("ok".to_string());
            }
            Command::SetOption { name, value } => {
                self.options.set_option(&name, value.as_deref())?;
                res.push(format!(
                    "info string {} set to {}",
                    name,
                    value.unwrap_or_default()
                ));
            }
            Command::Display => {
                let text = self.engine_mut().board().to_string();
                res.extend(text.lines().map(str::to_string));
            }
            Command::Quit => {
                self.running = false;
            }
            Command::Invalid { command, reason } => {
                return Err(ProtocolError::bad_arguments(&command, reason));
            }
            Command::Unknown(s) => {
                res.push(format!("info string unknown command: {}", s));
            }
        }
        Ok(res)
    }

    /// Run one command. Errors become a single `error ...` line; the session survives.
    pub fn handle_command(&mut self, cmd: Command) -> Vec<String> {
        debug!(?cmd, "command");
        match self.try_handle(cmd) {
            Ok(res) => res,
            Err(e) => {
                warn!(error = %e, "request rejected");
                vec![format!("error {}", e)]
            }
        }
    }
}

/// Drive a session over any line reader/writer pair until EOF or `quit`.
pub fn serve<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    service: &mut ChessService,
) -> Result<(), ProtocolError> {
    let mut buf = String::new();

    while service.is_running() {
        buf.clear();
        let n = reader.read_line(&mut buf)?;
        if n == 0 {
            // EOF reached
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            continue;
        }

        for r in service.handle_command(parse_command(line)) {
            writeln!(writer, "{}", r)?;
        }

        // flush after each command so the client sees the reply immediately
        writer.flush()?;
    }

    Ok(())
}

pub fn run_service_loop(options: ServiceOptions) -> Result<(), ProtocolError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut service = ChessService::with_options(options);
    serve(stdin.lock(), stdout.lock(), &mut service)
}

pub fn process_line(line: &str, service: &mut ChessService) -> Vec<String> {
    service.handle_command(parse_command(line))
}
