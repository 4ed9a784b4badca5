//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, maintains the current position, routes `go` requests
//! to the engine and emits protocol-compliant output. Searches run
//! synchronously, so `stop` has nothing to interrupt.

use std::io::{self, BufRead, Write};

use crate::engines::engine_difficulty::{DifficultyEngine, EngineConfig};
use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::ChessError;
use crate::game_state::game_state::GameState;

pub fn run_stdio_loop(config: EngineConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(stdin.lock(), stdout.lock(), config)
}

/// Drives the protocol until `quit` or end of input.
pub fn run_loop(input: impl BufRead, mut out: impl Write, config: EngineConfig) -> io::Result<()> {
    let mut uci = UciState::new(Box::new(DifficultyEngine::new(config)));

    for line in input.lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut out)?;
        out.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

struct UciState {
    game_state: GameState,
    engine: Box<dyn Engine>,
}

impl UciState {
    fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            game_state: GameState::new_game(),
            engine,
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        let Some(cmd) = trimmed.split_whitespace().next() else {
            return Ok(false);
        };
        log::debug!("uci <- {trimmed}");

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                writeln!(out, "option name Difficulty type spin default 3 min 1 max 5")?;
                writeln!(out, "option name Seed type string default random")?;
                writeln!(out, "option name MoveTime type spin default 5000 min 1 max 600000")?;
                writeln!(
                    out,
                    "option name TimeStrategy type combo default adaptive var adaptive var fraction20"
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    writeln!(out, "info string setoption error: {err}")?;
                }
            }
            "ucinewgame" => {
                self.game_state = GameState::new_game();
                self.engine.new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {err}")?;
                }
            }
            "go" => self.handle_go(trimmed, out)?,
            "quit" => return Ok(true),
            // `stop`, `ponderhit`, `debug`, `register` and unknown commands.
            _ => {}
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), ChessError> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut in_value = false;
        let mut in_name = false;

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" if !in_value => in_name = true,
                "value" if in_name => in_value = true,
                _ if in_value => value_tokens.push(tok),
                _ if in_name => name_tokens.push(tok),
                _ => {}
            }
        }

        self.engine.set_option(&name_tokens.join(" "), &value_tokens.join(" "))
    }

    /// On error the current position is kept unchanged.
    fn handle_position(&mut self, line: &str) -> Result<(), ChessError> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let mut position = match tokens.next() {
            Some("startpos") => GameState::new_game(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(tok) = tokens.next_if(|tok| *tok != "moves") {
                    fen_parts.push(tok);
                }
                GameState::from_fen(&fen_parts.join(" "))?
            }
            other => {
                return Err(ChessError::notation(
                    other.unwrap_or_default(),
                    "expected 'startpos' or 'fen'",
                ))
            }
        };

        if tokens.next_if_eq(&"moves").is_some() {
            for lan in tokens {
                position = position.apply_user_move(lan)?;
            }
        }

        self.game_state = position;
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        let params = parse_go_params(line);
        match self.engine.choose_move(&self.game_state, &params) {
            Ok(result) => {
                for info in &result.info_lines {
                    writeln!(out, "{info}")?;
                }
                match result.best_move {
                    Some(best_move) => writeln!(out, "bestmove {best_move}"),
                    None => writeln!(out, "bestmove 0000"),
                }
            }
            Err(err) => {
                log::error!("search failed: {err}");
                writeln!(out, "info string go error: {err}")?;
                writeln!(out, "bestmove 0000")
            }
        }
    }
}

fn parse_go_params(line: &str) -> GoParams {
    let mut params = GoParams::default();
    let mut tokens = line.split_whitespace().skip(1);
    while let Some(tok) = tokens.next() {
        let mut next_number = || tokens.next().and_then(|x| x.parse::<u64>().ok());
        match tok {
            "depth" => params.depth = next_number().map(|d| d.min(u64::from(u8::MAX)) as u8),
            "movetime" => params.movetime_ms = next_number(),
            "wtime" => params.wtime_ms = next_number(),
            "btime" => params.btime_ms = next_number(),
            "winc" => params.winc_ms = next_number(),
            "binc" => params.binc_ms = next_number(),
            "movestogo" => params.movestogo = next_number().map(|m| m.min(u64::from(u16::MAX)) as u16),
            _ => {}
        }
    }
    params
}
