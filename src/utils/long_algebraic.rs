//! Four/five-character coordinate move notation (`e2e4`, `e7e8q`).
//!
//! Parsing here is purely syntactic. Whether the move is legal in a given
//! position is decided by matching against the generated legal move list.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Move, PieceKind};
use crate::utils::algebraic::algebraic_to_square;

pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

pub fn long_algebraic_to_move(long_algebraic: &str) -> ChessResult<Move> {
    if !long_algebraic.is_ascii() {
        return Err(ChessError::notation(long_algebraic, "non-ASCII characters"));
    }
    let len = long_algebraic.len();
    if len != 4 && len != 5 {
        return Err(ChessError::notation(
            long_algebraic,
            format!("expected 4 or 5 characters, got {len}"),
        ));
    }

    let from = algebraic_to_square(&long_algebraic[0..2])
        .map_err(|e| ChessError::notation(long_algebraic, e.to_string()))?;
    let to = algebraic_to_square(&long_algebraic[2..4])
        .map_err(|e| ChessError::notation(long_algebraic, e.to_string()))?;

    let promotion = match long_algebraic[4..].chars().next() {
        Some(ch) => Some(char_to_promotion(ch).ok_or_else(|| {
            ChessError::notation(long_algebraic, format!("invalid promotion piece '{ch}'"))
        })?),
        None => None,
    };

    Ok(Move { from, to, promotion })
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match PieceKind::from_letter(ch)? {
        kind @ (PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen) => {
            Some(kind)
        }
        _ => None,
    }
}
