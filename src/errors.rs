//! Crate-wide error type.
//!
//! Format errors (bad notation or FEN) and rejected moves are recoverable and
//! leave the caller's position untouched. `EmptyOrigin`, `WrongSideToMove` and
//! `MissingKing` signal broken invariants upstream and are propagated rather
//! than folded into a default value.

use crate::game_state::chess_types::{Color, Square};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Coordinate text that is not a board square.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Move text that is not four or five characters of coordinate notation.
    #[error("invalid move notation '{notation}': {reason}")]
    InvalidNotation { notation: String, reason: String },

    /// Malformed or inconsistent FEN record.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Well-formed move that is not in the legal move list.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Move applied from a square with no piece on it.
    #[error("no piece on origin square {0}")]
    EmptyOrigin(Square),

    /// Move applied with a piece that does not belong to the side to move.
    #[error("piece on {0} does not belong to the side to move")]
    WrongSideToMove(Square),

    /// Position without a king for a colour whose safety was queried.
    #[error("no {0:?} king on the board")]
    MissingKing(Color),

    /// Engine option with an unknown name or an unparsable value.
    #[error("invalid value '{value}' for option {name}")]
    InvalidOption { name: String, value: String },
}

pub type ChessResult<T> = Result<T, ChessError>;

impl ChessError {
    pub(crate) fn notation(notation: &str, reason: impl Into<String>) -> Self {
        ChessError::InvalidNotation {
            notation: notation.to_owned(),
            reason: reason.into(),
        }
    }
}
