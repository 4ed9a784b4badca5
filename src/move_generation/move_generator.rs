use crate::errors::ChessResult;
use crate::game_state::chess_types::{Move, Piece, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::MoveKind;

/// A legal move together with what it does and the position it leads to.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured_piece: Option<PieceKind>,
    pub kind: MoveKind,
    pub game_after_move: GameState,
}

impl GeneratedMove {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> ChessResult<Vec<GeneratedMove>>;

    /// Whether the side to move has any legal move at all.
    fn has_legal_move(&self, game_state: &GameState) -> ChessResult<bool> {
        Ok(!self.generate_legal_moves(game_state)?.is_empty())
    }
}
