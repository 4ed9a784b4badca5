//! Terminal-state classification from "in check" and "has a legal move".

use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_game_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

pub fn game_status(game_state: &GameState) -> ChessResult<GameStatus> {
    let in_check = is_in_check(game_state)?;
    let can_move = LegalMoveGenerator.has_legal_move(game_state)?;
    Ok(match (in_check, can_move) {
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, true) => GameStatus::Ongoing,
        (false, false) => GameStatus::Stalemate,
    })
}

#[inline]
pub fn is_check(game_state: &GameState) -> ChessResult<bool> {
    is_in_check(game_state)
}

#[inline]
pub fn is_checkmate(game_state: &GameState) -> ChessResult<bool> {
    Ok(game_status(game_state)? == GameStatus::Checkmate)
}

#[inline]
pub fn is_stalemate(game_state: &GameState) -> ChessResult<bool> {
    Ok(game_status(game_state)? == GameStatus::Stalemate)
}

#[cfg(test)]
mod tests {
    use super::{game_status, is_check, is_checkmate, is_stalemate, GameStatus};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;

    #[test]
    fn queen_and_king_stalemate() {
        let game = GameState::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(game_status(&game), Ok(GameStatus::Stalemate));
        assert_eq!(is_stalemate(&game), Ok(true));
        assert_eq!(is_checkmate(&game), Ok(false));
        assert_eq!(is_check(&game), Ok(false));
    }

    #[test]
    fn back_rank_mate() {
        let game = GameState::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 1 1").expect("FEN should parse");
        assert_eq!(game_status(&game), Ok(GameStatus::Checkmate));
        assert_eq!(is_check(&game), Ok(true));
        assert_eq!(is_stalemate(&game), Ok(false));
        assert!(GameStatus::Checkmate.is_game_over());
    }

    #[test]
    fn check_with_escape_is_not_terminal() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")
            .and_then(|g| g.apply_user_move("a1a8"))
            .expect("rook check is legal");
        assert_eq!(game_status(&game), Ok(GameStatus::Check));
        assert_eq!(game_status(&GameState::new_game()), Ok(GameStatus::Ongoing));
    }

    #[test]
    fn missing_king_is_an_error_not_a_status() {
        let mut game = GameState::new_game();
        let e1 = crate::utils::algebraic::algebraic_to_square("e1").expect("e1");
        game.remove_piece(e1);
        assert_eq!(game_status(&game), Err(ChessError::MissingKing(Color::White)));
    }
}
