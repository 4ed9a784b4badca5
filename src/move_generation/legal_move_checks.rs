//! Attack and check oracle.
//!
//! Answers "is this square attacked by that colour?" by looking outward from
//! the target square: pawn diagonals, knight offsets, king adjacency, then the
//! four diagonal and four orthogonal rays up to their first blocker.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::sliding_moves::{bishop_attacks, rook_attacks};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> ChessResult<Square> {
    game_state
        .king_square(color)
        .ok_or(ChessError::MissingKing(color))
}

/// Whether `color`'s king is attacked by the other colour.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> ChessResult<bool> {
    let king_sq = king_square(game_state, color)?;
    Ok(is_square_attacked(game_state, king_sq, color.opposite()))
}

/// Whether the side to move is in check.
#[inline]
pub fn is_in_check(game_state: &GameState) -> ChessResult<bool> {
    is_king_in_check(game_state, game_state.side_to_move)
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let attackers = |kind: PieceKind| game_state.bitboard(attacker_color, kind);

    // A defender pawn on `square` would attack exactly the squares an
    // attacking pawn must stand on.
    if pawn_attacks(attacker_color.opposite(), square) & attackers(PieceKind::Pawn) != 0 {
        return true;
    }

    if knight_attacks(square) & attackers(PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & attackers(PieceKind::King) != 0 {
        return true;
    }

    let queens = attackers(PieceKind::Queen);
    let diagonal_sliders = attackers(PieceKind::Bishop) | queens;
    if bishop_attacks(square, game_state.occupancy_all) & diagonal_sliders != 0 {
        return true;
    }

    let orthogonal_sliders = attackers(PieceKind::Rook) | queens;
    rook_attacks(square, game_state.occupancy_all) & orthogonal_sliders != 0
}

#[cfg(test)]
mod tests {
    use super::{is_in_check, is_square_attacked};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> crate::game_state::chess_types::Square {
        algebraic_to_square(name).expect("valid square")
    }

    #[test]
    fn pawn_attacks_point_forward_only() {
        let game = GameState::from_fen("4k3/8/8/8/4p3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game, sq("d3"), Color::Black));
        assert!(is_square_attacked(&game, sq("f3"), Color::Black));
        assert!(!is_square_attacked(&game, sq("d5"), Color::Black));
        assert!(!is_square_attacked(&game, sq("e3"), Color::Black));
    }

    #[test]
    fn slider_attack_is_blocked_by_any_piece() {
        let game =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game, sq("a8"), Color::White));
        assert!(is_square_attacked(&game, sq("d1"), Color::White));
        // King on e1 blocks the rook ray along the first rank.
        assert!(!is_square_attacked(&game, sq("h1"), Color::White));

        let blocked =
            GameState::from_fen("4k3/8/8/8/N7/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&blocked, sq("a4"), Color::White));
        assert!(!is_square_attacked(&blocked, sq("a5"), Color::White));
    }

    #[test]
    fn bishop_does_not_attack_orthogonally() {
        let game = GameState::from_fen("4k3/8/8/8/3b4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&game, sq("g1"), Color::Black));
        assert!(!is_square_attacked(&game, sq("d1"), Color::Black));
    }

    #[test]
    fn knight_and_king_adjacency() {
        let game = GameState::from_fen("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_in_check(&game).expect("kings present"));
        assert!(is_square_attacked(&game, sq("d7"), Color::Black));
        assert!(is_square_attacked(&game, sq("d2"), Color::White));
    }

    #[test]
    fn missing_king_is_reported() {
        let mut game = GameState::new_game();
        game.remove_piece(sq("e1"));
        let err = is_in_check(&game).expect_err("white king removed");
        assert_eq!(err, ChessError::MissingKing(Color::White));

        game.put_piece(sq("e1"), Piece::new(PieceKind::King, Color::White));
        assert_eq!(is_in_check(&game), Ok(false));
    }
}
