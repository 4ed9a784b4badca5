//! Full legal move generation pipeline.
//!
//! Collects piece-wise pseudo-legal moves, applies each candidate, and drops
//! those that leave the mover's own king attacked.

use crate::errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_classified, classify_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliding::{
    generate_bishop_moves, generate_queen_moves, generate_rook_moves,
};
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> ChessResult<Vec<GeneratedMove>> {
        let pseudo = generate_pseudo_legal_moves(game_state);
        let mut legal = Vec::<GeneratedMove>::with_capacity(pseudo.len());
        for mv in pseudo {
            if let Some(generated) = try_legal(game_state, mv)? {
                legal.push(generated);
            }
        }
        Ok(legal)
    }

    // Stops at the first legal candidate instead of building the whole list.
    fn has_legal_move(&self, game_state: &GameState) -> ChessResult<bool> {
        for mv in generate_pseudo_legal_moves(game_state) {
            if try_legal(game_state, mv)?.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Legal moves for the side to move, in generation order.
pub fn generate_legal_moves(game_state: &GameState) -> ChessResult<Vec<GeneratedMove>> {
    LegalMoveGenerator.generate_legal_moves(game_state)
}

/// Moves that follow piece movement rules, before the self-check filter.
pub fn generate_pseudo_legal_moves(game_state: &GameState) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(128);

    generate_pawn_moves(game_state, &mut pseudo);
    generate_knight_moves(game_state, &mut pseudo);
    generate_bishop_moves(game_state, &mut pseudo);
    generate_rook_moves(game_state, &mut pseudo);
    generate_queen_moves(game_state, &mut pseudo);
    generate_king_moves(game_state, &mut pseudo);

    pseudo
}

fn try_legal(game_state: &GameState, mv: Move) -> ChessResult<Option<GeneratedMove>> {
    let details = classify_move(game_state, mv)?;
    let next = apply_classified(game_state, mv, &details);

    // Illegal if own king is in check after move.
    if is_king_in_check(&next, game_state.side_to_move)? {
        return Ok(None);
    }

    Ok(Some(GeneratedMove {
        mv,
        moved_piece: details.moved,
        captured_piece: details.captured,
        kind: details.kind,
        game_after_move: next,
    }))
}

#[cfg(test)]
mod tests {
    use super::{generate_legal_moves, generate_pseudo_legal_moves, LegalMoveGenerator};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use crate::move_generation::move_generator::MoveGenerator;

    fn sorted_moves(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut moves: Vec<String> = generate_legal_moves(&game)
            .expect("generation should succeed")
            .iter()
            .map(|g| g.mv.to_string())
            .collect();
        moves.sort();
        moves
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let game = GameState::new_game();
        let moves = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed");
        assert_eq!(moves.len(), 20);
        assert!(LegalMoveGenerator.has_legal_move(&game).expect("generation should succeed"));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        // The e2 knight shields its king from the e8 rook.
        let moves = sorted_moves("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(moves.iter().all(|m| !m.starts_with("e2")), "{moves:?}");
        assert_eq!(moves, vec!["e1d1", "e1d2", "e1f1", "e1f2"]);
    }

    #[test]
    fn check_must_be_answered() {
        // Rook on e8 checks; only king steps off the file or the bishop block count.
        let moves = sorted_moves("4r1k1/8/8/8/8/8/8/2B1K3 w - - 0 1");
        assert_eq!(moves, vec!["c1e3", "e1d1", "e1d2", "e1f1", "e1f2"]);
    }

    #[test]
    fn no_generated_move_leaves_own_king_attacked() {
        let game = GameState::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let legal = generate_legal_moves(&game).expect("generation should succeed");
        assert_eq!(legal.len(), 48);
        assert!(generate_pseudo_legal_moves(&game).len() >= legal.len());
        for generated in legal {
            assert!(!is_king_in_check(&generated.game_after_move, game.side_to_move)
                .expect("king present"));
        }
    }

    #[test]
    fn checkmated_side_has_no_legal_move() {
        let game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1")
            .and_then(|g| g.apply_user_move("d1d8"))
            .expect("mating move is legal");
        assert!(!LegalMoveGenerator.has_legal_move(&game).expect("generation should succeed"));
        assert!(generate_legal_moves(&game).expect("generation should succeed").is_empty());
    }
}
