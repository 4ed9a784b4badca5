use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{enemy_occupancy, own_pieces};
use crate::moves::pawn_moves::pawn_attacks;

/// Pushes, double pushes, captures and en-passant captures. A move onto the
/// last rank is emitted once per promotion piece.
pub fn generate_pawn_moves(game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let empty = !game_state.occupancy_all;
    let enemy_occ = enemy_occupancy(game_state);
    let start_rank = match side {
        Color::White => 1,
        Color::Black => 6,
    };
    let promotion_rank = side.opposite().back_rank();

    for from in own_pieces(game_state, PieceKind::Pawn) {
        if let Some(one_step) = from.offset(0, side.forward()) {
            if one_step.bit() & empty != 0 {
                push_pawn_move(from, one_step, promotion_rank, out);

                if from.rank() == start_rank {
                    if let Some(two_step) = one_step.offset(0, side.forward()) {
                        if two_step.bit() & empty != 0 {
                            out.push(Move::new(from, two_step));
                        }
                    }
                }
            }
        }

        let ep_mask = game_state.en_passant_square.map_or(0, Square::bit);
        let captures = pawn_attacks(side, from) & (enemy_occ | ep_mask);
        for to in squares_of(captures) {
            push_pawn_move(from, to, promotion_rank, out);
        }
    }
}

fn push_pawn_move(from: Square, to: Square, promotion_rank: u8, out: &mut Vec<Move>) {
    if to.rank() == promotion_rank {
        out.extend(
            PROMOTION_KINDS
                .iter()
                .map(|&kind| Move::with_promotion(from, to, kind)),
        );
    } else {
        out.push(Move::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::game_state::GameState;

    fn pawn_moves(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&game, &mut out);
        let mut moves: Vec<String> = out.iter().map(|m| m.to_string()).collect();
        moves.sort();
        moves
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        assert_eq!(pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"), vec!["e2e3", "e2e4"]);
        assert_eq!(
            pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1"),
            vec!["e2e3"]
        );
        assert!(pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").is_empty());
    }

    #[test]
    fn en_passant_target_is_capturable() {
        let moves = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert_eq!(moves, vec!["e5d6", "e5e6"]);
    }

    #[test]
    fn promotions_expand_to_four_pieces() {
        let moves = pawn_moves("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            moves,
            vec!["a7a8b", "a7a8n", "a7a8q", "a7a8r", "a7b8b", "a7b8n", "a7b8q", "a7b8r"]
        );
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let moves = pawn_moves("4k3/3p4/4N3/8/8/8/8/4K3 b - - 0 1");
        assert_eq!(moves, vec!["d7d5", "d7d6", "d7e6"]);
    }
}
