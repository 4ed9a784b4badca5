use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{own_pieces, push_targets};
use crate::moves::knight_moves::knight_attacks;

pub fn generate_knight_moves(game_state: &GameState, out: &mut Vec<Move>) {
    for from in own_pieces(game_state, PieceKind::Knight) {
        push_targets(game_state, from, knight_attacks(from), out);
    }
}
