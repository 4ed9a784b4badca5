use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{own_pieces, push_targets};
use crate::moves::king_moves::king_attacks;

pub fn generate_king_moves(game_state: &GameState, out: &mut Vec<Move>) {
    let Some(from) = own_pieces(game_state, PieceKind::King).next() else {
        return;
    };

    push_targets(game_state, from, king_attacks(from), out);
    generate_castling_moves(game_state, from, out);
}

/// Castling needs the right, the rook at home, empty squares between king and
/// rook, and no attack on the king's origin, transit or destination square.
fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();

    // Cannot castle out of check.
    if is_square_attacked(game_state, king_from, enemy) {
        return;
    }

    for castle_side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !game_state.can_castle(side, castle_side) {
            continue;
        }

        let geo = castling_geometry(side, castle_side);
        if king_from != geo.king_from
            || game_state.bitboard(side, PieceKind::Rook) & geo.rook_from.bit() == 0
            || game_state.occupancy_all & geo.between_mask != 0
        {
            continue;
        }

        if is_square_attacked(game_state, geo.king_transit, enemy)
            || is_square_attacked(game_state, geo.king_to, enemy)
        {
            continue;
        }

        out.push(Move::new(geo.king_from, geo.king_to));
    }
}
