use crate::game_state::{chess_types::*, game_state::GameState};

/// Pushes one move per target square, skipping squares held by the mover.
#[inline]
pub fn push_targets(game_state: &GameState, from: Square, targets: u64, out: &mut Vec<Move>) {
    let own_occ = game_state.occupancy_by_color[game_state.side_to_move.index()];
    out.extend(squares_of(targets & !own_occ).map(|to| Move::new(from, to)));
}

#[inline]
pub fn enemy_occupancy(game_state: &GameState) -> u64 {
    game_state.occupancy_by_color[game_state.side_to_move.opposite().index()]
}

#[inline]
pub fn own_pieces(game_state: &GameState, kind: PieceKind) -> impl Iterator<Item = Square> {
    squares_of(game_state.bitboard(game_state.side_to_move, kind))
}
