//! Bishop, rook and queen move generation.
//!
//! Rays stop at the first occupied square; an enemy there is a capture, a
//! friendly piece is excluded by `push_targets`.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{own_pieces, push_targets};
use crate::moves::sliding_moves::{bishop_attacks, queen_attacks, rook_attacks};

pub fn generate_bishop_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_slider_moves(game_state, PieceKind::Bishop, bishop_attacks, out);
}

pub fn generate_rook_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_slider_moves(game_state, PieceKind::Rook, rook_attacks, out);
}

pub fn generate_queen_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_slider_moves(game_state, PieceKind::Queen, queen_attacks, out);
}

fn generate_slider_moves(
    game_state: &GameState,
    kind: PieceKind,
    attacks: fn(Square, u64) -> u64,
    out: &mut Vec<Move>,
) {
    for from in own_pieces(game_state, kind) {
        push_targets(game_state, from, attacks(from, game_state.occupancy_all), out);
    }
}
