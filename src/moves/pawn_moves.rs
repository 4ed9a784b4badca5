//! Pawn capture diagonals for each colour.

use crate::game_state::chess_types::{Color, Square};
use crate::moves::knight_moves::step_attack_table;

static PAWN_TABLES: [[u64; 64]; 2] = [
    step_attack_table(&[(-1, 1), (1, 1)]),
    step_attack_table(&[(-1, -1), (1, -1)]),
];

/// Squares a `color` pawn standing on `square` attacks.
#[inline]
pub fn pawn_attacks(color: Color, square: Square) -> u64 {
    PAWN_TABLES[color.index()][square.index()]
}
