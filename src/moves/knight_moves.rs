//! Knight jumps, and the step-table builder shared by the other fixed-step
//! pieces.

use crate::game_state::chess_types::Square;

const KNIGHT_STEPS: [(i8, i8); 8] = [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];

static KNIGHT_TABLE: [u64; 64] = step_attack_table(&KNIGHT_STEPS);

#[inline]
pub fn knight_attacks(square: Square) -> u64 {
    KNIGHT_TABLE[square.index()]
}

/// For every origin square, the union of the on-board squares reached by
/// one of `steps` (file delta, rank delta).
pub(crate) const fn step_attack_table(steps: &[(i8, i8)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut index = 0u8;
    while index < 64 {
        if let Some(origin) = Square::from_index(index) {
            let mut i = 0;
            while i < steps.len() {
                if let Some(target) = origin.offset(steps[i].0, steps[i].1) {
                    table[index as usize] |= target.bit();
                }
                i += 1;
            }
        }
        index += 1;
    }
    table
}
