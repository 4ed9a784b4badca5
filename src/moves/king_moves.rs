//! One-square king steps. Castling is generated separately.

use crate::game_state::chess_types::Square;
use crate::moves::knight_moves::step_attack_table;

const KING_STEPS: [(i8, i8); 8] = [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

static KING_TABLE: [u64; 64] = step_attack_table(&KING_STEPS);

#[inline]
pub fn king_attacks(square: Square) -> u64 {
    KING_TABLE[square.index()]
}

#[cfg(test)]
mod tests {
    use super::king_attacks;
    use crate::game_state::chess_types::Square;

    #[test]
    fn king_attack_counts_by_region() {
        let e4 = Square::new(4, 3).expect("e4");
        let a1 = Square::new(0, 0).expect("a1");
        let e1 = Square::new(4, 0).expect("e1");
        assert_eq!(king_attacks(e4).count_ones(), 8);
        assert_eq!(king_attacks(a1).count_ones(), 3);
        assert_eq!(king_attacks(e1).count_ones(), 5);
    }
}
