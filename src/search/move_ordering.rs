//! Heuristic move ordering for alpha-beta.
//!
//! Captures are ranked most-valuable-victim first, least-valuable-aggressor
//! breaking ties, and every move gets a small bonus for the piece-square
//! improvement of its destination. The score only orders moves; it is never
//! used as an evaluation.

use std::cmp::Reverse;

use crate::move_generation::move_generator::GeneratedMove;
use crate::search::board_scoring::piece_value;
use crate::tables::piece_square_tables::{table_for, table_value};

pub fn move_order_score(generated: &GeneratedMove) -> i32 {
    let mover = generated.moved_piece;
    let mut score = 0i32;

    if let Some(victim) = generated.captured_piece {
        score += piece_value(victim) - piece_value(mover.kind) / 10;
    }

    let table = table_for(mover.kind);
    let from_bonus = table_value(table, mover.color, generated.mv.from);
    let to_bonus = table_value(table, mover.color, generated.mv.to);
    score + (to_bonus - from_bonus) / 10
}

/// Sorts best-first. The sort is stable, so equal scores keep generation order.
pub fn order_moves(moves: &mut [GeneratedMove]) {
    moves.sort_by_cached_key(|m| Reverse(move_order_score(m)));
}
