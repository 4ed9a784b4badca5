//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search stays modular by delegating static position scoring to this trait,
//! so alternate heuristics can be swapped without altering search code. All
//! scores are centipawns from White's perspective and fully deterministic.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::sliding_moves::{bishop_attacks, queen_attacks, rook_attacks};
use crate::tables::piece_square_tables::{table_for, table_value, KING_ENDGAME_TABLE};

pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer: Send + Sync {
    /// Score from White's perspective: positive favours White.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Base value of a piece. The King's value only ranks captures during move
/// ordering; it never enters a material sum.
#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}

const MATERIAL_KINDS: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

#[inline]
fn material_of(game_state: &GameState, color: Color) -> i32 {
    MATERIAL_KINDS
        .iter()
        .map(|&kind| game_state.bitboard(color, kind).count_ones() as i32 * piece_value(kind))
        .sum()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
        material_of(game_state, Color::White) - material_of(game_state, Color::Black)
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        Self::material_balance_white_minus_black(game_state)
    }
}

const OPENING_THRESHOLD: i32 = 7000;
const MIDDLEGAME_THRESHOLD: i32 = 4000;
const ENDGAME_THRESHOLD: i32 = 1500;

/// Blend weights of the three game phases; they always sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseWeights {
    pub opening: f64,
    pub middlegame: f64,
    pub endgame: f64,
}

impl PhaseWeights {
    /// Phase from the non-king material left on the board (7800 at the start).
    pub fn from_material(total_material: i32) -> Self {
        if total_material > OPENING_THRESHOLD {
            Self {
                opening: 1.0,
                middlegame: 0.0,
                endgame: 0.0,
            }
        } else if total_material > MIDDLEGAME_THRESHOLD {
            let opening = f64::from(total_material - MIDDLEGAME_THRESHOLD)
                / f64::from(OPENING_THRESHOLD - MIDDLEGAME_THRESHOLD);
            Self {
                opening,
                middlegame: 1.0 - opening,
                endgame: 0.0,
            }
        } else if total_material > ENDGAME_THRESHOLD {
            let middlegame = f64::from(total_material - ENDGAME_THRESHOLD)
                / f64::from(MIDDLEGAME_THRESHOLD - ENDGAME_THRESHOLD);
            Self {
                opening: 0.0,
                middlegame,
                endgame: 1.0 - middlegame,
            }
        } else {
            Self {
                opening: 0.0,
                middlegame: 0.0,
                endgame: 1.0,
            }
        }
    }

    pub fn of(game_state: &GameState) -> Self {
        Self::from_material(material_of(game_state, Color::White) + material_of(game_state, Color::Black))
    }

    #[inline]
    fn mobility_weight(&self) -> f64 {
        0.1 * self.middlegame + 0.2 * self.endgame
    }

    #[inline]
    fn king_safety_weight(&self) -> f64 {
        0.3 * self.opening + 0.2 * self.middlegame
    }
}

/// Material, piece-square tables with a phase-blended king table, and
/// phase-weighted mobility and king safety.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer;

impl PositionalScorer {
    const KING_SHIELD_BONUS: i32 = 10;

    pub fn positional_term(game_state: &GameState, phase: &PhaseWeights) -> f64 {
        let mut score = 0.0f64;
        for color in [Color::White, Color::Black] {
            let sign = if color == Color::White { 1.0 } else { -1.0 };
            for kind in ALL_PIECE_KINDS {
                for sq in squares_of(game_state.bitboard(color, kind)) {
                    score += sign * square_bonus(kind, color, sq, phase);
                }
            }
        }
        score
    }

    /// Pseudo-legal attacked-square count, White minus Black.
    pub fn mobility_term(game_state: &GameState) -> i32 {
        mobility_for_color(game_state, Color::White) - mobility_for_color(game_state, Color::Black)
    }

    /// Own pawns on the three squares in front of each king, White minus Black.
    pub fn king_safety_term(game_state: &GameState) -> i32 {
        (pawn_shield(game_state, Color::White) - pawn_shield(game_state, Color::Black))
            * Self::KING_SHIELD_BONUS
    }
}

impl BoardScorer for PositionalScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let phase = PhaseWeights::of(game_state);
        let material = MaterialScorer::material_balance_white_minus_black(game_state);
        let positional = Self::positional_term(game_state, &phase);
        let mobility = f64::from(Self::mobility_term(game_state)) * phase.mobility_weight();
        let king_safety = f64::from(Self::king_safety_term(game_state)) * phase.king_safety_weight();

        material + (positional + mobility + king_safety).round() as i32
    }
}

/// Static evaluation with the default scorer.
#[inline]
pub fn evaluate(game_state: &GameState) -> i32 {
    PositionalScorer.score(game_state)
}

fn square_bonus(kind: PieceKind, color: Color, sq: Square, phase: &PhaseWeights) -> f64 {
    let base = f64::from(table_value(table_for(kind), color, sq));
    if kind != PieceKind::King {
        return base;
    }
    let endgame = f64::from(table_value(&KING_ENDGAME_TABLE, color, sq));
    base * (phase.opening + phase.middlegame) + endgame * phase.endgame
}

fn mobility_for_color(game_state: &GameState, color: Color) -> i32 {
    let occ = game_state.occupancy_all;
    let own_occ = game_state.occupancy_by_color[color.index()];
    let mut m = 0u32;

    for kind in ALL_PIECE_KINDS {
        for sq in squares_of(game_state.bitboard(color, kind)) {
            let attacks = match kind {
                PieceKind::Pawn => pawn_attacks(color, sq),
                PieceKind::Knight => knight_attacks(sq),
                PieceKind::Bishop => bishop_attacks(sq, occ),
                PieceKind::Rook => rook_attacks(sq, occ),
                PieceKind::Queen => queen_attacks(sq, occ),
                PieceKind::King => king_attacks(sq),
            };
            m += (attacks & !own_occ).count_ones();
        }
    }

    m as i32
}

fn pawn_shield(game_state: &GameState, color: Color) -> i32 {
    let Some(king_sq) = game_state.king_square(color) else {
        return 0;
    };
    let pawns = game_state.bitboard(color, PieceKind::Pawn);
    (-1..=1)
        .filter_map(|df| king_sq.offset(df, color.forward()))
        .filter(|sq| pawns & sq.bit() != 0)
        .count() as i32
}
