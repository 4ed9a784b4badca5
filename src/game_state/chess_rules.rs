//! Canonical chess-rule constants.
//!
//! Holds the standard starting position and the fixed castling geometry the
//! generator and move application both rely on.

use crate::game_state::chess_types::{CastleSide, Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Squares involved in one castling move.
#[derive(Debug, Clone, Copy)]
pub struct CastlingGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook; all must be empty.
    pub between_mask: u64,
    /// Square the king crosses on its way to `king_to`.
    pub king_transit: Square,
}

const fn sq(file: u8, rank: u8) -> Square {
    match Square::new(file, rank) {
        Some(square) => square,
        None => panic!("castling geometry square off the board"),
    }
}

const fn geometry(rank: u8, side: CastleSide) -> CastlingGeometry {
    match side {
        CastleSide::Kingside => CastlingGeometry {
            king_from: sq(4, rank),
            king_to: sq(6, rank),
            rook_from: sq(7, rank),
            rook_to: sq(5, rank),
            between_mask: sq(5, rank).bit() | sq(6, rank).bit(),
            king_transit: sq(5, rank),
        },
        CastleSide::Queenside => CastlingGeometry {
            king_from: sq(4, rank),
            king_to: sq(2, rank),
            rook_from: sq(0, rank),
            rook_to: sq(3, rank),
            between_mask: sq(1, rank).bit() | sq(2, rank).bit() | sq(3, rank).bit(),
            king_transit: sq(3, rank),
        },
    }
}

const WHITE_KINGSIDE: CastlingGeometry = geometry(0, CastleSide::Kingside);
const WHITE_QUEENSIDE: CastlingGeometry = geometry(0, CastleSide::Queenside);
const BLACK_KINGSIDE: CastlingGeometry = geometry(7, CastleSide::Kingside);
const BLACK_QUEENSIDE: CastlingGeometry = geometry(7, CastleSide::Queenside);

#[inline]
pub const fn castling_geometry(color: Color, side: CastleSide) -> &'static CastlingGeometry {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => &WHITE_KINGSIDE,
        (Color::White, CastleSide::Queenside) => &WHITE_QUEENSIDE,
        (Color::Black, CastleSide::Kingside) => &BLACK_KINGSIDE,
        (Color::Black, CastleSide::Queenside) => &BLACK_QUEENSIDE,
    }
}

/// Castling side and rights owner whose rook starts on `square`, if any.
pub fn rook_home_of(square: Square) -> Option<(Color, CastleSide)> {
    [Color::White, Color::Black]
        .into_iter()
        .flat_map(|color| {
            [CastleSide::Kingside, CastleSide::Queenside]
                .into_iter()
                .map(move |side| (color, side))
        })
        .find(|&(color, side)| castling_geometry(color, side).rook_from == square)
}
