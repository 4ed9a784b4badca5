//! Move application: derives the next `GameState` from a move.
//!
//! Special moves are recognised from the board rather than from flags on the
//! move: a king stepping two files from its home square castles, a pawn moving
//! diagonally onto the en-passant target captures en passant, and a pawn
//! advancing two ranks sets the next en-passant target.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castling_geometry, rook_home_of};
use crate::game_state::{chess_types::*, game_state::GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Quiet,
    Capture,
    DoublePawnPush,
    EnPassant,
    Castle(CastleSide),
}

/// What a move does on a particular board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDetails {
    pub moved: Piece,
    pub captured: Option<PieceKind>,
    pub kind: MoveKind,
}

impl MoveDetails {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

pub fn classify_move(game_state: &GameState, mv: Move) -> ChessResult<MoveDetails> {
    let moved = game_state
        .piece_at(mv.from)
        .ok_or(ChessError::EmptyOrigin(mv.from))?;
    if moved.color != game_state.side_to_move {
        return Err(ChessError::WrongSideToMove(mv.from));
    }

    let target = game_state.piece_at(mv.to);
    let file_distance = mv.from.file().abs_diff(mv.to.file());
    let rank_distance = mv.from.rank().abs_diff(mv.to.rank());

    let details = match moved.kind {
        PieceKind::Pawn
            if target.is_none()
                && file_distance == 1
                && game_state.en_passant_square == Some(mv.to) =>
        {
            MoveDetails {
                moved,
                captured: Some(PieceKind::Pawn),
                kind: MoveKind::EnPassant,
            }
        }
        PieceKind::Pawn if rank_distance == 2 => MoveDetails {
            moved,
            captured: None,
            kind: MoveKind::DoublePawnPush,
        },
        PieceKind::King if file_distance == 2 && rank_distance == 0 => {
            let side = if mv.to.file() > mv.from.file() {
                CastleSide::Kingside
            } else {
                CastleSide::Queenside
            };
            MoveDetails {
                moved,
                captured: None,
                kind: MoveKind::Castle(side),
            }
        }
        _ => MoveDetails {
            moved,
            captured: target.map(|p| p.kind),
            kind: if target.is_some() {
                MoveKind::Capture
            } else {
                MoveKind::Quiet
            },
        },
    };

    Ok(details)
}

/// Applies `mv` to a copy of `game_state`.
///
/// Legality is the move generator's job and is not re-checked here, but a move
/// from an empty square or with an opponent piece is rejected. A pawn reaching
/// the last rank without a requested promotion piece becomes a Queen; this is
/// a usability default, not a rule of chess.
pub fn apply_move(game_state: &GameState, mv: Move) -> ChessResult<GameState> {
    let details = classify_move(game_state, mv)?;
    Ok(apply_classified(game_state, mv, &details))
}

pub(crate) fn apply_classified(game_state: &GameState, mv: Move, details: &MoveDetails) -> GameState {
    let moving_color = details.moved.color;
    let mut next = game_state.clone();

    next.clear_square(mv.from);
    next.clear_square(mv.to);

    if details.kind == MoveKind::EnPassant {
        if let Some(victim) = Square::new(mv.to.file(), mv.from.rank()) {
            next.clear_square(victim);
        }
    }

    let is_promotion =
        details.moved.kind == PieceKind::Pawn && mv.to.rank() == moving_color.opposite().back_rank();
    let promotion = is_promotion.then(|| mv.promotion.unwrap_or(PieceKind::Queen));
    let placed = promotion.unwrap_or(details.moved.kind);
    next.pieces[moving_color.index()][placed.index()] |= mv.to.bit();

    if let MoveKind::Castle(side) = details.kind {
        let geo = castling_geometry(moving_color, side);
        next.pieces[moving_color.index()][PieceKind::Rook.index()] &= !geo.rook_from.bit();
        next.pieces[moving_color.index()][PieceKind::Rook.index()] |= geo.rook_to.bit();
    }

    update_castling_rights(&mut next, moving_color, mv, details.moved.kind);

    next.en_passant_square = if details.kind == MoveKind::DoublePawnPush {
        Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2)
    } else {
        None
    };

    if details.moved.kind == PieceKind::Pawn || details.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = moving_color.opposite();
    next.history.push(Move { promotion, ..mv });
    next.refresh_occupancy();

    next
}

fn update_castling_rights(game_state: &mut GameState, moving_color: Color, mv: Move, moved: PieceKind) {
    if moved == PieceKind::King {
        game_state.castling_rights &= !(castle_flag(moving_color, CastleSide::Kingside)
            | castle_flag(moving_color, CastleSide::Queenside));
    }

    // A rook leaving its home square, or anything landing on it, ends that right.
    for square in [mv.from, mv.to] {
        if let Some((color, side)) = rook_home_of(square) {
            game_state.castling_rights &= !castle_flag(color, side);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move, classify_move, MoveKind};
    use crate::errors::ChessError;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    fn mv(text: &str) -> Move {
        long_algebraic_to_move(text).expect("valid notation")
    }

    #[test]
    fn double_push_sets_en_passant_for_one_ply() {
        let game = GameState::new_game();
        let after = apply_move(&game, mv("e2e4")).expect("move should apply");
        assert_eq!(after.en_passant_square, Some(sq("e3")));
        assert_eq!(after.side_to_move, Color::Black);
        assert_eq!(after.halfmove_clock, 0);
        assert_eq!(after.fullmove_number, 1);

        let reply = apply_move(&after, mv("g8f6")).expect("move should apply");
        assert_eq!(reply.en_passant_square, None);
        assert_eq!(reply.halfmove_clock, 1);
        assert_eq!(reply.fullmove_number, 2);
    }

    #[test]
    fn en_passant_removes_pawn_beside_destination() {
        let game = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let details = classify_move(&game, mv("e5d6")).expect("classify");
        assert_eq!(details.kind, MoveKind::EnPassant);

        let after = apply_move(&game, mv("e5d6")).expect("move should apply");
        assert_eq!(after.piece_at(sq("d5")), None);
        assert_eq!(
            after.piece_at(sq("d6")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(after.get_fen(), "4k3/8/3P4/8/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").expect("FEN should parse");
        let after = apply_move(&game, mv("e1g1")).expect("castle should apply");
        assert_eq!(
            after.piece_at(sq("f1")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(after.piece_at(sq("h1")), None);
        assert_eq!(after.castling_rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
        assert_eq!(after.halfmove_clock, 4);

        let reply = apply_move(&after, mv("e8c8")).expect("castle should apply");
        assert_eq!(
            reply.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Rook, Color::Black))
        );
        assert_eq!(reply.castling_rights, 0);
        assert_eq!(reply.fullmove_number, 11);
    }

    #[test]
    fn capturing_a_home_rook_clears_its_right() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K1BR w KQkq - 0 1").expect("FEN should parse");
        let after = apply_move(&game, mv("g1a7")).expect("bishop move");
        assert!(after.can_castle(Color::Black, CastleSide::Queenside));

        let rook_trade =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let after = apply_move(&rook_trade, mv("a1a8")).expect("rook capture");
        assert!(!after.can_castle(Color::White, CastleSide::Queenside));
        assert!(!after.can_castle(Color::Black, CastleSide::Queenside));
        assert!(after.can_castle(Color::Black, CastleSide::Kingside));
        assert!(after.can_castle(Color::White, CastleSide::Kingside));
    }

    #[test]
    fn promotion_defaults_to_queen_and_is_recorded() {
        let game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 5 1").expect("FEN should parse");
        let after = apply_move(&game, mv("a7a8")).expect("promotion");
        assert_eq!(
            after.piece_at(sq("a8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert_eq!(after.history_notation(), vec!["a7a8q"]);

        let rook = apply_move(&game, mv("a7a8r")).expect("underpromotion");
        assert_eq!(
            rook.piece_at(sq("a8")),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(rook.bitboard(Color::White, PieceKind::Pawn), 0);
    }

    #[test]
    fn contract_violations_are_reported() {
        let game = GameState::new_game();
        assert_eq!(
            apply_move(&game, mv("e4e5")),
            Err(ChessError::EmptyOrigin(sq("e4")))
        );
        assert_eq!(
            apply_move(&game, mv("e7e5")),
            Err(ChessError::WrongSideToMove(sq("e7")))
        );
    }
}
