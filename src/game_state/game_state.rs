//! Core board state representation.
//!
//! `GameState` is the central model for the engine. It stores piece bitboards,
//! occupancy caches, turn/state flags, clocks, and the played-move history.
//! Positions are value types: applying a move derives a new `GameState` and
//! leaves the original untouched, so search branches never share state.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::long_algebraic::long_algebraic_to_move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Played moves, oldest first ---
    pub history: Vec<Move>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            history: Vec::new(),
        }
    }
}

impl GameState {
    /// Empty board, White to move, no rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square.bit();
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in [Color::White, Color::Black] {
            for kind in ALL_PIECE_KINDS {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(kind, color));
                }
            }
        }
        None
    }

    /// Places `piece` on `square`, replacing whatever stood there.
    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        self.clear_square(square);
        self.pieces[piece.color.index()][piece.kind.index()] |= square.bit();
        self.refresh_occupancy();
    }

    /// Removes and returns the piece on `square`.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        self.clear_square(square);
        self.refresh_occupancy();
        Some(piece)
    }

    #[inline]
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castling_rights & castle_flag(color, side) != 0
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.bitboard(color, PieceKind::King);
        (kings != 0).then(|| Square::from_lsb(kings))
    }

    /// Derives the position after `mv`. Legality is not checked here; see
    /// `apply_move` for the contract.
    #[inline]
    pub fn apply_move(&self, mv: Move) -> ChessResult<GameState> {
        apply_move(self, mv)
    }

    /// Applies a move given in coordinate notation (`"e2e4"`, `"e7e8q"`) after
    /// checking it against the legal move list. A last-rank pawn move without
    /// a promotion letter is taken as a Queen promotion.
    pub fn apply_user_move(&self, notation: &str) -> ChessResult<GameState> {
        let requested = long_algebraic_to_move(notation)?;
        let legal = LegalMoveGenerator.generate_legal_moves(self)?;
        let wanted_promotion = match requested.promotion {
            Some(kind) => Some(kind),
            None => legal
                .iter()
                .any(|g| g.mv.from == requested.from && g.mv.to == requested.to && g.mv.promotion.is_some())
                .then_some(PieceKind::Queen),
        };

        legal
            .into_iter()
            .find(|g| {
                g.mv.from == requested.from
                    && g.mv.to == requested.to
                    && g.mv.promotion == wanted_promotion
            })
            .map(|g| g.game_after_move)
            .ok_or_else(|| ChessError::IllegalMove(notation.to_owned()))
    }

    /// History rendered in coordinate notation.
    pub fn history_notation(&self) -> Vec<String> {
        self.history.iter().map(Move::to_string).collect()
    }

    /// Equality over placement, side to move, castling rights and en-passant
    /// target; clocks and history are ignored.
    pub fn same_position(&self, other: &GameState) -> bool {
        self.pieces == other.pieces
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_square == other.en_passant_square
    }

    pub(crate) fn clear_square(&mut self, square: Square) {
        let mask = !square.bit();
        for color_boards in self.pieces.iter_mut() {
            for board in color_boards.iter_mut() {
                *board &= mask;
            }
        }
    }

    pub(crate) fn refresh_occupancy(&mut self) {
        self.occupancy_by_color[Color::White.index()] = self.pieces[Color::White.index()]
            .iter()
            .fold(0u64, |acc, bb| acc | bb);
        self.occupancy_by_color[Color::Black.index()] = self.pieces[Color::Black.index()]
            .iter()
            .fold(0u64, |acc, bb| acc | bb);
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }
}
