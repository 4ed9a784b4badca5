//! FEN-to-GameState parser.
//!
//! Builds a fully-populated state from a Forsyth-Edwards Notation string,
//! including piece bitboards, rights, clocks, and occupancies. Records that
//! break the one-king-per-colour invariant, or leave the side not to move in
//! check, are rejected.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| fen_error("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| fen_error("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| fen_error("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| fen_error("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| fen_error("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| fen_error("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(fen_error("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| fen_error(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| fen_error(format!("invalid fullmove number: {fullmove_part}")))?;

    game_state.refresh_occupancy();
    validate(&game_state)?;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(fen_error("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(fen_error(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(fen_error("board rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| fen_error(format!("invalid piece character '{ch}'")))?;
            let square = Square::new(file, board_rank)
                .ok_or_else(|| fen_error("board rank has too many files"))?;

            game_state.pieces[piece.color.index()][piece.kind.index()] |= square.bit();
            file += 1;
        }

        if file != 8 {
            return Err(fen_error("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(fen_error(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(fen_error(format!("invalid castling rights character: {ch}"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| fen_error(format!("invalid en-passant square: {en_passant_part}")))?;
    if square.rank() != 2 && square.rank() != 5 {
        return Err(fen_error(format!(
            "en-passant square must be on rank 3 or 6: {en_passant_part}"
        )));
    }

    Ok(Some(square))
}

fn validate(game_state: &GameState) -> ChessResult<()> {
    for color in [Color::White, Color::Black] {
        let kings = game_state.bitboard(color, PieceKind::King).count_ones();
        if kings != 1 {
            return Err(fen_error(format!("expected one {color:?} king, found {kings}")));
        }
    }

    if let Some(target) = game_state.en_passant_square {
        validate_en_passant(game_state, target)?;
    }

    let resting = game_state.side_to_move.opposite();
    if let Some(king_sq) = game_state.king_square(resting) {
        if is_square_attacked(game_state, king_sq, game_state.side_to_move) {
            return Err(fen_error("side not to move is in check"));
        }
    }

    Ok(())
}

/// The target must be the empty square a double-pushed enemy pawn just
/// crossed, on the rank matching the side to move.
fn validate_en_passant(game_state: &GameState, target: Square) -> ChessResult<()> {
    let mover = game_state.side_to_move;
    let pushed = mover.opposite();
    let expected_rank = match mover {
        Color::White => 5,
        Color::Black => 2,
    };
    if target.rank() != expected_rank {
        return Err(fen_error(format!("en-passant square {target} does not match side to move")));
    }
    if game_state.occupancy_all & target.bit() != 0 {
        return Err(fen_error(format!("en-passant square {target} is occupied")));
    }
    let pawn_has_passed = target
        .offset(0, -mover.forward())
        .is_some_and(|sq| game_state.bitboard(pushed, PieceKind::Pawn) & sq.bit() != 0);
    if !pawn_has_passed {
        return Err(fen_error(format!("no pawn stands beyond en-passant square {target}")));
    }
    Ok(())
}

fn fen_error(reason: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(reason.into())
}
