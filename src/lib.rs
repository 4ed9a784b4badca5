//! Crate root module declarations for the Plum chess engine.
//!
//! Exposes the subsystems (game state, move generation, search, engines, UCI
//! protocol handling and notation helpers) under stable module paths, plus a
//! flat facade of the operations a game front-end needs.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod game_status;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliding;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
}

pub mod tables {
    pub mod piece_square_tables;
}

pub mod engines {
    pub mod engine_difficulty;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod uci {
    pub mod uci_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
}

pub use engines::engine_difficulty::{find_best_move, DifficultyEngine, EngineConfig, SearchStats};
pub use errors::{ChessError, ChessResult};
pub use game_state::chess_types::{Color, Move, Piece, PieceKind, Square};
pub use game_state::game_state::GameState;
pub use move_generation::game_status::{game_status, is_check, is_checkmate, is_stalemate, GameStatus};
pub use move_generation::legal_move_generator::generate_legal_moves;
pub use search::board_scoring::evaluate;
pub use utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};
