//! Iterative deepening search with minimax alpha-beta pruning.
//!
//! White nodes maximize and Black nodes minimize a White-relative score.
//! Depths run from 1 up to the configured maximum; the result of the deepest
//! completed depth is kept. Two time checks apply when a budget is set:
//! - after each completed depth, stop once a fraction of the budget is spent;
//! - inside a depth above 1, every `node_check_interval` nodes, abandon the
//!   depth once the whole budget is spent.
//!
//! Depth 1 is never abandoned, so a move is always available when one exists.

use std::time::{Duration, Instant};

use crate::errors::ChessResult;
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};
use crate::search::move_ordering::order_moves;

const SCORE_INFINITY: i32 = MATE_SCORE + 1;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub time_budget: Option<Duration>,
    /// Share of `time_budget` after which no new depth is started.
    pub soft_stop_fraction: f64,
    /// Nodes between deadline checks inside a depth.
    pub node_check_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            time_budget: None,
            soft_stop_fraction: 0.8,
            node_check_interval: 2048,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// White-relative score of `best_move` at `reached_depth`.
    pub best_score: i32,
    pub reached_depth: u8,
    /// Nodes visited across every depth, including an abandoned one.
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Score of a side-to-move with no legal move: mated or stalemated.
/// Nearer mates score further from zero.
pub fn terminal_score(game_state: &GameState, ply: u8) -> ChessResult<i32> {
    if !is_in_check(game_state)? {
        return Ok(0);
    }
    let mate = MATE_SCORE - i32::from(ply);
    Ok(match game_state.side_to_move {
        Color::White => -mate,
        Color::Black => mate,
    })
}

pub fn iterative_deepening_search<G: MoveGenerator, S: BoardScorer>(
    game_state: &GameState,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
) -> ChessResult<SearchResult> {
    let started_at = Instant::now();

    if config.max_depth == 0 {
        return Ok(SearchResult {
            best_move: None,
            best_score: scorer.score(game_state),
            reached_depth: 0,
            nodes: 1,
            elapsed: started_at.elapsed(),
        });
    }

    let mut search = Search {
        generator,
        scorer,
        nodes: 0,
        // A budget too large to represent as an instant means no deadline.
        deadline: config.time_budget.and_then(|budget| started_at.checked_add(budget)),
        node_check_interval: config.node_check_interval.max(1),
        abortable: false,
    };
    let mut result = SearchResult::default();

    for depth in 1..=config.max_depth {
        search.abortable = depth > 1;

        let Some((best_move, best_score)) = search.root(game_state, depth)? else {
            log::debug!("depth {depth} abandoned at deadline after {} nodes", search.nodes);
            break;
        };

        result.best_move = best_move;
        result.best_score = best_score;
        result.reached_depth = depth;

        let elapsed = started_at.elapsed();
        log::debug!(
            "depth {depth} score {best_score} nodes {} time {}ms best {}",
            search.nodes,
            elapsed.as_millis(),
            best_move.map_or_else(|| "none".to_owned(), |m| m.to_string())
        );

        if best_move.is_none() {
            break;
        }
        if let Some(budget) = config.time_budget {
            if elapsed.as_secs_f64() >= budget.as_secs_f64() * config.soft_stop_fraction {
                break;
            }
        }
    }

    result.nodes = search.nodes;
    result.elapsed = started_at.elapsed();
    Ok(result)
}

struct Search<'a, G: MoveGenerator, S: BoardScorer> {
    generator: &'a G,
    scorer: &'a S,
    nodes: u64,
    deadline: Option<Instant>,
    node_check_interval: u64,
    abortable: bool,
}

impl<G: MoveGenerator, S: BoardScorer> Search<'_, G, S> {
    fn out_of_time(&self) -> bool {
        if !self.abortable || self.nodes % self.node_check_interval != 0 {
            return false;
        }
        self.deadline.is_some_and(|limit| Instant::now() >= limit)
    }

    /// `None` when the depth was abandoned at the deadline.
    fn root(&mut self, game_state: &GameState, depth: u8) -> ChessResult<Option<(Option<Move>, i32)>> {
        self.nodes += 1;
        let mut moves = self.generator.generate_legal_moves(game_state)?;
        if moves.is_empty() {
            return Ok(Some((None, terminal_score(game_state, 0)?)));
        }
        order_moves(&mut moves);

        let maximizing = game_state.side_to_move == Color::White;
        let mut alpha = -SCORE_INFINITY;
        let mut beta = SCORE_INFINITY;
        let mut best_move = None;
        let mut best_score = if maximizing { -SCORE_INFINITY } else { SCORE_INFINITY };

        for generated in &moves {
            let Some(score) = self.minimax(&generated.game_after_move, depth - 1, alpha, beta, 1)? else {
                return Ok(None);
            };

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(generated.mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(generated.mv);
                }
                beta = beta.min(score);
            }
        }

        Ok(Some((best_move, best_score)))
    }

    fn minimax(
        &mut self,
        game_state: &GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        ply: u8,
    ) -> ChessResult<Option<i32>> {
        self.nodes += 1;
        if self.out_of_time() {
            return Ok(None);
        }

        if depth == 0 {
            // Terminal positions must dominate material even at the horizon.
            if !self.generator.has_legal_move(game_state)? {
                return terminal_score(game_state, ply).map(Some);
            }
            return Ok(Some(self.scorer.score(game_state)));
        }

        let mut moves = self.generator.generate_legal_moves(game_state)?;
        if moves.is_empty() {
            return terminal_score(game_state, ply).map(Some);
        }
        order_moves(&mut moves);

        if game_state.side_to_move == Color::White {
            let mut best = -SCORE_INFINITY;
            for generated in &moves {
                let Some(score) = self.minimax(&generated.game_after_move, depth - 1, alpha, beta, ply + 1)? else {
                    return Ok(None);
                };
                best = best.max(score);
                alpha = alpha.max(score);
                if alpha >= beta {
                    break;
                }
            }
            Ok(Some(best))
        } else {
            let mut best = SCORE_INFINITY;
            for generated in &moves {
                let Some(score) = self.minimax(&generated.game_after_move, depth - 1, alpha, beta, ply + 1)? else {
                    return Ok(None);
                };
                best = best.min(score);
                beta = beta.min(score);
                if alpha >= beta {
                    break;
                }
            }
            Ok(Some(best))
        }
    }
}
