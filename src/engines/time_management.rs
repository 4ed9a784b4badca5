//! Time-management strategies for per-move budgeting.
//!
//! UCI passes raw clock data (`wtime/btime/winc/binc/movetime`) and the engine
//! decides the final per-move allocation based on strategy.

use std::time::Duration;

use crate::engines::engine_trait::GoParams;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeManagementStrategy {
    /// Spend 1/20th of the remaining clock.
    Fraction20,
    /// Clock, increment, moves-to-go and game stage.
    #[default]
    Adaptive,
}

/// Per-move budget from the `go` parameters, or `None` when they carry no
/// time information.
pub fn resolve_time_budget(
    game_state: &GameState,
    params: &GoParams,
    strategy: TimeManagementStrategy,
) -> Option<Duration> {
    if let Some(movetime) = params.movetime_ms {
        return Some(Duration::from_millis(movetime.max(1)));
    }

    let (remaining, increment) = match game_state.side_to_move {
        Color::White => (params.wtime_ms?, params.winc_ms),
        Color::Black => (params.btime_ms?, params.binc_ms),
    };

    let budget_ms = match strategy {
        TimeManagementStrategy::Fraction20 => (remaining / 20).max(1),
        TimeManagementStrategy::Adaptive => {
            adaptive_budget_ms(game_state, remaining, increment, params.movestogo)
        }
    };
    Some(Duration::from_millis(budget_ms))
}

fn adaptive_budget_ms(
    game_state: &GameState,
    remaining_ms: u64,
    inc_ms: Option<u64>,
    movestogo: Option<u16>,
) -> u64 {
    let ply = u64::from(game_state.fullmove_number.saturating_sub(1)) * 2
        + u64::from(game_state.side_to_move == Color::Black);
    let expected_moves_left = if let Some(mtg) = movestogo {
        u64::from(mtg.max(1))
    } else if ply < 20 {
        40
    } else if ply < 60 {
        28
    } else {
        18
    };

    let reserve = (remaining_ms / 25).max(100).min(remaining_ms.saturating_sub(1));
    let usable = remaining_ms.saturating_sub(reserve);
    let base = usable / expected_moves_left;
    let inc_bonus = inc_ms.unwrap_or(0).saturating_mul(3) / 4;
    let panic = if remaining_ms < 2_000 {
        remaining_ms / 12
    } else {
        0
    };
    let target = base.saturating_add(inc_bonus).saturating_add(panic);

    let min_budget = if remaining_ms < 1_000 { 5 } else { 15 };
    let max_budget = (remaining_ms / 4).max(1);
    target.clamp(min_budget.min(max_budget), max_budget).max(1)
}
