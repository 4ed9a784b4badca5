//! Difficulty-scaled iterative-deepening engine.
//!
//! Difficulty picks the search depth and how often the engine deliberately
//! plays a random move instead of the searched one:
//! - difficulty 1: 30% chance to skip search and play any legal move;
//! - difficulty 2 and below: after search, 20% chance to swap the best move
//!   for a different random legal move.
//!
//! The random source is injected so games replay exactly from a seed.

use std::time::Duration;

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::time_management::{resolve_time_budget, TimeManagementStrategy};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::search::board_scoring::PositionalScorer;
use crate::search::iterative_deepening::{iterative_deepening_search, SearchConfig};

pub const DEFAULT_DIFFICULTY: u8 = 3;
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(5);

/// Deepest search any difficulty level asks for.
pub const MAX_DIFFICULTY_DEPTH: u8 = 6;

const SKIP_SEARCH_PROBABILITY: f64 = 0.3;
const SWAP_BEST_PROBABILITY: f64 = 0.2;

/// Maximum search depth in plies for a difficulty level.
pub fn depth_for_difficulty(difficulty: u8) -> u8 {
    match difficulty {
        1 => 2,
        2 => 3,
        3 => 4,
        4 => 5,
        5 => MAX_DIFFICULTY_DEPTH,
        other => {
            log::warn!("unknown difficulty {other}, searching to depth 4");
            4
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub difficulty: u8,
    pub time_budget: Duration,
    /// Seed for move randomization; entropy-seeded when `None`.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            time_budget: DEFAULT_TIME_BUDGET,
            seed: None,
        }
    }
}

/// What the last `find_best_move` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub depth_reached: u8,
    pub elapsed: Duration,
    /// White-relative score of the searched best move.
    pub best_score: i32,
    /// The returned move was picked at random rather than by search.
    pub randomized: bool,
}

/// Picks a move for the side to move, or `None` when it has no legal move.
pub fn find_best_move<R: Rng + ?Sized>(
    position: &GameState,
    difficulty: u8,
    time_budget_secs: f64,
    rng: &mut R,
) -> ChessResult<Option<Move>> {
    let budget = Duration::try_from_secs_f64(time_budget_secs.max(0.0)).unwrap_or(Duration::MAX);
    select_move(position, difficulty, None, Some(budget), rng).map(|(mv, _)| mv)
}

fn select_move<R: Rng + ?Sized>(
    position: &GameState,
    difficulty: u8,
    depth_override: Option<u8>,
    time_budget: Option<Duration>,
    rng: &mut R,
) -> ChessResult<(Option<Move>, SearchStats)> {
    let legal = LegalMoveGenerator.generate_legal_moves(position)?;
    let mut stats = SearchStats::default();

    match legal.as_slice() {
        [] => return Ok((None, stats)),
        [only] => return Ok((Some(only.mv), stats)),
        _ => {}
    }

    if difficulty == 1 && rng.random_bool(SKIP_SEARCH_PROBABILITY) {
        let picked = random_move(&legal, None, rng);
        log::debug!("difficulty 1: playing random move {picked:?} without search");
        stats.randomized = true;
        return Ok((picked, stats));
    }

    let config = SearchConfig {
        max_depth: depth_override.unwrap_or_else(|| depth_for_difficulty(difficulty)),
        time_budget,
        ..SearchConfig::default()
    };
    let result = iterative_deepening_search(position, &LegalMoveGenerator, &PositionalScorer, config)?;
    stats.nodes = result.nodes;
    stats.depth_reached = result.reached_depth;
    stats.elapsed = result.elapsed;
    stats.best_score = result.best_score;

    let mut chosen = result.best_move;
    if difficulty <= 2 && rng.random_bool(SWAP_BEST_PROBABILITY) {
        if let Some(other) = random_move(&legal, chosen, rng) {
            log::debug!("difficulty {difficulty}: replacing {chosen:?} with random move {other}");
            chosen = Some(other);
            stats.randomized = true;
        }
    }

    log::info!(
        "best move {} depth {} score {} nodes {} in {}ms",
        chosen.map_or_else(|| "none".to_owned(), |m| m.to_string()),
        stats.depth_reached,
        stats.best_score,
        stats.nodes,
        stats.elapsed.as_millis()
    );

    Ok((chosen, stats))
}

fn random_move<R: Rng + ?Sized>(legal: &[GeneratedMove], excluding: Option<Move>, rng: &mut R) -> Option<Move> {
    let candidates: Vec<Move> = legal
        .iter()
        .map(|g| g.mv)
        .filter(|&mv| Some(mv) != excluding)
        .collect();
    candidates.choose(rng).copied()
}

pub struct DifficultyEngine {
    config: EngineConfig,
    rng: StdRng,
    time_strategy: TimeManagementStrategy,
    last_stats: Option<SearchStats>,
}

impl DifficultyEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rng: seeded_rng(config.seed),
            time_strategy: TimeManagementStrategy::default(),
            last_stats: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.config.difficulty = difficulty;
    }

    pub fn set_time_limit(&mut self, time_budget: Duration) {
        self.config.time_budget = time_budget;
    }

    /// Reseeds the move randomizer.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.config.seed = seed;
        self.rng = seeded_rng(seed);
    }

    pub fn set_time_strategy(&mut self, strategy: TimeManagementStrategy) {
        self.time_strategy = strategy;
    }

    pub fn find_best_move(&mut self, position: &GameState) -> ChessResult<Option<Move>> {
        self.find_best_move_with(position, None, Some(self.config.time_budget))
    }

    /// Statistics of the most recent search, if any.
    pub fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats
    }

    fn find_best_move_with(
        &mut self,
        position: &GameState,
        depth_override: Option<u8>,
        time_budget: Option<Duration>,
    ) -> ChessResult<Option<Move>> {
        let (mv, stats) = select_move(position, self.config.difficulty, depth_override, time_budget, &mut self.rng)?;
        self.last_stats = Some(stats);
        Ok(mv)
    }
}

impl Default for DifficultyEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn invalid_option(name: &str, value: &str) -> ChessError {
    ChessError::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

impl Engine for DifficultyEngine {
    fn name(&self) -> &str {
        "Plum Engine"
    }

    fn author(&self) -> &str {
        "plum_engine contributors"
    }

    fn new_game(&mut self) {
        self.last_stats = None;
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        let value = value.trim();
        if name.eq_ignore_ascii_case("Difficulty") {
            let difficulty = value
                .parse::<u8>()
                .ok()
                .filter(|d| (1..=5).contains(d))
                .ok_or_else(|| invalid_option(name, value))?;
            self.set_difficulty(difficulty);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Seed") {
            let seed = match value {
                "" | "none" | "random" => None,
                text => Some(text.parse::<u64>().map_err(|_| invalid_option(name, value))?),
            };
            self.set_seed(seed);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("TimeStrategy") {
            let strategy = match value.to_ascii_lowercase().as_str() {
                "adaptive" => TimeManagementStrategy::Adaptive,
                "fraction20" => TimeManagementStrategy::Fraction20,
                _ => return Err(invalid_option(name, value)),
            };
            self.set_time_strategy(strategy);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("MoveTime") {
            let ms = value.parse::<u64>().map_err(|_| invalid_option(name, value))?;
            self.set_time_limit(Duration::from_millis(ms.max(1)));
            return Ok(());
        }
        Err(invalid_option(name, value))
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> ChessResult<EngineOutput> {
        let time_budget = match resolve_time_budget(game_state, params, self.time_strategy) {
            Some(budget) => Some(budget),
            // A bare `go depth N` within the difficulty range runs unclocked.
            None if params.depth.is_some_and(|d| d <= MAX_DIFFICULTY_DEPTH) => None,
            None => Some(self.config.time_budget),
        };
        let depth_override = params.depth.map(|d| d.max(1));

        let best_move = self.find_best_move_with(game_state, depth_override, time_budget)?;

        let mut out = EngineOutput {
            best_move,
            info_lines: Vec::new(),
        };
        if let Some(stats) = self.last_stats {
            // UCI reports scores from the mover's point of view.
            let side_relative = match game_state.side_to_move {
                Color::White => stats.best_score,
                Color::Black => -stats.best_score,
            };
            out.info_lines.push(format!(
                "info depth {} score cp {} nodes {} time {}",
                stats.depth_reached,
                side_relative,
                stats.nodes,
                stats.elapsed.as_millis()
            ));
            out.info_lines.push(format!(
                "info string difficulty {} randomized {}",
                self.config.difficulty, stats.randomized
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{depth_for_difficulty, find_best_move, DifficultyEngine, EngineConfig};
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::errors::ChessError;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_generator::generate_legal_moves;

    fn engine(difficulty: u8, seed: u64) -> DifficultyEngine {
        DifficultyEngine::new(EngineConfig {
            difficulty,
            time_budget: Duration::from_secs(30),
            seed: Some(seed),
        })
    }

    #[test]
    fn difficulty_table_matches_levels() {
        let table: Vec<u8> = (1..=5).map(depth_for_difficulty).collect();
        assert_eq!(table, vec![2, 3, 4, 5, 6]);
        assert_eq!(depth_for_difficulty(0), 4);
        assert_eq!(depth_for_difficulty(9), 4);
    }

    #[test]
    fn single_legal_move_is_returned_without_search() {
        // The g8 rook covers g1 and g2, leaving Kh2 as the only move.
        let game = GameState::from_fen("6rk/8/8/8/8/8/8/7K w - - 0 1").expect("FEN should parse");
        let legal = generate_legal_moves(&game).expect("generation should succeed");
        assert_eq!(legal.len(), 1);

        let mut engine = engine(5, 1);
        let mv = engine.find_best_move(&game).expect("search should run");
        assert_eq!(mv, Some(legal[0].mv));
        let stats = engine.last_stats().expect("stats recorded");
        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.depth_reached, 0);
    }

    #[test]
    fn no_legal_move_yields_none() {
        let mated = GameState::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 1 1").expect("FEN should parse");
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(find_best_move(&mated, 3, 1.0, &mut rng), Ok(None));
    }

    #[test]
    fn strong_difficulty_finds_mate_and_reports_stats() {
        let game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1").expect("FEN should parse");
        let mut engine = engine(3, 7);
        let mv = engine.find_best_move(&game).expect("search should run");
        assert_eq!(mv.map(|m| m.to_string()), Some("d1d8".to_owned()));

        let stats = engine.last_stats().expect("stats recorded");
        assert_eq!(stats.depth_reached, 4);
        assert!(stats.nodes > 0);
        assert!(!stats.randomized);
    }

    #[test]
    fn same_seed_replays_same_choices() {
        let game = GameState::new_game();
        let mut first = engine(1, 42);
        let mut second = engine(1, 42);
        for _ in 0..5 {
            assert_eq!(
                first.find_best_move(&game).expect("search should run"),
                second.find_best_move(&game).expect("search should run")
            );
        }
    }

    #[test]
    fn weak_difficulty_sometimes_plays_random_moves() {
        let game = GameState::new_game();
        let mut engine = engine(1, 11);
        let randomized = (0..40)
            .filter(|_| {
                engine.find_best_move(&game).expect("search should run");
                engine.last_stats().is_some_and(|s| s.randomized)
            })
            .count();
        // Expected rate is 0.3 + 0.7 * 0.2 = 44%.
        assert!(randomized > 0 && randomized < 40, "{randomized} of 40 randomized");
    }

    #[test]
    fn strong_difficulty_never_randomizes() {
        let game = GameState::new_game();
        let mut engine = engine(3, 5);
        for _ in 0..3 {
            engine
                .choose_move(
                    &game,
                    &GoParams {
                        depth: Some(2),
                        ..GoParams::default()
                    },
                )
                .expect("search should run");
            assert!(!engine.last_stats().expect("stats recorded").randomized);
        }
    }

    #[test]
    fn go_depth_overrides_difficulty_depth() {
        let game = GameState::new_game();
        let mut engine = engine(5, 9);
        let out = engine
            .choose_move(
                &game,
                &GoParams {
                    depth: Some(1),
                    ..GoParams::default()
                },
            )
            .expect("search should run");
        assert!(out.best_move.is_some());
        assert!(out.info_lines[0].starts_with("info depth 1 "), "{:?}", out.info_lines);
    }

    #[test]
    fn unbounded_time_budget_still_searches() {
        let game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1").expect("FEN should parse");
        for budget in [f64::INFINITY, f64::MAX, 1e30] {
            let mut rng = StdRng::seed_from_u64(8);
            let mv = find_best_move(&game, 3, budget, &mut rng).expect("search should run");
            assert_eq!(mv.map(|m| m.to_string()), Some("d1d8".to_owned()));
        }
        let mut rng = StdRng::seed_from_u64(8);
        let nan = find_best_move(&game, 3, f64::NAN, &mut rng).expect("search should run");
        assert!(nan.is_some());
    }

    #[test]
    fn deep_go_depth_without_clock_uses_configured_budget() {
        let game = GameState::new_game();
        let mut engine = DifficultyEngine::new(EngineConfig {
            difficulty: 3,
            time_budget: Duration::from_millis(200),
            seed: Some(4),
        });
        let out = engine
            .choose_move(
                &game,
                &GoParams {
                    depth: Some(u8::MAX),
                    ..GoParams::default()
                },
            )
            .expect("search should run");
        assert!(out.best_move.is_some());
        let stats = engine.last_stats().expect("stats recorded");
        assert!(stats.depth_reached < u8::MAX);
        assert!(stats.elapsed < Duration::from_secs(30), "{:?}", stats.elapsed);
    }

    #[test]
    fn options_update_config() {
        let mut engine = DifficultyEngine::default();
        engine.set_option("Difficulty", "5").expect("valid difficulty");
        engine.set_option("seed", "123").expect("valid seed");
        engine.set_option("MoveTime", "1500").expect("valid move time");
        assert_eq!(engine.config().difficulty, 5);
        assert_eq!(engine.config().seed, Some(123));
        assert_eq!(engine.config().time_budget, Duration::from_millis(1500));
        engine.set_option("TimeStrategy", "fraction20").expect("valid strategy");

        assert!(matches!(
            engine.set_option("Difficulty", "9"),
            Err(ChessError::InvalidOption { .. })
        ));
        assert!(engine.set_option("Hash", "64").is_err());
    }
}
