use std::io::Write;
use std::time::Duration;

use clap::Parser;

use plum_engine::engines::engine_difficulty::{EngineConfig, DEFAULT_DIFFICULTY};
use plum_engine::uci::uci_top::run_stdio_loop;

#[derive(Parser, Debug)]
#[command(author, version, about = "UCI chess engine with difficulty levels", long_about = None)]
struct Args {
    /// Difficulty level from 1 (weakest) to 5
    #[arg(long, default_value_t = DEFAULT_DIFFICULTY, value_parser = clap::value_parser!(u8).range(1..=5))]
    difficulty: u8,

    /// Seconds to think per move when the GUI sends no clock
    #[arg(long, default_value_t = 5.0)]
    time: f64,

    /// Seed for move randomization, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
        .write_style(env_logger::WriteStyle::Never)
        // stdout carries the UCI stream.
        .target(env_logger::Target::Stderr)
        .init();

    let time_budget = Duration::try_from_secs_f64(args.time.max(0.001)).unwrap_or(Duration::from_secs(5));
    let config = EngineConfig {
        difficulty: args.difficulty,
        time_budget,
        seed: args.seed,
    };
    log::debug!("starting with {config:?}");

    if let Err(e) = run_stdio_loop(config) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
