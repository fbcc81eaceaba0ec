//! Terminal Pong: you on the left, the CPU on the right.

mod input;
mod render;

use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use game_core::{Config, Difficulty, LocalGame, Params};

use crate::render::TerminalFrontend;

#[derive(Parser, Debug)]
#[command(name = "pong", version, about = "Play Pong against the CPU in your terminal")]
struct Args {
    /// Seed for the CPU's randomness (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// CPU skill: easy, medium or hard
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Points needed to win a match
    #[arg(long, default_value_t = Params::WIN_POINTS_DEFAULT)]
    win_points: u32,

    /// Simulation ticks per second
    #[arg(long, default_value_t = Params::TICK_RATE)]
    fps: u32,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(Params::DEFAULT_SEED)
}

fn main() -> io::Result<()> {
    // Logs go to stderr; redirect it (`2>pong.log`) to keep the screen clean
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut config = Config::new();
    config.difficulty = args.difficulty;
    config.win_points_default = config.clamp_win_points(args.win_points);
    config.tick_rate = args.fps.max(1);
    config.debug_validate();

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::debug!("tick rate {} Hz", config.tick_rate);

    let mut game = LocalGame::new(config.clone(), seed);
    let mut frontend = TerminalFrontend::enter(config)?;
    let result = game.run(&mut frontend);
    // Restore the terminal before any error reaches stderr
    drop(frontend);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_flag_parses_case_insensitively() {
        let args = Args::try_parse_from(["pong", "--difficulty", "HARD"]).unwrap();
        assert_eq!(args.difficulty, Difficulty::Hard);

        let args = Args::try_parse_from(["pong"]).unwrap();
        assert_eq!(args.difficulty, Difficulty::Medium, "Defaults to medium");
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let err = Args::try_parse_from(["pong", "--difficulty", "brutal"]).unwrap_err();
        assert!(err.to_string().contains("brutal"), "Error names the bad value: {err}");
    }
}
