use std::str::FromStr;

use glam::Vec2;

use crate::{Params, Side};

/// AI difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Continuous difficulty level in 0..1
    pub fn level(&self) -> f32 {
        match self {
            Difficulty::Easy => Params::AI_EASY,
            Difficulty::Medium => Params::AI_MEDIUM,
            Difficulty::Hard => Params::AI_HARD,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub screen_width: f32,
    pub screen_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_margin: f32,
    pub ball_size: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_min: f32,
    pub ball_speed_max: f32,
    pub ball_speed_increase: f32,
    pub ball_spin_max: f32,
    pub ball_reposition_gap: f32,
    pub win_points_default: u32,
    pub win_points_min: u32,
    pub win_points_max: u32,
    pub difficulty: Difficulty,
    pub tick_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: Params::SCREEN_WIDTH,
            screen_height: Params::SCREEN_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_margin: Params::PADDLE_MARGIN,
            ball_size: Params::BALL_SIZE,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_min: Params::BALL_SPEED_MIN,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_speed_increase: Params::BALL_SPEED_INCREASE,
            ball_spin_max: Params::BALL_SPIN_MAX,
            ball_reposition_gap: Params::BALL_REPOSITION_GAP,
            win_points_default: Params::WIN_POINTS_DEFAULT,
            win_points_min: Params::WIN_POINTS_MIN,
            win_points_max: Params::WIN_POINTS_MAX,
            difficulty: Difficulty::default(),
            tick_rate: Params::TICK_RATE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get X position (left edge) for a paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_margin,
            Side::Right => self.screen_width - self.paddle_margin - self.paddle_width,
        }
    }

    /// Top edge of a vertically centred paddle
    pub fn paddle_spawn_y(&self) -> f32 {
        (self.screen_height - self.paddle_height) / 2.0
    }

    /// Ball reset anchor (top-left corner at screen centre)
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    /// Vertical travel range of a paddle's top edge
    pub fn paddle_bounds(&self) -> (f32, f32) {
        (0.0, self.screen_height - self.paddle_height)
    }

    /// Clamp paddle Y to arena bounds
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        let (min, max) = self.paddle_bounds();
        y.clamp(min, max)
    }

    pub fn clamp_win_points(&self, points: u32) -> u32 {
        points.clamp(self.win_points_min, self.win_points_max)
    }

    /// Parse win points typed into a text widget.
    ///
    /// Empty or malformed input falls back to the minimum instead of failing.
    pub fn parse_win_points(&self, text: &str) -> u32 {
        match text.trim().parse::<u64>() {
            Ok(points) => {
                let points = points.min(u32::MAX as u64) as u32;
                self.clamp_win_points(points)
            }
            Err(_) => self.win_points_min,
        }
    }

    /// Nominal simulation step for the configured tick rate
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Debug-build sanity checks on dimensions
    pub fn debug_validate(&self) {
        debug_assert!(self.screen_width > 0.0 && self.screen_height > 0.0);
        debug_assert!(self.paddle_width > 0.0 && self.paddle_height > 0.0);
        debug_assert!(self.paddle_height < self.screen_height);
        debug_assert!(self.ball_size > 0.0);
        debug_assert!(self.ball_speed_min <= self.ball_speed_max);
        debug_assert!(self.win_points_min <= self.win_points_max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paddle_x() {
        let config = Config::new();
        assert_eq!(config.paddle_x(Side::Left), 30.0, "Left paddle X position");
        assert_eq!(
            config.paddle_x(Side::Right),
            1280.0 - 30.0 - 20.0,
            "Right paddle X position"
        );
    }

    #[test]
    fn test_config_clamp_paddle_y() {
        let config = Config::new();
        let (_, max) = config.paddle_bounds();
        assert_eq!(config.clamp_paddle_y(-10.0), 0.0);
        assert_eq!(config.clamp_paddle_y(10_000.0), max);
        assert_eq!(config.clamp_paddle_y(300.0), 300.0);
    }

    #[test]
    fn test_win_points_clamp() {
        let config = Config::new();
        assert_eq!(config.clamp_win_points(0), 1, "0 clamps to minimum");
        assert_eq!(config.clamp_win_points(1000), 50, "1000 clamps to maximum");
        assert_eq!(config.clamp_win_points(7), 7);
    }

    #[test]
    fn test_parse_win_points() {
        let config = Config::new();
        assert_eq!(config.parse_win_points("12"), 12);
        assert_eq!(config.parse_win_points(" 3 "), 3);
        assert_eq!(config.parse_win_points(""), 1, "Empty input defaults to minimum");
        assert_eq!(config.parse_win_points("abc"), 1, "Malformed input defaults to minimum");
        assert_eq!(config.parse_win_points("999"), 50);
        assert_eq!(config.parse_win_points("99999999999999"), 50);
    }

    #[test]
    fn test_difficulty_levels() {
        assert_eq!(Difficulty::Easy.level(), 0.6);
        assert_eq!(Difficulty::Medium.level(), 0.8);
        assert_eq!(Difficulty::Hard.level(), 0.95);
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("med".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(
            "nope".parse::<Difficulty>(),
            Err(UnknownDifficulty("nope".to_string()))
        );
    }

    #[test]
    fn test_spawn_positions() {
        let config = Config::new();
        assert_eq!(config.paddle_spawn_y(), 310.0);
        assert_eq!(config.ball_spawn(), Vec2::new(640.0, 360.0));
    }
}
