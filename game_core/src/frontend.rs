//! Boundary between the simulation and whatever draws it and reads devices.
//!
//! A frontend turns raw key presses or widget clicks into [`Intent`]s and
//! draws a [`RenderFrame`]. Nothing device-specific crosses this line.

use glam::Vec2;

use crate::{Aabb, Difficulty, Events, GameState, MatchResult, Score, Side};

/// Commands a frontend can send to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    // Player paddle
    MoveUp,
    MoveDown,
    Stop,
    // Flow
    Start(u32),
    OpenSettings,
    SetDifficulty(Difficulty),
    SetWinPoints(u32),
    Pause,
    Resume,
    Continue,
    ReturnToMenu,
    PlayAgain,
    Quit,
}

/// Ball geometry for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub center: Vec2,
    pub radius: f32,
}

/// Everything a frontend needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub state: GameState,
    pub ball: Option<BallView>,
    pub paddles: Vec<(Side, Aabb)>, // player first
    pub score: Score,
    pub win_points: u32,
    pub difficulty: Difficulty,
    /// Final result, set while in GameOver
    pub result: Option<MatchResult>,
    /// Set while the "you scored" pause is showing
    pub player_scored: bool,
    pub events: Events,
    pub screen: Vec2,
}

pub trait Frontend {
    type Error;

    /// Append the intents gathered since the last call
    fn poll_intents(&mut self, intents: &mut Vec<Intent>) -> Result<(), Self::Error>;

    fn render(&mut self, frame: &RenderFrame) -> Result<(), Self::Error>;
}
