use crate::{PaddleCommand, Side};

/// Time resource: the delta handed to every system this step
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,
}

impl Time {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self { dt: 1.0 / 60.0 }
    }
}

/// Who won a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player,
    Cpu,
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u32,
    pub cpu: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_player(&mut self) {
        self.player += 1;
    }

    pub fn increment_cpu(&mut self) {
        self.cpu += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Player is checked first, so a tie at the threshold goes to the player
    pub fn winner(&self, win_points: u32) -> Option<Winner> {
        if self.player >= win_points {
            Some(Winner::Player)
        } else if self.cpu >= win_points {
            Some(Winner::Cpu)
        } else {
            None
        }
    }
}

/// Final score of a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub score: Score,
    pub winner: Winner,
}

impl MatchResult {
    pub fn player_won(&self) -> bool {
        self.winner == Winner::Player
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(crate::Params::DEFAULT_SEED)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub player_scored: bool,
    pub cpu_scored: bool,
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.player_scored = false;
        self.cpu_scored = false;
        self.ball_hit_paddle = false;
        self.ball_hit_wall = false;
    }

    pub fn goal(&self) -> bool {
        self.player_scored || self.cpu_scored
    }
}

/// Pending paddle commands from the input adapter
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pub commands: Vec<(Side, PaddleCommand)>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, side: Side, command: PaddleCommand) {
        self.commands.push((side, command));
    }
}
