//! CPU opponent
//!
//! The controller is deliberately beatable: it only tracks the ball some of
//! the time, reacts late, aims with a large random error and idles inside a
//! wide dead zone. Difficulty changes how quickly and how often it decides to
//! track, never how precisely.

use hecs::World;
use rand::Rng;

use crate::{Body, Config, Difficulty, Kind, PaddleCommand, Params, Side, Time};

/// Discrete behaviour the controller is currently following
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiAction {
    #[default]
    Idle,
    MoveUp,
    MoveDown,
    Track,
}

/// Choices made while the ball is coming toward the AI and it decides not to track
const REACT_CHOICES: [AiAction; 3] = [AiAction::MoveUp, AiAction::MoveDown, AiAction::Idle];

/// Idle-heavy choices for wandering and for when the ball is moving away
const WANDER_CHOICES: [AiAction; 5] = [
    AiAction::MoveUp,
    AiAction::MoveDown,
    AiAction::Idle,
    AiAction::Idle,
    AiAction::Idle,
];

/// Timing and probability table for one difficulty band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiProfile {
    pub track_chance: f64,
    pub reaction_delay: f32,
    pub random_move_duration: f32,
}

impl AiProfile {
    /// Map a continuous difficulty level onto its band
    pub fn for_level(level: f32) -> Self {
        if level <= Params::AI_EASY {
            Self {
                track_chance: 0.2,
                reaction_delay: 0.7,
                random_move_duration: 1.0,
            }
        } else if level <= Params::AI_MEDIUM {
            Self {
                track_chance: 0.35,
                reaction_delay: 0.5,
                random_move_duration: 0.7,
            }
        } else {
            Self {
                track_chance: 0.55,
                reaction_delay: 0.3,
                random_move_duration: 0.4,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AiController {
    level: f32,
    profile: AiProfile,
    reaction_timer: f32,
    random_move_timer: f32,
    action: AiAction,
}

impl AiController {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_level(difficulty.level())
    }

    pub fn with_level(level: f32) -> Self {
        Self {
            level,
            profile: AiProfile::for_level(level),
            reaction_timer: 0.0,
            random_move_timer: 0.0,
            action: AiAction::Idle,
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn profile(&self) -> AiProfile {
        self.profile
    }

    pub fn action(&self) -> AiAction {
        self.action
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.set_level(difficulty.level());
    }

    pub fn set_level(&mut self, level: f32) {
        self.level = level;
        self.profile = AiProfile::for_level(level);
    }

    /// Forget timers and current action, e.g. when a new match starts
    pub fn reset(&mut self) {
        self.reaction_timer = 0.0;
        self.random_move_timer = 0.0;
        self.action = AiAction::Idle;
    }

    /// Advance the timers by `dt` and return the command for the AI paddle
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        paddle: &Body,
        ball: &Body,
        dt: f32,
        rng: &mut R,
    ) -> PaddleCommand {
        self.reaction_timer -= dt;
        self.random_move_timer -= dt;

        if self.reaction_timer <= 0.0 {
            self.reaction_timer = self.profile.reaction_delay;
            self.decide(ball, rng);
        }

        if self.random_move_timer <= 0.0 && rng.gen_bool(Params::AI_WANDER_CHANGE_CHANCE) {
            self.action = pick(&WANDER_CHOICES, rng);
            self.random_move_timer = self.profile.random_move_duration;
            log::trace!("ai wanders: {:?}", self.action);
        }

        match self.action {
            AiAction::Track => track(paddle, ball, rng),
            AiAction::MoveUp => PaddleCommand::MoveUp,
            AiAction::MoveDown => PaddleCommand::MoveDown,
            AiAction::Idle => PaddleCommand::Stop,
        }
    }

    fn decide<R: Rng + ?Sized>(&mut self, ball: &Body, rng: &mut R) {
        if ball.vel.x > 0.0 {
            if rng.gen_bool(self.profile.track_chance) {
                self.action = AiAction::Track;
            } else {
                self.action = pick(&REACT_CHOICES, rng);
                self.random_move_timer = self.profile.random_move_duration;
            }
        } else {
            self.action = pick(&WANDER_CHOICES, rng);
            self.random_move_timer = self.profile.random_move_duration;
        }
        log::trace!("ai decides: {:?}", self.action);
    }
}

impl Default for AiController {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

fn pick<R: Rng + ?Sized>(choices: &[AiAction], rng: &mut R) -> AiAction {
    choices[rng.gen_range(0..choices.len())]
}

/// Chase a noisy estimate of the ball, idling inside the dead zone
fn track<R: Rng + ?Sized>(paddle: &Body, ball: &Body, rng: &mut R) -> PaddleCommand {
    let paddle_center = paddle.center().y;
    let error = rng.gen_range(-Params::AI_TRACK_ERROR..=Params::AI_TRACK_ERROR) as f32;
    let target = ball.center().y + error;

    if target < paddle_center - Params::AI_DEAD_ZONE {
        PaddleCommand::MoveUp
    } else if target > paddle_center + Params::AI_DEAD_ZONE {
        PaddleCommand::MoveDown
    } else if rng.gen_bool(Params::AI_STOP_CHANCE) {
        PaddleCommand::Stop
    } else if rng.gen_bool(0.5) {
        PaddleCommand::MoveUp
    } else {
        PaddleCommand::MoveDown
    }
}

/// Run the controller for the CPU paddle and apply its command
pub fn update_ai<R: Rng + ?Sized>(
    world: &mut World,
    ai: &mut AiController,
    time: &Time,
    config: &Config,
    rng: &mut R,
) {
    let ball = world
        .query::<(&Body, &Kind)>()
        .iter()
        .find(|(_e, (_b, kind))| matches!(kind, Kind::Ball { .. }))
        .map(|(_e, (body, _k))| *body);

    let Some(ball) = ball else {
        return;
    };

    for (_entity, (body, kind)) in world.query_mut::<(&mut Body, &Kind)>() {
        if kind.side() == Some(Side::Right) {
            let command = ai.update(body, &ball, time.dt, rng);
            command.apply(body, config.paddle_speed);
        }
    }
}
