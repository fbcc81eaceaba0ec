//! Game State Machine
//!
//! Owns the screen flow (menu, settings, play, pause, celebration, game over)
//! together with the match settings chosen in the menus. Every change goes
//! through [`GameFsm::transition`], which rejects anything not in the table.

use thiserror::Error;

use crate::{Config, Difficulty};

/// Game states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Settings,
    InGame,
    Paused,
    GameOver,
    PlayerScored,
}

/// Events that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Start { win_points: u32 },
    OpenSettings,
    SetDifficulty(Difficulty),
    SetWinPoints(u32),
    Pause,
    Resume,
    Continue,
    ReturnToMenu,
    PlayAgain,
    PlayerScored,
    GameWon,
}

/// A transition that is not in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot apply {event:?} while in {from:?}")]
pub struct InvalidTransition {
    pub from: GameState,
    pub event: GameEvent,
}

/// Game Finite State Machine
#[derive(Debug, Clone)]
pub struct GameFsm {
    state: GameState,
    previous: Option<GameState>,
    win_points: u32,
    win_points_min: u32,
    win_points_max: u32,
    difficulty: Difficulty,
}

impl GameFsm {
    pub fn new(config: &Config) -> Self {
        Self {
            state: GameState::Menu,
            previous: None,
            win_points: config.clamp_win_points(config.win_points_default),
            win_points_min: config.win_points_min,
            win_points_max: config.win_points_max,
            difficulty: config.difficulty,
        }
    }

    /// Get current state
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn previous(&self) -> Option<GameState> {
        self.previous
    }

    pub fn win_points(&self) -> u32 {
        self.win_points
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, event: GameEvent) -> bool {
        self.next_state(event).is_some()
    }

    /// Attempt a transition, returning the new state
    pub fn transition(&mut self, event: GameEvent) -> Result<GameState, InvalidTransition> {
        let from = self.state;
        let Some(next) = self.next_state(event) else {
            log::debug!("rejected {:?} in {:?}", event, from);
            return Err(InvalidTransition { from, event });
        };

        match event {
            GameEvent::Start { win_points } | GameEvent::SetWinPoints(win_points) => {
                self.win_points = win_points.clamp(self.win_points_min, self.win_points_max);
            }
            GameEvent::SetDifficulty(difficulty) => self.difficulty = difficulty,
            _ => {}
        }

        if next != from {
            log::info!("state {:?} -> {:?} on {:?}", from, next, event);
            self.previous = Some(from);
            self.state = next;
        }
        Ok(next)
    }

    /// Get next state for a given event (if valid)
    fn next_state(&self, event: GameEvent) -> Option<GameState> {
        use GameEvent as E;
        use GameState as S;

        match (self.state, event) {
            // From Menu
            (S::Menu, E::Start { .. }) => Some(S::InGame),
            (S::Menu, E::OpenSettings) => Some(S::Settings),
            (S::Menu, E::SetDifficulty(_) | E::SetWinPoints(_)) => Some(S::Menu),

            // From Settings
            (S::Settings, E::Start { .. }) => Some(S::InGame),
            (S::Settings, E::SetDifficulty(_) | E::SetWinPoints(_)) => Some(S::Settings),
            (S::Settings, E::ReturnToMenu) => Some(S::Menu),

            // From InGame
            (S::InGame, E::Pause) => Some(S::Paused),
            (S::InGame, E::PlayerScored) => Some(S::PlayerScored),
            (S::InGame, E::GameWon) => Some(S::GameOver),
            (S::InGame, E::ReturnToMenu) => Some(S::Menu),

            // From Paused
            (S::Paused, E::Resume) => Some(S::InGame),
            (S::Paused, E::ReturnToMenu) => Some(S::Menu),

            // From PlayerScored
            (S::PlayerScored, E::Continue) => Some(S::InGame),

            // From GameOver
            (S::GameOver, E::PlayAgain) => Some(S::InGame),
            (S::GameOver, E::Start { .. }) => Some(S::InGame),
            (S::GameOver, E::ReturnToMenu) => Some(S::Menu),

            // Invalid transition
            _ => None,
        }
    }

    /// Check if the simulation should run
    pub fn is_in_game(&self) -> bool {
        self.state == GameState::InGame
    }

    pub fn is_in_menu(&self) -> bool {
        self.state == GameState::Menu
    }

    /// Check if in game over state
    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }
}

impl Default for GameFsm {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
