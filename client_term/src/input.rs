//! Keyboard input handling
//!
//! Maps terminal key events to game intents. Terminals that cannot report key
//! releases get a short grace period instead: the paddle stops once the
//! auto-repeat for a held key dries up.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_core::{Config, Difficulty, GameState, Intent};

/// How long a movement key counts as held without a repeat
const KEY_HOLD_GRACE: Duration = Duration::from_millis(150);

/// Longest win-points entry the settings screen accepts
const WIN_POINTS_DIGITS: usize = 3;

pub struct KeyMapper {
    config: Config,
    release_events: bool,
    held: Option<Intent>,
    last_move_key: Option<Instant>,
    win_points_text: String,
}

impl KeyMapper {
    pub fn new(config: Config, release_events: bool) -> Self {
        let win_points_text = config.win_points_default.to_string();
        Self {
            config,
            release_events,
            held: None,
            last_move_key: None,
            win_points_text,
        }
    }

    /// Digits typed on the settings screen
    pub fn win_points_text(&self) -> &str {
        &self.win_points_text
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        state: GameState,
        win_points: u32,
        now: Instant,
        out: &mut Vec<Intent>,
    ) {
        if key.kind == KeyEventKind::Release {
            if let Some(intent) = move_intent(key.code) {
                if self.held == Some(intent) {
                    self.held = None;
                    out.push(Intent::Stop);
                }
            }
            return;
        }

        if key.code == KeyCode::Char('q')
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            out.push(Intent::Quit);
            return;
        }

        match state {
            GameState::Menu => self.menu_key(key.code, win_points, out),
            GameState::Settings => self.settings_key(key.code, win_points, out),
            GameState::InGame => match key.code {
                KeyCode::Char(' ') | KeyCode::Char('p') => out.push(Intent::Pause),
                KeyCode::Esc => out.push(Intent::ReturnToMenu),
                code => {
                    if let Some(intent) = move_intent(code) {
                        if self.held != Some(intent) {
                            out.push(intent);
                        }
                        self.held = Some(intent);
                        self.last_move_key = Some(now);
                    }
                }
            },
            GameState::Paused => match key.code {
                KeyCode::Char(' ') | KeyCode::Char('p') => out.push(Intent::Resume),
                KeyCode::Esc => out.push(Intent::ReturnToMenu),
                _ => {}
            },
            GameState::PlayerScored => {
                if key.code == KeyCode::Char(' ') {
                    out.push(Intent::Continue);
                }
            }
            GameState::GameOver => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => out.push(Intent::PlayAgain),
                KeyCode::Esc => out.push(Intent::ReturnToMenu),
                _ => {}
            },
        }
    }

    /// Called once per poll after all pending keys were handled
    pub fn end_of_poll(&mut self, state: GameState, now: Instant, out: &mut Vec<Intent>) {
        if state != GameState::InGame {
            self.held = None;
            return;
        }
        if self.release_events || self.held.is_none() {
            return;
        }
        let expired = self
            .last_move_key
            .map_or(true, |at| now.duration_since(at) > KEY_HOLD_GRACE);
        if expired {
            self.held = None;
            out.push(Intent::Stop);
        }
    }

    fn menu_key(&mut self, code: KeyCode, win_points: u32, out: &mut Vec<Intent>) {
        match code {
            KeyCode::Enter | KeyCode::Char(' ') => out.push(Intent::Start(win_points)),
            KeyCode::Char('o') => {
                self.win_points_text = win_points.to_string();
                out.push(Intent::OpenSettings);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                out.push(Intent::SetWinPoints(win_points.saturating_add(1)))
            }
            KeyCode::Char('-') => out.push(Intent::SetWinPoints(win_points.saturating_sub(1))),
            code => {
                if let Some(difficulty) = difficulty_key(code) {
                    out.push(Intent::SetDifficulty(difficulty));
                }
            }
        }
    }

    fn settings_key(&mut self, code: KeyCode, win_points: u32, out: &mut Vec<Intent>) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.win_points_text.len() < WIN_POINTS_DIGITS {
                    self.win_points_text.push(c);
                }
            }
            KeyCode::Backspace => {
                self.win_points_text.pop();
            }
            KeyCode::Enter => {
                let points = self.config.parse_win_points(&self.win_points_text);
                self.win_points_text = points.to_string();
                out.push(Intent::SetWinPoints(points));
            }
            KeyCode::Char(' ') => out.push(Intent::Start(win_points)),
            KeyCode::Esc => out.push(Intent::ReturnToMenu),
            code => {
                if let Some(difficulty) = difficulty_key(code) {
                    out.push(Intent::SetDifficulty(difficulty));
                }
            }
        }
    }
}

fn move_intent(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Intent::MoveUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Intent::MoveDown),
        _ => None,
    }
}

fn difficulty_key(code: KeyCode) -> Option<Difficulty> {
    match code {
        KeyCode::Char('e') => Some(Difficulty::Easy),
        KeyCode::Char('m') => Some(Difficulty::Medium),
        KeyCode::Char('h') => Some(Difficulty::Hard),
        _ => None,
    }
}
