//! Terminal frontend: draws frames with crossterm and feeds key presses to
//! the [`KeyMapper`].

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        poll, read, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, Clear, ClearType,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use game_core::{Aabb, Config, Frontend, GameState, Intent, RenderFrame, Side};
use glam::Vec2;

use crate::input::KeyMapper;

/// Rows reserved above the playfield for the score line
const HEADER_ROWS: u16 = 1;
/// Rows reserved below the playfield for key hints
const FOOTER_ROWS: u16 = 1;

/// Maps game coordinates onto terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub screen: Vec2,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Playfield below the header, sized from the full terminal
    pub fn for_terminal(screen: Vec2, cols: u16, rows: u16) -> Self {
        Self {
            screen,
            cols: cols.max(1),
            rows: rows.saturating_sub(HEADER_ROWS + FOOTER_ROWS).max(1),
        }
    }

    /// Cell containing `point`, clamped to the playfield
    pub fn cell(&self, point: Vec2) -> (u16, u16) {
        let col = (point.x / self.screen.x * self.cols as f32).floor();
        let row = (point.y / self.screen.y * self.rows as f32).floor();
        (
            col.clamp(0.0, (self.cols - 1) as f32) as u16,
            row.clamp(0.0, (self.rows - 1) as f32) as u16 + HEADER_ROWS,
        )
    }

    /// Column and the inclusive row span covered by a paddle
    pub fn paddle_cells(&self, rect: &Aabb) -> (u16, u16, u16) {
        let (col, top) = self.cell(rect.min);
        // Shrink by a hair so a paddle ending on a cell edge doesn't spill over
        let (_, bottom) = self.cell(rect.max - Vec2::splat(1e-3));
        (col, top, bottom.max(top))
    }
}

pub struct TerminalFrontend {
    out: Stdout,
    keys: KeyMapper,
    release_events: bool,
    state: GameState,
    win_points: u32,
}

impl TerminalFrontend {
    /// Switch the terminal into raw mode on the alternate screen
    pub fn enter(config: Config) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();

        let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
        if release_events {
            queue!(
                out,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                )
            )?;
        }
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        log::info!("terminal ready (key release events: {release_events})");

        let win_points = config.win_points_default;
        Ok(Self {
            out,
            keys: KeyMapper::new(config, release_events),
            release_events,
            state: GameState::Menu,
            win_points,
        })
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.release_events {
            queue!(self.out, PopKeyboardEnhancementFlags)?;
        }
        execute!(self.out, LeaveAlternateScreen, Show, ResetColor)?;
        disable_raw_mode()
    }

    fn text(&mut self, col: u16, row: u16, color: Color, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(col, row),
            SetForegroundColor(color),
            Print(text),
            ResetColor
        )
    }

    /// Line of text centred on the playfield
    fn banner(&mut self, view: &Viewport, offset: i32, color: Color, text: &str) -> io::Result<()> {
        let width = text.chars().count() as u16;
        let col = view.cols.saturating_sub(width) / 2;
        let mid = (HEADER_ROWS + view.rows / 2) as i32 + offset;
        self.text(col, mid.max(0) as u16, color, text)
    }

    fn draw_field(&mut self, frame: &RenderFrame, view: &Viewport) -> io::Result<()> {
        let center_col = view.cols / 2;
        for row in (HEADER_ROWS..HEADER_ROWS + view.rows).step_by(2) {
            self.text(center_col, row, Color::DarkGrey, "│")?;
        }

        for (side, rect) in &frame.paddles {
            let (col, top, bottom) = view.paddle_cells(rect);
            let color = match side {
                Side::Left => Color::Cyan,
                Side::Right => Color::Magenta,
            };
            for row in top..=bottom {
                self.text(col, row, color, "█")?;
            }
        }

        if let Some(ball) = frame.ball {
            let (col, row) = view.cell(ball.center);
            self.text(col, row, Color::White, "●")?;
        }
        Ok(())
    }

    fn draw_header(&mut self, frame: &RenderFrame, cols: u16) -> io::Result<()> {
        let score = format!("YOU {}  :  {} CPU", frame.score.player, frame.score.cpu);
        let col = cols.saturating_sub(score.chars().count() as u16) / 2;
        self.text(col, 0, Color::Yellow, &score)?;
        let target = format!("first to {}", frame.win_points);
        self.text(0, 0, Color::DarkGrey, &target)?;
        let difficulty = frame.difficulty.as_str();
        let col = cols.saturating_sub(difficulty.len() as u16);
        self.text(col, 0, Color::DarkGrey, difficulty)
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::error!("failed to restore terminal: {err}");
        }
    }
}

impl Frontend for TerminalFrontend {
    type Error = io::Error;

    fn poll_intents(&mut self, intents: &mut Vec<Intent>) -> io::Result<()> {
        let now = Instant::now();
        while poll(Duration::ZERO)? {
            if let Event::Key(key) = read()? {
                self.keys
                    .handle_key(key, self.state, self.win_points, now, intents);
            }
        }
        self.keys.end_of_poll(self.state, now, intents);
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> io::Result<()> {
        self.state = frame.state;
        self.win_points = frame.win_points;

        let (cols, rows) = terminal::size()?;
        let view = Viewport::for_terminal(frame.screen, cols, rows);
        let footer = HEADER_ROWS + view.rows;
        queue!(self.out, Clear(ClearType::All))?;

        match frame.state {
            GameState::Menu => {
                self.banner(&view, -3, Color::Cyan, "P O N G")?;
                let info = format!(
                    "first to {}  |  {}",
                    frame.win_points,
                    frame.difficulty.as_str()
                );
                self.banner(&view, -1, Color::White, &info)?;
                self.banner(&view, 1, Color::DarkGrey, "Enter: play   o: settings")?;
                self.banner(&view, 2, Color::DarkGrey, "e/m/h: difficulty   +/-: points")?;
                self.text(0, footer, Color::DarkGrey, "q: quit")?;
            }
            GameState::Settings => {
                self.banner(&view, -3, Color::Cyan, "SETTINGS")?;
                let entry = format!("Points to win: {}_", self.keys.win_points_text());
                self.banner(&view, -1, Color::White, &entry)?;
                let info = format!(
                    "current: first to {}  |  {}",
                    frame.win_points,
                    frame.difficulty.as_str()
                );
                self.banner(&view, 0, Color::DarkGrey, &info)?;
                self.banner(&view, 2, Color::DarkGrey, "digits + Enter: set points")?;
                self.banner(&view, 3, Color::DarkGrey, "e/m/h: difficulty")?;
                self.text(0, footer, Color::DarkGrey, "Space: play   Esc: back   q: quit")?;
            }
            GameState::InGame | GameState::Paused | GameState::PlayerScored => {
                self.draw_header(frame, cols)?;
                self.draw_field(frame, &view)?;
                match frame.state {
                    GameState::Paused => {
                        self.banner(&view, 0, Color::Yellow, "PAUSED")?;
                        self.text(0, footer, Color::DarkGrey, "Space: resume   Esc: menu")?;
                    }
                    GameState::PlayerScored => {
                        self.banner(&view, 0, Color::Green, "YOU SCORED!")?;
                        self.text(0, footer, Color::DarkGrey, "Space: continue")?;
                    }
                    _ => {
                        self.text(
                            0,
                            footer,
                            Color::DarkGrey,
                            "w/s: move   Space: pause   Esc: menu",
                        )?;
                    }
                }
            }
            GameState::GameOver => {
                self.draw_header(frame, cols)?;
                let (title, color) = match frame.result {
                    Some(result) if result.player_won() => ("YOU WIN!", Color::Green),
                    _ => ("GAME OVER", Color::Red),
                };
                self.banner(&view, -1, color, title)?;
                if let Some(result) = frame.result {
                    let line = format!("{} - {}", result.score.player, result.score.cpu);
                    self.banner(&view, 1, Color::White, &line)?;
                }
                self.text(0, footer, Color::DarkGrey, "Enter: play again   Esc: menu")?;
            }
        }

        self.out.flush()
    }
}
