/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Screen (pixels)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 400.0; // pixels per second
    pub const PADDLE_MARGIN: f32 = 30.0; // distance from the screen edge

    // Ball
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_SPEED_INITIAL: f32 = 250.0;
    pub const BALL_SPEED_MIN: f32 = 200.0;
    pub const BALL_SPEED_MAX: f32 = 500.0;
    pub const BALL_SPEED_INCREASE: f32 = 1.05; // Multiply speed on paddle hit
    pub const BALL_SPIN_MAX: f32 = 300.0; // vertical speed for an edge hit
    pub const BALL_REPOSITION_GAP: f32 = 5.0;

    // Score
    pub const WIN_POINTS_DEFAULT: u32 = 10;
    pub const WIN_POINTS_MIN: u32 = 1;
    pub const WIN_POINTS_MAX: u32 = 50;

    // AI
    pub const AI_EASY: f32 = 0.6;
    pub const AI_MEDIUM: f32 = 0.8;
    pub const AI_HARD: f32 = 0.95;
    pub const AI_DEAD_ZONE: f32 = 60.0;
    pub const AI_TRACK_ERROR: i32 = 70;
    pub const AI_STOP_CHANCE: f64 = 0.7;
    pub const AI_WANDER_CHANGE_CHANCE: f64 = 0.3;

    // Loop
    pub const TICK_RATE: u32 = 60;
    pub const MAX_DT: f32 = 0.1; // Clamp to prevent large jumps
    pub const DEFAULT_SEED: u64 = 12345;
}
