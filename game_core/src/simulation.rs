use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;
use hecs::{Entity, World};

use crate::systems::{command_paddle, AiController};
use crate::{
    create_ball, create_paddle, reset_ball, step, Aabb, BallView, Body, CommandQueue, Config,
    Events, Frontend, GameEvent, GameFsm, GameRng, GameState, Intent, InvalidTransition, Kind,
    MatchResult, PaddleCommand, RenderFrame, Score, Side, Time,
};

/// Single-player match against the CPU: owns every entity, the state machine
/// and the AI, and runs them in lock step with a frontend.
pub struct LocalGame {
    pub world: World,
    pub time: Time,
    pub config: Config,
    pub score: Score,
    pub events: Events,
    pub queue: CommandQueue,
    pub rng: GameRng,
    pub fsm: GameFsm,
    pub ai: AiController,
    pub result: Option<MatchResult>,
    ball: Entity,
    running: bool,
}

impl LocalGame {
    pub fn new(config: Config, seed: u64) -> Self {
        config.debug_validate();

        let mut world = World::new();
        create_paddle(&mut world, Side::Left, &config);
        create_paddle(&mut world, Side::Right, &config);
        let ball = create_ball(&mut world, &config);

        let fsm = GameFsm::new(&config);
        let ai = AiController::new(fsm.difficulty());
        log::info!(
            "game ready: seed {}, difficulty {}, first to {}",
            seed,
            fsm.difficulty().as_str(),
            fsm.win_points()
        );

        Self {
            world,
            time: Time::new(config.fixed_dt()),
            config,
            score: Score::new(),
            events: Events::new(),
            queue: CommandQueue::new(),
            rng: GameRng::new(seed),
            fsm,
            ai,
            result: None,
            ball,
            running: true,
        }
    }

    pub fn state(&self) -> GameState {
        self.fsm.state()
    }

    /// False once a quit was requested
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ball(&self) -> Option<Body> {
        self.world.get::<&Body>(self.ball).ok().map(|body| *body)
    }

    pub fn paddle(&self, side: Side) -> Option<Body> {
        self.world
            .query::<(&Body, &Kind)>()
            .iter()
            .find(|(_e, (_b, kind))| kind.side() == Some(side))
            .map(|(_e, (body, _k))| *body)
    }

    /// Apply one intent from the frontend.
    ///
    /// Paddle intents outside of play are dropped. Flow intents that the
    /// state machine rejects leave the game untouched and return the error.
    pub fn handle_intent(&mut self, intent: Intent) -> Result<(), InvalidTransition> {
        match intent {
            Intent::MoveUp => self.command_player(PaddleCommand::MoveUp),
            Intent::MoveDown => self.command_player(PaddleCommand::MoveDown),
            Intent::Stop => self.command_player(PaddleCommand::Stop),
            Intent::Start(win_points) => {
                self.fsm.transition(GameEvent::Start { win_points })?;
                self.reset_match();
            }
            Intent::PlayAgain => {
                self.fsm.transition(GameEvent::PlayAgain)?;
                self.reset_match();
            }
            Intent::SetDifficulty(difficulty) => {
                self.fsm.transition(GameEvent::SetDifficulty(difficulty))?;
                self.ai.set_difficulty(difficulty);
            }
            Intent::SetWinPoints(points) => {
                self.fsm.transition(GameEvent::SetWinPoints(points))?;
            }
            Intent::OpenSettings => {
                self.fsm.transition(GameEvent::OpenSettings)?;
            }
            Intent::Pause => {
                self.fsm.transition(GameEvent::Pause)?;
            }
            Intent::Resume => {
                self.fsm.transition(GameEvent::Resume)?;
                self.stop_player();
            }
            Intent::Continue => {
                self.fsm.transition(GameEvent::Continue)?;
                self.stop_player();
            }
            Intent::ReturnToMenu => {
                self.fsm.transition(GameEvent::ReturnToMenu)?;
            }
            Intent::Quit => {
                log::info!("quit requested");
                self.running = false;
            }
        }
        Ok(())
    }

    fn command_player(&mut self, command: PaddleCommand) {
        if self.fsm.is_in_game() {
            self.queue.push(Side::Left, command);
        }
    }

    /// Play picks up again with the player paddle at rest; keys held or
    /// released while frozen never reached the paddle.
    fn stop_player(&mut self) {
        self.queue.clear();
        command_paddle(&mut self.world, Side::Left, PaddleCommand::Stop, &self.config);
    }

    /// Fresh match: zero score, ball and paddles back in place, AI forgets
    fn reset_match(&mut self) {
        self.score.reset();
        self.result = None;
        self.events.clear();
        self.queue.clear();
        self.ai.reset();

        let config = &self.config;
        for (_entity, (body, kind)) in self.world.query_mut::<(&mut Body, &Kind)>() {
            match *kind {
                Kind::Ball { anchor } => reset_ball(body, anchor, config.ball_speed_initial),
                Kind::Paddle { side } => {
                    body.pos = Vec2::new(config.paddle_x(side), config.paddle_spawn_y());
                    body.vel = Vec2::ZERO;
                }
            }
        }
        log::info!("match started, first to {}", self.fsm.win_points());
    }

    /// Advance the simulation by `dt` seconds. Does nothing outside of play.
    pub fn tick(&mut self, dt: f32) {
        if !self.fsm.is_in_game() {
            self.events.clear();
            return;
        }

        self.time.dt = dt;
        let goal = step(
            &mut self.world,
            &self.time,
            &self.config,
            &mut self.ai,
            &mut self.score,
            &mut self.events,
            &mut self.queue,
            &mut self.rng,
        );
        if goal {
            self.resolve_goal();
        }
    }

    fn resolve_goal(&mut self) {
        let event = if let Some(winner) = self.score.winner(self.fsm.win_points()) {
            log::info!(
                "{:?} wins {} - {}",
                winner,
                self.score.player,
                self.score.cpu
            );
            self.result = Some(MatchResult {
                score: self.score,
                winner,
            });
            GameEvent::GameWon
        } else if self.events.player_scored {
            GameEvent::PlayerScored
        } else {
            return;
        };

        if let Err(err) = self.fsm.transition(event) {
            log::warn!("goal left state machine unchanged: {err}");
        }
    }

    /// Snapshot of everything a frontend draws
    pub fn frame(&self) -> RenderFrame {
        let ball = self.ball().map(|body| BallView {
            center: body.center(),
            radius: body.size.x / 2.0,
        });

        let mut paddles: Vec<(Side, Aabb)> = self
            .world
            .query::<(&Body, &Kind)>()
            .iter()
            .filter_map(|(_e, (body, kind))| kind.side().map(|side| (side, body.rect())))
            .collect();
        paddles.sort_by_key(|(side, _)| *side);

        let state = self.fsm.state();
        RenderFrame {
            state,
            ball,
            paddles,
            score: self.score,
            win_points: self.fsm.win_points(),
            difficulty: self.fsm.difficulty(),
            result: if state == GameState::GameOver {
                self.result
            } else {
                None
            },
            player_scored: state == GameState::PlayerScored,
            events: self.events.clone(),
            screen: Vec2::new(self.config.screen_width, self.config.screen_height),
        }
    }

    /// One loop iteration: input, simulation, render
    pub fn run_frame<F: Frontend>(&mut self, frontend: &mut F, dt: f32) -> Result<(), F::Error> {
        let mut intents = Vec::new();
        frontend.poll_intents(&mut intents)?;
        for intent in intents {
            if let Err(err) = self.handle_intent(intent) {
                log::debug!("ignored {:?}: {err}", intent);
            }
        }

        self.tick(dt);
        frontend.render(&self.frame())
    }

    /// Drive the game at the configured tick rate until a quit arrives
    pub fn run<F: Frontend>(&mut self, frontend: &mut F) -> Result<(), F::Error> {
        let frame_time = Duration::from_secs_f32(self.config.fixed_dt());
        let mut last = Instant::now();

        while self.running {
            let frame_start = Instant::now();
            let dt = frame_start.duration_since(last).as_secs_f32();
            last = frame_start;

            self.run_frame(frontend, dt)?;

            let elapsed = frame_start.elapsed();
            if elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
        }
        log::info!("game loop stopped");
        Ok(())
    }
}
