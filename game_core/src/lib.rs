pub mod components;
pub mod config;
pub mod frontend;
pub mod fsm;
pub mod map;
pub mod params;
pub mod resources;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::*;
pub use frontend::*;
pub use fsm::*;
pub use map::*;
pub use params::*;
pub use resources::*;
pub use simulation::*;
pub use systems::{AiAction, AiController, AiProfile};

use glam::Vec2;
use hecs::World;
use systems::*;

/// Run one tick of the Pong simulation
///
/// Order: input, movement, AI, collisions, scoring. The same `dt` drives
/// every stage. Returns true if a goal was scored this tick.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &Time,
    config: &Config,
    ai: &mut AiController,
    score: &mut Score,
    events: &mut Events,
    queue: &mut CommandQueue,
    rng: &mut GameRng,
) -> bool {
    // Clamp dt to prevent large jumps
    let clamped_dt = time.dt.min(Params::MAX_DT).max(0.0);
    let step_time = Time::new(clamped_dt);

    // Clear events at start of tick
    events.clear();

    // 1. Ingest inputs (apply to player paddle)
    ingest_inputs(world, queue, config);

    // 2. Move ball and paddles
    let goal = move_entities(world, &step_time, config, events);

    // 3. Let the CPU pick its next command
    update_ai(world, ai, &step_time, config, &mut rng.0);

    // 4. Check collisions (ball vs paddles)
    check_collisions(world, events, config);

    // 5. Check scoring (ball exited arena)
    if goal {
        check_scoring(world, score, events, config);
    }

    goal
}

/// Helper to create a paddle entity, vertically centred
pub fn create_paddle(world: &mut World, side: Side, config: &Config) -> hecs::Entity {
    let body = Body::new(
        Vec2::new(config.paddle_x(side), config.paddle_spawn_y()),
        Vec2::new(config.paddle_width, config.paddle_height),
        Vec2::ZERO,
    );
    world.spawn((body, Kind::Paddle { side }))
}

/// Helper to create the ball entity at its reset anchor
pub fn create_ball(world: &mut World, config: &Config) -> hecs::Entity {
    let anchor = config.ball_spawn();
    let mut body = Body::new(anchor, Vec2::splat(config.ball_size), Vec2::ZERO);
    reset_ball(&mut body, anchor, config.ball_speed_initial);
    world.spawn((body, Kind::Ball { anchor }))
}
