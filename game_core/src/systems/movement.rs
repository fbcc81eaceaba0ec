use crate::{Body, Config, Events, Kind, Time};
use hecs::World;

/// What happened to a body during one integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    pub goal: bool,
    pub wall_bounce: bool,
}

/// Integrate a single body by `dt`.
///
/// Paddles stop dead at the end of their travel. The ball bounces off the
/// top and bottom walls and is free to leave the arena horizontally, which
/// is reported as a goal.
pub fn advance(body: &mut Body, kind: &Kind, dt: f32, config: &Config) -> Advance {
    body.pos += body.vel * dt;

    match kind {
        Kind::Paddle { .. } => {
            let (min, max) = config.paddle_bounds();
            if body.pos.y <= min || body.pos.y >= max {
                body.pos.y = body.pos.y.clamp(min, max);
                body.vel.y = 0.0;
            }
            Advance::default()
        }
        Kind::Ball { .. } => {
            let max_y = config.screen_height - body.size.y;
            let mut wall_bounce = false;
            if body.pos.y <= 0.0 || body.pos.y >= max_y {
                body.vel.y = -body.vel.y;
                body.pos.y = body.pos.y.clamp(0.0, max_y);
                wall_bounce = true;
            }
            let goal = body.pos.x < 0.0 || body.pos.x > config.screen_width;
            Advance { goal, wall_bounce }
        }
    }
}

/// Move every entity. Returns true if a ball left the arena this step.
pub fn move_entities(world: &mut World, time: &Time, config: &Config, events: &mut Events) -> bool {
    let mut goal = false;
    for (_entity, (body, kind)) in world.query_mut::<(&mut Body, &Kind)>() {
        let result = advance(body, kind, time.dt, config);
        if result.wall_bounce {
            log::debug!("ball bounced off wall at y={:.1}", body.pos.y);
            events.ball_hit_wall = true;
        }
        goal |= result.goal;
    }
    goal
}
