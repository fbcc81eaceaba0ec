use crate::{Aabb, Body, Config, Events, Kind, Side};
use hecs::World;

/// Return the first paddle whose rectangle overlaps the ball.
///
/// `paddles` must already be in scan order (player first, then CPU); only
/// one paddle can be hit per tick.
pub fn find_hit(ball: &Body, paddles: &[(Side, Aabb)]) -> Option<(Side, Aabb)> {
    let ball_rect = ball.rect();
    paddles
        .iter()
        .copied()
        .find(|(_side, rect)| ball_rect.intersects(rect))
}

/// Bounce the ball off a paddle.
///
/// Horizontal velocity is reflected and sped up (capped), vertical velocity
/// becomes spin proportional to how far from the paddle centre the ball
/// struck, and the ball is moved clear of the paddle.
pub fn apply_bounce(ball: &mut Body, paddle: &Aabb, side: Side, config: &Config) {
    debug_assert!(paddle.height() > 0.0, "paddle must have positive height");

    let reflected = -ball.vel.x * config.ball_speed_increase;
    ball.vel.x = reflected.abs().min(config.ball_speed_max).copysign(reflected);

    // -1 at the top edge, 1 at the bottom edge
    let hit_offset =
        ((ball.center().y - paddle.center().y) / (paddle.height() / 2.0)).clamp(-1.0, 1.0);
    ball.vel.y = hit_offset * config.ball_spin_max;

    let clearance = paddle.width() + config.ball_reposition_gap;
    ball.pos.x = match side {
        Side::Left => paddle.max.x + clearance,
        Side::Right => paddle.min.x - clearance,
    };
}

/// Check the ball against both paddles and respond to the first hit
pub fn check_collisions(world: &mut World, events: &mut Events, config: &Config) {
    let mut paddles: Vec<(Side, Aabb)> = world
        .query::<(&Body, &Kind)>()
        .iter()
        .filter_map(|(_e, (body, kind))| kind.side().map(|side| (side, body.rect())))
        .collect();
    paddles.sort_by_key(|(side, _)| *side);

    for (_entity, (body, kind)) in world.query_mut::<(&mut Body, &Kind)>() {
        if !matches!(kind, Kind::Ball { .. }) {
            continue;
        }
        if let Some((side, rect)) = find_hit(body, &paddles) {
            apply_bounce(body, &rect, side, config);
            log::debug!(
                "ball hit {:?} paddle, velocity now ({:.1}, {:.1})",
                side,
                body.vel.x,
                body.vel.y
            );
            events.ball_hit_paddle = true;
        }
    }
}
