use crate::{reset_ball, Body, Config, Events, Kind, Score};
use hecs::World;

/// Award a goal for every ball that left the arena and put it back in play.
///
/// Out on the left is a CPU point, out on the right a player point. Balls
/// still inside the arena are left alone.
pub fn check_scoring(world: &mut World, score: &mut Score, events: &mut Events, config: &Config) {
    for (_entity, (body, kind)) in world.query_mut::<(&mut Body, &Kind)>() {
        let Kind::Ball { anchor } = *kind else {
            continue;
        };

        if body.pos.x < 0.0 {
            score.increment_cpu();
            events.cpu_scored = true;
            log::info!("cpu scored ({} - {})", score.player, score.cpu);
        } else if body.pos.x > config.screen_width {
            score.increment_player();
            events.player_scored = true;
            log::info!("player scored ({} - {})", score.player, score.cpu);
        } else {
            continue;
        }

        reset_ball(body, anchor, config.ball_speed_initial);
    }
}
