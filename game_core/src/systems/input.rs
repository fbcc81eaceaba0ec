use hecs::World;

use crate::components::*;
use crate::resources::*;
use crate::Config;

/// Apply a movement command to the paddle defending `side`
pub fn command_paddle(world: &mut World, side: Side, command: PaddleCommand, config: &Config) {
    for (_entity, (body, kind)) in world.query_mut::<(&mut Body, &Kind)>() {
        if kind.side() == Some(side) {
            command.apply(body, config.paddle_speed);
        }
    }
}

/// Ingest queued input commands and turn them into paddle velocities
pub fn ingest_inputs(world: &mut World, queue: &mut CommandQueue, config: &Config) {
    for &(side, command) in &queue.commands {
        command_paddle(world, side, command, config);
    }

    // Clear processed inputs
    queue.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_paddle, Config};

    fn paddle_vel(world: &World, side: Side) -> f32 {
        world
            .query::<(&Body, &Kind)>()
            .iter()
            .find(|(_e, (_b, k))| k.side() == Some(side))
            .map(|(_e, (b, _k))| b.vel.y)
            .unwrap_or(f32::NAN)
    }

    #[test]
    fn test_ingest_applies_last_command_per_side() {
        let config = Config::new();
        let mut world = World::new();
        create_paddle(&mut world, Side::Left, &config);
        create_paddle(&mut world, Side::Right, &config);

        let mut queue = CommandQueue::new();
        queue.push(Side::Left, PaddleCommand::MoveUp);
        queue.push(Side::Left, PaddleCommand::MoveDown);
        ingest_inputs(&mut world, &mut queue, &config);

        assert_eq!(paddle_vel(&world, Side::Left), config.paddle_speed);
        assert_eq!(paddle_vel(&world, Side::Right), 0.0, "Other paddle untouched");
        assert!(queue.commands.is_empty(), "Queue drained");
    }
}
