use glam::Vec2;

use crate::Aabb;

/// Which end of the arena a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Left,  // player
    Right, // cpu
}

/// Kinematic state shared by every entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,  // top-left corner
    pub size: Vec2, // width, height
    pub vel: Vec2,  // pixels per second
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        debug_assert!(
            size.x > 0.0 && size.y > 0.0,
            "entity dimensions must be positive"
        );
        Self { pos, size, vel }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_top_left(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Entity variant, dispatched with `match` by the systems
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Ball { anchor: Vec2 },
    Paddle { side: Side },
}

impl Kind {
    pub fn side(&self) -> Option<Side> {
        match self {
            Kind::Paddle { side } => Some(*side),
            Kind::Ball { .. } => None,
        }
    }
}

/// Paddle movement command, shared by the human input adapter and the AI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleCommand {
    MoveUp,
    MoveDown,
    Stop,
}

impl PaddleCommand {
    /// Set the paddle's vertical velocity for this command
    pub fn apply(self, body: &mut Body, speed: f32) {
        body.vel.y = match self {
            PaddleCommand::MoveUp => -speed,
            PaddleCommand::MoveDown => speed,
            PaddleCommand::Stop => 0.0,
        };
    }
}

/// Put a ball back on its anchor, heading left at the initial speed
pub fn reset_ball(body: &mut Body, anchor: Vec2, speed: f32) {
    body.pos = anchor;
    body.vel = Vec2::new(-speed, 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_command_sets_velocity() {
        let mut body = Body::new(Vec2::ZERO, Vec2::new(20.0, 100.0), Vec2::ZERO);
        PaddleCommand::MoveUp.apply(&mut body, 400.0);
        assert_eq!(body.vel.y, -400.0);
        PaddleCommand::MoveDown.apply(&mut body, 400.0);
        assert_eq!(body.vel.y, 400.0);
        PaddleCommand::Stop.apply(&mut body, 400.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_reset_ball() {
        let anchor = Vec2::new(640.0, 360.0);
        let mut body = Body::new(
            Vec2::new(-3.0, 10.0),
            Vec2::splat(15.0),
            Vec2::new(480.0, -120.0),
        );
        reset_ball(&mut body, anchor, 250.0);
        assert_eq!(body.pos, anchor);
        assert_eq!(body.vel, Vec2::new(-250.0, 0.0));
    }

    #[test]
    fn test_body_center() {
        let body = Body::new(Vec2::new(10.0, 20.0), Vec2::new(20.0, 100.0), Vec2::ZERO);
        assert_eq!(body.center(), Vec2::new(20.0, 70.0));
    }
}
