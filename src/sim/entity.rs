//! The moving ball

use glam::Vec2;

use crate::consts::BALL_RADIUS;

/// A fixed-radius actor that integrates its velocity every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingEntity {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl MovingEntity {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// `position += velocity * dt`
    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Render radius of the ball
    pub const fn radius(&self) -> f32 {
        BALL_RADIUS
    }
}
