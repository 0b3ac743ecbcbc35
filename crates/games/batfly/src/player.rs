use crate::bounds::Aabb;
use glam::Vec2;

/// The bat. Sits still until the first flap, then falls under gravity.
#[derive(Clone, Debug)]
pub struct PlayerController {
    position: Vec2,
    velocity_y: f32,
    size: Vec2,
    started: bool,
}

impl PlayerController {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity_y: 0.0,
            size,
            started: false,
        }
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn fly(&mut self, fly_velocity: f32) {
        self.velocity_y = fly_velocity;
    }

    /// Semi-implicit Euler: velocity first, then position.
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        if !self.started {
            return;
        }
        self.velocity_y += gravity * dt;
        self.position.y += self.velocity_y * dt;
    }

    pub fn is_out_of_bounds(&self, viewport_height: f32) -> bool {
        self.position.y > viewport_height || self.position.y < 0.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    pub fn reset(&mut self, position: Vec2) {
        self.position = position;
        self.velocity_y = 0.0;
        self.started = false;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}
