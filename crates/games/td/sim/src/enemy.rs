use crate::config::EnemySpec;
use glam::Vec2;
use slotmap::new_key_type;

new_key_type! { pub struct EnemyId; }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Alive,
    Killed,
    /// Walked off the end of the path.
    Leaked,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub position: Vec2,
    pub health: i32,
    pub max_health: i32,
    /// Pixels per second.
    pub speed: f32,
    pub reward: u32,
    /// Index of the waypoint most recently reached.
    pub path_index: usize,
    pub state: EnemyState,
}

impl Enemy {
    pub fn new(position: Vec2, spec: &EnemySpec) -> Self {
        Self::with_stats(position, spec.health, spec.speed, spec.reward)
    }

    pub fn with_stats(position: Vec2, health: i32, speed: f32, reward: u32) -> Self {
        Self {
            position,
            health,
            max_health: health,
            speed,
            reward,
            path_index: 0,
            state: EnemyState::Alive,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == EnemyState::Alive
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).min(1.0)
    }

    /// Apply damage. Returns true if this hit killed the enemy.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.health -= damage;
        if self.health <= 0 {
            self.die();
            return true;
        }
        false
    }

    pub fn die(&mut self) {
        self.state = EnemyState::Killed;
    }

    pub fn reach_end(&mut self) {
        self.state = EnemyState::Leaked;
    }

    pub fn has_reached_end(&self, path: &[Vec2]) -> bool {
        self.path_index + 1 >= path.len()
    }

    /// Walk toward the next waypoint for `dt` seconds.
    ///
    /// Reaching a waypoint (within `threshold`) only advances the index; the
    /// enemy resumes moving on the following tick.
    pub fn move_along_path(&mut self, path: &[Vec2], dt: f32, threshold: f32) {
        if self.has_reached_end(path) {
            self.reach_end();
            return;
        }

        let next = path[self.path_index + 1];
        let to_next = next - self.position;
        if to_next.length() < threshold {
            self.path_index += 1;
            return;
        }

        self.position += to_next.normalize_or_zero() * self.speed * dt;
    }

    pub fn update(&mut self, path: &[Vec2], dt: f32, threshold: f32) {
        if !self.is_active() {
            return;
        }
        self.move_along_path(path, dt, threshold);
    }
}
