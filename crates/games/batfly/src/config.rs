use arcade_core::Micros;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatflyConfig {
    pub tick_hz: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,

    /// Pixels the world moves left per tick.
    pub scroll_speed: f32,
    /// Distance between new path targets.
    pub retarget_distance: f32,
    pub coin_distance: f32,
    pub spike_distance: f32,
    /// Spawns appear this far past the right edge.
    pub spawn_margin: f32,

    /// Vertical velocity set by a flap (px/s, negative is up).
    pub fly_velocity: f32,
    /// px/s².
    pub gravity: f32,

    pub path_offset_max: i32,
    pub path_height_min: i32,
    pub path_height_max: i32,
    /// Height the path eases toward before the first retarget.
    pub path_height_target: f32,
    pub path_lerp: f32,

    pub win_score: u32,
    pub token_reward: u32,

    pub player_size: Vec2,
    pub coin_size: Vec2,
    pub spike_size: Vec2,
    /// Source size of the background image before cover scaling.
    pub background_size: Vec2,
}

impl BatflyConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BatflyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::Invalid("tick_hz must be positive".into()));
        }
        if self.path_height_min > self.path_height_max {
            return Err(ConfigError::Invalid(format!(
                "path height range {}..={} is empty",
                self.path_height_min, self.path_height_max
            )));
        }
        if self.path_offset_max < 0 {
            return Err(ConfigError::Invalid("path_offset_max must not be negative".into()));
        }
        if self.background_size.min_element() <= 0.0 {
            return Err(ConfigError::Invalid("background_size must be positive".into()));
        }
        Ok(())
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        Micros::per_tick(self.tick_hz).as_secs_f32()
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }
}

impl Default for BatflyConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            viewport_width: 800.0,
            viewport_height: 600.0,

            scroll_speed: 1.0,
            retarget_distance: 200.0,
            coin_distance: 50.0,
            spike_distance: 18.0,
            spawn_margin: 50.0,

            fly_velocity: -200.0,
            gravity: 400.0,

            path_offset_max: 100,
            path_height_min: 50,
            path_height_max: 200,
            path_height_target: 300.0,
            path_lerp: 0.01,

            win_score: 5,
            token_reward: 1,

            player_size: Vec2::new(48.0, 32.0),
            coin_size: Vec2::new(32.0, 32.0),
            spike_size: Vec2::new(32.0, 32.0),
            background_size: Vec2::new(1024.0, 768.0),
        }
    }
}
