//! Canonical serializable types for the Tower Defense game.
//!
//! Produced by `td_sim` every tick and consumed by whatever draws the game
//! (HUD, headless runner, a future renderer).

use serde::{Deserialize, Serialize};

/// Point in world (pixel) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Current wave status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WaveStatus {
    /// Between waves; the player may build and start the next wave.
    Idle {
        /// Number of waves completed so far.
        completed: u32,
    },
    /// Enemies are being released or are still on the field.
    Active {
        wave: u32,
        spawned: u32,
        to_spawn: u32,
    },
}

impl Default for WaveStatus {
    fn default() -> Self {
        Self::Idle { completed: 0 }
    }
}

/// Information about a tower.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TowerInfo {
    pub id: String,
    pub position: Point,
    pub tower_type: String,
    pub range: f32,
    pub damage: i32,
    /// Ticks until the tower may fire again (0 = ready).
    pub cooldown_ticks: u64,
}

/// Information about an enemy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnemyInfo {
    pub id: String,
    pub position: Point,
    pub health: i32,
    pub max_health: i32,
    /// Remaining health as a fraction in [0, 1], for health bars.
    pub health_fraction: f32,
    pub path_index: usize,
}

/// A projectile in flight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectileInfo {
    pub position: Point,
    pub target: Point,
}

/// Hovered grid cell and whether a tower could be placed there.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridPreviewInfo {
    pub cell: Point,
    pub size: f32,
    pub valid: bool,
}

/// Camera scroll and zoom.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraInfo {
    pub scroll: Point,
    pub zoom: f32,
    pub panning: bool,
}

/// Purchase option for the tower selection menu.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TowerOption {
    pub tower_type: String,
    pub cost: u32,
    pub damage: i32,
    pub range: f32,
    pub affordable: bool,
}

/// Full game state observation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TdObservation {
    pub tick: u64,
    pub ticks_per_second: u32,

    pub viewport_width: f32,
    pub viewport_height: f32,
    pub path: Vec<Point>,
    pub path_width: f32,
    pub cell_size: f32,

    pub gold: u32,
    pub lives: u32,
    pub waves_total: u32,
    pub wave_status: WaveStatus,

    pub selected_tower: String,
    pub tower_options: Vec<TowerOption>,

    pub towers: Vec<TowerInfo>,
    pub enemies: Vec<EnemyInfo>,
    pub projectiles: Vec<ProjectileInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<GridPreviewInfo>,
    pub camera: CameraInfo,

    /// "Win" or "Lose" once the game is over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_status_is_tagged() {
        let json = serde_json::to_value(WaveStatus::Active {
            wave: 2,
            spawned: 3,
            to_spawn: 10,
        })
        .unwrap();
        assert_eq!(json["type"], "Active");
        assert_eq!(json["wave"], 2);

        let idle: WaveStatus = serde_json::from_str(r#"{"type":"Idle","completed":4}"#).unwrap();
        assert_eq!(idle, WaveStatus::Idle { completed: 4 });
    }
}
