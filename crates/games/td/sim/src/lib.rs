//! Headless tower-defense simulation.
//!
//! Enemies walk a fixed polyline path in waves; the player spends gold on
//! towers placed on a snapped grid beside the path. [`TdGame`] ties the
//! subsystems together and implements [`arcade_core::Game`].

pub mod actions;
pub mod camera;
pub mod config;
pub mod enemies;
pub mod enemy;
pub mod events;
pub mod game;
pub mod grid;
pub mod observe;
pub mod path;
pub mod tower;
pub mod towers;
pub mod waves;

pub use actions::TdAction;
pub use camera::CameraController;
pub use config::{ConfigError, TdConfig, TowerKind};
pub use enemies::EnemyManager;
pub use enemy::{Enemy, EnemyId};
pub use events::TdEvent;
pub use game::TdGame;
pub use grid::{GridPreview, GridSystem};
pub use path::PathRenderer;
pub use td_types::TdObservation;
pub use tower::{Projectile, Tower, TowerId};
pub use towers::{PlacementError, TowerManager};
pub use waves::{WaveController, WaveState};
