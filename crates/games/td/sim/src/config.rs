use arcade_core::Micros;
use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    Basic,
    Rapid,
    Sniper,
}

impl TowerKind {
    /// Menu order.
    pub const ALL: [TowerKind; 3] = [TowerKind::Basic, TowerKind::Rapid, TowerKind::Sniper];

    pub fn name(self) -> &'static str {
        match self {
            TowerKind::Basic => "Basic",
            TowerKind::Rapid => "Rapid",
            TowerKind::Sniper => "Sniper",
        }
    }
}

impl fmt::Display for TowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TowerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TowerKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownTowerKind(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("unknown tower type: {0}")]
    UnknownTowerKind(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerSpec {
    pub cost: u32,
    pub damage: i32,
    pub range: f32,
    pub fire_period_ms: u32,
    pub size: f32,
}

impl TowerSpec {
    pub fn basic() -> Self {
        Self {
            cost: 10,
            damage: 2,
            range: 150.0,
            fire_period_ms: 500,
            size: 32.0,
        }
    }

    pub fn rapid() -> Self {
        Self {
            cost: 15,
            damage: 1,
            range: 110.0,
            fire_period_ms: 250,
            size: 32.0,
        }
    }

    pub fn sniper() -> Self {
        Self {
            cost: 25,
            damage: 6,
            range: 260.0,
            fire_period_ms: 1500,
            size: 32.0,
        }
    }

    pub fn fire_period(&self) -> Micros {
        Micros::from_millis(self.fire_period_ms)
    }
}

/// Fields given in a config file; the rest come from the kind's own defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TowerSpecPatch {
    cost: Option<u32>,
    damage: Option<i32>,
    range: Option<f32>,
    fire_period_ms: Option<u32>,
    size: Option<f32>,
}

impl TowerSpecPatch {
    fn apply(self, base: TowerSpec) -> TowerSpec {
        TowerSpec {
            cost: self.cost.unwrap_or(base.cost),
            damage: self.damage.unwrap_or(base.damage),
            range: self.range.unwrap_or(base.range),
            fire_period_ms: self.fire_period_ms.unwrap_or(base.fire_period_ms),
            size: self.size.unwrap_or(base.size),
        }
    }
}

fn patch_spec<'de, D: Deserializer<'de>>(d: D, base: TowerSpec) -> Result<TowerSpec, D::Error> {
    Ok(TowerSpecPatch::deserialize(d)?.apply(base))
}

fn basic_spec<'de, D: Deserializer<'de>>(d: D) -> Result<TowerSpec, D::Error> {
    patch_spec(d, TowerSpec::basic())
}

fn rapid_spec<'de, D: Deserializer<'de>>(d: D) -> Result<TowerSpec, D::Error> {
    patch_spec(d, TowerSpec::rapid())
}

fn sniper_spec<'de, D: Deserializer<'de>>(d: D) -> Result<TowerSpec, D::Error> {
    patch_spec(d, TowerSpec::sniper())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySpec {
    pub health: i32,
    /// Pixels per second.
    pub speed: f32,
    pub size: f32,
    pub reward: u32,
    /// An enemy closer than this to its next waypoint advances to the one after.
    pub arrival_threshold: f32,
}

impl Default for EnemySpec {
    fn default() -> Self {
        Self {
            health: 6,
            speed: 80.0,
            size: 24.0,
            reward: 5,
            arrival_threshold: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub wheel_zoom_factor: f32,
    pub pan_speed: f32,
    /// Pointer travel (screen px) before a press turns into a pan.
    pub pan_threshold: f32,
    pub double_tap_ms: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 2.0,
            wheel_zoom_factor: 0.001,
            pan_speed: 1.0,
            pan_threshold: 5.0,
            double_tap_ms: 300,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TdConfig {
    pub tick_hz: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,

    /// Derive the path from the viewport size instead of `path`.
    pub responsive_path: bool,
    pub path: Vec<Vec2>,
    pub path_width: f32,
    pub cell_size: f32,

    pub starting_lives: u32,
    pub starting_gold: u32,
    pub wave_size: u32,
    pub spawn_delay_ms: u32,
    pub projectile_flight_ms: u32,
    /// Waves to clear for a victory; 0 plays forever.
    pub waves_total: u32,
    pub victory_tokens: u32,

    #[serde(deserialize_with = "basic_spec")]
    pub basic: TowerSpec,
    #[serde(deserialize_with = "rapid_spec")]
    pub rapid: TowerSpec,
    #[serde(deserialize_with = "sniper_spec")]
    pub sniper: TowerSpec,
    pub enemy: EnemySpec,
    pub camera: CameraConfig,
}

impl TdConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TdConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::Invalid("tick_hz must be positive".into()));
        }
        if !self.responsive_path && self.path.len() < 2 {
            return Err(ConfigError::Invalid("path needs at least two points".into()));
        }
        if self.cell_size <= 0.0 {
            return Err(ConfigError::Invalid("cell_size must be positive".into()));
        }
        if self.camera.min_zoom <= 0.0 || self.camera.min_zoom > self.camera.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "zoom range {}..{} is empty",
                self.camera.min_zoom, self.camera.max_zoom
            )));
        }
        Ok(())
    }

    pub fn spec(&self, kind: TowerKind) -> &TowerSpec {
        match kind {
            TowerKind::Basic => &self.basic,
            TowerKind::Rapid => &self.rapid,
            TowerKind::Sniper => &self.sniper,
        }
    }

    pub fn duration_to_ticks(&self, d: Micros) -> u64 {
        d.to_ticks(self.tick_hz)
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        Micros::per_tick(self.tick_hz).as_secs_f32()
    }

    pub fn spawn_delay_ticks(&self) -> u64 {
        self.duration_to_ticks(Micros::from_millis(self.spawn_delay_ms))
    }

    pub fn projectile_flight_ticks(&self) -> u64 {
        self.duration_to_ticks(Micros::from_millis(self.projectile_flight_ms))
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// The waypoints enemies follow for this configuration.
    pub fn effective_path(&self) -> (Vec<Vec2>, f32) {
        if self.responsive_path {
            (
                responsive_path(self.viewport_width, self.viewport_height),
                responsive_path_width(self.viewport_width),
            )
        } else {
            (self.path.clone(), self.path_width)
        }
    }
}

impl Default for TdConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            viewport_width: 800.0,
            viewport_height: 600.0,

            responsive_path: false,
            path: default_path(),
            path_width: DEFAULT_PATH_WIDTH,
            cell_size: 40.0,

            starting_lives: 10,
            starting_gold: 50,
            wave_size: 10,
            spawn_delay_ms: 300,
            projectile_flight_ms: 300,
            waves_total: 5,
            victory_tokens: 1,

            basic: TowerSpec::basic(),
            rapid: TowerSpec::rapid(),
            sniper: TowerSpec::sniper(),
            enemy: EnemySpec::default(),
            camera: CameraConfig::default(),
        }
    }
}

const DEFAULT_PATH_WIDTH: f32 = 40.0;
const NARROW_PATH_WIDTH: f32 = 30.0;
const NARROW_VIEWPORT: f32 = 600.0;

const DEFAULT_PATH: [(f32, f32); 10] = [
    (0.0, 300.0),
    (150.0, 300.0),
    (200.0, 250.0),
    (250.0, 200.0),
    (300.0, 150.0),
    (400.0, 150.0),
    (500.0, 200.0),
    (600.0, 250.0),
    (700.0, 300.0),
    (800.0, 300.0),
];

/// Waypoints of the classic 800x600 map.
pub fn default_path() -> Vec<Vec2> {
    DEFAULT_PATH.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
}

/// Path sized for the viewport.
///
/// Narrow (portrait) screens get a staircase of right-angle turns climbing
/// from the bottom-left; wider screens get the classic map scaled to fit.
pub fn responsive_path(width: f32, height: f32) -> Vec<Vec2> {
    if width < NARROW_VIEWPORT {
        let margin = 40.0;
        let segment = 80.0;
        let row = |i: f32| height - 60.0 - 80.0 * i;
        let col = |i: f32| margin + segment * i;

        return vec![
            Vec2::new(col(0.0), row(0.0)),
            Vec2::new(col(1.0), row(0.0)),
            Vec2::new(col(1.0), row(1.0)),
            Vec2::new(col(2.0), row(1.0)),
            Vec2::new(col(2.0), row(2.0)),
            Vec2::new(col(3.0), row(2.0)),
            Vec2::new(col(3.0), row(3.0)),
            Vec2::new(col(4.0), row(3.0)),
            Vec2::new(col(4.0), row(4.0)),
            Vec2::new(width - margin, row(4.0)),
        ];
    }

    let scale = Vec2::new(width / 800.0, height / 600.0);
    default_path().into_iter().map(|p| p * scale).collect()
}

pub fn responsive_path_width(width: f32) -> f32 {
    if width < NARROW_VIEWPORT {
        NARROW_PATH_WIDTH
    } else {
        DEFAULT_PATH_WIDTH
    }
}
