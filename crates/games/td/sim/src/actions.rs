use crate::config::TowerKind;
use serde::{Deserialize, Serialize};

/// Player input. Pointer coordinates are in screen space; `PlaceTower` takes
/// world coordinates for scripted play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TdAction {
    StartWave,
    SelectTower(TowerKind),
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32, down: bool },
    PointerUp { x: f32, y: f32 },
    Wheel { delta_y: f32 },
    PlaceTower { x: f32, y: f32, kind: TowerKind },
    ResetCamera,
    Restart,
}
