use crate::config::TowerKind;
use crate::enemy::EnemyId;
use crate::tower::TowerId;
use crate::towers::PlacementError;
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum TdEvent {
    TowerSelected {
        kind: TowerKind,
    },
    TowerPlaced {
        id: TowerId,
        position: Vec2,
        kind: TowerKind,
    },
    PlacementRejected {
        position: Vec2,
        reason: PlacementError,
    },
    ProjectileFired {
        tower: TowerId,
        target: EnemyId,
        from: Vec2,
        to: Vec2,
    },
    EnemySpawned {
        id: EnemyId,
    },
    EnemyKilled {
        id: EnemyId,
        position: Vec2,
        reward: u32,
    },
    EnemyLeaked {
        id: EnemyId,
    },
    LivesChanged {
        lives: u32,
    },
    GoldChanged {
        gold: u32,
    },
    WaveStarted {
        wave: u32,
    },
    WaveCompleted {
        wave: u32,
    },
    CameraReset,
    GameOver,
    Victory {
        tokens: u32,
    },
}
