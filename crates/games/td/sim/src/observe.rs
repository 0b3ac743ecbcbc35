use crate::enemy::EnemyId;
use crate::game::TdGame;
use crate::tower::TowerId;
use crate::waves::WaveState;
use arcade_core::Tick;
use glam::Vec2;
use slotmap::Key;
use td_types::{
    CameraInfo, EnemyInfo, GridPreviewInfo, Point, ProjectileInfo, TdObservation, TowerInfo,
    TowerOption, WaveStatus,
};

fn point(v: Vec2) -> Point {
    Point { x: v.x, y: v.y }
}

pub fn tower_id_to_string(id: TowerId) -> String {
    id.data().as_ffi().to_string()
}

pub fn enemy_id_to_string(id: EnemyId) -> String {
    id.data().as_ffi().to_string()
}

pub fn build_observation(game: &TdGame, tick: Tick) -> TdObservation {
    let config = game.config();
    let towers = game.towers();
    let waves = game.waves();

    let wave_status = match waves.state() {
        WaveState::Idle => WaveStatus::Idle {
            completed: waves.waves_completed(),
        },
        WaveState::Active { spawned } => WaveStatus::Active {
            wave: waves.current_wave(),
            spawned,
            to_spawn: waves.wave_size().saturating_sub(spawned),
        },
    };

    let gold = towers.gold();
    let tower_options = crate::config::TowerKind::ALL
        .into_iter()
        .map(|kind| {
            let spec = config.spec(kind);
            TowerOption {
                tower_type: kind.name().to_string(),
                cost: spec.cost,
                damage: spec.damage,
                range: spec.range,
                affordable: spec.cost <= gold,
            }
        })
        .collect();

    let camera = game.camera();

    TdObservation {
        tick,
        ticks_per_second: config.tick_hz,

        viewport_width: config.viewport_width,
        viewport_height: config.viewport_height,
        path: game.path().points().iter().copied().map(point).collect(),
        path_width: game.path().width(),
        cell_size: game.grid().cell_size(),

        gold,
        lives: game.enemies().lives(),
        waves_total: config.waves_total,
        wave_status,

        selected_tower: game.selected_tower().name().to_string(),
        tower_options,

        towers: towers
            .towers()
            .map(|(id, t)| {
                let spec = config.spec(t.kind);
                let period = config.duration_to_ticks(spec.fire_period());
                TowerInfo {
                    id: tower_id_to_string(id),
                    position: point(t.position),
                    tower_type: t.kind.name().to_string(),
                    range: spec.range,
                    damage: spec.damage,
                    cooldown_ticks: t.cooldown_remaining(tick, period),
                }
            })
            .collect(),
        enemies: game
            .enemies()
            .active_enemies()
            .map(|(id, e)| EnemyInfo {
                id: enemy_id_to_string(id),
                position: point(e.position),
                health: e.health,
                max_health: e.max_health,
                health_fraction: e.health_fraction(),
                path_index: e.path_index,
            })
            .collect(),
        projectiles: towers
            .projectiles()
            .iter()
            .map(|p| ProjectileInfo {
                position: point(p.position_at(tick)),
                target: point(p.destination),
            })
            .collect(),

        preview: game.grid().preview().map(|p| GridPreviewInfo {
            cell: point(p.cell),
            size: game.grid().cell_size(),
            valid: p.valid,
        }),
        camera: CameraInfo {
            scroll: point(camera.scroll()),
            zoom: camera.zoom(),
            panning: camera.is_panning(),
        },

        outcome: game.outcome().map(|o| o.to_string()),
    }
}
