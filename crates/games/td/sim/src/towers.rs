use crate::config::{TdConfig, TowerKind};
use crate::enemies::EnemyManager;
use crate::enemy::EnemyId;
use crate::path::PathRenderer;
use crate::tower::{Projectile, Tower, TowerId};
use arcade_core::Tick;
use glam::Vec2;
use slotmap::SlotMap;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("cell is on the enemy path")]
    OnPath,
    #[error("cell already holds a tower")]
    Occupied,
    #[error("not enough gold: need {cost}, have {have}")]
    InsufficientGold { cost: u32, have: u32 },
    #[error("cannot build while a wave is running")]
    WaveActive,
}

#[derive(Clone, Debug)]
pub struct Shot {
    pub tower: TowerId,
    pub target: EnemyId,
    pub from: Vec2,
    pub to: Vec2,
}

#[derive(Clone, Debug)]
pub struct Kill {
    pub enemy: EnemyId,
    pub position: Vec2,
    pub reward: u32,
}

/// Owns the towers, their projectiles and the gold purse.
#[derive(Clone, Debug)]
pub struct TowerManager {
    towers: SlotMap<TowerId, Tower>,
    projectiles: Vec<Projectile>,
    starting_gold: u32,
    gold: u32,
}

impl TowerManager {
    pub fn new(starting_gold: u32) -> Self {
        Self {
            towers: SlotMap::with_key(),
            projectiles: Vec::new(),
            starting_gold,
            gold: starting_gold,
        }
    }

    pub fn check_placement(
        &self,
        position: Vec2,
        kind: TowerKind,
        config: &TdConfig,
        path: &PathRenderer,
    ) -> Result<(), PlacementError> {
        if path.is_on_path(position) {
            return Err(PlacementError::OnPath);
        }

        let spec = config.spec(kind);
        if self
            .towers
            .values()
            .any(|t| t.position.distance(position) < spec.size)
        {
            return Err(PlacementError::Occupied);
        }

        if self.gold < spec.cost {
            return Err(PlacementError::InsufficientGold {
                cost: spec.cost,
                have: self.gold,
            });
        }

        Ok(())
    }

    pub fn can_place_tower(
        &self,
        position: Vec2,
        kind: TowerKind,
        config: &TdConfig,
        path: &PathRenderer,
    ) -> bool {
        self.check_placement(position, kind, config, path).is_ok()
    }

    pub fn place_tower(
        &mut self,
        position: Vec2,
        kind: TowerKind,
        config: &TdConfig,
        path: &PathRenderer,
    ) -> Result<TowerId, PlacementError> {
        self.check_placement(position, kind, config, path)?;

        self.gold -= config.spec(kind).cost;
        let id = self.towers.insert(Tower::new(position, kind));
        tracing::debug!(?kind, x = position.x, y = position.y, gold = self.gold, "tower placed");
        Ok(id)
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn affordable_kinds(&self, config: &TdConfig) -> Vec<TowerKind> {
        TowerKind::ALL
            .into_iter()
            .filter(|&kind| config.spec(kind).cost <= self.gold)
            .collect()
    }

    /// Every ready tower with an enemy in range fires once.
    pub fn update(&mut self, tick: Tick, config: &TdConfig, enemies: &EnemyManager) -> Vec<Shot> {
        let flight_ticks = config.projectile_flight_ticks();
        let mut shots = Vec::new();

        for (tower_id, tower) in self.towers.iter_mut() {
            let spec = config.spec(tower.kind);
            let period = config.duration_to_ticks(spec.fire_period());
            if !tower.can_fire(tick, period) {
                continue;
            }

            let Some(target_id) = tower.find_target(spec.range, enemies.active_enemies()) else {
                tower.target = None;
                continue;
            };
            let Some(target) = enemies.get(target_id) else {
                continue;
            };

            if let Some(projectile) = tower.fire(
                tick,
                period,
                (target_id, target.position),
                spec.damage,
                flight_ticks,
            ) {
                shots.push(Shot {
                    tower: tower_id,
                    target: target_id,
                    from: projectile.origin,
                    to: projectile.destination,
                });
                self.projectiles.push(projectile);
            }
        }

        shots
    }

    /// Land arrived projectiles. Damage only applies to targets still alive.
    pub fn advance_projectiles(&mut self, tick: Tick, enemies: &mut EnemyManager) -> Vec<Kill> {
        let mut kills = Vec::new();
        let (arrived, in_flight): (Vec<_>, Vec<_>) = self
            .projectiles
            .drain(..)
            .partition(|p| p.has_arrived(tick));
        self.projectiles = in_flight;

        for projectile in arrived {
            let Some(enemy) = enemies.get_mut(projectile.target) else {
                continue;
            };
            if enemy.take_damage(projectile.damage) {
                kills.push(Kill {
                    enemy: projectile.target,
                    position: enemy.position,
                    reward: enemy.reward,
                });
            }
        }

        kills
    }

    pub fn towers(&self) -> impl Iterator<Item = (TowerId, &Tower)> {
        self.towers.iter()
    }

    pub fn tower_count(&self) -> usize {
        self.towers.len()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn reset(&mut self) {
        self.towers.clear();
        self.projectiles.clear();
        self.gold = self.starting_gold;
    }
}
