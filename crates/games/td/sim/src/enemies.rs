use crate::config::EnemySpec;
use crate::enemy::{Enemy, EnemyId, EnemyState};
use glam::Vec2;
use slotmap::SlotMap;

/// What one enemy-manager update did to the player.
#[derive(Debug, Default)]
pub struct EnemyUpdate {
    pub leaked: Vec<EnemyId>,
    pub game_over: bool,
}

/// Owns the live enemies and the player's lives.
///
/// Iteration is in spawn order. Slots freed by dead enemies are reused, so the
/// slot map's own order can put a newer enemy first.
#[derive(Clone, Debug)]
pub struct EnemyManager {
    enemies: SlotMap<EnemyId, Enemy>,
    spawn_order: Vec<EnemyId>,
    path: Vec<Vec2>,
    spec: EnemySpec,
    starting_lives: u32,
    lives: u32,
}

impl EnemyManager {
    pub fn new(path: Vec<Vec2>, spec: EnemySpec, starting_lives: u32) -> Self {
        Self {
            enemies: SlotMap::with_key(),
            spawn_order: Vec::new(),
            path,
            spec,
            starting_lives,
            lives: starting_lives,
        }
    }

    /// Put a fresh enemy on the first waypoint.
    pub fn spawn_enemy(&mut self) -> Option<EnemyId> {
        let start = *self.path.first()?;
        let id = self.enemies.insert(Enemy::new(start, &self.spec));
        self.spawn_order.push(id);
        Some(id)
    }

    /// Drop finished enemies, walk the rest and charge a life for each one that
    /// arrives at the last waypoint.
    pub fn update(&mut self, dt: f32) -> EnemyUpdate {
        let mut result = EnemyUpdate::default();
        self.enemies.retain(|_, enemy| enemy.is_active());
        let enemies = &self.enemies;
        self.spawn_order.retain(|id| enemies.contains_key(*id));

        let threshold = self.spec.arrival_threshold;
        let mut arrived = Vec::new();
        for &id in &self.spawn_order {
            let Some(enemy) = self.enemies.get_mut(id) else {
                continue;
            };
            enemy.update(&self.path, dt, threshold);
            if enemy.has_reached_end(&self.path) {
                enemy.state = EnemyState::Leaked;
                arrived.push(id);
            }
        }

        for id in arrived {
            result.game_over |= self.lose_life();
            result.leaked.push(id);
        }

        result
    }

    /// Returns true when this was the last life.
    fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            tracing::info!("last life lost");
            return true;
        }
        false
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.get_mut(id)
    }

    /// Every enemy still held, oldest first.
    pub fn enemies(&self) -> impl Iterator<Item = (EnemyId, &Enemy)> {
        self.spawn_order
            .iter()
            .filter_map(|&id| self.enemies.get(id).map(|enemy| (id, enemy)))
    }

    pub fn active_enemies(&self) -> impl Iterator<Item = (EnemyId, &Enemy)> {
        self.enemies().filter(|(_, e)| e.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_enemies().count()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn reset(&mut self) {
        self.enemies.clear();
        self.spawn_order.clear();
        self.lives = self.starting_lives;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TowerKind;
    use crate::tower::Tower;

    fn short_path() -> Vec<Vec2> {
        vec![Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0)]
    }

    #[test]
    fn spawns_at_path_start() {
        let mut manager = EnemyManager::new(short_path(), EnemySpec::default(), 10);
        let id = manager.spawn_enemy().unwrap();
        assert_eq!(manager.get(id).unwrap().position, Vec2::ZERO);
        assert_eq!(manager.active_count(), 1);
    }

    #[test]
    fn empty_path_spawns_nothing() {
        let mut manager = EnemyManager::new(Vec::new(), EnemySpec::default(), 10);
        assert!(manager.spawn_enemy().is_none());
    }

    #[test]
    fn leaking_costs_a_life() {
        let mut manager = EnemyManager::new(short_path(), EnemySpec::default(), 10);
        let id = manager.spawn_enemy().unwrap();

        // 80 px/s for 0.05 s = 4 px: now 4 px from the end, inside the threshold
        let first = manager.update(0.05);
        assert!(first.leaked.is_empty());

        let second = manager.update(0.05);
        assert_eq!(second.leaked, vec![id]);
        assert!(!second.game_over);
        assert_eq!(manager.lives(), 9);
        assert_eq!(manager.active_count(), 0);

        // removed on the next pass
        manager.update(0.05);
        assert!(manager.get(id).is_none());
    }

    #[test]
    fn last_life_ends_the_game() {
        let mut manager = EnemyManager::new(short_path(), EnemySpec::default(), 1);
        manager.spawn_enemy();
        manager.update(0.05);
        let update = manager.update(0.05);
        assert!(update.game_over);
        assert!(manager.is_game_over());
    }

    #[test]
    fn killed_enemies_are_purged_without_cost() {
        let mut manager = EnemyManager::new(short_path(), EnemySpec::default(), 10);
        let id = manager.spawn_enemy().unwrap();
        manager.get_mut(id).unwrap().take_damage(100);

        let update = manager.update(0.05);
        assert!(update.leaked.is_empty());
        assert!(manager.get(id).is_none());
        assert_eq!(manager.lives(), 10);
    }

    #[test]
    fn equidistant_target_goes_to_the_older_enemy() {
        let path = vec![Vec2::new(0.0, 0.0), Vec2::new(800.0, 0.0)];
        let mut manager = EnemyManager::new(path, EnemySpec::default(), 10);

        let first = manager.spawn_enemy().unwrap();
        let older = manager.spawn_enemy().unwrap();
        manager.get_mut(first).unwrap().take_damage(100);
        manager.update(0.0);

        // lands in the slot the dead enemy freed
        let newer = manager.spawn_enemy().unwrap();
        manager.get_mut(older).unwrap().position = Vec2::new(10.0, 0.0);
        manager.get_mut(newer).unwrap().position = Vec2::new(-10.0, 0.0);

        let ids: Vec<_> = manager.active_enemies().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![older, newer]);

        let tower = Tower::new(Vec2::ZERO, TowerKind::Basic);
        assert_eq!(tower.find_target(150.0, manager.active_enemies()), Some(older));
    }

    #[test]
    fn reset_restores_lives() {
        let mut manager = EnemyManager::new(short_path(), EnemySpec::default(), 1);
        manager.spawn_enemy();
        manager.update(0.05);
        manager.update(0.05);
        manager.reset();
        assert_eq!(manager.lives(), 1);
        assert_eq!(manager.enemies().count(), 0);
    }
}
