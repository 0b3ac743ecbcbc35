use crate::config::TowerKind;
use crate::enemy::{Enemy, EnemyId};
use arcade_core::Tick;
use glam::Vec2;
use slotmap::new_key_type;

new_key_type! { pub struct TowerId; }

#[derive(Clone, Debug)]
pub struct Tower {
    pub position: Vec2,
    pub kind: TowerKind,
    pub last_fire_tick: Option<Tick>,
    pub target: Option<EnemyId>,
}

impl Tower {
    pub fn new(position: Vec2, kind: TowerKind) -> Self {
        Self {
            position,
            kind,
            last_fire_tick: None,
            target: None,
        }
    }

    pub fn can_fire(&self, tick: Tick, period_ticks: u64) -> bool {
        match self.last_fire_tick {
            None => true,
            Some(last) => tick.saturating_sub(last) >= period_ticks,
        }
    }

    /// Ticks until the tower is ready again.
    pub fn cooldown_remaining(&self, tick: Tick, period_ticks: u64) -> u64 {
        match self.last_fire_tick {
            None => 0,
            Some(last) => (last + period_ticks).saturating_sub(tick),
        }
    }

    /// Nearest active enemy within `range`.
    ///
    /// The search starts with `range` as the best distance and only accepts
    /// strictly closer enemies, so an enemy sitting exactly on the edge is
    /// ignored and ties keep the first enemy seen.
    pub fn find_target<'a>(
        &self,
        range: f32,
        enemies: impl IntoIterator<Item = (EnemyId, &'a Enemy)>,
    ) -> Option<EnemyId> {
        let mut closest = None;
        let mut closest_distance = range;

        for (id, enemy) in enemies {
            if !enemy.is_active() {
                continue;
            }
            let distance = self.position.distance(enemy.position);
            if distance <= range && distance < closest_distance {
                closest = Some(id);
                closest_distance = distance;
            }
        }

        closest
    }

    /// Launch a projectile at `target` (if the cooldown allows).
    pub fn fire(
        &mut self,
        tick: Tick,
        period_ticks: u64,
        target: (EnemyId, Vec2),
        damage: i32,
        flight_ticks: u64,
    ) -> Option<Projectile> {
        if !self.can_fire(tick, period_ticks) {
            return None;
        }

        let (target_id, destination) = target;
        self.last_fire_tick = Some(tick);
        self.target = Some(target_id);

        Some(Projectile {
            origin: self.position,
            destination,
            target: target_id,
            damage,
            fired_tick: tick,
            arrive_tick: tick + flight_ticks,
        })
    }
}

/// A shot travelling in a straight line to where its target stood when fired.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub origin: Vec2,
    pub destination: Vec2,
    pub target: EnemyId,
    pub damage: i32,
    pub fired_tick: Tick,
    pub arrive_tick: Tick,
}

impl Projectile {
    pub fn has_arrived(&self, tick: Tick) -> bool {
        tick >= self.arrive_tick
    }

    pub fn position_at(&self, tick: Tick) -> Vec2 {
        let flight = self.arrive_tick.saturating_sub(self.fired_tick);
        if flight == 0 {
            return self.destination;
        }
        let elapsed = tick.saturating_sub(self.fired_tick).min(flight);
        self.origin
            .lerp(self.destination, elapsed as f32 / flight as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemySpec;
    use slotmap::SlotMap;

    fn enemies(points: &[(f32, f32, bool)]) -> (SlotMap<EnemyId, Enemy>, Vec<EnemyId>) {
        let mut map = SlotMap::with_key();
        let ids = points
            .iter()
            .map(|&(x, y, active)| {
                let mut enemy = Enemy::new(Vec2::new(x, y), &EnemySpec::default());
                if !active {
                    enemy.die();
                }
                map.insert(enemy)
            })
            .collect();
        (map, ids)
    }

    #[test]
    fn fire_cooldown() {
        let mut tower = Tower::new(Vec2::new(100.0, 100.0), TowerKind::Basic);
        assert!(tower.can_fire(0, 30));

        tower.last_fire_tick = Some(10);
        assert!(!tower.can_fire(39, 30));
        assert_eq!(tower.cooldown_remaining(39, 30), 1);
        assert!(tower.can_fire(40, 30));
        assert_eq!(tower.cooldown_remaining(45, 30), 0);
    }

    #[test]
    fn finds_closest_enemy_in_range() {
        let tower = Tower::new(Vec2::new(100.0, 100.0), TowerKind::Basic);
        let (map, ids) = enemies(&[(120.0, 120.0, true), (200.0, 100.0, true), (110.0, 110.0, true)]);
        assert_eq!(tower.find_target(150.0, map.iter()), Some(ids[2]));
    }

    #[test]
    fn none_when_out_of_range() {
        let tower = Tower::new(Vec2::new(100.0, 100.0), TowerKind::Basic);
        let (map, _) = enemies(&[(300.0, 300.0, true), (400.0, 400.0, true)]);
        assert_eq!(tower.find_target(150.0, map.iter()), None);
    }

    #[test]
    fn ignores_inactive_enemies() {
        let tower = Tower::new(Vec2::new(100.0, 100.0), TowerKind::Basic);
        let (map, ids) = enemies(&[(110.0, 110.0, false), (120.0, 120.0, true)]);
        assert_eq!(tower.find_target(150.0, map.iter()), Some(ids[1]));
    }

    #[test]
    fn range_edge_is_excluded() {
        let tower = Tower::new(Vec2::new(0.0, 0.0), TowerKind::Basic);
        let (map, _) = enemies(&[(150.0, 0.0, true)]);
        assert_eq!(tower.find_target(150.0, map.iter()), None);
    }

    #[test]
    fn firing_sets_cooldown_and_creates_projectile() {
        let (_, ids) = enemies(&[(150.0, 150.0, true)]);
        let mut tower = Tower::new(Vec2::new(100.0, 100.0), TowerKind::Basic);

        let shot = tower
            .fire(5, 30, (ids[0], Vec2::new(150.0, 150.0)), 2, 18)
            .unwrap();
        assert_eq!(tower.last_fire_tick, Some(5));
        assert_eq!(tower.target, Some(ids[0]));
        assert_eq!(shot.arrive_tick, 23);

        // still cooling down
        assert!(tower
            .fire(20, 30, (ids[0], Vec2::new(150.0, 150.0)), 2, 18)
            .is_none());
    }

    #[test]
    fn projectile_interpolates_linearly() {
        let (_, ids) = enemies(&[(0.0, 0.0, true)]);
        let shot = Projectile {
            origin: Vec2::ZERO,
            destination: Vec2::new(100.0, 0.0),
            target: ids[0],
            damage: 1,
            fired_tick: 10,
            arrive_tick: 20,
        };
        assert_eq!(shot.position_at(10), Vec2::ZERO);
        assert_eq!(shot.position_at(15), Vec2::new(50.0, 0.0));
        assert_eq!(shot.position_at(40), Vec2::new(100.0, 0.0));
        assert!(!shot.has_arrived(19));
        assert!(shot.has_arrived(20));
    }
}
