use crate::enemies::EnemyManager;
use crate::enemy::EnemyId;
use arcade_core::Tick;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveState {
    Idle,
    Active { spawned: u32 },
}

/// What the wave controller did this tick.
#[derive(Debug, Default)]
pub struct WaveUpdate {
    pub spawned: Option<EnemyId>,
    pub completed: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct WaveController {
    wave_size: u32,
    spawn_delay_ticks: u64,
    state: WaveState,
    last_spawn_tick: Option<Tick>,
    current_wave: u32,
    waves_completed: u32,
}

impl WaveController {
    pub fn new(wave_size: u32, spawn_delay_ticks: u64) -> Self {
        Self {
            wave_size,
            spawn_delay_ticks,
            state: WaveState::Idle,
            last_spawn_tick: None,
            current_wave: 0,
            waves_completed: 0,
        }
    }

    /// Begin the next wave. Returns false if one is already running.
    pub fn start_wave(&mut self) -> bool {
        if self.is_wave_active() {
            return false;
        }
        self.current_wave += 1;
        self.state = WaveState::Active { spawned: 0 };
        self.last_spawn_tick = None;
        tracing::info!(wave = self.current_wave, size = self.wave_size, "wave started");
        true
    }

    pub fn update(&mut self, tick: Tick, enemies: &mut EnemyManager) -> WaveUpdate {
        let mut result = WaveUpdate::default();
        let WaveState::Active { mut spawned } = self.state else {
            return result;
        };

        let due = match self.last_spawn_tick {
            None => true,
            Some(last) => tick.saturating_sub(last) >= self.spawn_delay_ticks,
        };
        if spawned < self.wave_size && due {
            result.spawned = enemies.spawn_enemy();
            spawned += 1;
            self.last_spawn_tick = Some(tick);
            self.state = WaveState::Active { spawned };
        }

        result.completed = self.check_completion(enemies);
        result
    }

    /// Finish the wave once everything has spawned and nothing is left alive.
    pub fn check_completion(&mut self, enemies: &EnemyManager) -> Option<u32> {
        let WaveState::Active { spawned } = self.state else {
            return None;
        };
        if spawned < self.wave_size || enemies.active_count() > 0 {
            return None;
        }
        self.state = WaveState::Idle;
        self.waves_completed += 1;
        tracing::info!(wave = self.current_wave, "wave completed");
        Some(self.current_wave)
    }

    pub fn is_wave_active(&self) -> bool {
        matches!(self.state, WaveState::Active { .. })
    }

    pub fn state(&self) -> WaveState {
        self.state
    }

    pub fn current_wave(&self) -> u32 {
        self.current_wave
    }

    pub fn waves_completed(&self) -> u32 {
        self.waves_completed
    }

    pub fn wave_size(&self) -> u32 {
        self.wave_size
    }

    pub fn reset(&mut self) {
        self.state = WaveState::Idle;
        self.last_spawn_tick = None;
        self.current_wave = 0;
        self.waves_completed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_path, EnemySpec};

    fn enemies() -> EnemyManager {
        EnemyManager::new(default_path(), EnemySpec::default(), 10)
    }

    #[test]
    fn idle_controller_spawns_nothing() {
        let mut waves = WaveController::new(3, 18);
        let mut enemies = enemies();
        let update = waves.update(0, &mut enemies);
        assert!(update.spawned.is_none());
        assert!(update.completed.is_none());
        assert_eq!(enemies.active_count(), 0);
    }

    #[test]
    fn start_is_ignored_mid_wave() {
        let mut waves = WaveController::new(3, 18);
        assert!(waves.start_wave());
        assert!(!waves.start_wave());
        assert_eq!(waves.current_wave(), 1);
    }

    #[test]
    fn spawns_on_the_delay() {
        let mut waves = WaveController::new(3, 18);
        let mut enemies = enemies();
        waves.start_wave();

        // first spawn is immediate
        assert!(waves.update(5, &mut enemies).spawned.is_some());
        assert!(waves.update(22, &mut enemies).spawned.is_none());
        assert!(waves.update(23, &mut enemies).spawned.is_some());
        assert!(waves.update(41, &mut enemies).spawned.is_some());

        // wave size reached
        assert!(waves.update(100, &mut enemies).spawned.is_none());
        assert_eq!(waves.state(), WaveState::Active { spawned: 3 });
    }

    #[test]
    fn completes_once_the_field_is_clear() {
        let mut waves = WaveController::new(2, 1);
        let mut enemies = enemies();
        waves.start_wave();

        let first = waves.update(0, &mut enemies).spawned.unwrap();
        let second = waves.update(1, &mut enemies).spawned.unwrap();
        assert!(waves.update(2, &mut enemies).completed.is_none());

        enemies.get_mut(first).unwrap().die();
        enemies.get_mut(second).unwrap().die();
        assert_eq!(waves.update(3, &mut enemies).completed, Some(1));
        assert!(!waves.is_wave_active());
        assert_eq!(waves.waves_completed(), 1);

        assert!(waves.start_wave());
        assert_eq!(waves.current_wave(), 2);
    }

    #[test]
    fn reset_clears_progress() {
        let mut waves = WaveController::new(2, 1);
        waves.start_wave();
        waves.reset();
        assert!(!waves.is_wave_active());
        assert_eq!(waves.current_wave(), 0);
        assert_eq!(waves.waves_completed(), 0);
    }
}
