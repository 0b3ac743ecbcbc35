use crate::actions::TdAction;
use crate::camera::CameraController;
use crate::config::{TdConfig, TowerKind};
use crate::enemies::EnemyManager;
use crate::events::TdEvent;
use crate::grid::GridSystem;
use crate::path::PathRenderer;
use crate::towers::{PlacementError, TowerManager};
use crate::waves::WaveController;
use arcade_core::{ActionEnvelope, Game, Micros, PlayerId, TerminalOutcome, Tick};
use glam::Vec2;

/// The tower-defense scene: owns every subsystem and runs them in a fixed
/// order each tick.
pub struct TdGame {
    config: TdConfig,
    path: PathRenderer,
    grid: GridSystem,
    towers: TowerManager,
    enemies: EnemyManager,
    waves: WaveController,
    camera: CameraController,
    selected: TowerKind,
    outcome: Option<TerminalOutcome>,
}

impl TdGame {
    pub fn config(&self) -> &TdConfig {
        &self.config
    }

    pub fn path(&self) -> &PathRenderer {
        &self.path
    }

    pub fn grid(&self) -> &GridSystem {
        &self.grid
    }

    pub fn towers(&self) -> &TowerManager {
        &self.towers
    }

    pub fn enemies(&self) -> &EnemyManager {
        &self.enemies
    }

    pub fn waves(&self) -> &WaveController {
        &self.waves
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn selected_tower(&self) -> TowerKind {
        self.selected
    }

    pub fn outcome(&self) -> Option<TerminalOutcome> {
        self.outcome
    }

    /// Whether a tower of `kind` could go in the cell containing `world`.
    pub fn check_placement(&self, world: Vec2, kind: TowerKind) -> Result<Vec2, PlacementError> {
        let cell = self.grid.cell_center(world);
        if self.waves.is_wave_active() {
            return Err(PlacementError::WaveActive);
        }
        self.towers
            .check_placement(cell, kind, &self.config, &self.path)?;
        Ok(cell)
    }

    fn try_place(&mut self, world: Vec2, kind: TowerKind, out_events: &mut Vec<TdEvent>) {
        let placed = self.check_placement(world, kind).and_then(|cell| {
            self.towers
                .place_tower(cell, kind, &self.config, &self.path)
                .map(|id| (id, cell))
        });

        match placed {
            Ok((id, position)) => {
                out_events.push(TdEvent::TowerPlaced { id, position, kind });
                out_events.push(TdEvent::GoldChanged {
                    gold: self.towers.gold(),
                });
            }
            Err(reason) => {
                tracing::debug!(%reason, x = world.x, y = world.y, "placement rejected");
                out_events.push(TdEvent::PlacementRejected {
                    position: self.grid.cell_center(world),
                    reason,
                });
            }
        }
    }

    fn hover(&mut self, screen: Vec2) {
        if !self.camera.should_process_game_input() {
            self.grid.clear_preview();
            return;
        }
        let cell = self.grid.cell_center(self.camera.screen_to_world(screen));
        self.grid.set_hovered(Some(cell));
        self.refresh_preview();
    }

    fn refresh_preview(&mut self) {
        if let Some(cell) = self.grid.hovered() {
            let valid = self.check_placement(cell, self.selected).is_ok();
            self.grid.update_preview(valid);
        }
    }

    fn apply_action(&mut self, tick: Tick, action: &TdAction, out_events: &mut Vec<TdEvent>) {
        match *action {
            TdAction::StartWave => {
                if self.waves.start_wave() {
                    self.grid.clear_preview();
                    out_events.push(TdEvent::WaveStarted {
                        wave: self.waves.current_wave(),
                    });
                }
            }
            TdAction::SelectTower(kind) => {
                self.selected = kind;
                self.refresh_preview();
                out_events.push(TdEvent::TowerSelected { kind });
            }
            TdAction::PointerDown { x, y } => {
                if self.camera.pointer_down(Vec2::new(x, y), tick) {
                    out_events.push(TdEvent::CameraReset);
                }
            }
            TdAction::PointerMove { x, y, down } => {
                let screen = Vec2::new(x, y);
                self.camera.pointer_move(screen, down);
                self.hover(screen);
            }
            TdAction::PointerUp { x, y } => {
                let was_pan = self.camera.pointer_up();
                if !was_pan {
                    let world = self.camera.screen_to_world(Vec2::new(x, y));
                    self.try_place(world, self.selected, out_events);
                }
            }
            TdAction::Wheel { delta_y } => self.camera.wheel(delta_y),
            TdAction::PlaceTower { x, y, kind } => {
                self.try_place(Vec2::new(x, y), kind, out_events);
            }
            TdAction::ResetCamera => {
                self.camera.reset();
                out_events.push(TdEvent::CameraReset);
            }
            TdAction::Restart => {
                self.restart();
                out_events.push(TdEvent::GoldChanged {
                    gold: self.towers.gold(),
                });
                out_events.push(TdEvent::LivesChanged {
                    lives: self.enemies.lives(),
                });
            }
        }
    }

    fn finish_wave(&mut self, wave: u32, out_events: &mut Vec<TdEvent>) {
        out_events.push(TdEvent::WaveCompleted { wave });

        let total = self.config.waves_total;
        if total > 0 && self.waves.waves_completed() >= total && self.outcome.is_none() {
            self.outcome = Some(TerminalOutcome::Win);
            tracing::info!(waves = total, "all waves cleared");
            out_events.push(TdEvent::Victory {
                tokens: self.config.victory_tokens,
            });
        }
    }
}

impl Game for TdGame {
    type Config = TdConfig;
    type Action = TdAction;
    type Observation = td_types::TdObservation;
    type Event = TdEvent;

    fn new(config: Self::Config, _seed: u64) -> Self {
        let (points, width) = config.effective_path();
        let double_tap_ticks =
            config.duration_to_ticks(Micros::from_millis(config.camera.double_tap_ms));

        let mut camera =
            CameraController::new(config.camera.clone(), config.viewport(), double_tap_ticks);
        camera.reset();

        Self {
            path: PathRenderer::new(points.clone(), width),
            grid: GridSystem::new(config.cell_size),
            towers: TowerManager::new(config.starting_gold),
            enemies: EnemyManager::new(points, config.enemy.clone(), config.starting_lives),
            waves: WaveController::new(config.wave_size, config.spawn_delay_ticks()),
            camera,
            selected: TowerKind::Basic,
            outcome: None,
            config,
        }
    }

    fn tick_hz(config: &Self::Config) -> u32 {
        config.tick_hz
    }

    fn step(
        &mut self,
        tick: Tick,
        actions: &[ActionEnvelope<Self::Action>],
        out_events: &mut Vec<Self::Event>,
    ) {
        // 1. Player input
        for action in actions {
            self.apply_action(tick, &action.payload, out_events);
        }
        if self.outcome.is_some() {
            return;
        }

        // 2. Wave controller releases enemies
        let wave = self.waves.update(tick, &mut self.enemies);
        if let Some(id) = wave.spawned {
            out_events.push(TdEvent::EnemySpawned { id });
        }
        if let Some(done) = wave.completed {
            self.finish_wave(done, out_events);
        }

        // 3. Enemies walk; leaks cost lives
        let moved = self.enemies.update(self.config.dt());
        for &id in &moved.leaked {
            out_events.push(TdEvent::EnemyLeaked { id });
        }
        if !moved.leaked.is_empty() {
            out_events.push(TdEvent::LivesChanged {
                lives: self.enemies.lives(),
            });
        }
        if moved.game_over {
            self.outcome = Some(TerminalOutcome::Lose);
            out_events.push(TdEvent::GameOver);
            return;
        }

        // 4. Towers fire, projectiles land
        for shot in self.towers.update(tick, &self.config, &self.enemies) {
            out_events.push(TdEvent::ProjectileFired {
                tower: shot.tower,
                target: shot.target,
                from: shot.from,
                to: shot.to,
            });
        }
        let kills = self.towers.advance_projectiles(tick, &mut self.enemies);

        // 5. Rewards
        let mut earned = 0;
        for kill in &kills {
            earned += kill.reward;
            out_events.push(TdEvent::EnemyKilled {
                id: kill.enemy,
                position: kill.position,
                reward: kill.reward,
            });
        }
        if earned > 0 {
            self.towers.add_gold(earned);
            out_events.push(TdEvent::GoldChanged {
                gold: self.towers.gold(),
            });
        }

        // 6. Wave completion
        if let Some(done) = self.waves.check_completion(&self.enemies) {
            self.finish_wave(done, out_events);
        }

        self.refresh_preview();
    }

    fn observe(&self, tick: Tick, _player: PlayerId) -> Self::Observation {
        crate::observe::build_observation(self, tick)
    }

    fn is_terminal(&self) -> Option<TerminalOutcome> {
        self.outcome
    }

    fn restart(&mut self) {
        self.towers.reset();
        self.enemies.reset();
        self.waves.reset();
        self.grid.clear_preview();
        self.camera.restart();
        self.selected = TowerKind::Basic;
        self.outcome = None;
        tracing::info!("tower defense restarted");
    }
}
