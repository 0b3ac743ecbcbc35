use crate::background::BackgroundScroller;
use crate::coins::CoinSystem;
use crate::config::BatflyConfig;
use crate::distance::DistanceTrigger;
use crate::observe::{build_observation, BatflyObservation};
use crate::obstacles::ObstacleSystem;
use crate::path::PathManager;
use crate::player::PlayerController;
use arcade_core::{ActionEnvelope, Game, PlayerId, TerminalOutcome, Tick};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BatflyAction {
    /// Tap: the first one starts the run.
    Flap,
    Resize { width: f32, height: f32 },
    Restart,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BatflyEvent {
    Started,
    CoinCollected { score: u32 },
    HitObstacle,
    LeftScreen,
    TokensAwarded { amount: u32, score: u32 },
    Restarted,
}

pub struct BatflyGame {
    config: BatflyConfig,
    rng: ChaCha8Rng,
    path: PathManager,
    player: PlayerController,
    coins: CoinSystem,
    obstacles: ObstacleSystem,
    background: BackgroundScroller,
    retarget: DistanceTrigger,
    score: u32,
    outcome: Option<TerminalOutcome>,
}

impl BatflyGame {
    pub fn config(&self) -> &BatflyConfig {
        &self.config
    }

    pub fn path(&self) -> &PathManager {
        &self.path
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn coins(&self) -> &CoinSystem {
        &self.coins
    }

    pub fn obstacles(&self) -> &ObstacleSystem {
        &self.obstacles
    }

    pub fn background(&self) -> &BackgroundScroller {
        &self.background
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn outcome(&self) -> Option<TerminalOutcome> {
        self.outcome
    }

    fn centre(&self) -> Vec2 {
        self.config.viewport() * 0.5
    }

    fn spawn_x(&self) -> f32 {
        self.config.viewport_width + self.config.spawn_margin
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        let viewport = self.config.viewport();
        self.background.resize(viewport);
        self.path.resize(height);
        self.player.set_position(viewport * 0.5);
        tracing::debug!(width, height, "viewport resized");
    }

    fn apply_action(&mut self, action: &BatflyAction, out_events: &mut Vec<BatflyEvent>) {
        match *action {
            BatflyAction::Flap => {
                if self.outcome.is_some() {
                    return;
                }
                if !self.player.is_started() {
                    self.player.start();
                    out_events.push(BatflyEvent::Started);
                }
                self.player.fly(self.config.fly_velocity);
            }
            BatflyAction::Resize { width, height } => self.resize(width, height),
            BatflyAction::Restart => {
                self.restart();
                out_events.push(BatflyEvent::Restarted);
            }
        }
    }

    fn spawn(&mut self) {
        let speed = self.config.scroll_speed;
        if self.retarget.advance(speed) {
            self.path.random_path(&mut self.rng);
        }
        if self.coins.advance(speed) {
            self.coins.add_coin(self.spawn_x(), self.path.path_y());
        }
        if self.obstacles.advance(speed) {
            self.obstacles
                .add_spike_pair(self.spawn_x(), self.path.path_y(), self.path.path_height());
        }
    }

    fn lose(&mut self, event: BatflyEvent, out_events: &mut Vec<BatflyEvent>) {
        tracing::info!(score = self.score, ?event, "bat fly lost");
        self.outcome = Some(TerminalOutcome::Lose);
        out_events.push(event);
    }
}

impl Game for BatflyGame {
    type Config = BatflyConfig;
    type Action = BatflyAction;
    type Observation = BatflyObservation;
    type Event = BatflyEvent;

    fn new(config: Self::Config, seed: u64) -> Self {
        let viewport = config.viewport();
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            path: PathManager::new(&config),
            player: PlayerController::new(viewport * 0.5, config.player_size),
            coins: CoinSystem::new(config.coin_distance, config.coin_size),
            obstacles: ObstacleSystem::new(config.spike_distance, config.spike_size),
            background: BackgroundScroller::new(config.background_size, viewport),
            retarget: DistanceTrigger::new(config.retarget_distance),
            score: 0,
            outcome: None,
            config,
        }
    }

    fn tick_hz(config: &Self::Config) -> u32 {
        config.tick_hz
    }

    fn step(
        &mut self,
        _tick: Tick,
        actions: &[ActionEnvelope<Self::Action>],
        out_events: &mut Vec<Self::Event>,
    ) {
        for action in actions {
            self.apply_action(&action.payload, out_events);
        }
        if self.outcome.is_some() {
            return;
        }

        let speed = self.config.scroll_speed;
        self.background.update(speed);
        if !self.player.is_started() {
            return;
        }

        if self
            .player
            .is_out_of_bounds(self.config.viewport_height)
        {
            self.lose(BatflyEvent::LeftScreen, out_events);
            return;
        }

        self.spawn();
        self.coins.scroll(speed);
        self.obstacles.scroll(speed);
        self.path.update();

        self.player.integrate(self.config.gravity, self.config.dt());

        let body = self.player.bounds();
        if self.obstacles.hits(&body) {
            self.lose(BatflyEvent::HitObstacle, out_events);
            return;
        }

        let collected = self.coins.collect(&body);
        if collected > 0 {
            self.score += collected;
            out_events.push(BatflyEvent::CoinCollected { score: self.score });

            if self.score >= self.config.win_score {
                tracing::info!(score = self.score, "bat fly won");
                self.outcome = Some(TerminalOutcome::Win);
                out_events.push(BatflyEvent::TokensAwarded {
                    amount: self.config.token_reward,
                    score: self.score,
                });
            }
        }
    }

    fn observe(&self, tick: Tick, _player: PlayerId) -> Self::Observation {
        build_observation(self, tick)
    }

    fn is_terminal(&self) -> Option<TerminalOutcome> {
        self.outcome
    }

    fn restart(&mut self) {
        self.score = 0;
        self.outcome = None;
        self.coins.reset();
        self.obstacles.reset();
        self.retarget.reset();
        self.path = PathManager::new(&self.config);
        self.player.reset(self.centre());
        tracing::info!("bat fly restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(game: &mut BatflyGame, tick: Tick, actions: Vec<BatflyAction>) -> Vec<BatflyEvent> {
        let envelopes: Vec<_> = actions
            .into_iter()
            .enumerate()
            .map(|(i, a)| ActionEnvelope::new(0, i as u64, tick, a))
            .collect();
        let mut events = Vec::new();
        game.step(tick, &envelopes, &mut events);
        events
    }

    #[test]
    fn nothing_moves_before_the_first_flap() {
        let mut game = BatflyGame::new(BatflyConfig::default(), 1);
        for tick in 1..=100 {
            assert!(step(&mut game, tick, Vec::new()).is_empty());
        }
        assert_eq!(game.player().position(), Vec2::new(400.0, 300.0));
        assert!(game.coins().coins().is_empty());
        // the backdrop scrolls regardless
        assert_eq!(game.background().tiles()[0], -100.0);
    }

    #[test]
    fn falling_off_the_screen_loses() {
        let mut game = BatflyGame::new(BatflyConfig::default(), 1);
        let events = step(&mut game, 1, vec![BatflyAction::Flap]);
        assert_eq!(events, vec![BatflyEvent::Started]);

        let mut tick = 2;
        let mut all = Vec::new();
        while game.is_terminal().is_none() && tick < 1_000 {
            all.extend(step(&mut game, tick, Vec::new()));
            tick += 1;
        }
        assert_eq!(game.is_terminal(), Some(TerminalOutcome::Lose));
        // the initial corridor is 200 px tall either side, so the walls get there first
        assert!(all.contains(&BatflyEvent::HitObstacle) || all.contains(&BatflyEvent::LeftScreen));
    }

    #[test]
    fn flying_up_forever_leaves_through_the_top() {
        let config = BatflyConfig {
            spike_distance: 1.0e9,
            ..BatflyConfig::default()
        };
        let mut game = BatflyGame::new(config, 1);
        let mut events = Vec::new();
        for tick in 1..400 {
            events.extend(step(&mut game, tick, vec![BatflyAction::Flap]));
            if game.is_terminal().is_some() {
                break;
            }
        }
        assert!(events.contains(&BatflyEvent::LeftScreen));
    }

    #[test]
    fn coins_score_and_five_wins() {
        let config = BatflyConfig {
            gravity: 0.0,
            spike_distance: 1.0e9,
            path_offset_max: 0,
            ..BatflyConfig::default()
        };
        let mut game = BatflyGame::new(config, 1);
        let mut events = step(&mut game, 1, vec![BatflyAction::Flap]);
        // with no gravity a zero-speed bat hovers on the corridor centre
        game.player.fly(0.0);
        game.player.set_position(Vec2::new(400.0, 300.0));

        let mut tick = 2;
        while game.is_terminal().is_none() && tick < 2_000 {
            events.extend(step(&mut game, tick, Vec::new()));
            tick += 1;
        }

        assert_eq!(game.is_terminal(), Some(TerminalOutcome::Win));
        assert_eq!(game.score(), 5);
        assert!(events.contains(&BatflyEvent::CoinCollected { score: 1 }));
        assert!(events.contains(&BatflyEvent::TokensAwarded { amount: 1, score: 5 }));
    }

    #[test]
    fn restart_clears_the_run() {
        let mut game = BatflyGame::new(BatflyConfig::default(), 1);
        step(&mut game, 1, vec![BatflyAction::Flap]);
        for tick in 2..80 {
            step(&mut game, tick, Vec::new());
        }
        let events = step(&mut game, 80, vec![BatflyAction::Restart]);
        assert_eq!(events, vec![BatflyEvent::Restarted]);
        assert!(!game.player().is_started());
        assert_eq!(game.score(), 0);
        assert!(game.coins().coins().is_empty());
        assert!(game.obstacles().spikes().is_empty());
    }

    #[test]
    fn resize_recentres() {
        let mut game = BatflyGame::new(BatflyConfig::default(), 1);
        step(&mut game, 1, vec![BatflyAction::Resize { width: 400.0, height: 800.0 }]);
        assert_eq!(game.player().position(), Vec2::new(200.0, 400.0));
        assert_eq!(game.path().path_y(), 400.0);
    }
}
