//! Fixed-rate driver for any [`Game`].
//!
//! The host owns the tick counter and a schedule of pending actions. Each
//! call to [`GameHost::step_one_tick`] plays the role of one frame callback of
//! a render loop: it pulls the actions due on the next tick, orders them
//! deterministically and hands them to the game.

use arcade_core::{ActionEnvelope, Game, PlayerId, TerminalOutcome, Tick};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct RunResult<G: Game> {
    pub outcome: Option<TerminalOutcome>,
    pub final_tick: Tick,
    pub events: Vec<G::Event>,
}

pub struct GameHost<G: Game> {
    game: G,
    current_tick: Tick,
    tick_hz: u32,
    next_player_id: PlayerId,
    next_action_id: u64,
    pending_actions: BTreeMap<Tick, Vec<ActionEnvelope<G::Action>>>,
}

impl<G: Game> GameHost<G> {
    pub fn new(config: G::Config, seed: u64, tick_hz: u32) -> Self {
        Self {
            game: G::new(config, seed),
            current_tick: 0,
            tick_hz,
            next_player_id: 0,
            next_action_id: 0,
            pending_actions: BTreeMap::new(),
        }
    }

    /// Runs at the rate the config was tuned for.
    pub fn from_config(config: G::Config, seed: u64) -> Self {
        let tick_hz = G::tick_hz(&config);
        Self::new(config, seed, tick_hz)
    }

    pub fn join_player(&mut self) -> PlayerId {
        let id = self.next_player_id;
        self.next_player_id += 1;
        id
    }

    /// Submit an action to be executed at the given tick.
    /// If `intended_tick` is in the past or current, schedules for the next tick.
    /// Returns the actual tick the action was scheduled for.
    pub fn submit(&mut self, mut action: ActionEnvelope<G::Action>) -> Tick {
        let scheduled_tick = if action.intended_tick <= self.current_tick {
            self.current_tick + 1
        } else {
            action.intended_tick
        };

        action.intended_tick = scheduled_tick;
        self.pending_actions
            .entry(scheduled_tick)
            .or_default()
            .push(action);

        scheduled_tick
    }

    /// Schedule `payload` for the next tick with a host-assigned action id.
    pub fn submit_now(&mut self, player_id: PlayerId, payload: G::Action) -> Tick {
        let action_id = self.next_action_id;
        self.next_action_id += 1;
        self.submit(ActionEnvelope::new(
            player_id,
            action_id,
            self.current_tick + 1,
            payload,
        ))
    }

    pub fn run_for_ticks(&mut self, max_ticks: Tick) -> RunResult<G> {
        let mut all_events = Vec::new();

        for _ in 0..max_ticks {
            match self.step_one_tick() {
                Some(events) => all_events.extend(events),
                None => break,
            }
        }

        let outcome = self.game.is_terminal();
        if let Some(outcome) = outcome {
            tracing::debug!(tick = self.current_tick, ?outcome, "game reached terminal state");
        }

        RunResult {
            outcome,
            final_tick: self.current_tick,
            events: all_events,
        }
    }

    /// Advance by one tick. Returns None if game already terminal, otherwise the events from this tick.
    pub fn step_one_tick(&mut self) -> Option<Vec<G::Event>> {
        if self.game.is_terminal().is_some() {
            return None;
        }

        self.current_tick += 1;

        let mut actions = self
            .pending_actions
            .remove(&self.current_tick)
            .unwrap_or_default();

        actions.sort_by_key(ActionEnvelope::order_key);

        let mut tick_events = Vec::new();
        self.game
            .step(self.current_tick, &actions, &mut tick_events);

        Some(tick_events)
    }

    /// Starts the game over, including after it ended. Queued input is dropped;
    /// the tick counter keeps running.
    pub fn restart(&mut self) {
        self.pending_actions.clear();
        self.game.restart();
        tracing::debug!(tick = self.current_tick, "game restarted");
    }

    pub fn observe(&self, player: PlayerId) -> G::Observation {
        self.game.observe(self.current_tick, player)
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    pub fn is_terminal(&self) -> Option<TerminalOutcome> {
        self.game.is_terminal()
    }
}
