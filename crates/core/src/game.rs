use crate::envelope::{ActionEnvelope, PlayerId, Tick};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalOutcome {
    Win,
    Lose,
}

impl TerminalOutcome {
    pub fn is_win(self) -> bool {
        matches!(self, TerminalOutcome::Win)
    }
}

impl fmt::Display for TerminalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalOutcome::Win => f.write_str("Win"),
            TerminalOutcome::Lose => f.write_str("Lose"),
        }
    }
}

/// A fixed-rate arcade game.
///
/// The host calls [`Game::step`] once per frame with the actions due on that
/// frame. Games never read wall-clock time: every duration is converted to
/// ticks at the rate reported by [`Game::tick_hz`].
pub trait Game: Sized {
    type Config: Clone + Send + Sync + 'static;
    type Action: Clone + Send + Sync + 'static;
    type Observation: Clone + Send + Sync + 'static;
    type Event: Clone + Send + Sync + 'static;

    fn new(config: Self::Config, seed: u64) -> Self;

    /// Frame rate the config was tuned for.
    fn tick_hz(config: &Self::Config) -> u32;

    fn step(
        &mut self,
        tick: Tick,
        actions: &[ActionEnvelope<Self::Action>],
        out_events: &mut Vec<Self::Event>,
    );

    fn observe(&self, tick: Tick, player: PlayerId) -> Self::Observation;

    fn is_terminal(&self) -> Option<TerminalOutcome>;

    /// Back to the opening state, keeping config and random stream. Clears any outcome.
    fn restart(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_names() {
        assert_eq!(TerminalOutcome::Win.to_string(), "Win");
        assert_eq!(TerminalOutcome::Lose.to_string(), "Lose");
        assert!(TerminalOutcome::Win.is_win());
        assert!(!TerminalOutcome::Lose.is_win());
    }
}
