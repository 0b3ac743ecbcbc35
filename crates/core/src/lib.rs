//! Contract shared by the arcade games and their host loop.

pub mod envelope;
pub mod game;
pub mod time;

pub use envelope::{ActionEnvelope, ActionId, PlayerId, Tick};
pub use game::{Game, TerminalOutcome};
pub use time::Micros;
