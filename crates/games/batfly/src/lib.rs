//! Headless "Bat Fly" endless scroller.
//!
//! A bat hovers until the first tap, then falls under gravity while the
//! world scrolls past. Taps kick it upward. Coins in the corridor score,
//! the spike walls and the screen edges end the run.

pub mod background;
pub mod bounds;
pub mod coins;
pub mod config;
pub mod distance;
pub mod game;
pub mod observe;
pub mod obstacles;
pub mod path;
pub mod player;

pub use config::{BatflyConfig, ConfigError};
pub use game::{BatflyAction, BatflyEvent, BatflyGame};
pub use observe::BatflyObservation;
