use crate::game::BatflyGame;
use arcade_core::Tick;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpikeInfo {
    pub position: Vec2,
    pub flipped: bool,
}

/// Everything a renderer or HUD needs for one frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatflyObservation {
    pub tick: u64,
    pub viewport_width: f32,
    pub viewport_height: f32,

    pub started: bool,
    pub score: u32,
    pub win_score: u32,

    pub player: Vec2,
    pub player_velocity_y: f32,
    pub player_size: Vec2,

    pub path_y: f32,
    pub path_height: f32,

    pub coins: Vec<Vec2>,
    pub coin_size: Vec2,
    pub spikes: Vec<SpikeInfo>,
    pub spike_size: Vec2,

    /// Left edges of the two backdrop tiles.
    pub background_tiles: [f32; 2],
    pub background_scale: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

pub fn build_observation(game: &BatflyGame, tick: Tick) -> BatflyObservation {
    let config = game.config();
    let player = game.player();

    BatflyObservation {
        tick,
        viewport_width: config.viewport_width,
        viewport_height: config.viewport_height,

        started: player.is_started(),
        score: game.score(),
        win_score: config.win_score,

        player: player.position(),
        player_velocity_y: player.velocity_y(),
        player_size: config.player_size,

        path_y: game.path().path_y(),
        path_height: game.path().path_height(),

        coins: game.coins().coins().iter().map(|c| c.position).collect(),
        coin_size: game.coins().size(),
        spikes: game
            .obstacles()
            .spikes()
            .iter()
            .map(|s| SpikeInfo {
                position: s.position,
                flipped: s.flipped,
            })
            .collect(),
        spike_size: game.obstacles().size(),

        background_tiles: game.background().tiles(),
        background_scale: game.background().scale(),

        outcome: game.outcome().map(|o| o.to_string()),
    }
}
