use batfly_sim::{BatflyAction, BatflyGame};
use glam::Vec2;
use td_sim::{TdAction, TdConfig, TdGame, TowerKind};

/// Cells checked on each side of the bend.
const TD_SEARCH_RADIUS: i32 = 3;

/// Builds around the first bend of the path, then sends the next wave once
/// nothing more can be afforded.
pub struct TdStrategy {
    candidates: Vec<Vec2>,
}

impl TdStrategy {
    pub fn new(config: &TdConfig) -> Self {
        let (path, _) = config.effective_path();
        let bend = path
            .get(1)
            .or_else(|| path.first())
            .copied()
            .unwrap_or_else(|| config.viewport() / 2.0);

        let mut candidates = Vec::new();
        for i in -TD_SEARCH_RADIUS..=TD_SEARCH_RADIUS {
            for j in -TD_SEARCH_RADIUS..=TD_SEARCH_RADIUS {
                candidates.push(bend + Vec2::new(i as f32, j as f32) * config.cell_size);
            }
        }
        candidates.sort_by(|a, b| a.distance_squared(bend).total_cmp(&b.distance_squared(bend)));

        Self { candidates }
    }

    pub fn next_action(&self, game: &TdGame) -> Option<TdAction> {
        if game.outcome().is_some() || game.waves().is_wave_active() {
            return None;
        }

        let gold = game.towers().gold();
        let kind = TowerKind::ALL
            .into_iter()
            .filter(|&kind| game.config().spec(kind).cost <= gold)
            .max_by_key(|&kind| game.config().spec(kind).cost);

        if let Some(kind) = kind {
            if let Some(spot) = self
                .candidates
                .iter()
                .find(|&&spot| game.check_placement(spot, kind).is_ok())
            {
                return Some(TdAction::PlaceTower {
                    x: spot.x,
                    y: spot.y,
                    kind,
                });
            }
        }
        Some(TdAction::StartWave)
    }
}

/// Steers toward the next coin ahead, kept inside the corridor.
pub fn batfly_action(game: &BatflyGame) -> Option<BatflyAction> {
    if game.outcome().is_some() {
        return None;
    }
    let player = game.player();
    if !player.is_started() {
        return Some(BatflyAction::Flap);
    }

    let position = player.position();
    let half_corridor = game.path().path_height() / 2.0;
    let path_y = game.path().path_y();
    let target = game
        .coins()
        .coins()
        .iter()
        .filter(|coin| coin.position.x >= position.x)
        .min_by(|a, b| a.position.x.total_cmp(&b.position.x))
        .map_or(path_y, |coin| coin.position.y)
        .clamp(path_y - half_corridor, path_y + half_corridor);

    (position.y > target).then_some(BatflyAction::Flap)
}
