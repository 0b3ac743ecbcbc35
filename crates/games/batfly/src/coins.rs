use crate::bounds::Aabb;
use crate::distance::DistanceTrigger;
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub position: Vec2,
}

/// Drops a coin in the middle of the corridor every few pixels of travel.
#[derive(Clone, Debug)]
pub struct CoinSystem {
    coins: Vec<Coin>,
    trigger: DistanceTrigger,
    size: Vec2,
}

impl CoinSystem {
    pub fn new(interval: f32, size: Vec2) -> Self {
        Self {
            coins: Vec::new(),
            trigger: DistanceTrigger::new(interval),
            size,
        }
    }

    /// Returns true when a new coin is due.
    pub fn advance(&mut self, speed: f32) -> bool {
        self.trigger.advance(speed)
    }

    pub fn add_coin(&mut self, x: f32, path_y: f32) {
        self.coins.push(Coin {
            position: Vec2::new(x, path_y),
        });
    }

    /// Move every coin left and drop those fully off-screen.
    pub fn scroll(&mut self, speed: f32) {
        let width = self.size.x;
        for coin in &mut self.coins {
            coin.position.x -= speed;
        }
        self.coins.retain(|c| c.position.x + width >= 0.0);
    }

    /// Remove coins touching `player` and return how many were taken.
    pub fn collect(&mut self, player: &Aabb) -> u32 {
        let size = self.size;
        let before = self.coins.len();
        self.coins
            .retain(|c| !Aabb::new(c.position, size).overlaps(player));
        (before - self.coins.len()) as u32
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn reset(&mut self) {
        self.coins.clear();
        self.trigger.reset();
    }
}
