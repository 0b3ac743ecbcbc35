use crate::bounds::Aabb;
use crate::distance::DistanceTrigger;
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct Spike {
    pub position: Vec2,
    /// Hangs from the ceiling side of the corridor.
    pub flipped: bool,
}

/// Lines the corridor with spike pairs, one above and one below.
#[derive(Clone, Debug)]
pub struct ObstacleSystem {
    spikes: Vec<Spike>,
    trigger: DistanceTrigger,
    size: Vec2,
}

impl ObstacleSystem {
    pub fn new(interval: f32, size: Vec2) -> Self {
        Self {
            spikes: Vec::new(),
            trigger: DistanceTrigger::new(interval),
            size,
        }
    }

    pub fn advance(&mut self, speed: f32) -> bool {
        self.trigger.advance(speed)
    }

    pub fn add_spike_pair(&mut self, x: f32, path_y: f32, path_height: f32) {
        self.spikes.push(Spike {
            position: Vec2::new(x, path_y - path_height),
            flipped: true,
        });
        self.spikes.push(Spike {
            position: Vec2::new(x, path_y + path_height),
            flipped: false,
        });
    }

    pub fn scroll(&mut self, speed: f32) {
        let width = self.size.x;
        for spike in &mut self.spikes {
            spike.position.x -= speed;
        }
        self.spikes.retain(|s| s.position.x + width >= 0.0);
    }

    pub fn hits(&self, player: &Aabb) -> bool {
        self.spikes
            .iter()
            .any(|s| Aabb::new(s.position, self.size).overlaps(player))
    }

    pub fn spikes(&self) -> &[Spike] {
        &self.spikes
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn reset(&mut self) {
        self.spikes.clear();
        self.trigger.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_straddle_the_corridor() {
        let mut obstacles = ObstacleSystem::new(18.0, Vec2::new(32.0, 32.0));
        obstacles.add_spike_pair(850.0, 300.0, 120.0);
        assert_eq!(
            obstacles.spikes(),
            &[
                Spike { position: Vec2::new(850.0, 180.0), flipped: true },
                Spike { position: Vec2::new(850.0, 420.0), flipped: false },
            ]
        );
    }

    #[test]
    fn corridor_is_safe_walls_are_not() {
        let mut obstacles = ObstacleSystem::new(18.0, Vec2::new(32.0, 32.0));
        obstacles.add_spike_pair(400.0, 300.0, 120.0);

        let centre = Aabb::new(Vec2::new(400.0, 300.0), Vec2::new(48.0, 32.0));
        assert!(!obstacles.hits(&centre));

        let high = Aabb::new(Vec2::new(400.0, 200.0), Vec2::new(48.0, 32.0));
        assert!(obstacles.hits(&high));
    }

    #[test]
    fn spawns_every_eighteen_pixels() {
        let mut obstacles = ObstacleSystem::new(18.0, Vec2::new(32.0, 32.0));
        let due = (0..100).filter(|_| obstacles.advance(1.0)).count();
        // fires at 19, 37, 55, 73, 91
        assert_eq!(due, 5);
    }
}
