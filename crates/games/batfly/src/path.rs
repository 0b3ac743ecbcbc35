use crate::config::BatflyConfig;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// The safe corridor between the spike walls.
///
/// The corridor centre wanders around the middle of the screen and its
/// half-height breathes between the configured bounds; both ease toward
/// random targets a little every tick.
#[derive(Clone, Debug)]
pub struct PathManager {
    centre_y: f32,
    offset: f32,
    offset_target: f32,
    height: f32,
    height_target: f32,
    offset_max: i32,
    height_min: i32,
    height_max: i32,
    lerp: f32,
}

impl PathManager {
    pub fn new(config: &BatflyConfig) -> Self {
        Self {
            centre_y: config.viewport_height * 0.5,
            offset: 0.0,
            offset_target: 0.0,
            height: config.path_height_max as f32,
            height_target: config.path_height_target,
            offset_max: config.path_offset_max,
            height_min: config.path_height_min,
            height_max: config.path_height_max,
            lerp: config.path_lerp,
        }
    }

    /// Pick a new centre offset and half-height to drift toward.
    pub fn random_path(&mut self, rng: &mut ChaCha8Rng) {
        self.offset_target = rng.gen_range(-self.offset_max..=self.offset_max) as f32;
        self.height_target = rng.gen_range(self.height_min..=self.height_max) as f32;
    }

    pub fn update(&mut self) {
        self.offset += (self.offset_target - self.offset) * self.lerp;
        self.height += (self.height_target - self.height) * self.lerp;
    }

    pub fn path_y(&self) -> f32 {
        self.centre_y + self.offset
    }

    pub fn path_height(&self) -> f32 {
        self.height
    }

    pub fn targets(&self) -> (f32, f32) {
        (self.offset_target, self.height_target)
    }

    pub fn resize(&mut self, viewport_height: f32) {
        self.centre_y = viewport_height * 0.5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn starts_centred_and_wide() {
        let path = PathManager::new(&BatflyConfig::default());
        assert_eq!(path.path_y(), 300.0);
        assert_eq!(path.path_height(), 200.0);
        assert_eq!(path.targets(), (0.0, 300.0));
    }

    #[test]
    fn targets_stay_in_range() {
        let config = BatflyConfig::default();
        let mut path = PathManager::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            path.random_path(&mut rng);
            let (offset, height) = path.targets();
            assert!((-100.0..=100.0).contains(&offset));
            assert!((50.0..=200.0).contains(&height));
        }
    }

    #[test]
    fn eases_one_percent_per_tick() {
        let mut path = PathManager::new(&BatflyConfig::default());
        path.offset_target = 100.0;
        path.update();
        assert!((path.path_y() - 301.0).abs() < 1e-4);
    }

    #[test]
    fn same_seed_same_targets() {
        let config = BatflyConfig::default();
        let mut a = PathManager::new(&config);
        let mut b = PathManager::new(&config);
        let mut rng_a = ChaCha8Rng::seed_from_u64(11);
        let mut rng_b = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..10 {
            a.random_path(&mut rng_a);
            b.random_path(&mut rng_b);
            assert_eq!(a.targets(), b.targets());
        }
    }
}
