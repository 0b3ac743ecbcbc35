use glam::Vec2;

/// Axis-aligned box given by its centre and full size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub centre: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(centre: Vec2, size: Vec2) -> Self {
        Self { centre, size }
    }

    pub fn min(&self) -> Vec2 {
        self.centre - self.size / 2.0
    }

    pub fn max(&self) -> Vec2 {
        self.centre + self.size / 2.0
    }

    /// Touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_and_separation() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&Aabb::new(Vec2::new(9.0, 0.0), Vec2::new(10.0, 10.0))));
        assert!(!a.overlaps(&Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0))));
        assert!(!a.overlaps(&Aabb::new(Vec2::new(0.0, 30.0), Vec2::new(10.0, 10.0))));
    }
}
