use glam::Vec2;

/// The enemy route: a polyline of waypoints drawn `width` pixels wide.
#[derive(Clone, Debug)]
pub struct PathRenderer {
    points: Vec<Vec2>,
    width: f32,
}

impl PathRenderer {
    pub fn new(points: Vec<Vec2>, width: f32) -> Self {
        Self { points, width }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn start(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn total_length(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Whether `p` lies on the drawn road (strictly within half the width of
    /// some segment).
    pub fn is_on_path(&self, p: Vec2) -> bool {
        let half_width = self.width / 2.0;
        self.segments()
            .any(|(a, b)| distance_to_segment(p, a, b) < half_width)
    }
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }

    let t = (p - a).dot(ab) / len_sq;
    let closest = if t < 0.0 {
        a
    } else if t > 1.0 {
        b
    } else {
        a + ab * t
    };
    p.distance(closest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_path;

    #[test]
    fn distance_inside_segment_span() {
        let d = distance_to_segment(Vec2::new(50.0, 10.0), Vec2::ZERO, Vec2::new(100.0, 0.0));
        assert_eq!(d, 10.0);
    }

    #[test]
    fn distance_clamps_to_endpoints() {
        let a = Vec2::ZERO;
        let b = Vec2::new(100.0, 0.0);
        assert_eq!(distance_to_segment(Vec2::new(-30.0, 40.0), a, b), 50.0);
        assert_eq!(distance_to_segment(Vec2::new(103.0, 4.0), a, b), 5.0);
    }

    #[test]
    fn zero_length_segment_measures_to_point() {
        let a = Vec2::new(10.0, 10.0);
        assert_eq!(distance_to_segment(Vec2::new(13.0, 14.0), a, a), 5.0);
    }

    #[test]
    fn on_path_uses_half_width_exclusive() {
        let path = PathRenderer::new(default_path(), 40.0);
        assert!(path.is_on_path(Vec2::new(75.0, 300.0)));
        assert!(path.is_on_path(Vec2::new(75.0, 319.0)));
        // exactly half the width away is off the road
        assert!(!path.is_on_path(Vec2::new(75.0, 320.0)));
        assert!(!path.is_on_path(Vec2::new(100.0, 500.0)));
    }

    #[test]
    fn diagonal_legs_count() {
        let path = PathRenderer::new(default_path(), 40.0);
        // midpoint of the (200,250)-(250,200) leg
        assert!(path.is_on_path(Vec2::new(225.0, 225.0)));
    }

    #[test]
    fn geometry_helpers() {
        let path = PathRenderer::new(vec![Vec2::ZERO, Vec2::new(30.0, 40.0), Vec2::new(30.0, 0.0)], 10.0);
        assert_eq!(path.segments().count(), 2);
        assert_eq!(path.total_length(), 90.0);
        assert_eq!(path.start(), Some(Vec2::ZERO));
        assert_eq!(path.end(), Some(Vec2::new(30.0, 0.0)));
    }
}
