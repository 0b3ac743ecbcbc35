use glam::Vec2;

/// Two copies of the backdrop, scaled to cover the viewport, leapfrogging
/// each other as they scroll.
#[derive(Clone, Debug)]
pub struct BackgroundScroller {
    source: Vec2,
    scale: f32,
    tiles: [f32; 2],
}

impl BackgroundScroller {
    pub fn new(source: Vec2, viewport: Vec2) -> Self {
        let mut scroller = Self {
            source,
            scale: 1.0,
            tiles: [0.0; 2],
        };
        scroller.resize(viewport);
        scroller
    }

    /// Cover-scale to `viewport` and centre the first tile horizontally.
    pub fn resize(&mut self, viewport: Vec2) {
        let scale = viewport / self.source;
        self.scale = scale.max_element();

        let width = self.display_width();
        let offset = (width - viewport.x) / 2.0;
        self.tiles = [-offset, width - offset];
    }

    pub fn update(&mut self, speed: f32) {
        let width = self.display_width();
        for x in &mut self.tiles {
            *x -= speed;
            if *x + width < 0.0 {
                *x += width * 2.0;
            }
        }
    }

    pub fn display_width(&self) -> f32 {
        self.source.x * self.scale
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Left edge of each tile.
    pub fn tiles(&self) -> [f32; 2] {
        self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_the_viewport() {
        // tall screen: height decides the scale
        let bg = BackgroundScroller::new(Vec2::new(100.0, 100.0), Vec2::new(200.0, 400.0));
        assert_eq!(bg.scale(), 4.0);
        assert_eq!(bg.display_width(), 400.0);
        assert_eq!(bg.tiles(), [-100.0, 300.0]);
    }

    #[test]
    fn tiles_wrap_behind_each_other() {
        let mut bg = BackgroundScroller::new(Vec2::new(100.0, 50.0), Vec2::new(100.0, 50.0));
        assert_eq!(bg.tiles(), [0.0, 100.0]);

        for _ in 0..100 {
            bg.update(1.0);
        }
        assert_eq!(bg.tiles(), [-100.0, 0.0]);

        bg.update(1.0);
        assert_eq!(bg.tiles(), [99.0, -1.0]);
    }
}
