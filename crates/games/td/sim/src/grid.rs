use glam::Vec2;

/// Result of the last hover preview: the highlighted cell and its colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPreview {
    pub cell: Vec2,
    pub valid: bool,
}

/// Snaps world positions to placement cells and tracks the hover highlight.
#[derive(Clone, Debug)]
pub struct GridSystem {
    cell_size: f32,
    hovered: Option<Vec2>,
    preview: Option<GridPreview>,
}

impl GridSystem {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            hovered: None,
            preview: None,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Centre of the cell containing `p`.
    pub fn cell_center(&self, p: Vec2) -> Vec2 {
        let size = self.cell_size;
        (p / size).floor() * size + Vec2::splat(size / 2.0)
    }

    pub fn set_hovered(&mut self, cell: Option<Vec2>) {
        self.hovered = cell;
    }

    pub fn hovered(&self) -> Option<Vec2> {
        self.hovered
    }

    /// Recolour the highlight for the hovered cell. No hover, no preview.
    pub fn update_preview(&mut self, can_place: bool) -> Option<GridPreview> {
        self.preview = self.hovered.map(|cell| GridPreview {
            cell,
            valid: can_place,
        });
        self.preview
    }

    pub fn preview(&self) -> Option<GridPreview> {
        self.preview
    }

    pub fn clear_preview(&mut self) {
        self.hovered = None;
        self.preview = None;
    }
}
