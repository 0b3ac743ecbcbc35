use crate::config::CameraConfig;
use arcade_core::Tick;
use glam::Vec2;

/// Pan/zoom state for the play field.
///
/// `scroll` is the world position of the viewport's top-left corner at zoom 1;
/// zoom is applied about the viewport centre.
#[derive(Clone, Debug)]
pub struct CameraController {
    config: CameraConfig,
    viewport: Vec2,
    bounds_min: Vec2,
    bounds_size: Vec2,
    scroll: Vec2,
    zoom: f32,
    panning: bool,
    pan_start: Vec2,
    last_tap_tick: Option<Tick>,
    double_tap_ticks: u64,
}

impl CameraController {
    pub fn new(config: CameraConfig, viewport: Vec2, double_tap_ticks: u64) -> Self {
        let mut camera = Self {
            config,
            viewport,
            bounds_min: Vec2::ZERO,
            bounds_size: Vec2::ZERO,
            scroll: Vec2::ZERO,
            zoom: 1.0,
            panning: false,
            pan_start: Vec2::ZERO,
            last_tap_tick: None,
            double_tap_ticks,
        };
        camera.setup_bounds();
        camera
    }

    /// The world is twice the viewport, shifted so the viewport sits in the middle.
    fn setup_bounds(&mut self) {
        self.bounds_size = self.viewport * 2.0;
        self.bounds_min = -self.bounds_size / 4.0;
    }

    fn clamp_scroll(&self, scroll: Vec2) -> Vec2 {
        let max = self.bounds_min + self.bounds_size - self.viewport;
        scroll.clamp(self.bounds_min, max)
    }

    /// Returns true when this press completed a double tap and reset the camera.
    pub fn pointer_down(&mut self, screen: Vec2, tick: Tick) -> bool {
        self.pan_start = screen;
        self.panning = false;

        let double_tap = self
            .last_tap_tick
            .is_some_and(|last| tick.saturating_sub(last) < self.double_tap_ticks);
        self.last_tap_tick = Some(tick);
        if double_tap {
            self.reset();
        }
        double_tap
    }

    pub fn pointer_move(&mut self, screen: Vec2, is_down: bool) {
        if !is_down {
            return;
        }
        let delta = screen - self.pan_start;
        if delta.length() > self.config.pan_threshold {
            self.panning = true;
            self.pan(-delta * self.config.pan_speed);
            self.pan_start = screen;
        }
    }

    /// Ends the gesture. Returns whether it was a pan.
    pub fn pointer_up(&mut self) -> bool {
        std::mem::replace(&mut self.panning, false)
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.set_zoom(self.zoom - delta_y * self.config.wheel_zoom_factor);
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.scroll = self.clamp_scroll(self.scroll + delta);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
    }

    /// Zoom 1, centred on the middle of the viewport.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        let centre = self.viewport / 2.0;
        self.scroll = self.clamp_scroll(centre - self.viewport / 2.0);
        tracing::debug!("camera reset");
    }

    /// Fresh camera for a new game: view reset and any gesture in progress forgotten.
    pub fn restart(&mut self) {
        self.panning = false;
        self.pan_start = Vec2::ZERO;
        self.last_tap_tick = None;
        self.reset();
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.setup_bounds();
        self.scroll = self.clamp_scroll(self.scroll);
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let origin = self.viewport / 2.0;
        self.scroll + origin + (screen - origin) / self.zoom
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let origin = self.viewport / 2.0;
        (world - self.scroll - origin) * self.zoom + origin
    }

    pub fn should_process_game_input(&self) -> bool {
        !self.panning
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> CameraController {
        CameraController::new(CameraConfig::default(), Vec2::new(800.0, 600.0), 18)
    }

    #[test]
    fn small_moves_do_not_pan() {
        let mut cam = camera();
        cam.pointer_down(Vec2::new(100.0, 100.0), 0);
        cam.pointer_move(Vec2::new(103.0, 104.0), true);
        assert!(cam.should_process_game_input());
        assert!(!cam.pointer_up());
        assert_eq!(cam.scroll(), Vec2::ZERO);
    }

    #[test]
    fn drag_pans_opposite_to_pointer() {
        let mut cam = camera();
        cam.pointer_down(Vec2::new(100.0, 100.0), 0);
        cam.pointer_move(Vec2::new(150.0, 80.0), true);
        assert!(cam.is_panning());
        assert_eq!(cam.scroll(), Vec2::new(-50.0, 20.0));

        // re-anchored at the last position
        cam.pointer_move(Vec2::new(160.0, 80.0), true);
        assert_eq!(cam.scroll(), Vec2::new(-60.0, 20.0));

        assert!(cam.pointer_up());
        assert!(cam.should_process_game_input());
    }

    #[test]
    fn hover_moves_never_pan() {
        let mut cam = camera();
        cam.pointer_move(Vec2::new(500.0, 500.0), false);
        assert!(!cam.is_panning());
    }

    #[test]
    fn scroll_is_clamped_to_bounds() {
        let mut cam = camera();
        cam.pan(Vec2::new(-10_000.0, 10_000.0));
        assert_eq!(cam.scroll(), Vec2::new(-400.0, 300.0));
    }

    #[test]
    fn wheel_zoom_is_clamped() {
        let mut cam = camera();
        cam.wheel(-500.0);
        assert!((cam.zoom() - 1.5).abs() < 1e-6);
        cam.wheel(-5_000.0);
        assert_eq!(cam.zoom(), 2.0);
        cam.wheel(10_000.0);
        assert_eq!(cam.zoom(), 0.5);
    }

    #[test]
    fn double_tap_resets() {
        let mut cam = camera();
        cam.set_zoom(1.8);
        cam.pan(Vec2::new(100.0, 0.0));

        // the very first tap is never a double tap
        assert!(!cam.pointer_down(Vec2::ZERO, 0));
        cam.pointer_up();
        assert!(cam.pointer_down(Vec2::ZERO, 10));
        assert_eq!(cam.zoom(), 1.0);
        assert_eq!(cam.scroll(), Vec2::ZERO);

        // slow second tap
        cam.pointer_up();
        assert!(!cam.pointer_down(Vec2::ZERO, 40));
    }

    #[test]
    fn restart_forgets_the_previous_tap() {
        let mut cam = camera();
        cam.pointer_down(Vec2::ZERO, 100);
        cam.pointer_up();
        cam.set_zoom(1.5);

        cam.restart();
        assert_eq!(cam.zoom(), 1.0);
        assert!(!cam.pointer_down(Vec2::ZERO, 105));
    }

    #[test]
    fn screen_to_world_inverts_the_view() {
        let mut cam = camera();
        assert_eq!(cam.screen_to_world(Vec2::new(120.0, 80.0)), Vec2::new(120.0, 80.0));

        cam.set_zoom(2.0);
        // the centre stays put, edges pull in
        assert_eq!(cam.screen_to_world(Vec2::new(400.0, 300.0)), Vec2::new(400.0, 300.0));
        assert_eq!(cam.screen_to_world(Vec2::new(0.0, 0.0)), Vec2::new(200.0, 150.0));

        cam.pan(Vec2::new(40.0, -20.0));
        let world = cam.screen_to_world(Vec2::new(10.0, 20.0));
        assert_eq!(cam.world_to_screen(world), Vec2::new(10.0, 20.0));
    }
}
