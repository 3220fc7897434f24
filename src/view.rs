use egui::emath::TSTransform;
use egui::{Pos2, Rect, Vec2};
use log::debug;

/// Scene-to-screen mapping of the canvas: uniform zoom plus pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    transform: TSTransform,
    viewport: Rect,
}

impl ViewTransform {
    pub fn new(viewport: Rect) -> Self {
        Self {
            transform: TSTransform::IDENTITY,
            viewport,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.transform.scaling
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.transform.translation
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn scene_to_screen(&self, scene: Pos2) -> Pos2 {
        self.transform.mul_pos(scene)
    }

    pub fn screen_to_scene(&self, screen: Pos2) -> Pos2 {
        self.transform.inverse().mul_pos(screen)
    }

    /// Scene point shown at the middle of the viewport.
    pub fn viewport_center_scene(&self) -> Pos2 {
        self.screen_to_scene(self.viewport.center())
    }

    /// Multiply the zoom by `factor`, keeping the scene point under
    /// `screen` where it is.
    pub fn zoom_at(&mut self, screen: Pos2, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let anchor = self.screen_to_scene(screen);
        self.transform.scaling *= factor;
        self.transform.translation = screen.to_vec2() - anchor.to_vec2() * self.transform.scaling;
        debug!("zoom {:.3} at {:?}", self.transform.scaling, screen);
    }

    /// One wheel notch: zoom in by `factor` for positive deltas, out by its
    /// inverse for negative ones.
    pub fn wheel(&mut self, screen: Pos2, delta: f32, factor: f32) {
        if delta > 0.0 {
            self.zoom_at(screen, factor);
        } else if delta < 0.0 {
            self.zoom_at(screen, 1.0 / factor);
        }
    }

    pub fn pan(&mut self, screen_delta: Vec2) {
        self.transform.translation += screen_delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut view = ViewTransform::new(Rect::from_min_size(Pos2::ZERO, Vec2::splat(400.0)));
        view.pan(Vec2::new(30.0, -10.0));
        let screen = Pos2::new(120.0, 80.0);
        let scene = view.screen_to_scene(screen);
        view.zoom_at(screen, 2.0);
        assert!((view.scene_to_screen(scene) - screen).length() < 1e-4);
        assert!((view.zoom() - 2.0).abs() < 1e-6);
    }
}
