use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use tiny_skia::{Point, Transform};

/// Placement of an item in the scene.
///
/// The local-to-scene mapping is
/// `translate(position) * rotate_about(pivot, rotation) * scale(scale)`
/// where the pivot is the center of the scaled local bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemTransform {
    pub position: Pos2,
    /// Degrees, clockwise on screen.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self {
            position: Pos2::ZERO,
            rotation: 0.0,
            scale: Vec2::splat(1.0),
        }
    }
}

impl ItemTransform {
    pub fn at(position: Pos2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Local-to-scene transform for an item whose local bounds are `local_bounds`.
    pub fn to_affine(&self, local_bounds: Rect) -> Transform {
        let center = local_bounds.center();
        let pivot_x = center.x * self.scale.x;
        let pivot_y = center.y * self.scale.y;
        Transform::from_translate(self.position.x, self.position.y)
            .pre_concat(Transform::from_rotate_at(self.rotation, pivot_x, pivot_y))
            .pre_scale(self.scale.x, self.scale.y)
    }

    pub fn is_identity(&self) -> bool {
        self.position == Pos2::ZERO && self.rotation == 0.0 && self.scale == Vec2::splat(1.0)
    }
}

pub fn map_point(transform: &Transform, point: Pos2) -> Pos2 {
    let mut points = [Point::from_xy(point.x, point.y)];
    transform.map_points(&mut points);
    Pos2::new(points[0].x, points[0].y)
}

/// Map the four corners of `rect` and return them in order
/// top-left, top-right, bottom-right, bottom-left.
pub fn map_corners(transform: &Transform, rect: Rect) -> [Pos2; 4] {
    [
        map_point(transform, rect.left_top()),
        map_point(transform, rect.right_top()),
        map_point(transform, rect.right_bottom()),
        map_point(transform, rect.left_bottom()),
    ]
}

/// Axis-aligned bounds of `rect` after mapping through `transform`.
pub fn map_rect_bounds(transform: &Transform, rect: Rect) -> Rect {
    let corners = map_corners(transform, rect);
    let mut bounds = Rect::from_min_max(corners[0], corners[0]);
    for corner in &corners[1..] {
        bounds.extend_with(*corner);
    }
    bounds
}

/// Pointer movement between two scene positions, expressed in the local
/// frame described by `local_to_scene`.
///
/// Both positions are mapped through the inverse before differencing, so the
/// delta is correct under rotation and scale.
pub fn local_delta(local_to_scene: &Transform, start: Pos2, current: Pos2) -> Option<Vec2> {
    let inverse = local_to_scene.invert()?;
    Some(map_point(&inverse, current) - map_point(&inverse, start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn identity_maps_points_unchanged() {
        let t = ItemTransform::default().to_affine(Rect::from_min_size(Pos2::ZERO, Vec2::splat(10.0)));
        assert!(approx(map_point(&t, Pos2::new(3.0, 4.0)), Pos2::new(3.0, 4.0)));
    }

    #[test]
    fn rotation_pivots_on_center() {
        let bounds = Rect::from_min_size(Pos2::ZERO, Vec2::new(20.0, 10.0));
        let transform = ItemTransform {
            rotation: 90.0,
            ..Default::default()
        };
        let t = transform.to_affine(bounds);
        assert!(approx(map_point(&t, bounds.center()), bounds.center()));
        // top-left swings around the center clockwise
        assert!(approx(map_point(&t, Pos2::ZERO), Pos2::new(15.0, -5.0)));
    }

    #[test]
    fn local_delta_undoes_rotation_and_scale() {
        let bounds = Rect::from_min_size(Pos2::ZERO, Vec2::splat(50.0));
        let transform = ItemTransform {
            position: Pos2::new(100.0, 100.0),
            rotation: 90.0,
            scale: Vec2::splat(2.0),
        };
        let t = transform.to_affine(bounds);
        let start = map_point(&t, Pos2::new(10.0, 10.0));
        let end = map_point(&t, Pos2::new(25.0, 30.0));
        let delta = local_delta(&t, start, end).unwrap();
        assert!((delta - Vec2::new(15.0, 20.0)).length() < 1e-3);
    }
}
