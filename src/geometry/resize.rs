//! Handle-driven resizing of items.
//!
//! Selected items carry a single bottom-right handle. Rectangle-like kinds
//! move their bottom-right corner; every other resizable kind is scaled
//! uniformly so a single handle never distorts the aspect ratio.

use egui::{Pos2, Rect, Vec2};
use log::debug;
use tiny_skia::Transform;

use super::transform::{local_delta, map_point, ItemTransform};
use crate::element::{Element, ResizeMode};
use crate::id_generator::ItemId;

/// Move the bottom-right corner of `original` by `delta`, keep both sides at
/// least `min_size` long and return a normalized rectangle.
pub fn resize_rect(original: Rect, delta: Vec2, min_size: f32) -> Rect {
    let mut max = original.max + delta;
    if max.x - original.min.x < min_size {
        max.x = original.min.x + min_size;
    }
    if max.y - original.min.y < min_size {
        max.y = original.min.y + min_size;
    }
    Rect::from_two_pos(original.min, max)
}

/// Ratio to apply to an item's scale so that its visible extent along one
/// axis becomes `(unscaled + d) * start_scale`, clamped to `min_size`.
pub fn uniform_scale_ratio(unscaled: f32, start_scale: f32, d: f32, min_size: f32) -> f32 {
    if unscaled <= f32::EPSILON || start_scale <= f32::EPSILON {
        return 1.0;
    }
    let desired = ((unscaled + d) * start_scale).max(min_size);
    desired / (unscaled * start_scale)
}

/// Axis a uniform resize follows: the width, unless the item is flat along
/// it (a vertical line), then the height. Returns `(unscaled, scale, delta)`.
pub fn uniform_axis(local: Rect, scale: Vec2, delta: Vec2) -> (f32, f32, f32) {
    if local.width() > f32::EPSILON {
        (local.width(), scale.x, delta.x)
    } else {
        (local.height(), scale.y, delta.y)
    }
}

/// Geometry captured when a resize drag starts.
#[derive(Debug, Clone)]
pub struct ResizeDrag {
    pub item: ItemId,
    start_pointer: Pos2,
    start_rect: Rect,
    start_transform: ItemTransform,
    start_affine: Transform,
}

impl ResizeDrag {
    pub fn begin(element: &Element, pointer: Pos2) -> Self {
        Self {
            item: element.id(),
            start_pointer: pointer,
            start_rect: element.local_rect(),
            start_transform: *element.transform(),
            start_affine: element.scene_transform(),
        }
    }

    /// Apply the drag for the current pointer position. Returns `false` when
    /// the element cannot be resized.
    pub fn update(&self, element: &mut Element, pointer: Pos2, min_size: f32) -> bool {
        let Some(delta) = local_delta(&self.start_affine, self.start_pointer, pointer) else {
            return false;
        };
        // Keep the scene position of the local top-left corner fixed.
        let anchor = map_point(&self.start_affine, self.start_rect.min);

        match element.capabilities().resize {
            ResizeMode::Rect => {
                let new_rect = resize_rect(self.start_rect, delta, min_size);
                element.set_local_rect(new_rect);
                debug!("resize {} local delta {:?} -> {:?}", self.item, delta, new_rect);
            }
            ResizeMode::Uniform => {
                let (unscaled, scale, d) =
                    uniform_axis(self.start_rect, self.start_transform.scale, delta);
                let ratio = uniform_scale_ratio(unscaled, scale, d, min_size);
                element.transform_mut().scale = self.start_transform.scale * ratio;
                debug!("scale {} by {:.3}", self.item, ratio);
            }
            ResizeMode::None => return false,
        }

        let new_min = element.local_rect().min;
        element.reanchor(new_min, anchor);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_moves_by_delta() {
        let r = Rect::from_min_size(Pos2::ZERO, Vec2::splat(50.0));
        let out = resize_rect(r, Vec2::new(30.0, 20.0), 5.0);
        assert_eq!(out, Rect::from_min_size(Pos2::ZERO, Vec2::new(80.0, 70.0)));
    }

    #[test]
    fn corner_never_crosses_minimum() {
        let r = Rect::from_min_size(Pos2::ZERO, Vec2::splat(50.0));
        let out = resize_rect(r, Vec2::new(-200.0, -48.0), 5.0);
        assert_eq!(out.width(), 5.0);
        assert_eq!(out.height(), 5.0);
        assert_eq!(out.min, Pos2::ZERO);
    }

    #[test]
    fn uniform_ratio_tracks_width() {
        assert!((uniform_scale_ratio(100.0, 1.0, 50.0, 5.0) - 1.5).abs() < 1e-6);
        // already scaled 2x: a local delta of 50 grows the visible width by 100
        assert!((uniform_scale_ratio(100.0, 2.0, 50.0, 5.0) - 1.5).abs() < 1e-6);
        // clamped to the minimum visible width
        assert!((uniform_scale_ratio(100.0, 1.0, -500.0, 5.0) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn flat_items_follow_their_height() {
        let vertical = Rect::from_min_max(Pos2::ZERO, Pos2::new(0.0, 80.0));
        let (unscaled, scale, d) =
            uniform_axis(vertical, Vec2::new(1.0, 2.0), Vec2::new(7.0, 20.0));
        assert_eq!((unscaled, scale, d), (80.0, 2.0, 20.0));
        assert!((uniform_scale_ratio(unscaled, scale, d, 5.0) - 1.25).abs() < 1e-6);

        let square = Rect::from_min_size(Pos2::ZERO, Vec2::splat(10.0));
        assert_eq!(uniform_axis(square, Vec2::splat(1.0), Vec2::new(3.0, 4.0)), (10.0, 1.0, 3.0));
    }
}
