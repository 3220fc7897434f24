//! Crop overlay editing.
//!
//! The overlay lives in the cropped image's local coordinates. Each of the
//! eight handles moves one or two of its edges; afterwards the overlay is
//! pulled back inside the image and widened to the minimum size.

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Compass direction of a handle on a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl HandleDirection {
    pub const ALL: [HandleDirection; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    pub fn moves_left(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    /// Where the handle sits on `rect`.
    pub fn anchor(self, rect: Rect) -> Pos2 {
        let x = if self.moves_left() {
            rect.min.x
        } else if self.moves_right() {
            rect.max.x
        } else {
            rect.center().x
        };
        let y = if self.moves_top() {
            rect.min.y
        } else if self.moves_bottom() {
            rect.max.y
        } else {
            rect.center().y
        };
        Pos2::new(x, y)
    }
}

/// Widen `[lo, hi]` to at least `min` while staying inside
/// `[lo_bound, hi_bound]`. The edge that was dragged is adjusted unless it is
/// pinned against the boundary, in which case the opposite edge gives way.
fn enforce_min_span(
    lo: f32,
    hi: f32,
    min: f32,
    lo_bound: f32,
    hi_bound: f32,
    dragged_lo: bool,
) -> (f32, f32) {
    if hi - lo >= min {
        return (lo, hi);
    }
    if hi_bound - lo_bound <= min {
        return (lo_bound, hi_bound);
    }
    if dragged_lo {
        let lo = hi - min;
        if lo >= lo_bound {
            (lo, hi)
        } else {
            (lo_bound, lo_bound + min)
        }
    } else {
        let hi = lo + min;
        if hi <= hi_bound {
            (lo, hi)
        } else {
            (hi_bound - min, hi_bound)
        }
    }
}

/// Move the edges of `start` selected by `direction` by `delta`, then
/// constrain the result to `bounds` and `min_size`.
pub fn resize_overlay(
    start: Rect,
    direction: HandleDirection,
    delta: Vec2,
    bounds: Rect,
    min_size: f32,
) -> Rect {
    let mut left = start.min.x;
    let mut right = start.max.x;
    let mut top = start.min.y;
    let mut bottom = start.max.y;

    if direction.moves_left() {
        left += delta.x;
    }
    if direction.moves_right() {
        right += delta.x;
    }
    if direction.moves_top() {
        top += delta.y;
    }
    if direction.moves_bottom() {
        bottom += delta.y;
    }

    left = left.clamp(bounds.min.x, bounds.max.x);
    right = right.clamp(bounds.min.x, bounds.max.x);
    top = top.clamp(bounds.min.y, bounds.max.y);
    bottom = bottom.clamp(bounds.min.y, bounds.max.y);

    let (left, right) = enforce_min_span(
        left,
        right,
        min_size,
        bounds.min.x,
        bounds.max.x,
        direction.moves_left(),
    );
    let (top, bottom) = enforce_min_span(
        top,
        bottom,
        min_size,
        bounds.min.y,
        bounds.max.y,
        direction.moves_top(),
    );

    Rect::from_min_max(Pos2::new(left, top), Pos2::new(right, bottom))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_bounds() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::splat(100.0))
    }

    #[test]
    fn west_handle_moves_only_left_edge() {
        let out = resize_overlay(
            image_bounds(),
            HandleDirection::West,
            Vec2::new(20.0, 40.0),
            image_bounds(),
            5.0,
        );
        assert_eq!(out, Rect::from_min_max(Pos2::new(20.0, 0.0), Pos2::new(100.0, 100.0)));
    }

    #[test]
    fn overshoot_is_clamped_to_image() {
        let start = Rect::from_min_max(Pos2::new(10.0, 10.0), Pos2::new(60.0, 60.0));
        let out = resize_overlay(
            start,
            HandleDirection::SouthEast,
            Vec2::new(500.0, 500.0),
            image_bounds(),
            5.0,
        );
        assert_eq!(out.max, Pos2::new(100.0, 100.0));
        assert_eq!(out.min, Pos2::new(10.0, 10.0));
    }

    #[test]
    fn collapsing_drag_keeps_minimum_and_prefers_free_edge() {
        let start = Rect::from_min_max(Pos2::new(10.0, 10.0), Pos2::new(60.0, 60.0));
        // drag the east edge far to the left: it stops at left + min
        let out = resize_overlay(
            start,
            HandleDirection::East,
            Vec2::new(-80.0, 0.0),
            image_bounds(),
            5.0,
        );
        assert_eq!(out.min.x, 10.0);
        assert_eq!(out.max.x, 15.0);

        // pinned against the right boundary, the dragged west edge gives way
        let start = Rect::from_min_max(Pos2::new(50.0, 0.0), Pos2::new(100.0, 100.0));
        let out = resize_overlay(
            start,
            HandleDirection::West,
            Vec2::new(80.0, 0.0),
            image_bounds(),
            5.0,
        );
        assert_eq!(out.min.x, 95.0);
        assert_eq!(out.max.x, 100.0);
    }

    #[test]
    fn anchors_sit_on_edges() {
        let r = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(10.0, 20.0));
        assert_eq!(HandleDirection::North.anchor(r), Pos2::new(5.0, 0.0));
        assert_eq!(HandleDirection::SouthEast.anchor(r), Pos2::new(10.0, 20.0));
        assert_eq!(HandleDirection::West.anchor(r), Pos2::new(0.0, 10.0));
    }
}
