use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Pen used to draw an item's outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: Color32,
    pub width: f32,
}

impl Outline {
    pub fn new(color: Color32, width: f32) -> Self {
        Self { color, width }
    }
}

/// Items with an interior that can be recolored.
pub trait HasFill {
    fn fill(&self) -> Color32;
    fn set_fill(&mut self, color: Color32);
}

/// Items with a pen that can be recolored or widened.
pub trait HasOutline {
    fn outline(&self) -> Outline;
    fn outline_mut(&mut self) -> &mut Outline;

    fn set_outline_color(&mut self, color: Color32) {
        self.outline_mut().color = color;
    }

    fn set_outline_width(&mut self, width: f32) {
        self.outline_mut().width = width;
    }
}

/// How a single corner handle changes an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// The bottom-right corner of the local rectangle follows the pointer.
    Rect,
    /// The whole item is scaled, keeping its aspect ratio.
    Uniform,
    None,
}

/// What erasing does to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// Convert to a raster item first, then clear pixels.
    Rasterize,
    /// Clear pixels of the item's own buffer.
    Pixels,
    None,
}

/// Operations an item supports, fixed when the item is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub has_fill: bool,
    pub has_outline: bool,
    pub rotatable: bool,
    pub croppable: bool,
    pub resize: ResizeMode,
    pub erase: EraseMode,
}

/// Axis-aligned bounds of `points`, or `Rect::NOTHING` when empty.
pub(crate) fn bounds_of(points: &[Pos2]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::NOTHING;
    };
    let mut bounds = Rect::from_min_max(*first, *first);
    for point in &points[1..] {
        bounds.extend_with(*point);
    }
    bounds
}

/// Move `points` so their bounds start at the local origin. Returns the
/// offset that was removed, which becomes the item's scene position.
pub(crate) fn normalize_points(points: &mut [Pos2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    let offset = bounds_of(points).min.to_vec2();
    for point in points.iter_mut() {
        *point -= offset;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_moves_bounds_to_origin() {
        let mut pts = vec![Pos2::new(10.0, 20.0), Pos2::new(30.0, 25.0)];
        let offset = normalize_points(&mut pts);
        assert_eq!(offset, Vec2::new(10.0, 20.0));
        assert_eq!(pts, vec![Pos2::new(0.0, 0.0), Pos2::new(20.0, 5.0)]);
    }
}
