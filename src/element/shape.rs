use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};

use super::common::{bounds_of, HasFill, HasOutline, Outline};

/// Rectangle or ellipse spanning `rect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    pub rect: Rect,
    pub fill: Color32,
    pub outline: Outline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineData {
    pub start: Pos2,
    pub end: Pos2,
    pub outline: Outline,
}

impl LineData {
    pub fn bounds(&self) -> Rect {
        Rect::from_two_pos(self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolygonShape {
    Triangle,
    Generic,
}

/// Closed polygon. Triangles are drawn with the apex centered on the top edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonData {
    pub shape: PolygonShape,
    pub points: Vec<Pos2>,
    pub fill: Color32,
    pub outline: Outline,
}

impl PolygonData {
    pub fn bounds(&self) -> Rect {
        bounds_of(&self.points)
    }

    /// Triangle inscribed in `rect`: apex at the top middle, base along the
    /// bottom edge.
    pub fn triangle_points(rect: Rect) -> Vec<Pos2> {
        vec![
            Pos2::new(rect.center().x, rect.min.y),
            rect.right_bottom(),
            rect.left_bottom(),
        ]
    }
}

/// A `rows` x `cols` grid inside `rect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub rect: Rect,
    pub rows: usize,
    pub cols: usize,
    pub fill: Color32,
    pub outline: Outline,
}

impl TableData {
    /// Interior grid lines as (start, end) pairs, rows first.
    pub fn grid_lines(&self) -> Vec<(Pos2, Pos2)> {
        let mut lines = Vec::new();
        let r = self.rect;
        for row in 1..self.rows {
            let y = r.min.y + r.height() * row as f32 / self.rows as f32;
            lines.push((Pos2::new(r.min.x, y), Pos2::new(r.max.x, y)));
        }
        for col in 1..self.cols {
            let x = r.min.x + r.width() * col as f32 / self.cols as f32;
            lines.push((Pos2::new(x, r.min.y), Pos2::new(x, r.max.y)));
        }
        lines
    }
}

macro_rules! impl_fill_and_outline {
    ($($ty:ty),*) => {
        $(
            impl HasFill for $ty {
                fn fill(&self) -> Color32 {
                    self.fill
                }

                fn set_fill(&mut self, color: Color32) {
                    self.fill = color;
                }
            }

            impl HasOutline for $ty {
                fn outline(&self) -> Outline {
                    self.outline
                }

                fn outline_mut(&mut self) -> &mut Outline {
                    &mut self.outline
                }
            }
        )*
    };
}

impl_fill_and_outline!(ShapeData, PolygonData, TableData);

impl HasOutline for LineData {
    fn outline(&self) -> Outline {
        self.outline
    }

    fn outline_mut(&mut self) -> &mut Outline {
        &mut self.outline
    }
}
