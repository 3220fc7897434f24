use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use super::common::{bounds_of, HasOutline, Outline};

/// Freehand pen stroke: an open polyline drawn with a round pen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeData {
    pub points: Vec<Pos2>,
    pub outline: Outline,
}

impl StrokeData {
    pub fn new(points: Vec<Pos2>, outline: Outline) -> Self {
        Self { points, outline }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn bounds(&self) -> Rect {
        bounds_of(&self.points)
    }
}

impl HasOutline for StrokeData {
    fn outline(&self) -> Outline {
        self.outline
    }

    fn outline_mut(&mut self) -> &mut Outline {
        &mut self.outline
    }
}
