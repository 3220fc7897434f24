use egui::{Pos2, Rect};
use log::debug;

use crate::command::Command;
use crate::element::{factory, Element, Outline};
use crate::input::InputLocation;
use crate::state::{Gesture, ShapeKind};
use crate::tools::{Tool, ToolContext};

/// Width of the pen new shapes are drawn with.
const SHAPE_OUTLINE_WIDTH: f32 = 1.0;

/// Press-drag-release drawing of rectangles, ellipses, lines and triangles.
#[derive(Debug, Clone, Copy)]
pub struct ShapeTool {
    shape: ShapeKind,
}

impl ShapeTool {
    pub fn new(shape: ShapeKind) -> Self {
        Self { shape }
    }
}

/// Whether a drag from `anchor` to `end` is large enough to become an item.
pub fn meets_minimum(shape: ShapeKind, anchor: Pos2, end: Pos2, min_size: f32) -> bool {
    match shape {
        ShapeKind::Line => {
            let d = end - anchor;
            d.x.abs() + d.y.abs() > min_size / 2.0
        }
        _ => {
            let rect = Rect::from_two_pos(anchor, end);
            rect.width() >= min_size && rect.height() >= min_size
        }
    }
}

fn build(shape: ShapeKind, anchor: Pos2, end: Pos2, cx: &ToolContext) -> Element {
    let palette = cx.palette();
    let outline = Outline::new(palette.item_outline, SHAPE_OUTLINE_WIDTH);
    let rect = Rect::from_two_pos(anchor, end);
    match shape {
        ShapeKind::Rectangle => factory::create_rectangle(rect, palette.item_fill, outline),
        ShapeKind::Ellipse => factory::create_ellipse(rect, palette.item_fill, outline),
        ShapeKind::Triangle => factory::create_triangle(rect, palette.item_fill, outline),
        ShapeKind::Line => factory::create_line(anchor, end, outline),
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        self.shape.name()
    }

    fn on_pointer_down(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        cx.state.gesture = Gesture::DrawShape {
            shape: self.shape,
            anchor: loc.scene,
            current: loc.scene,
        };
        None
    }

    fn on_pointer_move(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        if let Gesture::DrawShape { current, .. } = &mut cx.state.gesture {
            *current = loc.scene;
        }
        None
    }

    fn on_pointer_up(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        // Releasing always drops the preview.
        let Gesture::DrawShape { shape, anchor, .. } = std::mem::take(&mut cx.state.gesture) else {
            return None;
        };
        if !meets_minimum(shape, anchor, loc.scene, cx.settings.min_shape_size) {
            debug!("{}: drag too small, nothing drawn", shape.name());
            return None;
        }
        Some(Command::add_element(build(shape, anchor, loc.scene, cx)))
    }
}
