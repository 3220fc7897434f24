use log::debug;

use crate::command::Command;
use crate::element::{factory, Outline};
use crate::input::InputLocation;
use crate::state::Gesture;
use crate::tools::{Tool, ToolContext};

/// Freehand drawing with the current pen.
#[derive(Debug, Clone, Copy, Default)]
pub struct PenTool;

impl Tool for PenTool {
    fn name(&self) -> &'static str {
        "Pen"
    }

    fn on_pointer_down(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        cx.state.gesture = Gesture::Freehand {
            points: vec![loc.scene],
        };
        None
    }

    fn on_pointer_move(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        if let Gesture::Freehand { points } = &mut cx.state.gesture {
            if points.last() != Some(&loc.scene) {
                points.push(loc.scene);
            }
        }
        None
    }

    fn on_pointer_up(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        self.on_pointer_move(loc, cx);
        let Gesture::Freehand { points } = std::mem::take(&mut cx.state.gesture) else {
            return None;
        };
        // A click without movement leaves nothing to draw.
        if points.len() < 2 {
            debug!("pen: discarded single-point stroke");
            return None;
        }
        let pen = cx.state.pen();
        let stroke = factory::create_stroke(points, Outline::new(pen.color, pen.width));
        Some(Command::add_element(stroke))
    }
}
