use crate::command::Command;
use crate::input::InputLocation;
use crate::rasterizer::erase_at;
use crate::state::Gesture;
use crate::tools::{Tool, ToolContext};

/// Clears pixels under a square brush for as long as the button is held.
///
/// Erasing is not recorded in the undo history.
#[derive(Debug, Clone, Copy, Default)]
pub struct EraserTool;

impl EraserTool {
    fn erase(&self, loc: InputLocation, cx: &mut ToolContext) {
        erase_at(
            cx.document,
            cx.state,
            loc.scene,
            cx.settings.eraser_brush_size,
        );
    }
}

impl Tool for EraserTool {
    fn name(&self) -> &'static str {
        "Eraser"
    }

    fn on_pointer_down(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        cx.state.gesture = Gesture::Erase;
        self.erase(loc, cx);
        None
    }

    fn on_pointer_move(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        if matches!(cx.state.gesture, Gesture::Erase) {
            self.erase(loc, cx);
        }
        None
    }

    fn on_pointer_up(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        if matches!(cx.state.gesture, Gesture::Erase) {
            self.erase(loc, cx);
        }
        cx.state.gesture = Gesture::Idle;
        None
    }
}
