use crate::command::Command;
use crate::input::InputLocation;
use crate::state::Gesture;
use crate::tools::{Tool, ToolContext};

/// Drags pan the view. Items are never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandTool;

impl Tool for HandTool {
    fn name(&self) -> &'static str {
        "Hand"
    }

    fn on_pointer_down(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        cx.state.gesture = Gesture::Pan { last: loc.position };
        None
    }

    fn on_pointer_move(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        if let Gesture::Pan { last } = &mut cx.state.gesture {
            // screen space: the scene point under the cursor follows it
            cx.view.pan(loc.position - *last);
            *last = loc.position;
        }
        None
    }

    fn on_pointer_up(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        self.on_pointer_move(loc, cx);
        cx.state.gesture = Gesture::Idle;
        None
    }
}
