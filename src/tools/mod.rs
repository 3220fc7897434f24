use log::info;

use crate::command::Command;
use crate::document::Document;
use crate::input::InputLocation;
use crate::state::{EditorSettings, EditorState, Gesture, ToolKind};
use crate::theme::Palette;
use crate::view::ViewTransform;

mod eraser_tool;
mod hand_tool;
mod pen_tool;
mod selection_tool;
mod shape_tool;

pub use eraser_tool::EraserTool;
pub use hand_tool::HandTool;
pub use pen_tool::PenTool;
pub use selection_tool::SelectionTool;
pub use shape_tool::ShapeTool;

/// What a tool may read and change while handling a pointer event.
pub struct ToolContext<'a> {
    pub document: &'a mut Document,
    pub state: &'a mut EditorState,
    pub view: &'a mut ViewTransform,
    pub settings: &'a EditorSettings,
}

impl ToolContext<'_> {
    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.settings.theme)
    }
}

/// Tool trait defines the pointer contract shared by all tools.
///
/// Tools hold no state of their own. The gesture in progress lives in
/// [`EditorState`] so that switching tools can tear it down in one place.
pub trait Tool {
    fn name(&self) -> &'static str;

    /// Handle pointer press on the canvas.
    /// Return a Command if the press finishes an action.
    fn on_pointer_down(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command>;

    /// Handle pointer movement while the primary button is held.
    fn on_pointer_move(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command>;

    /// Handle pointer release. Return a Command to **finalize** an action if applicable.
    fn on_pointer_up(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command>;
}

/// Static dispatch over the tool set.
#[derive(Debug, Clone, Copy)]
pub enum ToolType {
    Select(SelectionTool),
    Hand(HandTool),
    Eraser(EraserTool),
    Pen(PenTool),
    Shape(ShapeTool),
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Select(tool) => tool.name(),
            Self::Hand(tool) => tool.name(),
            Self::Eraser(tool) => tool.name(),
            Self::Pen(tool) => tool.name(),
            Self::Shape(tool) => tool.name(),
        }
    }

    fn on_pointer_down(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_down(loc, cx),
            Self::Hand(tool) => tool.on_pointer_down(loc, cx),
            Self::Eraser(tool) => tool.on_pointer_down(loc, cx),
            Self::Pen(tool) => tool.on_pointer_down(loc, cx),
            Self::Shape(tool) => tool.on_pointer_down(loc, cx),
        }
    }

    fn on_pointer_move(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_move(loc, cx),
            Self::Hand(tool) => tool.on_pointer_move(loc, cx),
            Self::Eraser(tool) => tool.on_pointer_move(loc, cx),
            Self::Pen(tool) => tool.on_pointer_move(loc, cx),
            Self::Shape(tool) => tool.on_pointer_move(loc, cx),
        }
    }

    fn on_pointer_up(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_up(loc, cx),
            Self::Hand(tool) => tool.on_pointer_up(loc, cx),
            Self::Eraser(tool) => tool.on_pointer_up(loc, cx),
            Self::Pen(tool) => tool.on_pointer_up(loc, cx),
            Self::Shape(tool) => tool.on_pointer_up(loc, cx),
        }
    }
}

/// The tool implementing `kind`.
pub fn tool_for(kind: ToolKind) -> ToolType {
    match kind {
        ToolKind::Select => ToolType::Select(SelectionTool),
        ToolKind::Hand => ToolType::Hand(HandTool),
        ToolKind::Eraser => ToolType::Eraser(EraserTool),
        ToolKind::Pen => ToolType::Pen(PenTool),
        ToolKind::Shape(shape) => ToolType::Shape(ShapeTool::new(shape)),
    }
}

/// Tool transition.
///
/// Drops any gesture in progress, ends a crop session when leaving the
/// select tool and deselects the current item. Prompting for the pen color
/// is left to the caller because it needs the host.
pub fn switch_tool(mut state: EditorState, document: &mut Document, tool: ToolKind) -> EditorState {
    let previous = state.tool();
    state.gesture = Gesture::Idle;

    if !tool.uses_native_interaction() {
        if let Some(session) = state.end_crop() {
            if let Some(image) = document.get_mut(session.item()) {
                image.set_movable(true);
            }
            info!("Crop of {} cancelled by tool change", session.item());
        }
    }
    state.deselect(document);
    state.set_tool(tool);

    if previous != tool {
        info!("Tool changed: {:?} -> {:?}", previous, tool);
    }
    state
}
