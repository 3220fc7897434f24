//! Interaction state of the editor.
//!
//! All window-scoped mutable state lives in one [`EditorState`] value: the
//! active tool, the gesture in progress, the selection decoration and the
//! crop session. Tool transitions take the state by value and return the
//! next one (see [`crate::tools::switch_tool`]).
//!
//! # Invariants
//!
//! - At most one of `selection` and `crop` is set.
//! - `gesture` is [`Gesture::Idle`] whenever no pointer button is held.
//! - A crop session only exists while the `Select` tool is active.

use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::geometry::{HandleDirection, ResizeDrag};
use crate::id_generator::ItemId;
use crate::selection::{CropSession, SelectionDecoration};
use crate::state::EditorSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    Triangle,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Ellipse => "Ellipse",
            Self::Line => "Line",
            Self::Triangle => "Triangle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    Select,
    Hand,
    Eraser,
    Pen,
    Shape(ShapeKind),
}

impl ToolKind {
    /// Whether the scene itself handles selection and dragging.
    pub fn uses_native_interaction(self) -> bool {
        matches!(self, Self::Select)
    }
}

/// Pen used by the freehand tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenSettings {
    pub color: Color32,
    pub width: f32,
}

/// The pointer gesture in progress. Cleared on release.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    #[default]
    Idle,
    DrawShape {
        shape: ShapeKind,
        anchor: Pos2,
        current: Pos2,
    },
    Freehand {
        points: Vec<Pos2>,
    },
    Erase,
    Move {
        item: ItemId,
        last: Pos2,
    },
    Resize(ResizeDrag),
    CropResize {
        direction: HandleDirection,
        /// Pointer at drag start, in the image's local frame.
        start_local: Pos2,
        start_overlay: Rect,
    },
    RubberBand {
        start: Pos2,
        current: Pos2,
    },
    /// Panning the view; positions are in screen space.
    Pan {
        last: Pos2,
    },
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::DrawShape { .. } => "drawing shape",
            Self::Freehand { .. } => "drawing stroke",
            Self::Erase => "erasing",
            Self::Move { .. } => "moving",
            Self::Resize(_) => "resizing",
            Self::CropResize { .. } => "adjusting crop",
            Self::RubberBand { .. } => "rubber band",
            Self::Pan { .. } => "panning",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorState {
    tool: ToolKind,
    pub(crate) gesture: Gesture,
    selection: Option<SelectionDecoration>,
    crop: Option<CropSession>,
    pub(crate) pen: PenSettings,
    pub(crate) pen_color_chosen: bool,
    handle_size: f32,
}

impl EditorState {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            tool: ToolKind::Select,
            gesture: Gesture::Idle,
            selection: None,
            crop: None,
            pen: PenSettings {
                color: settings.pen_color,
                width: settings.pen_width,
            },
            pen_color_chosen: false,
            handle_size: settings.handle_size,
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub(crate) fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn pen(&self) -> PenSettings {
        self.pen
    }

    pub fn selection(&self) -> Option<&SelectionDecoration> {
        self.selection.as_ref()
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        self.selection.as_ref().map(SelectionDecoration::item)
    }

    pub fn crop_session(&self) -> Option<&CropSession> {
        self.crop.as_ref()
    }

    pub(crate) fn crop_session_mut(&mut self) -> Option<&mut CropSession> {
        self.crop.as_mut()
    }

    pub fn handle_size(&self) -> f32 {
        self.handle_size
    }

    /// Select `id` and rebuild its handles. Any other decoration is torn
    /// down first.
    pub fn select(&mut self, document: &mut Document, id: ItemId) -> bool {
        self.deselect(document);
        if !document.set_selected(id) {
            return false;
        }
        self.selection = document
            .get(id)
            .map(|e| SelectionDecoration::build(e, self.handle_size));
        self.selection.is_some()
    }

    pub fn deselect(&mut self, document: &mut Document) {
        document.clear_selected();
        self.selection = None;
    }

    /// Rebuild handles of the selected item after its geometry changed.
    pub fn refresh_decoration(&mut self, document: &Document) {
        let Some(id) = self.selected_item() else {
            return;
        };
        self.selection = document
            .get(id)
            .map(|e| SelectionDecoration::build(e, self.handle_size));
    }

    /// Drop decoration that refers to an item no longer in `document`.
    pub fn forget_missing(&mut self, document: &Document) {
        if self.selected_item().is_some_and(|id| !document.contains(id)) {
            self.selection = None;
        }
        if self.crop.as_ref().is_some_and(|c| !document.contains(c.item())) {
            self.crop = None;
        }
    }

    pub(crate) fn begin_crop(&mut self, session: CropSession) {
        self.selection = None;
        self.crop = Some(session);
    }

    pub(crate) fn end_crop(&mut self) -> Option<CropSession> {
        self.crop.take()
    }
}
