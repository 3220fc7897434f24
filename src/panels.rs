//! Read model for the surrounding UI.
//!
//! The host draws its tool bar and properties panel from a [`PanelModel`]
//! snapshot instead of reaching into editor internals.

use egui::{Color32, Pos2, Rect, Vec2};

use crate::command::CommandHistory;
use crate::document::Document;
use crate::element::{Capabilities, Element, HasFill, HasOutline, Outline};
use crate::id_generator::ItemId;
use crate::state::{EditorSettings, EditorState, Gesture, PenSettings, ShapeKind, ToolKind};
use crate::theme::Palette;
use crate::tools::{tool_for, Tool};
use crate::view::ViewTransform;

/// Shape being dragged out, drawn dashed until the button is released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapePreview {
    pub shape: ShapeKind,
    pub anchor: Pos2,
    pub current: Pos2,
}

impl ShapePreview {
    pub fn rect(&self) -> Rect {
        Rect::from_two_pos(self.anchor, self.current)
    }
}

/// Properties of the selected item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemProperties {
    pub id: ItemId,
    pub kind_name: &'static str,
    pub fill: Option<Color32>,
    pub outline: Option<Outline>,
    pub rotation: f32,
    pub size: Vec2,
    /// Only set for image items.
    pub brightness: Option<f32>,
    pub background_removed: bool,
    pub is_pen_stroke: bool,
    pub capabilities: Capabilities,
}

impl ItemProperties {
    pub fn from_element(element: &Element) -> Self {
        let image = element.image();
        Self {
            id: element.id(),
            kind_name: element.kind_name(),
            fill: element.fill().map(|fill| fill.fill()),
            outline: element.outline().map(|outline| outline.outline()),
            rotation: element.transform().rotation,
            size: element.visible_size(),
            brightness: image.map(|layers| layers.brightness()),
            background_removed: image.is_some_and(|layers| layers.after_background_removal().is_some()),
            is_pen_stroke: element.is_pen_stroke(),
            capabilities: element.capabilities(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelModel {
    pub tool: ToolKind,
    pub tool_name: &'static str,
    pub gesture: &'static str,
    /// Whether the scene handles clicks itself (select tool) or the active
    /// tool consumes them.
    pub native_interaction: bool,
    pub cropping: bool,
    pub crop_overlay: Option<Rect>,
    pub pen: PenSettings,
    pub zoom: f32,
    pub preview: Option<ShapePreview>,
    pub rubber_band: Option<Rect>,
    pub selection: Option<ItemProperties>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub canvas: Color32,
    pub palette: Palette,
}

impl PanelModel {
    pub(crate) fn build(
        document: &Document,
        state: &EditorState,
        history: &CommandHistory,
        view: &ViewTransform,
        settings: &EditorSettings,
    ) -> Self {
        let palette = Palette::for_theme(settings.theme);
        let (preview, rubber_band) = match state.gesture() {
            Gesture::DrawShape {
                shape,
                anchor,
                current,
            } => (
                Some(ShapePreview {
                    shape: *shape,
                    anchor: *anchor,
                    current: *current,
                }),
                None,
            ),
            Gesture::RubberBand { start, current } => (None, Some(Rect::from_two_pos(*start, *current))),
            _ => (None, None),
        };

        Self {
            tool: state.tool(),
            tool_name: tool_for(state.tool()).name(),
            gesture: state.gesture().name(),
            native_interaction: state.tool().uses_native_interaction(),
            cropping: state.crop_session().is_some(),
            crop_overlay: state.crop_session().map(|session| session.overlay()),
            pen: state.pen(),
            zoom: view.zoom(),
            preview,
            rubber_band,
            selection: state
                .selected_item()
                .and_then(|id| document.get(id))
                .map(ItemProperties::from_element),
            can_undo: history.can_undo(),
            can_redo: history.can_redo(),
            canvas: settings.canvas_background.unwrap_or(palette.canvas),
            palette,
        }
    }
}
