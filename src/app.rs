use std::path::{Path, PathBuf};

use egui::{Color32, PointerButton, Pos2, Rect, Vec2};
use log::{debug, error, info, warn};

use crate::command::{Command, CommandContext, CommandError, CommandHistory};
use crate::document::Document;
use crate::effects::{PixelBox, PixelBuffer};
use crate::element::{factory, Element, HasFill, HasOutline, Outline};
use crate::error::{EditorError, EditorResult};
use crate::export::{render_image_item, write_image};
use crate::geometry::map_point;
use crate::host::{EditorHost, MessageKind};
use crate::id_generator::ItemId;
use crate::input::{InputEvent, InputLocation};
use crate::panels::PanelModel;
use crate::selection::CropSession;
use crate::state::{EditorSettings, EditorState, Gesture, ToolKind};
use crate::theme::{Palette, ThemeKind};
use crate::tools::{self, Tool, ToolContext};
use crate::view::ViewTransform;

/// Default cell size of an inserted table.
const TABLE_CELL_SIZE: Vec2 = Vec2::new(80.0, 30.0);

/// Range accepted by [`SceneEditor::set_pen_width`].
const PEN_WIDTH_RANGE: std::ops::RangeInclusive<f32> = 1.0..=50.0;

/// Z-order step used by bring forward / send backward.
const Z_STEP: f32 = 0.1;

/// The editor engine: one document, its undo history and the interaction
/// state of the window showing it.
///
/// Every operation runs synchronously on the caller's thread. Failures are
/// returned and also reported to the host through
/// [`EditorHost::show_message`]. Only item creation and deletion go through
/// the undo history; resize, crop, erase and property edits are applied
/// directly and cannot be undone.
pub struct SceneEditor<H: EditorHost> {
    document: Document,
    history: CommandHistory,
    state: EditorState,
    view: ViewTransform,
    settings: EditorSettings,
    host: H,
}

impl<H: EditorHost> SceneEditor<H> {
    pub fn new(host: H, settings: EditorSettings, viewport: Rect) -> Self {
        Self {
            document: Document::new(),
            history: CommandHistory::new(),
            state: EditorState::new(&settings),
            view: ViewTransform::new(viewport),
            settings,
            host,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.view.set_viewport(viewport);
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.settings.theme)
    }

    pub fn canvas_background(&self) -> Color32 {
        self.settings
            .canvas_background
            .unwrap_or(self.palette().canvas)
    }

    pub fn selected(&self) -> Option<&Element> {
        self.state
            .selected_item()
            .and_then(|id| self.document.get(id))
    }

    pub fn panel(&self) -> PanelModel {
        PanelModel::build(
            &self.document,
            &self.state,
            &self.history,
            &self.view,
            &self.settings,
        )
    }

    // ---- input ----

    /// Feed one canvas event to the active tool.
    ///
    /// Only the primary button drives tools. The wheel zooms about the
    /// pointer whatever tool is active.
    pub fn handle_input(&mut self, event: InputEvent) -> EditorResult<()> {
        let loc = InputLocation::from_screen(event.position(), &self.view);
        let tool = tools::tool_for(self.state.tool());
        let mut cx = ToolContext {
            document: &mut self.document,
            state: &mut self.state,
            view: &mut self.view,
            settings: &self.settings,
        };

        let command = match &event {
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                ..
            } => tool.on_pointer_down(loc, &mut cx),
            InputEvent::PointerMove { held_buttons, .. }
                if held_buttons.contains(&PointerButton::Primary) =>
            {
                tool.on_pointer_move(loc, &mut cx)
            }
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => tool.on_pointer_up(loc, &mut cx),
            InputEvent::Wheel { position, delta } => {
                cx.view.wheel(*position, *delta, cx.settings.wheel_zoom_factor);
                debug!("wheel zoom -> {:.3}", cx.view.zoom());
                None
            }
            _ => None,
        };

        if let Some(command) = command {
            self.execute(command)?;
        }
        Ok(())
    }

    /// Activate `tool`. The first time the pen is picked the user is asked
    /// for its color; cancelling keeps the current one.
    pub fn set_tool(&mut self, tool: ToolKind) {
        let state = std::mem::replace(&mut self.state, EditorState::new(&self.settings));
        self.state = tools::switch_tool(state, &mut self.document, tool);

        if tool == ToolKind::Pen && !self.state.pen_color_chosen {
            if let Some(color) = self.host.pick_color(self.state.pen.color) {
                self.state.pen.color = color;
            }
            self.state.pen_color_chosen = true;
        }
    }

    // ---- history ----

    fn execute(&mut self, command: Command) -> EditorResult<ItemId> {
        let item = command.item();
        let mut ctx = CommandContext::new(&mut self.document, &mut self.state);
        let result = self.history.execute(command, &mut ctx);
        self.report(result.map_err(EditorError::from))?;
        Ok(item)
    }

    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self) -> EditorResult<bool> {
        if !self.history.can_undo() {
            return Ok(false);
        }
        let mut ctx = CommandContext::new(&mut self.document, &mut self.state);
        let result = self.history.undo(&mut ctx);
        self.report(result.map_err(EditorError::from))?;
        Ok(true)
    }

    /// Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self) -> EditorResult<bool> {
        if !self.history.can_redo() {
            return Ok(false);
        }
        let mut ctx = CommandContext::new(&mut self.document, &mut self.state);
        let result = self.history.redo(&mut ctx);
        self.report(result.map_err(EditorError::from))?;
        Ok(true)
    }

    /// Pass `result` through, telling the host about a failure.
    fn report<T>(&mut self, result: EditorResult<T>) -> EditorResult<T> {
        if let Err(err) = &result {
            let kind = match err {
                EditorError::CropTooSmall { .. } | EditorError::NoSuitableSelection(_) => {
                    warn!("{err}");
                    MessageKind::Warning
                }
                _ => {
                    error!("{err}");
                    MessageKind::Error
                }
            };
            self.host.show_message(kind, &err.to_string());
        }
        result
    }

    // ---- creation and deletion ----

    /// Add an item built elsewhere. It becomes the selection.
    pub fn add_element(&mut self, element: Element) -> EditorResult<ItemId> {
        self.execute(Command::add_element(element))
    }

    /// Ask the host for an image file and add it centered in the view.
    /// `Ok(None)` means the dialog was cancelled.
    pub fn add_image_from_file(&mut self) -> EditorResult<Option<ItemId>> {
        let Some(path) = self.host.pick_open_file_path() else {
            return Ok(None);
        };
        self.load_image_file(&path).map(Some)
    }

    pub fn load_image_file(&mut self, path: &Path) -> EditorResult<ItemId> {
        let decoded = self
            .host
            .load_image_bytes(path)
            .map_err(EditorError::from)
            .and_then(|bytes| Ok(image::load_from_memory(&bytes)?.to_rgba8()));
        let buffer = self.report(decoded)?;

        let (width, height) = buffer.dimensions();
        let position =
            self.view.viewport_center_scene() - Vec2::new(width as f32, height as f32) / 2.0;
        info!("Loaded {} ({width}x{height})", path.display());
        self.execute(Command::add_element(factory::create_image(buffer, position)))
    }

    /// Add `buffer` as an image item with its top-left corner at `at`.
    pub fn paste_image(&mut self, buffer: PixelBuffer, at: Pos2) -> EditorResult<ItemId> {
        self.execute(Command::add_element(factory::create_image(buffer, at)))
    }

    /// Add a `rows` x `cols` table with its top-left corner at `at`.
    pub fn insert_table(&mut self, rows: usize, cols: usize, at: Pos2) -> EditorResult<ItemId> {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let size = Vec2::new(TABLE_CELL_SIZE.x * cols as f32, TABLE_CELL_SIZE.y * rows as f32);
        let palette = self.palette();
        let table = factory::create_table(
            Rect::from_min_size(at, size),
            rows,
            cols,
            palette.item_fill,
            Outline::new(palette.item_outline, 1.0),
        );
        self.execute(Command::add_element(table))
    }

    /// Remove the selected item. `Ok(false)` when nothing is selected.
    pub fn delete_selected(&mut self) -> EditorResult<bool> {
        let Some(id) = self.state.selected_item() else {
            debug!("delete: nothing selected");
            return Ok(false);
        };
        self.execute(Command::remove_element(id))?;
        Ok(true)
    }

    // ---- image effects ----

    /// The image the effect buttons act on: the selection, or the image
    /// being cropped.
    fn active_image(&self) -> Option<ItemId> {
        self.state
            .selected_item()
            .or_else(|| self.state.crop_session().map(CropSession::item))
            .filter(|id| self.document.get(*id).is_some_and(|e| e.image().is_some()))
    }

    /// Replace the image's background-removed layer with the host's
    /// segmentation of its source pixels. Blocks until the host returns.
    pub fn remove_background(&mut self) -> EditorResult<()> {
        let Some(id) = self.active_image() else {
            return self.report(Err(EditorError::NoSuitableSelection(
                "Select an image to remove its background.",
            )));
        };
        let result = self.segment(id);
        self.report(result)?;

        info!("Background removed from {id}");
        self.host
            .show_message(MessageKind::Info, "Background removal completed.");
        Ok(())
    }

    fn segment(&mut self, id: ItemId) -> EditorResult<()> {
        let Some(layers) = self.document.get(id).and_then(Element::image) else {
            return Ok(());
        };
        let removed = self
            .host
            .segment_foreground(layers.source_original())
            .map_err(|err| EditorError::BackgroundRemoval(err.to_string()))?;

        let Some(layers) = self.document.get_mut(id).and_then(Element::image_mut) else {
            return Ok(());
        };
        layers
            .set_background_removed(removed)
            .map_err(|err| EditorError::BackgroundRemoval(err.to_string()))
    }

    /// Set the brightness of the active image, clamped to the configured
    /// range. Returns `false` when no image is active.
    pub fn set_brightness(&mut self, factor: f32) -> bool {
        let range = &self.settings.brightness_range;
        let factor = factor.clamp(*range.start(), *range.end());
        let Some(id) = self.active_image() else {
            return false;
        };
        let Some(layers) = self.document.get_mut(id).and_then(Element::image_mut) else {
            return false;
        };
        layers.set_brightness(factor);
        debug!("brightness of {id} -> {factor:.2}");
        true
    }

    // ---- crop ----

    /// Start a crop session on the selected image.
    ///
    /// A session on another image is cancelled first. Asking again for the
    /// image already being cropped does nothing.
    pub fn enter_crop_mode(&mut self) -> EditorResult<()> {
        let active = self.state.crop_session().map(CropSession::item);
        let selected = self
            .state
            .selected_item()
            .filter(|id| self.document.get(*id).is_some_and(|e| e.capabilities().croppable));
        let Some(id) = selected.or(active) else {
            return self.report(Err(EditorError::NoSuitableSelection(
                "Select an image to crop.",
            )));
        };
        if active == Some(id) {
            return Ok(());
        }
        if active.is_some() {
            self.cancel_crop();
        }

        if !self.state.tool().uses_native_interaction() {
            self.state.gesture = Gesture::Idle;
            self.state.set_tool(ToolKind::Select);
        }
        self.state.deselect(&mut self.document);
        let Some(image) = self.document.get_mut(id) else {
            return Ok(());
        };
        image.set_movable(false);
        let session = CropSession::new(image, self.state.handle_size());
        self.state.begin_crop(session);
        info!("Entering crop mode for {id}");
        Ok(())
    }

    /// Crop the image to the overlay. Returns `Ok(false)` when no session is
    /// active. A too small overlay is rejected and the session stays open.
    pub fn apply_crop(&mut self) -> EditorResult<bool> {
        let Some((id, overlay)) = self.state.crop_session().map(|s| (s.item(), s.overlay())) else {
            return Ok(false);
        };
        let pixel_box = PixelBox::from_rect(overlay);
        if overlay.width() < 1.0 || overlay.height() < 1.0 || pixel_box.is_empty() {
            return self.report(Err(EditorError::CropTooSmall {
                width: overlay.width(),
                height: overlay.height(),
            }));
        }

        let result = self.crop_image(id, pixel_box);
        self.report(result)?;
        self.finish_crop();
        info!(
            "Applied crop {}x{} at ({}, {}) to {id}",
            pixel_box.width, pixel_box.height, pixel_box.x, pixel_box.y
        );
        Ok(true)
    }

    fn crop_image(&mut self, id: ItemId, pixel_box: PixelBox) -> EditorResult<()> {
        let Some(image) = self.document.get_mut(id) else {
            return Err(CommandError::ElementNotFound(id).into());
        };
        // Where the new top-left pixel currently sits in the scene.
        let corner = Pos2::new(pixel_box.x as f32, pixel_box.y as f32);
        let target = map_point(&image.scene_transform(), corner);

        let Some(layers) = image.image_mut() else {
            return Ok(());
        };
        layers
            .crop(pixel_box)
            .map_err(|_| EditorError::CropTooSmall {
                width: pixel_box.width as f32,
                height: pixel_box.height as f32,
            })?;
        image.reanchor(Pos2::ZERO, target);
        Ok(())
    }

    /// Leave the crop session without changing the image.
    pub fn cancel_crop(&mut self) -> bool {
        match self.finish_crop() {
            Some(id) => {
                info!("Crop of {id} cancelled");
                true
            }
            None => false,
        }
    }

    /// Tear down the session, make the image movable again and reselect it.
    fn finish_crop(&mut self) -> Option<ItemId> {
        let session = self.state.end_crop()?;
        let id = session.item();
        if let Some(image) = self.document.get_mut(id) {
            image.set_movable(true);
        }
        self.state.select(&mut self.document, id);
        Some(id)
    }

    // ---- item properties ----

    fn selected_mut(&mut self) -> Option<&mut Element> {
        let id = self.state.selected_item()?;
        self.document.get_mut(id)
    }

    /// Pick a new fill for the selected item. `false` if the item has no
    /// fill or the dialog was cancelled.
    pub fn change_fill_color(&mut self) -> bool {
        let Some(current) = self.selected().and_then(|e| e.fill()).map(|f| f.fill()) else {
            return false;
        };
        match self.host.pick_color(current) {
            Some(color) => self.set_fill_color(color),
            None => false,
        }
    }

    pub fn set_fill_color(&mut self, color: Color32) -> bool {
        match self.selected_mut().and_then(|e| e.fill_mut()) {
            Some(fill) => {
                fill.set_fill(color);
                true
            }
            None => false,
        }
    }

    pub fn change_outline_color(&mut self) -> bool {
        let Some(current) = self
            .selected()
            .and_then(|e| e.outline())
            .map(|o| o.outline().color)
        else {
            return false;
        };
        match self.host.pick_color(current) {
            Some(color) => self.set_outline_color(color),
            None => false,
        }
    }

    pub fn set_outline_color(&mut self, color: Color32) -> bool {
        match self.selected_mut().and_then(|e| e.outline_mut()) {
            Some(outline) => {
                outline.set_outline_color(color);
                true
            }
            None => false,
        }
    }

    fn selected_stroke_mut(&mut self) -> Option<&mut dyn HasOutline> {
        self.selected_mut()
            .filter(|e| e.is_pen_stroke())
            .and_then(|e| e.outline_mut())
    }

    /// Pick the pen color. With the pen active this sets the color of new
    /// strokes; otherwise it recolors the selected stroke.
    pub fn change_pen_color(&mut self) -> bool {
        match self.host.pick_color(self.state.pen.color) {
            Some(color) => self.set_pen_color(color),
            None => false,
        }
    }

    pub fn set_pen_color(&mut self, color: Color32) -> bool {
        if self.state.tool() == ToolKind::Pen {
            self.state.pen.color = color;
            self.state.pen_color_chosen = true;
            return true;
        }
        match self.selected_stroke_mut() {
            Some(stroke) => {
                stroke.set_outline_color(color);
                true
            }
            None => false,
        }
    }

    /// Same dispatch as [`Self::set_pen_color`]; the width is clamped to
    /// 1..=50.
    pub fn set_pen_width(&mut self, width: f32) -> bool {
        let width = width.clamp(*PEN_WIDTH_RANGE.start(), *PEN_WIDTH_RANGE.end());
        if self.state.tool() == ToolKind::Pen {
            self.state.pen.width = width;
            debug!("pen width -> {width}");
            return true;
        }
        let Some(stroke) = self.selected_stroke_mut() else {
            return false;
        };
        stroke.set_outline_width(width);
        self.state.refresh_decoration(&self.document);
        true
    }

    /// Rotate the selected item about its center, in degrees clockwise.
    pub fn set_rotation(&mut self, degrees: f32) -> bool {
        let changed = self
            .selected_mut()
            .is_some_and(|e| e.set_rotation(degrees));
        if changed {
            self.state.refresh_decoration(&self.document);
        }
        changed
    }

    /// Set the drawn size of the selected item, keeping its top-left corner.
    pub fn set_size(&mut self, width: f32, height: f32) -> bool {
        let min_size = self.settings.min_shape_size;
        let changed = self
            .selected_mut()
            .is_some_and(|e| e.set_size(width, height, min_size));
        if changed {
            self.state.refresh_decoration(&self.document);
        }
        changed
    }

    // ---- z-order ----

    fn nudge_z(&mut self, step: f32) -> bool {
        let Some(element) = self.selected_mut() else {
            return false;
        };
        let z = element.z() + step;
        element.set_z(z);
        debug!("{} z -> {z:.1}", element.id());
        true
    }

    pub fn bring_forward(&mut self) -> bool {
        self.nudge_z(Z_STEP)
    }

    pub fn send_backward(&mut self) -> bool {
        self.nudge_z(-Z_STEP)
    }

    // ---- view ----

    pub fn zoom_in(&mut self) {
        let center = self.view.viewport().center();
        self.view.zoom_at(center, self.settings.button_zoom_in);
    }

    pub fn zoom_out(&mut self) {
        let center = self.view.viewport().center();
        self.view.zoom_at(center, self.settings.button_zoom_out);
    }

    // ---- theme ----

    pub fn change_canvas_background(&mut self) -> bool {
        match self.host.pick_color(self.canvas_background()) {
            Some(color) => {
                self.settings.canvas_background = Some(color);
                true
            }
            None => false,
        }
    }

    /// Switch palettes. Existing items keep their colors; a picked canvas
    /// background survives the switch.
    pub fn apply_theme(&mut self, theme: ThemeKind) {
        if self.settings.theme != theme {
            info!("Theme changed: {:?} -> {:?}", self.settings.theme, theme);
        }
        self.settings.theme = theme;
    }

    // ---- export ----

    /// Ask for a destination and export the active image. `Ok(None)` means
    /// the dialog was cancelled.
    pub fn export_selected_image(&mut self) -> EditorResult<Option<PathBuf>> {
        if self.active_image().is_none() {
            return self.report(Err(EditorError::NoSuitableSelection(
                "Select an image to export.",
            )));
        }
        let Some(path) = self.host.pick_save_file_path() else {
            return Ok(None);
        };
        self.export_selected_image_to(&path)?;
        Ok(Some(path))
    }

    /// Render the active image as shown on the canvas and write it to
    /// `path`. The format follows the file extension.
    pub fn export_selected_image_to(&mut self, path: &Path) -> EditorResult<()> {
        let rendered = match self.active_image().and_then(|id| self.document.get(id)) {
            Some(image) => render_image_item(image)
                .ok_or_else(|| EditorError::Export("image has no visible pixels".to_string())),
            None => Err(EditorError::NoSuitableSelection("Select an image to export.")),
        };
        let result = rendered.and_then(|buffer| write_image(&buffer, path));
        self.report(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostError;

    #[derive(Default)]
    struct QuietHost {
        messages: Vec<MessageKind>,
    }

    impl EditorHost for QuietHost {
        fn pick_color(&mut self, _initial: Color32) -> Option<Color32> {
            None
        }

        fn pick_open_file_path(&mut self) -> Option<PathBuf> {
            None
        }

        fn pick_save_file_path(&mut self) -> Option<PathBuf> {
            None
        }

        fn show_message(&mut self, kind: MessageKind, _text: &str) {
            self.messages.push(kind);
        }

        fn segment_foreground(&mut self, _image: &PixelBuffer) -> Result<PixelBuffer, HostError> {
            Err(HostError::Segmentation("no model".to_string()))
        }
    }

    fn editor() -> SceneEditor<QuietHost> {
        SceneEditor::new(
            QuietHost::default(),
            EditorSettings::default(),
            Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 300.0)),
        )
    }

    fn solid(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_pixel(width, height, image::Rgba([200, 100, 50, 255]))
    }

    #[test]
    fn sliver_crop_is_rejected_and_session_kept() {
        let mut editor = editor();
        let id = editor.paste_image(solid(20, 20), Pos2::ZERO).unwrap();
        editor.enter_crop_mode().unwrap();
        editor
            .state
            .crop_session_mut()
            .unwrap()
            .set_overlay(Rect::from_min_size(Pos2::new(4.0, 4.0), Vec2::new(0.5, 10.0)));

        let result = editor.apply_crop();
        assert!(matches!(result, Err(EditorError::CropTooSmall { .. })));
        assert_eq!(editor.host.messages, vec![MessageKind::Warning]);
        assert!(editor.state.crop_session().is_some());
        assert_eq!(editor.document.get(id).unwrap().image().unwrap().dimensions(), (20, 20));
    }

    #[test]
    fn crop_on_another_image_cancels_the_first() {
        let mut editor = editor();
        let first = editor.paste_image(solid(20, 20), Pos2::ZERO).unwrap();
        let second = editor.paste_image(solid(20, 20), Pos2::new(50.0, 0.0)).unwrap();
        editor.enter_crop_mode().unwrap();
        assert_eq!(editor.state.crop_session().map(CropSession::item), Some(second));

        editor.state.select(&mut editor.document, first);
        editor.enter_crop_mode().unwrap();
        assert_eq!(editor.state.crop_session().map(CropSession::item), Some(first));
        assert!(editor.document.get(second).unwrap().is_movable());
        assert!(!editor.document.get(first).unwrap().is_movable());
    }

    #[test]
    fn crop_from_another_tool_switches_to_select() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Eraser);
        editor.paste_image(solid(20, 20), Pos2::ZERO).unwrap();

        editor.enter_crop_mode().unwrap();
        assert_eq!(editor.state.tool(), ToolKind::Select);
        assert!(editor.state.crop_session().is_some());
    }

    #[test]
    fn z_nudges_are_unbounded() {
        let mut editor = editor();
        let id = editor.insert_table(1, 1, Pos2::ZERO).unwrap();
        for _ in 0..30 {
            editor.send_backward();
        }
        assert!((editor.document.get(id).unwrap().z() + 3.0).abs() < 1e-4);
    }
}
