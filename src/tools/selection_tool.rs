use egui::Rect;
use log::{debug, info};

use crate::command::Command;
use crate::geometry::{resize_overlay, ResizeDrag};
use crate::input::InputLocation;
use crate::state::Gesture;
use crate::tools::{Tool, ToolContext};

/// Native interaction: click to select, drag to move, corner handle to
/// resize, crop handles while a crop session is active, rubber band on empty
/// canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionTool;

impl SelectionTool {
    /// Press on one of the crop overlay's handles.
    fn begin_crop_resize(&self, loc: InputLocation, cx: &mut ToolContext) -> bool {
        let Some((item, start_overlay)) = cx.state.crop_session().map(|s| (s.item(), s.overlay()))
        else {
            return false;
        };
        let Some(image) = cx.document.get(item) else {
            return false;
        };
        let Some(direction) = cx
            .state
            .crop_session()
            .and_then(|s| s.handle_at(image, loc.scene))
        else {
            return false;
        };
        let Some(start_local) = image.scene_to_local(loc.scene) else {
            return false;
        };
        debug!("crop handle {:?} grabbed", direction);
        cx.state.gesture = Gesture::CropResize {
            direction,
            start_local,
            start_overlay,
        };
        true
    }

    /// Press on the selected item's resize handle.
    fn begin_resize(&self, loc: InputLocation, cx: &mut ToolContext) -> bool {
        let Some(decoration) = cx.state.selection() else {
            return false;
        };
        let Some(element) = cx.document.get(decoration.item()) else {
            return false;
        };
        if decoration.handle_at(element, loc.scene).is_none() {
            return false;
        }
        cx.state.gesture = Gesture::Resize(ResizeDrag::begin(element, loc.scene));
        true
    }

    fn update(&self, loc: InputLocation, cx: &mut ToolContext) {
        let min_size = cx.settings.min_shape_size;
        match &mut cx.state.gesture {
            Gesture::Resize(drag) => {
                let drag = drag.clone();
                if let Some(element) = cx.document.get_mut(drag.item) {
                    drag.update(element, loc.scene, min_size);
                }
                cx.state.refresh_decoration(cx.document);
            }
            Gesture::CropResize {
                direction,
                start_local,
                start_overlay,
            } => {
                let (direction, start_local, start_overlay) = (*direction, *start_local, *start_overlay);
                let Some(item) = cx.state.crop_session().map(|s| s.item()) else {
                    return;
                };
                let Some(image) = cx.document.get(item) else {
                    return;
                };
                let Some(local) = image.scene_to_local(loc.scene) else {
                    return;
                };
                let overlay = resize_overlay(
                    start_overlay,
                    direction,
                    local - start_local,
                    image.local_rect(),
                    min_size,
                );
                if let Some(session) = cx.state.crop_session_mut() {
                    session.set_overlay(overlay);
                }
            }
            Gesture::Move { item, last } => {
                let delta = loc.scene - *last;
                *last = loc.scene;
                let item = *item;
                if let Some(element) = cx.document.get_mut(item) {
                    element.translate(delta);
                }
            }
            Gesture::RubberBand { current, .. } => *current = loc.scene,
            _ => {}
        }
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn on_pointer_down(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        if cx.state.crop_session().is_some() {
            // The crop overlay owns the pointer until the session ends.
            self.begin_crop_resize(loc, cx);
            return None;
        }
        if self.begin_resize(loc, cx) {
            return None;
        }

        match cx.document.top_item_at(loc.scene) {
            Some(id) => {
                if cx.state.selected_item() != Some(id) && !cx.state.select(cx.document, id) {
                    return None;
                }
                if cx.document.get(id).is_some_and(|e| e.is_movable()) {
                    cx.state.gesture = Gesture::Move {
                        item: id,
                        last: loc.scene,
                    };
                }
            }
            None => {
                cx.state.deselect(cx.document);
                cx.state.gesture = Gesture::RubberBand {
                    start: loc.scene,
                    current: loc.scene,
                };
            }
        }
        None
    }

    fn on_pointer_move(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        self.update(loc, cx);
        None
    }

    fn on_pointer_up(&self, loc: InputLocation, cx: &mut ToolContext) -> Option<Command> {
        self.update(loc, cx);
        let gesture = std::mem::take(&mut cx.state.gesture);
        match gesture {
            Gesture::RubberBand { start, current } if start != current => {
                let band = Rect::from_two_pos(start, current);
                let hit = cx
                    .document
                    .items_in_rect(band)
                    .into_iter()
                    .find(|id| cx.document.get(*id).is_some_and(|e| e.is_selectable()));
                if let Some(id) = hit {
                    cx.state.select(cx.document, id);
                }
            }
            Gesture::Resize(drag) => {
                if let Some(element) = cx.document.get(drag.item) {
                    info!(
                        "Resized {} {} to {:?}",
                        element.kind_name(),
                        drag.item,
                        element.visible_size()
                    );
                }
            }
            _ => {}
        }
        None
    }
}
