//! Handles drawn around the selected item or an active crop overlay.
//!
//! Decorations never own the item they decorate. They refer to it by
//! [`ItemId`] and are rebuilt from the item whenever its geometry changes.

use egui::{Pos2, Rect};

use crate::element::Element;
use crate::geometry::hit_testing::handle_rect;
use crate::geometry::HandleDirection;
use crate::id_generator::ItemId;

/// A square control point in the decorated item's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub direction: HandleDirection,
    pub rect: Rect,
}

impl Handle {
    fn on(rect: Rect, direction: HandleDirection, size: f32) -> Self {
        Self {
            direction,
            rect: handle_rect(direction.anchor(rect), size),
        }
    }
}

fn handle_under(handles: &[Handle], element: &Element, scene: Pos2) -> Option<HandleDirection> {
    let local = element.scene_to_local(scene)?;
    handles
        .iter()
        .find(|h| h.rect.contains(local))
        .map(|h| h.direction)
}

/// Resize handle of the single selected item.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionDecoration {
    item: ItemId,
    handles: Vec<Handle>,
}

impl SelectionDecoration {
    pub fn build(element: &Element, handle_size: f32) -> Self {
        let mut handles = Vec::new();
        if element.capabilities().resize != crate::element::ResizeMode::None {
            handles.push(Handle::on(
                element.local_rect(),
                HandleDirection::SouthEast,
                handle_size,
            ));
        }
        Self {
            item: element.id(),
            handles,
        }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn handle_at(&self, element: &Element, scene: Pos2) -> Option<HandleDirection> {
        if element.id() != self.item {
            return None;
        }
        handle_under(&self.handles, element, scene)
    }
}

/// An in-progress crop of one image.
#[derive(Debug, Clone, PartialEq)]
pub struct CropSession {
    item: ItemId,
    overlay: Rect,
    handles: Vec<Handle>,
    handle_size: f32,
}

impl CropSession {
    /// Start with the overlay covering the whole image.
    pub fn new(element: &Element, handle_size: f32) -> Self {
        let mut session = Self {
            item: element.id(),
            overlay: element.local_rect(),
            handles: Vec::new(),
            handle_size,
        };
        session.set_overlay(element.local_rect());
        session
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    /// Overlay rectangle in the image's local coordinates.
    pub fn overlay(&self) -> Rect {
        self.overlay
    }

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn set_overlay(&mut self, overlay: Rect) {
        self.overlay = overlay;
        self.handles = HandleDirection::ALL
            .iter()
            .map(|d| Handle::on(overlay, *d, self.handle_size))
            .collect();
    }

    pub fn handle_at(&self, element: &Element, scene: Pos2) -> Option<HandleDirection> {
        if element.id() != self.item {
            return None;
        }
        handle_under(&self.handles, element, scene)
    }
}
