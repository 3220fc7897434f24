use egui::{PointerButton, Pos2};

use crate::view::ViewTransform;

/// Where a pointer event happened, in both coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    pub position: Pos2,
    /// `position` seen through the current view.
    pub scene: Pos2,
}

impl InputLocation {
    pub fn from_screen(position: Pos2, view: &ViewTransform) -> Self {
        Self {
            position,
            scene: view.screen_to_scene(position),
        }
    }
}

/// Pointer and wheel events delivered by the canvas widget.
/// Positions are in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        position: Pos2,
        button: PointerButton,
    },
    /// Hover or drag; tools only see it while the primary button is held.
    PointerMove {
        position: Pos2,
        held_buttons: Vec<PointerButton>,
    },
    PointerUp {
        position: Pos2,
        button: PointerButton,
    },
    /// Wheel notch; only the sign of `delta` matters.
    Wheel { position: Pos2, delta: f32 },
}

impl InputEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            Self::PointerDown { position, .. }
            | Self::PointerMove { position, .. }
            | Self::PointerUp { position, .. }
            | Self::Wheel { position, .. } => *position,
        }
    }
}
