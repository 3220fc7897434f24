use egui::{Pos2, Rect, Vec2};

use crate::effects::PixelBuffer;

/// Pixels produced by rasterizing a vector item for erasing.
///
/// The buffer's top-left pixel sits at `origin` in the item's local frame, so
/// the item keeps the transform of the vector item it replaced.
#[derive(Clone)]
pub struct RasterData {
    buffer: PixelBuffer,
    origin: Pos2,
}

impl std::fmt::Debug for RasterData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterData")
            .field("size", &self.buffer.dimensions())
            .field("origin", &self.origin)
            .finish()
    }
}

impl RasterData {
    pub fn new(buffer: PixelBuffer, origin: Pos2) -> Self {
        Self { buffer, origin }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn bounds(&self) -> Rect {
        let (w, h) = self.buffer.dimensions();
        Rect::from_min_size(self.origin, Vec2::new(w as f32, h as f32))
    }
}
