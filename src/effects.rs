//! Layered, non-destructive image effects.
//!
//! An image item keeps the pixels it was loaded with (or last cropped to), an
//! optional background-removed copy of those pixels and a brightness factor.
//! The displayed pixels are always recomposed from those layers, never from a
//! previous display buffer.

use image::imageops;
use log::debug;

/// Straight (non-premultiplied) RGBA8 pixels.
pub type PixelBuffer = image::RgbaImage;

/// Integer pixel box inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Convert a local-space rectangle to a pixel box, truncating each edge
    /// toward zero the way integer crop boxes are usually built.
    pub fn from_rect(rect: egui::Rect) -> Self {
        let left = rect.min.x.max(0.0) as u32;
        let top = rect.min.y.max(0.0) as u32;
        let right = rect.max.x.max(0.0) as u32;
        let bottom = rect.max.y.max(0.0) as u32;
        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    /// Intersect with a `width` x `height` buffer.
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Multiplicative brightness: every color channel is scaled by `factor`,
/// alpha is left untouched.
pub fn brighten(source: &PixelBuffer, factor: f32) -> PixelBuffer {
    let factor = factor.max(0.0);
    let mut out = source.clone();
    for pixel in out.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = (*channel as f32 * factor).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

pub fn crop_buffer(source: &PixelBuffer, pixel_box: PixelBox) -> PixelBuffer {
    let b = pixel_box.clamped_to(source.width(), source.height());
    imageops::crop_imm(source, b.x, b.y, b.width, b.height).to_image()
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum EffectsError {
    #[error("layer is {got:?}, expected {expected:?}")]
    SizeMismatch {
        expected: (u32, u32),
        got: (u32, u32),
    },
    #[error("crop box is empty")]
    EmptyCrop,
}

/// Per-image layer stack.
#[derive(Clone)]
pub struct ImageLayers {
    source_original: PixelBuffer,
    after_background_removal: Option<PixelBuffer>,
    brightness: f32,
    display: PixelBuffer,
    // Mutable mirror of `display` used only while erasing.
    erase_overlay: Option<PixelBuffer>,
}

impl std::fmt::Debug for ImageLayers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLayers")
            .field("size", &self.source_original.dimensions())
            .field("background_removed", &self.after_background_removal.is_some())
            .field("brightness", &self.brightness)
            .field("erasing", &self.erase_overlay.is_some())
            .finish()
    }
}

impl ImageLayers {
    pub fn new(source: PixelBuffer) -> Self {
        let display = source.clone();
        Self {
            source_original: source,
            after_background_removal: None,
            brightness: 1.0,
            display,
            erase_overlay: None,
        }
    }

    pub fn source_original(&self) -> &PixelBuffer {
        &self.source_original
    }

    pub fn after_background_removal(&self) -> Option<&PixelBuffer> {
        self.after_background_removal.as_ref()
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn display(&self) -> &PixelBuffer {
        &self.display
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.source_original.dimensions()
    }

    pub fn set_brightness(&mut self, factor: f32) {
        self.brightness = factor.max(0.0);
        self.recompose();
    }

    /// Store the result of a background removal. Replaces any earlier result;
    /// `source_original` is never touched.
    pub fn set_background_removed(&mut self, removed: PixelBuffer) -> Result<(), EffectsError> {
        if removed.dimensions() != self.source_original.dimensions() {
            return Err(EffectsError::SizeMismatch {
                expected: self.source_original.dimensions(),
                got: removed.dimensions(),
            });
        }
        self.after_background_removal = Some(removed);
        self.recompose();
        Ok(())
    }

    /// Crop the source and background-removed layers to the same box and
    /// recompose.
    pub fn crop(&mut self, pixel_box: PixelBox) -> Result<(), EffectsError> {
        let (width, height) = self.dimensions();
        let pixel_box = pixel_box.clamped_to(width, height);
        if pixel_box.is_empty() {
            return Err(EffectsError::EmptyCrop);
        }
        self.source_original = crop_buffer(&self.source_original, pixel_box);
        if let Some(removed) = &self.after_background_removal {
            self.after_background_removal = Some(crop_buffer(removed, pixel_box));
        }
        self.recompose();
        Ok(())
    }

    fn recompose(&mut self) {
        let base = self
            .after_background_removal
            .as_ref()
            .unwrap_or(&self.source_original);
        self.display = brighten(base, self.brightness);
        self.erase_overlay = None;
        debug!(
            "recomposed image layers: {:?} at brightness {:.2}",
            self.display.dimensions(),
            self.brightness
        );
    }

    /// Buffer the eraser mutates, mirrored from the display buffer on first
    /// use after any recomposition.
    pub(crate) fn erase_target(&mut self) -> &mut PixelBuffer {
        let display = &self.display;
        self.erase_overlay.get_or_insert_with(|| display.clone())
    }

    /// Publish the erased pixels as the new display buffer.
    pub(crate) fn commit_erase(&mut self) {
        if let Some(overlay) = &self.erase_overlay {
            self.display = overlay.clone();
        }
    }

    pub fn is_erasing(&self) -> bool {
        self.erase_overlay.is_some()
    }
}
