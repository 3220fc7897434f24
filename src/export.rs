//! Writing an image item to disk as it appears on the canvas.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};
use log::info;
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint};

use crate::effects::PixelBuffer;
use crate::element::Element;
use crate::error::{EditorError, EditorResult};
use crate::rasterizer::{image_to_pixmap, pixmap_to_image};

/// Render an image item's display pixels through its transform into a buffer
/// the size of its scene bounding box. `None` for non-image items.
pub fn render_image_item(element: &Element) -> Option<PixelBuffer> {
    let layers = element.image()?;
    let bounds = element.scene_bounds();
    let width = bounds.width().ceil().max(1.0) as u32;
    let height = bounds.height().ceil().max(1.0) as u32;
    let mut target = Pixmap::new(width, height)?;
    let source = image_to_pixmap(layers.display())?;
    let transform = element
        .scene_transform()
        .post_translate(-bounds.min.x, -bounds.min.y);
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    target.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    Some(pixmap_to_image(&target))
}

fn supports_alpha(format: ImageFormat) -> bool {
    !matches!(format, ImageFormat::Jpeg | ImageFormat::Pnm)
}

/// Composite over white and drop the alpha channel.
pub fn flatten_to_rgb(buffer: &PixelBuffer) -> RgbImage {
    RgbImage::from_fn(buffer.width(), buffer.height(), |x, y| {
        let [r, g, b, a] = buffer.get_pixel(x, y).0;
        let alpha = a as f32 / 255.0;
        let over_white = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        image::Rgb([over_white(r), over_white(g), over_white(b)])
    })
}

/// Encode `buffer` to `path`, picking the format from the extension.
pub fn write_image(buffer: &PixelBuffer, path: &Path) -> EditorResult<()> {
    let format = ImageFormat::from_path(path)
        .map_err(|e| EditorError::Export(format!("{}: {}", path.display(), e)))?;
    let image = if supports_alpha(format) {
        DynamicImage::ImageRgba8(buffer.clone())
    } else {
        DynamicImage::ImageRgb8(flatten_to_rgb(buffer))
    };
    image
        .save_with_format(path, format)
        .map_err(|e| EditorError::Export(format!("{}: {}", path.display(), e)))?;
    info!(
        "Exported {}x{} image to {}",
        buffer.width(),
        buffer.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;
    use egui::Pos2;

    #[test]
    fn half_transparent_red_flattens_to_pink() {
        let buffer = PixelBuffer::from_pixel(1, 1, image::Rgba([255, 0, 0, 128]));
        let rgb = flatten_to_rgb(&buffer);
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 127, 127]);
    }

    #[test]
    fn scaled_image_renders_at_visible_size() {
        let mut item = factory::create_image(
            PixelBuffer::from_pixel(10, 20, image::Rgba([1, 2, 3, 255])),
            Pos2::new(40.0, 40.0),
        );
        item.transform_mut().scale = egui::Vec2::splat(2.0);
        let rendered = render_image_item(&item).unwrap();
        assert_eq!(rendered.dimensions(), (20, 40));
    }
}
