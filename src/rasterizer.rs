//! Vector-to-pixel conversion and alpha-clearing erase.
//!
//! Vector items are drawn with tiny-skia into a transparent buffer covering
//! their pen-inclusive local bounds. Erasing clears a square scene-space brush
//! mapped into the item's pixel grid.

use egui::{Color32, Pos2, Rect, Vec2};
use log::{debug, info};
use tiny_skia::{
    BlendMode, ColorU8, FillRule, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke,
    Transform,
};

use crate::document::Document;
use crate::effects::PixelBuffer;
use crate::element::{Element, ElementKind, EraseMode, Outline, RasterData};
use crate::geometry::map_point;
use crate::id_generator::ItemId;
use crate::state::EditorState;

/// Straight RGBA buffer to a premultiplied pixmap.
pub(crate) fn image_to_pixmap(image: &PixelBuffer) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Premultiplied pixmap to a straight RGBA buffer.
pub(crate) fn pixmap_to_image(pixmap: &Pixmap) -> PixelBuffer {
    let mut image = PixelBuffer::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
    image
}

/// Run `f` on a pixmap that shares `image`'s raw bytes, then copy them back.
///
/// The bytes are not premultiplied first, so `f` must only write fully
/// transparent pixels.
fn with_pixmap(image: &mut PixelBuffer, f: impl FnOnce(&mut Pixmap)) {
    let Some(size) = IntSize::from_wh(image.width(), image.height()) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(image.as_raw().clone(), size) else {
        return;
    };
    f(&mut pixmap);
    image.copy_from_slice(pixmap.data());
}

fn paint_for(color: Color32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn stroke_for(outline: &Outline, cap: LineCap) -> Stroke {
    Stroke {
        width: outline.width,
        line_cap: cap,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
}

/// Draw a vector item's local geometry into a transparent buffer.
///
/// Returns the buffer and the local position of its top-left pixel, or
/// `None` for kinds that are not converted on erase.
pub fn render_vector(element: &Element) -> Option<(PixelBuffer, Pos2)> {
    let bounds = element.bounding_rect();
    let width = bounds.width().ceil().max(1.0) as u32;
    let height = bounds.height().ceil().max(1.0) as u32;
    let mut pixmap = Pixmap::new(width, height)?;
    let to_pixels = Transform::from_translate(-bounds.min.x, -bounds.min.y);

    match element.kind() {
        ElementKind::Rectangle(shape) => {
            let path = PathBuilder::from_rect(skia_rect(shape.rect)?);
            pixmap.fill_path(&path, &paint_for(shape.fill), FillRule::Winding, to_pixels, None);
            let stroke = stroke_for(&shape.outline, LineCap::Butt);
            pixmap.stroke_path(&path, &paint_for(shape.outline.color), &stroke, to_pixels, None);
        }
        ElementKind::Ellipse(shape) => {
            let path = PathBuilder::from_oval(skia_rect(shape.rect)?)?;
            pixmap.fill_path(&path, &paint_for(shape.fill), FillRule::Winding, to_pixels, None);
            let stroke = stroke_for(&shape.outline, LineCap::Butt);
            pixmap.stroke_path(&path, &paint_for(shape.outline.color), &stroke, to_pixels, None);
        }
        ElementKind::Line(line) => {
            let mut pb = PathBuilder::new();
            pb.move_to(line.start.x, line.start.y);
            pb.line_to(line.end.x, line.end.y);
            let path = pb.finish()?;
            let stroke = stroke_for(&line.outline, LineCap::Square);
            pixmap.stroke_path(&path, &paint_for(line.outline.color), &stroke, to_pixels, None);
        }
        _ => return None,
    }

    Some((pixmap_to_image(&pixmap), bounds.min))
}

/// Turn a not-yet-rasterized vector item into an equivalent raster item.
///
/// The item keeps its id, slot, z and flags, so commands that refer to it
/// stay valid. The conversion cannot be undone.
pub fn rasterize_element(document: &mut Document, id: ItemId) -> bool {
    let Some(element) = document.get_mut(id) else {
        return false;
    };
    if element.capabilities().erase != EraseMode::Rasterize {
        return false;
    }
    let Some((buffer, origin)) = render_vector(element) else {
        return false;
    };
    let pinned = map_point(&element.scene_transform(), origin);

    let raster = ElementKind::RasterFromErase(RasterData::new(buffer, origin));
    let vector = element.replace_kind(raster);
    // Whole-pixel buffer sizes can move the pivot; keep the pixels in place.
    element.reanchor(origin, pinned);
    info!("Rasterized {} {}", vector.name(), id);
    true
}

/// Clear the pixels of a raster-backed item under a square scene-space
/// brush. Returns `false` if the item has no pixels of its own.
pub fn erase_pixels(element: &mut Element, center: Pos2, brush_size: f32) -> bool {
    let Some(scene_to_local) = element.scene_transform().invert() else {
        return false;
    };
    let Some(brush) = tiny_skia::Rect::from_xywh(
        center.x - brush_size / 2.0,
        center.y - brush_size / 2.0,
        brush_size,
        brush_size,
    ) else {
        return false;
    };
    let mut paint = Paint::default();
    paint.blend_mode = BlendMode::Clear;
    // Binary coverage keeps repeated passes identical.
    paint.anti_alias = false;

    match element.kind_mut() {
        ElementKind::Image(layers) => {
            with_pixmap(layers.erase_target(), |pixmap| {
                pixmap.fill_rect(brush, &paint, scene_to_local, None);
            });
            layers.commit_erase();
        }
        ElementKind::RasterFromErase(raster) => {
            let origin = raster.origin();
            let to_pixels = scene_to_local.post_translate(-origin.x, -origin.y);
            with_pixmap(raster.buffer_mut(), |pixmap| {
                pixmap.fill_rect(brush, &paint, to_pixels, None);
            });
        }
        _ => return false,
    }
    true
}

/// Erase under the brush centered at `center` on every item whose drawn
/// shape it touches.
///
/// Vector items are rasterized first. A selected item stays selected and its
/// decoration follows the new pixel bounds. Returns how many items were
/// affected.
pub fn erase_at(
    document: &mut Document,
    state: &mut EditorState,
    center: Pos2,
    brush_size: f32,
) -> usize {
    let brush = Rect::from_center_size(center, Vec2::splat(brush_size));
    let mut touched = 0;
    for id in document.items_in_rect(brush) {
        let Some(mode) = document
            .get(id)
            .filter(|e| e.touches_scene_rect(brush))
            .map(|e| e.capabilities().erase)
        else {
            continue;
        };
        match mode {
            EraseMode::None => continue,
            EraseMode::Pixels => {}
            EraseMode::Rasterize => {
                if !rasterize_element(document, id) {
                    continue;
                }
                if state.selected_item() == Some(id) {
                    state.refresh_decoration(document);
                }
            }
        }
        if let Some(element) = document.get_mut(id) {
            if erase_pixels(element, center, brush_size) {
                touched += 1;
            }
        }
    }
    if touched > 0 {
        debug!("erase at {:?} touched {} item(s)", center, touched);
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;

    #[test]
    fn rectangle_renders_fill_and_outline() {
        let rect = factory::create_rectangle(
            Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(20.0, 10.0)),
            Color32::from_rgb(0, 255, 0),
            Outline::new(Color32::from_rgb(255, 0, 0), 2.0),
        );
        let (buffer, origin) = render_vector(&rect).unwrap();
        assert_eq!(origin, Pos2::new(-1.0, -1.0));
        assert_eq!(buffer.dimensions(), (22, 12));
        assert_eq!(buffer.get_pixel(11, 6).0, [0, 255, 0, 255]);
        assert_eq!(buffer.get_pixel(11, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn premultiply_round_trip_keeps_opaque_pixels() {
        let image = PixelBuffer::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        let pixmap = image_to_pixmap(&image).unwrap();
        assert_eq!(pixmap_to_image(&pixmap), image);
    }
}
