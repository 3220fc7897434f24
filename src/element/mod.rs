//! Drawable items.
//!
//! Every item is an [`Element`]: common placement and interaction state plus
//! a typed payload in [`ElementKind`]. What an item supports is decided once,
//! when it is built, and published through [`Capabilities`].

use egui::{Pos2, Rect, Vec2};
use tiny_skia::Transform;

mod common;
pub(crate) mod image;
pub(crate) mod shape;
pub(crate) mod stroke;

pub use common::{Capabilities, EraseMode, HasFill, HasOutline, Outline, ResizeMode};
pub use image::RasterData;
pub use shape::{LineData, PolygonData, PolygonShape, ShapeData, TableData};
pub use stroke::StrokeData;

use crate::effects::ImageLayers;
use crate::geometry::hit_testing::{
    distance_to_segment, ellipse_contains, polygon_contains, polygon_near_segment,
    polygon_touches_ellipse, polygons_overlap, polyline_contains, rect_corners, HIT_TOLERANCE,
};
use crate::geometry::{map_point, map_rect_bounds, uniform_axis, ItemTransform};
use crate::id_generator::{generate_id, ItemId};

/// Typed payload of an item.
#[derive(Debug, Clone)]
pub enum ElementKind {
    Rectangle(ShapeData),
    Ellipse(ShapeData),
    Line(LineData),
    Polygon(PolygonData),
    PathStroke(StrokeData),
    Image(ImageLayers),
    Table(TableData),
    /// A vector item that was converted to pixels by the eraser.
    RasterFromErase(RasterData),
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangle(_) => "Rectangle",
            Self::Ellipse(_) => "Ellipse",
            Self::Line(_) => "Line",
            Self::Polygon(p) => match p.shape {
                PolygonShape::Triangle => "Triangle",
                PolygonShape::Generic => "Polygon",
            },
            Self::PathStroke(_) => "Pen Stroke",
            Self::Image(_) => "Image",
            Self::Table(_) => "Table",
            Self::RasterFromErase(_) => "Erased Shape",
        }
    }

    fn capabilities(&self) -> Capabilities {
        let (has_fill, has_outline, croppable, resize, erase) = match self {
            Self::Rectangle(_) | Self::Ellipse(_) => {
                (true, true, false, ResizeMode::Rect, EraseMode::Rasterize)
            }
            Self::Line(_) => (false, true, false, ResizeMode::Uniform, EraseMode::Rasterize),
            Self::Polygon(_) => (true, true, false, ResizeMode::Uniform, EraseMode::None),
            Self::PathStroke(_) => (false, true, false, ResizeMode::Uniform, EraseMode::None),
            Self::Image(_) => (false, false, true, ResizeMode::Uniform, EraseMode::Pixels),
            Self::Table(_) => (true, true, false, ResizeMode::Rect, EraseMode::None),
            Self::RasterFromErase(_) => {
                (false, false, false, ResizeMode::Uniform, EraseMode::Pixels)
            }
        };
        Capabilities {
            has_fill,
            has_outline,
            rotatable: true,
            croppable,
            resize,
            erase,
        }
    }

    fn local_rect(&self) -> Rect {
        match self {
            Self::Rectangle(s) | Self::Ellipse(s) => s.rect,
            Self::Table(t) => t.rect,
            Self::Line(l) => l.bounds(),
            Self::Polygon(p) => p.bounds(),
            Self::PathStroke(s) => s.bounds(),
            Self::Image(layers) => {
                let (w, h) = layers.dimensions();
                Rect::from_min_size(Pos2::ZERO, Vec2::new(w as f32, h as f32))
            }
            Self::RasterFromErase(r) => r.bounds(),
        }
    }

    fn pen_width(&self) -> f32 {
        match self {
            Self::Rectangle(s) | Self::Ellipse(s) => s.outline.width,
            Self::Table(t) => t.outline.width,
            Self::Line(l) => l.outline.width,
            Self::Polygon(p) => p.outline.width,
            Self::PathStroke(s) => s.outline.width,
            Self::Image(_) | Self::RasterFromErase(_) => 0.0,
        }
    }
}

/// An item owned by the [`crate::Document`].
#[derive(Debug)]
pub struct Element {
    id: ItemId,
    kind: ElementKind,
    transform: ItemTransform,
    z: f32,
    selectable: bool,
    movable: bool,
    selected: bool,
    capabilities: Capabilities,
}

impl Element {
    pub(crate) fn new(kind: ElementKind, transform: ItemTransform) -> Self {
        let capabilities = kind.capabilities();
        Self {
            id: generate_id(),
            kind,
            transform,
            z: 0.0,
            selectable: true,
            movable: true,
            selected: false,
            capabilities,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    /// Swap the payload, keeping identity, placement, z and flags.
    /// Capabilities follow the new kind.
    pub(crate) fn replace_kind(&mut self, kind: ElementKind) -> ElementKind {
        self.capabilities = kind.capabilities();
        std::mem::replace(&mut self.kind, kind)
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn is_pen_stroke(&self) -> bool {
        matches!(self.kind, ElementKind::PathStroke(_))
    }

    pub fn transform(&self) -> &ItemTransform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut ItemTransform {
        &mut self.transform
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn set_z(&mut self, z: f32) {
        self.z = z;
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    pub(crate) fn set_movable(&mut self, movable: bool) {
        self.movable = movable;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Only the document's selection bookkeeping flips this flag.
    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn fill(&self) -> Option<&dyn HasFill> {
        match &self.kind {
            ElementKind::Rectangle(s) | ElementKind::Ellipse(s) => Some(s),
            ElementKind::Polygon(p) => Some(p),
            ElementKind::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn fill_mut(&mut self) -> Option<&mut dyn HasFill> {
        match &mut self.kind {
            ElementKind::Rectangle(s) | ElementKind::Ellipse(s) => Some(s),
            ElementKind::Polygon(p) => Some(p),
            ElementKind::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn outline(&self) -> Option<&dyn HasOutline> {
        match &self.kind {
            ElementKind::Rectangle(s) | ElementKind::Ellipse(s) => Some(s),
            ElementKind::Line(l) => Some(l),
            ElementKind::Polygon(p) => Some(p),
            ElementKind::PathStroke(s) => Some(s),
            ElementKind::Table(t) => Some(t),
            ElementKind::Image(_) | ElementKind::RasterFromErase(_) => None,
        }
    }

    pub fn outline_mut(&mut self) -> Option<&mut dyn HasOutline> {
        match &mut self.kind {
            ElementKind::Rectangle(s) | ElementKind::Ellipse(s) => Some(s),
            ElementKind::Line(l) => Some(l),
            ElementKind::Polygon(p) => Some(p),
            ElementKind::PathStroke(s) => Some(s),
            ElementKind::Table(t) => Some(t),
            ElementKind::Image(_) | ElementKind::RasterFromErase(_) => None,
        }
    }

    pub fn image(&self) -> Option<&ImageLayers> {
        match &self.kind {
            ElementKind::Image(layers) => Some(layers),
            _ => None,
        }
    }

    pub fn image_mut(&mut self) -> Option<&mut ImageLayers> {
        match &mut self.kind {
            ElementKind::Image(layers) => Some(layers),
            _ => None,
        }
    }

    pub fn raster(&self) -> Option<&RasterData> {
        match &self.kind {
            ElementKind::RasterFromErase(raster) => Some(raster),
            _ => None,
        }
    }

    /// Geometric bounds in the local frame, without the pen.
    pub fn local_rect(&self) -> Rect {
        self.kind.local_rect()
    }

    /// Local bounds including half the pen width on every side.
    pub fn bounding_rect(&self) -> Rect {
        self.local_rect().expand(self.kind.pen_width() / 2.0)
    }

    pub fn scene_transform(&self) -> Transform {
        self.transform.to_affine(self.local_rect())
    }

    /// Axis-aligned scene bounds of the transformed item.
    pub fn scene_bounds(&self) -> Rect {
        map_rect_bounds(&self.scene_transform(), self.bounding_rect())
    }

    /// Width and height of the item as drawn, before rotation.
    pub fn visible_size(&self) -> Vec2 {
        let size = self.local_rect().size();
        Vec2::new(size.x * self.transform.scale.x, size.y * self.transform.scale.y)
    }

    pub fn scene_to_local(&self, scene: Pos2) -> Option<Pos2> {
        let inverse = self.scene_transform().invert()?;
        Some(map_point(&inverse, scene))
    }

    pub fn contains_scene_point(&self, scene: Pos2) -> bool {
        let Some(p) = self.scene_to_local(scene) else {
            return false;
        };
        let half_pen = self.kind.pen_width() / 2.0;
        let tolerance = half_pen.max(HIT_TOLERANCE);
        match &self.kind {
            ElementKind::Rectangle(_) | ElementKind::Table(_) => self.bounding_rect().contains(p),
            ElementKind::Ellipse(s) => ellipse_contains(s.rect, p, half_pen),
            ElementKind::Line(l) => distance_to_segment(p, l.start, l.end) <= tolerance,
            ElementKind::Polygon(poly) => {
                if polygon_contains(&poly.points, p) {
                    return true;
                }
                let mut closed = poly.points.clone();
                if let Some(first) = poly.points.first() {
                    closed.push(*first);
                }
                polyline_contains(&closed, p, tolerance)
            }
            ElementKind::PathStroke(s) => polyline_contains(s.points(), p, tolerance),
            ElementKind::Image(_) | ElementKind::RasterFromErase(_) => {
                self.local_rect().contains(p)
            }
        }
    }

    pub fn intersects_scene_rect(&self, rect: Rect) -> bool {
        self.scene_bounds().intersects(rect)
    }

    /// Whether the drawn shape, not just its bounding box, overlaps the
    /// scene-space `rect`.
    pub fn touches_scene_rect(&self, rect: Rect) -> bool {
        if !self.intersects_scene_rect(rect) {
            return false;
        }
        let Some(inverse) = self.scene_transform().invert() else {
            return false;
        };
        let brush = rect_corners(rect).map(|corner| map_point(&inverse, corner));
        let half_pen = self.kind.pen_width() / 2.0;
        match &self.kind {
            ElementKind::Ellipse(s) => polygon_touches_ellipse(&brush, s.rect, half_pen),
            ElementKind::Line(l) => polygon_near_segment(&brush, l.start, l.end, half_pen),
            ElementKind::Polygon(poly) => {
                polygons_overlap(&brush, &poly.points)
                    || poly
                        .points
                        .iter()
                        .zip(poly.points.iter().cycle().skip(1))
                        .any(|(a, b)| polygon_near_segment(&brush, *a, *b, half_pen))
            }
            ElementKind::PathStroke(s) => match s.points() {
                [single] => polygon_near_segment(&brush, *single, *single, half_pen),
                points => points
                    .windows(2)
                    .any(|pair| polygon_near_segment(&brush, pair[0], pair[1], half_pen)),
            },
            ElementKind::Rectangle(_)
            | ElementKind::Table(_)
            | ElementKind::Image(_)
            | ElementKind::RasterFromErase(_) => {
                polygons_overlap(&brush, &rect_corners(self.bounding_rect()))
            }
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.transform.position += delta;
    }

    /// Replace the local rectangle of rectangle-like kinds. Returns `false`
    /// for kinds whose geometry is not a rectangle.
    pub fn set_local_rect(&mut self, rect: Rect) -> bool {
        match &mut self.kind {
            ElementKind::Rectangle(s) | ElementKind::Ellipse(s) => s.rect = rect,
            ElementKind::Table(t) => t.rect = rect,
            _ => return false,
        }
        true
    }

    /// Shift the item so the local point `local` lands on `scene_target`.
    pub fn reanchor(&mut self, local: Pos2, scene_target: Pos2) {
        let current = map_point(&self.scene_transform(), local);
        self.transform.position += scene_target - current;
    }

    /// Rotation is about the item's center, so the center stays in place.
    pub fn set_rotation(&mut self, degrees: f32) -> bool {
        if !self.capabilities.rotatable {
            return false;
        }
        self.transform.rotation = degrees;
        true
    }

    /// Set the drawn size, keeping the top-left corner in place.
    ///
    /// Rectangle-like kinds take both dimensions. Uniformly scaled kinds keep
    /// their aspect ratio and follow `width` only, or `height` when they have
    /// no width (a vertical line).
    pub fn set_size(&mut self, width: f32, height: f32, min_size: f32) -> bool {
        let local = self.local_rect();
        let anchor = map_point(&self.scene_transform(), local.min);
        let scale = self.transform.scale;
        match self.capabilities.resize {
            ResizeMode::Rect => {
                if scale.x.abs() <= f32::EPSILON || scale.y.abs() <= f32::EPSILON {
                    return false;
                }
                let size = Vec2::new(width.max(min_size) / scale.x, height.max(min_size) / scale.y);
                self.set_local_rect(Rect::from_min_size(local.min, size));
            }
            ResizeMode::Uniform => {
                let (unscaled, axis_scale, _) = uniform_axis(local, scale, Vec2::ZERO);
                let target = if local.width() > f32::EPSILON { width } else { height };
                let visible = unscaled * axis_scale;
                if visible <= f32::EPSILON {
                    return false;
                }
                self.transform.scale = scale * (target.max(min_size) / visible);
            }
            ResizeMode::None => return false,
        }
        self.reanchor(local.min, anchor);
        true
    }
}

/// Constructors for every item kind.
///
/// Geometry passed in is in scene coordinates. It is normalized so the local
/// bounds start at the origin and the item's position is the scene top-left.
pub mod factory {
    use egui::{Color32, Pos2, Rect};

    use super::*;
    use crate::effects::PixelBuffer;
    use crate::element::common::normalize_points;

    fn normalized(rect: Rect) -> (Rect, ItemTransform) {
        let rect = Rect::from_two_pos(rect.min, rect.max);
        (
            Rect::from_min_size(Pos2::ZERO, rect.size()),
            ItemTransform::at(rect.min),
        )
    }

    pub fn create_rectangle(rect: Rect, fill: Color32, outline: Outline) -> Element {
        let (rect, transform) = normalized(rect);
        Element::new(ElementKind::Rectangle(ShapeData { rect, fill, outline }), transform)
    }

    pub fn create_ellipse(rect: Rect, fill: Color32, outline: Outline) -> Element {
        let (rect, transform) = normalized(rect);
        Element::new(ElementKind::Ellipse(ShapeData { rect, fill, outline }), transform)
    }

    pub fn create_line(start: Pos2, end: Pos2, outline: Outline) -> Element {
        let mut points = [start, end];
        let offset = normalize_points(&mut points);
        Element::new(
            ElementKind::Line(LineData {
                start: points[0],
                end: points[1],
                outline,
            }),
            ItemTransform::at(offset.to_pos2()),
        )
    }

    pub fn create_triangle(rect: Rect, fill: Color32, outline: Outline) -> Element {
        let (rect, transform) = normalized(rect);
        Element::new(
            ElementKind::Polygon(PolygonData {
                shape: PolygonShape::Triangle,
                points: PolygonData::triangle_points(rect),
                fill,
                outline,
            }),
            transform,
        )
    }

    pub fn create_polygon(mut points: Vec<Pos2>, fill: Color32, outline: Outline) -> Element {
        let offset = normalize_points(&mut points);
        Element::new(
            ElementKind::Polygon(PolygonData {
                shape: PolygonShape::Generic,
                points,
                fill,
                outline,
            }),
            ItemTransform::at(offset.to_pos2()),
        )
    }

    pub fn create_stroke(mut points: Vec<Pos2>, outline: Outline) -> Element {
        let offset = normalize_points(&mut points);
        Element::new(
            ElementKind::PathStroke(StrokeData::new(points, outline)),
            ItemTransform::at(offset.to_pos2()),
        )
    }

    /// Image whose top-left corner sits at `position`.
    pub fn create_image(buffer: PixelBuffer, position: Pos2) -> Element {
        Element::new(
            ElementKind::Image(ImageLayers::new(buffer)),
            ItemTransform::at(position),
        )
    }

    pub fn create_table(
        rect: Rect,
        rows: usize,
        cols: usize,
        fill: Color32,
        outline: Outline,
    ) -> Element {
        let (rect, transform) = normalized(rect);
        Element::new(
            ElementKind::Table(TableData {
                rect,
                rows: rows.max(1),
                cols: cols.max(1),
                fill,
                outline,
            }),
            transform,
        )
    }
}
