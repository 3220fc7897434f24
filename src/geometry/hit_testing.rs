use egui::{Pos2, Rect};

/// Distance within which a pointer still counts as touching a thin item.
pub const HIT_TOLERANCE: f32 = 3.0;

/// Distance from a point to a line segment.
pub fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment = end - start;
    let len_sq = segment.length_sq();
    if len_sq <= f32::EPSILON {
        return point.distance(start);
    }
    let t = ((point - start).dot(segment) / len_sq).clamp(0.0, 1.0);
    point.distance(start + segment * t)
}

/// Whether `point` is within `tolerance` of any segment of an open polyline.
pub fn polyline_contains(points: &[Pos2], point: Pos2, tolerance: f32) -> bool {
    match points {
        [] => false,
        [single] => single.distance(point) <= tolerance,
        _ => points
            .windows(2)
            .any(|pair| distance_to_segment(point, pair[0], pair[1]) <= tolerance),
    }
}

/// Even-odd point-in-polygon test; the polygon is implicitly closed.
pub fn polygon_contains(points: &[Pos2], point: Pos2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether `point` lies inside the ellipse inscribed in `rect`, grown by
/// `tolerance` on both axes.
pub fn ellipse_contains(rect: Rect, point: Pos2, tolerance: f32) -> bool {
    let rx = rect.width() / 2.0 + tolerance;
    let ry = rect.height() / 2.0 + tolerance;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let d = point - rect.center();
    (d.x * d.x) / (rx * rx) + (d.y * d.y) / (ry * ry) <= 1.0
}

fn cross(origin: Pos2, a: Pos2, b: Pos2) -> f32 {
    let (u, v) = (a - origin, b - origin);
    u.x * v.y - u.y * v.x
}

/// Proper crossing of two segments. Touching and collinear overlaps are left
/// to [`segment_distance`].
pub fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

/// Shortest distance between two segments.
pub fn segment_distance(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> f32 {
    if segments_intersect(a1, a2, b1, b2) {
        return 0.0;
    }
    distance_to_segment(a1, b1, b2)
        .min(distance_to_segment(a2, b1, b2))
        .min(distance_to_segment(b1, a1, a2))
        .min(distance_to_segment(b2, a1, a2))
}

/// Edges of the closed polygon through `points`.
fn edges(points: &[Pos2]) -> impl Iterator<Item = (Pos2, Pos2)> + '_ {
    points
        .iter()
        .copied()
        .zip(points.iter().copied().cycle().skip(1))
}

/// Whether two simple polygons share any area or boundary crossing.
pub fn polygons_overlap(a: &[Pos2], b: &[Pos2]) -> bool {
    a.iter().any(|p| polygon_contains(b, *p))
        || b.iter().any(|p| polygon_contains(a, *p))
        || edges(a).any(|(p, q)| edges(b).any(|(r, s)| segments_intersect(p, q, r, s)))
}

/// Whether the segment `start..end`, thickened by `tolerance`, reaches into
/// `polygon`.
pub fn polygon_near_segment(polygon: &[Pos2], start: Pos2, end: Pos2, tolerance: f32) -> bool {
    polygon_contains(polygon, start)
        || edges(polygon).any(|(p, q)| segment_distance(p, q, start, end) <= tolerance)
}

/// Whether `polygon` overlaps the filled ellipse inscribed in `rect`, grown
/// by `tolerance` on both axes.
pub fn polygon_touches_ellipse(polygon: &[Pos2], rect: Rect, tolerance: f32) -> bool {
    let rx = rect.width() / 2.0 + tolerance;
    let ry = rect.height() / 2.0 + tolerance;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    // in unit-circle space the ellipse is the disc of radius 1 at the origin
    let center = rect.center();
    let unit: Vec<Pos2> = polygon
        .iter()
        .map(|p| Pos2::new((p.x - center.x) / rx, (p.y - center.y) / ry))
        .collect();
    polygon_contains(&unit, Pos2::ZERO)
        || edges(&unit).any(|(p, q)| distance_to_segment(Pos2::ZERO, p, q) <= 1.0)
}

/// Corners of `rect` in winding order.
pub fn rect_corners(rect: Rect) -> [Pos2; 4] {
    [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()]
}

/// Square handle rectangle of side `size` centered on `anchor`.
pub fn handle_rect(anchor: Pos2, size: f32) -> Rect {
    Rect::from_center_size(anchor, egui::Vec2::splat(size))
}
