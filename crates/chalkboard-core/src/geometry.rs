//! Pure geometric predicates used by hit-testing and rendering.

use kurbo::{Point, Rect};

/// Maximum distance (in board units) at which a pointer still hits an arrow shaft.
pub const ARROW_HIT_TOLERANCE: f64 = 8.0;

/// Distance from a point to a line segment (a→b).
///
/// The projection is clamped to the segment, so points beyond either end
/// measure to the nearest endpoint rather than to the infinite line.
pub fn point_to_segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Circle containment test standing in for an ellipse test.
///
/// Uses `max(radius_x, radius_y)` as the radius. Boundary inclusive.
pub fn ellipse_contains(point: Point, center: Point, radius_x: f64, radius_y: f64) -> bool {
    let radius = radius_x.max(radius_y);
    (point - center).hypot() <= radius
}

/// Axis-aligned box containment with unordered corners. Boundary inclusive.
pub fn box_contains(point: Point, corner1: Point, corner2: Point) -> bool {
    let rect = normalized_box(corner1, corner2);
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Build a rectangle with `x0 <= x1` and `y0 <= y1` from two arbitrary corners.
pub fn normalized_box(corner1: Point, corner2: Point) -> Rect {
    Rect::new(
        corner1.x.min(corner2.x),
        corner1.y.min(corner2.y),
        corner1.x.max(corner2.x),
        corner1.y.max(corner2.y),
    )
}

/// True when every coordinate is finite.
pub(crate) fn is_finite_point(point: Point) -> bool {
    point.x.is_finite() && point.y.is_finite()
}
