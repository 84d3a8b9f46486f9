//! Circle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, TextMetrics};
use crate::geometry::{ellipse_contains, normalized_box};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle inscribed in the box spanned by two corners.
///
/// A non-square box is drawn and hit-tested as a circle whose radius is the
/// larger of the two half-extents, not as an ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Whether the circle is painted.
    #[serde(default = "super::text::default_visible")]
    pub visible: bool,
    /// First box corner.
    pub start: Point,
    /// Opposite box corner.
    pub end: Point,
    /// Style properties.
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new circle from its box corners.
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            visible: true,
            start,
            end,
            style,
        }
    }

    pub fn center(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Half-width and half-height of the box.
    pub fn radii(&self) -> (f64, f64) {
        let b = normalized_box(self.start, self.end);
        (b.width() / 2.0, b.height() / 2.0)
    }

    /// Radius actually drawn: `max(rx, ry)`.
    pub fn radius(&self) -> f64 {
        let (rx, ry) = self.radii();
        rx.max(ry)
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center(), self.radius())
    }

    pub fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn hit_test(&self, point: Point, _metrics: &dyn TextMetrics) -> bool {
        let (rx, ry) = self.radii();
        ellipse_contains(point, self.center(), rx, ry)
    }

    fn selection_bounds(&self, _metrics: &dyn TextMetrics) -> Option<Rect> {
        let c = self.center();
        let r = self.radius();
        Some(Rect::new(c.x - r, c.y - r, c.x + r, c.y + r))
    }

    fn anchor(&self) -> Point {
        self.start
    }

    fn move_anchor(&mut self, delta: Vec2) {
        self.start += delta;
    }
}
