//! Arrow shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, TextMetrics};
use crate::geometry::{ARROW_HIT_TOLERANCE, normalized_box, point_to_segment_distance};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use uuid::Uuid;

/// A straight arrow with a filled triangular head at `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ShapeId,
    /// Whether the arrow is painted.
    #[serde(default = "super::text::default_visible")]
    pub visible: bool,
    /// Start point.
    pub start: Point,
    /// End point (where the arrowhead points).
    pub end: Point,
    /// Style properties.
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Arrow {
    /// Base arrowhead length; the stroke width is added on top.
    pub const HEAD_BASE_LENGTH: f64 = 10.0;
    /// Angle between the shaft and each side of the head.
    pub const HEAD_HALF_ANGLE: f64 = PI / 8.0;

    /// Create a new arrow.
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            visible: true,
            start,
            end,
            style,
        }
    }

    /// Get the length of the arrow shaft.
    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }

    pub fn head_length(&self) -> f64 {
        Self::HEAD_BASE_LENGTH + self.style.stroke_width
    }

    /// The two back corners of the arrowhead.
    pub fn head_points(&self) -> (Point, Point) {
        let v = self.end - self.start;
        let angle = v.y.atan2(v.x);
        let len = self.head_length();
        let corner = |a: f64| Point::new(self.end.x - len * a.cos(), self.end.y - len * a.sin());
        (
            corner(angle - Self::HEAD_HALF_ANGLE),
            corner(angle + Self::HEAD_HALF_ANGLE),
        )
    }

    /// Shaft as a single line segment.
    pub fn shaft_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    /// Closed triangle for the arrowhead.
    pub fn head_path(&self) -> BezPath {
        let (left, right) = self.head_points();
        let mut path = BezPath::new();
        path.move_to(self.end);
        path.line_to(left);
        path.line_to(right);
        path.close_path();
        path
    }
}

impl ShapeTrait for Arrow {
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
        point_to_segment_distance(point, self.start, self.end) <= ARROW_HIT_TOLERANCE
    }

    fn selection_bounds(&self, _metrics: &dyn TextMetrics) -> Option<Rect> {
        Some(normalized_box(self.start, self.end))
    }

    fn anchor(&self) -> Point {
        self.start
    }

    fn move_anchor(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}
