//! Rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, TextMetrics};
use crate::geometry::{box_contains, normalized_box};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle given by two opposite corners.
///
/// The corners are stored as dragged, in any order; min/max is taken at use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Whether the rectangle is painted.
    #[serde(default = "super::text::default_visible")]
    pub visible: bool,
    /// First corner (where the drag started).
    pub start: Point,
    /// Opposite corner.
    pub end: Point,
    /// Style properties.
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            visible: true,
            start,
            end,
            style,
        }
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        normalized_box(self.start, self.end)
    }

    pub fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }
}

impl ShapeTrait for Rectangle {
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
        box_contains(point, self.start, self.end)
    }

    fn selection_bounds(&self, _metrics: &dyn TextMetrics) -> Option<Rect> {
        Some(self.as_rect())
    }

    fn anchor(&self) -> Point {
        self.start
    }

    fn move_anchor(&mut self, delta: Vec2) {
        self.start += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ApproxTextMetrics;

    #[test]
    fn test_rectangle_from_unordered_corners() {
        let rect = Rectangle::new(
            Point::new(100.0, 100.0),
            Point::new(50.0, 50.0),
            ShapeStyle::default(),
        );
        assert_eq!(rect.as_rect(), Rect::new(50.0, 50.0, 100.0, 100.0));
    }

    #[test]
    fn test_hit_test_inside_is_filled() {
        let rect = Rectangle::new(
            Point::new(10.0, 10.0),
            Point::new(50.0, 50.0),
            ShapeStyle::default(),
        );
        assert!(rect.hit_test(Point::new(30.0, 30.0), &ApproxTextMetrics));
        assert!(rect.hit_test(Point::new(50.0, 50.0), &ApproxTextMetrics));
        assert!(!rect.hit_test(Point::new(5.0, 5.0), &ApproxTextMetrics));
    }

    #[test]
    fn test_move_anchor_leaves_end_corner() {
        let mut rect = Rectangle::new(
            Point::new(10.0, 10.0),
            Point::new(50.0, 30.0),
            ShapeStyle::default(),
        );
        rect.move_anchor(Vec2::new(5.0, -10.0));
        assert_eq!(rect.end, Point::new(50.0, 30.0));
        assert_eq!(rect.as_rect(), Rect::new(15.0, 0.0, 50.0, 30.0));
    }
}
