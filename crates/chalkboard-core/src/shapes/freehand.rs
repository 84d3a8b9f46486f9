//! Freehand drawing shape (pen strokes and erasures).

use super::{SerializableColor, ShapeId, ShapeTrait, TextMetrics};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand path (series of points).
///
/// Used for both pen strokes and erasures; the enclosing [`super::Shape`]
/// variant decides how it is painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freehand {
    pub(crate) id: ShapeId,
    /// Whether the path is painted.
    #[serde(default = "super::text::default_visible")]
    pub visible: bool,
    /// Stroke color.
    pub color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Points in the path, never empty.
    pub points: Vec<Point>,
}

impl Freehand {
    /// Create a path seeded with its first point.
    pub fn new(start: Point, color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            visible: true,
            color,
            stroke_width,
            points: vec![start],
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the points (stroke width not included).
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p))
    }

    /// Polyline through every point.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some((first, rest)) = self.points.split_first() else {
            return path;
        };
        path.move_to(*first);
        if rest.is_empty() {
            // A single click still leaves a round dot once stroked with round caps.
            path.line_to(*first);
        }
        for point in rest {
            path.line_to(*point);
        }
        path
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn hit_test(&self, _point: Point, _metrics: &dyn TextMetrics) -> bool {
        // Freehand paths are not selectable by pointer.
        false
    }

    fn selection_bounds(&self, _metrics: &dyn TextMetrics) -> Option<Rect> {
        None
    }

    fn anchor(&self) -> Point {
        self.points.first().copied().unwrap_or(Point::ZERO)
    }

    fn move_anchor(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ApproxTextMetrics;

    #[test]
    fn test_freehand_creation() {
        let freehand = Freehand::new(Point::new(1.0, 2.0), SerializableColor::black(), 4.0);
        assert_eq!(freehand.len(), 1);
        assert!(freehand.visible);
    }

    #[test]
    fn test_add_points() {
        let mut freehand = Freehand::new(Point::new(0.0, 0.0), SerializableColor::black(), 4.0);
        freehand.add_point(Point::new(10.0, 10.0));
        freehand.add_point(Point::new(20.0, 5.0));
        assert_eq!(freehand.len(), 3);
        assert_eq!(freehand.points[2], Point::new(20.0, 5.0));
    }

    #[test]
    fn test_bounds() {
        let mut freehand = Freehand::new(Point::new(0.0, 0.0), SerializableColor::black(), 4.0);
        freehand.add_point(Point::new(100.0, 50.0));
        freehand.add_point(Point::new(50.0, 100.0));
        assert_eq!(freehand.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_never_hit() {
        let mut freehand = Freehand::new(Point::new(0.0, 0.0), SerializableColor::black(), 4.0);
        freehand.add_point(Point::new(100.0, 0.0));
        assert!(!freehand.hit_test(Point::new(50.0, 0.0), &ApproxTextMetrics));
        assert!(freehand.selection_bounds(&ApproxTextMetrics).is_none());
    }

    #[test]
    fn test_single_point_path_is_a_dot() {
        let freehand = Freehand::new(Point::new(3.0, 4.0), SerializableColor::black(), 4.0);
        assert_eq!(freehand.to_path().elements().len(), 2);
    }
}
