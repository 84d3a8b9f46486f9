//! Text shape.

use super::{SerializableColor, ShapeId, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub(crate) fn default_visible() -> bool {
    true
}

/// Text measurement capability.
///
/// Hit-testing and selection outlines size text by its measured advance
/// width; renderers with a real font implement this, headless code can use
/// [`ApproxTextMetrics`].
pub trait TextMetrics {
    /// Advance width of `content` laid out on a single line at `font_size`.
    fn text_width(&self, content: &str, font_size: f64) -> f64;
}

/// Character-count based text width estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMetrics;

impl ApproxTextMetrics {
    /// Average glyph advance as a fraction of the font size.
    pub const CHAR_WIDTH_FACTOR: f64 = 0.55;
}

impl TextMetrics for ApproxTextMetrics {
    fn text_width(&self, content: &str, font_size: f64) -> f64 {
        content.chars().count() as f64 * font_size * Self::CHAR_WIDTH_FACTOR
    }
}

/// A single-line text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Whether the label is painted.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Anchor: left end of the baseline.
    pub position: Point,
    /// The text content.
    #[serde(rename = "value")]
    pub content: String,
    /// Font size in pixels.
    #[serde(rename = "size")]
    pub font_size: f64,
    /// Fill color.
    pub color: SerializableColor,
}

impl Text {
    /// Create a new text shape.
    pub fn new(position: Point, content: String, font_size: f64, color: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            visible: true,
            position,
            content,
            font_size,
            color,
        }
    }

    /// Measured box: baseline at `position.y`, top at `position.y - font_size`.
    pub fn bounds(&self, metrics: &dyn TextMetrics) -> Rect {
        let width = metrics.text_width(&self.content, self.font_size);
        Rect::new(
            self.position.x,
            self.position.y - self.font_size,
            self.position.x + width,
            self.position.y,
        )
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn hit_test(&self, point: Point, metrics: &dyn TextMetrics) -> bool {
        let b = self.bounds(metrics);
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }

    fn selection_bounds(&self, metrics: &dyn TextMetrics) -> Option<Rect> {
        Some(self.bounds(metrics))
    }

    fn anchor(&self) -> Point {
        self.position
    }

    fn move_anchor(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
