//! Shape definitions for the whiteboard.

mod arrow;
mod circle;
mod freehand;
mod rectangle;
mod text;

pub use arrow::Arrow;
pub use circle::Circle;
pub use freehand::Freehand;
pub use rectangle::Rectangle;
pub use text::{ApproxTextMetrics, Text, TextMetrics};

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Serializable color representation (RGBA8).
///
/// Stored on disk as a CSS-style hex string so saved boards stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Error returned when a color string is not `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ParseColorError(pub String);

impl FromStr for SerializableColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| err())
        };
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = byte(0..1)? * 17;
                let g = byte(1..2)? * 17;
                let b = byte(2..3)? * 17;
                Ok(Self::rgb(r, g, b))
            }
            6 => Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl Serialize for SerializableColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SerializableColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Stroke properties shared by the outlined shapes (rect, circle, arrow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Stroke color.
    #[serde(rename = "stroke")]
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub fn new(stroke_color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            stroke_color,
            stroke_width,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(SerializableColor::black(), 4.0)
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Whether the shape is painted and hit-testable.
    fn is_visible(&self) -> bool;

    /// Show or hide the shape.
    fn set_visible(&mut self, visible: bool);

    /// Check if a point (in board coordinates) hits this shape.
    fn hit_test(&self, point: Point, metrics: &dyn TextMetrics) -> bool;

    /// Box around which the selection outline is drawn, before padding.
    /// `None` for shapes that never show a selection outline.
    fn selection_bounds(&self, metrics: &dyn TextMetrics) -> Option<Rect>;

    /// Reference point used when dragging.
    fn anchor(&self) -> Point;

    /// Shift the anchor by `delta`. Points that follow the anchor move with it.
    fn move_anchor(&mut self, delta: Vec2);
}

/// A drawable object on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Stroke(Freehand),
    Erase(Freehand),
    Text(Text),
    #[serde(rename = "rect")]
    Rectangle(Rectangle),
    Circle(Circle),
    Arrow(Arrow),
}

impl Shape {
    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Stroke(s) | Shape::Erase(s) => s,
            Shape::Text(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Circle(s) => s,
            Shape::Arrow(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Stroke(s) | Shape::Erase(s) => s,
            Shape::Text(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Circle(s) => s,
            Shape::Arrow(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.as_trait().id()
    }

    pub fn is_visible(&self) -> bool {
        self.as_trait().is_visible()
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.as_trait_mut().set_visible(visible);
    }

    pub fn hit_test(&self, point: Point, metrics: &dyn TextMetrics) -> bool {
        self.as_trait().hit_test(point, metrics)
    }

    pub fn selection_bounds(&self, metrics: &dyn TextMetrics) -> Option<Rect> {
        self.as_trait().selection_bounds(metrics)
    }

    pub fn anchor(&self) -> Point {
        self.as_trait().anchor()
    }

    /// Move the anchor to `anchor`.
    ///
    /// Rects and circles move their first corner only; the opposite corner
    /// stays put. Arrows move both endpoints.
    pub fn move_anchor_to(&mut self, anchor: Point) {
        let delta = anchor - self.anchor();
        self.as_trait_mut().move_anchor(delta);
    }

    /// Serialized type tag (`stroke`, `erase`, `text`, `rect`, `circle`, `arrow`).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Stroke(_) => "stroke",
            Shape::Erase(_) => "erase",
            Shape::Text(_) => "text",
            Shape::Rectangle(_) => "rect",
            Shape::Circle(_) => "circle",
            Shape::Arrow(_) => "arrow",
        }
    }

    /// Freehand strokes and erasures stay where they were drawn.
    pub fn is_draggable(&self) -> bool {
        !matches!(self, Shape::Stroke(_) | Shape::Erase(_))
    }

    /// Title shown in the layer list, e.g. `rect` or `text: hello worl...`.
    pub fn label(&self) -> String {
        const MAX_CHARS: usize = 10;
        match self {
            Shape::Text(text) => {
                let mut preview: String = text.content.chars().take(MAX_CHARS).collect();
                if text.content.chars().count() > MAX_CHARS {
                    preview.push_str("...");
                }
                format!("{}: {}", self.kind_name(), preview)
            }
            _ => self.kind_name().to_string(),
        }
    }

    /// Get the freehand path if this shape is a stroke or erasure.
    pub fn as_freehand(&self) -> Option<&Freehand> {
        match self {
            Shape::Stroke(f) | Shape::Erase(f) => Some(f),
            _ => None,
        }
    }

    /// Get the mutable freehand path if this shape is a stroke or erasure.
    pub fn as_freehand_mut(&mut self) -> Option<&mut Freehand> {
        match self {
            Shape::Stroke(f) | Shape::Erase(f) => Some(f),
            _ => None,
        }
    }

    /// Update the second corner/endpoint of a rect, circle or arrow.
    /// Returns false for shapes without a second point.
    pub fn set_end(&mut self, end: Point) -> bool {
        match self {
            Shape::Rectangle(r) => r.end = end,
            Shape::Circle(c) => c.end = end,
            Shape::Arrow(a) => a.end = end,
            _ => return false,
        }
        true
    }
}
