//! Tool system for the whiteboard.

use crate::shapes::{
    Arrow, Circle, Freehand, Rectangle, SerializableColor, Shape, ShapeStyle, Text,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Draw,
    Erase,
    Text,
    Rect,
    Circle,
    Arrow,
    Move,
    Select,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Draw,
        ToolKind::Erase,
        ToolKind::Text,
        ToolKind::Rect,
        ToolKind::Circle,
        ToolKind::Arrow,
        ToolKind::Move,
        ToolKind::Select,
    ];

    /// Toolbar name of the tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Draw => "draw",
            ToolKind::Erase => "erase",
            ToolKind::Text => "text",
            ToolKind::Rect => "rect",
            ToolKind::Circle => "circle",
            ToolKind::Arrow => "arrow",
            ToolKind::Move => "move",
            ToolKind::Select => "select",
        }
    }

    /// Tools that start a shape on pointer-down and grow it while dragging.
    pub fn creates_by_drag(self) -> bool {
        matches!(
            self,
            ToolKind::Draw | ToolKind::Erase | ToolKind::Rect | ToolKind::Circle | ToolKind::Arrow
        )
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for a tool name outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool {0:?}")]
pub struct ParseToolError(pub String);

impl FromStr for ToolKind {
    type Err = ParseToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| ParseToolError(s.to_string()))
    }
}

/// Toolbar settings applied to newly created shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Pen and outline color.
    pub stroke_color: SerializableColor,
    /// Pen and outline width.
    pub stroke_width: f64,
    /// Eraser width.
    pub erase_width: f64,
    /// Color erasures are recorded with (the board background).
    pub erase_color: SerializableColor,
    /// Text color.
    pub text_color: SerializableColor,
    /// Text font size.
    pub text_size: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 4.0,
            erase_width: 30.0,
            erase_color: SerializableColor::white(),
            text_color: SerializableColor::rgb(0x00, 0x44, 0xff),
            text_size: 22.0,
        }
    }
}

/// Manages the current tool and the settings for new shapes.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Settings applied to new shapes.
    pub settings: ToolSettings,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.settings.stroke_color = color;
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.settings.stroke_width = width;
    }

    pub fn set_erase_width(&mut self, width: f64) {
        self.settings.erase_width = width;
    }

    pub fn set_text_color(&mut self, color: SerializableColor) {
        self.settings.text_color = color;
    }

    pub fn set_text_size(&mut self, size: f64) {
        self.settings.text_size = size;
    }

    fn outline_style(&self) -> ShapeStyle {
        ShapeStyle::new(self.settings.stroke_color, self.settings.stroke_width)
    }

    /// Create the shape the current tool starts at `point` on pointer-down.
    ///
    /// Two-point shapes start with both corners at `point`. Returns `None`
    /// for tools that do not create by dragging.
    pub fn begin_shape(&self, point: Point) -> Option<Shape> {
        let s = &self.settings;
        let shape = match self.current_tool {
            ToolKind::Draw => Shape::Stroke(Freehand::new(point, s.stroke_color, s.stroke_width)),
            ToolKind::Erase => Shape::Erase(Freehand::new(point, s.erase_color, s.erase_width)),
            ToolKind::Rect => Shape::Rectangle(Rectangle::new(point, point, self.outline_style())),
            ToolKind::Circle => Shape::Circle(Circle::new(point, point, self.outline_style())),
            ToolKind::Arrow => Shape::Arrow(Arrow::new(point, point, self.outline_style())),
            ToolKind::Text | ToolKind::Move | ToolKind::Select => return None,
        };
        Some(shape)
    }

    /// Create a text label with the current text settings.
    pub fn text_shape(&self, position: Point, content: String) -> Shape {
        Shape::Text(Text::new(
            position,
            content,
            self.settings.text_size,
            self.settings.text_color,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_round_trip() {
        for tool in ToolKind::ALL {
            assert_eq!(tool.name().parse::<ToolKind>(), Ok(tool));
        }
        assert_eq!(
            "lasso".parse::<ToolKind>(),
            Err(ParseToolError("lasso".to_string()))
        );
    }

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::Draw);

        tm.set_tool(ToolKind::Rect);
        assert_eq!(tm.current_tool, ToolKind::Rect);
    }

    #[test]
    fn test_begin_shape_uses_settings() {
        let mut tm = ToolManager::new();
        tm.set_stroke_color(SerializableColor::rgb(255, 0, 0));
        tm.set_stroke_width(7.0);

        tm.set_tool(ToolKind::Draw);
        let Some(Shape::Stroke(stroke)) = tm.begin_shape(Point::new(1.0, 2.0)) else {
            panic!("expected a stroke");
        };
        assert_eq!(stroke.points, vec![Point::new(1.0, 2.0)]);
        assert_eq!(stroke.color, SerializableColor::rgb(255, 0, 0));
        assert!((stroke.stroke_width - 7.0).abs() < f64::EPSILON);

        tm.set_tool(ToolKind::Erase);
        let Some(Shape::Erase(erase)) = tm.begin_shape(Point::new(1.0, 2.0)) else {
            panic!("expected an erasure");
        };
        assert_eq!(erase.color, SerializableColor::white());
        assert!((erase.stroke_width - 30.0).abs() < f64::EPSILON);

        tm.set_tool(ToolKind::Arrow);
        let Some(Shape::Arrow(arrow)) = tm.begin_shape(Point::new(3.0, 4.0)) else {
            panic!("expected an arrow");
        };
        assert_eq!(arrow.start, arrow.end);
        assert!((arrow.style.stroke_width - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_drag_tools_create_nothing() {
        let mut tm = ToolManager::new();
        for tool in [ToolKind::Text, ToolKind::Move, ToolKind::Select] {
            tm.set_tool(tool);
            assert!(!tool.creates_by_drag());
            assert!(tm.begin_shape(Point::ZERO).is_none());
        }
    }

    #[test]
    fn test_text_shape_defaults() {
        let tm = ToolManager::new();
        let Shape::Text(text) = tm.text_shape(Point::new(5.0, 5.0), "hi".to_string()) else {
            panic!("expected text");
        };
        assert!((text.font_size - 22.0).abs() < f64::EPSILON);
        assert_eq!(text.color.to_string(), "#0044ff");
    }
}
