//! A surface that records draw calls instead of producing pixels.

use crate::renderer::Surface;
use chalkboard_core::shapes::{ApproxTextMetrics, SerializableColor, TextMetrics};
use kurbo::{BezPath, Cap, Join, Point, Size, Stroke};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(SerializableColor),
    StrokePath {
        path: BezPath,
        width: f64,
        join: Join,
        cap: Cap,
        color: SerializableColor,
    },
    FillPath {
        path: BezPath,
        color: SerializableColor,
    },
    FillText {
        text: String,
        origin: Point,
        font_size: f64,
        color: SerializableColor,
    },
}

/// Display-list surface. Text is measured with [`ApproxTextMetrics`].
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl TextMetrics for RecordingSurface {
    fn text_width(&self, content: &str, font_size: f64) -> f64 {
        ApproxTextMetrics.text_width(content, font_size)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: SerializableColor) {
        // Everything before a clear is painted over.
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: SerializableColor) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            width: stroke.width,
            join: stroke.join,
            cap: stroke.start_cap,
            color,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: SerializableColor) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: SerializableColor) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            origin,
            font_size,
            color,
        });
    }
}
