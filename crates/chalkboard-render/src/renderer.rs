//! Painting surface abstraction and per-frame render context.

use chalkboard_core::board::Board;
use chalkboard_core::session::Session;
use chalkboard_core::shapes::{SerializableColor, ShapeId, TextMetrics};
use kurbo::{BezPath, Point, Size, Stroke};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Font error: {0}")]
    Font(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// An imperative 2D painting target.
///
/// Surfaces also measure text, so that selection outlines and hit boxes
/// agree with the glyphs they paint.
pub trait Surface: TextMetrics {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: SerializableColor);

    /// Stroke the outline of `path`.
    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: SerializableColor);

    /// Fill the interior of `path` (nonzero winding).
    fn fill_path(&mut self, path: &BezPath, color: SerializableColor);

    /// Fill `text` with its baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: SerializableColor);
}

/// Context for a single render frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The board to render.
    pub board: &'a Board,
    /// Shape to outline as selected.
    pub selected: Option<ShapeId>,
    /// Background color.
    pub background_color: SerializableColor,
    /// Selection outline color.
    pub selection_color: SerializableColor,
    /// Selection outline stroke width.
    pub selection_width: f64,
    /// Gap between a shape's bounds and its selection outline.
    pub selection_padding: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            selected: None,
            background_color: SerializableColor::white(),
            selection_color: SerializableColor::rgb(0xff, 0x88, 0x00),
            selection_width: 1.0,
            selection_padding: 4.0,
        }
    }

    /// Context for a session's board and selection.
    pub fn for_session(session: &'a Session) -> Self {
        Self::new(session.board()).with_selection(session.selection())
    }

    pub fn with_selection(mut self, selected: Option<ShapeId>) -> Self {
        self.selected = selected;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: SerializableColor) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_selection_color(mut self, color: SerializableColor) -> Self {
        self.selection_color = color;
        self
    }

    pub fn with_selection_padding(mut self, padding: f64) -> Self {
        self.selection_padding = padding;
        self
    }
}
