//! Board document: the ordered list of shapes.

use crate::error::{BoardError, BoardResult};
use crate::geometry::is_finite_point;
use crate::shapes::{Shape, ShapeId};
use std::collections::HashSet;

/// One row of the layer list, topmost shape first.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    pub id: ShapeId,
    /// Short title such as `rect` or `text: hello`.
    pub label: String,
    pub visible: bool,
    pub selected: bool,
}

/// All shapes on the board in paint order (back to front).
///
/// Insertion order is the z-order: later shapes are painted on top and win
/// hit-tests. Editing never reorders shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    shapes: Vec<Shape>,
}

impl Board {
    /// Create a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of all others.
    ///
    /// Returns false (and leaves the board unchanged) if a shape with the same
    /// id is already present.
    pub fn add_shape(&mut self, shape: Shape) -> bool {
        if self.contains(shape.id()) {
            log::warn!("Rejected shape with duplicate id {}", shape.id());
            return false;
        }
        self.shapes.push(shape);
        true
    }

    /// Remove a shape by ID.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.position(id)?;
        Some(self.shapes.remove(index))
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Index of a shape in paint order.
    pub fn position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.position(id).is_some()
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Flip a shape's visibility, returning the new value.
    pub fn toggle_visibility(&mut self, id: ShapeId) -> Option<bool> {
        let shape = self.get_shape_mut(id)?;
        let visible = !shape.is_visible();
        shape.set_visible(visible);
        Some(visible)
    }

    /// Layer list entries, topmost first.
    pub fn layers(&self, selection: Option<ShapeId>) -> Vec<LayerEntry> {
        self.shapes
            .iter()
            .rev()
            .map(|shape| LayerEntry {
                id: shape.id(),
                label: shape.label(),
                visible: shape.is_visible(),
                selected: selection == Some(shape.id()),
            })
            .collect()
    }

    /// Check if the board is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the board to JSON (an array of flat shape records).
    pub fn to_json(&self) -> BoardResult<String> {
        serde_json::to_string_pretty(&self.shapes)
            .map_err(|e| BoardError::Serialization(e.to_string()))
    }

    /// Deserialize and validate a board from JSON.
    ///
    /// Either the whole payload is accepted or an error is returned; a board
    /// is never partially built.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let shapes: Vec<Shape> =
            serde_json::from_str(json).map_err(|e| BoardError::Deserialization(e.to_string()))?;

        let mut seen = HashSet::with_capacity(shapes.len());
        for (index, shape) in shapes.iter().enumerate() {
            if !seen.insert(shape.id()) {
                return Err(BoardError::Deserialization(format!(
                    "duplicate shape id {} at index {}",
                    shape.id(),
                    index
                )));
            }
            validate_shape(shape).map_err(|reason| {
                BoardError::Deserialization(format!(
                    "invalid {} at index {}: {}",
                    shape.kind_name(),
                    index,
                    reason
                ))
            })?;
        }

        Ok(Self { shapes })
    }
}

fn validate_shape(shape: &Shape) -> Result<(), &'static str> {
    let (points, width): (Vec<kurbo::Point>, f64) = match shape {
        Shape::Stroke(f) | Shape::Erase(f) => {
            if f.points.is_empty() {
                return Err("path has no points");
            }
            (f.points.clone(), f.stroke_width)
        }
        Shape::Text(t) => (vec![t.position], t.font_size),
        Shape::Rectangle(r) => (vec![r.start, r.end], r.style.stroke_width),
        Shape::Circle(c) => (vec![c.start, c.end], c.style.stroke_width),
        Shape::Arrow(a) => (vec![a.start, a.end], a.style.stroke_width),
    };
    if !points.into_iter().all(is_finite_point) {
        return Err("non-finite coordinate");
    }
    if !width.is_finite() || width < 0.0 {
        return Err("size must be a non-negative number");
    }
    Ok(())
}
