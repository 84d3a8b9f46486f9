//! Paints a board onto a [`Surface`].

use crate::renderer::{RenderContext, Surface};
use chalkboard_core::shapes::Shape;
use kurbo::{Cap, Join, Rect, Shape as KurboShape, Stroke};

/// Paint every visible shape in z-order, outlining the selected one.
///
/// Rendering only reads the board, so painting an unchanged board and
/// selection twice produces the same output.
pub fn render<S: Surface>(ctx: &RenderContext, surface: &mut S) {
    surface.clear(ctx.background_color);

    for shape in ctx.board.shapes_ordered() {
        if !shape.is_visible() {
            continue;
        }
        render_shape(shape, surface);

        if ctx.selected == Some(shape.id()) {
            if let Some(bounds) = shape.selection_bounds(&*surface) {
                render_selection_outline(ctx, bounds, surface);
            }
        }
    }
}

/// Paint a single shape.
pub fn render_shape<S: Surface>(shape: &Shape, surface: &mut S) {
    match shape {
        Shape::Stroke(path) | Shape::Erase(path) => {
            if path.is_empty() {
                return;
            }
            let stroke = Stroke::new(path.stroke_width)
                .with_join(Join::Round)
                .with_caps(Cap::Round);
            surface.stroke_path(&path.to_path(), &stroke, path.color);
        }
        Shape::Text(text) => {
            surface.fill_text(&text.content, text.position, text.font_size, text.color);
        }
        Shape::Rectangle(rect) => {
            let stroke = Stroke::new(rect.style.stroke_width);
            surface.stroke_path(&rect.to_path(), &stroke, rect.style.stroke_color);
        }
        Shape::Circle(circle) => {
            let stroke = Stroke::new(circle.style.stroke_width);
            surface.stroke_path(&circle.to_path(), &stroke, circle.style.stroke_color);
        }
        Shape::Arrow(arrow) => {
            let stroke = Stroke::new(arrow.style.stroke_width);
            surface.stroke_path(&arrow.shaft_path(), &stroke, arrow.style.stroke_color);
            surface.fill_path(&arrow.head_path(), arrow.style.stroke_color);
        }
    }
}

fn render_selection_outline<S: Surface>(ctx: &RenderContext, bounds: Rect, surface: &mut S) {
    let outline = bounds.inflate(ctx.selection_padding, ctx.selection_padding);
    let stroke = Stroke::new(ctx.selection_width);
    surface.stroke_path(&outline.to_path(0.1), &stroke, ctx.selection_color);
}
