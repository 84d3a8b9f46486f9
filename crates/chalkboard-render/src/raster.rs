//! CPU rasterization with tiny-skia, used for PNG export.

use crate::renderer::{RenderResult, RendererError, Surface};
use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use chalkboard_core::shapes::{ApproxTextMetrics, SerializableColor, TextMetrics};
use kurbo::{BezPath, PathEl, Point, Size, Stroke};
use tiny_skia::{FillRule, Mask, Paint, PathBuilder, Pixmap, Transform};

/// Font used for text when no other font is configured.
static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Parse the bundled default font.
pub fn default_font() -> RenderResult<FontArc> {
    FontArc::try_from_slice(DEJAVU_SANS).map_err(|e| RendererError::Font(e.to_string()))
}

/// Text measurement from real glyph advances and kerning.
///
/// Share one of these between a session and its raster surface so hit boxes
/// match painted text.
#[derive(Clone)]
pub struct FontMetrics {
    font: FontArc,
}

impl FontMetrics {
    pub fn new(font: FontArc) -> Self {
        Self { font }
    }
}

impl TextMetrics for FontMetrics {
    fn text_width(&self, content: &str, font_size: f64) -> f64 {
        let scaled = self.font.as_scaled(PxScale::from(font_size as f32));
        let mut width = 0.0f32;
        let mut prev = None;
        for ch in content.chars() {
            let gid = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, gid);
            }
            width += scaled.h_advance(gid);
            prev = Some(gid);
        }
        width as f64
    }
}

/// Result of PNG rendering - contains the raw RGBA pixel data and dimensions.
#[derive(Debug)]
pub struct PngRenderResult {
    /// RGBA pixel data (4 bytes per pixel, not premultiplied).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Pixel surface backed by a tiny-skia pixmap.
///
/// Without a font, text is measured approximately and not painted. Exports
/// attach [`default_font`] unless another font is given.
pub struct RasterSurface {
    pixmap: Pixmap,
    font: Option<FontArc>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RendererError::InitFailed(format!("invalid surface size {}x{}", width, height))
        })?;
        Ok(Self { pixmap, font: None })
    }

    /// Use `font` to paint and measure text.
    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    /// Parse a TrueType/OpenType font.
    pub fn load_font(data: Vec<u8>) -> RenderResult<FontArc> {
        FontArc::try_from_vec(data).map_err(|e| RendererError::Font(e.to_string()))
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Metrics matching this surface's text measurement.
    pub fn metrics(&self) -> Box<dyn TextMetrics> {
        match &self.font {
            Some(font) => Box::new(FontMetrics::new(font.clone())),
            None => Box::new(ApproxTextMetrics),
        }
    }

    /// Straight-alpha RGBA of a single pixel, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Consume the surface, returning straight-alpha RGBA rows.
    pub fn into_rgba(self) -> PngRenderResult {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let mut rgba_data = Vec::with_capacity(rgba_len(width, height));
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            rgba_data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        PngRenderResult {
            rgba_data,
            width,
            height,
        }
    }
}

/// Byte length of a straight RGBA buffer, computed without `u32` overflow.
fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

fn paint_for(color: SerializableColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Convert a kurbo path into a tiny-skia path. Degenerate paths yield `None`.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn to_skia_stroke(stroke: &Stroke) -> tiny_skia::Stroke {
    let line_join = match stroke.join {
        kurbo::Join::Bevel => tiny_skia::LineJoin::Bevel,
        kurbo::Join::Miter => tiny_skia::LineJoin::Miter,
        kurbo::Join::Round => tiny_skia::LineJoin::Round,
    };
    let line_cap = match stroke.start_cap {
        kurbo::Cap::Butt => tiny_skia::LineCap::Butt,
        kurbo::Cap::Square => tiny_skia::LineCap::Square,
        kurbo::Cap::Round => tiny_skia::LineCap::Round,
    };
    tiny_skia::Stroke {
        width: stroke.width as f32,
        miter_limit: stroke.miter_limit as f32,
        line_cap,
        line_join,
        dash: None,
    }
}

impl TextMetrics for RasterSurface {
    fn text_width(&self, content: &str, font_size: f64) -> f64 {
        match &self.font {
            Some(font) => FontMetrics::new(font.clone()).text_width(content, font_size),
            None => ApproxTextMetrics.text_width(content, font_size),
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width() as f64, self.pixmap.height() as f64)
    }

    fn clear(&mut self, color: SerializableColor) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: SerializableColor) {
        let Some(skia_path) = to_skia_path(path) else {
            log::debug!("Skipping degenerate stroke");
            return;
        };
        self.pixmap.stroke_path(
            &skia_path,
            &paint_for(color),
            &to_skia_stroke(stroke),
            Transform::identity(),
            None,
        );
    }

    fn fill_path(&mut self, path: &BezPath, color: SerializableColor) {
        let Some(skia_path) = to_skia_path(path) else {
            log::debug!("Skipping degenerate fill");
            return;
        };
        self.pixmap.fill_path(
            &skia_path,
            &paint_for(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, color: SerializableColor) {
        let Some(font) = &self.font else {
            return;
        };
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let Some(mut mask) = Mask::new(width, height) else {
            return;
        };

        // Rasterize glyph coverage into a mask, then fill through it once.
        let scale = PxScale::from(font_size as f32);
        let scaled = font.as_scaled(scale);
        let mut pen_x = origin.x as f32;
        let mut prev = None;
        let coverage = mask.data_mut();
        for ch in text.chars() {
            let gid = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                pen_x += scaled.kern(prev, gid);
            }
            let glyph = gid.with_scale_and_position(scale, point(pen_x, origin.y as f32));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, v| {
                    let x = bounds.min.x as i64 + gx as i64;
                    let y = bounds.min.y as i64 + gy as i64;
                    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                        return;
                    }
                    let idx = (y as usize) * (width as usize) + x as usize;
                    let value = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
                    coverage[idx] = coverage[idx].max(value);
                });
            }
            pen_x += scaled.h_advance(gid);
            prev = Some(gid);
        }

        if let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32) {
            self.pixmap
                .fill_rect(rect, &paint_for(color), Transform::identity(), Some(&mask));
        }
    }
}
