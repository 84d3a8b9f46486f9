//! PNG export of the board surface.

use crate::config::AppConfig;
use ab_glyph::FontArc;
use chalkboard_core::shapes::TextMetrics;
use chalkboard_render::{
    FontMetrics, RasterSurface, RenderContext, RendererError, default_font, render,
};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| ExportError::Encode(format!("header: {}", e)))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| ExportError::Encode(format!("image data: {}", e)))?;
    }
    Ok(png_data)
}

/// Load the font named by `config`, or the bundled default.
pub fn load_font(config: &AppConfig) -> Result<FontArc, ExportError> {
    let Some(font_path) = &config.font_path else {
        return Ok(default_font()?);
    };
    let data = fs::read(font_path).map_err(|source| ExportError::Io {
        path: font_path.display().to_string(),
        source,
    })?;
    log::debug!("Loaded font {}", font_path.display());
    Ok(RasterSurface::load_font(data)?)
}

/// Text metrics agreeing with what [`raster_surface`] paints for `config`.
pub fn text_metrics(config: &AppConfig) -> Result<Box<dyn TextMetrics>, ExportError> {
    Ok(Box::new(FontMetrics::new(load_font(config)?)))
}

/// Create a raster surface sized and fonted per `config`.
pub fn raster_surface(config: &AppConfig) -> Result<RasterSurface, ExportError> {
    let surface = RasterSurface::new(config.width, config.height)?;
    Ok(surface.with_font(load_font(config)?))
}

/// Render the board in `ctx` to PNG bytes.
pub fn render_png(ctx: &RenderContext, config: &AppConfig) -> Result<Vec<u8>, ExportError> {
    let mut surface = raster_surface(config)?;
    render(&ctx.with_background(config.background_color), &mut surface);
    let image = surface.into_rgba();
    encode_png(&image.rgba_data, image.width, image.height)
}

/// Render the board and write it as a PNG file at `path`.
pub fn export_png(
    ctx: &RenderContext,
    config: &AppConfig,
    path: &Path,
) -> Result<usize, ExportError> {
    let png_data = render_png(ctx, config)?;
    fs::write(path, &png_data).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("PNG export complete: {} bytes to {}", png_data.len(), path.display());
    Ok(png_data.len())
}
