//! Chalkboard Render Library
//!
//! Paints a board onto any [`Surface`]. The raster surface uses tiny-skia
//! for CPU rendering; the recording surface keeps a comparable display list.

mod raster;
mod recording;
mod renderer;
mod scene;

pub use raster::{FontMetrics, PngRenderResult, RasterSurface, default_font};
pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{RenderContext, RenderResult, RendererError, Surface};
pub use scene::{render, render_shape};
