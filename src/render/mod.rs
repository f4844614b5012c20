mod canvas;
mod frame;
mod null_renderer;
mod primitives;

pub use canvas::{Canvas, CanvasState, FrameCanvas};
pub use frame::{PrimitiveRef, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{ArcPrimitive, Color, LinePrimitive, RectPrimitive};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart data and controller logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
