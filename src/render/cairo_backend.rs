use cairo::{Context, Format, ImageSurface};
use std::io::Write;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, Color, LinePrimitive, PrimitiveRef, RectPrimitive, RenderFrame, Renderer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub arcs_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the offscreen surface as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for primitive in &frame.draw_order {
            match *primitive {
                PrimitiveRef::Line(index) => {
                    stroke_line(context, frame.lines[index])?;
                    stats.lines_drawn += 1;
                }
                PrimitiveRef::Rect(index) => {
                    fill_rect(context, frame.rects[index])?;
                    stats.rects_drawn += 1;
                }
                PrimitiveRef::Arc(index) => {
                    fill_arc(context, frame.arcs[index])?;
                    stats.arcs_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn stroke_line(context: &Context, line: LinePrimitive) -> ChartResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))
}

fn fill_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    apply_color(context, rect.fill_color);
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill rectangle", err))
}

fn fill_arc(context: &Context, arc: ArcPrimitive) -> ChartResult<()> {
    apply_color(context, arc.fill_color);
    context.new_sub_path();
    context.arc(
        arc.center_x,
        arc.center_y,
        arc.outer_radius,
        arc.start_angle,
        arc.end_angle,
    );
    if arc.inner_radius > 0.0 {
        context.arc_negative(
            arc.center_x,
            arc.center_y,
            arc.inner_radius,
            arc.end_angle,
            arc.start_angle,
        );
    } else {
        context.line_to(arc.center_x, arc.center_y);
    }
    context.close_path();
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill arc", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
