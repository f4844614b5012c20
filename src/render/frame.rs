use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{ArcPrimitive, LinePrimitive, RectPrimitive};

/// Backend-agnostic scene for one chart draw pass.
///
/// Primitives are grouped by type; `draw_order` records the interleaved paint
/// order so error bars stay on top of the element bodies they decorate.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub arcs: Vec<ArcPrimitive>,
    pub draw_order: Vec<PrimitiveRef>,
}

/// Position of one primitive inside its typed vector, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveRef {
    Line(usize),
    Rect(usize),
    Arc(usize),
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            rects: Vec::new(),
            arcs: Vec::new(),
            draw_order: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.draw_order.push(PrimitiveRef::Line(self.lines.len()));
        self.lines.push(line);
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.draw_order.push(PrimitiveRef::Rect(self.rects.len()));
        self.rects.push(rect);
    }

    pub fn push_arc(&mut self, arc: ArcPrimitive) {
        self.draw_order.push(PrimitiveRef::Arc(self.arcs.len()));
        self.arcs.push(arc);
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.push_line(line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.push_rect(rect);
        self
    }

    #[must_use]
    pub fn with_arc(mut self, arc: ArcPrimitive) -> Self {
        self.push_arc(arc);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for arc in &self.arcs {
            arc.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.arcs.is_empty()
    }
}
