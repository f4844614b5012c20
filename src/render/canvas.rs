use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{ArcPrimitive, Color, LinePrimitive, RectPrimitive, RenderFrame};

/// Immediate-mode drawing surface used by elements and the error-bar engine.
///
/// The contract follows the usual 2D-canvas model: path coordinates are
/// transformed by the translation active when they are issued, and
/// `save`/`restore` push and pop the full drawing state.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn set_line_width(&mut self, width: f64);
    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self) -> ChartResult<()>;
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;
    fn fill_sector(
        &mut self,
        center_x: f64,
        center_y: f64,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> ChartResult<()>;
}

/// Drawing state captured by `save` and reinstated by `restore`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasState {
    pub translate_x: f64,
    pub translate_y: f64,
    pub line_width: f64,
    pub stroke_color: Color,
    pub fill_color: Color,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            line_width: 1.0,
            stroke_color: Color::rgb(0.0, 0.0, 0.0),
            fill_color: Color::rgb(0.0, 0.0, 0.0),
        }
    }
}

/// `Canvas` implementation that records into a `RenderFrame`.
#[derive(Debug)]
pub struct FrameCanvas {
    frame: RenderFrame,
    state: CanvasState,
    stack: Vec<CanvasState>,
    path: SmallVec<[(f64, f64, f64, f64); 8]>,
    cursor: Option<(f64, f64)>,
}

impl FrameCanvas {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            frame: RenderFrame::new(viewport),
            state: CanvasState::default(),
            stack: Vec::new(),
            path: SmallVec::new(),
            cursor: None,
        }
    }

    /// Number of `save` calls not yet matched by `restore`.
    #[must_use]
    pub fn state_depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn translation(&self) -> (f64, f64) {
        (self.state.translate_x, self.state.translate_y)
    }

    #[must_use]
    pub fn state(&self) -> CanvasState {
        self.state
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn into_frame(self) -> RenderFrame {
        self.frame
    }

    fn to_device(&self, x: f64, y: f64) -> (f64, f64) {
        (x + self.state.translate_x, y + self.state.translate_y)
    }
}

impl Canvas for FrameCanvas {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => warn!("canvas restore without matching save"),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.translate_x += dx;
        self.state.translate_y += dy;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.cursor = None;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        // non-finite coordinates are ignored
        if x.is_finite() && y.is_finite() {
            self.cursor = Some(self.to_device(x, y));
        }
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let end = self.to_device(x, y);
        // without a current point, line_to only establishes one
        if let Some(start) = self.cursor {
            self.path.push((start.0, start.1, end.0, end.1));
        }
        self.cursor = Some(end);
    }

    fn stroke(&mut self) -> ChartResult<()> {
        let width = self.state.line_width;
        if !width.is_finite() || width <= 0.0 {
            trace!(width, segments = self.path.len(), "skip stroke with invisible width");
            return Ok(());
        }
        for &(x1, y1, x2, y2) in &self.path {
            self.frame.push_line(LinePrimitive::new(
                x1,
                y1,
                x2,
                y2,
                width,
                self.state.stroke_color,
            ));
        }
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        let (x, y) = self.to_device(x, y);
        self.frame.push_rect(RectPrimitive::new(
            x,
            y,
            width,
            height,
            self.state.fill_color,
        ));
        Ok(())
    }

    fn fill_sector(
        &mut self,
        center_x: f64,
        center_y: f64,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> ChartResult<()> {
        let (center_x, center_y) = self.to_device(center_x, center_y);
        self.frame.push_arc(ArcPrimitive {
            center_x,
            center_y,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            fill_color: self.state.fill_color,
        });
        Ok(())
    }
}
