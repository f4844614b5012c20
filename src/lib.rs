//! chart-error-bars: error-bar geometry for bar, line, scatter and
//! polar-area charts.
//!
//! Datasets carry optional `min`/`max` ranges per axis. The engine parses
//! them, grows scales to cover every range, lays out bars, points or arcs
//! through a chart-type controller and emits a deterministic `RenderFrame`
//! holding the element fills plus the error-bar strokes.

pub mod api;
pub mod controllers;
pub mod core;
pub mod elements;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartEngine, ChartEngineConfig, DatasetConfig};
pub use error::{ChartError, ChartResult};
