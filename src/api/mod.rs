mod animation;
mod chart_config;
mod engine;
mod error_bar_style;
mod registry;

pub use animation::interpolate_elements;
pub use chart_config::{
    AnimationOptions, ChartConfig, ChartData, ChartEngineConfig, ChartOptions, DatasetConfig,
    ScaleOptions, ScalesConfig,
};
pub use engine::ChartEngine;
pub use error_bar_style::{
    ErrorBarStyleConfig, ScriptContext, ScriptFn, Scriptable, resolve_error_bar_style,
};
pub use registry::{ChartTypeRegistry, ControllerFactory, ControllerRegistration};
