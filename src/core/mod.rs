pub mod data;
pub mod error_bar;
pub mod interpolate;
pub mod range;
pub mod scale;
pub mod style_option;
pub mod types;
pub mod whisker;

pub use data::{
    AxisErrorRange, DataValue, ErrorBarDatum, ParsedPoint, extrema_min_max,
    parse_error_label_data, parse_error_number_data,
};
pub use error_bar::{
    ArcErrorBarProps, CartesianErrorBarProps, ErrorBarStyle, draw_error_bar_arc,
    draw_error_bar_horizontal, draw_error_bar_vertical, render_error_bar, render_error_bar_arc,
};
pub use interpolate::Interpolate;
pub use range::{BarPairs, RangeValue, resolve_pairs};
pub use scale::{
    CartesianScale, CategoryScale, DomainBounds, LinearScale, LogarithmicScale, PixelSpan,
    RadialLinearScale, ScaleKind, resolve_domain,
};
pub use style_option::StyleOption;
pub use types::{Axis, ChartArea, UpdateMode, Viewport};
pub use whisker::whisker_half_size;
