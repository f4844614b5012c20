use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS hex string (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`.
    pub fn parse_css(input: &str) -> ChartResult<Self> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }

        let invalid = || ChartError::InvalidData(format!("unsupported color literal `{input}`"));
        let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| -> ChartResult<f64> {
            let raw = u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())?;
            Ok(f64::from(raw) / 255.0)
        };
        let short = |index: usize| -> ChartResult<f64> {
            let raw = u8::from_str_radix(&hex[index..=index], 16).map_err(|_| invalid())?;
            Ok(f64::from(raw * 17) / 255.0)
        };

        match hex.len() {
            3 => Ok(Self::rgb(short(0)?, short(1)?, short(2)?)),
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Formats as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    #[must_use]
    pub fn to_hex_string(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (
            byte(self.red),
            byte(self.green),
            byte(self.blue),
            byte(self.alpha),
        );
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Alpha-aware blend of `from` towards `to`.
    ///
    /// `factor = 0` yields `from`, `factor = 1` yields `to`. Channel weights
    /// are skewed towards the more opaque side, alpha is blended linearly.
    #[must_use]
    pub fn blend(from: Self, to: Self, factor: f64) -> Self {
        let w = 2.0 * factor - 1.0;
        let alpha_delta = to.alpha - from.alpha;
        let skewed = if w * alpha_delta == -1.0 {
            w
        } else {
            (w + alpha_delta) / (1.0 + w * alpha_delta)
        };
        let to_weight = (skewed + 1.0) / 2.0;
        let from_weight = 1.0 - to_weight;

        Self {
            red: to_weight * to.red + from_weight * from.red,
            green: to_weight * to.green + from_weight * from.green,
            blue: to_weight * to.blue + from_weight * from.blue,
            alpha: to.alpha * factor + from.alpha * (1.0 - factor),
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_css(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex_string()
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Filled axis-aligned rectangle in pixel space.
///
/// `width`/`height` may be negative (a bar growing up or left from its base).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Filled annular sector in pixel space. A full circle is a sector spanning
/// `2π` with `inner_radius = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPrimitive {
    pub center_x: f64,
    pub center_y: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill_color: Color,
}

impl ArcPrimitive {
    pub fn validate(self) -> ChartResult<()> {
        if !self.center_x.is_finite()
            || !self.center_y.is_finite()
            || !self.start_angle.is_finite()
            || !self.end_angle.is_finite()
        {
            return Err(ChartError::InvalidData(
                "arc center and angles must be finite".to_owned(),
            ));
        }
        if !self.inner_radius.is_finite()
            || !self.outer_radius.is_finite()
            || self.inner_radius < 0.0
            || self.outer_radius < self.inner_radius
        {
            return Err(ChartError::InvalidData(
                "arc radii must be finite with 0 <= inner <= outer".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}
