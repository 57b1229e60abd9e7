//! Named colors and hue-circle arithmetic.
//!
//! Everything downstream works in HSV: hue in degrees on `[0, 360)`,
//! saturation and value on `[0, 1]`.

use crate::error::SwatchError;
use palette::{encoding, Hsv, IntoColor, Srgb};

/// Parse `#rrggbb` (or `rrggbb`) into its three channels.
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), SwatchError> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SwatchError::InvalidColorFormat(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| SwatchError::InvalidColorFormat(hex.to_string()))
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Convert a hex color to `(hue, saturation, value)`.
pub fn hex_to_hsv(hex: &str) -> Result<(f64, f64, f64), SwatchError> {
    let (r, g, b) = hex_to_rgb(hex)?;
    let rgb = Srgb::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let hsv: Hsv<encoding::Srgb, f64> = rgb.into_color();
    Ok((
        normalize_hue(hsv.hue.into_positive_degrees()),
        hsv.saturation.clamp(0.0, 1.0),
        hsv.value.clamp(0.0, 1.0),
    ))
}

/// Convert HSV back to a lowercase `#rrggbb` string.
pub fn hsv_to_hex(hue: f64, saturation: f64, value: f64) -> String {
    let hsv = Hsv::<encoding::Srgb, f64>::new(
        normalize_hue(hue),
        saturation.clamp(0.0, 1.0),
        value.clamp(0.0, 1.0),
    );
    let rgb: Srgb<f64> = hsv.into_color();
    let rgb: Srgb<u8> = rgb.into_format();
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// Shortest angular distance between two hues, always in `[0, 180]`.
pub fn hue_distance(h1: f64, h2: f64) -> f64 {
    let diff = (h1 - h2).abs() % 360.0;
    diff.min(360.0 - diff)
}

/// Reduce any hue into `[0, 360)`. Non-finite input maps to 0.
pub fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Reds, oranges, yellows and magentas. Both boundaries (60 and 300) count as warm.
pub fn is_warm_hue(hue: f64) -> bool {
    hue >= 300.0 || hue <= 60.0
}

/// Greens, cyans, blues and purples.
pub fn is_cool_hue(hue: f64) -> bool {
    hue > 60.0 && hue < 300.0
}

/// A catalog color with its HSV coordinates derived once from `hex`.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    pub name: String,
    /// Catalog identifier, unique within a corpus
    pub code: String,
    pub hex: String,
    hue: f64,
    saturation: f64,
    value: f64,
}

impl Color {
    /// Build a color from catalog fields. `hex` gains a leading `#` if it has none.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        hex: impl Into<String>,
    ) -> Result<Self, SwatchError> {
        let hex = hex.into();
        let hex = if hex.starts_with('#') {
            hex
        } else {
            format!("#{hex}")
        };
        let (hue, saturation, value) = hex_to_hsv(&hex)?;

        Ok(Self {
            name: name.into(),
            code: code.into(),
            hex,
            hue,
            saturation,
            value,
        })
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// First word of the display name ("Deep Sea Blue" -> "Deep").
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
