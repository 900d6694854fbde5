use palette::Srgba;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorParseError {
    #[error("expected 3, 6 or 8 hex digits, got {0:?}")]
    Length(String),
    #[error("invalid hex digit: {0}")]
    Hex(#[from] ParseIntError),
}

/// A stroke/fill color. Wraps `palette::Srgba` and speaks hex on the
/// config/serde side and `#rrggbb[aa]` on the SVG side.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct Color(pub Srgba<f64>);

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self(Srgba::new(r, g, b, a))
    }

    pub fn alpha(&self) -> f64 {
        self.0.alpha
    }

    fn channels(&self) -> (u8, u8, u8, u8) {
        let (r, g, b, a) = self.0.into_components();
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (to_byte(r), to_byte(g), to_byte(b), to_byte(a))
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(ColorParseError::Length(s.to_string()));
        }
        let byte = |range| u8::from_str_radix(&hex[range], 16);
        let nibble = |range| u8::from_str_radix(&hex[range], 16).map(|v| v * 17);

        let (r, g, b, a) = match hex.len() {
            3 => (nibble(0..1)?, nibble(1..2)?, nibble(2..3)?, 255),
            6 => (byte(0..2)?, byte(2..4)?, byte(4..6)?, 255),
            8 => (byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?),
            _ => return Err(ColorParseError::Length(s.to_string())),
        };

        Ok(Self(Srgba::new(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a as f64 / 255.0,
        )))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.channels();
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        // default stroke when a segment specifies none
        Self::new(0.29, 0.47, 0.69, 1.0)
    }
}

/// Per-instance appearance. An explicit struct rather than module-level
/// constants so concurrent diagrams cannot interfere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Replaces the segment color on grayed layers.
    pub neutral_gray: Color,
    pub label_ink: Color,
    pub label_faint: Color,
    pub leader_strong: Color,
    pub leader_faint: Color,
    pub title_ink: Color,
    pub background: Option<Color>,
    pub separator_ink: Color,
    /// Sector boundary lines are computed either way; this decides
    /// whether the renderer draws them.
    pub draw_separators: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            neutral_gray: Color::new(0.72, 0.72, 0.72, 1.0),
            label_ink: Color::new(0.15, 0.15, 0.15, 1.0),
            label_faint: Color::new(0.35, 0.35, 0.35, 1.0),
            leader_strong: Color::new(0.25, 0.25, 0.25, 1.0),
            leader_faint: Color::new(0.6, 0.6, 0.6, 1.0),
            title_ink: Color::new(0.15, 0.15, 0.15, 1.0),
            background: None,
            separator_ink: Color::new(0.85, 0.85, 0.85, 1.0),
            draw_separators: false,
        }
    }
}
