//! RGBA colors for the display
//!
//! Provides:
//! - `Rgba` 8-bit color with alpha
//! - Hex color parsing (#rgb, #rrggbb, #rrggbbaa) and serde support
//! - Brightening toward white (selection highlight)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// 8-bit RGBA color, (de)serialized as a hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Opaque color from components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Move every channel toward white by `factor` (clamped to 0..=1).
    /// Alpha is kept. Any positive factor lifts every channel below 255 by
    /// at least one step, so a non-white color always gets lighter.
    pub fn brighter(self, factor: f32) -> Self {
        let factor = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
        let lift = |c: u8| -> u8 {
            if factor == 0.0 || c == u8::MAX {
                return c;
            }
            let lifted = (f32::from(c) + f32::from(u8::MAX - c) * factor).round() as u8;
            lifted.max(c + 1)
        };
        Self {
            r: lift(self.r),
            g: lift(self.g),
            b: lift(self.b),
            a: self.a,
        }
    }

    /// Rec. 601 luma, used to order colors by lightness
    pub fn luma(self) -> f32 {
        0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b)
    }

    /// Format as `#rrggbb` (or `#rrggbbaa` when not opaque)
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3, 6, or 8 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
}

/// Parse hex color string to Rgba
/// Supports: #rrggbb, #rgb, #rrggbbaa, with or without '#'
pub fn parse_hex_color(s: &str) -> Result<Rgba, ColorError> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return Err(ColorError::InvalidHex);
    }

    let byte = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|_| ColorError::InvalidHex)
    };

    match s.len() {
        // #rgb -> #rrggbb
        3 => Ok(Rgba::rgb(byte(0..1)? * 17, byte(1..2)? * 17, byte(2..3)? * 17)),
        6 => Ok(Rgba::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
        8 => Ok(Rgba::rgba(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
        _ => Err(ColorError::InvalidLength),
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).map_err(serde::de::Error::custom)
    }
}
