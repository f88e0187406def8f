//! Recording backend
//!
//! Captures the primitive call sequence instead of drawing it. Text is
//! measured with a fixed advance per display column so results are
//! reproducible without fonts.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::{Align, GraphicsBackend, Image, TextExtents};
use crate::ui::color::Rgba;

/// Advance of one display column, relative to the font size
const ADVANCE_FACTOR: f64 = 0.6;

/// One primitive backend call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCall {
    SetColor {
        color: Rgba,
    },
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Fill,
    DrawImage {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    SetFontSize {
        size: f64,
    },
    MeasureText {
        text: String,
    },
    DrawText {
        text: String,
        x: f64,
        y: f64,
        align: Align,
        color: Rgba,
        max_width: f64,
        max_height: f64,
    },
}

/// Backend that records every call
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
    font_size: f64,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            font_size: 10.0,
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl GraphicsBackend for RecordingBackend {
    fn set_color(&mut self, color: Rgba) {
        self.calls.push(DrawCall::SetColor { color });
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::Rectangle { x, y, width, height });
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill);
    }

    fn draw_image(&mut self, image: &Image, x: f64, y: f64) {
        self.calls.push(DrawCall::DrawImage {
            x,
            y,
            width: image.width(),
            height: image.height(),
        });
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
        self.calls.push(DrawCall::SetFontSize { size });
    }

    fn measure_text(&mut self, text: &str) -> TextExtents {
        self.calls.push(DrawCall::MeasureText {
            text: text.to_string(),
        });
        TextExtents {
            width: text.width() as f64 * self.font_size * ADVANCE_FACTOR,
            height: self.font_size,
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        align: Align,
        color: Rgba,
        max_width: f64,
        max_height: f64,
    ) {
        self.calls.push(DrawCall::DrawText {
            text: text.to_string(),
            x,
            y,
            align,
            color,
            max_width,
            max_height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_uses_font_size() {
        let mut gc = RecordingBackend::new();
        gc.set_font_size(10.0);
        let extents = gc.measure_text("abcd");
        assert_eq!(extents, TextExtents { width: 24.0, height: 10.0 });
    }

    #[test]
    fn test_calls_serialize_tagged() {
        let mut gc = RecordingBackend::new();
        gc.set_color(Rgba::rgb(1, 2, 3));
        gc.fill();
        let json = serde_json::to_string(gc.calls()).expect("serialize calls");
        assert!(json.contains(r#""op":"set_color""#));
        assert!(json.contains(r#""op":"fill""#));
    }

    #[test]
    fn test_clear() {
        let mut gc = RecordingBackend::new();
        gc.fill();
        gc.clear();
        assert!(gc.calls().is_empty());
    }
}
