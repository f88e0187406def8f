//! Pixmap backend
//!
//! Draws into a tiny-skia pixmap the size of the controller display.
//! Rectangles are filled without anti-aliasing so cell edges stay on whole
//! pixels. Text is laid out by usvg (system fonts) and composited through a
//! pixmap the size of the text box, which is what clips it.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tiny_skia::{Color, Paint, Pixmap, PixmapPaint, Rect, Transform};
use usvg::fontdb;

use super::{Align, GraphicsBackend, Image, TextExtents};
use crate::ui::color::Rgba;

/// Baseline position relative to the top of the text box, in font sizes
const ASCENT_FACTOR: f64 = 0.8;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

/// Load the system fonts once; share the database between backends
pub fn load_fonts() -> Arc<fontdb::Database> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!("Loaded {} font faces", db.len());
    Arc::new(db)
}

pub struct RasterBackend {
    pixmap: Pixmap,
    color: Rgba,
    path: Option<Rect>,
    font_size: f64,
    options: usvg::Options<'static>,
}

impl RasterBackend {
    pub fn new(width: u32, height: u32, fonts: Arc<fontdb::Database>) -> Result<Self, RasterError> {
        let pixmap = Pixmap::new(width, height).ok_or(RasterError::InvalidSize { width, height })?;
        let mut options = usvg::Options::default();
        options.fontdb = fonts;
        Ok(Self {
            pixmap,
            color: Rgba::BLACK,
            path: None,
            font_size: 10.0,
            options,
        })
    }

    /// Fill the whole surface with one color and reset the drawing state
    pub fn clear(&mut self, color: Rgba) {
        self.pixmap
            .fill(Color::from_rgba8(color.r, color.g, color.b, color.a));
        self.color = Rgba::BLACK;
        self.path = None;
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn save_png(&self, path: &Path) -> Result<(), RasterError> {
        self.pixmap
            .save_png(path)
            .map_err(|e| RasterError::Encode(e.to_string()))
    }

    /// Parse a single-line text document sized to the given box
    fn text_tree(
        &self,
        text: &str,
        x: f64,
        width: f64,
        height: f64,
        color: Rgba,
    ) -> Option<usvg::Tree> {
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><text x="{x}" y="{baseline}" font-family="sans-serif" font-size="{size}" fill="{fill}" fill-opacity="{opacity}" xml:space="preserve">{text}</text></svg>"#,
            baseline = self.font_size * ASCENT_FACTOR,
            size = self.font_size,
            fill = Rgba { a: 255, ..color }.to_hex(),
            opacity = f64::from(color.a) / 255.0,
            text = escape_xml(text),
        );
        match usvg::Tree::from_str(&svg, &self.options) {
            Ok(tree) => Some(tree),
            Err(e) => {
                tracing::debug!("Failed to lay out text {:?}: {}", text, e);
                None
            }
        }
    }
}

impl GraphicsBackend for RasterBackend {
    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.path = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32);
    }

    fn fill(&mut self) {
        let Some(rect) = self.path.take() else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(self.color.r, self.color.g, self.color.b, self.color.a);
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn draw_image(&mut self, image: &Image, x: f64, y: f64) {
        self.pixmap.draw_pixmap(
            x.round() as i32,
            y.round() as i32,
            image.pixmap().as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn measure_text(&mut self, text: &str) -> TextExtents {
        let height = self.font_size;
        if text.is_empty() {
            return TextExtents { width: 0.0, height };
        }

        // Wide enough that nothing is cut off while measuring
        let probe_width = (text.chars().count() as f64 + 1.0) * self.font_size * 2.0;
        let width = self
            .text_tree(text, 0.0, probe_width, height * 2.0, self.color)
            .filter(|tree| tree.root().has_children())
            .map(|tree| f64::from(tree.root().abs_bounding_box().right()))
            .unwrap_or(0.0);
        TextExtents { width, height }
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
        if text.is_empty() || !(max_width >= 1.0) || !(max_height >= 1.0) {
            return;
        }

        let offset = match align {
            Align::Left => 0.0,
            Align::Center => ((max_width - self.measure_text(text).width) / 2.0).max(0.0),
        };
        let Some(tree) = self.text_tree(text, offset, max_width, max_height, color) else {
            return;
        };
        let Some(mut text_box) = Pixmap::new(max_width.ceil() as u32, max_height.ceil() as u32)
        else {
            return;
        };
        resvg::render(&tree, Transform::identity(), &mut text_box.as_mut());
        self.pixmap.draw_pixmap(
            x.round() as i32,
            y.round() as i32,
            text_box.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(width: u32, height: u32) -> RasterBackend {
        RasterBackend::new(width, height, Arc::new(fontdb::Database::new())).expect("backend")
    }

    fn pixel(gc: &RasterBackend, x: u32, y: u32) -> (u8, u8, u8) {
        let p = gc
            .pixmap()
            .pixel(x, y)
            .map(|p| p.demultiply())
            .expect("pixel in bounds");
        (p.red(), p.green(), p.blue())
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(RasterBackend::new(0, 10, Arc::new(fontdb::Database::new())).is_err());
    }

    #[test]
    fn test_fill_rectangle() {
        let mut gc = backend(20, 20);
        gc.clear(Rgba::BLACK);
        gc.set_color(Rgba::rgb(200, 10, 10));
        gc.rectangle(5.0, 5.0, 10.0, 10.0);
        gc.fill();

        assert_eq!(pixel(&gc, 7, 7), (200, 10, 10));
        assert_eq!(pixel(&gc, 2, 2), (0, 0, 0));
        assert_eq!(pixel(&gc, 15, 15), (0, 0, 0));
    }

    #[test]
    fn test_fill_consumes_path() {
        let mut gc = backend(10, 10);
        gc.clear(Rgba::BLACK);
        gc.set_color(Rgba::WHITE);
        gc.fill();
        assert_eq!(pixel(&gc, 5, 5), (0, 0, 0));
    }

    #[test]
    fn test_draw_image() {
        let mut gc = backend(10, 10);
        gc.clear(Rgba::BLACK);
        let mut icon = Pixmap::new(2, 2).expect("icon pixmap");
        icon.fill(Color::from_rgba8(0, 255, 0, 255));
        gc.draw_image(&Image::new(icon), 4.0, 4.0);

        assert_eq!(pixel(&gc, 4, 4), (0, 255, 0));
        assert_eq!(pixel(&gc, 5, 5), (0, 255, 0));
        assert_eq!(pixel(&gc, 6, 6), (0, 0, 0));
    }

    #[test]
    fn test_empty_text_measures_zero() {
        let mut gc = backend(10, 10);
        gc.set_font_size(12.0);
        assert_eq!(gc.measure_text(""), TextExtents { width: 0.0, height: 12.0 });
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A&B <1>"), "A&amp;B &lt;1&gt;");
    }
}
