//! Graphics backend port
//!
//! The grid engine only ever talks to a `GraphicsBackend`. Two backends ship
//! with the crate:
//! - `recorder` - records every primitive call (tests, JSON dumps)
//! - `raster` - draws into a tiny-skia pixmap (PNG export, terminal preview)

pub mod raster;
pub mod recorder;

use serde::Serialize;
use tiny_skia::Pixmap;

use crate::ui::color::Rgba;

pub use raster::RasterBackend;
pub use recorder::{DrawCall, RecordingBackend};

/// Horizontal text alignment inside a text box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
}

/// Size of a rendered string at the current font size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
}

/// A decoded image, stored as premultiplied RGBA
#[derive(Debug, Clone)]
pub struct Image {
    pixmap: Pixmap,
}

impl Image {
    pub fn new(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> f64 {
        f64::from(self.pixmap.width())
    }

    pub fn height(&self) -> f64 {
        f64::from(self.pixmap.height())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// Primitive drawing surface
///
/// `rectangle` sets the current path, `fill` paints it with the current
/// color and clears it.
pub trait GraphicsBackend {
    fn set_color(&mut self, color: Rgba);

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn fill(&mut self);

    /// Draw an image with its top-left corner at (x, y)
    fn draw_image(&mut self, image: &Image, x: f64, y: f64);

    fn set_font_size(&mut self, size: f64);

    fn measure_text(&mut self, text: &str) -> TextExtents;

    /// Draw `text` inside the box starting at (x, y), aligned horizontally
    /// and clipped to `max_width` x `max_height`
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        align: Align,
        color: Rgba,
        max_width: f64,
        max_height: f64,
    );
}
