//! Terminal preview of the display pixmap
//!
//! Every terminal cell shows two pixels stacked vertically using the upper
//! half block: foreground is the top pixel, background the bottom one. The
//! pixmap is sampled nearest-neighbour to fit the area.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use tiny_skia::Pixmap;

const UPPER_HALF_BLOCK: &str = "▀";

/// Pixmap widget
pub struct PixmapView<'a> {
    pixmap: &'a Pixmap,
}

impl<'a> PixmapView<'a> {
    pub fn new(pixmap: &'a Pixmap) -> Self {
        Self { pixmap }
    }

    /// Source pixels per terminal column/half-row, keeping the aspect ratio
    fn scale(&self, area: Rect) -> f64 {
        let sx = f64::from(self.pixmap.width()) / f64::from(area.width);
        let sy = f64::from(self.pixmap.height()) / (f64::from(area.height) * 2.0);
        sx.max(sy).max(1.0)
    }

    fn sample(&self, x: f64, y: f64) -> Color {
        match self.pixmap.pixel(x as u32, y as u32) {
            Some(p) => {
                let c = p.demultiply();
                Color::Rgb(c.red(), c.green(), c.blue())
            }
            None => Color::Reset,
        }
    }
}

impl<'a> Widget for PixmapView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let scale = self.scale(area);
        let columns = ((f64::from(self.pixmap.width()) / scale).ceil() as u16).min(area.width);
        let rows = ((f64::from(self.pixmap.height()) / scale / 2.0).ceil() as u16).min(area.height);

        for row in 0..rows {
            for col in 0..columns {
                let x = f64::from(col) * scale;
                let top = f64::from(row) * 2.0 * scale;
                let fg = self.sample(x, top);
                let bg = self.sample(x, top + scale);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF_BLOCK).set_fg(fg).set_bg(bg);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::{Color as SkiaColor, Paint, Rect as SkiaRect, Transform};

    fn two_tone(width: u32, height: u32) -> Pixmap {
        let mut pixmap = Pixmap::new(width, height).expect("pixmap");
        pixmap.fill(SkiaColor::from_rgba8(255, 0, 0, 255));
        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 255, 255);
        let half = height as f32 / 2.0;
        let bottom = SkiaRect::from_xywh(0.0, half, width as f32, half).expect("rect");
        pixmap.fill_rect(bottom, &paint, Transform::identity(), None);
        pixmap
    }

    #[test]
    fn test_render_half_blocks() {
        let pixmap = two_tone(4, 4);
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        PixmapView::new(&pixmap).render(area, &mut buf);

        let top = &buf[(0, 0)];
        assert_eq!(top.symbol(), UPPER_HALF_BLOCK);
        assert_eq!(top.fg, Color::Rgb(255, 0, 0));
        assert_eq!(top.bg, Color::Rgb(255, 0, 0));

        let bottom = &buf[(3, 1)];
        assert_eq!(bottom.fg, Color::Rgb(0, 0, 255));
        assert_eq!(bottom.bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_downscales_to_fit() {
        let pixmap = two_tone(960, 160);
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        PixmapView::new(&pixmap).render(area, &mut buf);

        // 960 / 120 = 8 pixels per column, so 10 rows are used
        assert_eq!(buf[(0, 0)].symbol(), UPPER_HALF_BLOCK);
        assert_eq!(buf[(119, 9)].symbol(), UPPER_HALF_BLOCK);
        assert_eq!(buf[(0, 10)].symbol(), " ");
    }

    #[test]
    fn test_empty_area() {
        let pixmap = two_tone(4, 4);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        PixmapView::new(&pixmap).render(area, &mut buf);
    }
}
