//! Display composition and the terminal preview frame

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};
use tiny_skia::Pixmap;

use super::color::Rgba;
use super::layout::DisplayLayout;
use super::preview::PixmapView;
use super::theme::Theme;
use crate::gfx::{GraphicsBackend, RasterBackend};
use crate::grid::{GridElement, RenderEnv};

/// Draw one element per column. Elements past the last column are ignored.
pub fn draw_display(
    gc: &mut dyn GraphicsBackend,
    elements: &[GridElement],
    layout: &DisplayLayout,
    env: &RenderEnv<'_>,
) {
    let height = f64::from(layout.height);
    for (column, element) in (0..layout.columns).zip(elements) {
        let (left, width) = layout.cell_bounds(column);
        element.draw(gc, left, width, height, env);
    }
}

/// Clear the pixmap to the border color and draw a full frame on it
pub fn render_display(
    backend: &mut RasterBackend,
    elements: &[GridElement],
    layout: &DisplayLayout,
    env: &RenderEnv<'_>,
    border: Rgba,
) {
    backend.clear(border);
    draw_display(backend, elements, layout, env);
}

fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Preview screen: the display pixmap with a status line below
pub fn draw_preview(f: &mut Frame, pixmap: &Pixmap, status: &str, theme: &Theme) {
    let area = f.area();
    let background = Style::default().bg(to_color(theme.border));
    f.render_widget(Block::default().style(background), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Display
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    f.render_widget(PixmapView::new(pixmap), chunks[0]);

    let status_bar = Paragraph::new(status.to_string())
        .style(Style::default().fg(to_color(theme.text)).bg(to_color(theme.panel)));
    f.render_widget(status_bar, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{DrawCall, Image, RecordingBackend};
    use crate::grid::{ChannelSelectionGridElement, ChannelType, Configuration, MenuGridElement};
    use crate::resources::{ResourceId, ResourceProvider};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    struct Fixed;

    impl Configuration for Fixed {
        fn background_color(&self) -> Rgba {
            Rgba::rgb(30, 30, 30)
        }

        fn unit(&self) -> f64 {
            10.0
        }
    }

    struct NoIcons;

    impl ResourceProvider for NoIcons {
        fn get_image(&self, _id: ResourceId) -> Option<Arc<Image>> {
            None
        }
    }

    fn menu_rects(calls: &[DrawCall]) -> Vec<f64> {
        calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Rectangle { x, y, .. } if *y == 0.0 => Some(*x),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_draw_display_places_columns() {
        let theme = Theme::push();
        let env = RenderEnv::new(&theme, &Fixed, &NoIcons);
        let layout = DisplayLayout::new(4, 480, 160, 1.0);
        let elements: Vec<GridElement> = vec![
            ChannelSelectionGridElement::new("A", ChannelType::Audio).menu("One", false).into(),
            ChannelSelectionGridElement::new("B", ChannelType::Audio).menu("Two", false).into(),
            MenuGridElement::new("Three").into(),
        ];

        let mut gc = RecordingBackend::new();
        draw_display(&mut gc, &elements, &layout, &env);

        // One menu band per element, each at its column's left edge
        assert_eq!(menu_rects(gc.calls()), vec![0.0, 120.0, 240.0]);
    }

    #[test]
    fn test_draw_display_ignores_extra_elements() {
        let theme = Theme::push();
        let env = RenderEnv::new(&theme, &Fixed, &NoIcons);
        let layout = DisplayLayout::new(2, 240, 160, 1.0);
        let elements: Vec<GridElement> = (0..5)
            .map(|i| MenuGridElement::new(format!("M{i}")).into())
            .collect();

        let mut gc = RecordingBackend::new();
        draw_display(&mut gc, &elements, &layout, &env);
        assert_eq!(menu_rects(gc.calls()), vec![0.0, 120.0]);
    }

    #[test]
    fn test_draw_preview_status_line() {
        let pixmap = Pixmap::new(8, 4).expect("pixmap");
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).expect("terminal");
        terminal
            .draw(|f| draw_preview(f, &pixmap, "1/8 Drums", &Theme::push()))
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let status: String = (0..9).map(|x| buffer[(x, 4)].symbol().to_string()).collect();
        assert_eq!(status, "1/8 Drums");
        assert_eq!(buffer[(0, 0)].symbol(), "▀");
    }
}
