use std::sync::Arc;

use anyhow::{Context, Result};
use usvg::fontdb;

use crate::bank::ChannelBank;
use crate::config::{Config, ControllerConfiguration};
use crate::gfx::raster::load_fonts;
use crate::gfx::{DrawCall, RasterBackend, RecordingBackend};
use crate::grid::{Configuration, RenderEnv};
use crate::resources::{FileDecoder, IconCache};
use crate::settings::InMemoryPreferences;
use crate::ui::{draw_display, render_display, DisplayLayout, Theme};

/// Application state
pub struct App {
    /// File configuration (display geometry, tracks)
    config: Config,
    /// Host settings store; owns the values behind `controller`
    preferences: InMemoryPreferences,
    /// Live display settings
    controller: ControllerConfiguration,
    /// Decoded icons, shared by every draw
    icons: IconCache<FileDecoder>,
    /// Tracks and selection
    bank: ChannelBank,
    /// Loaded on first raster render
    fonts: Option<Arc<fontdb::Database>>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let preferences = InMemoryPreferences::new();
        let controller = ControllerConfiguration::register(&preferences, &config)
            .context("Failed to register display settings")?;

        let decoder = FileDecoder::new(config.resources.dir());
        tracing::info!("Loading icons from {}", decoder.root().display());
        let icons = IconCache::new(decoder);
        let bank = ChannelBank::new(config.tracks.clone());

        Ok(Self {
            config,
            preferences,
            controller,
            icons,
            bank,
            fonts: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn preferences(&self) -> &InMemoryPreferences {
        &self.preferences
    }

    pub fn controller(&self) -> &ControllerConfiguration {
        &self.controller
    }

    pub fn bank(&self) -> &ChannelBank {
        &self.bank
    }

    pub fn theme(&self) -> Theme {
        self.controller.theme()
    }

    /// Layout for the current theme; the separator follows the theme
    pub fn layout(&self) -> DisplayLayout {
        let display = &self.config.display;
        DisplayLayout::new(
            display.columns,
            display.width,
            display.height,
            self.theme().separator_size,
        )
    }

    /// Render a full frame into a fresh pixmap
    pub fn render(&mut self) -> Result<RasterBackend> {
        let fonts = self.fonts.get_or_insert_with(load_fonts).clone();
        let display = &self.config.display;
        let mut backend = RasterBackend::new(display.width, display.height, fonts)?;

        let theme = self.theme();
        let layout = self.layout();
        let elements = self.bank.snapshot(&layout);
        let env = RenderEnv::new(&theme, &self.controller, &self.icons);
        render_display(&mut backend, &elements, &layout, &env, theme.border);
        Ok(backend)
    }

    /// Backend calls for the whole display, or for one column drawn at x = 0
    pub fn record(&self, column: Option<usize>) -> Result<Vec<DrawCall>> {
        let theme = self.theme();
        let layout = self.layout();
        let elements = self.bank.snapshot(&layout);
        let env = RenderEnv::new(&theme, &self.controller, &self.icons);
        let mut gc = RecordingBackend::new();

        match column {
            None => draw_display(&mut gc, &elements, &layout, &env),
            Some(column) => {
                let element = elements.get(column).with_context(|| {
                    format!("Column {} out of range (0..{})", column, elements.len())
                })?;
                let (_, width) = layout.cell_bounds(0);
                element.draw(&mut gc, 0.0, width, f64::from(layout.height), &env);
            }
        }

        Ok(gc.into_calls())
    }

    pub fn previous(&mut self) {
        let index = self.layout().move_left(self.bank.selected_index());
        self.bank.select(index);
    }

    pub fn next(&mut self) {
        let index = self
            .layout()
            .move_right(self.bank.selected_index(), self.bank.len());
        self.bank.select(index);
    }

    pub fn page_previous(&mut self) {
        let index = self.layout().page_left(self.bank.selected_index());
        self.bank.select(index);
    }

    pub fn page_next(&mut self) {
        let index = self
            .layout()
            .page_right(self.bank.selected_index(), self.bank.len());
        self.bank.select(index);
    }

    pub fn change_unit(&self, steps: i64) {
        self.controller.change_unit(steps);
    }

    pub fn cycle_theme(&self) {
        self.controller.cycle_theme();
        tracing::debug!("Theme changed to {}", self.controller.theme_name());
    }

    /// One-line summary for the preview status bar
    pub fn status(&self) -> String {
        let position = match self.bank.selected_track() {
            Some(track) => format!(
                "{}/{} {} ({})",
                self.bank.selected_index() + 1,
                self.bank.len(),
                track.name,
                track.kind.label()
            ),
            None => "no tracks".to_string(),
        };
        format!(
            " {} | theme: {} | unit: {}{} | ←→: select | +/-: unit | t: theme | q: quit",
            position,
            self.controller.theme_name(),
            self.controller.unit(),
            self.controller.unit_suffix()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Rgba;

    fn app() -> App {
        let mut config = Config::default();
        config.resources.dir = "/nonexistent/push-grid".to_string();
        App::new(config).expect("app")
    }

    #[test]
    fn test_navigation_follows_layout() {
        let mut app = app();
        app.previous();
        assert_eq!(app.bank().selected_index(), 0);

        app.next();
        app.next();
        assert_eq!(app.bank().selected_index(), 2);

        app.page_next();
        assert_eq!(app.bank().selected_index(), 7);
        app.page_previous();
        assert_eq!(app.bank().selected_index(), 0);
    }

    #[test]
    fn test_settings_registered() {
        let app = app();
        assert_eq!(app.preferences().len(), 4);
        assert_eq!(app.controller().theme_name(), "push");
    }

    #[test]
    fn test_record_whole_display() {
        let app = app();
        let calls = app.record(None).expect("record");

        // Eight menu bands, one per column
        let bands = calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Rectangle { y, .. } if *y == 0.0))
            .count();
        assert_eq!(bands, 8);
    }

    #[test]
    fn test_record_single_column() {
        let app = app();
        let calls = app.record(Some(1)).expect("record");

        // No icons on disk: the name is skipped, the color bar is still drawn
        assert!(calls.contains(&DrawCall::SetColor {
            color: Rgba::rgb(255, 148, 0),
        }));
        assert!(calls.contains(&DrawCall::Rectangle {
            x: 0.0,
            y: 148.0,
            width: 119.0,
            height: 12.0,
        }));
        assert!(!calls
            .iter()
            .any(|call| matches!(call, DrawCall::DrawText { text, .. } if text == "Bass")));

        assert!(app.record(Some(8)).is_err());
    }

    #[test]
    fn test_unit_change_affects_next_record() {
        let app = app();
        let before = app.record(Some(0)).expect("record");
        app.change_unit(2);
        let after = app.record(Some(0)).expect("record");
        assert_ne!(before, after);
        assert!(app.status().contains("unit: 14px"));
    }

    #[test]
    fn test_status_names_selected_track() {
        let mut app = app();
        assert!(app.status().starts_with(" 1/8 Drums (Audio) | theme: push | unit: 12px"));

        app.next();
        app.cycle_theme();
        assert!(app.status().starts_with(" 2/8 Bass (Instrument) | theme: darkwall"));
    }
}
