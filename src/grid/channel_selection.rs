//! Channel selection cell
//!
//! Layout from top to bottom: menu header, track info row (type icon and
//! name on the configured background), color bar of one unit.

use super::channel_type::{ChannelType, IconRegistry};
use super::element::{draw_menu, draw_text_in_bounds, is_degenerate, ElementState};
use super::ports::RenderEnv;
use super::units::Units;
use crate::gfx::{Align, GraphicsBackend};
use crate::resources::ResourceId;
use crate::ui::color::Rgba;

/// A cell with a menu and a channel's icon, name and color
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSelectionGridElement {
    state: ElementState,
    channel_type: ChannelType,
}

impl ChannelSelectionGridElement {
    pub fn new(name: impl Into<String>, channel_type: ChannelType) -> Self {
        Self {
            state: ElementState::new(name),
            channel_type,
        }
    }

    pub fn menu(mut self, menu_name: impl Into<String>, selected: bool) -> Self {
        self.state.menu_name = menu_name.into();
        self.state.is_menu_selected = selected;
        self
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.state.color = color;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.state.is_selected = selected;
        self
    }

    pub fn state(&self) -> &ElementState {
        &self.state
    }

    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    /// Always derived from the channel type
    pub fn icon(&self) -> Option<ResourceId> {
        IconRegistry::STANDARD.resolve(self.channel_type)
    }

    pub fn draw(
        &self,
        gc: &mut dyn GraphicsBackend,
        left: f64,
        width: f64,
        height: f64,
        env: &RenderEnv<'_>,
    ) {
        if is_degenerate(width, height) {
            return;
        }
        let units = Units::new(env.configuration.unit(), env.theme.separator_size());

        draw_menu(gc, left, width, &self.state, env.theme, &units);

        // Element is off if the name is empty
        if self.state.name.is_empty() {
            return;
        }

        let track_row_top = height - units.track_row_height() - units.unit - units.separator_size;
        self.draw_track_info(gc, left, width, height, track_row_top, &units, env);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_track_info(
        &self,
        gc: &mut dyn GraphicsBackend,
        left: f64,
        width: f64,
        height: f64,
        track_row_top: f64,
        units: &Units,
        env: &RenderEnv<'_>,
    ) {
        let unit = units.unit;
        let row_height = units.track_row_height();

        // Background
        let background = env.configuration.background_color();
        gc.set_color(if self.state.is_selected {
            env.theme.brighter(background)
        } else {
            background
        });
        gc.rectangle(left, track_row_top + 1.0, width, height - unit - 1.0);
        gc.fill();

        // Icon and name. Without an icon neither is drawn.
        let icon = self.icon().and_then(|id| env.resources.get_image(id));
        if let Some(icon) = icon {
            let row_top = height - row_height - unit;
            gc.draw_image(
                &icon,
                left + (units.double_unit() - icon.width()) / 2.0,
                row_top + (row_height - icon.height()) / 2.0,
            );

            gc.set_font_size(units.name_font_size());
            draw_text_in_bounds(
                gc,
                &self.state.name,
                left + units.double_unit(),
                row_top,
                width - units.double_unit(),
                row_height,
                Align::Left,
                env.theme.text_color(),
            );
        }

        // Color bar
        gc.set_color(self.state.color);
        gc.rectangle(left, height - unit, width, unit);
        gc.fill();
    }
}
