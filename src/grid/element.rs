//! Grid element model and the shared menu header
//!
//! A grid element is a snapshot of one cell for one refresh tick. Elements
//! are built with consuming builder calls and never change afterwards.

use super::channel_selection::ChannelSelectionGridElement;
use super::ports::{LayoutTheme, RenderEnv};
use super::units::Units;
use crate::gfx::{Align, GraphicsBackend};
use crate::resources::ResourceId;
use crate::ui::color::Rgba;

/// State every grid element carries
#[derive(Debug, Clone, PartialEq)]
pub struct ElementState {
    pub(super) menu_name: String,
    pub(super) is_menu_selected: bool,
    pub(super) name: String,
    pub(super) color: Rgba,
    pub(super) is_selected: bool,
}

impl ElementState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            menu_name: String::new(),
            is_menu_selected: false,
            name: name.into(),
            color: Rgba::BLACK,
            is_selected: false,
        }
    }

    pub fn menu_name(&self) -> &str {
        &self.menu_name
    }

    pub fn is_menu_selected(&self) -> bool {
        self.is_menu_selected
    }

    /// Track name, parameter name, etc. Empty means the cell is off.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }
}

/// Cell that only shows the menu header
#[derive(Debug, Clone, PartialEq)]
pub struct MenuGridElement {
    state: ElementState,
    icon: Option<ResourceId>,
}

impl MenuGridElement {
    pub fn new(menu_name: impl Into<String>) -> Self {
        let mut state = ElementState::new("");
        state.menu_name = menu_name.into();
        Self { state, icon: None }
    }

    pub fn menu_selected(mut self, selected: bool) -> Self {
        self.state.is_menu_selected = selected;
        self
    }

    pub fn icon(mut self, icon: Option<ResourceId>) -> Self {
        self.icon = icon;
        self
    }

    pub fn state(&self) -> &ElementState {
        &self.state
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
    }
}

/// One renderable cell
#[derive(Debug, Clone, PartialEq)]
pub enum GridElement {
    Menu(MenuGridElement),
    ChannelSelection(ChannelSelectionGridElement),
}

impl GridElement {
    pub fn state(&self) -> &ElementState {
        match self {
            GridElement::Menu(element) => element.state(),
            GridElement::ChannelSelection(element) => element.state(),
        }
    }

    /// Icon shown next to the name, if any
    pub fn icon(&self) -> Option<ResourceId> {
        match self {
            GridElement::Menu(element) => element.icon,
            GridElement::ChannelSelection(element) => element.icon(),
        }
    }

    /// Draw the cell into the column starting at `left`. The cell spans the
    /// full display height; nothing is retained between calls.
    pub fn draw(
        &self,
        gc: &mut dyn GraphicsBackend,
        left: f64,
        width: f64,
        height: f64,
        env: &RenderEnv<'_>,
    ) {
        match self {
            GridElement::Menu(element) => element.draw(gc, left, width, height, env),
            GridElement::ChannelSelection(element) => element.draw(gc, left, width, height, env),
        }
    }
}

impl From<MenuGridElement> for GridElement {
    fn from(element: MenuGridElement) -> Self {
        GridElement::Menu(element)
    }
}

impl From<ChannelSelectionGridElement> for GridElement {
    fn from(element: ChannelSelectionGridElement) -> Self {
        GridElement::ChannelSelection(element)
    }
}

/// Zero, negative or NaN bounds draw nothing
pub(super) fn is_degenerate(width: f64, height: f64) -> bool {
    !(width > 0.0 && height > 0.0)
}

/// Draw the menu header band at the top of a cell
pub fn draw_menu(
    gc: &mut dyn GraphicsBackend,
    left: f64,
    width: f64,
    state: &ElementState,
    theme: &dyn LayoutTheme,
    units: &Units,
) {
    let panel = theme.panel_color();
    gc.set_color(if state.is_menu_selected {
        theme.brighter(panel)
    } else {
        panel
    });
    gc.rectangle(left, 0.0, width, units.menu_height());
    gc.fill();

    gc.set_font_size(units.menu_font_size());
    draw_text_in_bounds(
        gc,
        &state.menu_name,
        left,
        0.0,
        width,
        units.menu_height(),
        Align::Center,
        theme.text_color(),
    );
}

/// Draw a label vertically centered in a box and clipped to its bottom edge.
/// Empty text draws nothing.
#[allow(clippy::too_many_arguments)]
pub fn draw_text_in_bounds(
    gc: &mut dyn GraphicsBackend,
    text: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    align: Align,
    color: Rgba,
) {
    if text.is_empty() {
        return;
    }
    let extents = gc.measure_text(text);
    let top = y + (height - extents.height) / 2.0;
    // Clip box runs from the centered top down to the bottom of the bounds
    gc.draw_text(text, x, top, align, color, width, y + height - top);
}
