//! Read-only collaborators consumed by the draw path

use crate::resources::ResourceProvider;
use crate::ui::color::Rgba;

/// Theme colors and the selection brightness policy
pub trait LayoutTheme {
    /// Default background of the menu header band
    fn panel_color(&self) -> Rgba;

    fn text_color(&self) -> Rgba;

    fn separator_size(&self) -> f64;

    /// Highlight transform for selected elements. Must be monotonic: the
    /// result is never darker than the input.
    fn brighter(&self, color: Rgba) -> Rgba;
}

/// Host-tunable settings, read once per draw
pub trait Configuration {
    /// Background of the track info row
    fn background_color(&self) -> Rgba;

    /// Base pixel unit of the cell layout
    fn unit(&self) -> f64;
}

/// Everything a draw call reads besides the element and its bounds
#[derive(Clone, Copy)]
pub struct RenderEnv<'a> {
    pub theme: &'a dyn LayoutTheme,
    pub configuration: &'a dyn Configuration,
    pub resources: &'a dyn ResourceProvider,
}

impl<'a> RenderEnv<'a> {
    pub fn new(
        theme: &'a dyn LayoutTheme,
        configuration: &'a dyn Configuration,
        resources: &'a dyn ResourceProvider,
    ) -> Self {
        Self {
            theme,
            configuration,
            resources,
        }
    }
}
