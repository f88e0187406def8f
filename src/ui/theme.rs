//! Theme system for the controller display
//!
//! Provides:
//! - Theme struct with the display colors
//! - Built-in presets (push, darkwall, nord, gruvbox)
//! - Selection brightness policy

use super::color::Rgba;
use crate::grid::LayoutTheme;

/// Default amount selected elements move toward white
pub const DEFAULT_SELECTION_BRIGHTNESS: f32 = 0.3;

/// Theme colors for the display
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Menu header band
    pub panel: Rgba,
    /// Labels and names
    pub text: Rgba,
    /// Gaps between cells
    pub border: Rgba,
    /// Separator line thickness in pixels
    pub separator_size: f64,
    /// How far `brighter` moves a color toward white (0..=1)
    pub selection_brightness: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::push()
    }
}

impl Theme {
    /// Names accepted by `from_preset`, in display order
    pub const PRESETS: [&'static str; 4] = ["push", "darkwall", "nord", "gruvbox"];

    /// Push theme - default, dark grey panels with white text
    pub fn push() -> Self {
        Self {
            panel: Rgba::rgb(83, 83, 83),  // #535353
            text: Rgba::rgb(255, 255, 255), // #ffffff
            border: Rgba::rgb(0, 0, 0),     // #000000
            separator_size: 1.0,
            selection_brightness: DEFAULT_SELECTION_BRIGHTNESS,
        }
    }

    /// Darkwall theme
    pub fn darkwall() -> Self {
        Self {
            panel: Rgba::rgb(20, 28, 42),   // #141c2a
            text: Rgba::rgb(229, 234, 241), // #e5eaf1
            border: Rgba::rgb(13, 17, 22),  // #0d1116
            separator_size: 1.0,
            selection_brightness: DEFAULT_SELECTION_BRIGHTNESS,
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            panel: Rgba::rgb(67, 76, 94),   // #434c5e (nord2)
            text: Rgba::rgb(236, 239, 244), // #eceff4 (nord6)
            border: Rgba::rgb(46, 52, 64),  // #2e3440 (nord0)
            separator_size: 1.0,
            selection_brightness: DEFAULT_SELECTION_BRIGHTNESS,
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            panel: Rgba::rgb(60, 56, 54),    // #3c3836 (bg1)
            text: Rgba::rgb(235, 219, 178),  // #ebdbb2 (fg)
            border: Rgba::rgb(40, 40, 40),   // #282828 (bg)
            separator_size: 1.0,
            selection_brightness: DEFAULT_SELECTION_BRIGHTNESS,
        }
    }

    /// Canonical preset name for a name or alias
    pub fn preset_name(name: &str) -> Option<&'static str> {
        match name.to_lowercase().as_str() {
            "push" | "default" => Some("push"),
            "darkwall" => Some("darkwall"),
            "nord" => Some("nord"),
            "gruvbox" | "gruvbox-dark" | "gruvbox_dark" => Some("gruvbox"),
            _ => None,
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match Self::preset_name(name)? {
            "push" => Some(Self::push()),
            "darkwall" => Some(Self::darkwall()),
            "nord" => Some(Self::nord()),
            "gruvbox" => Some(Self::gruvbox()),
            _ => None,
        }
    }

    pub fn with_selection_brightness(mut self, brightness: f32) -> Self {
        self.selection_brightness = brightness;
        self
    }
}

impl LayoutTheme for Theme {
    fn panel_color(&self) -> Rgba {
        self.panel
    }

    fn text_color(&self) -> Rgba {
        self.text
    }

    fn separator_size(&self) -> f64 {
        self.separator_size
    }

    fn brighter(&self, color: Rgba) -> Rgba {
        color.brighter(self.selection_brightness)
    }
}
