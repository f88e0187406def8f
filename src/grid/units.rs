//! Unit-based cell metrics
//!
//! Every cell dimension is a fixed multiple of one base unit, so changing
//! the unit rescales the whole cell.

/// Base metrics for one draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    /// Base pixel unit (UNIT)
    pub unit: f64,
    /// Separator line thickness, theme-defined
    pub separator_size: f64,
}

impl Units {
    pub fn new(unit: f64, separator_size: f64) -> Self {
        Self { unit, separator_size }
    }

    pub fn double_unit(&self) -> f64 {
        2.0 * self.unit
    }

    /// Height of the icon/name row, truncated to whole pixels
    pub fn track_row_height(&self) -> f64 {
        (1.6 * self.unit).floor()
    }

    /// Height of the menu header band
    pub fn menu_height(&self) -> f64 {
        self.unit + 2.0 * self.separator_size
    }

    pub fn menu_font_size(&self) -> f64 {
        self.unit
    }

    pub fn name_font_size(&self) -> f64 {
        1.2 * self.unit
    }
}
