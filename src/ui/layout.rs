//! Column layout for the controller display
//!
//! Provides:
//! - Fixed-width columns across the display (one cell each)
//! - Paging of a channel bank into pages of `columns` channels
//! - Navigation helpers (left/right)

use std::ops::Range;

/// Display column layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayLayout {
    /// Number of columns (default: 8)
    pub columns: u16,
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
    /// Gap between columns in pixels
    pub separator: f64,
}

impl Default for DisplayLayout {
    fn default() -> Self {
        Self {
            columns: 8,
            width: 960,
            height: 160,
            separator: 1.0,
        }
    }
}

impl DisplayLayout {
    pub fn new(columns: u16, width: u32, height: u32, separator: f64) -> Self {
        Self {
            columns: columns.clamp(1, 16),
            width,
            height,
            separator: separator.max(0.0),
        }
    }

    /// Width of one column including its separator
    pub fn column_width(&self) -> f64 {
        (f64::from(self.width) / f64::from(self.columns)).floor()
    }

    /// Left edge and drawable width of the cell in `column`
    pub fn cell_bounds(&self, column: u16) -> (f64, f64) {
        let column_width = self.column_width();
        let left = f64::from(column) * column_width;
        (left, (column_width - self.separator).max(0.0))
    }

    pub fn page_size(&self) -> usize {
        self.columns as usize
    }

    /// Range of channels on the page that contains `selected`
    pub fn visible_range(&self, selected: usize, total: usize) -> Range<usize> {
        if total == 0 {
            return 0..0;
        }

        let page_size = self.page_size();
        let start = (selected / page_size) * page_size;
        let end = (start + page_size).min(total);
        start..end
    }

    /// Calculate new selection after moving left
    pub fn move_left(&self, current: usize) -> usize {
        current.saturating_sub(1)
    }

    /// Calculate new selection after moving right
    pub fn move_right(&self, current: usize, total: usize) -> usize {
        if current + 1 < total {
            current + 1
        } else {
            current
        }
    }

    /// Calculate new selection after page left
    pub fn page_left(&self, current: usize) -> usize {
        current.saturating_sub(self.page_size())
    }

    /// Calculate new selection after page right
    pub fn page_right(&self, current: usize, total: usize) -> usize {
        (current + self.page_size()).min(total.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_bounds() {
        let layout = DisplayLayout::new(8, 960, 160, 1.0);
        assert_eq!(layout.column_width(), 120.0);
        assert_eq!(layout.cell_bounds(0), (0.0, 119.0));
        assert_eq!(layout.cell_bounds(7), (840.0, 119.0));
    }

    #[test]
    fn test_columns_clamped() {
        assert_eq!(DisplayLayout::new(0, 960, 160, 1.0).columns, 1);
        assert_eq!(DisplayLayout::new(99, 960, 160, 1.0).columns, 16);
    }

    #[test]
    fn test_visible_range() {
        let layout = DisplayLayout::new(8, 960, 160, 1.0);

        assert_eq!(layout.visible_range(0, 20), 0..8);
        assert_eq!(layout.visible_range(7, 20), 0..8);
        assert_eq!(layout.visible_range(8, 20), 8..16);
        // Last page (partial)
        assert_eq!(layout.visible_range(19, 20), 16..20);
        assert_eq!(layout.visible_range(0, 0), 0..0);
    }

    #[test]
    fn test_navigation() {
        let layout = DisplayLayout::new(8, 960, 160, 1.0);
        let total = 12;

        assert_eq!(layout.move_left(5), 4);
        assert_eq!(layout.move_left(0), 0);
        assert_eq!(layout.move_right(5, total), 6);
        assert_eq!(layout.move_right(11, total), 11);

        assert_eq!(layout.page_left(10), 2);
        assert_eq!(layout.page_left(3), 0);
        assert_eq!(layout.page_right(2, total), 10);
        assert_eq!(layout.page_right(6, total), 11);
    }
}
