//! Channel bank
//!
//! Stands in for the host's track model: holds the tracks and the current
//! selection, and produces a fresh grid element snapshot for every tick.

use crate::config::TrackConfig;
use crate::grid::{ChannelSelectionGridElement, GridElement, MenuGridElement};
use crate::ui::layout::DisplayLayout;

pub struct ChannelBank {
    tracks: Vec<TrackConfig>,
    selected: usize,
}

impl ChannelBank {
    pub fn new(tracks: Vec<TrackConfig>) -> Self {
        Self { tracks, selected: 0 }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_track(&self) -> Option<&TrackConfig> {
        self.tracks.get(self.selected)
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.tracks.len().saturating_sub(1));
    }

    /// Snapshot of the page holding the selection, one element per column.
    /// Columns past the last track get an empty menu cell.
    pub fn snapshot(&self, layout: &DisplayLayout) -> Vec<GridElement> {
        let page_start = layout.visible_range(self.selected, self.tracks.len()).start;

        (0..layout.page_size())
            .map(|column| -> GridElement {
                let index = page_start + column;
                match self.tracks.get(index) {
                    Some(track) => {
                        let is_selected = index == self.selected;
                        ChannelSelectionGridElement::new(track.name.clone(), track.kind)
                            .menu(track.menu.clone().unwrap_or_default(), is_selected)
                            .color(track.color)
                            .selected(is_selected)
                            .into()
                    }
                    None => MenuGridElement::new("").into(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ChannelType;
    use crate::ui::color::Rgba;

    fn tracks(n: usize) -> Vec<TrackConfig> {
        (0..n)
            .map(|i| TrackConfig {
                name: format!("Track {}", i + 1),
                color: Rgba::rgb(10, 20, 30),
                kind: ChannelType::Audio,
                menu: Some(format!("M{}", i + 1)),
            })
            .collect()
    }

    #[test]
    fn test_snapshot_marks_selection() {
        let mut bank = ChannelBank::new(tracks(3));
        bank.select(1);
        let elements = bank.snapshot(&DisplayLayout::new(4, 480, 160, 1.0));

        assert_eq!(elements.len(), 4);
        assert_eq!(elements[0].state().name(), "Track 1");
        assert!(!elements[0].state().is_selected());
        assert!(elements[1].state().is_selected());
        assert!(elements[1].state().is_menu_selected());
        assert_eq!(elements[1].state().menu_name(), "M2");
        assert!(matches!(elements[3], GridElement::Menu(_)));
        assert_eq!(elements[3].state().name(), "");
    }

    #[test]
    fn test_snapshot_pages() {
        let mut bank = ChannelBank::new(tracks(10));
        bank.select(9);
        let elements = bank.snapshot(&DisplayLayout::new(4, 480, 160, 1.0));

        assert_eq!(elements[0].state().name(), "Track 9");
        assert_eq!(elements[1].state().name(), "Track 10");
        assert!(matches!(elements[2], GridElement::Menu(_)));
    }

    #[test]
    fn test_select_clamps() {
        let mut bank = ChannelBank::new(tracks(3));
        bank.select(10);
        assert_eq!(bank.selected_index(), 2);

        let mut empty = ChannelBank::new(Vec::new());
        empty.select(3);
        assert_eq!(empty.selected_index(), 0);
        assert!(empty.selected_track().is_none());
        assert_eq!(empty.snapshot(&DisplayLayout::default()).len(), 8);
    }
}
