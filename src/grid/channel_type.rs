//! Channel types and their icons

use serde::{Deserialize, Serialize};

use crate::resources::ResourceId;

/// Kind of track/channel shown in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Audio,
    Instrument,
    Group,
    Effect,
    Hybrid,
    Master,
    Layer,
}

impl ChannelType {
    pub const COUNT: usize = 7;

    /// All variants in ordinal order
    pub const ALL: [ChannelType; Self::COUNT] = [
        ChannelType::Audio,
        ChannelType::Instrument,
        ChannelType::Group,
        ChannelType::Effect,
        ChannelType::Hybrid,
        ChannelType::Master,
        ChannelType::Layer,
    ];

    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            ChannelType::Audio => "Audio",
            ChannelType::Instrument => "Instrument",
            ChannelType::Group => "Group",
            ChannelType::Effect => "Effect",
            ChannelType::Hybrid => "Hybrid",
            ChannelType::Master => "Master",
            ChannelType::Layer => "Layer",
        }
    }
}

/// Immutable channel type -> icon table, indexed by ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconRegistry {
    icons: [Option<ResourceId>; ChannelType::COUNT],
}

impl IconRegistry {
    /// The icons shipped with the controller resources
    pub const STANDARD: IconRegistry = IconRegistry::from_table(&[
        (ChannelType::Audio, ResourceId::new("track/audio_track.svg")),
        (ChannelType::Instrument, ResourceId::new("track/instrument_track.svg")),
        (ChannelType::Group, ResourceId::new("track/group_track.svg")),
        (ChannelType::Effect, ResourceId::new("track/return_track.svg")),
        (ChannelType::Hybrid, ResourceId::new("track/hybrid_track.svg")),
        (ChannelType::Master, ResourceId::new("track/master_track.svg")),
        (ChannelType::Layer, ResourceId::new("track/multi_layer.svg")),
    ]);

    /// Build a table; types missing from `entries` have no icon. Later
    /// entries for the same type win.
    pub const fn from_table(entries: &[(ChannelType, ResourceId)]) -> Self {
        let mut icons = [None; ChannelType::COUNT];
        let mut i = 0;
        while i < entries.len() {
            let (channel_type, id) = entries[i];
            icons[channel_type.ordinal()] = Some(id);
            i += 1;
        }
        Self { icons }
    }

    pub const fn resolve(&self, channel_type: ChannelType) -> Option<ResourceId> {
        self.icons[channel_type.ordinal()]
    }
}
