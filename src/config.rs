use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::grid::{ChannelType, Configuration};
use crate::settings::{
    DoubleSetting, EnumSetting, IntegerSetting, SettingsError, SettingsUi, StringSetting,
};
use crate::ui::color::{parse_hex_color, Rgba};
use crate::ui::theme::{Theme, DEFAULT_SELECTION_BRIGHTNESS};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub appearance: AppearanceConfig,
    pub resources: ResourcesConfig,
    pub refresh: RefreshConfig,
    pub tracks: Vec<TrackConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
    /// Number of cells across the display
    pub columns: u16,
    /// Base layout unit in pixels
    pub unit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme preset name
    pub theme: String,
    /// Background of the track info row
    pub background: Rgba,
    /// How far selected elements move toward white (0.0 - 1.0)
    pub selection_brightness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Directory holding `track/*.svg` and other icons
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Display refresh interval in milliseconds
    pub tick_ms: u64,
}

/// One track of the channel bank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    pub name: String,
    pub color: Rgba,
    pub kind: ChannelType,
    /// Menu label above the cell
    #[serde(default)]
    pub menu: Option<String>,
}

impl TrackConfig {
    fn new(name: &str, color: Rgba, kind: ChannelType) -> Self {
        Self {
            name: name.to_string(),
            color,
            kind,
            menu: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            appearance: AppearanceConfig::default(),
            resources: ResourcesConfig::default(),
            refresh: RefreshConfig::default(),
            tracks: default_tracks(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 160,
            columns: 8,
            unit: 12,
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "push".to_string(),
            background: Rgba::rgb(31, 31, 31),
            selection_brightness: f64::from(DEFAULT_SELECTION_BRIGHTNESS),
        }
    }
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("push-grid/resources");
        Self {
            dir: dir.to_string_lossy().into_owned(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

fn default_tracks() -> Vec<TrackConfig> {
    vec![
        TrackConfig::new("Drums", Rgba::rgb(217, 46, 36), ChannelType::Audio),
        TrackConfig::new("Bass", Rgba::rgb(255, 148, 0), ChannelType::Instrument),
        TrackConfig::new("Keys", Rgba::rgb(217, 157, 16), ChannelType::Instrument),
        TrackConfig::new("Vocals", Rgba::rgb(67, 210, 185), ChannelType::Audio),
        TrackConfig::new("Strings", Rgba::rgb(0, 153, 217), ChannelType::Hybrid),
        TrackConfig::new("Band", Rgba::rgb(92, 120, 240), ChannelType::Group),
        TrackConfig::new("Reverb", Rgba::rgb(149, 73, 203), ChannelType::Effect),
        TrackConfig::new("Master", Rgba::rgb(160, 160, 160), ChannelType::Master),
    ]
}

impl ResourcesConfig {
    pub fn dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.dir).as_ref())
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            Self::parse(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        anyhow::ensure!(
            config.display.width > 0 && config.display.height > 0,
            "display size must be positive, got {}x{}",
            config.display.width,
            config.display.height
        );
        Ok(config)
    }
}

/// Live controller configuration, backed by registered settings
#[derive(Debug, Clone)]
pub struct ControllerConfiguration {
    theme: EnumSetting,
    background: StringSetting,
    selection_brightness: DoubleSetting,
    unit: IntegerSetting,
    default_background: Rgba,
}

impl ControllerConfiguration {
    pub const CATEGORY: &'static str = "Display";
    pub const MIN_UNIT: i64 = 6;
    pub const MAX_UNIT: i64 = 24;
    /// Lowest selection brightness; zero would hide the selection
    pub const MIN_SELECTION_BRIGHTNESS: f64 = 0.05;

    /// Register the display settings, seeded from the config file
    pub fn register(ui: &dyn SettingsUi, config: &Config) -> Result<Self, SettingsError> {
        let appearance = &config.appearance;

        let preset = Theme::preset_name(&appearance.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme '{}', using push", appearance.theme);
            "push"
        });

        let theme = ui.enum_setting("Theme", Self::CATEGORY, &Theme::PRESETS, preset)?;
        let background = ui.string_setting(
            "Background color",
            Self::CATEGORY,
            7,
            &appearance.background.to_hex(),
        )?;
        let selection_brightness = ui.number_setting(
            "Selection brightness",
            Self::CATEGORY,
            Self::MIN_SELECTION_BRIGHTNESS,
            1.0,
            0.05,
            "",
            appearance.selection_brightness,
        )?;
        let unit = ui.range_setting(
            "Display unit",
            Self::CATEGORY,
            Self::MIN_UNIT,
            Self::MAX_UNIT,
            1,
            "px",
            config.display.unit,
        )?;

        Ok(Self {
            theme,
            background,
            selection_brightness,
            unit,
            default_background: appearance.background,
        })
    }

    /// Theme for the next draw
    pub fn theme(&self) -> Theme {
        Theme::from_preset(&self.theme.get())
            .unwrap_or_default()
            .with_selection_brightness(self.selection_brightness.get() as f32)
    }

    pub fn theme_name(&self) -> String {
        self.theme.get()
    }

    pub fn cycle_theme(&self) {
        self.theme.select_next();
    }

    /// Suffix shown next to the unit value
    pub fn unit_suffix(&self) -> &str {
        self.unit.unit()
    }

    pub fn change_unit(&self, steps: i64) {
        self.unit.change(steps);
    }

    pub fn set_background(&self, hex: &str) {
        self.background.set(hex);
    }
}

impl Configuration for ControllerConfiguration {
    fn background_color(&self) -> Rgba {
        let value = self.background.get();
        match parse_hex_color(&value) {
            Ok(color) => color,
            Err(e) => {
                tracing::debug!("Invalid background color '{}': {}", value, e);
                self.default_background
            }
        }
    }

    fn unit(&self) -> f64 {
        self.unit.get() as f64
    }
}
