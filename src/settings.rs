//! Settings registration
//!
//! A controller registers its user-tunable settings through `SettingsUi` and
//! keeps the returned handles. The host may change values at any time; the
//! render path reads them once per refresh tick.
//!
//! Four kinds of settings:
//! - enum: one of a fixed list of options
//! - string: text with a maximum length
//! - number: floating point with range, step and unit
//! - range: integer with range, step and unit
//!
//! Registration is idempotent per (label, category).

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Enum,
    String,
    Number,
    Range,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("setting '{label}' in '{category}' is already registered as {existing:?}")]
    KindMismatch {
        label: String,
        category: String,
        existing: SettingKind,
    },
    #[error("'{value}' is not an option of setting '{label}'")]
    UnknownOption { label: String, value: String },
    #[error("setting '{label}' has an empty range ({min} > {max})")]
    InvalidRange { label: String, min: f64, max: f64 },
}

/// Factory for settings handles
pub trait SettingsUi {
    fn enum_setting(
        &self,
        label: &str,
        category: &str,
        options: &[&str],
        initial: &str,
    ) -> Result<EnumSetting, SettingsError>;

    fn string_setting(
        &self,
        label: &str,
        category: &str,
        max_chars: usize,
        initial: &str,
    ) -> Result<StringSetting, SettingsError>;

    #[allow(clippy::too_many_arguments)]
    fn number_setting(
        &self,
        label: &str,
        category: &str,
        min: f64,
        max: f64,
        step: f64,
        unit: &str,
        initial: f64,
    ) -> Result<DoubleSetting, SettingsError>;

    #[allow(clippy::too_many_arguments)]
    fn range_setting(
        &self,
        label: &str,
        category: &str,
        min: i64,
        max: i64,
        step: i64,
        unit: &str,
        initial: i64,
    ) -> Result<IntegerSetting, SettingsError>;
}

/// One of a fixed list of options
#[derive(Debug, Clone)]
pub struct EnumSetting {
    label: Arc<str>,
    options: Arc<[String]>,
    value: Arc<RwLock<usize>>,
}

impl EnumSetting {
    pub fn get(&self) -> String {
        self.options[*self.value.read()].clone()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn set(&self, value: &str) -> Result<(), SettingsError> {
        let index = self
            .options
            .iter()
            .position(|o| o == value)
            .ok_or_else(|| SettingsError::UnknownOption {
                label: self.label.to_string(),
                value: value.to_string(),
            })?;
        *self.value.write() = index;
        Ok(())
    }

    /// Advance to the next option, wrapping around
    pub fn select_next(&self) {
        let mut value = self.value.write();
        *value = (*value + 1) % self.options.len();
    }
}

/// Text with a maximum length in characters
#[derive(Debug, Clone)]
pub struct StringSetting {
    max_chars: usize,
    value: Arc<RwLock<String>>,
}

impl StringSetting {
    pub fn get(&self) -> String {
        self.value.read().clone()
    }

    /// Longer text is truncated
    pub fn set(&self, value: &str) {
        *self.value.write() = value.chars().take(self.max_chars).collect();
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}

/// Floating point value within a range
#[derive(Debug, Clone)]
pub struct DoubleSetting {
    min: f64,
    max: f64,
    step: f64,
    unit: Arc<str>,
    value: Arc<RwLock<f64>>,
}

impl DoubleSetting {
    pub fn get(&self) -> f64 {
        *self.value.read()
    }

    /// Clamped to the range and snapped to the step
    pub fn set(&self, value: f64) {
        *self.value.write() = self.normalize(value);
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        let snapped = if self.step > 0.0 {
            self.min + ((value - self.min) / self.step).round() * self.step
        } else {
            value
        };
        snapped.clamp(self.min, self.max)
    }
}

/// Integer value within a range
#[derive(Debug, Clone)]
pub struct IntegerSetting {
    min: i64,
    max: i64,
    step: i64,
    unit: Arc<str>,
    value: Arc<RwLock<i64>>,
}

impl IntegerSetting {
    pub fn get(&self) -> i64 {
        *self.value.read()
    }

    /// Clamped to the range and snapped to the step
    pub fn set(&self, value: i64) {
        *self.value.write() = self.normalize(value);
    }

    /// Move by a number of steps
    pub fn change(&self, steps: i64) {
        let mut value = self.value.write();
        *value = self.normalize(value.saturating_add(steps.saturating_mul(self.step.max(1))));
    }

    /// Number of distinct values in the range
    pub fn steps(&self) -> i64 {
        self.max - self.min + 1
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    fn normalize(&self, value: i64) -> i64 {
        let value = value.clamp(self.min, self.max);
        if self.step > 1 {
            let snapped = self.min + ((value - self.min) + self.step / 2) / self.step * self.step;
            // Snapping up may step past max
            if snapped > self.max {
                snapped - self.step
            } else {
                snapped
            }
        } else {
            value
        }
    }
}

#[derive(Debug, Clone)]
enum Registered {
    Enum(EnumSetting),
    String(StringSetting),
    Number(DoubleSetting),
    Range(IntegerSetting),
}

impl Registered {
    fn kind(&self) -> SettingKind {
        match self {
            Registered::Enum(_) => SettingKind::Enum,
            Registered::String(_) => SettingKind::String,
            Registered::Number(_) => SettingKind::Number,
            Registered::Range(_) => SettingKind::Range,
        }
    }
}

/// Preferences kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    settings: Mutex<HashMap<(String, String), Registered>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.settings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the existing setting for (label, category), or register the
    /// one built by `create`
    fn register<T>(
        &self,
        label: &str,
        category: &str,
        kind: SettingKind,
        handle: impl Fn(&Registered) -> Option<T>,
        create: impl FnOnce() -> Result<Registered, SettingsError>,
    ) -> Result<T, SettingsError> {
        let mut settings = self.settings.lock();
        let key = (label.to_string(), category.to_string());

        if let Some(existing) = settings.get(&key) {
            return handle(existing).ok_or_else(|| SettingsError::KindMismatch {
                label: label.to_string(),
                category: category.to_string(),
                existing: existing.kind(),
            });
        }

        let setting = create()?;
        debug_assert_eq!(setting.kind(), kind);
        tracing::debug!("Registered {:?} setting '{}' in '{}'", kind, label, category);
        let registered = handle(&setting);
        settings.insert(key, setting);
        registered.ok_or_else(|| SettingsError::KindMismatch {
            label: label.to_string(),
            category: category.to_string(),
            existing: kind,
        })
    }
}

impl SettingsUi for InMemoryPreferences {
    fn enum_setting(
        &self,
        label: &str,
        category: &str,
        options: &[&str],
        initial: &str,
    ) -> Result<EnumSetting, SettingsError> {
        self.register(
            label,
            category,
            SettingKind::Enum,
            |r| match r {
                Registered::Enum(s) => Some(s.clone()),
                _ => None,
            },
            || {
                let index = options
                    .iter()
                    .position(|o| *o == initial)
                    .ok_or_else(|| SettingsError::UnknownOption {
                        label: label.to_string(),
                        value: initial.to_string(),
                    })?;
                Ok(Registered::Enum(EnumSetting {
                    label: label.into(),
                    options: options.iter().map(|o| o.to_string()).collect(),
                    value: Arc::new(RwLock::new(index)),
                }))
            },
        )
    }

    fn string_setting(
        &self,
        label: &str,
        category: &str,
        max_chars: usize,
        initial: &str,
    ) -> Result<StringSetting, SettingsError> {
        self.register(
            label,
            category,
            SettingKind::String,
            |r| match r {
                Registered::String(s) => Some(s.clone()),
                _ => None,
            },
            || {
                let setting = StringSetting {
                    max_chars,
                    value: Arc::new(RwLock::new(String::new())),
                };
                setting.set(initial);
                Ok(Registered::String(setting))
            },
        )
    }

    fn number_setting(
        &self,
        label: &str,
        category: &str,
        min: f64,
        max: f64,
        step: f64,
        unit: &str,
        initial: f64,
    ) -> Result<DoubleSetting, SettingsError> {
        self.register(
            label,
            category,
            SettingKind::Number,
            |r| match r {
                Registered::Number(s) => Some(s.clone()),
                _ => None,
            },
            || {
                if !(min <= max) {
                    return Err(SettingsError::InvalidRange {
                        label: label.to_string(),
                        min,
                        max,
                    });
                }
                let setting = DoubleSetting {
                    min,
                    max,
                    step,
                    unit: unit.into(),
                    value: Arc::new(RwLock::new(min)),
                };
                setting.set(initial);
                Ok(Registered::Number(setting))
            },
        )
    }

    fn range_setting(
        &self,
        label: &str,
        category: &str,
        min: i64,
        max: i64,
        step: i64,
        unit: &str,
        initial: i64,
    ) -> Result<IntegerSetting, SettingsError> {
        self.register(
            label,
            category,
            SettingKind::Range,
            |r| match r {
                Registered::Range(s) => Some(s.clone()),
                _ => None,
            },
            || {
                if min > max {
                    return Err(SettingsError::InvalidRange {
                        label: label.to_string(),
                        min: min as f64,
                        max: max as f64,
                    });
                }
                let setting = IntegerSetting {
                    min,
                    max,
                    step,
                    unit: unit.into(),
                    value: Arc::new(RwLock::new(min)),
                };
                setting.set(initial);
                Ok(Registered::Range(setting))
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_setting() {
        let prefs = InMemoryPreferences::new();
        let theme = prefs
            .enum_setting("Theme", "Display", &["push", "nord"], "nord")
            .expect("register");
        assert_eq!(theme.get(), "nord");
        assert_eq!(theme.options(), ["push", "nord"]);

        theme.set("push").expect("set");
        assert_eq!(theme.get(), "push");
        assert!(matches!(theme.set("sepia"), Err(SettingsError::UnknownOption { .. })));

        theme.select_next();
        assert_eq!(theme.get(), "nord");
        theme.select_next();
        assert_eq!(theme.get(), "push");
    }

    #[test]
    fn test_enum_initial_must_be_an_option() {
        let prefs = InMemoryPreferences::new();
        let result = prefs.enum_setting("Theme", "Display", &["push"], "nord");
        assert!(matches!(result, Err(SettingsError::UnknownOption { .. })));
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_string_setting_truncates() {
        let prefs = InMemoryPreferences::new();
        let color = prefs
            .string_setting("Background color", "Display", 7, "#1f1f1f00")
            .expect("register");
        assert_eq!(color.get(), "#1f1f1f");
        color.set("#abc");
        assert_eq!(color.get(), "#abc");
        assert_eq!(color.max_chars(), 7);
    }

    #[test]
    fn test_number_setting_clamps_and_snaps() {
        let prefs = InMemoryPreferences::new();
        let brightness = prefs
            .number_setting("Selection brightness", "Display", 0.0, 1.0, 0.25, "", 0.3)
            .expect("register");
        assert_eq!(brightness.get(), 0.25);
        brightness.set(2.0);
        assert_eq!(brightness.get(), 1.0);
        brightness.set(-1.0);
        assert_eq!(brightness.get(), 0.0);
        brightness.set(0.6);
        assert_eq!(brightness.get(), 0.5);
        brightness.set(f64::NAN);
        assert_eq!(brightness.get(), 0.0);
    }

    #[test]
    fn test_range_setting() {
        let prefs = InMemoryPreferences::new();
        let unit = prefs
            .range_setting("Display unit", "Display", 6, 24, 1, "px", 12)
            .expect("register");
        assert_eq!(unit.get(), 12);
        assert_eq!(unit.steps(), 19);
        assert_eq!(unit.unit(), "px");

        unit.change(2);
        assert_eq!(unit.get(), 14);
        unit.change(-100);
        assert_eq!(unit.get(), 6);
        unit.set(100);
        assert_eq!(unit.get(), 24);
    }

    #[test]
    fn test_range_setting_snaps_to_step() {
        let prefs = InMemoryPreferences::new();
        let level = prefs
            .range_setting("Level", "Display", 0, 10, 4, "", 5)
            .expect("register");
        assert_eq!(level.get(), 4);
        level.set(7);
        assert_eq!(level.get(), 8);
        level.set(10);
        assert_eq!(level.get(), 8);
        level.change(-1);
        assert_eq!(level.get(), 4);
    }

    #[test]
    fn test_invalid_range() {
        let prefs = InMemoryPreferences::new();
        assert!(matches!(
            prefs.range_setting("Unit", "Display", 10, 5, 1, "", 7),
            Err(SettingsError::InvalidRange { .. })
        ));
        assert!(matches!(
            prefs.number_setting("Gain", "Display", 1.0, 0.0, 0.1, "dB", 0.5),
            Err(SettingsError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_registration_is_idempotent() {
        let prefs = InMemoryPreferences::new();
        let first = prefs
            .range_setting("Display unit", "Display", 6, 24, 1, "px", 12)
            .expect("register");
        let second = prefs
            .range_setting("Display unit", "Display", 1, 2, 1, "px", 1)
            .expect("register again");

        assert_eq!(prefs.len(), 1);
        second.set(20);
        assert_eq!(first.get(), 20);

        // Same label in another category is a different setting
        prefs
            .range_setting("Display unit", "Other", 6, 24, 1, "px", 12)
            .expect("register other");
        assert_eq!(prefs.len(), 2);
    }

    #[test]
    fn test_kind_mismatch() {
        let prefs = InMemoryPreferences::new();
        prefs
            .string_setting("Background color", "Display", 7, "#000000")
            .expect("register");
        let result = prefs.range_setting("Background color", "Display", 0, 1, 1, "", 0);
        assert_eq!(
            result.map(|_| ()),
            Err(SettingsError::KindMismatch {
                label: "Background color".into(),
                category: "Display".into(),
                existing: SettingKind::String,
            })
        );
    }

    #[test]
    fn test_handles_shared_across_threads() {
        let prefs = InMemoryPreferences::new();
        let unit = prefs
            .range_setting("Display unit", "Display", 6, 24, 1, "px", 12)
            .expect("register");
        let writer = unit.clone();
        std::thread::spawn(move || writer.set(18))
            .join()
            .expect("thread");
        assert_eq!(unit.get(), 18);
    }
}
