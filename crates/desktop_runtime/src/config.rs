//! Desktop configuration: grid metrics, window defaults, and timing constants.

use platform_host::{load_pref_with, PrefsStore, DESKTOP_CONFIG_KEY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::GridMetrics;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Tunables for the desktop shell. Missing JSON fields fall back to [`Default`].
pub struct DesktopConfig {
    /// Horizontal pitch of one icon grid cell.
    pub cell_width: i32,
    /// Vertical pitch of one icon grid cell.
    pub cell_height: i32,
    /// Gap between the desktop edge and the first grid cell.
    pub margin: i32,
    /// Rendered icon box size; snapping keeps it fully inside the desktop.
    pub icon_footprint: i32,
    /// Height reserved for the taskbar band.
    pub taskbar_height: i32,
    /// Offset of the first cascaded window.
    pub cascade_origin: i32,
    /// Extra cascade offset per already-open window.
    pub cascade_step: i32,
    /// Width of a new window.
    pub default_width: i32,
    /// Height of a new window.
    pub default_height: i32,
    /// Smallest width reachable by resizing.
    pub min_width: i32,
    /// Smallest height reachable by resizing.
    pub min_height: i32,
    /// Initial value of the stacking counter.
    pub z_base: u64,
    /// How long a closed window lingers for its exit animation.
    pub close_animation_ms: u32,
    /// Snake timer period.
    pub snake_tick_ms: u32,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            cell_width: 90,
            cell_height: 100,
            margin: 15,
            icon_footprint: 75,
            taskbar_height: 48,
            cascade_origin: 100,
            cascade_step: 20,
            default_width: 450,
            default_height: 350,
            min_width: 220,
            min_height: 140,
            z_base: 100,
            close_animation_ms: 150,
            snake_tick_ms: 100,
        }
    }
}

#[derive(Debug, Error)]
/// Errors produced while reading a [`DesktopConfig`].
pub enum ConfigError {
    /// Input was not valid config JSON.
    #[error("desktop config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// A size or pitch was zero or negative.
    #[error("desktop config field `{field}` must be positive (got {value})")]
    NonPositive {
        /// Offending field name.
        field: &'static str,
        /// Rejected value.
        value: i64,
    },
}

impl DesktopConfig {
    /// Parses and validates a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON or non-positive dimensions.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Parses `raw`, logging and falling back to defaults on any error.
    pub fn from_json_or_default(raw: &str) -> Self {
        Self::from_json(raw).unwrap_or_else(|err| {
            leptos::logging::warn!("{err}; using default desktop config");
            Self::default()
        })
    }

    /// Loads the config override from the prefs store, or the defaults when absent.
    ///
    /// Unreadable, malformed, or non-positive overrides are logged and replaced by defaults.
    pub async fn load(prefs: &dyn PrefsStore) -> Self {
        match load_pref_with::<_, Self>(prefs, DESKTOP_CONFIG_KEY).await {
            Ok(Some(config)) => config.validate().unwrap_or_else(|err| {
                leptos::logging::warn!("{err}; using default desktop config");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(err) => {
                leptos::logging::warn!("desktop config load failed: {err}");
                Self::default()
            }
        }
    }

    /// Icon grid metrics derived from this config.
    pub fn grid_metrics(&self) -> GridMetrics {
        GridMetrics {
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            margin: self.margin,
            taskbar_height: self.taskbar_height,
            icon_footprint: self.icon_footprint,
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        let positive = [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("icon_footprint", self.icon_footprint),
            ("default_width", self.default_width),
            ("default_height", self.default_height),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(ConfigError::NonPositive {
                    field,
                    value: i64::from(value),
                });
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = DesktopConfig::from_json(r#"{"cell_width": 96, "snake_tick_ms": 80}"#)
            .expect("valid config");
        assert_eq!(config.cell_width, 96);
        assert_eq!(config.snake_tick_ms, 80);
        assert_eq!(config.cell_height, 100);
        assert_eq!(config.taskbar_height, 48);
    }

    #[test]
    fn malformed_and_non_positive_configs_are_rejected() {
        assert!(matches!(
            DesktopConfig::from_json("{nope"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            DesktopConfig::from_json(r#"{"cell_height": 0}"#),
            Err(ConfigError::NonPositive {
                field: "cell_height",
                value: 0
            })
        ));
        assert_eq!(
            DesktopConfig::from_json_or_default("[]"),
            DesktopConfig::default()
        );
    }

    #[test]
    fn load_reads_override_from_prefs() {
        let prefs = MemoryPrefsStore::default();
        assert_eq!(block_on(DesktopConfig::load(&prefs)), DesktopConfig::default());

        block_on(prefs.save_pref(DESKTOP_CONFIG_KEY, r#"{"margin": 10}"#)).expect("save");
        assert_eq!(block_on(DesktopConfig::load(&prefs)).margin, 10);
    }

    #[test]
    fn load_falls_back_to_defaults_for_bad_overrides() {
        let prefs = MemoryPrefsStore::default();
        block_on(prefs.save_pref(DESKTOP_CONFIG_KEY, "{broken")).expect("save");
        assert_eq!(block_on(DesktopConfig::load(&prefs)), DesktopConfig::default());

        block_on(prefs.save_pref(DESKTOP_CONFIG_KEY, r#"{"min_width": -5, "margin": 3}"#))
            .expect("save");
        assert_eq!(block_on(DesktopConfig::load(&prefs)), DesktopConfig::default());
    }
}
