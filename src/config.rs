//! Configuration loading.
//!
//! The config file lives at `~/.config/padbridge/config.toml` and only
//! needs to name the deviations from the built-in profile:
//!
//! ```toml
//! device-name = "PadBridge"
//! model = "modern"
//! trigger-as-zaxis = true
//!
//! [buttons]
//! a = "BTN_LEFT"
//! b = "REL_WHEEL:3:100"
//!
//! [axes]
//! right_x = "REL_X:5:10"
//! left_x = "KEY_LEFT:KEY_RIGHT:4000"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::controller::message::GamepadModel;
use crate::mapping::controls::{PadAxis, PadButton};
use crate::mapping::descriptor::{AxisTarget, ButtonTarget};
use crate::mapping::profile::MappingProfile;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Konnte Konfigurationsdatei '{path}' nicht lesen: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Konfigurationsdatei '{path}' ist kein gültiges TOML: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DriverConfig {
    pub device_name: String,
    pub model: GamepadModel,
    pub trigger_as_button: bool,
    pub trigger_as_zaxis: bool,
    pub dpad_as_button: bool,
    pub dpad_only: bool,
    pub force_feedback: bool,
    pub extra_devices: bool,
    pub joystick_deadzone: f32,
    /// Button mapping overrides in the textual descriptor form.
    pub buttons: HashMap<PadButton, String>,
    /// Axis mapping overrides in the textual descriptor form.
    pub axes: HashMap<PadAxis, String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            device_name: "PadBridge Gamepad".to_string(),
            model: GamepadModel::Modern,
            trigger_as_button: false,
            trigger_as_zaxis: false,
            dpad_as_button: false,
            dpad_only: false,
            force_feedback: false,
            extra_devices: true,
            joystick_deadzone: 0.05,
            buttons: HashMap::new(),
            axes: HashMap::new(),
        }
    }
}

impl DriverConfig {
    /// Default location of the config file, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("padbridge").join("config.toml"))
    }

    /// Loads the config from the default location. A missing file is not an
    /// error, it just means the built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = Self::default_path() else {
            warn!("No config directory available, using built-in defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            info!("No config file at {}, using built-in defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        debug!("Loading config from {}", path.display());
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Self =
            toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })?;
        info!("Loaded config for model {:?}", config.model);
        Ok(config)
    }

    /// Builds the runtime profile: the default table plus every override
    /// from the config. A mapping that fails to parse is logged and the
    /// default for that control kept.
    pub fn to_profile(&self) -> MappingProfile {
        let mut profile = MappingProfile {
            trigger_as_button: self.trigger_as_button,
            trigger_as_zaxis: self.trigger_as_zaxis,
            dpad_as_button: self.dpad_as_button,
            dpad_only: self.dpad_only,
            force_feedback: self.force_feedback,
            extra_devices: self.extra_devices,
            ..MappingProfile::default()
        };

        for (&button, spec) in &self.buttons {
            match ButtonTarget::from_text(spec) {
                Ok(target) => profile.button_map[button] = target,
                Err(e) => warn!("Ignoring button mapping for {:?}: {}", button, e),
            }
        }
        for (&axis, spec) in &self.axes {
            match AxisTarget::from_text(spec) {
                Ok(target) => profile.axis_map[axis] = target,
                Err(e) => warn!("Ignoring axis mapping for {:?}: {}", axis, e),
            }
        }

        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::symbols;

    #[test]
    fn minimal_toml_round_trips_through_profile() {
        let config: DriverConfig = toml::from_str(
            r#"
            model = "modern-wireless"
            trigger-as-zaxis = true

            [buttons]
            a = "BTN_LEFT"

            [axes]
            right_x = "REL_X:7:20"
            "#,
        )
        .unwrap();

        assert_eq!(config.model, GamepadModel::ModernWireless);
        let profile = config.to_profile();
        assert!(profile.trigger_as_zaxis);
        assert_eq!(
            profile.button_map[PadButton::A],
            ButtonTarget::key(symbols::BTN_LEFT)
        );
        assert_eq!(
            profile.axis_map[PadAxis::RightX],
            AxisTarget::Rel {
                code: symbols::REL_X,
                step: 7,
                repeat_ms: 20,
            }
        );
    }

    #[test]
    fn malformed_mapping_keeps_the_default() {
        let config: DriverConfig = toml::from_str(
            r#"
            [buttons]
            a = "BTN_NOPE"
            "#,
        )
        .unwrap();
        let profile = config.to_profile();
        assert_eq!(
            profile.button_map[PadButton::A],
            MappingProfile::default().button_map[PadButton::A]
        );
    }

    #[test]
    fn empty_config_equals_defaults() {
        let config: DriverConfig = toml::from_str("").unwrap();
        assert_eq!(config.device_name, DriverConfig::default().device_name);
        assert!(config.extra_devices);
    }
}
