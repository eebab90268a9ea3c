//! Static configuration and the persisted save-mode flag.

use crate::error::DeviceError;
use log::debug;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;

/// Key under which the save-mode flag is persisted.
pub const SAVE_MODE_KEY: &str = "saveModeON";

/// Per-mode settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ModeSettings {
    /// Screen brightness in `[0, 1]`.
    pub brightness: f64,
}

/// Application configuration consumed by the controller.
///
/// ```
/// use kiosk_device::DeviceConfig;
///
/// let config = DeviceConfig::from_toml_str(r#"
///     program_name = "Lobby Kiosk"
///
///     [ACTIVE_MODE]
///     brightness = 0.9
///
///     [MIDDLE_MODE]
///     brightness = 0.5
///
///     [IDLE_MODE]
///     brightness = 0.2
/// "#).unwrap();
/// assert_eq!(config.program_name, "Lobby Kiosk");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceConfig {
    /// Display name used as the title of alerts and prompts.
    pub program_name: String,
    /// Settings for `ACTIVE_MODE`.
    #[serde(rename = "ACTIVE_MODE")]
    pub active_mode: ModeSettings,
    /// Settings for `MIDDLE_MODE`.
    #[serde(rename = "MIDDLE_MODE")]
    pub middle_mode: ModeSettings,
    /// Settings for `IDLE_MODE`.
    #[serde(rename = "IDLE_MODE")]
    pub idle_mode: ModeSettings,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            program_name: String::from("Kiosk"),
            active_mode: ModeSettings { brightness: 1.0 },
            middle_mode: ModeSettings { brightness: 0.6 },
            idle_mode: ModeSettings { brightness: 0.3 },
        }
    }
}

impl DeviceConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, DeviceError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DeviceError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

/// Persisted save-mode state, read once at startup.
///
/// The state file is a JSON object. The flag lives under [`SAVE_MODE_KEY`]
/// either as a JSON value or as a JSON-encoded string such as `"true"`.
/// Values are read by truthiness: `null`, `false`, `0` and `""` disable
/// save-mode, anything else enables it.
pub struct SaveModeState;

impl SaveModeState {
    /// Interpret a raw stored value. A missing value means disabled.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::SaveModeState`] if `raw` is not valid JSON
    pub fn parse_value(raw: Option<&str>) -> Result<bool, DeviceError> {
        match raw {
            None => Ok(false),
            Some(raw) => {
                let value: serde_json::Value = serde_json::from_str(raw.trim())?;
                Ok(is_truthy(&value))
            }
        }
    }

    /// Read the flag from a JSON state file. A missing file means disabled.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<bool, DeviceError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no save-mode state at {}, save-mode disabled", path.display());
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_json_str(&content)
    }

    /// Read the flag from the contents of a JSON state file.
    pub fn from_json_str(content: &str) -> Result<bool, DeviceError> {
        let state: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;
        match state.get(SAVE_MODE_KEY) {
            Some(serde_json::Value::String(raw)) => Self::parse_value(Some(raw)),
            Some(value) => Ok(is_truthy(value)),
            None => Ok(false),
        }
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}
