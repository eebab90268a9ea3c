//! Device mode definitions.

use crate::config::DeviceConfig;
use log::debug;
use std::fmt;

/// Operating mode of the device.
///
/// A mode drives brightness, Wi-Fi, keep-screen-on and the screen lock together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceMode {
    /// Default mode: awake with the idle brightness.
    #[default]
    Idle,
    /// Screen off, Wi-Fi off, screen locked. Only honoured with save-mode enabled.
    Sleep,
    /// Awake with full interaction brightness.
    Active,
    /// Awake with an intermediate brightness.
    Middle,
}

impl DeviceMode {
    /// All modes, in declaration order.
    pub const ALL: [DeviceMode; 4] = [
        DeviceMode::Idle,
        DeviceMode::Sleep,
        DeviceMode::Active,
        DeviceMode::Middle,
    ];

    /// Parse a mode from its wire name.
    ///
    /// Unrecognized names fall back to [`DeviceMode::Idle`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "SLEEP_MODE" => DeviceMode::Sleep,
            "ACTIVE_MODE" => DeviceMode::Active,
            "MIDDLE_MODE" => DeviceMode::Middle,
            "IDLE_MODE" => DeviceMode::Idle,
            other => {
                debug!("unknown mode '{}', falling back to IDLE_MODE", other);
                DeviceMode::Idle
            }
        }
    }

    /// The wire name of this mode (e.g. `ACTIVE_MODE`).
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceMode::Idle => "IDLE_MODE",
            DeviceMode::Sleep => "SLEEP_MODE",
            DeviceMode::Active => "ACTIVE_MODE",
            DeviceMode::Middle => "MIDDLE_MODE",
        }
    }

    /// Whether this mode puts the device to sleep.
    pub fn is_sleep(&self) -> bool {
        matches!(self, DeviceMode::Sleep)
    }

    /// Target screen brightness for this mode, in `[0, 1]` when configured sanely.
    pub fn brightness(&self, config: &DeviceConfig) -> f64 {
        match self {
            DeviceMode::Sleep => 0.0,
            DeviceMode::Active => config.active_mode.brightness,
            DeviceMode::Middle => config.middle_mode.brightness,
            DeviceMode::Idle => config.idle_mode.brightness,
        }
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DeviceMode {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}
