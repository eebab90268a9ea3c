//! Controller state snapshot.

use crate::modes::DeviceMode;

/// A snapshot of the controller's current state.
///
/// Use [`DeviceController::state`](crate::DeviceController::state) to obtain a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerState {
    /// The last applied mode, `None` until the first transition.
    pub mode: Option<DeviceMode>,
    /// Whether `SLEEP_MODE` is allowed to put the device to sleep.
    pub save_mode_enabled: bool,
    /// Clicks counted toward the five-click gesture.
    pub click_count: u32,
    /// Whether the live camera preview is running.
    pub preview_active: bool,
}
