//! Device controller implementation.

use crate::bridge::{
    CaptureOptions, DevicePluginBridge, PreviewCaptureOptions, PreviewOptions, PromptResult, Toast,
    ToastPosition, ToastStyle, WifiState,
};
use crate::camera::{Photo, PhotoRequest};
use crate::click::{ClickCounter, ClickOutcome};
use crate::config::{DeviceConfig, SaveModeState};
use crate::error::DeviceError;
use crate::modes::DeviceMode;
use crate::state::ControllerState;

use futures::channel::oneshot;
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

const TOAST_DURATION_MS: u32 = 3000;
const PROMPT_BUTTONS: [&str; 2] = ["Ok", "Exit"];
const ALERT_BUTTON: &str = "OK";

impl Toast {
    /// The standard centred notice toast.
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration_ms: TOAST_DURATION_MS,
            position: ToastPosition::Center,
            style: ToastStyle {
                opacity: 0.75,
                text_color: "#FFFF00",
                text_size: 26.5,
                corner_radius: 16,
            },
        }
    }
}

// =============================================================================
// DeviceController
// =============================================================================

/// The device controller.
///
/// Owns the device mode, the save-mode flag and the click gesture counter,
/// and drives the native plugins through an injected [`DevicePluginBridge`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use kiosk_device::{DeviceConfig, DeviceController, DeviceMode, MockBridge};
///
/// let bridge = Arc::new(MockBridge::new());
/// let mut controller = DeviceController::new(bridge.clone(), DeviceConfig::default(), true);
///
/// controller.set_mode(DeviceMode::Active);
/// controller.set_mode(DeviceMode::Sleep);
/// assert_eq!(controller.mode(), Some(DeviceMode::Sleep));
/// ```
pub struct DeviceController {
    bridge: Arc<dyn DevicePluginBridge>,
    config: DeviceConfig,
    mode: Option<DeviceMode>,
    save_mode_enabled: bool,
    clicks: ClickCounter,
    preview_active: bool,
}

impl DeviceController {
    /// Create a controller.
    ///
    /// No hardware call is made until the first mode transition.
    pub fn new(
        bridge: Arc<dyn DevicePluginBridge>,
        config: DeviceConfig,
        save_mode_enabled: bool,
    ) -> Self {
        debug!(
            "device controller created: program={}, save-mode={}",
            config.program_name, save_mode_enabled
        );
        Self {
            bridge,
            config,
            mode: None,
            save_mode_enabled,
            clicks: ClickCounter::new(),
            preview_active: false,
        }
    }

    /// Create a controller, reading the save-mode flag from a JSON state file.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::Io`] if the state file exists but cannot be read
    /// - [`DeviceError::SaveModeState`] if the state file is not valid JSON
    pub fn with_state_file<P: AsRef<Path>>(
        bridge: Arc<dyn DevicePluginBridge>,
        config: DeviceConfig,
        state_path: P,
    ) -> Result<Self, DeviceError> {
        let save_mode_enabled = SaveModeState::load(state_path)?;
        Ok(Self::new(bridge, config, save_mode_enabled))
    }

    /// The last applied mode, `None` before the first transition.
    pub fn mode(&self) -> Option<DeviceMode> {
        self.mode
    }

    /// Whether `SLEEP_MODE` is honoured.
    pub fn save_mode_enabled(&self) -> bool {
        self.save_mode_enabled
    }

    /// The configuration in use.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Get a snapshot of the current controller state.
    pub fn state(&self) -> ControllerState {
        ControllerState {
            mode: self.mode,
            save_mode_enabled: self.save_mode_enabled,
            click_count: self.clicks.count(Instant::now()),
            preview_active: self.preview_active,
        }
    }

    // -------------------------------------------------------------------------
    // Modes
    // -------------------------------------------------------------------------

    /// Switch the device to `mode`.
    ///
    /// Returns `true` if the transition was applied. Re-applying the current
    /// mode is a no-op, and `SLEEP_MODE` is ignored unless save-mode is enabled.
    pub fn set_mode(&mut self, mode: DeviceMode) -> bool {
        if self.mode == Some(mode) {
            debug!("already in {}, nothing to do", mode);
            return false;
        }

        if mode.is_sleep() {
            if !self.save_mode_enabled {
                debug!("save-mode disabled, ignoring {}", mode);
                return false;
            }
            self.set_device_sleeping(true);
        } else {
            self.set_device_sleeping(false);
            self.set_brightness(mode.brightness(&self.config));
        }

        info!(
            "device mode: {} -> {}",
            self.mode.map_or("unset", |m| m.as_str()),
            mode
        );
        self.mode = Some(mode);
        true
    }

    /// Switch the device to the mode with the given wire name.
    ///
    /// Unrecognized names behave as `IDLE_MODE`.
    pub fn set_mode_by_name(&mut self, name: &str) -> bool {
        self.set_mode(DeviceMode::from_name(name))
    }

    /// Put the device to sleep or wake it up.
    ///
    /// Sleeping turns Wi-Fi and keep-screen-on off, drops brightness to 0 and
    /// locks the screen. Waking reverses the radio, keep-on and lock changes.
    /// Each call re-registers the Wi-Fi observer that toasts state changes.
    pub fn set_device_sleeping(&self, sleeped: bool) {
        match self.bridge.wifi() {
            Some(wifi) => {
                wifi.set_enabled(!sleeped);
                // The bridge owns the observer, so it may only hold a weak handle back.
                let bridge = Arc::downgrade(&self.bridge);
                wifi.on_state_changed(Box::new(move |state: WifiState| {
                    if let Some(bridge) = bridge.upgrade() {
                        present_toast(
                            bridge.as_ref(),
                            format!("Wifi {}!", state.as_str().to_lowercase()),
                        );
                    }
                }));
            }
            None => warn!("wifi plugin unavailable, skipping radio toggle"),
        }

        match self.bridge.brightness() {
            Some(brightness) => brightness.set_keep_screen_on(!sleeped),
            None => warn!("brightness plugin unavailable, skipping keep-screen-on"),
        }

        if sleeped {
            self.set_brightness(0.0);
        }

        match self.bridge.screen_locker() {
            Some(locker) if sleeped => locker.lock(),
            Some(locker) => locker.unlock(),
            None => warn!("screen locker unavailable, skipping lock toggle"),
        }
    }

    /// Set the screen brightness.
    ///
    /// Values outside `[0, 1]` or NaN are silently dropped.
    pub fn set_brightness(&self, value: f64) {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            debug!("ignoring invalid brightness {}", value);
            return;
        }
        match self.bridge.brightness() {
            Some(brightness) => brightness.set_brightness(value),
            None => debug!("brightness plugin unavailable, dropping brightness {}", value),
        }
    }

    /// Auto-hide the system navigation bar.
    pub fn fullscreen_mode(&self) {
        match self.bridge.navigation_bar() {
            Some(bar) => bar.set_up(true),
            None => warn!("navigation bar plugin unavailable"),
        }
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    /// Count a click toward the five-click gesture.
    ///
    /// The first click of a burst wakes the device into `ACTIVE_MODE`; the
    /// fifth invokes `callback` and resets the counter. Every click schedules
    /// its own reset two seconds later.
    pub fn quinary_click<F: FnOnce()>(&mut self, callback: F) -> ClickOutcome {
        self.quinary_click_at(Instant::now(), callback)
    }

    /// [`quinary_click`](Self::quinary_click) with an explicit click time.
    pub fn quinary_click_at<F: FnOnce()>(&mut self, now: Instant, callback: F) -> ClickOutcome {
        let outcome = self.clicks.click(now);
        match outcome {
            ClickOutcome::Started => {
                self.set_mode(DeviceMode::Active);
            }
            ClickOutcome::Completed => {
                info!("quinary click completed");
                callback();
            }
            ClickOutcome::Counted(count) => debug!("click {} of 5", count),
        }
        outcome
    }

    // -------------------------------------------------------------------------
    // Toasts and dialogs
    // -------------------------------------------------------------------------

    /// Show a centred notice toast.
    pub fn show_toast(&self, message: &str) {
        present_toast(self.bridge.as_ref(), message.to_string());
    }

    /// Show a prompt titled with the program name, with `Ok` and `Exit` buttons.
    pub fn show_prompt<F>(&self, message: &str, on_result: F)
    where
        F: FnOnce(PromptResult) + Send + 'static,
    {
        match self.bridge.notification() {
            Some(dialogs) => dialogs.prompt(
                message,
                Box::new(on_result),
                &self.config.program_name,
                &PROMPT_BUTTONS,
            ),
            None => warn!("notification plugin unavailable, dropping prompt"),
        }
    }

    /// Show an alert titled with the program name, with a single `OK` button.
    pub fn show_alert(&self, message: &str) {
        match self.bridge.notification() {
            Some(dialogs) => dialogs.alert(message, None, &self.config.program_name, ALERT_BUTTON),
            None => warn!("notification plugin unavailable, dropping alert"),
        }
    }

    // -------------------------------------------------------------------------
    // Camera
    // -------------------------------------------------------------------------

    /// Take a 200x200 PNG snapshot with the front camera.
    ///
    /// Temporary images from earlier captures are cleaned up first.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::CameraUnavailable`] if there is no camera plugin
    /// - [`DeviceError::Camera`] with the native message if capture fails
    pub fn create_photo(&self) -> PhotoRequest {
        let Some(camera) = self.bridge.camera() else {
            warn!("camera plugin unavailable");
            return PhotoRequest::failed(DeviceError::CameraUnavailable);
        };

        let (tx, rx) = oneshot::channel();
        camera.cleanup();
        camera.capture(
            &CaptureOptions::front_snapshot(),
            Box::new(move |result| {
                let result = result.map(Photo::from_base64).map_err(DeviceError::Camera);
                if tx.send(result).is_err() {
                    debug!("photo request dropped before capture completed");
                }
            }),
        );
        PhotoRequest::pending(rx)
    }

    /// Start the hidden front-camera preview used for real-time photos.
    pub fn switch_on_camera(&mut self) {
        match self.bridge.camera_preview() {
            Some(preview) => {
                preview.start(&PreviewOptions::hidden_front());
                self.preview_active = true;
                debug!("camera preview started");
            }
            None => warn!("camera preview plugin unavailable"),
        }
    }

    /// Stop the camera preview.
    pub fn switch_off_camera(&mut self) {
        if let Some(preview) = self.bridge.camera_preview() {
            preview.stop();
        }
        self.preview_active = false;
        debug!("camera preview stopped");
    }

    /// Capture a 640x640 frame from the running preview.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::PreviewNotStarted`] unless
    ///   [`switch_on_camera`](Self::switch_on_camera) started a preview
    pub fn create_real_time_photo(&self) -> PhotoRequest {
        let preview = match self.bridge.camera_preview() {
            Some(preview) if self.preview_active => preview,
            _ => return PhotoRequest::failed(DeviceError::PreviewNotStarted),
        };

        let (tx, rx) = oneshot::channel();
        preview.capture(
            &PreviewCaptureOptions::full_frame(),
            Box::new(move |data| {
                if tx.send(Ok(Photo::from_base64(data))).is_err() {
                    debug!("photo request dropped before capture completed");
                }
            }),
        );
        PhotoRequest::pending(rx)
    }
}

fn present_toast(bridge: &dyn DevicePluginBridge, message: String) {
    match bridge.toast() {
        Some(toast) => toast.show(&Toast::notice(message)),
        None => warn!("toast plugin unavailable, dropping '{}'", message),
    }
}
