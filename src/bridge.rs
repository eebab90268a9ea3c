//! Native plugin bridge capabilities.
//!
//! Each native feature is a separate capability trait. A [`DevicePluginBridge`]
//! hands out the capabilities the host actually provides; `None` means the
//! plugin is not installed.

use std::fmt;

/// Observer invoked on every Wi-Fi state change.
pub type WifiObserver = Box<dyn Fn(WifiState) + Send + Sync>;

/// Completion for a still-camera capture: base64 data or the native failure message.
pub type CaptureCompletion = Box<dyn FnOnce(Result<String, String>) + Send>;

/// Completion for a preview capture: base64 data.
pub type PreviewCompletion = Box<dyn FnOnce(String) + Send>;

/// Completion for a prompt dialog.
pub type PromptCallback = Box<dyn FnOnce(PromptResult) + Send>;

/// Completion for an alert dialog.
pub type AlertCallback = Box<dyn FnOnce() + Send>;

// =============================================================================
// Capability Traits
// =============================================================================

/// Wi-Fi radio control.
pub trait WifiManager: Send + Sync {
    /// Enable or disable the Wi-Fi radio.
    fn set_enabled(&self, enabled: bool);

    /// Register the state-change observer, replacing any previous one.
    fn on_state_changed(&self, observer: WifiObserver);
}

/// Screen brightness control.
pub trait BrightnessControl: Send + Sync {
    /// Set the screen brightness in `[0, 1]`.
    fn set_brightness(&self, value: f64);

    /// Keep the screen on (or let it time out).
    fn set_keep_screen_on(&self, keep_on: bool);
}

/// Screen lock control.
pub trait ScreenLocker: Send + Sync {
    /// Engage the screen lock.
    fn lock(&self);

    /// Release the screen lock.
    fn unlock(&self);
}

/// Toast display.
pub trait ToastPresenter: Send + Sync {
    /// Show a toast.
    fn show(&self, toast: &Toast);
}

/// Native dialogs.
pub trait NotificationPresenter: Send + Sync {
    /// Show a prompt with a text input and the given buttons.
    fn prompt(&self, message: &str, callback: PromptCallback, title: &str, buttons: &[&str]);

    /// Show an alert with a single button.
    fn alert(&self, message: &str, callback: Option<AlertCallback>, title: &str, button: &str);
}

/// Still camera.
pub trait StillCamera: Send + Sync {
    /// Remove temporary images left by previous captures.
    fn cleanup(&self);

    /// Capture a single picture. `completion` is called once.
    fn capture(&self, options: &CaptureOptions, completion: CaptureCompletion);
}

/// Live camera preview.
pub trait CameraPreview: Send + Sync {
    /// Start the preview.
    fn start(&self, options: &PreviewOptions);

    /// Stop the preview.
    fn stop(&self);

    /// Capture a frame from the running preview. `completion` is called once.
    fn capture(&self, options: &PreviewCaptureOptions, completion: PreviewCompletion);
}

/// System navigation bar.
pub trait NavigationBar: Send + Sync {
    /// Configure auto-hiding of the navigation bar.
    fn set_up(&self, auto_hide: bool);
}

/// The set of native capabilities available to the controller.
pub trait DevicePluginBridge: Send + Sync + 'static {
    /// Wi-Fi manager plugin.
    fn wifi(&self) -> Option<&dyn WifiManager>;

    /// Brightness plugin.
    fn brightness(&self) -> Option<&dyn BrightnessControl>;

    /// Screen locker plugin.
    fn screen_locker(&self) -> Option<&dyn ScreenLocker>;

    /// Toast plugin.
    fn toast(&self) -> Option<&dyn ToastPresenter>;

    /// Dialogs plugin.
    fn notification(&self) -> Option<&dyn NotificationPresenter>;

    /// Still camera plugin.
    fn camera(&self) -> Option<&dyn StillCamera>;

    /// Camera preview plugin.
    fn camera_preview(&self) -> Option<&dyn CameraPreview>;

    /// Navigation bar plugin.
    fn navigation_bar(&self) -> Option<&dyn NavigationBar>;
}

// =============================================================================
// Wi-Fi
// =============================================================================

/// Wi-Fi radio state as reported by the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    /// The radio is off.
    Disabled,
    /// The radio is turning off.
    Disabling,
    /// The radio is on.
    Enabled,
    /// The radio is turning on.
    Enabling,
    /// The plugin could not tell.
    Unknown,
}

impl WifiState {
    /// Native name of the state (e.g. `ENABLED`).
    pub fn as_str(&self) -> &'static str {
        match self {
            WifiState::Disabled => "DISABLED",
            WifiState::Disabling => "DISABLING",
            WifiState::Enabled => "ENABLED",
            WifiState::Enabling => "ENABLING",
            WifiState::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for WifiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Toasts and Dialogs
// =============================================================================

/// Where a toast is placed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPosition {
    /// Top of the screen.
    Top,
    /// Centre of the screen.
    Center,
    /// Bottom of the screen.
    Bottom,
}

/// Visual styling of a toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastStyle {
    /// Background opacity in `[0, 1]`.
    pub opacity: f32,
    /// Text colour as `#RRGGBB`.
    pub text_color: &'static str,
    /// Text size in points.
    pub text_size: f32,
    /// Background corner radius.
    pub corner_radius: u32,
}

/// A toast request.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Text to display.
    pub message: String,
    /// How long the toast stays visible, in milliseconds.
    pub duration_ms: u32,
    /// Placement.
    pub position: ToastPosition,
    /// Styling.
    pub style: ToastStyle,
}

/// Result of a prompt dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptResult {
    /// One-based index of the pressed button; 0 when dismissed.
    pub button_index: u32,
    /// Text entered by the user.
    pub input: String,
}

// =============================================================================
// Camera Options
// =============================================================================

/// Which camera to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraDirection {
    /// Rear-facing camera.
    Back,
    /// Front-facing camera.
    Front,
}

/// How the still camera returns the picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationType {
    /// Base64-encoded image data.
    DataUrl,
    /// Path to a file on the device.
    FileUri,
}

/// Image encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    /// JPEG.
    Jpeg,
    /// PNG.
    Png,
}

/// Options for a still-camera capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Image quality (0-100).
    pub quality: u8,
    /// Result delivery.
    pub destination: DestinationType,
    /// Encoding of the result.
    pub encoding: ImageEncoding,
    /// Camera to capture from.
    pub direction: CameraDirection,
    /// Target width in pixels.
    pub target_width: u32,
    /// Target height in pixels.
    pub target_height: u32,
}

/// Options for starting the live preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Left edge of the preview on screen.
    pub x: u32,
    /// Top edge of the preview on screen.
    pub y: u32,
    /// Preview width.
    pub width: u32,
    /// Preview height.
    pub height: u32,
    /// Camera to preview.
    pub direction: CameraDirection,
    /// Render the preview behind the web view.
    pub to_back: bool,
    /// Take a photo when the preview is tapped.
    pub tap_photo: bool,
    /// Focus when the preview is tapped.
    pub tap_focus: bool,
    /// Allow dragging the preview.
    pub preview_drag: bool,
}

/// Options for capturing a frame from the live preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCaptureOptions {
    /// Picture width in pixels.
    pub width: u32,
    /// Picture height in pixels.
    pub height: u32,
    /// Image quality (0-100).
    pub quality: u8,
}
