//! Mock plugin bridge for testing.

use crate::bridge::{
    AlertCallback, BrightnessControl, CameraPreview, CaptureCompletion, CaptureOptions,
    DevicePluginBridge, NavigationBar, NotificationPresenter, PreviewCaptureOptions,
    PreviewCompletion, PreviewOptions, PromptCallback, PromptResult, ScreenLocker, StillCamera,
    Toast, ToastPresenter, WifiManager, WifiObserver, WifiState,
};
use std::sync::Mutex;

/// A call made through the mock bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeCall {
    /// `WifiManager::set_enabled`.
    SetWifiEnabled(bool),
    /// `WifiManager::on_state_changed`.
    WifiObserverRegistered,
    /// `BrightnessControl::set_brightness`.
    SetBrightness(f64),
    /// `BrightnessControl::set_keep_screen_on`.
    SetKeepScreenOn(bool),
    /// `ScreenLocker::lock`.
    Lock,
    /// `ScreenLocker::unlock`.
    Unlock,
    /// `ToastPresenter::show`.
    ShowToast(Toast),
    /// `NotificationPresenter::prompt`.
    Prompt {
        /// Prompt text.
        message: String,
        /// Dialog title.
        title: String,
        /// Button labels.
        buttons: Vec<String>,
    },
    /// `NotificationPresenter::alert`.
    Alert {
        /// Alert text.
        message: String,
        /// Dialog title.
        title: String,
        /// Button label.
        button: String,
    },
    /// `StillCamera::cleanup`.
    CameraCleanup,
    /// `StillCamera::capture`.
    CameraCapture(CaptureOptions),
    /// `CameraPreview::start`.
    PreviewStart(PreviewOptions),
    /// `CameraPreview::stop`.
    PreviewStop,
    /// `CameraPreview::capture`.
    PreviewCapture(PreviewCaptureOptions),
    /// `NavigationBar::set_up`.
    NavigationBarSetUp(bool),
}

/// Which capabilities the mock exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Wi-Fi manager present.
    pub wifi: bool,
    /// Brightness plugin present.
    pub brightness: bool,
    /// Screen locker present.
    pub screen_locker: bool,
    /// Toast plugin present.
    pub toast: bool,
    /// Dialogs plugin present.
    pub notification: bool,
    /// Still camera present.
    pub camera: bool,
    /// Camera preview present.
    pub camera_preview: bool,
    /// Navigation bar plugin present.
    pub navigation_bar: bool,
}

impl Capabilities {
    /// Every capability present.
    pub fn all() -> Self {
        Self {
            wifi: true,
            brightness: true,
            screen_locker: true,
            toast: true,
            notification: true,
            camera: true,
            camera_preview: true,
            navigation_bar: true,
        }
    }

    /// No capability present.
    pub fn none() -> Self {
        Self {
            wifi: false,
            brightness: false,
            screen_locker: false,
            toast: false,
            notification: false,
            camera: false,
            camera_preview: false,
            navigation_bar: false,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// A mock plugin bridge for testing.
///
/// Records every call as a [`BridgeCall`] so code that depends on
/// [`DevicePluginBridge`] can be tested without a device.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use kiosk_device::{BridgeCall, DeviceConfig, DeviceController, MockBridge};
///
/// let mock = Arc::new(MockBridge::new());
/// let controller = DeviceController::new(mock.clone(), DeviceConfig::default(), false);
/// controller.set_brightness(0.5);
/// assert_eq!(mock.calls(), vec![BridgeCall::SetBrightness(0.5)]);
/// ```
pub struct MockBridge {
    capabilities: Capabilities,
    calls: Mutex<Vec<BridgeCall>>,
    wifi_observer: Mutex<Option<WifiObserver>>,
    capture_outcome: Mutex<Result<String, String>>,
    preview_frame: Mutex<String>,
    prompt_reply: Mutex<Option<PromptResult>>,
}

impl MockBridge {
    /// Create a mock exposing every capability.
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::all())
    }

    /// Create a mock exposing only the given capabilities.
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            calls: Mutex::new(Vec::new()),
            wifi_observer: Mutex::new(None),
            capture_outcome: Mutex::new(Ok(String::from("iVBORw0KGgo="))),
            preview_frame: Mutex::new(String::from("/9j/4AAQSkZJRg==")),
            prompt_reply: Mutex::new(None),
        }
    }

    /// All calls recorded so far.
    pub fn calls(&self) -> Vec<BridgeCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Toasts shown so far.
    pub fn toasts(&self) -> Vec<Toast> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BridgeCall::ShowToast(toast) => Some(toast),
                _ => None,
            })
            .collect()
    }

    /// Make still captures succeed with `data`.
    pub fn set_capture_success(&self, data: impl Into<String>) {
        *self.capture_outcome.lock().unwrap() = Ok(data.into());
    }

    /// Make still captures fail with the native `message`.
    pub fn set_capture_failure(&self, message: impl Into<String>) {
        *self.capture_outcome.lock().unwrap() = Err(message.into());
    }

    /// Set the frame returned by preview captures.
    pub fn set_preview_frame(&self, data: impl Into<String>) {
        *self.preview_frame.lock().unwrap() = data.into();
    }

    /// Answer the next prompt with `reply`. Prompts stay open otherwise.
    pub fn set_prompt_reply(&self, reply: PromptResult) {
        *self.prompt_reply.lock().unwrap() = Some(reply);
    }

    /// Deliver a Wi-Fi state change to the registered observer.
    ///
    /// Returns `false` if no observer is registered.
    pub fn emit_wifi_state(&self, state: WifiState) -> bool {
        match self.wifi_observer.lock().unwrap().as_ref() {
            Some(observer) => {
                observer(state);
                true
            }
            None => false,
        }
    }

    fn record(&self, call: BridgeCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl WifiManager for MockBridge {
    fn set_enabled(&self, enabled: bool) {
        self.record(BridgeCall::SetWifiEnabled(enabled));
    }

    fn on_state_changed(&self, observer: WifiObserver) {
        self.record(BridgeCall::WifiObserverRegistered);
        *self.wifi_observer.lock().unwrap() = Some(observer);
    }
}

impl BrightnessControl for MockBridge {
    fn set_brightness(&self, value: f64) {
        self.record(BridgeCall::SetBrightness(value));
    }

    fn set_keep_screen_on(&self, keep_on: bool) {
        self.record(BridgeCall::SetKeepScreenOn(keep_on));
    }
}

impl ScreenLocker for MockBridge {
    fn lock(&self) {
        self.record(BridgeCall::Lock);
    }

    fn unlock(&self) {
        self.record(BridgeCall::Unlock);
    }
}

impl ToastPresenter for MockBridge {
    fn show(&self, toast: &Toast) {
        self.record(BridgeCall::ShowToast(toast.clone()));
    }
}

impl NotificationPresenter for MockBridge {
    fn prompt(&self, message: &str, callback: PromptCallback, title: &str, buttons: &[&str]) {
        self.record(BridgeCall::Prompt {
            message: message.to_string(),
            title: title.to_string(),
            buttons: buttons.iter().map(|b| b.to_string()).collect(),
        });
        let reply = self.prompt_reply.lock().unwrap().take();
        if let Some(reply) = reply {
            callback(reply);
        }
    }

    fn alert(&self, message: &str, callback: Option<AlertCallback>, title: &str, button: &str) {
        self.record(BridgeCall::Alert {
            message: message.to_string(),
            title: title.to_string(),
            button: button.to_string(),
        });
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl StillCamera for MockBridge {
    fn cleanup(&self) {
        self.record(BridgeCall::CameraCleanup);
    }

    fn capture(&self, options: &CaptureOptions, completion: CaptureCompletion) {
        self.record(BridgeCall::CameraCapture(options.clone()));
        let outcome = self.capture_outcome.lock().unwrap().clone();
        completion(outcome);
    }
}

impl CameraPreview for MockBridge {
    fn start(&self, options: &PreviewOptions) {
        self.record(BridgeCall::PreviewStart(options.clone()));
    }

    fn stop(&self) {
        self.record(BridgeCall::PreviewStop);
    }

    fn capture(&self, options: &PreviewCaptureOptions, completion: PreviewCompletion) {
        self.record(BridgeCall::PreviewCapture(options.clone()));
        let frame = self.preview_frame.lock().unwrap().clone();
        completion(frame);
    }
}

impl NavigationBar for MockBridge {
    fn set_up(&self, auto_hide: bool) {
        self.record(BridgeCall::NavigationBarSetUp(auto_hide));
    }
}

impl DevicePluginBridge for MockBridge {
    fn wifi(&self) -> Option<&dyn WifiManager> {
        self.capabilities.wifi.then_some(self as &dyn WifiManager)
    }

    fn brightness(&self) -> Option<&dyn BrightnessControl> {
        self.capabilities
            .brightness
            .then_some(self as &dyn BrightnessControl)
    }

    fn screen_locker(&self) -> Option<&dyn ScreenLocker> {
        self.capabilities
            .screen_locker
            .then_some(self as &dyn ScreenLocker)
    }

    fn toast(&self) -> Option<&dyn ToastPresenter> {
        self.capabilities.toast.then_some(self as &dyn ToastPresenter)
    }

    fn notification(&self) -> Option<&dyn NotificationPresenter> {
        self.capabilities
            .notification
            .then_some(self as &dyn NotificationPresenter)
    }

    fn camera(&self) -> Option<&dyn StillCamera> {
        self.capabilities.camera.then_some(self as &dyn StillCamera)
    }

    fn camera_preview(&self) -> Option<&dyn CameraPreview> {
        self.capabilities
            .camera_preview
            .then_some(self as &dyn CameraPreview)
    }

    fn navigation_bar(&self) -> Option<&dyn NavigationBar> {
        self.capabilities
            .navigation_bar
            .then_some(self as &dyn NavigationBar)
    }
}
