//! Device-control facade for kiosk-style hybrid mobile apps.
//!
//! This crate drives a device's native plugins (Wi-Fi, brightness, screen
//! lock, toasts, dialogs, camera) through an injected [`DevicePluginBridge`]
//! and keeps the little state such an app needs: the current device mode,
//! the persisted save-mode flag and a five-click gesture counter.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use kiosk_device::{DeviceConfig, DeviceController, DeviceMode, MockBridge};
//!
//! let bridge = Arc::new(MockBridge::new());
//! let mut controller = DeviceController::new(bridge, DeviceConfig::default(), true);
//!
//! // Wake the device with the idle brightness
//! controller.set_mode(DeviceMode::Idle);
//!
//! // Five quick taps open the admin prompt; the first one wakes the screen
//! for _ in 0..5 {
//!     controller.quinary_click(|| println!("admin gesture"));
//! }
//! assert_eq!(controller.mode(), Some(DeviceMode::Active));
//!
//! // Put the device to sleep (honoured because save-mode is enabled)
//! controller.set_mode(DeviceMode::Sleep);
//! ```
//!
//! # Photos
//!
//! Captures are single-shot futures that resolve exactly once:
//!
//! ```
//! use std::sync::Arc;
//! use kiosk_device::{DeviceConfig, DeviceController, MockBridge};
//!
//! let bridge = Arc::new(MockBridge::new());
//! let controller = DeviceController::new(bridge, DeviceConfig::default(), false);
//!
//! let photo = futures::executor::block_on(controller.create_photo()).unwrap();
//! assert!(!photo.base64().is_empty());
//! ```
//!
//! # Testing
//!
//! Use [`MockBridge`] to test code without a device; it records every
//! plugin call as a [`BridgeCall`].

#![warn(missing_docs)]

mod bridge;
mod camera;
mod click;
mod config;
mod controller;
mod error;
mod mock;
mod modes;
mod state;

// Re-export public API
pub use bridge::{
    AlertCallback, BrightnessControl, CameraDirection, CameraPreview, CaptureCompletion,
    CaptureOptions, DestinationType, DevicePluginBridge, ImageEncoding, NavigationBar,
    NotificationPresenter, PreviewCaptureOptions, PreviewCompletion, PreviewOptions,
    PromptCallback, PromptResult, ScreenLocker, StillCamera, Toast, ToastPosition, ToastPresenter,
    ToastStyle, WifiManager, WifiObserver, WifiState,
};
pub use camera::{Photo, PhotoRequest};
pub use click::{CLICK_RESET_DELAY, ClickCounter, ClickOutcome, QUINARY_CLICKS};
pub use config::{DeviceConfig, ModeSettings, SAVE_MODE_KEY, SaveModeState};
pub use controller::DeviceController;
pub use error::DeviceError;
pub use mock::{BridgeCall, Capabilities, MockBridge};
pub use modes::DeviceMode;
pub use state::ControllerState;

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::{Duration, Instant};

    fn controller(save_mode: bool) -> (Arc<MockBridge>, DeviceController) {
        let mock = Arc::new(MockBridge::new());
        let controller = DeviceController::new(mock.clone(), DeviceConfig::default(), save_mode);
        (mock, controller)
    }

    #[test]
    fn test_set_mode_twice_is_noop() {
        for mode in DeviceMode::ALL {
            let (mock, mut controller) = controller(true);

            controller.set_mode(mode);
            let first = mock.calls();
            assert!(!first.is_empty(), "{} made no calls", mode);

            assert!(!controller.set_mode(mode));
            assert_eq!(mock.calls(), first, "{} repeated side effects", mode);
        }
    }

    #[test]
    fn test_sleep_ignored_without_save_mode() {
        let (mock, mut controller) = controller(false);
        controller.set_mode(DeviceMode::Active);
        mock.clear_calls();

        assert!(!controller.set_mode(DeviceMode::Sleep));
        assert!(mock.calls().is_empty());
        assert_eq!(controller.mode(), Some(DeviceMode::Active));
    }

    #[test]
    fn test_sleep_from_active_with_save_mode() {
        let (mock, mut controller) = controller(true);
        controller.set_mode(DeviceMode::Active);
        mock.clear_calls();

        assert!(controller.set_mode(DeviceMode::Sleep));
        assert_eq!(controller.mode(), Some(DeviceMode::Sleep));
        assert_eq!(
            mock.calls(),
            vec![
                BridgeCall::SetWifiEnabled(false),
                BridgeCall::WifiObserverRegistered,
                BridgeCall::SetKeepScreenOn(false),
                BridgeCall::SetBrightness(0.0),
                BridgeCall::Lock,
            ]
        );
    }

    #[test]
    fn test_awake_modes_use_configured_brightness() {
        let config = DeviceConfig::default();
        for mode in [DeviceMode::Active, DeviceMode::Middle, DeviceMode::Idle] {
            let (mock, mut controller) = controller(true);
            controller.set_mode(mode);
            assert_eq!(
                mock.calls(),
                vec![
                    BridgeCall::SetWifiEnabled(true),
                    BridgeCall::WifiObserverRegistered,
                    BridgeCall::SetKeepScreenOn(true),
                    BridgeCall::Unlock,
                    BridgeCall::SetBrightness(mode.brightness(&config)),
                ]
            );
        }
    }

    #[test]
    fn test_unknown_mode_name_behaves_as_idle() {
        let (mock, mut controller) = controller(true);

        assert!(controller.set_mode_by_name("PARTY_MODE"));
        assert_eq!(controller.mode(), Some(DeviceMode::Idle));
        assert!(mock.calls().contains(&BridgeCall::SetBrightness(0.3)));

        assert!(!controller.set_mode_by_name("IDLE_MODE"));
        assert!(controller.set_mode_by_name("MIDDLE_MODE"));
        assert_eq!(controller.mode(), Some(DeviceMode::Middle));
    }

    #[test]
    fn test_invalid_brightness_makes_no_calls() {
        let (mock, controller) = controller(false);

        for value in [-0.1, 1.01, 42.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            controller.set_brightness(value);
        }
        assert!(mock.calls().is_empty());

        controller.set_brightness(0.0);
        controller.set_brightness(1.0);
        assert_eq!(
            mock.calls(),
            vec![BridgeCall::SetBrightness(0.0), BridgeCall::SetBrightness(1.0)]
        );
    }

    #[test]
    fn test_missing_capabilities_are_skipped() {
        let mock = Arc::new(MockBridge::with_capabilities(Capabilities::none()));
        let mut controller = DeviceController::new(mock.clone(), DeviceConfig::default(), true);

        assert!(controller.set_mode(DeviceMode::Sleep));
        controller.set_brightness(0.5);
        controller.show_toast("hello");
        controller.show_alert("hello");
        controller.fullscreen_mode();
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn test_wifi_observer_toasts_state_changes() {
        let (mock, mut controller) = controller(true);
        assert!(!mock.emit_wifi_state(WifiState::Enabled));

        controller.set_mode(DeviceMode::Active);
        controller.set_mode(DeviceMode::Sleep);
        mock.clear_calls();

        assert!(mock.emit_wifi_state(WifiState::Disabled));
        assert_eq!(mock.toasts(), vec![Toast::notice("Wifi disabled!")]);
    }

    #[test]
    fn test_quinary_click_fires_once_and_resets() {
        let (_mock, mut controller) = controller(false);
        let fired = AtomicU32::new(0);
        let start = Instant::now();

        for i in 0..5 {
            controller.quinary_click_at(start + Duration::from_millis(300 * i), || {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        let outcome = controller.quinary_click_at(start + Duration::from_millis(1600), || {
            fired.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(outcome, ClickOutcome::Started);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_quinary_click_slow_clicks_never_fire() {
        let (_mock, mut controller) = controller(false);
        let fired = AtomicU32::new(0);
        let start = Instant::now();

        for i in 0..10 {
            let outcome = controller.quinary_click_at(start + Duration::from_millis(2500 * i), || {
                fired.fetch_add(1, Ordering::SeqCst);
            });
            assert_eq!(outcome, ClickOutcome::Started);
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_first_click_wakes_device() {
        let (mock, mut controller) = controller(true);
        controller.set_mode(DeviceMode::Sleep);
        mock.clear_calls();

        let outcome = controller.quinary_click(|| {});
        assert_eq!(outcome, ClickOutcome::Started);
        assert_eq!(controller.mode(), Some(DeviceMode::Active));
        assert!(mock.calls().contains(&BridgeCall::Unlock));

        // Later clicks in the burst do not touch the mode.
        mock.clear_calls();
        controller.quinary_click(|| {});
        assert!(mock.calls().is_empty());
        assert_eq!(controller.state().click_count, 2);
    }

    #[test]
    fn test_toast_prompt_and_alert_shape() {
        let (mock, controller) = controller(false);
        let answered = Arc::new(AtomicU32::new(0));
        mock.set_prompt_reply(PromptResult {
            button_index: 1,
            input: String::from("1234"),
        });

        controller.show_toast("Saved");
        let seen = answered.clone();
        controller.show_prompt("Enter PIN", move |reply| {
            assert_eq!(reply.input, "1234");
            seen.store(reply.button_index, Ordering::SeqCst);
        });
        controller.show_alert("Done");

        let toast = Toast::notice("Saved");
        assert_eq!(toast.duration_ms, 3000);
        assert_eq!(toast.position, ToastPosition::Center);
        assert_eq!(toast.style.text_color, "#FFFF00");
        assert_eq!(
            mock.calls(),
            vec![
                BridgeCall::ShowToast(toast),
                BridgeCall::Prompt {
                    message: String::from("Enter PIN"),
                    title: String::from("Kiosk"),
                    buttons: vec![String::from("Ok"), String::from("Exit")],
                },
                BridgeCall::Alert {
                    message: String::from("Done"),
                    title: String::from("Kiosk"),
                    button: String::from("OK"),
                },
            ]
        );
        assert_eq!(answered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fullscreen_mode_auto_hides_navigation_bar() {
        let (mock, controller) = controller(false);
        controller.fullscreen_mode();
        assert_eq!(mock.calls(), vec![BridgeCall::NavigationBarSetUp(true)]);
    }

    #[test]
    fn test_create_photo_success() {
        let (mock, controller) = controller(false);
        mock.set_capture_success("aGVsbG8=");

        let photo = block_on(controller.create_photo()).unwrap();
        assert_eq!(photo.base64(), "aGVsbG8=");
        assert_eq!(photo.decode().unwrap(), b"hello");
        assert_eq!(
            mock.calls(),
            vec![
                BridgeCall::CameraCleanup,
                BridgeCall::CameraCapture(CaptureOptions::front_snapshot()),
            ]
        );

        let options = CaptureOptions::front_snapshot();
        assert_eq!(options.quality, 50);
        assert_eq!(options.encoding, ImageEncoding::Png);
        assert_eq!(options.direction, CameraDirection::Front);
        assert_eq!((options.target_width, options.target_height), (200, 200));
    }

    #[test]
    fn test_create_photo_failure_wraps_native_message() {
        let (mock, controller) = controller(false);
        mock.set_capture_failure("No camera available");

        let err = block_on(controller.create_photo()).unwrap_err();
        assert!(matches!(err, DeviceError::Camera(ref msg) if msg == "No camera available"));
        assert_eq!(err.to_string(), "Failed because: No camera available");
    }

    #[test]
    fn test_create_photo_without_camera() {
        let caps = Capabilities {
            camera: false,
            ..Capabilities::all()
        };
        let mock = Arc::new(MockBridge::with_capabilities(caps));
        let controller = DeviceController::new(mock.clone(), DeviceConfig::default(), false);

        let err = block_on(controller.create_photo()).unwrap_err();
        assert!(matches!(err, DeviceError::CameraUnavailable));
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn test_real_time_photo_requires_preview() {
        let (mock, mut controller) = controller(false);

        let err = block_on(controller.create_real_time_photo()).unwrap_err();
        assert!(matches!(err, DeviceError::PreviewNotStarted));

        controller.switch_on_camera();
        assert!(controller.state().preview_active);
        mock.set_preview_frame("ZnJhbWU=");
        let photo = block_on(controller.create_real_time_photo()).unwrap();
        assert_eq!(photo.decode().unwrap(), b"frame");

        let preview = PreviewOptions::hidden_front();
        assert_eq!((preview.x, preview.y), (0, 0));
        assert_eq!((preview.width, preview.height), (1, 1));
        assert_eq!(preview.direction, CameraDirection::Front);
        assert!(!preview.to_back);
        assert!(!preview.tap_photo);
        assert!(!preview.tap_focus);
        assert!(!preview.preview_drag);

        let frame = PreviewCaptureOptions::full_frame();
        assert_eq!((frame.width, frame.height), (640, 640));
        assert_eq!(frame.quality, 100);

        controller.switch_off_camera();
        let err = block_on(controller.create_real_time_photo()).unwrap_err();
        assert!(matches!(err, DeviceError::PreviewNotStarted));

        assert_eq!(
            mock.calls(),
            vec![
                BridgeCall::PreviewStart(PreviewOptions::hidden_front()),
                BridgeCall::PreviewCapture(PreviewCaptureOptions::full_frame()),
                BridgeCall::PreviewStop,
            ]
        );
    }

    #[test]
    fn test_config_from_toml() {
        let config = DeviceConfig::from_toml_str(
            r#"
            program_name = "Museum"

            [ACTIVE_MODE]
            brightness = 0.9

            [MIDDLE_MODE]
            brightness = 0.4

            [IDLE_MODE]
            brightness = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(config.program_name, "Museum");
        assert_eq!(DeviceMode::Active.brightness(&config), 0.9);
        assert_eq!(DeviceMode::Middle.brightness(&config), 0.4);
        assert_eq!(DeviceMode::Idle.brightness(&config), 0.1);
        assert_eq!(DeviceMode::Sleep.brightness(&config), 0.0);

        assert!(matches!(
            DeviceConfig::from_toml_str("program_name = 3"),
            Err(DeviceError::Config(_))
        ));
    }

    #[test]
    fn test_save_mode_state_parsing() {
        assert!(!SaveModeState::parse_value(None).unwrap());
        assert!(!SaveModeState::parse_value(Some("null")).unwrap());
        assert!(!SaveModeState::parse_value(Some("false")).unwrap());
        assert!(SaveModeState::parse_value(Some("true")).unwrap());
        assert!(SaveModeState::parse_value(Some("yes")).is_err());

        assert!(SaveModeState::from_json_str(r#"{"saveModeON": "true"}"#).unwrap());
        assert!(SaveModeState::from_json_str(r#"{"saveModeON": true}"#).unwrap());
        assert!(!SaveModeState::from_json_str(r#"{"other": true}"#).unwrap());
        assert!(!SaveModeState::load("/nonexistent/kiosk-state.json").unwrap());
    }

    #[test]
    fn test_save_mode_state_truthiness() {
        assert!(SaveModeState::parse_value(Some("1")).unwrap());
        assert!(!SaveModeState::parse_value(Some("0")).unwrap());
        assert!(!SaveModeState::parse_value(Some(r#""""#)).unwrap());
        assert!(SaveModeState::parse_value(Some(r#""on""#)).unwrap());

        assert!(SaveModeState::from_json_str(r#"{"saveModeON": 1}"#).unwrap());
        assert!(!SaveModeState::from_json_str(r#"{"saveModeON": 0}"#).unwrap());
        assert!(!SaveModeState::from_json_str(r#"{"saveModeON": null}"#).unwrap());
        assert!(SaveModeState::from_json_str(r#"{"saveModeON": "1"}"#).unwrap());
    }

    #[test]
    fn test_startup_files() {
        let dir = tempfile::tempdir().unwrap();

        let state_path = dir.path().join("state.json");
        std::fs::write(&state_path, r#"{"saveModeON": "true"}"#).unwrap();
        assert!(SaveModeState::load(&state_path).unwrap());

        let broken_path = dir.path().join("broken.json");
        std::fs::write(&broken_path, "{saveModeON: ").unwrap();
        assert!(matches!(
            SaveModeState::load(&broken_path),
            Err(DeviceError::SaveModeState(_))
        ));

        let config_path = dir.path().join("device.toml");
        std::fs::write(
            &config_path,
            r#"
            program_name = "Gallery"

            [ACTIVE_MODE]
            brightness = 0.8

            [MIDDLE_MODE]
            brightness = 0.5

            [IDLE_MODE]
            brightness = 0.2
            "#,
        )
        .unwrap();
        let config = DeviceConfig::load(&config_path).unwrap();
        assert_eq!(config.program_name, "Gallery");
        assert_eq!(config.active_mode.brightness, 0.8);

        let mock = Arc::new(MockBridge::new());
        let mut controller =
            DeviceController::with_state_file(mock.clone(), config, &state_path).unwrap();
        assert!(controller.save_mode_enabled());

        controller.set_mode(DeviceMode::Active);
        assert!(mock.calls().contains(&BridgeCall::SetBrightness(0.8)));
        mock.clear_calls();

        assert!(controller.set_mode(DeviceMode::Sleep));
        assert_eq!(controller.mode(), Some(DeviceMode::Sleep));
        assert!(mock.calls().contains(&BridgeCall::Lock));

        assert!(matches!(
            DeviceController::with_state_file(
                mock.clone(),
                DeviceConfig::default(),
                &broken_path
            ),
            Err(DeviceError::SaveModeState(_))
        ));
        assert!(matches!(
            DeviceConfig::load(dir.path().join("missing.toml")),
            Err(DeviceError::Io(_))
        ));
    }

    #[test]
    fn test_bridge_released_with_controller() {
        let mock = Arc::new(MockBridge::new());
        let weak = Arc::downgrade(&mock);
        let mut controller = DeviceController::new(mock.clone(), DeviceConfig::default(), true);

        controller.set_mode(DeviceMode::Active);
        assert!(mock.emit_wifi_state(WifiState::Enabled));
        assert_eq!(mock.toasts(), vec![Toast::notice("Wifi enabled!")]);

        drop(controller);
        drop(mock);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_state_snapshot() {
        let (_mock, mut controller) = controller(false);
        controller.quinary_click(|| {});
        controller.switch_on_camera();

        let shared = &controller;
        let state = shared.state();
        assert_eq!(state.mode, Some(DeviceMode::Active));
        assert_eq!(state.click_count, 1);
        assert!(state.preview_active);
        assert!(!state.save_mode_enabled);
    }

    #[test]
    fn test_mode_names() {
        for mode in DeviceMode::ALL {
            assert_eq!(DeviceMode::from_name(mode.as_str()), mode);
        }
        assert_eq!(DeviceMode::from(""), DeviceMode::Idle);
        assert_eq!(DeviceMode::default(), DeviceMode::Idle);
    }
}
