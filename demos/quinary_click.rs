//! Example: Walk a device through its modes and the five-click gesture.
//!
//! Run with: `RUST_LOG=debug cargo run --example quinary_click`

use std::sync::Arc;

use kiosk_device::{DeviceConfig, DeviceController, DeviceError, DeviceMode, MockBridge, WifiState};

fn main() -> Result<(), DeviceError> {
    // Initialize logging (optional)
    env_logger::init();

    // A real app passes its native bridge here
    let bridge = Arc::new(MockBridge::new());
    let mut controller = DeviceController::new(bridge.clone(), DeviceConfig::default(), true);

    controller.fullscreen_mode();
    controller.set_mode(DeviceMode::Idle);

    // Five quick taps: the first wakes the screen, the fifth opens the prompt
    for _ in 0..5 {
        controller.quinary_click(|| println!("Admin gesture detected"));
    }
    println!("Mode after gesture: {:?}", controller.mode());

    controller.set_mode(DeviceMode::Sleep);
    bridge.emit_wifi_state(WifiState::Disabled);

    let photo = futures::executor::block_on(controller.create_photo())?;
    println!("Captured {} bytes", photo.decode()?.len());

    println!("Plugin calls:");
    for call in bridge.calls() {
        println!("  {:?}", call);
    }

    Ok(())
}
