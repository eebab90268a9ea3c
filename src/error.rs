//! Error types for the device controller.

/// Errors surfaced by the device controller.
///
/// Invalid brightness values and missing non-camera capabilities are not
/// errors: they are logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The still camera reported a capture failure.
    #[error("Failed because: {0}")]
    Camera(String),

    /// The bridge exposes no still camera.
    #[error("camera failed")]
    CameraUnavailable,

    /// A real-time photo was requested without a running preview.
    #[error("Camera preview has not been started")]
    PreviewNotStarted,

    /// The bridge dropped a capture completion without resolving it.
    #[error("Capture was dropped before it completed")]
    CaptureDropped,

    /// A photo payload was not valid base64.
    #[error("Invalid photo data: {0}")]
    InvalidPhotoData(#[from] base64::DecodeError),

    /// An I/O error occurred (e.g., reading a config file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The device configuration could not be parsed.
    #[error("Invalid device config: {0}")]
    Config(#[from] toml::de::Error),

    /// The persisted save-mode state could not be parsed.
    #[error("Invalid save-mode state: {0}")]
    SaveModeState(#[from] serde_json::Error),
}
