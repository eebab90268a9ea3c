//! Camera capture options and pending photo results.

use crate::bridge::{
    CameraDirection, CaptureOptions, DestinationType, ImageEncoding, PreviewCaptureOptions,
    PreviewOptions,
};
use crate::error::DeviceError;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::channel::oneshot;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

impl CaptureOptions {
    /// Small front-camera PNG used for user snapshots.
    pub fn front_snapshot() -> Self {
        Self {
            quality: 50,
            destination: DestinationType::DataUrl,
            encoding: ImageEncoding::Png,
            direction: CameraDirection::Front,
            target_width: 200,
            target_height: 200,
        }
    }
}

impl PreviewOptions {
    /// A hidden 1x1 front-camera preview anchored at the top-left corner.
    pub fn hidden_front() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
            direction: CameraDirection::Front,
            to_back: false,
            tap_photo: false,
            tap_focus: false,
            preview_drag: false,
        }
    }
}

impl PreviewCaptureOptions {
    /// Full-quality 640x640 frame.
    pub fn full_frame() -> Self {
        Self {
            width: 640,
            height: 640,
            quality: 100,
        }
    }
}

/// A captured picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    data: String,
}

impl Photo {
    /// Wrap base64 image data returned by a camera plugin.
    pub fn from_base64(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// The base64-encoded image.
    pub fn base64(&self) -> &str {
        &self.data
    }

    /// Consume the photo, returning the base64 string.
    pub fn into_base64(self) -> String {
        self.data
    }

    /// Decode the image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, DeviceError> {
        Ok(STANDARD.decode(self.data.trim())?)
    }
}

/// A photo capture in flight.
///
/// Resolves exactly once, with the photo or the capture error.
#[must_use = "a photo request does nothing unless awaited"]
pub struct PhotoRequest {
    inner: Inner,
}

enum Inner {
    Pending(oneshot::Receiver<Result<Photo, DeviceError>>),
    Ready(Option<Result<Photo, DeviceError>>),
}

impl PhotoRequest {
    pub(crate) fn pending(rx: oneshot::Receiver<Result<Photo, DeviceError>>) -> Self {
        Self {
            inner: Inner::Pending(rx),
        }
    }

    pub(crate) fn failed(error: DeviceError) -> Self {
        Self {
            inner: Inner::Ready(Some(Err(error))),
        }
    }
}

impl Future for PhotoRequest {
    type Output = Result<Photo, DeviceError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().inner {
            Inner::Pending(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                Poll::Ready(Err(oneshot::Canceled)) => {
                    Poll::Ready(Err(DeviceError::CaptureDropped))
                }
                Poll::Pending => Poll::Pending,
            },
            // A second poll after completion reports the request as dropped.
            Inner::Ready(result) => {
                Poll::Ready(result.take().unwrap_or(Err(DeviceError::CaptureDropped)))
            }
        }
    }
}
