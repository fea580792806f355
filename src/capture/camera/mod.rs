//! Camera capture with scoped ownership of the media stream.
//!
//! A [`CameraSession`] is the only owner of a live stream. Its tracks are
//! stopped when the session is stopped, after a successful capture, and when
//! the session is dropped, so the device is never left locked.

pub mod fake;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, RgbImage};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::capture::selected::SelectedImage;

pub const JPEG_QUALITY: u8 = 90;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("Camera permission denied. Please allow camera access and try again.")]
    PermissionDenied,
    #[error("No camera found on this device.")]
    NotFound,
    #[error("Camera not supported in this browser.")]
    Unsupported,
    #[error("Camera is already in use by another application.")]
    InUse,
    #[error("Camera not ready - please wait for video to load")]
    NotReady,
    #[error("Camera is not running")]
    Stopped,
    #[error("Failed to capture photo - {0}")]
    Capture(String),
    #[error("{0}")]
    Other(String),
}

impl CameraError {
    /// Maps a media-device error name (`NotAllowedError`, ...) to the
    /// message shown to the user.
    pub fn from_device_error(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => CameraError::PermissionDenied,
            "NotFoundError" => CameraError::NotFound,
            "NotSupportedError" => CameraError::Unsupported,
            "NotReadableError" => CameraError::InUse,
            _ if !message.is_empty() => CameraError::Other(message.to_string()),
            _ => CameraError::Other("Camera access failed".to_string()),
        }
    }
}

/// A live video stream made of one or more tracks.
pub trait MediaStream {
    /// Width and height of the current video; `(0, 0)` until metadata loads.
    fn video_size(&self) -> (u32, u32);
    fn grab_frame(&mut self) -> Result<RgbImage, CameraError>;
    fn active_tracks(&self) -> usize;
    fn stop_tracks(&mut self);
}

/// Permission-gated access to the device's cameras.
pub trait MediaDevices {
    type Stream: MediaStream;

    fn is_supported(&self) -> bool {
        true
    }

    fn get_user_media(&self) -> Result<Self::Stream, CameraError>;
}

pub struct CameraSession<S: MediaStream> {
    stream: Option<S>,
}

impl<S: MediaStream> CameraSession<S> {
    pub fn start<D>(devices: &D) -> Result<Self, CameraError>
    where
        D: MediaDevices<Stream = S>,
    {
        if !devices.is_supported() {
            return Err(CameraError::Unsupported);
        }
        let stream = devices.get_user_media()?;
        info!(tracks = stream.active_tracks(), "camera stream acquired");
        Ok(Self {
            stream: Some(stream),
        })
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    pub fn active_tracks(&self) -> usize {
        self.stream.as_ref().map_or(0, |s| s.active_tracks())
    }

    /// Grabs the current frame as a JPEG and releases the camera.
    ///
    /// If the video has no dimensions yet the stream is left running so the
    /// caller can try again.
    pub fn capture(&mut self) -> Result<SelectedImage, CameraError> {
        let stream = self.stream.as_mut().ok_or(CameraError::Stopped)?;
        let (width, height) = stream.video_size();
        if width == 0 || height == 0 {
            return Err(CameraError::NotReady);
        }

        let frame = stream.grab_frame();
        self.stop();
        let jpeg = encode_jpeg(&frame?)?;
        debug!(width, height, bytes = jpeg.len(), "photo captured");
        Ok(SelectedImage::from_jpeg(jpeg))
    }

    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_tracks();
            if stream.active_tracks() != 0 {
                warn!(tracks = stream.active_tracks(), "tracks still live after stop");
            }
            info!("camera stream released");
        }
    }
}

impl<S: MediaStream> Drop for CameraSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn encode_jpeg(frame: &RgbImage) -> Result<Vec<u8>, CameraError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode(frame.as_raw(), frame.width(), frame.height(), ColorType::Rgb8)
        .map_err(|e| CameraError::Capture(e.to_string()))?;
    Ok(buf)
}
