//! In-memory camera used for demos and tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::{Rgb, RgbImage};

use super::{CameraError, MediaDevices, MediaStream};

#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Grant { width: u32, height: u32 },
    /// Fails with the given device error name, e.g. `"NotFoundError"`.
    Denied(&'static str),
}

/// Hands out synthetic streams and counts how many tracks are still live.
pub struct FakeDevices {
    outcome: FakeOutcome,
    supported: bool,
    live_tracks: Arc<AtomicUsize>,
    requests: AtomicUsize,
}

impl FakeDevices {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            supported: true,
            live_tracks: Arc::new(AtomicUsize::new(0)),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new(FakeOutcome::Denied("NotSupportedError"))
        }
    }

    /// Tracks that have been started and not yet stopped, across all streams.
    pub fn live_tracks(&self) -> usize {
        self.live_tracks.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl MediaDevices for FakeDevices {
    type Stream = FakeStream;

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn get_user_media(&self) -> Result<FakeStream, CameraError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            FakeOutcome::Grant { width, height } => {
                self.live_tracks.fetch_add(1, Ordering::SeqCst);
                Ok(FakeStream {
                    width,
                    height,
                    tracks: 1,
                    live_tracks: Arc::clone(&self.live_tracks),
                })
            }
            FakeOutcome::Denied(name) => Err(CameraError::from_device_error(name, "")),
        }
    }
}

pub struct FakeStream {
    width: u32,
    height: u32,
    tracks: usize,
    live_tracks: Arc<AtomicUsize>,
}

impl MediaStream for FakeStream {
    fn video_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn grab_frame(&mut self) -> Result<RgbImage, CameraError> {
        if self.tracks == 0 {
            return Err(CameraError::Stopped);
        }
        // A green gradient, close enough to a leaf for a demo.
        Ok(RgbImage::from_fn(self.width, self.height, |x, y| {
            Rgb([(x % 64) as u8, 128 + (y % 128) as u8, 40])
        }))
    }

    fn active_tracks(&self) -> usize {
        self.tracks
    }

    fn stop_tracks(&mut self) {
        self.live_tracks.fetch_sub(self.tracks, Ordering::SeqCst);
        self.tracks = 0;
    }
}
