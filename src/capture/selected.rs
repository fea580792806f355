use std::fmt;
use std::path::Path;

use bytes::Bytes;
use image::ImageFormat;
use thiserror::Error;

use crate::upload::{DEFAULT_FILE_NAME, MAX_UPLOAD_BYTES};

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("Could not read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported image format. Please choose a JPEG, PNG or WebP file.")]
    UnsupportedFormat,
    #[error("File too large. Please choose an image smaller than 10MB.")]
    TooLarge { size: u64 },
}

/// The single in-memory image the client is working with.
#[derive(Clone, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

// Session events are logged; keep the pixels out of the log.
impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl SelectedImage {
    /// Loads a picked file, accepting the same formats and size as the
    /// upload form (`.jpeg`, `.jpg`, `.png`, `.webp`, at most 10 MiB).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SelectError> {
        let path = path.as_ref();
        let content_type = match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) => "image/jpeg",
            Ok(ImageFormat::Png) => "image/png",
            Ok(ImageFormat::WebP) => "image/webp",
            _ => return Err(SelectError::UnsupportedFormat),
        };

        let size = std::fs::metadata(path)?.len();
        if size > MAX_UPLOAD_BYTES as u64 {
            return Err(SelectError::TooLarge { size });
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();

        Ok(Self {
            file_name,
            content_type: content_type.to_string(),
            data: Bytes::from(std::fs::read(path)?),
        })
    }

    /// Wraps an encoded camera frame.
    pub fn from_jpeg(data: Vec<u8>) -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            content_type: "image/jpeg".to_string(),
            data: Bytes::from(data),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
