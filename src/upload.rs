//! Extraction and validation of the uploaded image from a multipart body.

use actix_multipart::Multipart;
use actix_web::http::header;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tracing::debug;

use crate::error::ProxyError;

/// Form field the image must arrive in.
pub const IMAGE_FIELD: &str = "image";
/// 10 MiB; anything strictly larger is rejected.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_FILE_NAME: &str = "plant-image.jpg";

/// An accepted image held in memory for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

pub fn is_image_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// Reads the `image` field out of `payload`.
///
/// The content type is checked as soon as the field header is seen and the
/// size while the body streams in, so an oversized file is never buffered
/// past the limit. Other fields are drained and ignored.
pub async fn read_image(mut payload: Multipart) -> Result<ImageUpload, ProxyError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ProxyError::Multipart(e.to_string()))?;

        let is_image_field = field.content_disposition().get_name() == Some(IMAGE_FIELD);
        if !is_image_field {
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| ProxyError::Multipart(e.to_string()))?;
            }
            continue;
        }

        let content_type = field
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .trim()
            .to_string();
        if !is_image_type(&content_type) {
            debug!(content_type = %content_type, "rejecting non-image upload");
            return Err(ProxyError::InvalidFileType);
        }

        let file_name = field
            .content_disposition()
            .get_filename()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();

        let mut data = BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ProxyError::Multipart(e.to_string()))?;
            if data.len() + chunk.len() > MAX_UPLOAD_BYTES {
                debug!(limit = MAX_UPLOAD_BYTES, "rejecting oversized upload");
                return Err(ProxyError::FileTooLarge);
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(ImageUpload {
            file_name,
            content_type,
            data: data.freeze(),
        });
    }

    Err(ProxyError::MissingFile)
}
