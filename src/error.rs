use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures the proxy reports to its caller. Backend trouble other than a
/// timeout never shows up here; it is absorbed into a demo result.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("No image file provided")]
    MissingFile,
    #[error("Invalid file type. Please upload an image.")]
    InvalidFileType,
    #[error("File too large. Please upload an image smaller than 10MB.")]
    FileTooLarge,
    #[error("Malformed upload: {0}")]
    Multipart(String),
    #[error("Request timeout. Please try again.")]
    Timeout,
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingFile
            | ProxyError::InvalidFileType
            | ProxyError::FileTooLarge
            | ProxyError::Multipart(_) => StatusCode::BAD_REQUEST,
            ProxyError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
