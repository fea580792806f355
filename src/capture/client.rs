use reqwest::multipart::{Form, Part};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::capture::selected::SelectedImage;
use crate::models::PredictionResponse;
use crate::upload::{DEFAULT_FILE_NAME, IMAGE_FIELD};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API Error: {status}")]
    Api { status: u16 },
    #[error("{0}")]
    Rejected(String),
    #[error("Failed to analyze plant: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to analyze plant: {0}")]
    Json(#[from] serde_json::Error),
}

/// Submits images to the classification proxy's `/api/predict`.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    /// `base_url` should be like `http://127.0.0.1:3000` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn classify(
        &self,
        image: &SelectedImage,
    ) -> Result<PredictionResponse, ClientError> {
        let url = format!("{}/api/predict", self.base_url);
        let part = Part::bytes(image.data.to_vec())
            .file_name(DEFAULT_FILE_NAME)
            .mime_str(&image.content_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        info!(url = %url, bytes = image.len(), "submitting image for analysis");
        let resp = self.client.post(&url).multipart(form).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
            });
        }

        let body: Value = resp.json().await?;
        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(ClientError::Rejected(message.to_string()));
        }
        Ok(serde_json::from_value(body)?)
    }
}
