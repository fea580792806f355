//! HTTP client for the external prediction service.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ProxyConfig;
use crate::upload::{ImageUpload, IMAGE_FIELD};

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend did not answer within {0:?}")]
    Timeout(Duration),
    #[error("backend request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

impl BackendError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Timeout(_))
    }
}

/// Talks to `{backend_url}/predict`, `/health` and `/classes`.
///
/// Every call is bounded by the configured timeout; once it elapses the
/// in-flight request is dropped.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    config: ProxyConfig,
}

impl BackendClient {
    pub fn new(config: ProxyConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(Some(Duration::from_secs(50)))
            .build()
            .map_err(BackendError::Http)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Forwards `upload` as a fresh multipart body and returns the backend's
    /// JSON answer untouched. Only a body that is not JSON at all is an error.
    pub async fn predict(&self, upload: &ImageUpload) -> Result<Value, BackendError> {
        let part = Part::bytes(upload.data.to_vec())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(BackendError::Http)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let url = self.config.predict_url();
        info!(url = %url, bytes = upload.len(), "forwarding image to backend");
        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.config.backend_timeout)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let resp = Self::ensure_success(resp).await?;
        let body: Value = resp
            .json()
            .await
            .map_err(|e| self.classify_decode_error(e))?;
        debug!(
            disease = body.get("disease").and_then(serde_json::Value::as_str).unwrap_or("?"),
            "backend classified image"
        );
        Ok(body)
    }

    pub async fn health(&self) -> Result<Value, BackendError> {
        self.get_json(&self.config.health_url()).await
    }

    pub async fn classes(&self) -> Result<Value, BackendError> {
        self.get_json(&self.config.classes_url()).await
    }

    async fn get_json(&self, url: &str) -> Result<Value, BackendError> {
        debug!(url = %url, "querying backend");
        let resp = self
            .client
            .get(url)
            .timeout(self.config.backend_timeout)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;
        let resp = Self::ensure_success(resp).await?;
        resp.json().await.map_err(|e| self.classify_decode_error(e))
    }

    async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    fn classify_send_error(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.config.backend_timeout)
        } else {
            BackendError::Http(err)
        }
    }

    // The timeout also covers the body, so a slow body read is still a timeout.
    fn classify_decode_error(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.config.backend_timeout)
        } else {
            BackendError::Decode(err)
        }
    }
}
