#![allow(dead_code)]

use std::time::Duration;

use plant_doctor::config::ProxyConfig;
use serde_json::{json, Value};

pub const BOUNDARY: &str = "----plant-doctor-test-boundary";

/// A single part of a hand-built multipart body.
pub struct FormPart<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> FormPart<'a> {
    pub fn image(content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name: "image",
            file_name: Some("plant-image.jpg"),
            content_type: Some(content_type),
            data,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(file_name) = part.file_name {
            disposition.push_str(&format!("; filename=\"{file_name}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

pub fn config_for(backend_url: &str, timeout: Duration) -> ProxyConfig {
    ProxyConfig {
        port: 0,
        ..ProxyConfig::default()
    }
    .with_backend_url(backend_url)
    .with_timeout(timeout)
}

/// A URL nothing is listening on.
pub fn dead_backend_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn backend_result() -> Value {
    json!({
        "disease": "Pepper Bell Bacterial Spot",
        "confidence": 93.41,
        "severity": "Medium",
        "description": "A bacterial disease that affects bell peppers, caused by Xanthomonas species.",
        "treatment": "Apply copper-based bactericides and remove infected plant material.",
        "color": "orange",
        "predicted_class": "Pepper__bell___Bacterial_spot",
        "class_index": 0
    })
}
