use serde::{Deserialize, Deserializer, Serialize};

/// How urgently a diagnosis needs attention. The backend answers with
/// `"Unknown"` for labels it has no information on, and anything else it
/// might invent (or leaves out, or sends as `null`) decodes to the same variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    #[serde(other)]
    #[default]
    Unknown,
}

fn severity_or_unknown<'de, D>(deserializer: D) -> Result<Severity, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Severity>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_color() -> String {
    "gray".into()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClassificationResult {
    pub disease: String,
    /// Percentage in `0..=100`.
    pub confidence: f64,
    #[serde(default, deserialize_with = "severity_or_unknown")]
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    /// Presentation tag (`red`, `orange`, `green`, `gray`, ...).
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_index: Option<u32>,
}

/// Body of a successful `POST /api/predict`.
///
/// `demo_mode` and `message` are only ever set when the result was
/// synthesized by the proxy instead of returned by the backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PredictionResponse {
    #[serde(flatten)]
    pub result: ClassificationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PredictionResponse {
    pub fn from_backend(result: ClassificationResult) -> Self {
        Self {
            result,
            demo_mode: None,
            message: None,
        }
    }

    pub fn demo(result: ClassificationResult, message: impl Into<String>) -> Self {
        Self {
            result,
            demo_mode: Some(true),
            message: Some(message.into()),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.demo_mode.unwrap_or(false)
    }
}

/// Static description served by `GET /api/predict`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
    pub features: Vec<String>,
    pub endpoints: Endpoints,
    pub backend_status: String,
    pub supported_formats: Vec<String>,
    pub max_file_size: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Endpoints {
    pub predict: String,
    pub health: String,
    pub classes: String,
}
