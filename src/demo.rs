//! Canned diagnoses served when the prediction backend cannot answer.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::{ClassificationResult, PredictionResponse, Severity};

pub const DEMO_MESSAGE: &str = "Backend unavailable - showing demo data";

struct DemoEntry {
    disease: &'static str,
    confidence: f64,
    severity: Severity,
    description: &'static str,
    treatment: &'static str,
    color: &'static str,
}

static DEMO_TABLE: [DemoEntry; 4] = [
    DemoEntry {
        disease: "Tomato Late Blight",
        confidence: 94.5,
        severity: Severity::High,
        description: "Late blight is a serious disease affecting tomato plants, caused by the pathogen Phytophthora infestans. This disease can spread rapidly in cool, wet conditions.",
        treatment: "Apply copper-based fungicides immediately, improve air circulation, remove affected leaves, and avoid overhead watering. Consider using resistant varieties.",
        color: "red",
    },
    DemoEntry {
        disease: "Potato Early Blight",
        confidence: 87.2,
        severity: Severity::Medium,
        description: "Early blight affects potato plants, causing dark spots with concentric rings on leaves and stems. It typically starts on lower, older leaves.",
        treatment: "Use resistant varieties, practice crop rotation, apply appropriate fungicides, and maintain proper spacing for air circulation.",
        color: "orange",
    },
    DemoEntry {
        disease: "Healthy Tomato Plant",
        confidence: 96.8,
        severity: Severity::None,
        description: "Your tomato plant appears to be healthy with no signs of disease. The leaves show good color and structure.",
        treatment: "Continue regular care including proper watering, fertilizing, and monitoring for early disease detection.",
        color: "green",
    },
    DemoEntry {
        disease: "Pepper Bell Bacterial Spot",
        confidence: 89.3,
        severity: Severity::Medium,
        description: "Bacterial spot is causing dark, water-soaked lesions on pepper leaves and fruits. This disease thrives in warm, humid conditions.",
        treatment: "Use copper-based bactericides, improve air circulation, avoid overhead watering, and remove affected plant material.",
        color: "orange",
    },
];

impl DemoEntry {
    fn to_result(&self) -> ClassificationResult {
        ClassificationResult {
            disease: self.disease.to_string(),
            confidence: self.confidence,
            severity: self.severity,
            description: Some(self.description.to_string()),
            treatment: Some(self.treatment.to_string()),
            color: self.color.to_string(),
            predicted_class: None,
            class_index: None,
        }
    }
}

/// Names of every disease the demo table can produce.
pub fn demo_diseases() -> impl Iterator<Item = &'static str> {
    DEMO_TABLE.iter().map(|entry| entry.disease)
}

/// Picks a demo result uniformly from the table using `rng`.
pub fn pick_demo<R: Rng + ?Sized>(rng: &mut R) -> PredictionResponse {
    let entry = DEMO_TABLE.choose(rng).unwrap_or(&DEMO_TABLE[0]);
    PredictionResponse::demo(entry.to_result(), DEMO_MESSAGE)
}

pub fn random_demo() -> PredictionResponse {
    pick_demo(&mut rand::rng())
}
