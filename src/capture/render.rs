//! Plain-text rendering of a session for the terminal.

use std::fmt::Write;

use crate::capture::session::State;
use crate::models::{PredictionResponse, Severity};

const BAR_WIDTH: usize = 20;

pub fn render(state: &State) -> String {
    match state {
        State::Idle => "No image selected.\n".to_string(),
        State::ImageSelected { image } => {
            format!("Selected {} ({} bytes).\n", image.file_name, image.len())
        }
        State::Analyzing { image } => format!("Analyzing {}...\n", image.file_name),
        State::Result { response, .. } => render_response(response),
        State::Error { message, .. } => format!("Error: {message}\n"),
    }
}

fn render_response(response: &PredictionResponse) -> String {
    let result = &response.result;
    let mut out = String::new();

    if response.is_demo() {
        let message = response.message.as_deref().unwrap_or("demo data");
        let _ = writeln!(out, "[demo mode] {message}");
    }
    let _ = writeln!(out, "Diagnosis:  {}", result.disease);
    let _ = writeln!(
        out,
        "Confidence: {:>5.1}% {}",
        result.confidence,
        confidence_bar(result.confidence)
    );
    let _ = writeln!(out, "Severity:   {}", severity_label(result.severity));
    if let Some(description) = &result.description {
        let _ = writeln!(out, "\n{description}");
    }
    if let Some(treatment) = &result.treatment {
        let _ = writeln!(out, "\nTreatment: {treatment}");
    }
    out
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::None => "None (healthy)",
        Severity::Low => "Low",
        Severity::Medium => "Medium",
        Severity::High => "High",
        Severity::Unknown => "Unknown",
    }
}

fn confidence_bar(confidence: f64) -> String {
    let filled = ((confidence.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
