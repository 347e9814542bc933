//! Normalizes model output for the wire and supplies the degraded payloads
//! served when the model stays unreachable.

use serde::Serialize;
use serde_json::{json, Value};

/// What the analysis endpoint hands back: the model's reply parsed as JSON,
/// or the raw text wrapped when parsing fails. Serializes flat, so consumers
/// see either the structured object itself or `{"rawText": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Structured(Value),
    RawText {
        #[serde(rename = "rawText")]
        raw_text: String,
    },
}

pub fn shape_analysis_output(text: &str) -> AnalysisOutcome {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => AnalysisOutcome::Structured(value),
        Err(_) => AnalysisOutcome::RawText {
            raw_text: text.to_string(),
        },
    }
}

/// Served with a 503 when every model attempt failed. A constant shape,
/// never derived from partial model output.
pub fn fallback_analysis() -> Value {
    json!({
        "diagnosis": "other",
        "confidence": 0,
        "recommendations": [
            "Keep the affected area clean and dry",
            "Avoid scratching or picking at the skin",
            "Monitor the area and consult a dermatologist if it persists or worsens"
        ],
        "refer_to_dermatologist": false,
        "note": "Automated analysis was unavailable. This is a generic response, not an assessment of your photo."
    })
}

pub fn fallback_assistant_text() -> &'static str {
    "The skincare assistant is unavailable right now. General advice: keep skin clean and moisturized, use sunscreen daily, and see a dermatologist for persistent or worsening concerns."
}
