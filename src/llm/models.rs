use std::time::Duration;

/// One part of a model request: plain text or inline binary media.
#[derive(Debug, Clone)]
pub enum ContentPart {
    Text(String),
    InlineMedia { media_type: String, data: Vec<u8> },
}

/// A single generation request, built fresh per call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model_id: String,
    pub parts: Vec<ContentPart>,
}

impl GenerationRequest {
    pub fn new(model_id: impl Into<String>, parts: Vec<ContentPart>) -> Self {
        Self {
            model_id: model_id.into(),
            parts,
        }
    }
}

/// What the model produced. `text` is absent when the response carried no
/// extractable text part.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub text: Option<String>,
}

/// Bounded retry with exponential backoff: 1x, 2x, 4x, ... the base delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }
}
