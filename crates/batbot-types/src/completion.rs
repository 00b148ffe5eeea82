//! Request/response shapes for the remote text-completion service.
//!
//! The service is called with a flat `{prompt, max_tokens, temperature}`
//! body. Its answer comes back in one of several shapes; [`CompletionBody`]
//! names each one so callers never probe optional fields by hand.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// A successfully received completion body, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionBody {
    /// `{"completion": "..."}`
    Direct(String),
    /// `{"choices": [{"text": "..."}, ...]}`
    Choices(String),
    /// Anything else. Holds the body serialized back to text.
    Raw(String),
}

impl CompletionBody {
    /// Classify a JSON body: direct shape first, then choices, then raw.
    pub fn from_value(value: Value) -> Self {
        if let Some(text) = value.get("completion").and_then(Value::as_str) {
            return CompletionBody::Direct(text.to_string());
        }

        let first_choice = value
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("text"))
            .and_then(Value::as_str);
        if let Some(text) = first_choice {
            return CompletionBody::Choices(text.to_string());
        }

        CompletionBody::Raw(value.to_string())
    }

    /// Classify a raw response body. Bodies that are not JSON at all are `Raw`.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(_) => CompletionBody::Raw(body.to_string()),
        }
    }

    /// Name of the shape, for logging.
    pub fn shape(&self) -> &'static str {
        match self {
            CompletionBody::Direct(_) => "direct",
            CompletionBody::Choices(_) => "choices",
            CompletionBody::Raw(_) => "raw",
        }
    }

    /// The completion text with surrounding whitespace removed.
    pub fn into_text(self) -> String {
        match self {
            CompletionBody::Direct(text)
            | CompletionBody::Choices(text)
            | CompletionBody::Raw(text) => text.trim().to_string(),
        }
    }
}
