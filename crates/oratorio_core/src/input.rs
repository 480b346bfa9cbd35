//! Input types for generation requests.

use serde::{Deserialize, Serialize};

/// Supported inputs to the generation capability.
///
/// # Examples
///
/// ```
/// use oratorio_core::Input;
/// use serde_json::json;
///
/// let prompt = Input::Text("Outline a deep dive into startups.".to_string());
/// let chapters = Input::Json(json!(["Funding", "Hiring"]));
/// assert_ne!(prompt, chapters);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// Structured data passed into a prompt, rendered as JSON text.
    Json(serde_json::Value),
}

impl Input {
    /// Render this input as prompt text.
    pub fn as_prompt_text(&self) -> String {
        match self {
            Input::Text(text) => text.clone(),
            Input::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}
