//! Request and response types for text generation.

use crate::{Message, Output, Shape};
use serde::{Deserialize, Serialize};

/// A generation request.
///
/// # Examples
///
/// ```
/// use oratorio_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest {
///     messages: vec![Message::user("Outline chapters about startups.")],
///     max_tokens: Some(1024),
///     temperature: Some(0.7),
///     model: None,
///     response_shape: None,
/// };
///
/// assert_eq!(request.messages.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier to use
    pub model: Option<String>,
    /// Shape the structured output should conform to, if any.
    ///
    /// Drivers that cannot enforce shapes natively append a formatting
    /// instruction to the prompt instead.
    pub response_shape: Option<Shape>,
}

impl GenerateRequest {
    /// Create a builder for this request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified generation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Concatenate all text outputs with newlines between them.
    pub fn text(&self) -> String {
        let texts: Vec<&str> = self
            .outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        texts.join("\n")
    }

    /// First structured output, if the model produced one.
    pub fn json(&self) -> Option<&serde_json::Value> {
        self.outputs.iter().find_map(|output| match output {
            Output::Json(value) => Some(value),
            _ => None,
        })
    }
}
