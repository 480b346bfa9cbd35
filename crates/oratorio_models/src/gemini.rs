//! Google Gemini generation driver.
//!
//! Maintains a pool of model-specific clients with lazy initialization, so
//! different pipeline steps can use different models through one driver.

use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::sync::Mutex;

use gemini_rust::{Gemini, client::Model};

use oratorio_core::{GenerateRequest, GenerateResponse, Input, Output, Role, Shape};
use oratorio_error::{GenerationError, GenerationErrorKind, OratorioResult};
use oratorio_interface::OratorioDriver;

/// Default model, matching the generation agents this driver replaces.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Generation driver backed by the Google Gemini API.
///
/// # Examples
///
/// ```no_run
/// use oratorio_core::{GenerateRequest, Message};
/// use oratorio_interface::OratorioDriver;
/// use oratorio_models::GeminiDriver;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let driver = GeminiDriver::from_env()?;
/// let request = GenerateRequest {
///     messages: vec![Message::user("Outline chapters about startups.")],
///     ..Default::default()
/// };
/// let response = driver.generate(&request).await?;
/// println!("{}", response.text());
/// # Ok(())
/// # }
/// ```
pub struct GeminiDriver {
    api_key: String,
    model_name: String,
    /// One client per model, created on first use.
    clients: Mutex<HashMap<String, Gemini>>,
}

impl std::fmt::Debug for GeminiDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiDriver")
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}

impl GeminiDriver {
    /// Create a driver reading the API key from `GEMINI_API_KEY`.
    pub fn from_env() -> OratorioResult<Self> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            GenerationError::new(GenerationErrorKind::MissingApiKey(
                "GEMINI_API_KEY".to_string(),
            ))
        })?;
        Ok(Self::new(api_key, DEFAULT_MODEL))
    }

    /// Create a driver with an explicit key and default model.
    pub fn new(api_key: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_name: model_name.into(),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Convert a model name string to the gemini-rust Model enum.
    ///
    /// Unrecognized names use the Custom variant with the "models/" prefix
    /// the REST API expects.
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => {
                if other.starts_with("models/") {
                    Model::Custom(other.to_string())
                } else {
                    Model::Custom(format!("models/{}", other))
                }
            }
        }
    }

    /// Get or create the client for a model.
    fn client_for(&self, model_name: &str) -> OratorioResult<Gemini> {
        let mut clients = self
            .clients
            .lock()
            .map_err(|_| GenerationError::new(GenerationErrorKind::Api("client pool poisoned".to_string())))?;
        if let Some(client) = clients.get(model_name) {
            return Ok(client.clone());
        }
        let client = Gemini::with_model(&self.api_key, Self::model_name_to_enum(model_name))
            .map_err(|e| GenerationError::new(GenerationErrorKind::Api(e.to_string())))?;
        clients.insert(model_name.to_string(), client.clone());
        Ok(client)
    }

    fn extract_text(input: &Input) -> Option<String> {
        match input {
            Input::Text(text) => Some(text.clone()),
            Input::Json(value) => serde_json::to_string_pretty(value).ok(),
        }
    }

    /// Formatting instruction appended when the caller asked for a shape.
    fn shape_instruction(shape: &Shape) -> String {
        let descriptor = serde_json::to_string(shape).unwrap_or_else(|_| "Any".to_string());
        format!(
            "Respond with JSON only, no prose and no code fences, \
             matching this shape descriptor: {}",
            descriptor
        )
    }
}

/// Strip markdown code fences that models wrap JSON responses in.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[async_trait]
impl OratorioDriver for GeminiDriver {
    #[tracing::instrument(skip(self, req), fields(model = req.model.as_deref().unwrap_or(&self.model_name)))]
    async fn generate(&self, req: &GenerateRequest) -> OratorioResult<GenerateResponse> {
        let model_name = req.model.as_deref().unwrap_or(&self.model_name);
        let client = self.client_for(model_name)?;

        let mut builder = client.generate_content();
        let mut system_prompt = None;

        for msg in &req.messages {
            match msg.role {
                Role::System => {
                    // Gemini uses a separate system prompt
                    if let Some(text) = msg.content.iter().find_map(Self::extract_text) {
                        system_prompt = Some(text);
                    }
                }
                Role::User => {
                    for input in &msg.content {
                        if let Some(text) = Self::extract_text(input) {
                            builder = builder.with_user_message(&text);
                        }
                    }
                }
                Role::Assistant => {
                    if let Some(text) = msg.content.iter().find_map(Self::extract_text) {
                        builder = builder.with_model_message(&text);
                    }
                }
            }
        }

        if let Some(prompt) = system_prompt {
            builder = builder.with_system_prompt(&prompt);
        }
        if let Some(shape) = &req.response_shape {
            builder = builder.with_user_message(&Self::shape_instruction(shape));
        }
        if let Some(temp) = req.temperature {
            builder = builder.with_temperature(temp);
        }
        if let Some(max_tokens) = req.max_tokens {
            builder = builder.with_max_output_tokens(max_tokens as i32);
        }

        let response = builder
            .execute()
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Api(e.to_string())))?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
        }

        let outputs = if req.response_shape.is_some() {
            let value: serde_json::Value =
                serde_json::from_str(strip_code_fences(&text)).map_err(|e| {
                    GenerationError::new(GenerationErrorKind::Malformed(format!(
                        "expected JSON response: {}",
                        e
                    )))
                })?;
            vec![Output::Json(value)]
        } else {
            vec![Output::Text(text)]
        };

        Ok(GenerateResponse { outputs })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_fences_are_stripped() {
        assert_eq!(strip_code_fences("```json\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  [3]  "), "[3]");
    }

    #[test]
    fn unknown_models_get_the_models_prefix() {
        match GeminiDriver::model_name_to_enum("gemini-1.5-flash") {
            Model::Custom(name) => assert_eq!(name, "models/gemini-1.5-flash"),
            other => panic!("expected Custom, got {:?}", other),
        }
    }
}
