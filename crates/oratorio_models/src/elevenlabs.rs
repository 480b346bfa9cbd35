//! ElevenLabs streaming text-to-speech synthesizer.

use async_trait::async_trait;
use futures_util::StreamExt;
use serde_json::json;
use std::env;

use oratorio_error::{OratorioResult, SpeechError, SpeechErrorKind};
use oratorio_interface::{ByteStream, SpeechSynthesizer};

const API_BASE: &str = "https://api.elevenlabs.io/v1";
const DEFAULT_VOICE_ID: &str = "1SM7GgM6IMuvQlz2BwM3";
const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";
const DEFAULT_OUTPUT_FORMAT: &str = "mp3_44100_128";

/// Connection settings for the ElevenLabs API.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    /// API key sent in the `xi-api-key` header
    pub api_key: String,
    /// Voice to synthesize with
    pub voice_id: String,
    /// Synthesis model
    pub model_id: String,
    /// Encoded audio format of the response
    pub output_format: String,
}

impl ElevenLabsConfig {
    /// Read settings from the environment.
    ///
    /// `ELEVENLABS_API_KEY` is required; `ELEVENLABS_VOICE_ID` overrides the
    /// default voice.
    pub fn from_env() -> OratorioResult<Self> {
        let api_key = env::var("ELEVENLABS_API_KEY").map_err(|_| {
            SpeechError::new(SpeechErrorKind::MissingApiKey(
                "ELEVENLABS_API_KEY".to_string(),
            ))
        })?;
        let voice_id =
            env::var("ELEVENLABS_VOICE_ID").unwrap_or_else(|_| DEFAULT_VOICE_ID.to_string());
        Ok(Self {
            api_key,
            voice_id,
            model_id: DEFAULT_MODEL_ID.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        })
    }
}

/// Speech synthesizer backed by the ElevenLabs streaming TTS endpoint.
///
/// One [`synthesize`] call issues one streaming request; input-size limits
/// are the caller's concern (see `oratorio_speech::ChunkedSynthesizer`).
///
/// [`synthesize`]: SpeechSynthesizer::synthesize
#[derive(Debug, Clone)]
pub struct ElevenLabsSynthesizer {
    client: reqwest::Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsSynthesizer {
    /// Create a synthesizer from environment configuration.
    pub fn from_env() -> OratorioResult<Self> {
        Ok(Self::new(ElevenLabsConfig::from_env()?))
    }

    /// Create a synthesizer with explicit configuration.
    pub fn new(config: ElevenLabsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    #[tracing::instrument(skip(self, text), fields(voice = %self.config.voice_id, text_len = text.len()))]
    async fn synthesize(&self, text: &str) -> OratorioResult<ByteStream> {
        let url = format!(
            "{}/text-to-speech/{}/stream",
            API_BASE, self.config.voice_id
        );

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .query(&[("output_format", self.config.output_format.as_str())])
            .json(&json!({
                "text": text,
                "model_id": self.config.model_id,
            }))
            .send()
            .await
            .map_err(|e| SpeechError::new(SpeechErrorKind::Synthesis(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SpeechError::new(SpeechErrorKind::Http {
                status: status.as_u16(),
                message,
            })
            .into());
        }

        let stream = response.bytes_stream().map(|piece| -> OratorioResult<bytes::Bytes> {
            piece.map_err(|e| SpeechError::new(SpeechErrorKind::Stream(e.to_string())).into())
        });
        Ok(Box::pin(stream))
    }

    fn provider_name(&self) -> &'static str {
        "elevenlabs"
    }

    fn voice(&self) -> &str {
        &self.config.voice_id
    }
}
