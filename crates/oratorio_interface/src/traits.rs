//! Capability traits for generation and speech synthesis.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::Stream;
use oratorio_core::{GenerateRequest, GenerateResponse};
use oratorio_error::OratorioResult;
use std::pin::Pin;

/// A stream of audio bytes from a synthesis provider.
pub type ByteStream = Pin<Box<dyn Stream<Item = OratorioResult<Bytes>> + Send>>;

/// Core trait for text-generation backends.
///
/// This is the minimal interface the pipeline steps use to call a language
/// model. Providers are free to interpret `GenerateRequest.response_shape`
/// however their API allows; callers must still validate the result against
/// their own contracts.
#[async_trait]
pub trait OratorioDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> OratorioResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier used when a request names none.
    fn model_name(&self) -> &str;
}

/// Trait for text-to-speech backends.
///
/// Implementations return the provider's audio byte stream; the caller is
/// responsible for draining it. Input-size limits are handled above this
/// seam by the chunked synthesizer.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Convert one piece of text to a stream of audio bytes.
    async fn synthesize(&self, text: &str) -> OratorioResult<ByteStream>;

    /// Provider name (e.g., "elevenlabs").
    fn provider_name(&self) -> &'static str;

    /// Voice identifier used for synthesis.
    fn voice(&self) -> &str;
}
