//! Chunked speech synthesis.

use crate::chunk::chunk_text;
use futures_util::StreamExt;
use oratorio_error::OratorioResult;
use oratorio_interface::SpeechSynthesizer;

/// Converts arbitrarily long text to one audio byte buffer by synthesizing
/// sentence-aligned chunks in order.
///
/// Chunk N+1 is not dispatched until chunk N's response stream is fully
/// drained, which bounds in-flight memory to roughly one chunk's audio.
/// Any per-chunk fault aborts the whole call; there is no partial output.
///
/// # Examples
///
/// ```ignore
/// let synthesizer = ChunkedSynthesizer::new(ElevenLabsSynthesizer::from_env()?);
/// let audio = synthesizer.synthesize(&script).await?;
/// std::fs::write("narration.mp3", &audio)?;
/// ```
#[derive(Debug)]
pub struct ChunkedSynthesizer<S: SpeechSynthesizer> {
    synthesizer: S,
}

impl<S: SpeechSynthesizer> ChunkedSynthesizer<S> {
    /// Wrap a synthesis backend.
    pub fn new(synthesizer: S) -> Self {
        Self { synthesizer }
    }

    /// Get a reference to the underlying synthesis backend.
    pub fn inner(&self) -> &S {
        &self.synthesizer
    }

    /// Synthesize text into a single audio byte buffer.
    ///
    /// # Errors
    ///
    /// Fails if any chunk's synthesis call or response stream fails.
    #[tracing::instrument(skip(self, text), fields(provider = self.synthesizer.provider_name(), text_len = text.len()))]
    pub async fn synthesize(&self, text: &str) -> OratorioResult<Vec<u8>> {
        let chunks = chunk_text(text);
        tracing::debug!(chunk_count = chunks.len(), "Synthesizing chunked text");

        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let mut stream = self.synthesizer.synthesize(chunk).await?;
            let mut chunk_bytes = 0usize;
            while let Some(piece) = stream.next().await {
                let piece = piece?;
                chunk_bytes += piece.len();
                audio.extend_from_slice(&piece);
            }
            tracing::debug!(
                chunk = index,
                chunk_len = chunk.len(),
                audio_bytes = chunk_bytes,
                "Chunk synthesized"
            );
        }

        Ok(audio)
    }
}
