//! Integration tests for chunked synthesis over a scripted backend.

use oratorio_models::MockSynthesizer;
use oratorio_speech::{ChunkedSynthesizer, MAX_CHUNK_LENGTH, chunk_text};
use std::time::Duration;

/// Text long enough to split into several chunks.
fn multi_chunk_text() -> String {
    let sentence = format!("{}.", "s".repeat(MAX_CHUNK_LENGTH / 2));
    format!("{s} {s} {s} {s}", s = sentence)
}

#[tokio::test]
async fn audio_concatenates_in_chunk_order() {
    let text = multi_chunk_text();
    let chunks = chunk_text(&text);
    assert!(chunks.len() > 1);

    let synthesizer = ChunkedSynthesizer::new(MockSynthesizer::new());
    let audio = synthesizer.synthesize(&text).await.unwrap();

    let expected: String = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| format!("<{}:{}>", i, chunk.len()))
        .collect();
    assert_eq!(audio, expected.into_bytes());
    assert_eq!(synthesizer.inner().calls(), chunks);
}

#[tokio::test]
async fn output_length_is_the_sum_of_chunk_audio() {
    let text = multi_chunk_text();
    let chunks = chunk_text(&text);

    let synthesizer = ChunkedSynthesizer::new(MockSynthesizer::new());
    let audio = synthesizer.synthesize(&text).await.unwrap();

    let expected_len: usize = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| format!("<{}:{}>", i, chunk.len()).len())
        .sum();
    assert_eq!(audio.len(), expected_len);
}

#[tokio::test]
async fn short_text_makes_exactly_one_call() {
    let synthesizer = ChunkedSynthesizer::new(MockSynthesizer::new());
    let audio = synthesizer.synthesize("One short sentence.").await.unwrap();

    assert_eq!(audio, b"<0:19>");
    assert_eq!(synthesizer.inner().calls().len(), 1);
}

#[tokio::test]
async fn order_is_preserved_with_slow_streams() {
    let text = multi_chunk_text();
    let chunks = chunk_text(&text);

    let backend = MockSynthesizer::new().with_delay(Duration::from_millis(5));
    let synthesizer = ChunkedSynthesizer::new(backend);
    let audio = synthesizer.synthesize(&text).await.unwrap();

    let expected: String = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| format!("<{}:{}>", i, chunk.len()))
        .collect();
    assert_eq!(audio, expected.into_bytes());
}

#[tokio::test]
async fn chunk_failure_aborts_the_whole_call() {
    let text = multi_chunk_text();
    let chunks = chunk_text(&text);
    assert!(chunks.len() >= 2);

    let backend = MockSynthesizer::new().failing_at(1);
    let synthesizer = ChunkedSynthesizer::new(backend);

    let err = synthesizer.synthesize(&text).await.unwrap_err();
    assert!(err.to_string().contains("scripted failure"));
    // Fail-fast: chunks after the faulting one are never dispatched
    assert_eq!(synthesizer.inner().calls().len(), 2);
}
