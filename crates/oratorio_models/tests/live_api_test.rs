//! Tests that exercise the real provider APIs.
//!
//! Run with `cargo test -p oratorio_models --features api`; they are ignored
//! otherwise since they need provider keys and spend quota.

use futures_util::StreamExt;
use oratorio_core::{GenerateRequest, Message, Shape};
use oratorio_interface::{OratorioDriver, SpeechSynthesizer};
use oratorio_models::{ElevenLabsSynthesizer, GeminiDriver};

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)] // Requires GEMINI_API_KEY
async fn gemini_generates_text() {
    dotenvy::dotenv().ok();
    let driver = GeminiDriver::from_env().expect("Failed to create driver");

    let request = GenerateRequest {
        messages: vec![Message::user("Say 'ok'")],
        max_tokens: Some(10),
        ..Default::default()
    };
    let response = driver.generate(&request).await.expect("API call failed");
    assert!(!response.text().is_empty());
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)] // Requires GEMINI_API_KEY
async fn gemini_honors_a_response_shape() {
    dotenvy::dotenv().ok();
    let driver = GeminiDriver::from_env().expect("Failed to create driver");

    let request = GenerateRequest {
        messages: vec![Message::user("List three colors.")],
        response_shape: Some(Shape::Array(Box::new(Shape::String))),
        ..Default::default()
    };
    let response = driver.generate(&request).await.expect("API call failed");
    let value = response.json().expect("expected structured output");
    assert!(value.is_array());
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)] // Requires ELEVENLABS_API_KEY
async fn elevenlabs_streams_audio_bytes() {
    dotenvy::dotenv().ok();
    let synthesizer = ElevenLabsSynthesizer::from_env().expect("Failed to create synthesizer");

    let mut stream = synthesizer
        .synthesize("This is a short synthesis check.")
        .await
        .expect("API call failed");

    let mut total = 0usize;
    while let Some(piece) = stream.next().await {
        total += piece.expect("stream failed").len();
    }
    assert!(total > 0);
}
