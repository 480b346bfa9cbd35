//! Scripted in-memory providers for tests and offline runs.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use oratorio_core::{GenerateRequest, GenerateResponse, Output};
use oratorio_error::{
    GenerationError, GenerationErrorKind, OratorioResult, SpeechError, SpeechErrorKind,
};
use oratorio_interface::{ByteStream, OratorioDriver, SpeechSynthesizer};

/// One scripted reply for a [`MockDriver`].
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Reply with a text output
    Text(String),
    /// Reply with a structured output
    Json(Value),
    /// Fail the call with an API error carrying this message
    Failure(String),
}

/// Generation driver that replays a scripted queue of replies.
///
/// Each `generate` call pops the next reply; an exhausted queue fails with
/// an empty-response error. Received requests are recorded and can be
/// inspected with [`requests`](MockDriver::requests).
#[derive(Debug, Default)]
pub struct MockDriver {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockDriver {
    /// Create a driver with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver scripted with the given replies, in call order.
    pub fn with_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue one more reply.
    pub fn push_reply(&self, reply: MockReply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl OratorioDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> OratorioResult<GenerateResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(req.clone());
        }
        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front());
        match reply {
            Some(MockReply::Text(text)) => Ok(GenerateResponse {
                outputs: vec![Output::Text(text)],
            }),
            Some(MockReply::Json(value)) => Ok(GenerateResponse {
                outputs: vec![Output::Json(value)],
            }),
            Some(MockReply::Failure(message)) => {
                Err(GenerationError::new(GenerationErrorKind::Api(message)).into())
            }
            None => Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Speech synthesizer that emits deterministic placeholder audio.
///
/// Call N (zero-based) for a text of length L yields the bytes of
/// `"<N:L>"`, so tests can assert both call order and per-chunk sizing
/// from the concatenated output. Received texts are recorded and can be
/// inspected with [`calls`](MockSynthesizer::calls).
#[derive(Debug, Default)]
pub struct MockSynthesizer {
    calls: Mutex<Vec<String>>,
    /// Sleep this long inside each returned stream
    delay: Option<Duration>,
    /// Fail the call with this zero-based index, if set
    fail_at: Option<usize>,
}

impl MockSynthesizer {
    /// Create a synthesizer that succeeds on every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay each returned stream, to exercise ordering under concurrency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the call with the given zero-based index.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Texts received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str) -> OratorioResult<ByteStream> {
        let index = match self.calls.lock() {
            Ok(mut calls) => {
                calls.push(text.to_string());
                calls.len() - 1
            }
            Err(_) => 0,
        };
        if self.fail_at == Some(index) {
            return Err(SpeechError::new(SpeechErrorKind::Synthesis(format!(
                "scripted failure at call {}",
                index
            )))
            .into());
        }
        let tag = Bytes::from(format!("<{}:{}>", index, text.len()));
        let delay = self.delay;
        let stream = stream::once(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            Ok::<Bytes, oratorio_error::OratorioError>(tag)
        });
        Ok(Box::pin(stream))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn voice(&self) -> &str {
        "mock-voice"
    }
}
