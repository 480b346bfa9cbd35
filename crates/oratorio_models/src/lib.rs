//! Concrete capability providers for oratorio.
//!
//! - [`GeminiDriver`] implements the generation capability against the
//!   Google Gemini API.
//! - [`ElevenLabsSynthesizer`] implements the speech-synthesis capability
//!   against the ElevenLabs streaming TTS API.
//! - [`MockDriver`] and [`MockSynthesizer`] are scripted in-memory fakes
//!   for tests and offline runs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod elevenlabs;
mod gemini;
mod mock;

pub use elevenlabs::{ElevenLabsConfig, ElevenLabsSynthesizer};
pub use gemini::GeminiDriver;
pub use mock::{MockDriver, MockReply, MockSynthesizer};
