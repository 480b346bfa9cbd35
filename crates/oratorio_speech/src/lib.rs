//! Sentence-aligned chunking and chunked speech synthesis.
//!
//! Speech-synthesis APIs bound the size of a single request. This crate
//! splits arbitrarily long text into sentence-aligned chunks under that
//! bound, synthesizes each chunk in order through a [`SpeechSynthesizer`],
//! and concatenates the audio byte streams into one buffer.
//!
//! [`SpeechSynthesizer`]: oratorio_interface::SpeechSynthesizer

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod synthesizer;

pub use chunk::{MAX_CHUNK_LENGTH, chunk_text};
pub use synthesizer::ChunkedSynthesizer;
