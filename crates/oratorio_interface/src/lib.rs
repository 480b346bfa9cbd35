//! Trait definitions for the capabilities the oratorio pipeline consumes.
//!
//! The pipeline engine and the chunked synthesizer never talk to a provider
//! API directly; they go through the seams defined here. Concrete providers
//! live in `oratorio_models`, fakes used by tests live there too.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ByteStream, OratorioDriver, SpeechSynthesizer};
