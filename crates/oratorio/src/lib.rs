//! Oratorio - topic in, narrated audio out.
//!
//! Oratorio turns a free-text topic into a narrated audio file. A language
//! model outlines chapters, drafts a script from the outline, and edits the
//! script for engagement; the edited script is then converted to speech in
//! sentence-aligned chunks and written to disk.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use oratorio::{ChunkedSynthesizer, ScriptRequest, Style, narration};
//! use oratorio_models::{ElevenLabsSynthesizer, GeminiDriver};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let driver = Arc::new(GeminiDriver::from_env()?);
//!     let synthesizer = ElevenLabsSynthesizer::from_env()?;
//!     let pipeline = narration::narration_pipeline(driver, synthesizer, ".".into())?;
//!
//!     let request = ScriptRequest::new("starting a startup")
//!         .with_length(500)
//!         .with_style(Style::Casual);
//!     let outcome = pipeline.run(request.to_value()).await?.into_result()?;
//!     println!("{:?}", outcome.output(narration::AUDIO_STEP));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Oratorio is organized as a workspace with focused crates:
//!
//! - `oratorio_core` - Payload types and shape contracts
//! - `oratorio_interface` - Generation and synthesis trait seams
//! - `oratorio_error` - Error types
//! - `oratorio_pipeline` - Step-pipeline execution engine
//! - `oratorio_speech` - Sentence-aligned chunking and chunked synthesis
//! - `oratorio_models` - Gemini and ElevenLabs providers, plus mocks
//!
//! This crate (`oratorio`) wires the narration pipeline together and
//! re-exports everything for convenience.

// Re-export workspace crates
pub use oratorio_core::*;
pub use oratorio_error::*;
pub use oratorio_interface::*;
pub use oratorio_pipeline::*;
pub use oratorio_speech::*;

pub mod narration;
pub mod persistence;
pub mod telemetry;
