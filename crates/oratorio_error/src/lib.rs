//! Error types for the oratorio narrated-audio pipeline.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use oratorio_error::{OratorioResult, ConfigError};
//!
//! fn load_voice() -> OratorioResult<String> {
//!     Err(ConfigError::new("ELEVENLABS_VOICE_ID is not set"))?
//! }
//!
//! match load_voice() {
//!     Ok(voice) => println!("Voice: {}", voice),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod io;
mod pipeline;
mod speech;

pub use config::ConfigError;
pub use error::{OratorioError, OratorioErrorKind, OratorioResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use io::IoError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use speech::{SpeechError, SpeechErrorKind};
