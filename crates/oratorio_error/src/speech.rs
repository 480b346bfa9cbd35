//! Speech synthesis error types.

/// Specific error conditions for the text-to-speech capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SpeechErrorKind {
    /// API key environment variable is absent
    #[display("Missing API key: {}", _0)]
    MissingApiKey(String),
    /// The synthesis API returned an error status
    #[display("Synthesis API returned {}: {}", status, message)]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or description
        message: String,
    },
    /// The streamed response failed while being drained
    #[display("Synthesis stream failed: {}", _0)]
    Stream(String),
    /// Speech conversion failed for a chunk
    #[display("Synthesis failed: {}", _0)]
    Synthesis(String),
}

/// Error type for the speech synthesis capability.
///
/// # Examples
///
/// ```
/// use oratorio_error::{SpeechError, SpeechErrorKind};
///
/// let err = SpeechError::new(SpeechErrorKind::Http {
///     status: 401,
///     message: "invalid xi-api-key".to_string(),
/// });
/// assert!(format!("{}", err).contains("401"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Speech Error: {} at line {} in {}", kind, line, file)]
pub struct SpeechError {
    /// The specific error condition
    pub kind: SpeechErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SpeechError {
    /// Create a new SpeechError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SpeechErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
