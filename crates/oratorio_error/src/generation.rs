//! Generation (LLM) error types.

/// Specific error conditions for the text-generation capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key environment variable is absent
    #[display("Missing API key: {}", _0)]
    MissingApiKey(String),
    /// The provider API rejected or failed the request
    #[display("Generation API request failed: {}", _0)]
    Api(String),
    /// The provider returned no usable output
    #[display("Generation returned an empty response")]
    EmptyResponse,
    /// The provider returned output that does not parse as requested
    #[display("Malformed generation output: {}", _0)]
    Malformed(String),
}

/// Error type for the generation capability.
///
/// # Examples
///
/// ```
/// use oratorio_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::EmptyResponse);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
