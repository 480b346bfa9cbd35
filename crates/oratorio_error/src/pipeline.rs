//! Pipeline error types.

/// Specific error conditions for pipeline construction and execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Misuse of the registration/commit API
    #[display("Configuration error: {}", _0)]
    Configuration(String),
    /// A payload failed its declared shape
    #[display("Validation failed for {}: {}", location, message)]
    Validation {
        /// What was being validated ("trigger", a step input, a step output)
        location: String,
        /// Shape mismatch description
        message: String,
    },
    /// A step could not find a required predecessor output
    #[display("Step '{}' is missing dependency '{}'", step, key)]
    MissingDependency {
        /// The step whose input could not be resolved
        step: String,
        /// The absent result-store key
        key: String,
    },
    /// A step's execution function faulted
    #[display("Step '{}' failed: {}", step, message)]
    StepExecution {
        /// The step that faulted
        step: String,
        /// The underlying cause
        message: String,
    },
}

impl PipelineErrorKind {
    /// Name of the step this error is attached to, if any.
    pub fn step(&self) -> Option<&str> {
        match self {
            Self::Configuration(_) | Self::Validation { .. } => None,
            Self::MissingDependency { step, .. } | Self::StepExecution { step, .. } => {
                Some(step.as_str())
            }
        }
    }
}

/// Error type for pipeline operations.
///
/// # Examples
///
/// ```
/// use oratorio_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::Configuration(
///     "cannot register a step after commit".to_string(),
/// ));
/// assert!(format!("{}", err).contains("after commit"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
