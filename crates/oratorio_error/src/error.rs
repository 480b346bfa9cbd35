//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, IoError, PipelineError, SpeechError};

/// The foundation error enum for the oratorio workspace.
///
/// # Examples
///
/// ```
/// use oratorio_error::{OratorioError, ConfigError};
///
/// let config_err = ConfigError::new("No output directory");
/// let err: OratorioError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum OratorioErrorKind {
    /// Pipeline construction or execution error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Text-generation capability error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Speech-synthesis capability error
    #[from(SpeechError)]
    Speech(SpeechError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Filesystem error
    #[from(IoError)]
    Io(IoError),
}

/// Oratorio error with kind discrimination.
///
/// # Examples
///
/// ```
/// use oratorio_error::{OratorioResult, SpeechError, SpeechErrorKind};
///
/// fn might_fail() -> OratorioResult<()> {
///     Err(SpeechError::new(SpeechErrorKind::Stream("reset".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Oratorio Error: {}", _0)]
pub struct OratorioError(Box<OratorioErrorKind>);

impl OratorioError {
    /// Create a new error from a kind.
    pub fn new(kind: OratorioErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &OratorioErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to OratorioErrorKind
impl<T> From<T> for OratorioError
where
    T: Into<OratorioErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for oratorio operations.
///
/// # Examples
///
/// ```
/// use oratorio_error::{OratorioResult, ConfigError};
///
/// fn voice_id() -> OratorioResult<String> {
///     Err(ConfigError::new("voice not configured"))?
/// }
/// ```
pub type OratorioResult<T> = std::result::Result<T, OratorioError>;
