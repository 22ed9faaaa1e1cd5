//! Crate-level error umbrella.

use crate::{ConfigError, GenerationError, HttpError, StorageError, ValidationError};

/// Error variants from every failure domain.
#[derive(Debug, derive_more::From)]
pub enum VidgenErrorKind {
    /// HTTP client error
    Http(HttpError),
    /// Configuration error
    Config(ConfigError),
    /// Durable storage error
    Storage(StorageError),
    /// Generation pipeline error
    Generation(GenerationError),
    /// Submission validation error
    Validation(ValidationError),
}

impl std::fmt::Display for VidgenErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VidgenErrorKind::Http(e) => write!(f, "{}", e),
            VidgenErrorKind::Config(e) => write!(f, "{}", e),
            VidgenErrorKind::Storage(e) => write!(f, "{}", e),
            VidgenErrorKind::Generation(e) => write!(f, "{}", e),
            VidgenErrorKind::Validation(e) => write!(f, "{}", e),
        }
    }
}

/// Vidgen error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vidgen_error::{ConfigError, VidgenError, VidgenErrorKind};
///
/// let err: VidgenError = ConfigError::new("missing model").into();
/// assert!(matches!(err.kind(), VidgenErrorKind::Config(_)));
/// ```
#[derive(Debug)]
pub struct VidgenError(Box<VidgenErrorKind>);

impl VidgenError {
    /// Create a new error from a kind.
    pub fn new(kind: VidgenErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VidgenErrorKind {
        &self.0
    }
}

impl std::fmt::Display for VidgenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vidgen Error: {}", self.0)
    }
}

impl std::error::Error for VidgenError {}

// Generic From implementation for any type that converts to VidgenErrorKind
impl<T> From<T> for VidgenError
where
    T: Into<VidgenErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for vidgen operations.
pub type VidgenResult<T> = std::result::Result<T, VidgenError>;
