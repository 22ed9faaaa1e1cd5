//! Generation pipeline error types.

use crate::RemoteFailure;

/// Conditions that end a generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The remote service rejected a submit or poll call
    #[display("Submission rejected: {}", _0)]
    Submission(RemoteFailure),
    /// The job completed without a result URI
    #[display("Completed job carried no video URI")]
    MissingArtifact,
    /// Fetching the finished video failed
    #[display("Video download failed: {}", message)]
    Download {
        /// HTTP status code, when a response was received
        status: Option<u16>,
        /// Error message
        message: String,
    },
    /// The poll policy gave up before the job completed
    #[display("Job still running after {} polls", attempts)]
    PollTimeout {
        /// Number of polls issued
        attempts: u32,
    },
    /// A response body could not be decoded
    #[display("Malformed response: {}", _0)]
    Decode(String),
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use vidgen_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingArtifact);
/// assert!(format!("{}", err).contains("no video URI"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
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

    /// Shorthand for a classified remote rejection.
    #[track_caller]
    pub fn remote(failure: RemoteFailure) -> Self {
        Self::new(GenerationErrorKind::Submission(failure))
    }
}

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
