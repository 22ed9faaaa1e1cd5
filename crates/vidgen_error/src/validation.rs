//! Submission validation errors.

/// Reasons a submission is refused before it reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Prompt is empty after trimming whitespace
    #[display("Prompt must not be empty")]
    EmptyPrompt,
    /// Duration outside the accepted range
    #[display("Duration {}s outside {}..={}s", value, min, max)]
    DurationOutOfRange {
        /// Requested duration in seconds
        value: u32,
        /// Smallest accepted duration
        min: u32,
        /// Largest accepted duration
        max: u32,
    },
    /// Source image exceeds the byte ceiling
    #[display("Image is {} bytes, limit is {}", size, limit)]
    ImageTooLarge {
        /// Image size in bytes
        size: usize,
        /// Maximum accepted size in bytes
        limit: usize,
    },
    /// Source image MIME type is not accepted
    #[display("Unsupported image type: {}", _0)]
    UnsupportedImageType(String),
    /// Aspect ratio text not recognized
    #[display("Unknown aspect ratio: {}", _0)]
    UnknownAspectRatio(String),
}

/// Validation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
