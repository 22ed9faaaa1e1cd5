//! HTTP error types.

/// HTTP client error with source location.
///
/// Covers building the HTTP client only. Failures of individual remote
/// calls are classified as [`RemoteFailure`](crate::RemoteFailure) and
/// carried by [`GenerationError`](crate::GenerationError).
#[derive(Debug, Clone)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use vidgen_error::{HttpError, VidgenError, VidgenErrorKind};
    ///
    /// let err = HttpError::new("TLS backend unavailable");
    /// assert!(err.message.contains("TLS"));
    /// assert!(err.to_string().starts_with("HTTP Error: TLS backend unavailable at line"));
    ///
    /// let err: VidgenError = err.into();
    /// assert!(matches!(err.kind(), VidgenErrorKind::Http(_)));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HTTP Error: {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for HttpError {}
