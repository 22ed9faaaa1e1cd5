//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// The host environment denied access to durable storage
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
    /// A record could not be written (quota, I/O, or clear failure)
    #[display("Write failed: {}", _0)]
    Write(String),
    /// Stored records could not be read back (corruption or I/O)
    #[display("Read failed: {}", _0)]
    Read(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use vidgen_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Read("truncated record".to_string()));
/// assert!(format!("{}", err).contains("truncated record"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
