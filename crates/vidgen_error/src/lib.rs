//! Error types for the vidgen video generation client.
//!
//! Every failure domain gets a `…ErrorKind` describing the condition and a
//! location-tracking error struct. [`VidgenError`] unifies them at the
//! facade boundary.

mod config;
mod error;
mod generation;
mod http;
mod remote;
mod storage;
mod validation;

pub use config::ConfigError;
pub use error::{VidgenError, VidgenErrorKind, VidgenResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use http::HttpError;
pub use remote::RemoteFailure;
pub use storage::{StorageError, StorageErrorKind, StorageResult};
pub use validation::{ValidationError, ValidationErrorKind};
