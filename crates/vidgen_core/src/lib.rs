//! Core data types for the vidgen video generation client.
//!
//! This crate provides the data model shared by storage, the remote client,
//! the generation pipeline and the session controller.

mod aspect_ratio;
mod config;
mod image;
mod message;
mod observability;
mod policy;
mod record;
mod slug;
mod state;
mod submission;

pub use aspect_ratio::AspectRatio;
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MAX_POLL_WAIT_SECS, DEFAULT_MODEL, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, VidgenConfig, VidgenConfigBuilder,
};
pub use image::{ImageMime, MAX_IMAGE_BYTES, SourceImage};
pub use message::UserMessage;
pub use observability::init_tracing;
pub use policy::PollPolicy;
pub use record::{NewVideoRecord, RecordId, VideoDetails, VideoRecord};
pub use slug::{DEFAULT_FILE_STEM, MAX_SLUG_CHARS, slugify, video_filename};
pub use state::{PipelineState, StatusText};
pub use submission::{
    DEFAULT_DURATION_SECS, MAX_DURATION_SECS, MIN_DURATION_SECS, SubmissionRequest,
};
