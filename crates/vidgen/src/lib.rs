//! Generate short videos from text and image prompts.
//!
//! A [`SessionController`] ties together the generation pipeline, the
//! durable history store and the [`HandleRegistry`] that hands stored
//! videos to a presentation layer.
//!
//! # Example
//!
//! ```no_run
//! use vidgen::{AspectRatio, SessionController, SubmissionRequest, VidgenConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     vidgen::init_tracing("info")?;
//!     let config = VidgenConfig::from_env()?;
//!     let session = SessionController::from_config(&config).await?;
//!
//!     let request = SubmissionRequest::new("A koi pond in the rain", 5, AspectRatio::Landscape)?;
//!     let outcome = session.submit(request).await;
//!     println!("{:?}", outcome);
//!
//!     session.shutdown();
//!     Ok(())
//! }
//! ```

mod export;
mod handles;
mod session;

pub use export::export_video;
pub use handles::{HANDLE_URL_PREFIX, HandleRegistry, RenderableHandle, VideoPayload};
pub use session::{
    CLEAR_HISTORY_QUESTION, ClearOutcome, Confirmation, DisplayedResult, HistoryEntry,
    SessionController, SubmitOutcome,
};

pub use vidgen_core::{
    AspectRatio, ImageMime, PipelineState, PollPolicy, RecordId, SourceImage, StatusText,
    SubmissionRequest, UserMessage, VideoDetails, VidgenConfig, VidgenConfigBuilder,
    init_tracing, slugify, video_filename,
};
pub use vidgen_error::{
    RemoteFailure, StorageError, StorageErrorKind, StorageResult, VidgenError, VidgenErrorKind,
    VidgenResult,
};
pub use vidgen_models::{VeoClient, VideoGenerationApi};
pub use vidgen_pipeline::{
    GenerationPipeline, InlinePromptComposer, PipelineError, PromptComposer,
};
pub use vidgen_storage::{BlobStore, FsBlobStore, InMemoryBlobStore};
