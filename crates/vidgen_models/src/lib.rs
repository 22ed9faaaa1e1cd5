//! Remote video generation integrations for vidgen.
//!
//! [`VideoGenerationApi`] is the contract the pipeline drives;
//! [`VeoClient`] implements it against Google's Veo models.

mod api;
pub mod veo;

pub use api::{
    GenerationJob, InlineImage, JobHandle, RemoteSubmission, RemoteSubmissionBuilder,
    RemoteSubmissionBuilderError, VideoGenerationApi,
};
pub use veo::VeoClient;
pub use veo::classify::{classify_filtered, classify_http, classify_status};
