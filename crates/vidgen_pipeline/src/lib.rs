//! The submit, poll and download pipeline for vidgen.
//!
//! [`GenerationPipeline`] drives one request through a
//! [`VideoGenerationApi`](vidgen_models::VideoGenerationApi) and translates
//! every failure into a [`UserMessage`](vidgen_core::UserMessage).

mod error;
mod messages;
mod pipeline;
mod prompt;

pub use error::PipelineError;
pub use messages::user_message;
pub use pipeline::{GenerationPipeline, ProgressObserver};
pub use prompt::{InlinePromptComposer, PromptComposer};
pub use vidgen_core::PollPolicy;
