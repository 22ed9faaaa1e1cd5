//! The session controller.

use crate::{HandleRegistry, RenderableHandle, VideoPayload, export_video};
use derive_getters::Getters;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use vidgen_core::{
    NewVideoRecord, PipelineState, RecordId, SubmissionRequest, UserMessage, VideoDetails,
    VideoRecord, VidgenConfig,
};
use vidgen_error::{StorageResult, VidgenResult};
use vidgen_models::VeoClient;
use vidgen_pipeline::GenerationPipeline;
use vidgen_storage::{BlobStore, FsBlobStore};

/// Question put to the user before history is cleared.
pub const CLEAR_HISTORY_QUESTION: &str =
    "Are you sure you want to clear your entire generation history? This action cannot be undone.";

/// Asks the user to confirm a destructive action.
///
/// Implemented for any `Fn(&str) -> bool` closure.
pub trait Confirmation: Send + Sync {
    /// Show `question`; true when the user agrees.
    fn confirm(&self, question: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

/// Result of [`SessionController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The video was generated, stored and is now displayed
    Completed(RecordId),
    /// The attempt ended with this message
    Failed(UserMessage),
    /// Another submission was already running; nothing happened
    Rejected,
}

/// Result of [`SessionController::clear_history`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Store and in-memory history are empty
    Cleared,
    /// The user declined; nothing changed
    Declined,
    /// The store could not be cleared; history is intact
    Failed,
}

/// One history item as held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct HistoryEntry {
    /// Store id
    id: RecordId,
    /// Prompt, duration, aspect ratio and timestamp
    details: VideoDetails,
    /// Handle minted when the entry entered memory
    handle: RenderableHandle,
}

/// The video currently presented.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct DisplayedResult {
    /// Handle to render
    handle: RenderableHandle,
    /// Prompt that produced it
    prompt: String,
    /// History record it belongs to; `None` for a video that could not be saved
    record_id: Option<RecordId>,
}

#[derive(Debug, Default)]
struct SessionState {
    pipeline_state: PipelineState,
    error: Option<UserMessage>,
    displayed: Option<DisplayedResult>,
    history: Vec<HistoryEntry>,
}

impl SessionState {
    /// Swap the displayed result, releasing a handle that history does not own.
    fn replace_displayed(&mut self, handles: &HandleRegistry, next: Option<DisplayedResult>) {
        if let Some(previous) = self.displayed.take() {
            if previous.record_id.is_none() {
                handles.release(&previous.handle);
            }
        }
        self.displayed = next;
    }
}

/// Owns one user's session: pipeline state, messages, displayed result and history.
///
/// Read accessors never wait on a running submission. At most one submission
/// runs at a time.
pub struct SessionController {
    store: Arc<dyn BlobStore>,
    pipeline: GenerationPipeline,
    handles: HandleRegistry,
    state: Arc<RwLock<SessionState>>,
    /// Held across a store write and the matching history update.
    history_sync: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("pipeline", &self.pipeline)
            .field("handles", &self.handles)
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Load history from `store` and begin a session.
    ///
    /// A load failure leaves history empty and records
    /// [`UserMessage::HistoryLoadFailed`].
    #[instrument(skip_all)]
    pub async fn start(store: Arc<dyn BlobStore>, pipeline: GenerationPipeline) -> Self {
        let handles = HandleRegistry::new();
        let mut state = SessionState::default();
        match store.list_all().await {
            Ok(records) => {
                state.history = records
                    .into_iter()
                    .map(|record| Self::admit(&handles, record))
                    .collect();
                info!(records = state.history.len(), "Loaded history");
            }
            Err(e) => {
                error!(error = %e, "Failed to load history");
                state.error = Some(UserMessage::HistoryLoadFailed);
            }
        }

        Self {
            store,
            pipeline,
            handles,
            state: Arc::new(RwLock::new(state)),
            history_sync: tokio::sync::Mutex::new(()),
        }
    }

    /// Open the filesystem store, build the Veo client and start a session.
    ///
    /// # Errors
    ///
    /// Fails when the data directory is unusable or the HTTP client cannot
    /// be built.
    #[instrument(skip_all, fields(data_dir = %config.data_dir().display(), model = %config.model()))]
    pub async fn from_config(config: &VidgenConfig) -> VidgenResult<Self> {
        let store = FsBlobStore::open(config.data_dir()).await?;
        let client = VeoClient::from_config(config)?;
        let pipeline = GenerationPipeline::new(Arc::new(client), config.poll_policy());
        Ok(Self::start(Arc::new(store), pipeline).await)
    }

    fn admit(handles: &HandleRegistry, record: VideoRecord) -> HistoryEntry {
        let (id, details, payload) = record.into_parts();
        HistoryEntry {
            id,
            details,
            handle: handles.acquire(VideoPayload::from(payload)),
        }
    }

    /// Run one submission to completion.
    ///
    /// Returns [`SubmitOutcome::Rejected`] without side effects when a
    /// submission is already running. The session is idle again when this
    /// returns.
    #[instrument(skip_all, fields(duration_secs = *request.duration_secs(), aspect_ratio = %request.aspect_ratio()))]
    pub async fn submit(&self, request: SubmissionRequest) -> SubmitOutcome {
        {
            let mut state = self.state.write();
            if !state.pipeline_state.is_idle() {
                debug!(state = %state.pipeline_state, "Submission already running");
                return SubmitOutcome::Rejected;
            }
            state.pipeline_state = PipelineState::Generating;
            state.error = None;
            state.replace_displayed(&self.handles, None);
        }

        let progress = Arc::clone(&self.state);
        let observer = move |next: PipelineState| {
            progress.write().pipeline_state = next;
        };
        let result = self.pipeline.run(&request, &observer).await;

        let outcome = match result {
            Ok(payload) => self.keep(&request, payload).await,
            Err(failure) => {
                self.state.write().error = Some(*failure.message());
                SubmitOutcome::Failed(*failure.message())
            }
        };

        self.state.write().pipeline_state = PipelineState::Idle;
        outcome
    }

    /// Persist a generated video, then display it.
    async fn keep(&self, request: &SubmissionRequest, payload: Vec<u8>) -> SubmitOutcome {
        let details = VideoDetails::new(
            request.prompt().clone(),
            *request.duration_secs(),
            *request.aspect_ratio(),
            chrono::Utc::now(),
        );
        let _sync = self.history_sync.lock().await;
        let saved = self
            .store
            .put(NewVideoRecord::new(details.clone(), payload.clone()))
            .await;
        let payload = VideoPayload::from(payload);

        match saved {
            Ok(id) => {
                let handle = self.handles.acquire(payload);
                let mut state = self.state.write();
                state.history.insert(
                    0,
                    HistoryEntry {
                        id,
                        details,
                        handle,
                    },
                );
                state.replace_displayed(
                    &self.handles,
                    Some(DisplayedResult {
                        handle,
                        prompt: request.prompt().clone(),
                        record_id: Some(id),
                    }),
                );
                info!(record_id = %id, "Video saved to history");
                SubmitOutcome::Completed(id)
            }
            Err(e) => {
                error!(error = %e, "Failed to save video");
                let handle = self.handles.acquire(payload);
                let mut state = self.state.write();
                state.replace_displayed(
                    &self.handles,
                    Some(DisplayedResult {
                        handle,
                        prompt: request.prompt().clone(),
                        record_id: None,
                    }),
                );
                state.error = Some(UserMessage::HistorySaveFailed);
                SubmitOutcome::Failed(UserMessage::HistorySaveFailed)
            }
        }
    }

    /// Clear history after asking `confirmation`.
    ///
    /// The store is cleared first; handles are released only once it
    /// succeeds. A clear that arrives while a generated video is being saved
    /// waits for the save to reach history, then removes it too.
    #[instrument(skip_all)]
    pub async fn clear_history(&self, confirmation: &dyn Confirmation) -> ClearOutcome {
        if !confirmation.confirm(CLEAR_HISTORY_QUESTION) {
            warn!("History clear declined");
            return ClearOutcome::Declined;
        }

        let _sync = self.history_sync.lock().await;

        if let Err(e) = self.store.clear().await {
            error!(error = %e, "Failed to clear history");
            self.state.write().error = Some(UserMessage::HistoryClearFailed);
            return ClearOutcome::Failed;
        }

        let mut state = self.state.write();
        for entry in state.history.drain(..) {
            self.handles.release(&entry.handle);
        }
        if state
            .displayed
            .as_ref()
            .is_some_and(|shown| shown.record_id.is_some())
        {
            state.displayed = None;
        }
        info!("History cleared");
        ClearOutcome::Cleared
    }

    /// Display a history item. Returns `false` for an unknown id.
    pub fn view_history_item(&self, id: RecordId) -> bool {
        let mut state = self.state.write();
        let Some(entry) = state.history.iter().find(|entry| entry.id == id) else {
            debug!(record_id = %id, "No such history item");
            return false;
        };
        let shown = DisplayedResult {
            handle: entry.handle,
            prompt: entry.details.prompt().clone(),
            record_id: Some(id),
        };
        state.replace_displayed(&self.handles, Some(shown));
        true
    }

    /// Stop displaying the current result.
    pub fn close_result(&self) {
        self.state.write().replace_displayed(&self.handles, None);
    }

    /// Clear the current message.
    pub fn dismiss_error(&self) {
        self.state.write().error = None;
    }

    /// Where the current submission is.
    pub fn pipeline_state(&self) -> PipelineState {
        self.state.read().pipeline_state
    }

    /// The message to show, if any.
    pub fn error(&self) -> Option<UserMessage> {
        self.state.read().error
    }

    /// The video being presented, if any.
    pub fn displayed(&self) -> Option<DisplayedResult> {
        self.state.read().displayed.clone()
    }

    /// History, newest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.state.read().history.clone()
    }

    /// Bytes behind a live handle.
    pub fn resolve(&self, handle: &RenderableHandle) -> Option<VideoPayload> {
        self.handles.resolve(handle)
    }

    /// The session's handle registry.
    pub fn handles(&self) -> &HandleRegistry {
        &self.handles
    }

    /// Save the displayed video into `dir`.
    ///
    /// Returns `None` when nothing is displayed.
    pub async fn export_displayed(&self, dir: &Path) -> StorageResult<Option<PathBuf>> {
        let Some(shown) = self.displayed() else {
            return Ok(None);
        };
        let Some(payload) = self.resolve(&shown.handle) else {
            return Ok(None);
        };
        export_video(&payload, &shown.prompt, dir).await.map(Some)
    }

    /// Save arbitrary video bytes into `dir`, named after `prompt`.
    pub async fn export_video(
        &self,
        payload: &[u8],
        prompt: &str,
        dir: &Path,
    ) -> StorageResult<PathBuf> {
        export_video(payload, prompt, dir).await
    }

    /// End the session, releasing every outstanding handle.
    #[instrument(skip_all)]
    pub fn shutdown(&self) -> usize {
        {
            let mut state = self.state.write();
            state.displayed = None;
            state.history.clear();
        }
        let released = self.handles.release_all();
        info!(released, "Session shut down");
        released
    }
}
