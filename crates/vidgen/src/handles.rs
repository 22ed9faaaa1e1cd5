//! Process-local handles for rendering stored videos.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Scheme and authority of every handle URL.
pub const HANDLE_URL_PREFIX: &str = "blob:vidgen/";

/// Shared, immutable video bytes.
pub type VideoPayload = Arc<[u8]>;

/// A reference a presentation layer renders instead of re-reading storage.
///
/// Displays as its URL, `blob:vidgen/<uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("blob:vidgen/{}", id)]
pub struct RenderableHandle {
    id: Uuid,
}

impl RenderableHandle {
    /// Unique id of this handle.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The opaque URL string.
    pub fn url(&self) -> String {
        self.to_string()
    }
}

#[derive(Default)]
struct Registry {
    live: HashMap<RenderableHandle, VideoPayload>,
    acquired_total: u64,
    released_total: u64,
}

/// Mints and invalidates [`RenderableHandle`]s.
///
/// Cloning shares the registry. Release is idempotent: only the first
/// release of a handle counts.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vidgen::HandleRegistry;
///
/// let registry = HandleRegistry::new();
/// let handle = registry.acquire(Arc::from(vec![1u8, 2, 3]));
/// assert!(handle.url().starts_with("blob:vidgen/"));
/// assert_eq!(registry.resolve(&handle).as_deref(), Some(&[1u8, 2, 3][..]));
///
/// assert!(registry.release(&handle));
/// assert!(!registry.release(&handle));
/// assert!(registry.resolve(&handle).is_none());
/// ```
#[derive(Clone, Default)]
pub struct HandleRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for HandleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.inner.lock();
        f.debug_struct("HandleRegistry")
            .field("outstanding", &registry.live.len())
            .field("acquired_total", &registry.acquired_total)
            .field("released_total", &registry.released_total)
            .finish()
    }
}

impl HandleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payload and return a fresh handle for it.
    pub fn acquire(&self, payload: VideoPayload) -> RenderableHandle {
        let handle = RenderableHandle { id: Uuid::new_v4() };
        let mut registry = self.inner.lock();
        registry.live.insert(handle, payload);
        registry.acquired_total += 1;
        debug!(handle = %handle, outstanding = registry.live.len(), "Acquired handle");
        handle
    }

    /// Invalidate a handle. Returns `false` if it was already released.
    pub fn release(&self, handle: &RenderableHandle) -> bool {
        let mut registry = self.inner.lock();
        if registry.live.remove(handle).is_some() {
            registry.released_total += 1;
            debug!(handle = %handle, outstanding = registry.live.len(), "Released handle");
            true
        } else {
            warn!(handle = %handle, "Handle already released");
            false
        }
    }

    /// The payload behind a live handle.
    pub fn resolve(&self, handle: &RenderableHandle) -> Option<VideoPayload> {
        self.inner.lock().live.get(handle).cloned()
    }

    /// Release every live handle, returning how many were released.
    pub fn release_all(&self) -> usize {
        let mut registry = self.inner.lock();
        let released = registry.live.len();
        registry.live.clear();
        registry.released_total += released as u64;
        debug!(released, "Released all handles");
        released
    }

    /// Number of live handles.
    pub fn outstanding(&self) -> usize {
        self.inner.lock().live.len()
    }

    /// Handles minted over the registry's lifetime.
    pub fn acquired_total(&self) -> u64 {
        self.inner.lock().acquired_total
    }

    /// Handles released over the registry's lifetime.
    pub fn released_total(&self) -> u64 {
        self.inner.lock().released_total
    }
}
