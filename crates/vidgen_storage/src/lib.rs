//! Durable history storage for generated videos.
//!
//! [`BlobStore`] is the contract; [`FsBlobStore`] persists to a directory
//! and [`InMemoryBlobStore`] keeps records for the life of the process.

mod fs;
mod memory;
mod store;

pub use fs::{CONTAINER_NAME, CONTAINER_VERSION, FsBlobStore};
pub use memory::InMemoryBlobStore;
pub use store::{BlobStore, sort_newest_first};
