//! Clients for the remote document store and blob store

pub mod firestore;
pub mod storage;

use async_trait::async_trait;
use watchly_common::{GalleryResult, RawDocument};

pub use firestore::FirestoreClient;
pub use storage::StorageClient;

/// Collection-style document query
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document of a collection in provider order
    async fn list_documents(&self, collection: &str) -> GalleryResult<Vec<RawDocument>>;
}

/// Get-by-key binary store
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the object stored under `key`, failing with `TooLarge` past `max_size` bytes
    async fn get_data(&self, key: &str, max_size: usize) -> GalleryResult<Vec<u8>>;
}
