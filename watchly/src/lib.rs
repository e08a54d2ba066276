//! Watchly - watch face gallery core
//!
//! Lists watch face categories from Firestore, serves their images through a
//! write-once disk cache in front of Firebase Storage, and gates premium
//! categories behind an entitlement check.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod entitlement;
pub mod preferences;
pub mod remote;
pub mod settings;
pub mod state;

use std::sync::Arc;

// Re-export commonly used items
pub use cache::{AssetCache, TileLoader, TileResult};
pub use catalog::CatalogProvider;
pub use config::AppConfig;
pub use entitlement::{decide, EntitlementGate, GateDecision, Selection};
pub use preferences::EntitlementState;
pub use remote::{BlobStore, DocumentStore, FirestoreClient, StorageClient};
pub use settings::{settings_sections, SettingsAction, SettingsSection};
pub use state::{AppState, FullScreen, StateChange, Tab};
pub use watchly_common::{AssetKey, Category, GalleryError, GalleryResult};

/// Catalog backed by the configured Firestore project
pub fn catalog_from_config(config: &AppConfig) -> CatalogProvider {
    let store = FirestoreClient::new(&config.firestore_url, &config.project_id);
    CatalogProvider::new(Arc::new(store), &config.collection)
}

/// Asset cache backed by the configured storage bucket
pub fn asset_cache_from_config(config: &AppConfig) -> AssetCache {
    let remote = StorageClient::new(&config.storage_url, &config.storage_bucket);
    AssetCache::new(&config.cache_dir, Arc::new(remote), config.max_asset_bytes)
}
