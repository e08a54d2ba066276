//! Shared types for the Watchly gallery
//!
//! Data shapes used by both the remote clients and the gallery core:
//! categories parsed from provider documents, asset keys, and the unified
//! error type.

pub mod error;
pub mod models;

pub use error::{GalleryError, GalleryResult};
pub use models::{AssetKey, Category, RawDocument};
