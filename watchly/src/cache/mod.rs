//! Caching layer for watch face images

pub mod asset_cache;
pub mod tile_loader;

pub use asset_cache::AssetCache;
pub use tile_loader::{TileLoader, TileResult};
