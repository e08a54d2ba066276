use crate::error::{GalleryError, GalleryResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker for assets shipped with the application bundle.
/// Keys containing it are always local and never hit the cache or network.
pub const BUNDLED_ASSET_MARKER: &str = "header-image";

/// A provider document with its fields decoded into plain JSON values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawDocument {
    /// Document id (the category title)
    pub id: String,
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl RawDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: serde_json::Map::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }
}

/// A category of watch faces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub is_premium: bool,
    pub items_count: u32,
}

impl Category {
    pub fn new(title: impl Into<String>, is_premium: bool, items_count: u32) -> Self {
        Self {
            title: title.into(),
            is_premium,
            items_count,
        }
    }

    /// Parse a category from a provider document.
    ///
    /// Requires `isPremium` (bool) and `itemsCount` (non-negative integer).
    /// The title is the document id and may be empty; callers filter those.
    pub fn try_from_document(doc: &RawDocument) -> GalleryResult<Self> {
        let malformed = |reason: &str| GalleryError::MalformedDocument {
            id: doc.id.clone(),
            reason: reason.to_string(),
        };

        let is_premium = doc
            .fields
            .get("isPremium")
            .and_then(|v| v.as_bool())
            .ok_or_else(|| malformed("missing boolean isPremium"))?;

        let items_count = doc
            .fields
            .get("itemsCount")
            .and_then(|v| v.as_u64())
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| malformed("missing non-negative integer itemsCount"))?;

        Ok(Self::new(doc.id.clone(), is_premium, items_count))
    }

    /// Parse a category, dropping malformed documents
    pub fn from_document(doc: &RawDocument) -> Option<Self> {
        Self::try_from_document(doc).ok()
    }

    /// Watch face identifier for a 0-based item index (items are numbered from 1)
    pub fn watch_face_id(&self, index: u32) -> String {
        format!("{}/{}", self.title, index + 1)
    }

    /// Asset key for a 0-based item index
    pub fn item_key(&self, index: u32) -> AssetKey {
        AssetKey::for_watch_face(&self.watch_face_id(index))
    }

    /// Keys shown in the carousel row
    pub fn row_keys(&self, max_row_items: u32) -> Vec<AssetKey> {
        (0..self.items_count.min(max_row_items))
            .map(|i| self.item_key(i))
            .collect()
    }

    /// Keys for the full "see all" grid
    pub fn all_keys(&self) -> Vec<AssetKey> {
        (0..self.items_count).map(|i| self.item_key(i)).collect()
    }

    /// Whether the row is truncated and needs a "See all" link
    pub fn has_see_all(&self, max_row_items: u32) -> bool {
        self.items_count > max_row_items
    }
}

/// Logical key identifying an image, e.g. `"Abstract/3.jpg"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetKey(String);

impl AssetKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key of the full-size image for a watch face id (`"<category>/<n>"`)
    pub fn for_watch_face(watch_face_id: &str) -> Self {
        Self(format!("{}.jpg", watch_face_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bundled assets are served from the app itself
    pub fn is_bundled(&self) -> bool {
        self.0.contains(BUNDLED_ASSET_MARKER)
    }

    /// Flat filename used for the on-disk copy
    pub fn cache_file_name(&self) -> String {
        self.0.replace(['/', '\\'], "_")
    }

    /// False when the flat filename would name the cache directory or its
    /// parent (`""`, `"."`, `".."`)
    pub fn has_cache_file_name(&self) -> bool {
        !matches!(self.cache_file_name().as_str(), "" | "." | "..")
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for AssetKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
