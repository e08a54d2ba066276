//! Application configuration
//!
//! Defaults match the shipped app; deployment-specific values can be
//! overridden through `WATCHLY_*` environment variables.

use std::path::PathBuf;

/// Maximum accepted payload for a single remote asset (1 MiB)
pub const DEFAULT_MAX_ASSET_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // Settings flow items
    pub support_email: String,
    pub privacy_url: String,
    pub terms_url: String,
    pub app_url: String,

    /// Items shown per carousel row before "See all"
    pub max_row_items: u32,

    /// Paywall campaign shown for locked items and "Upgrade Premium"
    pub paywall_event: String,

    // Remote backend
    pub project_id: String,
    pub storage_bucket: String,
    pub collection: String,
    pub firestore_url: String,
    pub storage_url: String,

    // Local storage
    pub cache_dir: PathBuf,
    pub preferences_path: PathBuf,
    pub max_asset_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let project_id = "watchly-app".to_string();
        Self {
            support_email: "menzilcim@gmail.com".to_string(),
            privacy_url: "https://muratworks.com/?p=69".to_string(),
            terms_url: "https://muratworks.com/?p=71".to_string(),
            app_url: "https://apps.apple.com/app/id6470202238".to_string(),
            max_row_items: 5,
            paywall_event: "campaign_trigger".to_string(),
            storage_bucket: format!("{}.appspot.com", project_id),
            project_id,
            collection: "WatchCollections".to_string(),
            firestore_url: "https://firestore.googleapis.com".to_string(),
            storage_url: "https://firebasestorage.googleapis.com".to_string(),
            cache_dir: default_cache_dir(),
            preferences_path: default_preferences_path(),
            max_asset_bytes: DEFAULT_MAX_ASSET_BYTES,
        }
    }
}

impl AppConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok());
        config
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(project) = get("WATCHLY_PROJECT_ID") {
            self.project_id = project;
        }
        if let Some(bucket) = get("WATCHLY_STORAGE_BUCKET") {
            self.storage_bucket = bucket;
        }
        if let Some(url) = get("WATCHLY_FIRESTORE_URL") {
            self.firestore_url = url;
        }
        if let Some(url) = get("WATCHLY_STORAGE_URL") {
            self.storage_url = url;
        }
        if let Some(dir) = get("WATCHLY_CACHE_DIR") {
            self.cache_dir = PathBuf::from(dir);
        }
        if let Some(path) = get("WATCHLY_PREFERENCES") {
            self.preferences_path = PathBuf::from(path);
        }
        if let Some(max) = get("WATCHLY_MAX_ASSET_BYTES") {
            match max.parse::<usize>() {
                Ok(value) if value > 0 => self.max_asset_bytes = value,
                _ => log::warn!("Ignoring invalid WATCHLY_MAX_ASSET_BYTES: {}", max),
            }
        }
    }

    /// `mailto:` link for the support address
    pub fn support_mailto(&self) -> String {
        format!("mailto:{}", self.support_email)
    }
}

/// Returns the default asset cache directory: ~/.cache/watchly/assets
fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("watchly")
        .join("assets")
}

/// Returns the default preferences file: ~/.config/watchly/preferences.json
fn default_preferences_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("watchly")
        .join("preferences.json")
}
