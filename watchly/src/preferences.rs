use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use watchly_common::GalleryResult;

/// Values persisted between launches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Preferences {
    #[serde(default)]
    is_premium_user: bool,
}

/// "Is premium user" flag, kept in memory and mirrored to a JSON file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementState {
    is_premium_user: bool,
    path: Option<PathBuf>,
}

impl EntitlementState {
    /// State that is never written to disk
    pub fn in_memory(is_premium_user: bool) -> Self {
        Self {
            is_premium_user,
            path: None,
        }
    }

    /// Load from disk, or start as a free user if the file is missing or unreadable
    pub fn load(path: &Path) -> Self {
        let is_premium_user = read_flag(path).unwrap_or_default();
        log::debug!("Loaded entitlement state: premium={}", is_premium_user);
        Self {
            is_premium_user,
            path: Some(path.to_path_buf()),
        }
    }

    pub fn is_premium_user(&self) -> bool {
        self.is_premium_user
    }

    /// Update the flag and persist it. A failed save keeps the in-memory value.
    pub fn set_premium_user(&mut self, value: bool) {
        if self.is_premium_user == value {
            return;
        }
        self.is_premium_user = value;
        if let Err(e) = self.save() {
            log::warn!("Failed to save preferences: {}", e);
        }
    }

    fn save(&self) -> GalleryResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let prefs = Preferences {
            is_premium_user: self.is_premium_user,
        };
        std::fs::write(path, serde_json::to_string_pretty(&prefs)?)?;

        log::debug!("Saved preferences to {:?}", path);
        Ok(())
    }
}

/// Read the persisted flag, `None` if there is no usable file
pub fn read_flag(path: &Path) -> Option<bool> {
    if !path.exists() {
        return None;
    }
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Preferences>(&content) {
            Ok(prefs) => Some(prefs.is_premium_user),
            Err(e) => {
                log::warn!("Failed to parse preferences file, using defaults: {}", e);
                None
            }
        },
        Err(e) => {
            log::warn!("Failed to read preferences file, using defaults: {}", e);
            None
        }
    }
}
