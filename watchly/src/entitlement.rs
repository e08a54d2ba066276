//! Premium gate for watch face selection
//!
//! The purchase and paywall SDKs are collaborators behind traits; this module
//! only decides what to do with their answers.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use watchly_common::{Category, GalleryResult};

use crate::preferences::{read_flag, EntitlementState};

/// Subscription status source
#[async_trait]
pub trait EntitlementProvider: Send + Sync {
    /// Whether the user currently holds the premium entitlement
    async fn is_entitled(&self) -> GalleryResult<bool>;

    /// Restore earlier purchases, returning whether premium is now active
    async fn restore_purchases(&self) -> GalleryResult<bool>;
}

/// Fire-and-forget paywall presentation
pub trait PaywallTrigger: Send + Sync {
    fn trigger(&self, event: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Paywall,
}

/// Outcome of tapping a watch face
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Allowed { watch_face_id: String },
    Denied,
}

/// Free items are always allowed; premium items need the entitlement
pub fn decide(is_premium: bool, is_entitled: bool) -> GateDecision {
    if !is_premium || is_entitled {
        GateDecision::Allow
    } else {
        GateDecision::Paywall
    }
}

pub struct EntitlementGate {
    provider: Arc<dyn EntitlementProvider>,
    paywall: Arc<dyn PaywallTrigger>,
    paywall_event: String,
}

impl EntitlementGate {
    pub fn new(
        provider: Arc<dyn EntitlementProvider>,
        paywall: Arc<dyn PaywallTrigger>,
        paywall_event: &str,
    ) -> Self {
        Self {
            provider,
            paywall,
            paywall_event: paywall_event.to_string(),
        }
    }

    /// Gate the selection of item `index` in `category`.
    ///
    /// Free categories skip the provider. For premium ones a fresh answer is
    /// mirrored into `state`; if the provider fails, the last known flag decides.
    pub async fn select(
        &self,
        state: &mut EntitlementState,
        category: &Category,
        index: u32,
    ) -> Selection {
        let is_entitled = if category.is_premium {
            self.refresh(state).await
        } else {
            state.is_premium_user()
        };

        match decide(category.is_premium, is_entitled) {
            GateDecision::Allow => Selection::Allowed {
                watch_face_id: category.watch_face_id(index),
            },
            GateDecision::Paywall => {
                log::info!("{} is premium, presenting paywall", category.title);
                self.paywall.trigger(&self.paywall_event);
                Selection::Denied
            }
        }
    }

    /// Ask the provider and mirror the answer, falling back to the stored flag
    pub async fn refresh(&self, state: &mut EntitlementState) -> bool {
        match self.provider.is_entitled().await {
            Ok(entitled) => {
                state.set_premium_user(entitled);
                entitled
            }
            Err(e) => {
                log::warn!("Entitlement check failed, using stored value: {}", e);
                state.is_premium_user()
            }
        }
    }

    /// Restore purchases. Only a positive answer changes the state.
    pub async fn restore_purchases(&self, state: &mut EntitlementState) -> bool {
        match self.provider.restore_purchases().await {
            Ok(true) => {
                log::info!("Restore successful: user is premium");
                state.set_premium_user(true);
            }
            Ok(false) => log::info!("Restore successful: user is not premium"),
            Err(e) => log::warn!("Restore failed: {}", e),
        }
        state.is_premium_user()
    }

    /// Explicit "Upgrade Premium" request
    pub fn upgrade(&self) {
        self.paywall.trigger(&self.paywall_event);
    }
}

/// Provider that answers from the persisted preference file.
/// Used where no billing backend is available.
pub struct StoredEntitlement {
    path: PathBuf,
}

impl StoredEntitlement {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EntitlementProvider for StoredEntitlement {
    async fn is_entitled(&self) -> GalleryResult<bool> {
        Ok(read_flag(&self.path).unwrap_or(false))
    }

    async fn restore_purchases(&self) -> GalleryResult<bool> {
        self.is_entitled().await
    }
}

/// Paywall that only logs the event
pub struct LogPaywall;

impl PaywallTrigger for LogPaywall {
    fn trigger(&self, event: &str) {
        log::info!("Paywall triggered: {}", event);
    }
}
