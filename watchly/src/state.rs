//! Application state shared by the gallery screens
//!
//! Owned by a single consumer task and passed explicitly to whatever needs
//! it. Every mutation goes through a setter that notifies subscribers.

use std::path::{Path, PathBuf};
use watchly_common::{AssetKey, Category, GalleryError, GalleryResult};

use crate::cache::AssetCache;
use crate::catalog::CatalogProvider;
use crate::entitlement::{EntitlementGate, Selection};
use crate::preferences::EntitlementState;

/// Full screen overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullScreen {
    Premium,
    Tutorial,
}

/// Tab bar items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Gallery,
    Settings,
    Tutorial,
}

/// What changed, delivered to subscribers after the mutation
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    Loading(bool),
    Categories(usize),
    SelectedWatchFace(Option<String>),
    FullScreen(Option<FullScreen>),
    SelectedTab(Tab),
    SeeAllCategory(Option<String>),
    PremiumUser(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&StateChange) + Send>;

pub struct AppState {
    show_loading: bool,
    full_screen: Option<FullScreen>,
    selected_tab: Tab,
    categories: Vec<Category>,
    selected_watch_face: Option<String>,
    see_all_category: Option<Category>,
    entitlement: EntitlementState,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl AppState {
    pub fn new(entitlement: EntitlementState) -> Self {
        Self {
            show_loading: false,
            full_screen: None,
            selected_tab: Tab::default(),
            categories: Vec::new(),
            selected_watch_face: None,
            see_all_category: None,
            entitlement,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self, change: StateChange) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&change);
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn show_loading(&self) -> bool {
        self.show_loading
    }

    pub fn full_screen(&self) -> Option<FullScreen> {
        self.full_screen
    }

    pub fn selected_tab(&self) -> Tab {
        self.selected_tab
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selected_watch_face(&self) -> Option<&str> {
        self.selected_watch_face.as_deref()
    }

    pub fn see_all_category(&self) -> Option<&Category> {
        self.see_all_category.as_ref()
    }

    /// The "see all" grid is shown whenever a category is chosen for it
    pub fn show_all_items(&self) -> bool {
        self.see_all_category.is_some()
    }

    pub fn is_premium_user(&self) -> bool {
        self.entitlement.is_premium_user()
    }

    /// Crown badge on locked categories
    pub fn shows_premium_badge(&self, category: &Category) -> bool {
        category.is_premium && !self.is_premium_user()
    }

    pub fn category(&self, title: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.title == title)
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub fn set_loading(&mut self, loading: bool) {
        self.show_loading = loading;
        self.notify(StateChange::Loading(loading));
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        let count = categories.len();
        self.categories = categories;
        self.notify(StateChange::Categories(count));
    }

    pub fn set_full_screen(&mut self, mode: Option<FullScreen>) {
        self.full_screen = mode;
        self.notify(StateChange::FullScreen(mode));
    }

    pub fn set_selected_tab(&mut self, tab: Tab) {
        self.selected_tab = tab;
        self.notify(StateChange::SelectedTab(tab));
    }

    pub fn set_selected_watch_face(&mut self, id: Option<String>) {
        self.selected_watch_face = id.clone();
        self.notify(StateChange::SelectedWatchFace(id));
    }

    pub fn set_see_all_category(&mut self, category: Option<Category>) {
        let title = category.as_ref().map(|c| c.title.clone());
        self.see_all_category = category;
        self.notify(StateChange::SeeAllCategory(title));
    }

    pub fn set_premium_user(&mut self, value: bool) {
        self.entitlement.set_premium_user(value);
        self.notify(StateChange::PremiumUser(value));
    }

    /// Load the catalog once per session; an already loaded list is kept
    pub async fn load_categories(&mut self, provider: &CatalogProvider) -> usize {
        if !self.categories.is_empty() {
            return self.categories.len();
        }

        self.set_loading(true);
        let categories = provider.list_categories().await;
        self.set_loading(false);
        self.set_categories(categories);
        self.categories.len()
    }

    /// Record the outcome of the entitlement gate. A denial brings up the
    /// premium overlay and keeps the previous selection.
    pub fn apply_selection(&mut self, selection: &Selection) -> bool {
        match selection {
            Selection::Allowed { watch_face_id } => {
                self.set_selected_watch_face(Some(watch_face_id.clone()));
                true
            }
            Selection::Denied => {
                self.set_full_screen(Some(FullScreen::Premium));
                false
            }
        }
    }

    /// Run the gate for item `index` of `category` and record the outcome
    pub async fn select_watch_face(
        &mut self,
        gate: &EntitlementGate,
        category: &Category,
        index: u32,
    ) -> Selection {
        let was_premium = self.is_premium_user();
        let selection = gate.select(&mut self.entitlement, category, index).await;
        self.notify_premium_change(was_premium);
        self.apply_selection(&selection);
        selection
    }

    /// Restore purchases through the gate, returning the resulting flag
    pub async fn restore_purchases(&mut self, gate: &EntitlementGate) -> bool {
        let was_premium = self.is_premium_user();
        let premium = gate.restore_purchases(&mut self.entitlement).await;
        self.notify_premium_change(was_premium);
        premium
    }

    /// "Upgrade Premium" from the settings screen
    pub fn upgrade(&mut self, gate: &EntitlementGate) {
        gate.upgrade();
        self.set_full_screen(Some(FullScreen::Premium));
    }

    fn notify_premium_change(&mut self, was_premium: bool) {
        let now = self.is_premium_user();
        if now != was_premium {
            self.notify(StateChange::PremiumUser(now));
        }
    }

    /// Write the selected watch face image to `destination`.
    /// A directory destination gets a file named after the watch face.
    pub async fn save_current_watch_face(
        &self,
        cache: &AssetCache,
        destination: &Path,
    ) -> GalleryResult<PathBuf> {
        let id = self
            .selected_watch_face
            .as_deref()
            .ok_or(GalleryError::NothingSelected)?;
        let key = AssetKey::for_watch_face(id);

        let bytes = cache.try_resolve(&key).await?;

        let is_dir = tokio::fs::metadata(destination)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        let target = if is_dir {
            destination.join(key.cache_file_name())
        } else {
            destination.to_path_buf()
        };
        tokio::fs::write(&target, &bytes).await?;

        log::info!("Saved watch face {} to {:?}", id, target);
        Ok(target)
    }
}
