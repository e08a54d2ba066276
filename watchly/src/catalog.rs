//! Category catalog
//!
//! One list query per call. Any failure degrades to an empty catalog, which
//! the gallery renders as an empty screen.

use std::sync::Arc;
use watchly_common::Category;

use crate::remote::DocumentStore;

pub struct CatalogProvider {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl CatalogProvider {
    pub fn new(store: Arc<dyn DocumentStore>, collection: &str) -> Self {
        Self {
            store,
            collection: collection.to_string(),
        }
    }

    /// Fetch all categories in provider order.
    ///
    /// Malformed documents and empty titles are dropped; transport errors
    /// yield an empty list.
    pub async fn list_categories(&self) -> Vec<Category> {
        let documents = match self.store.list_documents(&self.collection).await {
            Ok(documents) => documents,
            Err(e) => {
                log::warn!("Failed to fetch categories: {}", e);
                return Vec::new();
            }
        };

        let total = documents.len();
        let categories: Vec<Category> = documents
            .iter()
            .filter_map(|doc| match Category::try_from_document(doc) {
                Ok(category) => Some(category),
                Err(e) => {
                    log::debug!("Dropping document: {}", e);
                    None
                }
            })
            .filter(|category| !category.title.is_empty())
            .collect();

        log::info!("Loaded {} of {} categories", categories.len(), total);
        categories
    }
}
