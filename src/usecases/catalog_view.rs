//! Read-only projections of the catalog for presentation. Never mutates.

use crate::domain::{CatalogSnapshot, CatalogStore, CategoryGroup, ContentId, ContentItem};
use crate::domain::normalize_name;
use std::sync::Arc;

pub struct CatalogView {
    store: Arc<CatalogStore>,
}

impl CatalogView {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Category names in insertion order, including empty ones.
    pub fn list_categories(&self) -> Vec<String> {
        self.store.snapshot().category_names()
    }

    /// Non-empty category sections in category order; items keep insertion order.
    pub fn grouped_content(&self) -> Vec<CategoryGroup> {
        group(&self.store.snapshot())
    }

    /// Items of one category. Unknown or empty categories yield an empty list.
    pub fn filter_by_category(&self, name: &str) -> Vec<ContentItem> {
        let name = normalize_name(name);
        self.store
            .snapshot()
            .items
            .into_iter()
            .filter(|item| item.category_name == name)
            .collect()
    }

    /// Single item for the detail dialog.
    pub fn get_content(&self, id: &ContentId) -> Option<ContentItem> {
        self.store.get_content(id)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.store.snapshot()
    }
}

/// Groups a snapshot by category, dropping categories with no items.
pub fn group(snapshot: &CatalogSnapshot) -> Vec<CategoryGroup> {
    snapshot
        .categories
        .iter()
        .filter_map(|category| {
            let items: Vec<ContentItem> = snapshot
                .items
                .iter()
                .filter(|item| item.category_name == category.name)
                .cloned()
                .collect();
            (!items.is_empty()).then(|| CategoryGroup {
                category: category.name.clone(),
                items,
            })
        })
        .collect()
}
