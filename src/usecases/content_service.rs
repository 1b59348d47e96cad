//! Content item CRUD on top of the catalog store.
//!
//! - Validates field presence before the store is consulted
//! - Assigns fresh UUID ids on create
//! - Update takes the full record (edit form), never a partial patch

use crate::domain::{
    normalize_name, CatalogStore, ContentDraft, ContentId, ContentItem, DomainError,
};
use crate::usecases::category_service::CategoryService;
use std::sync::Arc;
use tracing::{info, warn};

pub struct ContentService {
    store: Arc<CatalogStore>,
    categories: Arc<CategoryService>,
}

impl ContentService {
    pub fn new(store: Arc<CatalogStore>, categories: Arc<CategoryService>) -> Self {
        Self { store, categories }
    }

    /// Create a content item. Returns the stored item with its new id.
    pub fn add_content(&self, draft: ContentDraft) -> Result<ContentItem, DomainError> {
        let item = validate(ContentId::generate(), draft)?;
        self.ensure_category(&item.category_name)?;
        self.store.insert_content(item.clone())?;
        info!(id = %item.id, category = %item.category_name, "content added");
        Ok(item)
    }

    /// Replace every mutable field of `id` with the draft.
    pub fn update_content(
        &self,
        id: &ContentId,
        draft: ContentDraft,
    ) -> Result<ContentItem, DomainError> {
        let item = validate(id.clone(), draft)?;
        if self.store.get_content(id).is_none() {
            return Err(DomainError::UnknownContent(id.to_string()));
        }
        self.ensure_category(&item.category_name)?;
        self.store.replace_content(id, item.clone())?;
        info!(id = %id, category = %item.category_name, "content updated");
        Ok(item)
    }

    pub fn delete_content(&self, id: &ContentId) -> Result<ContentItem, DomainError> {
        let removed = self.store.remove_content(id)?;
        info!(id = %id, "content deleted");
        Ok(removed)
    }

    fn ensure_category(&self, name: &str) -> Result<(), DomainError> {
        if !self.categories.exists(name) {
            warn!(category = %name, "content references unknown category");
            return Err(DomainError::UnknownCategory(name.to_string()));
        }
        Ok(())
    }
}

/// Checks required fields in form order and normalizes them.
fn validate(id: ContentId, draft: ContentDraft) -> Result<ContentItem, DomainError> {
    check_fields(id, draft).inspect_err(|e| warn!(error = %e, "rejected content form"))
}

fn check_fields(id: ContentId, draft: ContentDraft) -> Result<ContentItem, DomainError> {
    let title = required("title", &draft.title)?;
    let description = required("description", &draft.description)?;
    let thumbnail_ref = required("thumbnail_ref", &draft.thumbnail_ref)?;
    let category_name = normalize_name(&draft.category_name);
    if category_name.is_empty() {
        return Err(DomainError::missing("category_name"));
    }
    Ok(ContentItem {
        id,
        title,
        description,
        thumbnail_ref,
        media_type: draft.media_type.unwrap_or_default(),
        category_name,
    })
}

fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::missing(field));
    }
    Ok(value.to_string())
}
