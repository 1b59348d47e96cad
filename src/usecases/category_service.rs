//! Category CRUD on top of the catalog store.
//!
//! Names are normalized (trimmed, inner whitespace collapsed) before they reach the store.

use crate::domain::{normalize_name, CatalogStore, ContentId, DomainError};
use std::sync::Arc;
use tracing::{info, warn};

pub struct CategoryService {
    store: Arc<CatalogStore>,
}

impl CategoryService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Add a category at the end of the display order. Returns the stored name.
    pub fn add_category(&self, name: &str) -> Result<String, DomainError> {
        let name = normalize_name(name);
        if name.is_empty() {
            warn!("rejected empty category name");
            return Err(DomainError::missing("name"));
        }
        self.store.insert_category(&name)?;
        info!(category = %name, "category added");
        Ok(name)
    }

    /// Delete a category and all of its content. Returns the ids removed with it.
    pub fn delete_category(&self, name: &str) -> Result<Vec<ContentId>, DomainError> {
        let name = normalize_name(name);
        let removed = self.store.remove_category(&name)?;
        info!(category = %name, removed = removed.len(), "category deleted");
        Ok(removed)
    }

    /// Existence check used by the content service.
    pub fn exists(&self, name: &str) -> bool {
        self.store.contains_category(&normalize_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_category_normalizes_and_rejects_empty() {
        let service = CategoryService::new(Arc::new(CatalogStore::new()));
        assert_eq!(service.add_category("  HISTÓRIAS ").unwrap(), "HISTÓRIAS");
        assert!(matches!(
            service.add_category(" \n "),
            Err(DomainError::InvalidInput { field: "name", .. })
        ));
        assert_eq!(
            service.add_category("HISTÓRIAS"),
            Err(DomainError::DuplicateCategory("HISTÓRIAS".into()))
        );
        assert!(service.exists(" HISTÓRIAS"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let service = CategoryService::new(Arc::new(CatalogStore::new()));
        service.add_category("novidades").unwrap();
        service.add_category("NOVIDADES").unwrap();
    }

    #[test]
    fn test_delete_unknown_category_fails() {
        let service = CategoryService::new(Arc::new(CatalogStore::new()));
        assert_eq!(
            service.delete_category("ghost"),
            Err(DomainError::UnknownCategory("ghost".into()))
        );
    }
}
