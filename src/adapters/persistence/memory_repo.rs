//! Volatile CatalogRepoPort. Keeps the last snapshot in process memory only.

use crate::domain::{CatalogSnapshot, DomainError};
use crate::ports::CatalogRepoPort;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryCatalogRepo {
    saved: RwLock<Option<CatalogSnapshot>>,
}

impl MemoryCatalogRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CatalogRepoPort for MemoryCatalogRepo {
    async fn load(&self) -> Result<Option<CatalogSnapshot>, DomainError> {
        Ok(self.saved.read().await.clone())
    }

    async fn save(&self, snapshot: &CatalogSnapshot) -> Result<(), DomainError> {
        *self.saved.write().await = Some(snapshot.clone());
        Ok(())
    }
}
