//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{CatalogSnapshot, DomainError};

/// Catalog persistence. Loads the initial state and stores snapshots.
#[async_trait::async_trait]
pub trait CatalogRepoPort: Send + Sync {
    /// Load the stored catalog. `Ok(None)` means nothing has been stored yet.
    async fn load(&self) -> Result<Option<CatalogSnapshot>, DomainError>;

    /// Persist a full snapshot, replacing whatever was stored before.
    async fn save(&self, snapshot: &CatalogSnapshot) -> Result<(), DomainError>;
}

/// Access gate. Validates a viewer identifier before the viewer surface is reachable.
///
/// Carries no catalog state.
pub trait AccessGatePort: Send + Sync {
    /// Returns the normalized identifier on success, `DomainError::AccessDenied` otherwise.
    fn check(&self, candidate: &str) -> Result<String, DomainError>;
}

/// Media-asset resolver. Dereferences a thumbnail reference to bytes.
#[async_trait::async_trait]
pub trait MediaResolverPort: Send + Sync {
    async fn resolve(&self, thumbnail_ref: &str) -> Result<Vec<u8>, DomainError>;
}
