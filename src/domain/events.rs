//! Change notifications emitted by the catalog store after each successful mutation.

use super::entities::ContentId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogChange {
    CategoryAdded { name: String },
    /// Category removed together with every item that referenced it.
    CategoryRemoved {
        name: String,
        removed_items: Vec<ContentId>,
    },
    ContentAdded { id: ContentId },
    ContentReplaced { id: ContentId },
    ContentRemoved { id: ContentId },
}

/// A change stamped with the store revision it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEvent {
    pub revision: u64,
    pub change: CatalogChange,
}
