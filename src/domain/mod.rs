//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the catalog store and its invariants live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod events;
pub mod store;

pub use entities::{
    normalize_name, CatalogSnapshot, Category, CategoryGroup, ContentDraft, ContentId,
    ContentItem, MediaType,
};
pub use errors::DomainError;
pub use events::{CatalogChange, CatalogEvent};
pub use store::CatalogStore;
