//! Catalog persistence adapters.

pub mod json_repo;
pub mod memory_repo;
pub mod seed;

pub use json_repo::JsonCatalogRepo;
pub use memory_repo::MemoryCatalogRepo;
pub use seed::default_catalog;
