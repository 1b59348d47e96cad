//! Application use cases. Orchestrate domain logic via ports.

pub mod access_service;
pub mod catalog_view;
pub mod category_service;
pub mod content_service;
pub mod persistence_worker;

pub use access_service::{AccessService, ViewerSession};
pub use catalog_view::CatalogView;
pub use category_service::CategoryService;
pub use content_service::ContentService;
pub use persistence_worker::PersistenceWorker;
