//! Media-asset resolver adapters.

pub mod resolver;

pub use resolver::HttpMediaResolver;
