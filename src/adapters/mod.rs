//! Infrastructure adapters. Implement ports.
//!
//! Storage, access gate, media fetching, terminal UI. Map errors to DomainError.

pub mod gate;
pub mod media;
pub mod persistence;
pub mod ui;
