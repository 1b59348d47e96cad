//! Access gate adapters.

pub mod email_gate;

pub use email_gate::EmailGate;
