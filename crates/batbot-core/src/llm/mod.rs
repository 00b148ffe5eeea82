//! Remote completion abstractions for batbot.
//!
//! - `CompletionClient`: RPITIT trait for concrete completion backends
//! - `BoxCompletionClient`: object-safe wrapper for dynamic dispatch

pub mod box_client;
pub mod client;

pub use box_client::BoxCompletionClient;
pub use client::CompletionClient;
