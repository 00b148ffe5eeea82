//! Per-user short-term memory for the reply engine.
//!
//! `MemoryStore` keeps the last few message fragments of each user so the
//! local generator can quote them back. Process-lifetime only.

pub mod store;

pub use store::MemoryStore;
