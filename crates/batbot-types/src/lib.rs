//! Shared domain types for batbot.
//!
//! This crate contains the types passed between the reply engine, the
//! completion client and the platform connector: trigger input, completion
//! request/response shapes, the status report, configuration and errors.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod completion;
pub mod config;
pub mod constants;
pub mod error;
pub mod status;
pub mod trigger;
