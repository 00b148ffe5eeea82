//! Business logic for batbot.
//!
//! Holds the reply engine (memory store, local generator, orchestrator),
//! the moderation state (block list, awakened-mode timer) and the command
//! service. Defines the `CompletionClient` port that the infrastructure
//! layer implements; never depends on `batbot-infra` or any HTTP crate.

pub mod clock;
pub mod command;
pub mod llm;
pub mod memory;
pub mod mode;
pub mod moderation;
pub mod reply;
pub mod service;
pub mod text;
pub mod trigger;
