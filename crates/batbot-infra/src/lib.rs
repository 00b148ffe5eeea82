//! Infrastructure layer for batbot.
//!
//! Contains the HTTP implementation of the `CompletionClient` port defined
//! in `batbot-core`, and the loader for the optional `batbot.toml`.

pub mod completion;
pub mod config;
