//! Chat commands: parsing the command word and executing privileged actions.
//!
//! - `parse` -- `CommandKind::parse` recognises `!blacklist`, `!status`, ...
//! - `service` -- `CommandService` applies a command to the shared state

pub mod parse;
pub mod service;

pub use parse::CommandKind;
pub use service::{CommandOutcome, CommandService};
