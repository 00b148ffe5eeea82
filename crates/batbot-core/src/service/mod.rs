//! Message-level entry point tying triggers, replies and commands together.

pub mod responder;

pub use responder::Responder;
