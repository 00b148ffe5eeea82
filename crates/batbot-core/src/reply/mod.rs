//! Reply generation for batbot.
//!
//! - `pools` -- curated phrase pools and the emoji bank
//! - `random` -- `RandomSource`, the single injection point for all draws
//! - `local` -- `LocalReplyGenerator`, the randomized offline generator
//! - `orchestrator` -- `ReplyOrchestrator`, remote-first with local fallback

pub mod local;
pub mod orchestrator;
pub mod pools;
pub mod random;

pub use local::LocalReplyGenerator;
pub use orchestrator::ReplyOrchestrator;
pub use random::RandomSource;
