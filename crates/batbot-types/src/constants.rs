//! Fixed limits of the reply engine.

use std::time::Duration;

/// Maximum length, in characters, of any reply and of any stored memory fragment.
pub const CHAR_LIMIT: usize = 200;

/// Number of fragments kept per user.
pub const MEMORY_LIMIT: usize = 10;

/// How many recent fragments make up the recall string.
pub const RECALL_DEPTH: usize = 3;

/// Separator between fragments in the recall string.
pub const RECALL_DELIMITER: &str = " | ";

/// Default length of the awakened window.
pub const AWAKEN_SECONDS: u64 = 120;

/// Token budget sent with every remote completion request.
pub const REMOTE_MAX_TOKENS: u32 = 90;

/// Sampling temperature sent with every remote completion request.
pub const REMOTE_TEMPERATURE: f64 = 0.8;

/// Hard timeout for a remote completion call.
pub const REMOTE_TIMEOUT: Duration = Duration::from_secs(15);
