//! Bounded per-user ring of recent message fragments.

use std::collections::VecDeque;

use batbot_types::constants::{CHAR_LIMIT, MEMORY_LIMIT};
use dashmap::DashMap;

use crate::text::tail_chars;

/// In-memory store of recent fragments keyed by user id.
///
/// Each user's ring is mutated under its own map-entry guard, so an
/// append-and-trim is atomic with respect to concurrent callers.
#[derive(Debug)]
pub struct MemoryStore {
    entries: DashMap<String, VecDeque<String>>,
    limit: usize,
    fragment_chars: usize,
}

impl MemoryStore {
    /// Create a store with the default bounds (`MEMORY_LIMIT`, `CHAR_LIMIT`).
    pub fn new() -> Self {
        Self::with_limits(MEMORY_LIMIT, CHAR_LIMIT)
    }

    /// Create a store with custom bounds.
    pub fn with_limits(limit: usize, fragment_chars: usize) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
            fragment_chars,
        }
    }

    /// Append the last `fragment_chars` characters of `text` to the user's
    /// ring, evicting the oldest entries beyond the limit.
    pub fn record(&self, user_id: &str, text: &str) {
        let fragment = tail_chars(text, self.fragment_chars);
        let mut ring = self.entries.entry(user_id.to_string()).or_default();
        ring.push_back(fragment);
        while ring.len() > self.limit {
            ring.pop_front();
        }
    }

    /// The last `n` fragments for a user, oldest first. Unknown users yield
    /// an empty vector.
    pub fn recent(&self, user_id: &str, n: usize) -> Vec<String> {
        match self.entries.get(user_id) {
            Some(ring) => {
                let skip = ring.len().saturating_sub(n);
                ring.iter().skip(skip).cloned().collect()
            }
            None => Vec::new(),
        }
    }

    /// Number of fragments stored for a user.
    pub fn len(&self, user_id: &str) -> usize {
        self.entries.get(user_id).map(|ring| ring.len()).unwrap_or(0)
    }

    /// Number of users with at least one fragment.
    pub fn user_count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
