//! Set of blocked user ids, mutated only through privileged commands.

use dashmap::DashSet;

/// Users excluded from triggering replies. Empty at start.
#[derive(Debug, Default)]
pub struct BlockList {
    users: DashSet<String>,
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user. Returns `true` if the user was not already blocked.
    pub fn block(&self, user_id: &str) -> bool {
        self.users.insert(user_id.to_string())
    }

    /// Remove a user. Returns `true` if the user was blocked.
    pub fn unblock(&self, user_id: &str) -> bool {
        self.users.remove(user_id).is_some()
    }

    pub fn is_blocked(&self, user_id: &str) -> bool {
        self.users.contains(user_id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
