//! Inbound message shape handed to the reply engine by a platform connector.

use serde::{Deserialize, Serialize};

/// One chat message, reduced to what the trigger check needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub author_id: String,
    pub is_bot: bool,
    pub content: String,
    /// Whether the message mentions the bot's own user.
    pub mentions_bot: bool,
}

/// Who issued a chat command, with capabilities resolved by the connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub is_privileged: bool,
    pub is_owner: bool,
}

/// A user a command acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub user_id: String,
    /// How to refer to the user in the confirmation line (e.g. a mention).
    pub label: String,
}
