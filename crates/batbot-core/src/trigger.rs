//! Trigger detection: decides whether an inbound message gets a reply.

use batbot_types::config::PersonaConfig;
use batbot_types::trigger::InboundMessage;

use crate::moderation::BlockList;

/// Outcome of checking one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Authored by a bot account.
    IgnoredBot,
    /// Author is on the block list.
    IgnoredBlocked,
    /// No trigger token, mention, or keyword.
    NotTriggered,
    Triggered,
}

impl TriggerDecision {
    pub fn is_triggered(self) -> bool {
        self == TriggerDecision::Triggered
    }
}

/// Trigger words for one persona.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerPolicy {
    token: String,
    keyword: String,
}

impl TriggerPolicy {
    /// `keyword` is matched case-insensitively.
    pub fn new(token: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            keyword: keyword.into().to_lowercase(),
        }
    }

    pub fn from_config(config: &PersonaConfig) -> Self {
        Self::new(config.trigger_token.clone(), config.keyword.clone())
    }

    /// Bots and blocked users are ignored outright; everyone else triggers on
    /// a leading token, a mention, or the keyword anywhere in the text.
    pub fn evaluate(&self, message: &InboundMessage, blocks: &BlockList) -> TriggerDecision {
        if message.is_bot {
            return TriggerDecision::IgnoredBot;
        }
        if blocks.is_blocked(&message.author_id) {
            return TriggerDecision::IgnoredBlocked;
        }

        let starts_with_token = message.content.trim().starts_with(&self.token);
        let has_keyword = message.content.to_lowercase().contains(&self.keyword);
        if starts_with_token || message.mentions_bot || has_keyword {
            TriggerDecision::Triggered
        } else {
            TriggerDecision::NotTriggered
        }
    }
}

impl Default for TriggerPolicy {
    fn default() -> Self {
        Self::from_config(&PersonaConfig::default())
    }
}
