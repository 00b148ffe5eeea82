//! Persona configuration types for batbot.
//!
//! `PersonaConfig` represents the optional `batbot.toml` that controls the
//! trigger words, the prompt persona, the awakened window and the remote
//! completion endpoint. All fields have sensible defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{AWAKEN_SECONDS, REMOTE_MAX_TOKENS, REMOTE_TEMPERATURE, REMOTE_TIMEOUT};
use crate::error::ConfigError;

/// Top-level configuration for the responder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// Display name used in liveness and log lines.
    pub name: String,
    /// Tone descriptor placed in front of the user's message in prompts.
    pub persona: String,
    /// Messages starting with this token always trigger a reply.
    pub trigger_token: String,
    /// Case-insensitive keyword that triggers a reply anywhere in a message.
    pub keyword: String,
    /// Prefix for privileged chat commands (`!status`, `!blacklist`, ...).
    pub command_prefix: String,
    /// Length of the awakened window in seconds.
    pub awaken_seconds: u64,
    /// Remote completion endpoint settings.
    pub completion: CompletionConfig,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: "Batman".to_string(),
            persona: "Batman dark-witty one-liner reply".to_string(),
            trigger_token: "!batman".to_string(),
            keyword: "batman".to_string(),
            command_prefix: "!".to_string(),
            awaken_seconds: AWAKEN_SECONDS,
            completion: CompletionConfig::default(),
        }
    }
}

impl PersonaConfig {
    /// Reject configurations that would make the responder deaf or mute.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keyword.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "keyword",
                reason: "must not be empty".to_string(),
            });
        }
        if self.trigger_token.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "trigger_token",
                reason: "must not be empty".to_string(),
            });
        }
        if self.command_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "command_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.awaken_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "awaken_seconds",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.completion.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "completion.timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Where and how to call the remote completion service.
///
/// The API key is deliberately absent: it comes from the environment only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub base_url: String,
    pub path: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.ai".to_string(),
            path: "/v1/complete".to_string(),
            max_tokens: REMOTE_MAX_TOKENS,
            temperature: REMOTE_TEMPERATURE,
            timeout_secs: REMOTE_TIMEOUT.as_secs(),
        }
    }
}

impl CompletionConfig {
    /// Full endpoint URL (`base_url` + `path`, without doubled slashes).
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}
