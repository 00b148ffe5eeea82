use thiserror::Error;

/// Errors from the remote completion service.
///
/// Every variant means "the service could not produce usable text"; the
/// reply orchestrator treats them all as a signal to use the local generator.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("completion transport error: {0}")]
    Transport(String),

    #[error("completion service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Errors from privileged chat commands.
///
/// None of these are fatal: the command service turns each one into a
/// refusal line for the channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("actor lacks the privileged role")]
    Unauthorized,

    #[error("actor is not the owner")]
    NotOwner,

    #[error("no target user given")]
    UnknownTarget,

    #[error("user '{0}' is not blocked")]
    NotBlocked(String),
}

/// Errors related to persona configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to parse config: {0}")]
    Parse(String),
}
