//! CompletionClient trait definition.
//!
//! This is the port the reply orchestrator calls when a remote completion
//! service is configured. Uses RPITIT for `complete`.

use batbot_types::completion::CompletionRequest;
use batbot_types::error::CompletionError;

/// Trait for remote text-completion backends.
///
/// Implementations live in batbot-infra (e.g., `HttpCompletionClient`).
/// A failure is always returned as a tagged `CompletionError`, never as
/// text inside `Ok`.
pub trait CompletionClient: Send + Sync {
    /// Human-readable backend name, for logs.
    fn name(&self) -> &str;

    /// Send a prompt and receive the completion text, trimmed.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;
}
