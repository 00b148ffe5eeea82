//! Remote-first reply orchestration.
//!
//! Tries the configured completion client, and falls back to the local
//! generator when no client is configured, the call fails, or the service
//! answers with empty text. Every reply is cut to `CHAR_LIMIT` characters.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use batbot_types::completion::CompletionRequest;
use batbot_types::constants::{CHAR_LIMIT, REMOTE_MAX_TOKENS, REMOTE_TEMPERATURE};

use crate::llm::BoxCompletionClient;
use crate::memory::MemoryStore;
use crate::text::truncate_chars;

use super::local::LocalReplyGenerator;
use super::random::RandomSource;

const DEFAULT_PERSONA: &str = "Batman dark-witty one-liner reply";

/// Decides which generator answers a trigger and enforces the output budget.
pub struct ReplyOrchestrator {
    memory: Arc<MemoryStore>,
    generator: LocalReplyGenerator,
    remote: Option<BoxCompletionClient>,
    rng: Mutex<Box<dyn RandomSource>>,
    persona: String,
    max_tokens: u32,
    temperature: f64,
}

impl ReplyOrchestrator {
    /// Local-only orchestrator over the shared memory store.
    pub fn new(memory: Arc<MemoryStore>, rng: Box<dyn RandomSource>) -> Self {
        Self {
            memory,
            generator: LocalReplyGenerator::new(),
            remote: None,
            rng: Mutex::new(rng),
            persona: DEFAULT_PERSONA.to_string(),
            max_tokens: REMOTE_MAX_TOKENS,
            temperature: REMOTE_TEMPERATURE,
        }
    }

    /// Route replies through `client` first.
    pub fn with_remote(mut self, client: BoxCompletionClient) -> Self {
        self.remote = Some(client);
        self
    }

    /// Override the tone descriptor placed in prompts.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// Override the token budget and temperature of remote requests.
    pub fn with_request_params(mut self, max_tokens: u32, temperature: f64) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// `<persona>: "<message>"`
    pub fn build_prompt(&self, message: &str) -> String {
        format!("{}: \"{}\"", self.persona, message)
    }

    /// Produce the reply for one trigger.
    ///
    /// The message is recorded into memory exactly once on every path.
    pub async fn generate_reply(&self, user_id: &str, message: &str, awakened: bool) -> String {
        if let Some(remote) = &self.remote {
            let request = CompletionRequest {
                prompt: self.build_prompt(message),
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            };

            match remote.complete(&request).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(client = remote.name(), user_id, "Reply from remote completion");
                    self.memory.record(user_id, message);
                    return truncate_chars(text.trim(), CHAR_LIMIT);
                }
                Ok(_) => {
                    debug!(client = remote.name(), "Remote completion was empty, using local generator");
                }
                Err(err) => {
                    warn!(
                        client = remote.name(),
                        error = %err,
                        "Remote completion failed, using local generator"
                    );
                }
            }
        }

        let mut rng = self.rng.lock().await;
        let reply = self
            .generator
            .generate(&self.memory, &mut **rng, user_id, message, awakened);
        debug!(user_id, awakened, "Reply from local generator");
        reply
    }
}

impl std::fmt::Debug for ReplyOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyOrchestrator")
            .field("remote", &self.remote)
            .field("persona", &self.persona)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use batbot_types::error::CompletionError;
    use crate::llm::CompletionClient;
    use crate::reply::pools::{CHILL_POOL, LEAD_INS, ROAST_POOL};
    use crate::reply::random::{RngSource, ScriptedRandom};

    // --- Mock clients ---

    enum MockResult {
        Text(String),
        Fail,
    }

    struct MockClient {
        result: MockResult,
        calls: Arc<AtomicUsize>,
        last_request: Arc<std::sync::Mutex<Option<CompletionRequest>>>,
    }

    impl MockClient {
        fn text(text: &str) -> Self {
            Self {
                result: MockResult::Text(text.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
                last_request: Arc::new(std::sync::Mutex::new(None)),
            }
        }

        fn failing() -> Self {
            Self {
                result: MockResult::Fail,
                calls: Arc::new(AtomicUsize::new(0)),
                last_request: Arc::new(std::sync::Mutex::new(None)),
            }
        }
    }

    impl CompletionClient for MockClient {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            match &self.result {
                MockResult::Text(text) => Ok(text.clone()),
                MockResult::Fail => Err(CompletionError::Transport("connection refused".to_string())),
            }
        }
    }

    fn orchestrator(rng: impl RandomSource + 'static) -> ReplyOrchestrator {
        ReplyOrchestrator::new(Arc::new(MemoryStore::new()), Box::new(rng))
    }

    #[tokio::test]
    async fn test_remote_text_takes_precedence() {
        let memory = Arc::new(MemoryStore::new());
        for fragment in ["earlier", "are you there", "still there?"] {
            memory.record("u1", fragment);
        }
        let orch = ReplyOrchestrator::new(memory, Box::new(ScriptedRandom::constant(0.1)))
            .with_remote(BoxCompletionClient::new(MockClient::text("Gotham remembers. 🦇")));

        for awakened in [false, true] {
            let reply = orch.generate_reply("u1", "are you there batman", awakened).await;
            assert_eq!(reply, "Gotham remembers. 🦇");
        }
    }

    #[tokio::test]
    async fn test_remote_request_carries_prompt_and_params() {
        let client = MockClient::text("ok");
        let last = Arc::clone(&client.last_request);
        let orch = orchestrator(ScriptedRandom::constant(0.1))
            .with_remote(BoxCompletionClient::new(client));

        orch.generate_reply("u1", "hello there", false).await;

        let request = last.lock().unwrap().clone().unwrap();
        assert_eq!(request.prompt, "Batman dark-witty one-liner reply: \"hello there\"");
        assert_eq!(request.max_tokens, 90);
        assert_eq!(request.temperature, 0.8);
    }

    #[tokio::test]
    async fn test_remote_success_records_memory_once() {
        let orch = orchestrator(ScriptedRandom::constant(0.1))
            .with_remote(BoxCompletionClient::new(MockClient::text("Noted.")));

        orch.generate_reply("u1", "first", false).await;
        orch.generate_reply("u1", "second", false).await;
        assert_eq!(orch.memory().recent("u1", 10), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_local() {
        let client = MockClient::failing();
        let calls = Arc::clone(&client.calls);
        let orch = orchestrator(ScriptedRandom::constant(0.1))
            .with_remote(BoxCompletionClient::new(client));

        let reply = orch.generate_reply("u1", "are you there batman", false).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            reply,
            "Nice try. Next time bring better excuses. — are you there batman 🦇"
        );
        // Fallback path recorded exactly once.
        assert_eq!(orch.memory().len("u1"), 1);
    }

    #[tokio::test]
    async fn test_blank_remote_text_falls_back_to_local() {
        let orch = orchestrator(ScriptedRandom::new(vec![0.3, 0.0, 0.9, 0.9]))
            .with_remote(BoxCompletionClient::new(MockClient::text("  \n ")));

        let reply = orch.generate_reply("u1", "batman?", false).await;
        assert_eq!(reply, CHILL_POOL[0]);
    }

    #[tokio::test]
    async fn test_no_remote_uses_local() {
        let orch = orchestrator(ScriptedRandom::constant(0.1));
        assert!(!orch.has_remote());
        let reply = orch.generate_reply("u1", "batman", false).await;
        assert!(reply.starts_with(ROAST_POOL[0]));
    }

    #[tokio::test]
    async fn test_long_remote_text_is_trimmed_and_truncated() {
        let long = format!("  {}  ", "🦇".repeat(300));
        let orch = orchestrator(ScriptedRandom::constant(0.1))
            .with_remote(BoxCompletionClient::new(MockClient::text(&long)));

        let reply = orch.generate_reply("u1", "batman", false).await;
        assert_eq!(reply.chars().count(), CHAR_LIMIT);
        assert!(reply.chars().all(|c| c == '🦇'));
    }

    #[tokio::test]
    async fn test_custom_persona_and_params() {
        let client = MockClient::text("ok");
        let last = Arc::clone(&client.last_request);
        let orch = orchestrator(ScriptedRandom::constant(0.1))
            .with_persona("Alfred, dry butler quip")
            .with_request_params(40, 0.2)
            .with_remote(BoxCompletionClient::new(client));

        orch.generate_reply("u1", "tea?", false).await;
        let request = last.lock().unwrap().clone().unwrap();
        assert_eq!(request.prompt, "Alfred, dry butler quip: \"tea?\"");
        assert_eq!(request.max_tokens, 40);
    }

    #[tokio::test]
    async fn test_fallback_replies_come_from_normal_pools() {
        let orch = orchestrator(RngSource::seeded(99))
            .with_remote(BoxCompletionClient::new(MockClient::failing()));

        for _ in 0..200 {
            let reply = orch.generate_reply("u1", "are you there batman", false).await;
            assert!(!reply.is_empty());
            assert!(reply.chars().count() <= CHAR_LIMIT);
            let from_pool = ROAST_POOL
                .iter()
                .chain(CHILL_POOL.iter())
                .any(|phrase| reply.starts_with(phrase));
            let echoed = LEAD_INS
                .iter()
                .any(|lead| reply.starts_with(&format!("{lead}: are you there batman")));
            assert!(from_pool || echoed, "unexpected reply: {reply}");
        }
    }
}
