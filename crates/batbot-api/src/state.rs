//! Application state wiring all services together.
//!
//! The memory store, block list and mode timer are built once here and
//! shared by `Arc` between the reply orchestrator, the command service and
//! the keep-alive server.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use batbot_core::llm::BoxCompletionClient;
use batbot_core::memory::MemoryStore;
use batbot_core::mode::ModeTimer;
use batbot_core::moderation::BlockList;
use batbot_core::reply::ReplyOrchestrator;
use batbot_core::reply::random::RngSource;
use batbot_core::command::CommandService;
use batbot_core::service::Responder;
use batbot_core::trigger::TriggerPolicy;
use batbot_infra::completion::HttpCompletionClient;
use batbot_types::config::PersonaConfig;
use batbot_types::status::StatusReport;

/// Shared application state.
///
/// Used by the Discord handler, the keep-alive router and the offline
/// `reply` command.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PersonaConfig>,
    pub responder: Arc<Responder>,
    pub mode: Arc<ModeTimer>,
}

impl AppState {
    /// Wire the responder. A blank or missing key leaves it local-only.
    pub fn init(config: PersonaConfig, api_key: Option<String>) -> anyhow::Result<Self> {
        let memory = Arc::new(MemoryStore::new());
        let blocks = Arc::new(BlockList::new());
        let mode = Arc::new(ModeTimer::new());

        let mut orchestrator =
            ReplyOrchestrator::new(memory, Box::new(RngSource::from_entropy()))
                .with_persona(config.persona.clone())
                .with_request_params(config.completion.max_tokens, config.completion.temperature);

        match api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => {
                let client = HttpCompletionClient::new(SecretString::from(key), &config.completion)?;
                tracing::info!(endpoint = client.endpoint(), "Remote completion enabled");
                orchestrator = orchestrator.with_remote(BoxCompletionClient::new(client));
            }
            None => tracing::info!("No completion API key, replies are local only"),
        }

        let commands = CommandService::new(
            blocks.clone(),
            mode.clone(),
            Duration::from_secs(config.awaken_seconds),
        );
        let responder = Responder::new(
            TriggerPolicy::from_config(&config),
            config.command_prefix.clone(),
            orchestrator,
            commands,
            blocks,
            mode.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            responder: Arc::new(responder),
            mode,
        })
    }

    pub fn status(&self) -> StatusReport {
        self.responder.commands().status_report()
    }

    pub fn awaken_window(&self) -> Duration {
        Duration::from_secs(self.config.awaken_seconds)
    }
}
