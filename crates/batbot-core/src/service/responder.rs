//! Per-message handling shared by every platform connector.
//!
//! A connector converts its native event into an [`InboundMessage`], asks
//! [`Responder::handle_message`] for a reply, then offers the same message to
//! [`Responder::handle_command`]. Bots and blocked users get neither.

use std::sync::Arc;

use tracing::debug;

use batbot_types::trigger::{Actor, InboundMessage, Target};

use crate::clock::{Clock, SystemClock};
use crate::command::{CommandKind, CommandOutcome, CommandService};
use crate::mode::ModeTimer;
use crate::moderation::BlockList;
use crate::reply::ReplyOrchestrator;
use crate::trigger::{TriggerDecision, TriggerPolicy};

#[derive(Debug)]
pub struct Responder<C: Clock = SystemClock> {
    policy: TriggerPolicy,
    command_prefix: String,
    blocks: Arc<BlockList>,
    mode: Arc<ModeTimer<C>>,
    orchestrator: ReplyOrchestrator,
    commands: CommandService<C>,
}

impl<C: Clock> Responder<C> {
    pub fn new(
        policy: TriggerPolicy,
        command_prefix: impl Into<String>,
        orchestrator: ReplyOrchestrator,
        commands: CommandService<C>,
        blocks: Arc<BlockList>,
        mode: Arc<ModeTimer<C>>,
    ) -> Self {
        Self {
            policy,
            command_prefix: command_prefix.into(),
            blocks,
            mode,
            orchestrator,
            commands,
        }
    }

    /// Reply text when the message triggers the persona, `None` otherwise.
    pub async fn handle_message(&self, message: &InboundMessage) -> Option<String> {
        let decision = self.policy.evaluate(message, &self.blocks);
        if !decision.is_triggered() {
            if decision == TriggerDecision::IgnoredBlocked {
                debug!(author = %message.author_id, "Ignoring blacklisted user");
            }
            return None;
        }

        let awakened = self.mode.is_active();
        let reply = self
            .orchestrator
            .generate_reply(&message.author_id, &message.content, awakened)
            .await;
        Some(reply)
    }

    /// Parse a prefix command out of `message` without running it.
    ///
    /// Returns `None` for bots, blocked users and non-command text, so the
    /// connector can skip resolving privileges and targets.
    pub fn command_for(&self, message: &InboundMessage) -> Option<CommandKind> {
        if message.is_bot || self.blocks.is_blocked(&message.author_id) {
            return None;
        }
        CommandKind::parse(&message.content, &self.command_prefix)
    }

    /// Run the command in `message`, if any, on behalf of `actor`.
    pub fn handle_command(
        &self,
        message: &InboundMessage,
        actor: &Actor,
        target: Option<&Target>,
    ) -> Option<CommandOutcome> {
        let kind = self.command_for(message)?;
        debug!(command = %kind, actor = %actor.user_id, "Running command");
        Some(self.commands.execute(kind, actor, target))
    }

    pub fn commands(&self) -> &CommandService<C> {
        &self.commands
    }

    pub fn orchestrator(&self) -> &ReplyOrchestrator {
        &self.orchestrator
    }

    pub fn is_awakened(&self) -> bool {
        self.mode.is_active()
    }
}
