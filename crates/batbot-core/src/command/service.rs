//! Privileged command execution.
//!
//! `CommandService` owns no state of its own: it mutates the shared block
//! list and mode timer, and reads them for the status report. Every
//! refusal is a `CommandError` that `execute` turns into a channel line.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use batbot_types::error::CommandError;
use batbot_types::status::{Mode, StatusReport};
use batbot_types::trigger::{Actor, Target};

use crate::clock::{Clock, SystemClock};
use crate::mode::ModeTimer;
use crate::moderation::BlockList;

use super::parse::CommandKind;

/// Result of running a command through [`CommandService::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Send this line and carry on.
    Reply(String),
    /// Send this line, then stop the process.
    Shutdown(String),
}

impl CommandOutcome {
    pub fn text(&self) -> &str {
        match self {
            CommandOutcome::Reply(text) | CommandOutcome::Shutdown(text) => text,
        }
    }

    pub fn is_shutdown(&self) -> bool {
        matches!(self, CommandOutcome::Shutdown(_))
    }
}

/// Channel line for a refused command.
pub fn refusal_text(err: &CommandError) -> &'static str {
    match err {
        CommandError::Unauthorized => "🦇 Only admins.",
        CommandError::NotOwner => "🦇 Only the owner may shut me down.",
        CommandError::UnknownTarget => "🦇 Mention someone.",
        CommandError::NotBlocked(_) => "❌ Not blacklisted.",
    }
}

fn window_text(window: Duration) -> String {
    let secs = window.as_secs();
    match secs {
        60 => "1 minute".to_string(),
        s if s >= 60 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{s} seconds"),
    }
}

/// Applies privileged commands to the shared moderation state.
#[derive(Debug)]
pub struct CommandService<C: Clock = SystemClock> {
    blocks: Arc<BlockList>,
    mode: Arc<ModeTimer<C>>,
    awaken_for: Duration,
    started_at: Instant,
}

impl<C: Clock> CommandService<C> {
    /// Uptime is measured from construction, on the mode timer's clock.
    pub fn new(blocks: Arc<BlockList>, mode: Arc<ModeTimer<C>>, awaken_for: Duration) -> Self {
        let started_at = mode.now();
        Self {
            blocks,
            mode,
            awaken_for,
            started_at,
        }
    }

    pub fn block(&self, actor: &Actor, target: Option<&Target>) -> Result<String, CommandError> {
        if !actor.is_privileged {
            warn!(actor = %actor.user_id, "Unprivileged blacklist attempt");
            return Err(CommandError::Unauthorized);
        }
        let target = target.ok_or(CommandError::UnknownTarget)?;
        self.blocks.block(&target.user_id);
        info!(actor = %actor.user_id, target = %target.user_id, "User blacklisted");
        Ok(format!("🚫 {} blacklisted.", target.label))
    }

    pub fn unblock(&self, actor: &Actor, target: Option<&Target>) -> Result<String, CommandError> {
        if !actor.is_privileged {
            warn!(actor = %actor.user_id, "Unprivileged unblacklist attempt");
            return Err(CommandError::Unauthorized);
        }
        let target = target.ok_or(CommandError::UnknownTarget)?;
        if !self.blocks.unblock(&target.user_id) {
            return Err(CommandError::NotBlocked(target.user_id.clone()));
        }
        info!(actor = %actor.user_id, target = %target.user_id, "User unblacklisted");
        Ok(format!("✅ {} unblacklisted.", target.label))
    }

    pub fn activate_mode(&self, actor: &Actor) -> Result<String, CommandError> {
        if !actor.is_privileged {
            warn!(actor = %actor.user_id, "Unprivileged awakening attempt");
            return Err(CommandError::Unauthorized);
        }
        self.mode.activate(self.awaken_for);
        Ok(format!(
            "⚡🦇 Awakened mode activated for {}!",
            window_text(self.awaken_for)
        ))
    }

    pub fn status_report(&self) -> StatusReport {
        StatusReport {
            mode: Mode::from_active(self.mode.is_active()),
            uptime_secs: self.mode.now().duration_since(self.started_at).as_secs(),
            blocked_count: self.blocks.len(),
        }
    }

    pub fn shutdown(&self, actor: &Actor) -> Result<String, CommandError> {
        if !actor.is_owner {
            warn!(actor = %actor.user_id, "Non-owner shutdown attempt");
            return Err(CommandError::NotOwner);
        }
        info!(actor = %actor.user_id, "Shutdown requested");
        Ok("🦇 Disappearing into the night...".to_string())
    }

    /// Run a parsed command, turning refusals into reply text.
    pub fn execute(
        &self,
        kind: CommandKind,
        actor: &Actor,
        target: Option<&Target>,
    ) -> CommandOutcome {
        let result = match kind {
            CommandKind::Block => self.block(actor, target),
            CommandKind::Unblock => self.unblock(actor, target),
            CommandKind::Awaken => self.activate_mode(actor),
            CommandKind::Status => Ok(self.status_report().to_string()),
            CommandKind::Shutdown => {
                return match self.shutdown(actor) {
                    Ok(text) => CommandOutcome::Shutdown(text),
                    Err(err) => CommandOutcome::Reply(refusal_text(&err).to_string()),
                };
            }
        };

        match result {
            Ok(text) => CommandOutcome::Reply(text),
            Err(err) => CommandOutcome::Reply(refusal_text(&err).to_string()),
        }
    }

    pub fn blocks(&self) -> &BlockList {
        &self.blocks
    }

    pub fn mode(&self) -> &ModeTimer<C> {
        &self.mode
    }
}
