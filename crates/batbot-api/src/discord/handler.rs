//! Serenity event handler.
//!
//! Converts each gateway message into an [`InboundMessage`], lets the
//! responder answer triggers, then routes prefix commands with the author's
//! guild capabilities resolved over HTTP.

use std::sync::OnceLock;

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::UserId;
use serenity::model::mention::Mentionable;
use serenity::model::permissions::Permissions;
use serenity::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use batbot_types::trigger::{Actor, InboundMessage, Target};

use crate::state::AppState;

pub struct Handler {
    state: AppState,
    bot_id: OnceLock<UserId>,
    shutdown: CancellationToken,
}

impl Handler {
    pub fn new(state: AppState, shutdown: CancellationToken) -> Self {
        Self {
            state,
            bot_id: OnceLock::new(),
            shutdown,
        }
    }

    fn inbound(&self, msg: &Message) -> InboundMessage {
        let mentions_bot = self
            .bot_id
            .get()
            .is_some_and(|id| msg.mentions_user_id(*id));
        InboundMessage {
            author_id: msg.author.id.to_string(),
            is_bot: msg.author.bot,
            content: msg.content.clone(),
            mentions_bot,
        }
    }

    /// Owner and administrator flags for the author. DMs carry neither.
    async fn resolve_actor(&self, ctx: &Context, msg: &Message) -> Actor {
        let mut actor = plain_actor(&msg.author.id);
        let Some(guild_id) = msg.guild_id else {
            return actor;
        };

        let guild = match guild_id.to_partial_guild(&ctx.http).await {
            Ok(guild) => guild,
            Err(e) => {
                warn!(guild = %guild_id, "Failed to fetch guild: {e}");
                return actor;
            }
        };
        actor.is_owner = guild.owner_id == msg.author.id;

        let member = match guild_id.member(&ctx.http, msg.author.id).await {
            Ok(member) => member,
            Err(e) => {
                warn!(guild = %guild_id, user = %msg.author.id, "Failed to fetch member: {e}");
                actor.is_privileged = actor.is_owner;
                return actor;
            }
        };
        let role_permissions = member
            .roles
            .iter()
            .filter_map(|role_id| guild.roles.get(role_id))
            .map(|role| role.permissions);

        actor.is_privileged = actor.is_owner || has_admin(role_permissions);
        actor
    }

    async fn send(&self, ctx: &Context, msg: &Message, text: &str) {
        if let Err(e) = msg.channel_id.say(&ctx.http, text).await {
            error!(channel = %msg.channel_id, "Failed to send message: {e}");
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        let _ = self.bot_id.set(ready.user.id);
        info!(user = %ready.user.name, id = %ready.user.id, "Discord bot connected");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let responder = &self.state.responder;
        let inbound = self.inbound(&msg);

        if let Some(reply) = responder.handle_message(&inbound).await {
            self.send(&ctx, &msg, &reply).await;
        }

        let Some(kind) = responder.command_for(&inbound) else {
            return;
        };

        let actor = if kind.needs_privilege() {
            self.resolve_actor(&ctx, &msg).await
        } else {
            plain_actor(&msg.author.id)
        };
        let target = if kind.needs_target() {
            pick_target(msg.mentions.iter().map(|u| u.id), self.bot_id.get().copied())
        } else {
            None
        };
        let Some(outcome) = responder.handle_command(&inbound, &actor, target.as_ref()) else {
            return;
        };

        debug!(command = %kind, shutdown = outcome.is_shutdown(), "Command handled");
        self.send(&ctx, &msg, outcome.text()).await;
        if outcome.is_shutdown() {
            self.shutdown.cancel();
        }
    }
}

/// Actor with no capabilities, used when none need resolving.
fn plain_actor(user_id: &UserId) -> Actor {
    Actor {
        user_id: user_id.to_string(),
        is_privileged: false,
        is_owner: false,
    }
}

fn has_admin(permissions: impl IntoIterator<Item = Permissions>) -> bool {
    permissions.into_iter().any(|p| p.administrator())
}

/// First mentioned user other than the bot itself.
fn pick_target(
    mentioned: impl IntoIterator<Item = UserId>,
    bot_id: Option<UserId>,
) -> Option<Target> {
    mentioned
        .into_iter()
        .find(|id| Some(*id) != bot_id)
        .map(|id| Target {
            user_id: id.to_string(),
            label: id.mention().to_string(),
        })
}
