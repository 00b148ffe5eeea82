//! Discord connector: gateway client lifecycle around [`handler::Handler`].

pub mod handler;

use serenity::model::gateway::GatewayIntents;
use serenity::prelude::Client;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::state::AppState;
use handler::Handler;

/// Connect and process events until `shutdown` is cancelled.
pub async fn run(state: AppState, token: &str, shutdown: CancellationToken) -> anyhow::Result<()> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(token, intents)
        .event_handler(Handler::new(state, shutdown.clone()))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create Discord client: {e}"))?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown.cancelled().await;
        info!("Shutdown requested, stopping Discord client...");
        shard_manager.shutdown_all().await;
    });

    info!("Starting Discord gateway connection...");
    client
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Discord client error: {e}"))?;

    info!("Discord client stopped");
    Ok(())
}
