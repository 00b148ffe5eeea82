//! batbot entry point.
//!
//! Binary name: `batbot`
//!
//! Parses CLI arguments, loads the persona config, wires the responder,
//! then either connects to Discord (with the keep-alive server alongside)
//! or answers a single message offline.

mod cli;
mod discord;
mod http;
mod state;

use anyhow::Context as _;
use clap::Parser;
use clap_complete::generate;
use tokio_util::sync::CancellationToken;

use batbot_infra::config::load_persona_config;
use batbot_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_directives};

use cli::{Cli, Commands, CompletionArgs};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "batbot", &mut std::io::stdout());
        return Ok(());
    }

    let enable_otel = matches!(cli.command, Commands::Run { otel: true, .. });
    init_tracing(verbosity_directives(cli.verbose, cli.quiet), enable_otel)
        .map_err(|e| anyhow::anyhow!(e))?;

    let result = dispatch(cli).await;
    shutdown_tracing();
    result
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run {
            token,
            completion,
            port,
            host,
            ..
        } => {
            let token = cli::resolve_token(token)
                .context("no platform token: set PLATFORM_TOKEN or DISCORD_TOKEN")?;
            let state = build_state(&cli.config, &completion).await?;
            serve(state, &token, &host, port).await?;
        }

        Commands::Reply {
            message,
            user,
            awakened,
            completion,
        } => {
            let state = build_state(&cli.config, &completion).await?;
            cli::reply::reply(&state, &user, &message, awakened, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

async fn build_state(
    config_path: &std::path::Path,
    completion: &CompletionArgs,
) -> anyhow::Result<AppState> {
    let mut config = load_persona_config(config_path).await;
    if let Some(base_url) = &completion.base_url {
        config.completion.base_url = base_url.clone();
    }
    AppState::init(config, completion.resolved_key())
}

/// Run the keep-alive server and the Discord client until either stops.
async fn serve(state: AppState, token: &str, host: &str, port: u16) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received");
        signal_token.cancel();
    });

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind keep-alive server on {addr}"))?;
    tracing::info!(%addr, "Keep-alive server listening");

    let router = http::router::build_router(state.clone());
    let server_token = shutdown.clone();
    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { server_token.cancelled().await })
            .await
    });

    let result = discord::run(state, token, shutdown.clone()).await;
    shutdown.cancel();
    server.await??;
    result
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
