//! CLI command definitions for the `batbot` binary.

pub mod reply;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// A dark-witty persona responder for chat channels.
#[derive(Parser)]
#[command(name = "batbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Persona config file. Missing file means defaults.
    #[arg(long, global = true, env = "BATBOT_CONFIG", default_value = "batbot.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Connect to Discord and serve the keep-alive endpoint.
    Run {
        /// Discord bot token (falls back to DISCORD_TOKEN).
        #[arg(long, env = "PLATFORM_TOKEN", hide_env_values = true)]
        token: Option<String>,

        #[command(flatten)]
        completion: CompletionArgs,

        /// Keep-alive HTTP port.
        #[arg(long, env = "KEEPALIVE_PORT", default_value_t = 8080)]
        port: u16,

        /// Keep-alive bind address.
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Export spans to stdout through OpenTelemetry.
        #[arg(long)]
        otel: bool,
    },

    /// Produce one reply offline and print it.
    Reply {
        /// Message text to answer.
        message: String,

        /// Author id used for conversational memory.
        #[arg(long, default_value = "local")]
        user: String,

        /// Answer as if awakened mode were on.
        #[arg(long)]
        awakened: bool,

        #[command(flatten)]
        completion: CompletionArgs,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Remote completion overrides shared by `run` and `reply`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CompletionArgs {
    /// Completion API key (falls back to GROQ_API_KEY). Empty disables remote.
    #[arg(long, env = "COMPLETION_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the completion service base URL.
    #[arg(long, env = "COMPLETION_BASE_URL")]
    pub base_url: Option<String>,
}

impl CompletionArgs {
    pub fn resolved_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
    }
}

/// Platform token from `--token`/`PLATFORM_TOKEN`, then `DISCORD_TOKEN`.
pub fn resolve_token(token: Option<String>) -> Option<String> {
    token
        .or_else(|| std::env::var("DISCORD_TOKEN").ok())
        .filter(|t| !t.trim().is_empty())
}
