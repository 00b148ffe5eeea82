//! `batbot reply`: one reply through the full orchestrator, no platform.

use anyhow::Result;
use console::style;

use crate::state::AppState;

pub async fn reply(
    state: &AppState,
    user: &str,
    message: &str,
    awakened: bool,
    json: bool,
) -> Result<()> {
    if awakened {
        state.mode.activate(state.awaken_window());
    }
    let awakened = state.mode.is_active();

    let text = state
        .responder
        .orchestrator()
        .generate_reply(user, message, awakened)
        .await;

    if json {
        let out = serde_json::json!({
            "user": user,
            "awakened": awakened,
            "remote": state.responder.orchestrator().has_remote(),
            "reply": text,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("🦇").bold(), text);
    println!();
    Ok(())
}
