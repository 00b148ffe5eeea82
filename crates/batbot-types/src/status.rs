//! Status report returned by the `status` command and the health endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current responder mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Awakened,
    Normal,
}

impl Mode {
    pub fn from_active(active: bool) -> Self {
        if active { Mode::Awakened } else { Mode::Normal }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Awakened => write!(f, "AWAKENED"),
            Mode::Normal => write!(f, "normal"),
        }
    }
}

/// Snapshot of process state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub mode: Mode,
    pub uptime_secs: u64,
    pub blocked_count: usize,
}

/// Format seconds as `Hh Mm Ss`.
pub fn format_uptime(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours}h {minutes}m {seconds}s")
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "🦇 Mode: {} | Uptime: {} | Blacklisted: {}",
            self.mode,
            format_uptime(self.uptime_secs),
            self.blocked_count
        )
    }
}
