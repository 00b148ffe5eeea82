//! Command word recognition.

use std::fmt;

/// Commands the responder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Block,
    Unblock,
    Awaken,
    Status,
    Shutdown,
}

impl CommandKind {
    /// Parse `<prefix><word> ...`. Returns `None` for anything that is not a
    /// known command word, including text without the prefix.
    pub fn parse(content: &str, prefix: &str) -> Option<Self> {
        let rest = content.trim_start().strip_prefix(prefix)?;
        let word = rest.split_whitespace().next()?;
        match word {
            "blacklist" | "block" => Some(CommandKind::Block),
            "unblacklist" | "unblock" => Some(CommandKind::Unblock),
            "awakening" | "awaken" => Some(CommandKind::Awaken),
            "status" => Some(CommandKind::Status),
            "shutdown" => Some(CommandKind::Shutdown),
            _ => None,
        }
    }

    /// Whether running the command depends on the actor's capabilities.
    pub fn needs_privilege(self) -> bool {
        !matches!(self, CommandKind::Status)
    }

    /// Whether the command acts on a target user.
    pub fn needs_target(self) -> bool {
        matches!(self, CommandKind::Block | CommandKind::Unblock)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Block => write!(f, "blacklist"),
            CommandKind::Unblock => write!(f, "unblacklist"),
            CommandKind::Awaken => write!(f, "awakening"),
            CommandKind::Status => write!(f, "status"),
            CommandKind::Shutdown => write!(f, "shutdown"),
        }
    }
}
