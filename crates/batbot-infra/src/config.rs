//! Persona configuration loader for batbot.
//!
//! Reads an optional `batbot.toml` and deserializes it into
//! [`PersonaConfig`]. Falls back to defaults when the file is missing,
//! unreadable, malformed, or fails validation.

use std::path::Path;

use batbot_types::config::PersonaConfig;
use batbot_types::error::ConfigError;

/// Default file name looked up in the working directory.
pub const CONFIG_FILE: &str = "batbot.toml";

/// Load persona configuration from `path`.
///
/// - If the file does not exist, returns [`PersonaConfig::default()`].
/// - If the file cannot be read, or [`parse_persona_config`] rejects it, logs a
///   warning and returns the default.
pub async fn load_persona_config(path: &Path) -> PersonaConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return PersonaConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return PersonaConfig::default();
        }
    };

    match parse_persona_config(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), persona = %config.name, "Loaded persona config");
            config
        }
        Err(err) => {
            tracing::warn!("Rejected {}: {err}, using defaults", path.display());
            PersonaConfig::default()
        }
    }
}

/// Parse and validate persona configuration from TOML text.
pub fn parse_persona_config(content: &str) -> Result<PersonaConfig, ConfigError> {
    let config = toml::from_str::<PersonaConfig>(content)
        .map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
